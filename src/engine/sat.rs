//! [`SolverAdapter`] over the BatSat SAT solver via RustSAT.
//!
//! Each [`LinearConstraint`] becomes a RustSAT pseudo-boolean constraint;
//! RustSAT's default encoders turn them into clauses (clause-shaped and
//! cardinality constraints are recognised and encoded as such). An
//! enforcement literal `e` is expressed with one extra term on `¬e`, large
//! enough to satisfy the constraint on its own:
//!
//! ```text
//! e ⇒ Σ a·x ≥ d    ~>    Σ a·x + (d − min) · ¬e ≥ d
//! e ⇒ Σ a·x ≤ u    ~>    Σ a·x − (max − u) · ¬e ≤ u
//! ```
//!
//! where `min`/`max` are the smallest/largest values `Σ a·x` can take.

use std::time::{Duration, Instant};

use log::{debug, warn};
use rustsat::instances::{ManageVars, SatInstance};
use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::constraints::PbConstraint;
use rustsat::types::{Lit, TernaryVal};
use rustsat_batsat::BasicSolver;

use super::model::{Comparison, ConstraintModel, LinearConstraint};
use super::solver::{Solution, SolverAdapter, SolverConfig, SolverStats, SolverStatus};

/// Complete SAT-based engine backed by BatSat.
///
/// # Examples
///
/// ```
/// use u_timetable::engine::{
///     unit_terms, BatsatSolver, Comparison, ConstraintModel, SolverAdapter, SolverConfig,
/// };
///
/// let mut model = ConstraintModel::new("pick-two");
/// let xs: Vec<_> = (0..4).map(|i| model.new_bool_var(format!("x{i}")).lit()).collect();
/// model.add_linear(unit_terms(&xs), Comparison::Equal, 2);
///
/// let solution = BatsatSolver::new().solve(&model, &SolverConfig::default());
/// assert!(solution.is_solution_found());
/// assert_eq!(solution.values.iter().filter(|&&v| v).count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatsatSolver;

impl BatsatSolver {
    pub fn new() -> Self {
        Self
    }
}

enum Outcome {
    Satisfiable(Vec<bool>),
    Unsatisfiable,
    Interrupted,
}

impl SolverAdapter for BatsatSolver {
    fn solve(&self, model: &ConstraintModel, config: &SolverConfig) -> Solution {
        if let Err(msg) = model.validate() {
            warn!("model '{}' rejected: {msg}", model.name);
            return Solution::empty(SolverStatus::ModelInvalid);
        }

        let start = Instant::now();
        let budget = Duration::from_millis(config.time_limit_ms.max(0) as u64);
        let deadline = start.checked_add(budget);

        let mut stats = SolverStats::default();
        let outcome = search(model, deadline, &mut stats);
        let mut solution = Solution::empty(SolverStatus::Unknown);
        solution.stats = stats;

        match outcome {
            Ok(Outcome::Satisfiable(values)) => match model.first_violation(&values) {
                None => {
                    solution.status = SolverStatus::Feasible;
                    solution.values = values;
                }
                Some(idx) => warn!("assignment failed self-check at constraint {idx}"),
            },
            Ok(Outcome::Unsatisfiable) => solution.status = SolverStatus::Infeasible,
            Ok(Outcome::Interrupted) => {}
            Err(msg) => warn!("engine error on '{}': {msg}", model.name),
        }

        solution.solve_time_ms = start.elapsed().as_millis() as i64;
        debug!(
            "'{}' finished {:?} in {} ms ({} sat variables, {} clauses)",
            model.name, solution.status, solution.solve_time_ms, stats.variables, stats.clauses
        );
        solution
    }
}

fn search(
    model: &ConstraintModel,
    deadline: Option<Instant>,
    stats: &mut SolverStats,
) -> Result<Outcome, String> {
    let mut instance: SatInstance = SatInstance::new();
    let lits: Vec<Lit> = (0..model.var_count()).map(|_| instance.new_lit()).collect();
    for constraint in model.constraints() {
        for pb in translate(constraint, &lits) {
            instance.add_pb_constr(pb);
        }
    }

    let (cnf, vars) = instance.into_cnf();
    stats.variables = vars.n_used() as usize;
    stats.clauses = cnf.len();

    let mut solver = BasicSolver::default();
    if let Some(max) = vars.max_var() {
        solver.reserve(max).map_err(|e| e.to_string())?;
    }
    solver.add_cnf(cnf).map_err(|e| e.to_string())?;
    if let Some(deadline) = deadline {
        solver
            .batsat_mut()
            .cb_mut()
            .set_stop(move || Instant::now() >= deadline);
    }

    match solver.solve().map_err(|e| e.to_string())? {
        SolverResult::Sat => {
            let mut values = Vec::with_capacity(lits.len());
            for &lit in &lits {
                let value = solver.lit_val(lit).map_err(|e| e.to_string())?;
                values.push(value == TernaryVal::True);
            }
            Ok(Outcome::Satisfiable(values))
        }
        SolverResult::Unsat => Ok(Outcome::Unsatisfiable),
        SolverResult::Interrupted => Ok(Outcome::Interrupted),
    }
}

/// Merges terms per variable: `c·¬x = c − c·x`.
///
/// Returns `(coefficient, variable index)` pairs and the constant offset.
fn merge_terms(constraint: &LinearConstraint) -> (Vec<(i64, usize)>, i64) {
    let mut coeffs: Vec<(i64, usize)> = Vec::with_capacity(constraint.terms.len());
    let mut offset = 0;
    for &(c, lit) in &constraint.terms {
        let (c, var) = if lit.is_negated() {
            offset += c;
            (-c, lit.var().index())
        } else {
            (c, lit.var().index())
        };
        match coeffs.iter_mut().find(|(_, v)| *v == var) {
            Some(entry) => entry.0 += c,
            None => coeffs.push((c, var)),
        }
    }
    coeffs.retain(|(c, _)| *c != 0);
    (coeffs, offset)
}

/// RustSAT constraints equivalent to one model constraint.
fn translate(constraint: &LinearConstraint, lits: &[Lit]) -> Vec<PbConstraint> {
    let (coeffs, offset) = merge_terms(constraint);
    let bound = constraint.bound - offset;
    let terms: Vec<(Lit, isize)> = coeffs
        .iter()
        .map(|&(c, v)| (lits[v], c as isize))
        .collect();
    let min: i64 = coeffs.iter().map(|(c, _)| (*c).min(0)).sum();
    let max: i64 = coeffs.iter().map(|(c, _)| (*c).max(0)).sum();

    let enforcement = constraint
        .enforcement
        .map(|e| if e.is_negated() { lits[e.var().index()] } else { !lits[e.var().index()] });

    let lower = |out: &mut Vec<PbConstraint>| match enforcement {
        None => out.push(PbConstraint::new_lb(terms.clone(), bound as isize)),
        Some(not_e) => {
            let slack = bound - min;
            if slack > 0 {
                let mut t = terms.clone();
                t.push((not_e, slack as isize));
                out.push(PbConstraint::new_lb(t, bound as isize));
            }
        }
    };
    let upper = |out: &mut Vec<PbConstraint>| match enforcement {
        None => out.push(PbConstraint::new_ub(terms.clone(), bound as isize)),
        Some(not_e) => {
            let slack = max - bound;
            if slack > 0 {
                let mut t = terms.clone();
                t.push((not_e, -(slack as isize)));
                out.push(PbConstraint::new_ub(t, bound as isize));
            }
        }
    };

    let mut out = Vec::with_capacity(2);
    match constraint.comparison {
        Comparison::GreaterOrEqual => lower(&mut out),
        Comparison::LessOrEqual => upper(&mut out),
        Comparison::Equal => {
            if enforcement.is_none() {
                out.push(PbConstraint::new_eq(terms.clone(), bound as isize));
            } else {
                lower(&mut out);
                upper(&mut out);
            }
        }
    }
    out
}
