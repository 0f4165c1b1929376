//! Solver interface: configuration, status, and solution types.

use super::literal::{BoolVar, Literal};
use super::model::ConstraintModel;

/// Status of the solver after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Feasible (but not necessarily optimal) solution found.
    Feasible,
    /// No assignment satisfies the model.
    Infeasible,
    /// Budget exhausted before either a solution or a proof was found.
    Unknown,
    /// Model is invalid or malformed.
    ModelInvalid,
}

/// Encoding size reported with a solution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Variables after clause encoding, auxiliaries included.
    pub variables: usize,
    /// Clauses handed to the SAT solver.
    pub clauses: usize,
}

/// Result of a single solve call.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solver status.
    pub status: SolverStatus,
    /// One value per model variable; empty unless a solution was found.
    pub values: Vec<bool>,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: i64,
    /// Encoding size.
    pub stats: SolverStats,
}

impl Solution {
    /// Creates an empty solution with the given status.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            solve_time_ms: 0,
            stats: SolverStats::default(),
        }
    }

    /// Whether a satisfying assignment was found.
    pub fn is_solution_found(&self) -> bool {
        matches!(self.status, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Value of `var`, if the solution carries one.
    pub fn value(&self, var: BoolVar) -> Option<bool> {
        self.values.get(var.index()).copied()
    }

    /// Truth value of `literal`, if the solution carries its variable.
    pub fn literal_value(&self, literal: Literal) -> Option<bool> {
        self.value(literal.var()).map(|v| literal.eval(v))
    }
}

/// Solver configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds.
    pub time_limit_ms: i64,
    /// Number of parallel workers. Engines may ignore this.
    pub num_workers: usize,
    /// Stop after finding the first feasible solution.
    pub stop_after_first: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 300_000,
            num_workers: 1,
            stop_after_first: true,
        }
    }
}

impl SolverConfig {
    /// Sets the wall-clock budget.
    pub fn with_time_limit_ms(mut self, ms: i64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the worker count.
    pub fn with_num_workers(mut self, workers: usize) -> Self {
        self.num_workers = workers.max(1);
        self
    }
}

/// Trait for boolean/linear constraint engines.
///
/// Implementors provide the actual search. The timetable encoder only
/// relies on the contract: a returned assignment with status
/// `Optimal`/`Feasible` satisfies every constraint of the model; `Infeasible`
/// is a proof; `Unknown` is neither.
pub trait SolverAdapter {
    /// Solves the model and returns a solution.
    fn solve(&self, model: &ConstraintModel, config: &SolverConfig) -> Solution;
}
