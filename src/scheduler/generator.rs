//! End-to-end timetable generation.
//!
//! # Algorithm
//!
//! 1. Create variables and emit constraints ([`crate::cp::encode`]).
//! 2. Solve with a [`SolverAdapter`] under a [`SolverConfig`].
//! 3. Decode the assignment and audit it, or report diagnostics if none
//!    was found.
//!
//! Nothing is retried or relaxed: an infeasible problem stays infeasible.

use log::{debug, info, warn};

use crate::cp::{encode, EmissionReport, SolutionExtractor};
use crate::engine::{BatsatSolver, SolverAdapter, SolverConfig, SolverStats, SolverStatus};
use crate::error::{DecodeError, TimetableError};
use crate::models::{ProblemModel, Timetable};

use super::audit::audit;
use super::diagnostics::DiagnosticsReporter;

/// A successfully generated timetable with run information.
#[derive(Debug, Clone)]
pub struct GeneratedTimetable {
    /// The decoded timetable.
    pub timetable: Timetable,
    /// Solver status (`Feasible` or `Optimal`).
    pub status: SolverStatus,
    /// Wall-clock solve time in milliseconds.
    pub solve_time_ms: i64,
    /// Encoding size reported by the engine.
    pub stats: SolverStats,
    /// Constraint counts per rule family.
    pub emission: EmissionReport,
}

/// Runs the encode → solve → decode pipeline.
///
/// # Example
///
/// ```
/// use u_timetable::engine::SolverConfig;
/// use u_timetable::models::{Lab, ProblemModel, Subject, Teacher};
/// use u_timetable::scheduler::{audit, TimetableGenerator};
///
/// let problem = ProblemModel::builder()
///     .add_lab(Lab::new("L1"))
///     .add_lab(Lab::new("L2"))
///     .add_lab(Lab::new("L3"))
///     .add_subject(Subject::new("DS").with_theory(2).with_practical(1).with_labs(["L1", "L2", "L3"]))
///     .add_subject(Subject::new("OS").with_theory(2).with_practical(1).with_labs(["L1", "L2", "L3"]))
///     .add_teacher(Teacher::new("T1").with_name("Asha").with_subject("DS"))
///     .add_teacher(Teacher::new("T2").with_name("Ravi").with_subject("OS"))
///     .build()
///     .unwrap();
///
/// let generator = TimetableGenerator::new().with_config(SolverConfig::default().with_time_limit_ms(60_000));
/// let result = generator.generate(&problem).unwrap();
/// assert!(audit(&result.timetable, &problem).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TimetableGenerator<S = BatsatSolver> {
    solver: S,
    config: SolverConfig,
}

impl TimetableGenerator<BatsatSolver> {
    /// Creates a generator backed by [`BatsatSolver`].
    pub fn new() -> Self {
        Self::with_solver(BatsatSolver::new())
    }
}

impl Default for TimetableGenerator<BatsatSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SolverAdapter> TimetableGenerator<S> {
    /// Creates a generator around any solving engine.
    pub fn with_solver(solver: S) -> Self {
        Self {
            solver,
            config: SolverConfig::default(),
        }
    }

    /// Sets the solver configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Solver configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Generates a timetable for `problem`.
    ///
    /// # Errors
    /// - [`TimetableError::Configuration`] for malformed input
    /// - [`TimetableError::Infeasible`] when no timetable exists
    /// - [`TimetableError::Timeout`] when the budget ran out first
    /// - [`TimetableError::ModelInvalid`] when the engine rejects the model
    /// - [`TimetableError::Decoding`] when the assignment breaks the encoding
    ///   or the decoded timetable fails the audit
    pub fn generate(&self, problem: &ProblemModel) -> Result<GeneratedTimetable, TimetableError> {
        info!(
            "generating timetable: {} subjects, {} teachers, {} labs",
            problem.subjects().len(),
            problem.teachers().len(),
            problem.labs().len()
        );

        let encoding = encode(problem)?;
        info!(
            "model built: {} variables, {}",
            encoding.model.var_count(),
            encoding.report
        );

        let solution = self.solver.solve(&encoding.model, &self.config);
        info!(
            "solver finished: {:?} in {} ms",
            solution.status, solution.solve_time_ms
        );
        debug!("solver stats: {:?}", solution.stats);

        match solution.status {
            SolverStatus::Optimal | SolverStatus::Feasible => {}
            SolverStatus::Infeasible => {
                let diagnostics = DiagnosticsReporter::new().report(problem, solution.status);
                return Err(TimetableError::Infeasible(diagnostics));
            }
            SolverStatus::Unknown => {
                let diagnostics = DiagnosticsReporter::new().report(problem, solution.status);
                return Err(TimetableError::Timeout(diagnostics));
            }
            SolverStatus::ModelInvalid => {
                let reason = encoding
                    .model
                    .validate()
                    .err()
                    .unwrap_or_else(|| "rejected by the solving engine".to_string());
                return Err(TimetableError::ModelInvalid(reason));
            }
        }

        let timetable = SolutionExtractor::new(problem, &encoding.index).extract(&solution)?;

        let mut violations = audit(&timetable, problem).into_iter();
        if let Some(first) = violations.next() {
            warn!(
                "decoded timetable breaks {} rule(s); first: {}",
                violations.len() + 1,
                first.message
            );
            return Err(DecodeError::RuleViolation(first).into());
        }

        info!(
            "timetable generated: {} occupied cells",
            timetable.occupied_count()
        );
        Ok(GeneratedTimetable {
            timetable,
            status: solution.status,
            solve_time_ms: solution.solve_time_ms,
            stats: solution.stats,
            emission: encoding.report,
        })
    }
}
