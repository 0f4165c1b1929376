//! Boolean constraint formulation of the timetabling problem.
//!
//! Bridges the timetabling domain models to the [`crate::engine`] layer:
//! creates one boolean per schedulable unit, emits the seven rule
//! families as linear constraints over those booleans, and decodes a
//! satisfying assignment back into a [`Timetable`](crate::models::Timetable).
//!
//! # Pipeline
//!
//! ```text
//! ProblemModel ─► VariableFactory ─► VariableIndex
//!                                        │
//!                  ConstraintBuilder ◄───┤
//!                        │               │
//!                  ConstraintModel       │
//!                        │               │
//!                 SolverAdapter::solve   │
//!                        │               │
//!                  SolutionExtractor ◄───┘ ─► Timetable
//! ```
//!
//! # Example
//! ```
//! use u_timetable::cp::{encode, SolutionExtractor};
//! use u_timetable::engine::{BatsatSolver, SolverAdapter, SolverConfig};
//! use u_timetable::models::{Lab, ProblemModel, Subject, Teacher};
//!
//! let problem = ProblemModel::builder()
//!     .add_lab(Lab::new("L1"))
//!     .add_subject(Subject::new("Maths").with_theory(2))
//!     .add_subject(Subject::new("Physics").with_theory(1))
//!     .add_teacher(Teacher::new("T1").with_name("Asha").with_subject("Maths"))
//!     .add_teacher(Teacher::new("T2").with_name("Ravi").with_subject("Physics"))
//!     .build()
//!     .unwrap();
//!
//! let encoding = encode(&problem).unwrap();
//! let solution = BatsatSolver::new().solve(&encoding.model, &SolverConfig::default());
//! let timetable = SolutionExtractor::new(&problem, &encoding.index)
//!     .extract(&solution)
//!     .unwrap();
//! assert!(timetable.occupied_count() >= 6);
//! ```
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling"

mod constraints;
mod decode;
mod variables;

pub use constraints::{ConstraintBuilder, EmissionReport};
pub use decode::SolutionExtractor;
pub use variables::{UnitKey, VariableFactory, VariableIndex};

use crate::engine::ConstraintModel;
use crate::models::ProblemModel;
use crate::validation::ValidationError;

/// A fully encoded problem.
#[derive(Debug, Clone)]
pub struct Encoding {
    /// Variables and constraints, ready for a solver.
    pub model: ConstraintModel,
    /// Unit key → variable map for decoding.
    pub index: VariableIndex,
    /// Constraint counts per rule family.
    pub report: EmissionReport,
}

/// Creates the variables and emits every constraint for `problem`.
///
/// # Errors
/// Configuration errors from the variable factory.
pub fn encode(problem: &ProblemModel) -> Result<Encoding, Vec<ValidationError>> {
    let mut model = ConstraintModel::new("timetable");
    let index = VariableFactory::new(problem).create(&mut model)?;
    let report = ConstraintBuilder::new(problem, &index).emit(&mut model);
    Ok(Encoding {
        model,
        index,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lab, Subject, Teacher};

    #[test]
    fn test_encode_counts_match_model() {
        let problem = ProblemModel::builder()
            .add_lab(Lab::new("L1"))
            .add_subject(Subject::new("Maths").with_theory(2))
            .add_teacher(Teacher::new("T1").with_subject("Maths"))
            .build()
            .unwrap();

        let encoding = encode(&problem).unwrap();
        assert_eq!(encoding.report.total(), encoding.model.constraint_count());
        assert_eq!(
            encoding.index.len() + encoding.report.auxiliary_vars,
            encoding.model.var_count()
        );
    }
}
