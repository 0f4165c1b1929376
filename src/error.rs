//! Error types of the timetabling pipeline.

use crate::engine::SolverStatus;
use crate::models::{cell_label, Batch, Day, Division, Slot, Violation};
use crate::scheduler::Diagnostics;
use crate::validation::ValidationError;

/// Failure to turn a solver assignment into a timetable.
///
/// Any of these means the assignment does not honour the encoding; none
/// is recoverable by retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The solution carries no assignment.
    NoSolution(SolverStatus),
    /// The assignment does not cover a variable of the index.
    MissingValue { variable: String },
    /// More than one activity is true in a cell.
    MultipleActivities {
        day: Day,
        slot: Slot,
        division: Division,
        subjects: Vec<String>,
    },
    /// A practical places some batches but not all.
    IncompleteBatches {
        day: Day,
        slot: Slot,
        division: Division,
        subject: String,
        missing: Vec<Batch>,
    },
    /// A batch is placed in more than one lab at once.
    BatchInMultipleLabs {
        day: Day,
        slot: Slot,
        division: Division,
        subject: String,
        batch: Batch,
    },
    /// A true variable refers to a subject without a teacher.
    UnassignedSubject { subject: String },
    /// The decoded timetable breaks a rule the model should have enforced.
    RuleViolation(Violation),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::NoSolution(status) => {
                write!(f, "No assignment to decode (solver status {:?})", status)
            }
            DecodeError::MissingValue { variable } => {
                write!(f, "Assignment has no value for variable {}", variable)
            }
            DecodeError::MultipleActivities {
                day,
                slot,
                division,
                subjects,
            } => write!(
                f,
                "{}: more than one activity ({})",
                cell_label(*day, *slot, *division),
                subjects.join(", ")
            ),
            DecodeError::IncompleteBatches {
                day,
                slot,
                division,
                subject,
                missing,
            } => {
                let missing: Vec<&str> = missing.iter().map(|b| b.label()).collect();
                write!(
                    f,
                    "{}: practical {} leaves batches {} unplaced",
                    cell_label(*day, *slot, *division),
                    subject,
                    missing.join(", ")
                )
            }
            DecodeError::BatchInMultipleLabs {
                day,
                slot,
                division,
                subject,
                batch,
            } => write!(
                f,
                "{}: practical {} places batch {} in more than one lab",
                cell_label(*day, *slot, *division),
                subject,
                batch
            ),
            DecodeError::UnassignedSubject { subject } => {
                write!(f, "Subject {} has no assigned teacher", subject)
            }
            DecodeError::RuleViolation(violation) => write!(
                f,
                "Decoded timetable breaks a rule ({:?}): {}",
                violation.violation_type, violation.message
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Failure of a timetabling run.
#[derive(Debug, Clone)]
pub enum TimetableError {
    /// The input is malformed.
    Configuration(Vec<ValidationError>),
    /// The solver proved that no timetable satisfies every rule.
    Infeasible(Diagnostics),
    /// The solver ran out of budget before finding a timetable or a proof.
    Timeout(Diagnostics),
    /// The solver rejected the model.
    ModelInvalid(String),
    /// The assignment could not be decoded.
    Decoding(DecodeError),
}

impl TimetableError {
    /// Diagnostics attached to a not-found outcome.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            TimetableError::Infeasible(d) | TimetableError::Timeout(d) => Some(d),
            _ => None,
        }
    }
}

impl std::fmt::Display for TimetableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimetableError::Configuration(errors) => {
                write!(f, "Invalid configuration ({} errors)", errors.len())?;
                for e in errors {
                    write!(f, "\n  - {}", e)?;
                }
                Ok(())
            }
            TimetableError::Infeasible(diagnostics) => {
                write!(f, "No timetable satisfies all rules\n{}", diagnostics)
            }
            TimetableError::Timeout(diagnostics) => write!(
                f,
                "No timetable found within the time limit; feasibility is undecided\n{}",
                diagnostics
            ),
            TimetableError::ModelInvalid(message) => {
                write!(f, "Solver rejected the model: {}", message)
            }
            TimetableError::Decoding(e) => write!(f, "Decoding failed: {}", e),
        }
    }
}

impl std::error::Error for TimetableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimetableError::Decoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        TimetableError::Configuration(errors)
    }
}

impl From<DecodeError> for TimetableError {
    fn from(e: DecodeError) -> Self {
        TimetableError::Decoding(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_decode_error_names_cell() {
        let e = DecodeError::IncompleteBatches {
            day: Day::Tuesday,
            slot: Slot::new(3).unwrap(),
            division: Division::B,
            subject: "DS".into(),
            missing: vec![Batch::Q, Batch::R],
        };
        let text = e.to_string();
        assert!(text.contains("Tuesday 2:00-3:00 TY_B"));
        assert!(text.contains("Q, R"));
    }

    #[test]
    fn test_configuration_display_lists_errors() {
        let errors = vec![ValidationError {
            kind: ValidationErrorKind::ZeroRequirement,
            message: "Subject 'X' has no theory or practical slots".into(),
        }];
        let e = TimetableError::from(errors);
        let text = e.to_string();
        assert!(text.contains("1 errors"));
        assert!(text.contains("Subject 'X'"));
        assert!(e.diagnostics().is_none());
    }

    #[test]
    fn test_rule_violation_names_rule() {
        let e = DecodeError::RuleViolation(Violation::teacher_rest(
            "T1",
            "T1 works Monday 2:00-3:00 and 3:00-4:00",
        ));
        let text = TimetableError::from(e).to_string();
        assert!(text.starts_with("Decoding failed"));
        assert!(text.contains("TeacherRest"));
        assert!(text.contains("T1 works Monday"));
    }

    #[test]
    fn test_decoding_source() {
        use std::error::Error;
        let e = TimetableError::from(DecodeError::NoSolution(SolverStatus::Unknown));
        assert!(e.source().is_some());
    }
}
