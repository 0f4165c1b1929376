//! Timetabling domain models.
//!
//! Provides the data types for describing a two-division weekly
//! timetabling problem and its solution.
//!
//! # Domain Mappings
//!
//! | u-timetable | Meaning |
//! |-------------|---------|
//! | Subject | Course with weekly theory and practical demand |
//! | Teacher | Person who takes every session of their subjects |
//! | Lab | Room holding one batch per slot |
//! | Division / Batch | Student group / practical sub-group |
//! | Activity | What one division does in one slot |
//! | Timetable | Day → slot → division → activity |

pub mod calendar;
mod activity;
mod cohort;
mod constraint;
mod export;
mod problem;
mod resource;
mod schedule;
mod subject;

pub use activity::{Activity, BatchLab, SessionType};
pub use calendar::{Day, Slot};
pub use cohort::{Batch, Division};
pub use constraint::RuleFamily;
pub use export::{ExportEntry, TimetableExport};
pub use problem::{LabId, ProblemModel, ProblemModelBuilder, SubjectId, TeacherId};
pub use resource::{Lab, Teacher};
pub use schedule::{cell_label, Timetable, Violation, ViolationType};
pub use subject::Subject;
