//! Timetable generation, auditing, and reporting.
//!
//! # Components
//!
//! - [`TimetableGenerator`]: encode → solve → decode, with diagnostics on failure
//! - [`audit`]: solver-independent rule check of a decoded timetable
//! - [`DiagnosticsReporter`]: load-versus-capacity findings for runs without a timetable
//! - [`TimetableKpi`]: workload and utilization statistics
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod audit;
mod diagnostics;
mod generator;
mod kpi;

pub use audit::audit;
pub use diagnostics::{Diagnostics, DiagnosticsReporter, Finding, FindingKind};
pub use generator::{GeneratedTimetable, TimetableGenerator};
pub use kpi::TimetableKpi;
