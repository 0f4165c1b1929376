//! Weekly timetable generation for two divisions sharing teachers and labs.
//!
//! Encodes a week of theory lectures and batch-split practicals as a
//! boolean constraint model, solves it, and decodes the assignment into a
//! timetable that can be audited and exported.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `Teacher`, `Lab`, `ProblemModel`,
//!   `Activity`, `Timetable`, and the export view
//! - **`validation`**: Input integrity checks (duplicate ids, unknown labs, teacher assignment)
//! - **`engine`**: Domain-agnostic boolean model, `SolverAdapter`, `BatsatSolver` over RustSAT/BatSat
//! - **`cp`**: Variable creation, rule emission, and decoding
//! - **`scheduler`**: End-to-end generator, audit, diagnostics, KPIs
//! - **`error`**: Failure kinds of a generation run
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Division, Lab, ProblemModel, Subject, Teacher};
//! use u_timetable::scheduler::TimetableGenerator;
//!
//! let problem = ProblemModel::builder()
//!     .add_subject(Subject::new("Maths").with_theory(3))
//!     .add_subject(Subject::new("Physics").with_theory(2))
//!     .add_teacher(Teacher::new("T1").with_name("Asha").with_subject("Maths"))
//!     .add_teacher(Teacher::new("T2").with_name("Ravi").with_subject("Physics"))
//!     .add_lab(Lab::new("L1"))
//!     .build()
//!     .unwrap();
//!
//! let result = TimetableGenerator::new().generate(&problem).unwrap();
//! assert!(result.timetable.activities_for(Division::A).count() >= 5);
//! let export = result.timetable.to_export();
//! assert!(export.entry_count() >= 10);
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Eén & Sörensson (2003), "An Extensible SAT-solver"

pub mod cp;
pub mod engine;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{DecodeError, TimetableError};
