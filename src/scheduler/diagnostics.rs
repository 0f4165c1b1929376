//! Load-versus-capacity diagnostics for runs that found no timetable.
//!
//! Every check here is a heuristic necessary condition computed from the
//! problem alone. A finding explains why a timetable *cannot* exist; the
//! absence of findings says nothing about whether one does.
//!
//! # Checks
//!
//! | Finding | Condition |
//! |---------|-----------|
//! | `Overload` | theory + practical slots per division > days × slots |
//! | `TeacherOverload` | teacher's weekly units (both divisions) > rest-limited capacity |
//! | `LabShortage` | practical subject prefers fewer labs than there are batches |
//! | `NoPartnerTheory` | practical subject whose teacher teaches every theory subject |

use std::fmt;

use log::info;

use crate::engine::SolverStatus;
use crate::models::calendar::{max_rest_compatible_slots_per_day, slots_per_week};
use crate::models::{Batch, Day, Division, ProblemModel};

/// Classification of diagnostic findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// A division needs more slots than the week has.
    Overload,
    /// A teacher needs more slots than the rest rule allows.
    TeacherOverload,
    /// A practical cannot seat every batch in a distinct lab.
    LabShortage,
    /// A practical has no theory of another teacher to run against.
    NoPartnerTheory,
}

/// One diagnostic finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    /// Subject, teacher, or division concerned.
    pub entity: String,
    pub message: String,
}

/// Statistics and findings for a run without a timetable.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// Solver outcome that triggered the report.
    pub status: SolverStatus,
    /// Theory slots required per division per week.
    pub theory_required: u32,
    /// Practical sessions required per division per week.
    pub practical_required: u32,
    /// Schedulable slots per division per week.
    pub available_slots: u32,
    /// Heuristic findings, most fundamental first.
    pub findings: Vec<Finding>,
    /// General suggestions for relaxing the input.
    pub suggestions: Vec<String>,
}

impl Diagnostics {
    /// Total slots required per division per week.
    pub fn required_slots(&self) -> u32 {
        self.theory_required + self.practical_required
    }

    /// Whether the weekly demand exceeds the week.
    pub fn is_overloaded(&self) -> bool {
        self.required_slots() > self.available_slots
    }

    /// Whether any finding of `kind` was raised.
    pub fn has(&self, kind: FindingKind) -> bool {
        self.findings.iter().any(|f| f.kind == kind)
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Theory slots required per division per week: {}",
            self.theory_required
        )?;
        writeln!(
            f,
            "Practical sessions required per division per week: {}",
            self.practical_required
        )?;
        writeln!(
            f,
            "Available slots per division per week: {}",
            self.available_slots
        )?;
        for finding in &self.findings {
            writeln!(f, "! {}", finding.message)?;
        }
        for (i, suggestion) in self.suggestions.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, suggestion)?;
        }
        Ok(())
    }
}

/// Builds [`Diagnostics`] from a problem model.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticsReporter;

impl DiagnosticsReporter {
    pub fn new() -> Self {
        Self
    }

    /// Runs every check for a run that ended with `status`.
    pub fn report(&self, problem: &ProblemModel, status: SolverStatus) -> Diagnostics {
        let theory_required: u32 = problem.subjects().iter().map(|s| s.theory_per_week).sum();
        let practical_required: u32 = problem
            .subjects()
            .iter()
            .map(|s| s.practical_per_week)
            .sum();
        let available_slots = slots_per_week() as u32;

        let mut findings = Vec::new();
        let mut suggestions = Vec::new();

        if theory_required + practical_required > available_slots {
            for division in Division::ALL {
                findings.push(Finding {
                    kind: FindingKind::Overload,
                    entity: division.name().to_string(),
                    message: format!(
                        "{} needs {}+{} = {} slots but the week has {}",
                        division,
                        theory_required,
                        practical_required,
                        theory_required + practical_required,
                        available_slots
                    ),
                });
            }
            suggestions.push("Reduce the weekly lectures of some subjects".to_string());
            suggestions.push("Add more time slots (extend college hours)".to_string());
            suggestions.push("Consider alternate-week schedules for some subjects".to_string());
        }

        self.check_teachers(problem, &mut findings);
        self.check_labs(problem, &mut findings);
        self.check_partner_theory(problem, &mut findings);

        suggestions.push("Check that teacher assignments are realistic".to_string());
        suggestions.push("Ensure sufficient practical labs are available".to_string());
        suggestions.push("Review whether the no-back-to-back rule is too restrictive".to_string());
        suggestions.push("Consider reducing the number of practical batches".to_string());

        let diagnostics = Diagnostics {
            status,
            theory_required,
            practical_required,
            available_slots,
            findings,
            suggestions,
        };
        info!(
            "diagnostics: {} required vs {} available, {} findings",
            diagnostics.required_slots(),
            available_slots,
            diagnostics.findings.len()
        );
        diagnostics
    }

    fn check_teachers(&self, problem: &ProblemModel, findings: &mut Vec<Finding>) {
        let capacity = (max_rest_compatible_slots_per_day() * Day::ALL.len()) as u32;
        for teacher_id in problem.teacher_ids() {
            let Some(teacher) = problem.teacher(teacher_id) else {
                continue;
            };
            let demand: u32 = problem
                .subjects_of(teacher_id)
                .iter()
                .filter_map(|&s| problem.subject(s))
                .map(|s| s.weekly_slots() * Division::ALL.len() as u32)
                .sum();
            if demand > capacity {
                findings.push(Finding {
                    kind: FindingKind::TeacherOverload,
                    entity: teacher.id.clone(),
                    message: format!(
                        "Teacher {} needs {} slots per week but can take at most {} without back-to-back slots",
                        teacher.display_name(),
                        demand,
                        capacity
                    ),
                });
            }
        }
    }

    fn check_labs(&self, problem: &ProblemModel, findings: &mut Vec<Finding>) {
        for subject_id in problem.practical_subjects() {
            let labs = problem.preferred_labs(subject_id).len();
            if labs >= Batch::ALL.len() {
                continue;
            }
            if let Some(subject) = problem.subject(subject_id) {
                findings.push(Finding {
                    kind: FindingKind::LabShortage,
                    entity: subject.name.clone(),
                    message: format!(
                        "Practical {} can use {} lab(s) but needs {} at once, one per batch",
                        subject.name,
                        labs,
                        Batch::ALL.len()
                    ),
                });
            }
        }
    }

    fn check_partner_theory(&self, problem: &ProblemModel, findings: &mut Vec<Finding>) {
        let theory = problem.theory_subjects();
        for subject_id in problem.practical_subjects() {
            let teacher = problem.teacher_of(subject_id);
            let has_partner = theory.iter().any(|&t| problem.teacher_of(t) != teacher);
            if has_partner {
                continue;
            }
            if let Some(subject) = problem.subject(subject_id) {
                findings.push(Finding {
                    kind: FindingKind::NoPartnerTheory,
                    entity: subject.name.clone(),
                    message: format!(
                        "Practical {} needs the other division in a theory lecture of another teacher, and there is none",
                        subject.name
                    ),
                });
            }
        }
    }
}
