//! Input validation for timetabling problems.
//!
//! Checks structural integrity of subjects, teachers, and labs before
//! any variable is created. Detects:
//! - Empty names and duplicate identifiers
//! - References to labs, subjects, or teachers that don't exist
//! - Subjects with no weekly requirement
//! - Practical subjects without preferred labs
//!
//! Every problem is collected; nothing stops at the first error.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Lab, ProblemModel, Subject, Teacher};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending entity.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A subject, teacher id, or lab has an empty name.
    EmptyName,
    /// Two entities share the same identifier.
    DuplicateId,
    /// A subject prefers a lab that doesn't exist.
    UnknownLab,
    /// A teacher or assignment references a subject that doesn't exist.
    UnknownSubject,
    /// An assignment references a teacher that doesn't exist.
    UnknownTeacher,
    /// A subject needs neither theory nor practical slots.
    ZeroRequirement,
    /// A practical subject has no preferred labs.
    MissingPreferredLabs,
    /// No teacher takes a subject.
    UnassignedSubject,
    /// Several teachers take a subject and none was chosen explicitly.
    AmbiguousTeacher,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates raw builder input.
///
/// Checks:
/// 1. No empty subject names, teacher ids, or lab names
/// 2. No duplicate subject names, teacher ids, or lab names
/// 3. Every subject needs at least one slot per week
/// 4. Practical subjects list at least one preferred lab, each existing
///    and listed once
/// 5. Teachers' subject lists and explicit assignments reference
///    existing subjects and teachers
///
/// Teacher resolution (unassigned or ambiguous subjects) is checked by
/// the builder after this passes.
pub fn validate_input(
    subjects: &[Subject],
    teachers: &[Teacher],
    labs: &[Lab],
    assignments: &[(String, String)],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut lab_names = HashSet::new();
    for lab in labs {
        if lab.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Lab with empty name",
            ));
        }
        if !lab_names.insert(lab.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate lab: {}", lab.name),
            ));
        }
    }

    let mut subject_names = HashSet::new();
    for subject in subjects {
        if subject.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Subject with empty name",
            ));
        }
        if !subject_names.insert(subject.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject: {}", subject.name),
            ));
        }
        check_requirements(subject, &mut errors);

        let mut seen = HashSet::new();
        for lab in &subject.preferred_labs {
            if !lab_names.contains(lab.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownLab,
                    format!("Subject '{}' prefers unknown lab '{}'", subject.name, lab),
                ));
            }
            if !seen.insert(lab.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Subject '{}' lists lab '{}' twice", subject.name, lab),
                ));
            }
        }
    }

    let mut teacher_ids = HashSet::new();
    for teacher in teachers {
        if teacher.id.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Teacher '{}' has an empty id", teacher.name),
            ));
        }
        if !teacher_ids.insert(teacher.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", teacher.id),
            ));
        }
        for subject in &teacher.subjects {
            if !subject_names.contains(subject.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSubject,
                    format!(
                        "Teacher '{}' references unknown subject '{}'",
                        teacher.id, subject
                    ),
                ));
            }
        }
    }

    for (subject, teacher) in assignments {
        if !subject_names.contains(subject.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSubject,
                format!("Assignment references unknown subject '{subject}'"),
            ));
        }
        if !teacher_ids.contains(teacher.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                format!("Assignment of '{subject}' references unknown teacher '{teacher}'"),
            ));
        }
    }

    finish(errors)
}

fn check_requirements(subject: &Subject, errors: &mut Vec<ValidationError>) {
    if subject.weekly_slots() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroRequirement,
            format!("Subject '{}' has no theory or practical slots", subject.name),
        ));
    }
    if subject.has_practical() && subject.preferred_labs.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingPreferredLabs,
            format!(
                "Subject '{}' has practicals but no preferred labs",
                subject.name
            ),
        ));
    }
}

/// Validates a built (or deserialized) model before variables are created.
///
/// Checks:
/// 1. Every subject needs at least one slot per week
/// 2. Practical subjects have at least one resolved preferred lab, none
///    repeated and all within the lab list
/// 3. The subject→teacher map is total and points at existing teachers
pub fn validate_model(problem: &ProblemModel) -> ValidationResult {
    let mut errors = Vec::new();

    for (i, subject) in problem.subjects.iter().enumerate() {
        check_requirements(subject, &mut errors);

        let labs = problem.preferred_labs.get(i).map(Vec::as_slice).unwrap_or(&[]);
        if subject.has_practical() && labs.is_empty() && !subject.preferred_labs.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingPreferredLabs,
                format!("Subject '{}' has no resolved preferred labs", subject.name),
            ));
        }
        let mut seen = HashSet::new();
        for lab in labs {
            if lab.0 >= problem.labs.len() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownLab,
                    format!("Subject '{}' prefers lab #{} which does not exist", subject.name, lab.0),
                ));
            }
            if !seen.insert(*lab) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Subject '{}' lists lab #{} twice", subject.name, lab.0),
                ));
            }
        }

        match problem.subject_teacher.get(i) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnassignedSubject,
                format!("Subject '{}' has no teacher", subject.name),
            )),
            Some(t) if t.0 >= problem.teachers.len() => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                format!("Subject '{}' is assigned to teacher #{} which does not exist", subject.name, t.0),
            )),
            Some(_) => {}
        }
    }

    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabId, SubjectId, TeacherId};

    fn sample_labs() -> Vec<Lab> {
        vec![Lab::new("L1"), Lab::new("L2"), Lab::new("L3")]
    }

    fn sample_subjects() -> Vec<Subject> {
        vec![
            Subject::new("DS").with_theory(3).with_practical(1).with_labs(["L1", "L2", "L3"]),
            Subject::new("Maths").with_theory(4),
        ]
    }

    fn sample_teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("T1").with_name("Asha").with_subject("DS"),
            Teacher::new("T2").with_name("Ravi").with_subject("Maths"),
        ]
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let result = validate_input(&sample_subjects(), &sample_teachers(), &sample_labs(), &[]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let mut labs = sample_labs();
        labs.push(Lab::new("L1"));
        let mut teachers = sample_teachers();
        teachers.push(Teacher::new("T1"));

        let kinds = kinds(validate_input(&sample_subjects(), &teachers, &labs, &[]));
        assert_eq!(
            kinds.iter().filter(|k| **k == ValidationErrorKind::DuplicateId).count(),
            2
        );
    }

    #[test]
    fn test_empty_names() {
        let subjects = vec![Subject::new(" ").with_theory(1)];
        let kinds = kinds(validate_input(&subjects, &[], &[Lab::new("")], &[]));
        assert_eq!(
            kinds.iter().filter(|k| **k == ValidationErrorKind::EmptyName).count(),
            2
        );
    }

    #[test]
    fn test_zero_requirement() {
        let subjects = vec![Subject::new("Idle")];
        let kinds = kinds(validate_input(&subjects, &[], &[], &[]));
        assert_eq!(kinds, vec![ValidationErrorKind::ZeroRequirement]);
    }

    #[test]
    fn test_missing_preferred_labs() {
        let subjects = vec![Subject::new("DS").with_theory(1).with_practical(1)];
        let kinds = kinds(validate_input(&subjects, &[], &sample_labs(), &[]));
        assert_eq!(kinds, vec![ValidationErrorKind::MissingPreferredLabs]);
    }

    #[test]
    fn test_unknown_and_repeated_lab() {
        let subjects = vec![Subject::new("DS")
            .with_practical(1)
            .with_labs(["L1", "L9", "L1"])];
        let kinds = kinds(validate_input(&subjects, &[], &sample_labs(), &[]));
        assert!(kinds.contains(&ValidationErrorKind::UnknownLab));
        assert!(kinds.contains(&ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_unknown_references() {
        let teachers = vec![Teacher::new("T1").with_subject("Physics")];
        let assignments = vec![
            ("DS".to_string(), "T9".to_string()),
            ("Chem".to_string(), "T1".to_string()),
        ];
        let kinds = kinds(validate_input(&sample_subjects(), &teachers, &sample_labs(), &assignments));

        assert_eq!(
            kinds.iter().filter(|k| **k == ValidationErrorKind::UnknownSubject).count(),
            2
        );
        assert!(kinds.contains(&ValidationErrorKind::UnknownTeacher));
    }

    #[test]
    fn test_collects_all_errors() {
        let subjects = vec![Subject::new("A"), Subject::new("A").with_practical(1)];
        let result = validate_input(&subjects, &[], &[], &[]);
        assert!(result.unwrap_err().len() >= 3);
    }

    #[test]
    fn test_validate_built_model() {
        let problem = ProblemModel::builder()
            .add_lab(Lab::new("L1"))
            .add_subject(Subject::new("DS").with_theory(2).with_practical(1).with_lab("L1"))
            .add_teacher(Teacher::new("T1").with_subject("DS"))
            .build()
            .unwrap();
        assert!(validate_model(&problem).is_ok());
    }

    #[test]
    fn test_validate_tampered_model() {
        let mut problem = ProblemModel::builder()
            .add_lab(Lab::new("L1"))
            .add_subject(Subject::new("DS").with_theory(2).with_practical(1).with_lab("L1"))
            .add_teacher(Teacher::new("T1").with_subject("DS"))
            .build()
            .unwrap();
        problem.subject_teacher = vec![TeacherId(4)];
        problem.preferred_labs = vec![vec![LabId(0), LabId(0), LabId(7)]];

        let kinds = kinds(validate_model(&problem));
        assert!(kinds.contains(&ValidationErrorKind::UnknownTeacher));
        assert!(kinds.contains(&ValidationErrorKind::UnknownLab));
        assert!(kinds.contains(&ValidationErrorKind::DuplicateId));
        assert_eq!(problem.teacher_of(SubjectId(0)), Some(TeacherId(4)));
    }

    #[test]
    fn test_error_display() {
        let e = ValidationError::new(ValidationErrorKind::UnknownLab, "Subject 'DS' prefers unknown lab 'L9'");
        assert_eq!(e.to_string(), "UnknownLab: Subject 'DS' prefers unknown lab 'L9'");
    }
}
