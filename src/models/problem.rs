//! Problem model: the validated input of one timetabling run.
//!
//! Entities are referred to by dense index handles ([`SubjectId`],
//! [`TeacherId`], [`LabId`]) after construction. Names only matter at the
//! edges: the builder resolves them once and the export renders them
//! back.
//!
//! # Teacher assignment
//!
//! Every subject has exactly one teacher. An explicit
//! [`ProblemModelBuilder::assign`] wins; otherwise the single teacher
//! listing the subject is used. A subject claimed by several teachers
//! without an explicit assignment is rejected, as is one nobody claims.
//! After building, each teacher's `subjects` lists exactly the subjects
//! assigned to them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Lab, Subject, Teacher};
use crate::validation::{validate_input, ValidationError, ValidationErrorKind};

/// Index of a subject within a [`ProblemModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub usize);

/// Index of a teacher within a [`ProblemModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeacherId(pub usize);

/// Index of a lab within a [`ProblemModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabId(pub usize);

/// Subjects, teachers, labs and the subject→teacher map.
///
/// Divisions, batches, days and slots are fixed by the calendar and
/// cohort modules and are not part of the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemModel {
    pub(crate) subjects: Vec<Subject>,
    pub(crate) teachers: Vec<Teacher>,
    pub(crate) labs: Vec<Lab>,
    /// Teacher of each subject, indexed by subject.
    pub(crate) subject_teacher: Vec<TeacherId>,
    /// Resolved preferred labs of each subject, indexed by subject.
    pub(crate) preferred_labs: Vec<Vec<LabId>>,
}

impl ProblemModel {
    /// Starts building a problem.
    pub fn builder() -> ProblemModelBuilder {
        ProblemModelBuilder::default()
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn labs(&self) -> &[Lab] {
        &self.labs
    }

    /// All subject handles in input order.
    pub fn subject_ids(&self) -> impl Iterator<Item = SubjectId> + '_ {
        (0..self.subjects.len()).map(SubjectId)
    }

    /// All teacher handles in input order.
    pub fn teacher_ids(&self) -> impl Iterator<Item = TeacherId> + '_ {
        (0..self.teachers.len()).map(TeacherId)
    }

    /// All lab handles in input order.
    pub fn lab_ids(&self) -> impl Iterator<Item = LabId> + '_ {
        (0..self.labs.len()).map(LabId)
    }

    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.get(id.0)
    }

    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.get(id.0)
    }

    pub fn lab(&self, id: LabId) -> Option<&Lab> {
        self.labs.get(id.0)
    }

    /// Teacher assigned to `subject`.
    pub fn teacher_of(&self, subject: SubjectId) -> Option<TeacherId> {
        self.subject_teacher.get(subject.0).copied()
    }

    /// Subjects assigned to `teacher`, in subject order.
    pub fn subjects_of(&self, teacher: TeacherId) -> Vec<SubjectId> {
        self.subject_ids()
            .filter(|&s| self.teacher_of(s) == Some(teacher))
            .collect()
    }

    /// Preferred labs of `subject` (empty for theory-only subjects).
    pub fn preferred_labs(&self, subject: SubjectId) -> &[LabId] {
        self.preferred_labs
            .get(subject.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up a subject by name.
    pub fn find_subject(&self, name: &str) -> Option<SubjectId> {
        self.subjects.iter().position(|s| s.name == name).map(SubjectId)
    }

    /// Looks up a teacher by id.
    pub fn find_teacher(&self, id: &str) -> Option<TeacherId> {
        self.teachers.iter().position(|t| t.id == id).map(TeacherId)
    }

    /// Looks up a lab by name.
    pub fn find_lab(&self, name: &str) -> Option<LabId> {
        self.labs.iter().position(|l| l.name == name).map(LabId)
    }

    /// Subjects with a practical requirement.
    pub fn practical_subjects(&self) -> Vec<SubjectId> {
        self.subject_ids()
            .filter(|&s| self.subjects[s.0].has_practical())
            .collect()
    }

    /// Subjects with a theory requirement.
    pub fn theory_subjects(&self) -> Vec<SubjectId> {
        self.subject_ids()
            .filter(|&s| self.subjects[s.0].has_theory())
            .collect()
    }

    /// Slots one division needs per week across all subjects.
    pub fn weekly_demand_per_division(&self) -> u32 {
        self.subjects.iter().map(Subject::weekly_slots).sum()
    }
}

/// Builder for [`ProblemModel`].
///
/// # Examples
///
/// ```
/// use u_timetable::models::{Lab, ProblemModel, Subject, Teacher};
///
/// let problem = ProblemModel::builder()
///     .add_lab(Lab::new("L1"))
///     .add_subject(Subject::new("DS").with_theory(3))
///     .add_teacher(Teacher::new("T1").with_name("Asha").with_subject("DS"))
///     .build()
///     .unwrap();
///
/// let ds = problem.find_subject("DS").unwrap();
/// assert_eq!(problem.teacher_of(ds), problem.find_teacher("T1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProblemModelBuilder {
    subjects: Vec<Subject>,
    teachers: Vec<Teacher>,
    labs: Vec<Lab>,
    assignments: Vec<(String, String)>,
}

impl ProblemModelBuilder {
    pub fn add_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    pub fn add_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    pub fn add_lab(mut self, lab: Lab) -> Self {
        self.labs.push(lab);
        self
    }

    /// Assigns `subject` to the teacher with id `teacher_id`, overriding
    /// whatever the teachers' subject lists say.
    pub fn assign(mut self, subject: impl Into<String>, teacher_id: impl Into<String>) -> Self {
        self.assignments.push((subject.into(), teacher_id.into()));
        self
    }

    /// Validates the input and resolves names into handles.
    ///
    /// # Returns
    /// The model, or every validation error found.
    pub fn build(self) -> Result<ProblemModel, Vec<ValidationError>> {
        validate_input(&self.subjects, &self.teachers, &self.labs, &self.assignments)?;

        let teacher_index: HashMap<&str, usize> = self
            .teachers
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();
        let lab_index: HashMap<&str, usize> = self
            .labs
            .iter()
            .enumerate()
            .map(|(i, l)| (l.name.as_str(), i))
            .collect();

        let mut errors = Vec::new();
        let mut subject_teacher = Vec::with_capacity(self.subjects.len());

        for subject in &self.subjects {
            let explicit: Vec<usize> = dedup(
                self.assignments
                    .iter()
                    .filter(|(s, _)| *s == subject.name)
                    .filter_map(|(_, t)| teacher_index.get(t.as_str()).copied()),
            );
            let candidates = if explicit.is_empty() {
                dedup(
                    self.teachers
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| t.teaches(&subject.name))
                        .map(|(i, _)| i),
                )
            } else {
                explicit
            };

            match candidates.as_slice() {
                [only] => subject_teacher.push(TeacherId(*only)),
                [] => errors.push(ValidationError::new(
                    ValidationErrorKind::UnassignedSubject,
                    format!("Subject '{}' has no teacher", subject.name),
                )),
                many => {
                    let ids: Vec<&str> = many
                        .iter()
                        .map(|&i| self.teachers[i].id.as_str())
                        .collect();
                    errors.push(ValidationError::new(
                        ValidationErrorKind::AmbiguousTeacher,
                        format!(
                            "Subject '{}' is claimed by several teachers: {}",
                            subject.name,
                            ids.join(", ")
                        ),
                    ));
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let preferred_labs = self
            .subjects
            .iter()
            .map(|s| {
                s.preferred_labs
                    .iter()
                    .filter_map(|l| lab_index.get(l.as_str()).copied().map(LabId))
                    .collect()
            })
            .collect();

        let mut teachers = self.teachers;
        for teacher in &mut teachers {
            teacher.subjects.clear();
        }
        for (subject, teacher) in self.subjects.iter().zip(&subject_teacher) {
            teachers[teacher.0].subjects.push(subject.name.clone());
        }

        Ok(ProblemModel {
            subjects: self.subjects,
            teachers,
            labs: self.labs,
            subject_teacher,
            preferred_labs,
        })
    }
}

fn dedup(iter: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::new();
    for i in iter {
        if !out.contains(&i) {
            out.push(i);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labs() -> ProblemModelBuilder {
        ProblemModel::builder()
            .add_lab(Lab::new("L1"))
            .add_lab(Lab::new("L2"))
            .add_lab(Lab::new("L3"))
    }

    #[test]
    fn test_build_resolves_handles() {
        let problem = labs()
            .add_subject(
                Subject::new("DS")
                    .with_theory(2)
                    .with_practical(1)
                    .with_labs(["L3", "L1"]),
            )
            .add_subject(Subject::new("Maths").with_theory(3))
            .add_teacher(Teacher::new("T1").with_name("Asha").with_subject("DS"))
            .add_teacher(Teacher::new("T2").with_name("Ravi").with_subject("Maths"))
            .build()
            .unwrap();

        let ds = problem.find_subject("DS").unwrap();
        let maths = problem.find_subject("Maths").unwrap();
        assert_eq!(problem.teacher_of(ds), Some(TeacherId(0)));
        assert_eq!(problem.teacher_of(maths), Some(TeacherId(1)));
        assert_eq!(problem.preferred_labs(ds), &[LabId(2), LabId(0)]);
        assert!(problem.preferred_labs(maths).is_empty());
        assert_eq!(problem.practical_subjects(), vec![ds]);
        assert_eq!(problem.theory_subjects(), vec![ds, maths]);
        assert_eq!(problem.weekly_demand_per_division(), 6);
        assert_eq!(problem.subjects_of(TeacherId(0)), vec![ds]);
    }

    #[test]
    fn test_explicit_assignment_wins() {
        let problem = labs()
            .add_subject(Subject::new("DS").with_theory(2))
            .add_teacher(Teacher::new("T1").with_subject("DS"))
            .add_teacher(Teacher::new("T2").with_subject("DS"))
            .assign("DS", "T2")
            .build()
            .unwrap();

        let ds = problem.find_subject("DS").unwrap();
        assert_eq!(problem.teacher_of(ds), problem.find_teacher("T2"));
        // subject lists are normalised to the resolved map
        assert!(problem.teachers()[0].subjects.is_empty());
        assert_eq!(problem.teachers()[1].subjects, vec!["DS"]);
    }

    #[test]
    fn test_assignment_to_unlisting_teacher() {
        let problem = labs()
            .add_subject(Subject::new("DS").with_theory(2))
            .add_teacher(Teacher::new("T1"))
            .assign("DS", "T1")
            .build()
            .unwrap();

        assert_eq!(problem.teachers()[0].subjects, vec!["DS"]);
    }

    #[test]
    fn test_ambiguous_teacher() {
        let errors = labs()
            .add_subject(Subject::new("DS").with_theory(2))
            .add_teacher(Teacher::new("T1").with_subject("DS"))
            .add_teacher(Teacher::new("T2").with_subject("DS"))
            .build()
            .unwrap_err();

        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::AmbiguousTeacher));
    }

    #[test]
    fn test_unassigned_subject() {
        let errors = labs()
            .add_subject(Subject::new("DS").with_theory(2))
            .add_subject(Subject::new("OS").with_theory(2))
            .add_teacher(Teacher::new("T1").with_subject("DS"))
            .build()
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnassignedSubject);
        assert!(errors[0].message.contains("OS"));
    }

    #[test]
    fn test_problem_serde() {
        let problem = labs()
            .add_subject(Subject::new("DS").with_theory(2).with_practical(1).with_lab("L1"))
            .add_teacher(Teacher::new("T1").with_subject("DS"))
            .build()
            .unwrap();

        let json = serde_json::to_string(&problem).unwrap();
        let back: ProblemModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.subjects(), problem.subjects());
        assert_eq!(back.preferred_labs(SubjectId(0)), &[LabId(0)]);
    }
}
