//! Decision variables of the timetable encoding.
//!
//! One boolean per schedulable unit:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `Theory` | division takes a lecture of subject in (day, slot) |
//! | `Practical` | batch of division sits in lab for subject in (day, slot) |
//! | `TeacherBusy` | teacher has any unit in (day, slot) |
//!
//! The index is built once by [`VariableFactory`] and only read
//! afterwards.

use std::collections::HashMap;

use log::debug;

use crate::engine::{BoolVar, ConstraintModel};
use crate::models::{Batch, Day, Division, LabId, ProblemModel, Slot, SubjectId, TeacherId};
use crate::validation::{validate_model, ValidationError, ValidationErrorKind};

/// Composite key of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKey {
    Theory {
        day: Day,
        slot: Slot,
        division: Division,
        subject: SubjectId,
    },
    Practical {
        day: Day,
        slot: Slot,
        division: Division,
        subject: SubjectId,
        batch: Batch,
        lab: LabId,
    },
    TeacherBusy {
        day: Day,
        slot: Slot,
        teacher: TeacherId,
    },
}

impl UnitKey {
    /// Readable variable name, e.g. `pr_Monday_0_TY_A_DS_P_L1`.
    pub fn name(&self, problem: &ProblemModel) -> String {
        let subject = |s: &SubjectId| problem.subject(*s).map_or("?", |s| s.name.as_str());
        match self {
            UnitKey::Theory {
                day,
                slot,
                division,
                subject: s,
            } => format!("th_{}_{}_{}_{}", day, slot.index(), division, subject(s)),
            UnitKey::Practical {
                day,
                slot,
                division,
                subject: s,
                batch,
                lab,
            } => format!(
                "pr_{}_{}_{}_{}_{}_{}",
                day,
                slot.index(),
                division,
                subject(s),
                batch,
                problem.lab(*lab).map_or("?", |l| l.name.as_str())
            ),
            UnitKey::TeacherBusy { day, slot, teacher } => format!(
                "busy_{}_{}_{}",
                day,
                slot.index(),
                problem.teacher(*teacher).map_or("?", |t| t.id.as_str())
            ),
        }
    }
}

/// Flat map from unit key to engine variable.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    vars: HashMap<UnitKey, BoolVar>,
    keys: Vec<UnitKey>,
}

impl VariableIndex {
    fn insert(&mut self, key: UnitKey, var: BoolVar) -> Result<(), UnitKey> {
        if self.vars.contains_key(&key) {
            return Err(key);
        }
        self.vars.insert(key, var);
        self.keys.push(key);
        Ok(())
    }

    pub fn get(&self, key: &UnitKey) -> Option<BoolVar> {
        self.vars.get(key).copied()
    }

    pub fn theory(
        &self,
        day: Day,
        slot: Slot,
        division: Division,
        subject: SubjectId,
    ) -> Option<BoolVar> {
        self.get(&UnitKey::Theory {
            day,
            slot,
            division,
            subject,
        })
    }

    pub fn practical(
        &self,
        day: Day,
        slot: Slot,
        division: Division,
        subject: SubjectId,
        batch: Batch,
        lab: LabId,
    ) -> Option<BoolVar> {
        self.get(&UnitKey::Practical {
            day,
            slot,
            division,
            subject,
            batch,
            lab,
        })
    }

    pub fn busy(&self, day: Day, slot: Slot, teacher: TeacherId) -> Option<BoolVar> {
        self.get(&UnitKey::TeacherBusy { day, slot, teacher })
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys with their variables, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (&UnitKey, BoolVar)> + '_ {
        self.keys.iter().map(move |k| (k, self.vars[k]))
    }

    /// Counts of (theory, practical, busy) variables.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.keys.iter().fold((0, 0, 0), |(t, p, b), k| match k {
            UnitKey::Theory { .. } => (t + 1, p, b),
            UnitKey::Practical { .. } => (t, p + 1, b),
            UnitKey::TeacherBusy { .. } => (t, p, b + 1),
        })
    }
}

/// Creates every decision variable of a problem.
pub struct VariableFactory<'a> {
    problem: &'a ProblemModel,
}

impl<'a> VariableFactory<'a> {
    pub fn new(problem: &'a ProblemModel) -> Self {
        Self { problem }
    }

    /// Enumerates all units and creates one engine variable per unit.
    ///
    /// Subjects without theory get no theory variables; subjects without
    /// practicals get no practical variables. Practical variables exist
    /// only for the subject's preferred labs. Busy indicators are created
    /// for every (day, slot, teacher).
    ///
    /// # Errors
    /// Configuration errors from [`validate_model`], or a duplicate key.
    pub fn create(&self, model: &mut ConstraintModel) -> Result<VariableIndex, Vec<ValidationError>> {
        validate_model(self.problem)?;

        let mut index = VariableIndex::default();
        let mut errors = Vec::new();
        let mut add = |key: UnitKey, model: &mut ConstraintModel| {
            let var = model.new_bool_var(key.name(self.problem));
            if let Err(dup) = index.insert(key, var) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate variable {}", dup.name(self.problem)),
                ));
            }
        };

        for day in Day::ALL {
            for slot in Slot::all() {
                for division in Division::ALL {
                    for subject_id in self.problem.subject_ids() {
                        let subject = &self.problem.subjects[subject_id.0];
                        if subject.has_theory() {
                            add(
                                UnitKey::Theory {
                                    day,
                                    slot,
                                    division,
                                    subject: subject_id,
                                },
                                model,
                            );
                        }
                        if subject.has_practical() {
                            for batch in Batch::ALL {
                                for &lab in self.problem.preferred_labs(subject_id) {
                                    add(
                                        UnitKey::Practical {
                                            day,
                                            slot,
                                            division,
                                            subject: subject_id,
                                            batch,
                                            lab,
                                        },
                                        model,
                                    );
                                }
                            }
                        }
                    }
                }
                for teacher in self.problem.teacher_ids() {
                    add(UnitKey::TeacherBusy { day, slot, teacher }, model);
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let (theory, practical, busy) = index.counts();
        debug!(
            "created {} variables ({} theory, {} practical, {} teacher-busy)",
            index.len(),
            theory,
            practical,
            busy
        );
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lab, Subject, Teacher};

    fn sample_problem() -> ProblemModel {
        ProblemModel::builder()
            .add_lab(Lab::new("L1"))
            .add_lab(Lab::new("L2"))
            .add_subject(
                Subject::new("DS")
                    .with_theory(2)
                    .with_practical(1)
                    .with_labs(["L1", "L2"]),
            )
            .add_subject(Subject::new("Maths").with_theory(3))
            .add_subject(Subject::new("Lab Only").with_practical(1).with_lab("L2"))
            .add_teacher(Teacher::new("T1").with_subject("DS").with_subject("Lab Only"))
            .add_teacher(Teacher::new("T2").with_subject("Maths"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_variable_counts() {
        let problem = sample_problem();
        let mut model = ConstraintModel::new("test");
        let index = VariableFactory::new(&problem).create(&mut model).unwrap();

        let cells = 5 * 7 * 2;
        let (theory, practical, busy) = index.counts();
        // DS and Maths have theory
        assert_eq!(theory, cells * 2);
        // DS: 3 batches x 2 labs, Lab Only: 3 batches x 1 lab
        assert_eq!(practical, cells * (6 + 3));
        assert_eq!(busy, 5 * 7 * 2);
        assert_eq!(index.len(), model.var_count());
    }

    #[test]
    fn test_zero_requirement_kinds_skipped() {
        let problem = sample_problem();
        let mut model = ConstraintModel::new("test");
        let index = VariableFactory::new(&problem).create(&mut model).unwrap();

        let s0 = Slot::new(0).unwrap();
        let maths = problem.find_subject("Maths").unwrap();
        let lab_only = problem.find_subject("Lab Only").unwrap();
        let l1 = problem.find_lab("L1").unwrap();
        let l2 = problem.find_lab("L2").unwrap();

        assert!(index.theory(Day::Monday, s0, Division::A, maths).is_some());
        assert!(index.theory(Day::Monday, s0, Division::A, lab_only).is_none());
        assert!(index
            .practical(Day::Monday, s0, Division::A, maths, Batch::P, l1)
            .is_none());
        assert!(index
            .practical(Day::Monday, s0, Division::B, lab_only, Batch::R, l2)
            .is_some());
        // only preferred labs
        assert!(index
            .practical(Day::Monday, s0, Division::B, lab_only, Batch::R, l1)
            .is_none());
    }

    #[test]
    fn test_keys_unique_and_named() {
        let problem = sample_problem();
        let mut model = ConstraintModel::new("test");
        let index = VariableFactory::new(&problem).create(&mut model).unwrap();

        let vars: std::collections::HashSet<BoolVar> = index.iter().map(|(_, v)| v).collect();
        assert_eq!(vars.len(), index.len());

        let ds = problem.find_subject("DS").unwrap();
        let l1 = problem.find_lab("L1").unwrap();
        let var = index
            .practical(Day::Friday, Slot::new(6).unwrap(), Division::A, ds, Batch::P, l1)
            .unwrap();
        assert_eq!(model.var_name(var), Some("pr_Friday_6_TY_A_DS_P_L1"));
    }

    #[test]
    fn test_invalid_model_rejected() {
        let json = r#"{
            "subjects": [{"name": "DS", "theory_per_week": 0, "practical_per_week": 1, "preferred_labs": []}],
            "teachers": [],
            "labs": [],
            "subject_teacher": [],
            "preferred_labs": [[]]
        }"#;
        let problem: ProblemModel = serde_json::from_str(json).unwrap();
        let mut model = ConstraintModel::new("test");
        let errors = VariableFactory::new(&problem).create(&mut model).unwrap_err();

        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::MissingPreferredLabs));
        assert!(kinds.contains(&ValidationErrorKind::UnassignedSubject));
        assert_eq!(model.var_count(), 0);
    }
}
