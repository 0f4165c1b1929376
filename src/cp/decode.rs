//! Decoding a solver assignment into a timetable.

use crate::engine::Solution;
use crate::error::DecodeError;
use crate::models::{
    Activity, Batch, BatchLab, Day, Division, ProblemModel, Slot, SubjectId, Timetable,
};

use super::variables::{UnitKey, VariableIndex};

/// One candidate activity found in a cell before validation.
enum Found {
    Theory(SubjectId),
    Practical(SubjectId, Vec<BatchLab>),
}

impl Found {
    fn subject(&self) -> SubjectId {
        match self {
            Found::Theory(s) | Found::Practical(s, _) => *s,
        }
    }
}

/// Turns a satisfying assignment into a [`Timetable`].
///
/// Pure: decoding the same solution twice yields equal timetables.
pub struct SolutionExtractor<'a> {
    problem: &'a ProblemModel,
    index: &'a VariableIndex,
}

impl<'a> SolutionExtractor<'a> {
    pub fn new(problem: &'a ProblemModel, index: &'a VariableIndex) -> Self {
        Self { problem, index }
    }

    /// Decodes `solution`.
    ///
    /// # Errors
    /// - [`DecodeError::NoSolution`] if the status carries no assignment
    /// - [`DecodeError::MissingValue`] if the assignment is shorter than the index
    /// - [`DecodeError::MultipleActivities`], [`DecodeError::IncompleteBatches`],
    ///   [`DecodeError::BatchInMultipleLabs`] if the assignment breaks the
    ///   encoding in a cell
    pub fn extract(&self, solution: &Solution) -> Result<Timetable, DecodeError> {
        if !solution.is_solution_found() {
            return Err(DecodeError::NoSolution(solution.status));
        }

        let mut timetable = Timetable::empty();
        for day in Day::ALL {
            for slot in Slot::all() {
                for division in Division::ALL {
                    if let Some(activity) = self.decode_cell(solution, day, slot, division)? {
                        timetable.place(day, slot, division, activity);
                    }
                }
            }
        }
        Ok(timetable)
    }

    fn value(&self, solution: &Solution, key: UnitKey) -> Result<Option<bool>, DecodeError> {
        match self.index.get(&key) {
            None => Ok(None),
            Some(var) => solution
                .value(var)
                .map(Some)
                .ok_or_else(|| DecodeError::MissingValue {
                    variable: key.name(self.problem),
                }),
        }
    }

    fn decode_cell(
        &self,
        solution: &Solution,
        day: Day,
        slot: Slot,
        division: Division,
    ) -> Result<Option<Activity>, DecodeError> {
        let mut found = Vec::new();

        for subject in self.problem.subject_ids() {
            let theory = UnitKey::Theory {
                day,
                slot,
                division,
                subject,
            };
            if self.value(solution, theory)? == Some(true) {
                found.push(Found::Theory(subject));
            }

            let labs = self.problem.preferred_labs(subject);
            if labs.is_empty() {
                continue;
            }
            let mut placements = Vec::new();
            let mut missing = Vec::new();
            for batch in Batch::ALL {
                let mut seated = None;
                for &lab in labs {
                    let key = UnitKey::Practical {
                        day,
                        slot,
                        division,
                        subject,
                        batch,
                        lab,
                    };
                    if self.value(solution, key)? != Some(true) {
                        continue;
                    }
                    if seated.is_some() {
                        return Err(DecodeError::BatchInMultipleLabs {
                            day,
                            slot,
                            division,
                            subject: self.subject_name(subject),
                            batch,
                        });
                    }
                    seated = Some(lab);
                }
                match seated.and_then(|lab| self.problem.lab(lab)) {
                    Some(lab) => placements.push(BatchLab {
                        batch,
                        lab: lab.name.clone(),
                    }),
                    None => missing.push(batch),
                }
            }

            if placements.is_empty() {
                continue;
            }
            if !missing.is_empty() {
                return Err(DecodeError::IncompleteBatches {
                    day,
                    slot,
                    division,
                    subject: self.subject_name(subject),
                    missing,
                });
            }
            found.push(Found::Practical(subject, placements));
        }

        if found.len() > 1 {
            return Err(DecodeError::MultipleActivities {
                day,
                slot,
                division,
                subjects: found.iter().map(|f| self.subject_name(f.subject())).collect(),
            });
        }

        found.pop().map(|f| self.to_activity(f)).transpose()
    }

    fn to_activity(&self, found: Found) -> Result<Activity, DecodeError> {
        let subject = found.subject();
        let name = self.subject_name(subject);
        let teacher = self
            .problem
            .teacher_of(subject)
            .and_then(|t| self.problem.teacher(t))
            .ok_or_else(|| DecodeError::UnassignedSubject {
                subject: name.clone(),
            })?;

        Ok(match found {
            Found::Theory(_) => Activity::theory(name, teacher),
            Found::Practical(_, placements) => Activity::practical(name, teacher, placements),
        })
    }

    fn subject_name(&self, subject: SubjectId) -> String {
        self.problem
            .subject(subject)
            .map_or_else(|| format!("#{}", subject.0), |s| s.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::VariableFactory;
    use crate::engine::{ConstraintModel, SolverStatus};
    use crate::models::{Lab, SessionType, Subject, Teacher};

    struct Fixture {
        problem: ProblemModel,
        index: VariableIndex,
        var_count: usize,
    }

    fn fixture() -> Fixture {
        let problem = ProblemModel::builder()
            .add_lab(Lab::new("L1"))
            .add_lab(Lab::new("L2"))
            .add_lab(Lab::new("L3"))
            .add_subject(
                Subject::new("DS")
                    .with_theory(2)
                    .with_practical(1)
                    .with_labs(["L1", "L2", "L3"]),
            )
            .add_subject(Subject::new("Maths").with_theory(3))
            .add_teacher(Teacher::new("T1").with_name("Asha").with_subject("DS"))
            .add_teacher(Teacher::new("T2").with_name("Ravi").with_subject("Maths"))
            .build()
            .unwrap();
        let mut model = ConstraintModel::new("test");
        let index = VariableFactory::new(&problem).create(&mut model).unwrap();
        Fixture {
            problem,
            index,
            var_count: model.var_count(),
        }
    }

    fn solution(f: &Fixture, true_keys: &[UnitKey]) -> Solution {
        let mut s = Solution::empty(SolverStatus::Feasible);
        s.values = vec![false; f.var_count];
        for key in true_keys {
            s.values[f.index.get(key).unwrap().index()] = true;
        }
        s
    }

    fn s(i: usize) -> Slot {
        Slot::new(i).unwrap()
    }

    fn practical_keys(f: &Fixture, day: Day, slot: Slot, division: Division) -> Vec<UnitKey> {
        let ds = f.problem.find_subject("DS").unwrap();
        Batch::ALL
            .iter()
            .zip(f.problem.lab_ids())
            .map(|(&batch, lab)| UnitKey::Practical {
                day,
                slot,
                division,
                subject: ds,
                batch,
                lab,
            })
            .collect()
    }

    #[test]
    fn test_decode_theory_and_practical() {
        let f = fixture();
        let maths = f.problem.find_subject("Maths").unwrap();
        let mut keys = practical_keys(&f, Day::Monday, s(0), Division::A);
        keys.push(UnitKey::Theory {
            day: Day::Monday,
            slot: s(0),
            division: Division::B,
            subject: maths,
        });

        let tt = SolutionExtractor::new(&f.problem, &f.index)
            .extract(&solution(&f, &keys))
            .unwrap();

        assert_eq!(tt.occupied_count(), 2);
        let a = tt.get(Day::Monday, s(0), Division::A).unwrap();
        assert_eq!(a.session_type, SessionType::Practical);
        assert_eq!(a.teacher_id, "T1");
        assert_eq!(a.batch_label().as_deref(), Some("P→L1, Q→L2, R→L3"));

        let b = tt.get(Day::Monday, s(0), Division::B).unwrap();
        assert_eq!(b.subject, "Maths");
        assert_eq!(b.teacher_display(), "Ravi (T2)");
        assert_eq!(b.lab_label(), None);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let f = fixture();
        let sol = solution(&f, &practical_keys(&f, Day::Friday, s(4), Division::B));
        let extractor = SolutionExtractor::new(&f.problem, &f.index);
        assert_eq!(extractor.extract(&sol).unwrap(), extractor.extract(&sol).unwrap());
    }

    #[test]
    fn test_multiple_activities() {
        let f = fixture();
        let ds = f.problem.find_subject("DS").unwrap();
        let maths = f.problem.find_subject("Maths").unwrap();
        let keys = [ds, maths].map(|subject| UnitKey::Theory {
            day: Day::Tuesday,
            slot: s(1),
            division: Division::A,
            subject,
        });

        let err = SolutionExtractor::new(&f.problem, &f.index)
            .extract(&solution(&f, &keys))
            .unwrap_err();
        match err {
            DecodeError::MultipleActivities { day, subjects, .. } => {
                assert_eq!(day, Day::Tuesday);
                assert_eq!(subjects, vec!["DS", "Maths"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_incomplete_batches() {
        let f = fixture();
        let mut keys = practical_keys(&f, Day::Monday, s(2), Division::A);
        keys.pop();

        let err = SolutionExtractor::new(&f.problem, &f.index)
            .extract(&solution(&f, &keys))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::IncompleteBatches { ref missing, .. } if missing == &vec![Batch::R]
        ));
    }

    #[test]
    fn test_batch_in_multiple_labs() {
        let f = fixture();
        let ds = f.problem.find_subject("DS").unwrap();
        let mut keys = practical_keys(&f, Day::Monday, s(2), Division::A);
        keys.push(UnitKey::Practical {
            day: Day::Monday,
            slot: s(2),
            division: Division::A,
            subject: ds,
            batch: Batch::P,
            lab: f.problem.find_lab("L3").unwrap(),
        });

        let err = SolutionExtractor::new(&f.problem, &f.index)
            .extract(&solution(&f, &keys))
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BatchInMultipleLabs { batch: Batch::P, .. }
        ));
    }

    #[test]
    fn test_no_solution_and_missing_value() {
        let f = fixture();
        let extractor = SolutionExtractor::new(&f.problem, &f.index);

        let infeasible = Solution::empty(SolverStatus::Infeasible);
        assert_eq!(
            extractor.extract(&infeasible),
            Err(DecodeError::NoSolution(SolverStatus::Infeasible))
        );

        let mut short = Solution::empty(SolverStatus::Feasible);
        short.values = vec![false; 3];
        assert!(matches!(
            extractor.extract(&short),
            Err(DecodeError::MissingValue { .. })
        ));
    }
}
