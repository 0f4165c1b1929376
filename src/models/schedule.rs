//! Timetable (solution) model.
//!
//! A timetable maps every (day, slot, division) cell to at most one
//! activity. It is produced by decoding a solver assignment and is not
//! mutated afterwards; audits report problems as [`Violation`]s instead
//! of changing it.

use serde::{Deserialize, Serialize};

use super::calendar::SLOTS_PER_DAY;
use super::{Activity, Day, Division, Slot};

const DIVISIONS: usize = 2;
const CELLS: usize = 5 * SLOTS_PER_DAY * DIVISIONS;

/// A weekly timetable for both divisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Cells in (day, slot, division) order.
    cells: Vec<Option<Activity>>,
}

/// A constraint violation found in a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity (subject, teacher, lab, or cell).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// A subject got fewer theory slots or practical sessions than required.
    LoadShortfall,
    /// A division runs a practical while the other is not in theory.
    MutualExclusion,
    /// A lab hosts more than one batch in a slot.
    LabCapacity,
    /// A teacher is in two places in a slot.
    TeacherConflict,
    /// A teacher works two adjacent slots.
    TeacherRest,
    /// A practical does not place every batch exactly once.
    BatchAtomicity,
    /// Activity data does not match the problem (unknown subject, wrong teacher).
    Inconsistent,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn load_shortfall(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::LoadShortfall, subject, message, 80)
    }

    pub fn mutual_exclusion(cell: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::MutualExclusion, cell, message, 90)
    }

    pub fn lab_capacity(lab: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::LabCapacity, lab, message, 95)
    }

    pub fn teacher_conflict(teacher: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::TeacherConflict, teacher, message, 95)
    }

    pub fn teacher_rest(teacher: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::TeacherRest, teacher, message, 60)
    }

    pub fn batch_atomicity(cell: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::BatchAtomicity, cell, message, 90)
    }

    pub fn inconsistent(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::Inconsistent, entity, message, 100)
    }
}

#[inline]
fn cell_index(day: Day, slot: Slot, division: Division) -> usize {
    (day.index() * SLOTS_PER_DAY + slot.index()) * DIVISIONS + division.index()
}

/// Human-readable cell reference, e.g. `"Monday 10:30-11:30 TY_A"`.
pub fn cell_label(day: Day, slot: Slot, division: Division) -> String {
    format!("{} {} {}", day, slot, division)
}

impl Timetable {
    /// Creates a timetable with every cell free.
    pub fn empty() -> Self {
        Self {
            cells: vec![None; CELLS],
        }
    }

    /// Places `activity` in a cell, returning what was there.
    pub(crate) fn place(
        &mut self,
        day: Day,
        slot: Slot,
        division: Division,
        activity: Activity,
    ) -> Option<Activity> {
        self.cells[cell_index(day, slot, division)].replace(activity)
    }

    /// Activity in a cell, if any.
    pub fn get(&self, day: Day, slot: Slot, division: Division) -> Option<&Activity> {
        self.cells
            .get(cell_index(day, slot, division))
            .and_then(Option::as_ref)
    }

    /// Occupied cells in (day, slot, division) order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, Slot, Division, &Activity)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            Slot::all().flat_map(move |slot| {
                Division::ALL.into_iter().filter_map(move |division| {
                    self.get(day, slot, division)
                        .map(|a| (day, slot, division, a))
                })
            })
        })
    }

    /// Occupied cells of one division.
    pub fn activities_for(
        &self,
        division: Division,
    ) -> impl Iterator<Item = (Day, Slot, &Activity)> + '_ {
        self.iter()
            .filter(move |(_, _, d, _)| *d == division)
            .map(|(day, slot, _, a)| (day, slot, a))
    }

    /// Occupied cells of one teacher (by id) across both divisions.
    pub fn activities_of_teacher<'a>(
        &'a self,
        teacher_id: &'a str,
    ) -> impl Iterator<Item = (Day, Slot, Division, &'a Activity)> + 'a {
        self.iter().filter(move |(_, _, _, a)| a.teacher_id == teacher_id)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Free slots of one division.
    pub fn free_slots(&self, division: Division) -> usize {
        Day::ALL.len() * SLOTS_PER_DAY - self.activities_for(division).count()
    }
}

impl Default for Timetable {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Batch, BatchLab, Teacher};

    fn slot(i: usize) -> Slot {
        Slot::new(i).unwrap()
    }

    fn sample_timetable() -> Timetable {
        let t1 = Teacher::new("T1").with_name("Asha");
        let t2 = Teacher::new("T2").with_name("Ravi");
        let mut tt = Timetable::empty();
        tt.place(Day::Monday, slot(0), Division::A, Activity::theory("DS", &t1));
        tt.place(
            Day::Monday,
            slot(0),
            Division::B,
            Activity::practical(
                "OS",
                &t2,
                Batch::ALL
                    .iter()
                    .zip(["L1", "L2", "L3"])
                    .map(|(&batch, lab)| BatchLab {
                        batch,
                        lab: lab.into(),
                    })
                    .collect(),
            ),
        );
        tt.place(Day::Friday, slot(6), Division::B, Activity::theory("DS", &t1));
        tt
    }

    #[test]
    fn test_empty_timetable() {
        let tt = Timetable::empty();
        assert_eq!(tt.occupied_count(), 0);
        assert_eq!(tt.free_slots(Division::A), 35);
        assert!(tt.get(Day::Monday, slot(0), Division::A).is_none());
    }

    #[test]
    fn test_get_and_iter_order() {
        let tt = sample_timetable();
        assert_eq!(tt.occupied_count(), 3);
        assert_eq!(
            tt.get(Day::Monday, slot(0), Division::B).map(|a| a.subject.as_str()),
            Some("OS")
        );

        let order: Vec<(Day, usize, Division)> = tt
            .iter()
            .map(|(d, s, div, _)| (d, s.index(), div))
            .collect();
        assert_eq!(
            order,
            vec![
                (Day::Monday, 0, Division::A),
                (Day::Monday, 0, Division::B),
                (Day::Friday, 6, Division::B),
            ]
        );
    }

    #[test]
    fn test_per_division_and_teacher_queries() {
        let tt = sample_timetable();
        assert_eq!(tt.activities_for(Division::B).count(), 2);
        assert_eq!(tt.free_slots(Division::A), 34);
        assert_eq!(tt.activities_of_teacher("T1").count(), 2);
        assert_eq!(tt.activities_of_teacher("T9").count(), 0);
    }

    #[test]
    fn test_place_returns_previous() {
        let t1 = Teacher::new("T1");
        let mut tt = Timetable::empty();
        assert!(tt
            .place(Day::Tuesday, slot(3), Division::A, Activity::theory("DS", &t1))
            .is_none());
        let prev = tt.place(Day::Tuesday, slot(3), Division::A, Activity::theory("OS", &t1));
        assert_eq!(prev.map(|a| a.subject), Some("DS".to_string()));
    }

    #[test]
    fn test_cell_label() {
        assert_eq!(
            cell_label(Day::Monday, slot(0), Division::A),
            "Monday 10:30-11:30 TY_A"
        );
    }

    #[test]
    fn test_violation_factories() {
        let v1 = Violation::teacher_rest("T1", "Adjacent slots");
        assert_eq!(v1.violation_type, ViolationType::TeacherRest);
        assert_eq!(v1.entity_id, "T1");

        let v2 = Violation::lab_capacity("L1", "Two batches");
        assert_eq!(v2.violation_type, ViolationType::LabCapacity);
        assert!(v2.severity > v1.severity);
    }
}
