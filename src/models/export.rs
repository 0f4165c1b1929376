//! Interoperable export shape of a timetable.
//!
//! Serializes to a nested map keyed by day name, then slot label, then
//! division name. Key order follows the week, so the output is stable:
//!
//! ```text
//! { "Monday": { "10:30-11:30": { "TY_A": { "subject": "DS",
//!                                           "type": "Theory",
//!                                           "teacher": "Asha (T1)",
//!                                           "lab": null,
//!                                           "batches": null },
//!                                "TY_B": null }, ... }, ... }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Activity, Day, Division, Slot, Timetable};

/// One exported cell.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExportEntry {
    pub subject: String,
    #[serde(rename = "type")]
    pub session_type: String,
    /// `"Name (ID)"`.
    pub teacher: String,
    /// Comma-joined labs, `null` for theory.
    pub lab: Option<String>,
    /// Comma-joined `"P→L1"` placements, `null` for theory.
    pub batches: Option<String>,
}

impl From<&Activity> for ExportEntry {
    fn from(activity: &Activity) -> Self {
        Self {
            subject: activity.subject.clone(),
            session_type: activity.session_type.name().to_string(),
            teacher: activity.teacher_display(),
            lab: activity.lab_label(),
            batches: activity.batch_label(),
        }
    }
}

/// Ordered export view of a [`Timetable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableExport {
    /// `days[day][slot][division]`.
    days: Vec<Vec<Vec<Option<ExportEntry>>>>,
}

impl TimetableExport {
    /// Exported cell.
    pub fn entry(&self, day: Day, slot: Slot, division: Division) -> Option<&ExportEntry> {
        self.days
            .get(day.index())
            .and_then(|d| d.get(slot.index()))
            .and_then(|s| s.get(division.index()))
            .and_then(Option::as_ref)
    }

    /// Number of occupied cells.
    pub fn entry_count(&self) -> usize {
        self.days.iter().flatten().flatten().flatten().count()
    }
}

impl From<&Timetable> for TimetableExport {
    fn from(timetable: &Timetable) -> Self {
        let days = Day::ALL
            .iter()
            .map(|&day| {
                Slot::all()
                    .map(|slot| {
                        Division::ALL
                            .iter()
                            .map(|&division| {
                                timetable.get(day, slot, division).map(ExportEntry::from)
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();
        Self { days }
    }
}

impl Timetable {
    /// Builds the export view.
    pub fn to_export(&self) -> TimetableExport {
        TimetableExport::from(self)
    }
}

struct DayView<'a>(&'a [Vec<Option<ExportEntry>>]);
struct SlotView<'a>(&'a [Option<ExportEntry>]);

impl Serialize for TimetableExport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, slots) in Day::ALL.iter().zip(&self.days) {
            map.serialize_entry(day.name(), &DayView(slots))?;
        }
        map.end()
    }
}

impl Serialize for DayView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (slot, divisions) in Slot::all().zip(self.0) {
            map.serialize_entry(slot.label(), &SlotView(divisions))?;
        }
        map.end()
    }
}

impl Serialize for SlotView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (division, entry) in Division::ALL.iter().zip(self.0) {
            map.serialize_entry(division.name(), entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Batch, BatchLab, Teacher};

    fn sample() -> Timetable {
        let t1 = Teacher::new("T1").with_name("Asha");
        let mut tt = Timetable::empty();
        let s0 = Slot::new(0).unwrap();
        tt.place(Day::Monday, s0, Division::A, Activity::theory("OS", &t1));
        tt.place(
            Day::Monday,
            s0,
            Division::B,
            Activity::practical(
                "DS",
                &t1,
                vec![
                    BatchLab { batch: Batch::P, lab: "L1".into() },
                    BatchLab { batch: Batch::Q, lab: "L2".into() },
                    BatchLab { batch: Batch::R, lab: "L3".into() },
                ],
            ),
        );
        tt
    }

    #[test]
    fn test_export_entries() {
        let export = sample().to_export();
        let s0 = Slot::new(0).unwrap();

        let theory = export.entry(Day::Monday, s0, Division::A).unwrap();
        assert_eq!(theory.session_type, "Theory");
        assert_eq!(theory.teacher, "Asha (T1)");
        assert_eq!(theory.lab, None);

        let practical = export.entry(Day::Monday, s0, Division::B).unwrap();
        assert_eq!(practical.lab.as_deref(), Some("L1, L2, L3"));
        assert_eq!(practical.batches.as_deref(), Some("P→L1, Q→L2, R→L3"));

        assert!(export.entry(Day::Tuesday, s0, Division::A).is_none());
        assert_eq!(export.entry_count(), 2);
    }

    #[test]
    fn test_export_json_shape() {
        let value = serde_json::to_value(sample().to_export()).unwrap();

        let monday = &value["Monday"]["10:30-11:30"];
        assert_eq!(monday["TY_A"]["subject"], "OS");
        assert_eq!(monday["TY_A"]["type"], "Theory");
        assert!(monday["TY_A"]["lab"].is_null());
        assert!(monday["TY_A"]["batches"].is_null());
        assert_eq!(monday["TY_B"]["type"], "Practical");
        assert_eq!(monday["TY_B"]["batches"], "P→L1, Q→L2, R→L3");
        assert!(value["Friday"]["5:00-6:00"]["TY_B"].is_null());

        let days = value.as_object().unwrap();
        assert_eq!(days.len(), 5);
        assert_eq!(value["Monday"].as_object().unwrap().len(), 7);
    }

    #[test]
    fn test_export_preserves_week_order() {
        let json = serde_json::to_string(&Timetable::empty().to_export()).unwrap();
        let monday = json.find("Monday").unwrap();
        let friday = json.find("Friday").unwrap();
        assert!(monday < friday);
        let first = json.find("10:30-11:30").unwrap();
        let last = json.find("5:00-6:00").unwrap();
        assert!(first < last);
    }
}
