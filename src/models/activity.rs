//! Activity model.
//!
//! An activity is what a division does in one slot: a theory lecture of
//! a subject, or a practical session of a subject where every batch sits
//! in its own lab.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Batch, Teacher};

/// Kind of session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    /// Whole-division lecture.
    Theory,
    /// Lab session with the division split into batches.
    Practical,
}

impl SessionType {
    pub fn name(self) -> &'static str {
        match self {
            SessionType::Theory => "Theory",
            SessionType::Practical => "Practical",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Placement of one batch in one lab.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BatchLab {
    pub batch: Batch,
    pub lab: String,
}

impl fmt::Display for BatchLab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{}", self.batch, self.lab)
    }
}

/// A scheduled session occupying one division slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Subject name.
    pub subject: String,
    /// Theory or practical.
    pub session_type: SessionType,
    /// Teacher id.
    pub teacher_id: String,
    /// Teacher name.
    pub teacher_name: String,
    /// Labs in use, in batch order without repeats (practical only).
    pub labs: Vec<String>,
    /// Batch placements in batch order (practical only).
    pub batches: Vec<BatchLab>,
}

impl Activity {
    /// Creates a theory activity.
    pub fn theory(subject: impl Into<String>, teacher: &Teacher) -> Self {
        Self {
            subject: subject.into(),
            session_type: SessionType::Theory,
            teacher_id: teacher.id.clone(),
            teacher_name: teacher.name.clone(),
            labs: Vec::new(),
            batches: Vec::new(),
        }
    }

    /// Creates a practical activity from batch placements.
    ///
    /// Placements are sorted by batch; labs are collected in that order.
    pub fn practical(
        subject: impl Into<String>,
        teacher: &Teacher,
        mut batches: Vec<BatchLab>,
    ) -> Self {
        batches.sort_by_key(|b| b.batch);
        let mut labs: Vec<String> = Vec::new();
        for placement in &batches {
            if !labs.contains(&placement.lab) {
                labs.push(placement.lab.clone());
            }
        }
        Self {
            subject: subject.into(),
            session_type: SessionType::Practical,
            teacher_id: teacher.id.clone(),
            teacher_name: teacher.name.clone(),
            labs,
            batches,
        }
    }

    #[inline]
    pub fn is_practical(&self) -> bool {
        self.session_type == SessionType::Practical
    }

    /// Teacher as `"Name (ID)"`.
    pub fn teacher_display(&self) -> String {
        format!("{} ({})", self.teacher_name, self.teacher_id)
    }

    /// Comma-joined labs, or `None` for theory.
    pub fn lab_label(&self) -> Option<String> {
        self.is_practical().then(|| self.labs.join(", "))
    }

    /// Comma-joined `"P→L1"` placements, or `None` for theory.
    pub fn batch_label(&self) -> Option<String> {
        self.is_practical().then(|| {
            self.batches
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    /// Lab of `batch`, if placed.
    pub fn lab_of(&self, batch: Batch) -> Option<&str> {
        self.batches
            .iter()
            .find(|b| b.batch == batch)
            .map(|b| b.lab.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> Teacher {
        Teacher::new("T1").with_name("Asha")
    }

    fn placement(batch: Batch, lab: &str) -> BatchLab {
        BatchLab {
            batch,
            lab: lab.to_string(),
        }
    }

    #[test]
    fn test_theory_activity() {
        let a = Activity::theory("DS", &teacher());
        assert_eq!(a.session_type, SessionType::Theory);
        assert!(!a.is_practical());
        assert_eq!(a.teacher_display(), "Asha (T1)");
        assert_eq!(a.lab_label(), None);
        assert_eq!(a.batch_label(), None);
    }

    #[test]
    fn test_practical_activity_ordering() {
        let a = Activity::practical(
            "DS",
            &teacher(),
            vec![
                placement(Batch::R, "L1"),
                placement(Batch::P, "L3"),
                placement(Batch::Q, "L2"),
            ],
        );

        assert!(a.is_practical());
        assert_eq!(a.labs, vec!["L3", "L2", "L1"]);
        assert_eq!(a.lab_label().as_deref(), Some("L3, L2, L1"));
        assert_eq!(a.batch_label().as_deref(), Some("P→L3, Q→L2, R→L1"));
        assert_eq!(a.lab_of(Batch::Q), Some("L2"));
    }

    #[test]
    fn test_session_type_display() {
        assert_eq!(SessionType::Theory.to_string(), "Theory");
        assert_eq!(SessionType::Practical.to_string(), "Practical");
    }
}
