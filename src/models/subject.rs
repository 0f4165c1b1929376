//! Subject model.
//!
//! A subject is taught to both divisions with the same weekly demand:
//! a number of theory slots and a number of practical sessions. A
//! practical session occupies one slot with all three batches placed in
//! separate labs taken from the subject's preferred labs.

use serde::{Deserialize, Serialize};

/// A subject with its weekly requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject name.
    pub name: String,
    /// Theory slots per division per week.
    pub theory_per_week: u32,
    /// Practical sessions per division per week.
    pub practical_per_week: u32,
    /// Names of labs the practical may use.
    pub preferred_labs: Vec<String>,
}

impl Subject {
    /// Creates a subject with no requirements yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            theory_per_week: 0,
            practical_per_week: 0,
            preferred_labs: Vec::new(),
        }
    }

    /// Sets weekly theory slots.
    pub fn with_theory(mut self, per_week: u32) -> Self {
        self.theory_per_week = per_week;
        self
    }

    /// Sets weekly practical sessions.
    pub fn with_practical(mut self, per_week: u32) -> Self {
        self.practical_per_week = per_week;
        self
    }

    /// Adds a preferred lab.
    pub fn with_lab(mut self, lab: impl Into<String>) -> Self {
        self.preferred_labs.push(lab.into());
        self
    }

    /// Adds several preferred labs.
    pub fn with_labs<I, S>(mut self, labs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferred_labs.extend(labs.into_iter().map(Into::into));
        self
    }

    pub fn has_theory(&self) -> bool {
        self.theory_per_week > 0
    }

    pub fn has_practical(&self) -> bool {
        self.practical_per_week > 0
    }

    /// Slots this subject occupies per division per week.
    pub fn weekly_slots(&self) -> u32 {
        self.theory_per_week + self.practical_per_week
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("DS")
            .with_theory(3)
            .with_practical(1)
            .with_lab("L1")
            .with_labs(["L2", "L3"]);

        assert_eq!(s.name, "DS");
        assert_eq!(s.theory_per_week, 3);
        assert_eq!(s.practical_per_week, 1);
        assert_eq!(s.preferred_labs, vec!["L1", "L2", "L3"]);
        assert_eq!(s.weekly_slots(), 4);
        assert!(s.has_theory());
        assert!(s.has_practical());
    }

    #[test]
    fn test_theory_only() {
        let s = Subject::new("Maths").with_theory(4);
        assert!(!s.has_practical());
        assert!(s.preferred_labs.is_empty());
    }

    #[test]
    fn test_subject_serde() {
        let s = Subject::new("OS").with_theory(2).with_practical(1).with_lab("L1");
        let json = serde_json::to_string(&s).unwrap();
        let back: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
