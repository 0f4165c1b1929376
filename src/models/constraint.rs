//! Timetabling rule families.
//!
//! Every constraint emitted for a timetable belongs to one of seven
//! families. The families interact: batch atomicity decides when a
//! practical session exists, and that session then counts toward slot
//! exclusivity, load, mutual exclusion, and teacher rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A family of timetabling rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleFamily {
    /// At most one activity per division per slot; a batch sits in at most
    /// one lab.
    SlotExclusivity,
    /// Weekly theory slots and practical sessions meet each subject's demand.
    MinimumLoad,
    /// A division's practical runs only while the other division is in theory.
    MutualExclusion,
    /// A lab holds at most one batch per slot.
    LabCapacity,
    /// A teacher takes at most one activity per slot across both divisions.
    TeacherConflict,
    /// A teacher never works two adjacent slots (the break resets).
    TeacherRest,
    /// A practical places all three batches or none.
    BatchAtomicity,
}

impl RuleFamily {
    /// All families in emission order.
    pub const ALL: [RuleFamily; 7] = [
        RuleFamily::SlotExclusivity,
        RuleFamily::MinimumLoad,
        RuleFamily::MutualExclusion,
        RuleFamily::LabCapacity,
        RuleFamily::TeacherConflict,
        RuleFamily::TeacherRest,
        RuleFamily::BatchAtomicity,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RuleFamily::SlotExclusivity => "slot exclusivity",
            RuleFamily::MinimumLoad => "minimum load",
            RuleFamily::MutualExclusion => "mutual exclusion",
            RuleFamily::LabCapacity => "lab capacity",
            RuleFamily::TeacherConflict => "teacher conflict",
            RuleFamily::TeacherRest => "teacher rest",
            RuleFamily::BatchAtomicity => "batch atomicity",
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_indices_are_dense() {
        for (i, family) in RuleFamily::ALL.iter().enumerate() {
            assert_eq!(family.index(), i);
        }
    }

    #[test]
    fn test_family_display() {
        assert_eq!(RuleFamily::TeacherRest.to_string(), "teacher rest");
    }
}
