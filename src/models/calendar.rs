//! Weekly calendar: days and the daily slot grid.
//!
//! The week is fixed at five teaching days of seven schedulable slots.
//! A non-schedulable break sits between slot 2 and slot 3:
//!
//! ```text
//! 0 10:30-11:30 | 1 11:30-12:30 | 2 12:30-1:30 | BREAK 1:30-2:00 |
//! 3 2:00-3:00   | 4 3:00-4:00   | 5 4:00-5:00  | 6 5:00-6:00
//! ```
//!
//! Two slots are *adjacent* for the teacher rest rule when their indices
//! differ by one and the break does not separate them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of schedulable slots per day.
pub const SLOTS_PER_DAY: usize = 7;

/// Display labels of the schedulable slots, in order.
pub const SLOT_LABELS: [&str; SLOTS_PER_DAY] = [
    "10:30-11:30",
    "11:30-12:30",
    "12:30-1:30",
    "2:00-3:00",
    "3:00-4:00",
    "4:00-5:00",
    "5:00-6:00",
];

/// Index of the last slot before the break.
pub const BREAK_AFTER_SLOT: usize = 2;

/// Display label of the break.
pub const BREAK_LABEL: &str = "1:30-2:00";

/// A teaching day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All teaching days in week order.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Position in the week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A schedulable slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot(u8);

impl Slot {
    /// Slot at `index`, if it is within the daily grid.
    pub fn new(index: usize) -> Option<Self> {
        (index < SLOTS_PER_DAY).then_some(Slot(index as u8))
    }

    /// All slots of a day in order.
    pub fn all() -> impl Iterator<Item = Slot> + Clone {
        (0..SLOTS_PER_DAY as u8).map(Slot)
    }

    /// Position within the day.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Display label, e.g. `"10:30-11:30"`.
    pub fn label(self) -> &'static str {
        SLOT_LABELS[self.index()]
    }

    /// Whether `self` and `other` are back-to-back without the break between them.
    pub fn is_adjacent_to(self, other: Slot) -> bool {
        let (lo, hi) = if self.0 < other.0 { (self, other) } else { (other, self) };
        hi.index() == lo.index() + 1 && lo.index() != BREAK_AFTER_SLOT
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pairs of consecutive slots the teacher rest rule applies to.
///
/// The pair spanning the break is excluded.
pub fn rest_pairs() -> Vec<(Slot, Slot)> {
    Slot::all()
        .zip(Slot::all().skip(1))
        .filter(|(a, b)| a.is_adjacent_to(*b))
        .collect()
}

/// Largest number of slots one teacher can occupy in a day without two
/// of them being adjacent.
///
/// Each run of slots between breaks of length `n` admits `ceil(n / 2)`.
pub fn max_rest_compatible_slots_per_day() -> usize {
    let first = BREAK_AFTER_SLOT + 1;
    let second = SLOTS_PER_DAY - first;
    first.div_ceil(2) + second.div_ceil(2)
}

/// Schedulable slots per division per week.
pub fn slots_per_week() -> usize {
    Day::ALL.len() * SLOTS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_order() {
        assert_eq!(Day::ALL.len(), 5);
        assert_eq!(Day::Monday.index(), 0);
        assert_eq!(Day::Friday.index(), 4);
        assert_eq!(Day::Wednesday.to_string(), "Wednesday");
    }

    #[test]
    fn test_slot_bounds() {
        assert!(Slot::new(6).is_some());
        assert!(Slot::new(7).is_none());
        assert_eq!(Slot::all().count(), SLOTS_PER_DAY);
        assert_eq!(Slot::new(0).map(Slot::label), Some("10:30-11:30"));
    }

    #[test]
    fn test_break_is_not_adjacent() {
        let s = |i| Slot::new(i).unwrap();
        assert!(s(0).is_adjacent_to(s(1)));
        assert!(s(1).is_adjacent_to(s(2)));
        assert!(!s(2).is_adjacent_to(s(3)));
        assert!(s(3).is_adjacent_to(s(4)));
        assert!(s(4).is_adjacent_to(s(3)));
        assert!(!s(0).is_adjacent_to(s(2)));
    }

    #[test]
    fn test_rest_pairs() {
        let pairs = rest_pairs();
        assert_eq!(pairs.len(), SLOTS_PER_DAY - 2);
        assert!(!pairs
            .iter()
            .any(|(a, b)| a.index() == BREAK_AFTER_SLOT && b.index() == BREAK_AFTER_SLOT + 1));
    }

    #[test]
    fn test_capacity_figures() {
        // {0, 2} before the break, {3, 5} or {4, 6} after it
        assert_eq!(max_rest_compatible_slots_per_day(), 4);
        assert_eq!(slots_per_week(), 35);
    }
}
