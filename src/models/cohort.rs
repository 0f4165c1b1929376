//! Student divisions and practical batches.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two student divisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Division {
    A,
    B,
}

impl Division {
    /// Both divisions.
    pub const ALL: [Division; 2] = [Division::A, Division::B];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short label (`"A"`, `"B"`).
    pub fn label(self) -> &'static str {
        match self {
            Division::A => "A",
            Division::B => "B",
        }
    }

    /// Display name used in exported timetables.
    pub fn name(self) -> &'static str {
        match self {
            Division::A => "TY_A",
            Division::B => "TY_B",
        }
    }

    /// The other division.
    pub fn other(self) -> Division {
        match self {
            Division::A => Division::B,
            Division::B => Division::A,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A practical sub-group of a division.
///
/// All three batches of a division attend a practical session at the
/// same time, each in its own lab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Batch {
    P,
    Q,
    R,
}

impl Batch {
    /// All batches in label order.
    pub const ALL: [Batch; 3] = [Batch::P, Batch::Q, Batch::R];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Batch::P => "P",
            Batch::Q => "Q",
            Batch::R => "R",
        }
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_symmetry() {
        assert_eq!(Division::A.other(), Division::B);
        assert_eq!(Division::B.other(), Division::A);
        assert_eq!(Division::A.name(), "TY_A");
        assert_eq!(Division::B.label(), "B");
    }

    #[test]
    fn test_batches() {
        assert_eq!(Batch::ALL.len(), 3);
        assert_eq!(Batch::R.index(), 2);
        assert_eq!(Batch::Q.to_string(), "Q");
    }
}
