//! Boolean variable handles and literals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Not;

/// Handle to a boolean variable owned by a [`ConstraintModel`](super::ConstraintModel).
///
/// Handles are dense indices; they are only meaningful for the model
/// that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoolVar(pub(crate) u32);

impl BoolVar {
    /// Dense index of this variable.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Positive literal of this variable.
    #[inline]
    pub fn lit(self) -> Literal {
        Literal::positive(self)
    }
}

impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        Literal::positive(var)
    }
}

/// A variable or its negation.
///
/// Encoded as `2 * var + negated`, so literals of the same variable are
/// adjacent and `!lit` is a single xor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal(u32);

impl Literal {
    /// Literal that is true when `var` is true.
    #[inline]
    pub fn positive(var: BoolVar) -> Self {
        Self(var.0 << 1)
    }

    /// Literal that is true when `var` is false.
    #[inline]
    pub fn negative(var: BoolVar) -> Self {
        Self((var.0 << 1) | 1)
    }

    /// Underlying variable.
    #[inline]
    pub fn var(self) -> BoolVar {
        BoolVar(self.0 >> 1)
    }

    /// Whether this is the negated form.
    #[inline]
    pub fn is_negated(self) -> bool {
        self.0 & 1 == 1
    }

    /// Dense code, usable as an array index over `2 * num_vars` slots.
    #[inline]
    pub fn code(self) -> usize {
        self.0 as usize
    }

    /// Truth value of this literal given its variable's value.
    #[inline]
    pub fn eval(self, var_value: bool) -> bool {
        var_value != self.is_negated()
    }
}

impl Not for Literal {
    type Output = Literal;

    #[inline]
    fn not(self) -> Literal {
        Literal(self.0 ^ 1)
    }
}

impl Not for BoolVar {
    type Output = Literal;

    #[inline]
    fn not(self) -> Literal {
        Literal::negative(self)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "!x{}", self.var().0)
        } else {
            write!(f, "x{}", self.var().0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_encoding() {
        let v = BoolVar(7);
        let p = v.lit();
        let n = !v;

        assert_eq!(p.var(), v);
        assert_eq!(n.var(), v);
        assert!(!p.is_negated());
        assert!(n.is_negated());
        assert_eq!(!p, n);
        assert_eq!(!!p, p);
        assert_eq!(p.code() + 1, n.code());
    }

    #[test]
    fn test_literal_eval() {
        let v = BoolVar(0);
        assert!(v.lit().eval(true));
        assert!(!v.lit().eval(false));
        assert!((!v).eval(false));
        assert!(!(!v).eval(true));
    }

    #[test]
    fn test_display() {
        let v = BoolVar(3);
        assert_eq!(v.lit().to_string(), "x3");
        assert_eq!((!v).to_string(), "!x3");
    }
}
