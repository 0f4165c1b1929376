//! Boolean constraint model.
//!
//! Everything the timetable encoder needs is a linear relation over
//! boolean literals with integer coefficients, optionally switched on by
//! an enforcement literal:
//!
//! ```text
//! [enforcement ⇒]  Σ coeff_i · lit_i  (≤ | ≥ | =)  bound
//! ```
//!
//! Implications, equalities, fixed literals and the paired indicator
//! binding are all expressed through that single shape.

use super::literal::{BoolVar, Literal};

/// Relational operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `lhs <= bound`
    LessOrEqual,
    /// `lhs >= bound`
    GreaterOrEqual,
    /// `lhs == bound`
    Equal,
}

impl Comparison {
    /// Whether `lhs` stands in this relation to `bound`.
    pub fn holds(self, lhs: i64, bound: i64) -> bool {
        match self {
            Comparison::LessOrEqual => lhs <= bound,
            Comparison::GreaterOrEqual => lhs >= bound,
            Comparison::Equal => lhs == bound,
        }
    }
}

/// A (possibly conditional) linear constraint over boolean literals.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// `(coefficient, literal)` terms. A literal counts 1 when true.
    pub terms: Vec<(i64, Literal)>,
    /// Relational operator.
    pub comparison: Comparison,
    /// Right-hand side.
    pub bound: i64,
    /// When set, the constraint is only enforced while this literal is true.
    pub enforcement: Option<Literal>,
}

impl LinearConstraint {
    /// Creates an unconditional constraint.
    pub fn new(terms: Vec<(i64, Literal)>, comparison: Comparison, bound: i64) -> Self {
        Self {
            terms,
            comparison,
            bound,
            enforcement: None,
        }
    }

    /// Only enforce this constraint while `literal` is true.
    ///
    /// Use a negated literal for "enforce while false".
    pub fn only_enforce_if(mut self, literal: Literal) -> Self {
        self.enforcement = Some(literal);
        self
    }

    /// Left-hand side value under a full assignment (indexed by variable).
    pub fn lhs(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(_, lit)| lit.eval(values[lit.var().index()]))
            .map(|(c, _)| *c)
            .sum()
    }

    /// Whether the assignment satisfies this constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        if let Some(e) = self.enforcement {
            if !e.eval(values[e.var().index()]) {
                return true;
            }
        }
        self.comparison.holds(self.lhs(values), self.bound)
    }

    fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.terms
            .iter()
            .map(|(_, l)| *l)
            .chain(self.enforcement.iter().copied())
    }
}

/// Builds `(1, lit)` terms for a plain sum of literals.
pub fn unit_terms(literals: &[Literal]) -> Vec<(i64, Literal)> {
    literals.iter().map(|&l| (1, l)).collect()
}

/// A boolean constraint model: named variables plus linear constraints.
///
/// # Examples
///
/// ```
/// use u_timetable::engine::{Comparison, ConstraintModel, unit_terms};
///
/// let mut model = ConstraintModel::new("example");
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// let any = model.new_bool_var("any");
///
/// model.add_linear(unit_terms(&[a.lit(), b.lit()]), Comparison::LessOrEqual, 1);
/// model.bind_or(any.lit(), &[a.lit(), b.lit()]);
///
/// assert_eq!(model.var_count(), 3);
/// assert_eq!(model.constraint_count(), 3);
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConstraintModel {
    /// Model name.
    pub name: String,
    var_names: Vec<String>,
    constraints: Vec<LinearConstraint>,
}

impl ConstraintModel {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            var_names: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Creates a fresh boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        let var = BoolVar(self.var_names.len() as u32);
        self.var_names.push(name.into());
        var
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.var_names.len()
    }

    /// Name given to `var` at creation.
    pub fn var_name(&self, var: BoolVar) -> Option<&str> {
        self.var_names.get(var.index()).map(|s| s.as_str())
    }

    /// All constraints, in emission order.
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Adds a prepared constraint.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Adds `Σ terms (cmp) bound`.
    pub fn add_linear(&mut self, terms: Vec<(i64, Literal)>, comparison: Comparison, bound: i64) {
        self.add_constraint(LinearConstraint::new(terms, comparison, bound));
    }

    /// Adds `enforcement ⇒ (Σ terms (cmp) bound)`.
    pub fn add_conditional(
        &mut self,
        terms: Vec<(i64, Literal)>,
        comparison: Comparison,
        bound: i64,
        enforcement: Literal,
    ) {
        self.add_constraint(
            LinearConstraint::new(terms, comparison, bound).only_enforce_if(enforcement),
        );
    }

    /// Adds `premise ⇒ conclusion`.
    pub fn add_implication(&mut self, premise: Literal, conclusion: Literal) {
        self.add_conditional(vec![(1, conclusion)], Comparison::GreaterOrEqual, 1, premise);
    }

    /// Adds `a == b`.
    pub fn add_equality(&mut self, a: Literal, b: Literal) {
        self.add_linear(vec![(1, a), (-1, b)], Comparison::Equal, 0);
    }

    /// Forces `literal` to be true.
    pub fn add_fixed(&mut self, literal: Literal) {
        self.add_linear(vec![(1, literal)], Comparison::GreaterOrEqual, 1);
    }

    /// Binds `indicator ⟺ Σ literals ≥ 1`.
    ///
    /// Emitted as a pair of conditional constraints: `Σ ≥ 1` enforced by
    /// the indicator and `Σ = 0` enforced by its negation. With no
    /// literals the indicator is fixed false.
    pub fn bind_or(&mut self, indicator: Literal, literals: &[Literal]) {
        if literals.is_empty() {
            self.add_fixed(!indicator);
            return;
        }
        self.add_conditional(
            unit_terms(literals),
            Comparison::GreaterOrEqual,
            1,
            indicator,
        );
        self.add_conditional(unit_terms(literals), Comparison::Equal, 0, !indicator);
    }

    /// Checks that every referenced variable belongs to this model.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.var_count();
        for (i, c) in self.constraints.iter().enumerate() {
            if let Some(bad) = c.literals().find(|l| l.var().index() >= n) {
                return Err(format!(
                    "constraint {i} references undefined variable {}",
                    bad.var().index()
                ));
            }
        }
        Ok(())
    }

    /// Index of the first constraint violated by a full assignment.
    ///
    /// Returns `Some(usize::MAX)` when `values` does not cover every variable.
    pub fn first_violation(&self, values: &[bool]) -> Option<usize> {
        if values.len() < self.var_count() {
            return Some(usize::MAX);
        }
        self.constraints
            .iter()
            .position(|c| !c.is_satisfied_by(values))
    }

    /// Whether a full assignment satisfies every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        self.first_violation(values).is_none()
    }
}
