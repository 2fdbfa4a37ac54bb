use crate::plonk::constraint_system::{Expression, Variable};
use blueprint_algebra::prelude::*;

/// Polynomial constraints enforced on every row where `selector_index` is enabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate<F> {
    /// The selector column turning the gate on.
    pub selector_index: usize,
    /// Expressions that must evaluate to zero.
    pub constraints: Vec<Expression<F>>,
}

impl<F: Scalar> Gate<F> {
    /// The degree of the gate polynomial, the selector included.
    pub fn degree(&self) -> u64 {
        self.constraints
            .iter()
            .map(|c| c.degree())
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Equality between two absolute cells.
///
/// `(a, b)` and `(b, a)` are the same constraint: the endpoints are stored sorted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CopyConstraint {
    /// The smaller endpoint.
    pub left: Variable,
    /// The larger endpoint.
    pub right: Variable,
}

impl CopyConstraint {
    /// Create a copy constraint. Panics unless both endpoints are absolute.
    pub fn new(left: Variable, right: Variable) -> Self {
        assert!(
            left.is_absolute() && right.is_absolute(),
            "copy constraint {} == {} needs absolute variables",
            left,
            right
        );
        if left <= right {
            Self { left, right }
        } else {
            Self {
                left: right,
                right: left,
            }
        }
    }

    /// Whether both endpoints are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.left == self.right
    }
}

/// One tuple that must appear among the rows of a lookup table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConstraint<F> {
    /// The table the tuple is looked up in.
    pub table_id: usize,
    /// One expression per table column.
    pub lookup_input: Vec<Expression<F>>,
}

impl<F: Scalar> LookupConstraint<F> {
    /// Create a lookup constraint.
    pub fn new(table_id: usize, lookup_input: Vec<Expression<F>>) -> Self {
        Self {
            table_id,
            lookup_input,
        }
    }
}

/// Lookup constraints enforced on every row where `selector_index` is enabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupGate<F> {
    /// The selector column turning the gate on.
    pub selector_index: usize,
    /// The tuples looked up on each enabled row.
    pub constraints: Vec<LookupConstraint<F>>,
}
