use crate::errors::{PlonkError, Result};
use ark_std::fmt;

/// The column families of the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Prover-only values.
    Witness,
    /// Values known to the verifier.
    PublicInput,
    /// Circuit-fixed values.
    Constant,
    /// Gate enablers.
    Selector,
}

impl ColumnKind {
    fn prefix(&self) -> &'static str {
        match self {
            ColumnKind::Witness => "w",
            ColumnKind::PublicInput => "pi",
            ColumnKind::Constant => "c",
            ColumnKind::Selector => "s",
        }
    }
}

/// Which row a [`Variable`] points to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rotation {
    /// An offset from the row the enclosing gate is evaluated at.
    Relative(i32),
    /// A fixed row of the table.
    Absolute(usize),
}

/// A reference to one cell (absolute) or to one cell per evaluation row (relative).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    /// The column family.
    pub kind: ColumnKind,
    /// The column index inside its family.
    pub index: usize,
    /// The row the variable points to.
    pub rotation: Rotation,
}

impl Variable {
    /// Create a variable.
    pub const fn new(kind: ColumnKind, index: usize, rotation: Rotation) -> Self {
        Self {
            kind,
            index,
            rotation,
        }
    }

    /// A witness cell relative to the evaluation row.
    pub const fn witness(index: usize, rotation: i32) -> Self {
        Self::new(ColumnKind::Witness, index, Rotation::Relative(rotation))
    }

    /// A public input cell relative to the evaluation row.
    pub const fn public_input(index: usize, rotation: i32) -> Self {
        Self::new(ColumnKind::PublicInput, index, Rotation::Relative(rotation))
    }

    /// A constant cell relative to the evaluation row.
    pub const fn constant(index: usize, rotation: i32) -> Self {
        Self::new(ColumnKind::Constant, index, Rotation::Relative(rotation))
    }

    /// A selector cell relative to the evaluation row.
    pub const fn selector(index: usize, rotation: i32) -> Self {
        Self::new(ColumnKind::Selector, index, Rotation::Relative(rotation))
    }

    /// The witness cell at a fixed row.
    pub const fn witness_at(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::Witness, index, Rotation::Absolute(row))
    }

    /// The public input cell at a fixed row.
    pub const fn public_input_at(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::PublicInput, index, Rotation::Absolute(row))
    }

    /// The constant cell at a fixed row.
    pub const fn constant_at(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::Constant, index, Rotation::Absolute(row))
    }

    /// The selector cell at a fixed row.
    pub const fn selector_at(index: usize, row: usize) -> Self {
        Self::new(ColumnKind::Selector, index, Rotation::Absolute(row))
    }

    /// Whether the variable names a fixed row.
    pub fn is_absolute(&self) -> bool {
        matches!(self.rotation, Rotation::Absolute(_))
    }

    /// Pin a relative variable to `row`; absolute variables are returned unchanged.
    ///
    /// Panics if the rotation moves before the first row.
    pub fn at_row(&self, row: usize) -> Self {
        match self.rotation {
            Rotation::Absolute(_) => *self,
            Rotation::Relative(offset) => {
                let target = row as i64 + offset as i64;
                assert!(
                    target >= 0,
                    "{} pinned at row {} points before the first row",
                    self,
                    row
                );
                Self::new(self.kind, self.index, Rotation::Absolute(target as usize))
            }
        }
    }

    /// The row this variable reads when its gate is evaluated at `row`.
    pub fn resolve_row(&self, row: usize, rows_amount: usize) -> Result<usize> {
        let target = match self.rotation {
            Rotation::Absolute(r) => r as i64,
            Rotation::Relative(offset) => row as i64 + offset as i64,
        };
        if target < 0 || target >= rows_amount as i64 {
            return Err(PlonkError::RowOutOfRange {
                variable: *self,
                row,
                rows_amount,
            });
        }
        Ok(target as usize)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rotation {
            Rotation::Relative(offset) if offset > 0 => {
                write!(f, "{}{}[+{}]", self.kind.prefix(), self.index, offset)
            }
            Rotation::Relative(offset) => {
                write!(f, "{}{}[{}]", self.kind.prefix(), self.index, offset)
            }
            Rotation::Absolute(row) => write!(f, "{}{}@{}", self.kind.prefix(), self.index, row),
        }
    }
}
