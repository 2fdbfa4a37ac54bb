use crate::errors::Result;
use crate::plonk::constraint_system::{ColumnKind, Expression, Rotation, Variable};
use ark_std::ops::Range;
use blueprint_algebra::prelude::*;

/// The declared column counts of a table. Selector columns are not declared:
/// they grow with the circuit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableShape {
    /// Witness columns.
    pub witness: usize,
    /// Public input columns.
    pub public_input: usize,
    /// Constant columns.
    pub constant: usize,
}

impl TableShape {
    /// Create a shape.
    pub const fn new(witness: usize, public_input: usize, constant: usize) -> Self {
        Self {
            witness,
            public_input,
            constant,
        }
    }
}

/// What a proving backend needs to know about the table's dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescription {
    /// Witness columns.
    pub witness_columns: usize,
    /// Public input columns.
    pub public_input_columns: usize,
    /// Constant columns.
    pub constant_columns: usize,
    /// Selector columns.
    pub selector_columns: usize,
    /// Rows after padding to a power of two.
    pub rows_amount: usize,
    /// Rows actually written.
    pub usable_rows_amount: usize,
}

/// The values of every cell, stored per column family.
///
/// Unwritten cells read as zero. Writing past the end of a column grows it.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
pub struct AssignmentTable<F> {
    shape: TableShape,
    witness: Vec<Vec<F>>,
    public_input: Vec<Vec<F>>,
    constant: Vec<Vec<F>>,
    selector: Vec<Vec<F>>,
    /// Lowest and highest witness or constant row written since the last mark.
    #[serde(skip)]
    touched: Option<(usize, usize)>,
}

impl<F: PartialEq> PartialEq for AssignmentTable<F> {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.witness == other.witness
            && self.public_input == other.public_input
            && self.constant == other.constant
            && self.selector == other.selector
    }
}

impl<F: Scalar> AssignmentTable<F> {
    /// Create an empty table with the given column counts.
    pub fn new(shape: TableShape) -> Self {
        Self {
            shape,
            witness: vec![Vec::new(); shape.witness],
            public_input: vec![Vec::new(); shape.public_input],
            constant: vec![Vec::new(); shape.constant],
            selector: Vec::new(),
            touched: None,
        }
    }

    /// The declared column counts.
    pub fn shape(&self) -> TableShape {
        self.shape
    }

    /// The columns of one family.
    pub fn columns(&self, kind: ColumnKind) -> &[Vec<F>] {
        match kind {
            ColumnKind::Witness => &self.witness,
            ColumnKind::PublicInput => &self.public_input,
            ColumnKind::Constant => &self.constant,
            ColumnKind::Selector => &self.selector,
        }
    }

    fn column_mut(&mut self, kind: ColumnKind, column: usize) -> &mut Vec<F> {
        let columns = match kind {
            ColumnKind::Witness => &mut self.witness,
            ColumnKind::PublicInput => &mut self.public_input,
            ColumnKind::Constant => &mut self.constant,
            ColumnKind::Selector => {
                if column >= self.selector.len() {
                    self.selector.resize(column + 1, Vec::new());
                }
                &mut self.selector
            }
        };
        let declared = columns.len();
        columns.get_mut(column).unwrap_or_else(|| {
            panic!(
                "{:?} column {} is out of the {} declared columns",
                kind, column, declared
            )
        })
    }

    /// The value at `(kind, column, row)`.
    ///
    /// Panics if `column` is not declared; rows past the end read as zero.
    pub fn get(&self, kind: ColumnKind, column: usize, row: usize) -> F {
        let columns = self.columns(kind);
        if kind != ColumnKind::Selector {
            assert!(
                column < columns.len(),
                "{:?} column {} is out of the {} declared columns",
                kind,
                column,
                columns.len()
            );
        }
        columns
            .get(column)
            .and_then(|c| c.get(row))
            .copied()
            .unwrap_or_else(F::zero)
    }

    /// The value `var` reads once resolved to `row`.
    pub fn cell(&self, var: &Variable, row: usize) -> F {
        self.get(var.kind, var.index, row)
    }

    /// The value of an absolute variable. Panics on a relative one.
    pub fn value(&self, var: &Variable) -> F {
        match var.rotation {
            Rotation::Absolute(row) => self.get(var.kind, var.index, row),
            Rotation::Relative(_) => panic!("{} has no fixed row", var),
        }
    }

    /// Write `value` at `(kind, column, row)`, growing the column if needed.
    pub fn set(&mut self, kind: ColumnKind, column: usize, row: usize, value: F) {
        let column = self.column_mut(kind, column);
        if row >= column.len() {
            column.resize(row + 1, F::zero());
        }
        column[row] = value;
        if matches!(kind, ColumnKind::Witness | ColumnKind::Constant) {
            self.touched = Some(match self.touched {
                Some((low, high)) => (low.min(row), high.max(row)),
                None => (row, row),
            });
        }
    }

    /// Forget the witness and constant rows written so far.
    pub fn mark_writes(&mut self) {
        self.touched = None;
    }

    /// The span of witness and constant rows written since [`Self::mark_writes`],
    /// from the lowest to one past the highest.
    pub fn rows_written_since_mark(&self) -> Option<Range<usize>> {
        self.touched.map(|(low, high)| low..high + 1)
    }

    /// Write a witness cell.
    pub fn set_witness(&mut self, column: usize, row: usize, value: F) {
        self.set(ColumnKind::Witness, column, row, value)
    }

    /// Write a public input cell.
    pub fn set_public_input(&mut self, column: usize, row: usize, value: F) {
        self.set(ColumnKind::PublicInput, column, row, value)
    }

    /// Write a constant cell.
    pub fn set_constant(&mut self, column: usize, row: usize, value: F) {
        self.set(ColumnKind::Constant, column, row, value)
    }

    /// Enable `selector` on `rows`.
    pub fn enable_selector(&mut self, selector: usize, rows: Range<usize>) {
        for row in rows {
            self.set(ColumnKind::Selector, selector, row, F::one());
        }
    }

    /// Enable `selector` on one row.
    pub fn enable_selector_at(&mut self, selector: usize, row: usize) {
        self.set(ColumnKind::Selector, selector, row, F::one());
    }

    /// One past the highest written row over the given families.
    pub fn written_rows_of(&self, kinds: &[ColumnKind]) -> usize {
        kinds
            .iter()
            .flat_map(|kind| self.columns(*kind).iter().map(|c| c.len()))
            .max()
            .unwrap_or(0)
    }

    /// The highest written row over the given families.
    pub fn max_written_row_of(&self, kinds: &[ColumnKind]) -> Option<usize> {
        self.written_rows_of(kinds).checked_sub(1)
    }

    /// One past the highest written row over all families.
    pub fn rows_amount(&self) -> usize {
        self.written_rows_of(&[
            ColumnKind::Witness,
            ColumnKind::PublicInput,
            ColumnKind::Constant,
            ColumnKind::Selector,
        ])
    }

    /// Evaluate `expression` at `row` against this table.
    pub fn evaluate(&self, expression: &Expression<F>, row: usize) -> Result<F> {
        expression.evaluate(row, self.rows_amount(), &|var, r| self.cell(var, r))
    }

    /// The table's dimensions.
    pub fn table_description(&self) -> TableDescription {
        let usable_rows_amount = self.rows_amount();
        TableDescription {
            witness_columns: self.witness.len(),
            public_input_columns: self.public_input.len(),
            constant_columns: self.constant.len(),
            selector_columns: self.selector.len(),
            rows_amount: min_greater_equal_power_of_two(usable_rows_amount),
            usable_rows_amount,
        }
    }

    /// Zero-fill every column up to the next power of two and return that row count.
    pub fn pad_to_power_of_two(&mut self) -> usize {
        let padded = min_greater_equal_power_of_two(self.rows_amount());
        for column in self
            .witness
            .iter_mut()
            .chain(self.public_input.iter_mut())
            .chain(self.constant.iter_mut())
            .chain(self.selector.iter_mut())
        {
            column.resize(padded, F::zero());
        }
        padded
    }
}
