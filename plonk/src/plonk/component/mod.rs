//! The component contract and the components built on it.
//!
//! A component owns a column layout and its fixed parameters. Its row count is
//! known at construction, so callers can reserve rows before any cell is
//! written. Placing a component at `start_row` fills exactly `rows_amount()`
//! rows, registers its gates (deduplicated in the [`Circuit`]) and wires its
//! cells to the caller's variables.

use crate::plonk::constraint_system::{AssignmentTable, Circuit};
use ark_std::{fmt::Debug, ops::Range};
use blueprint_algebra::prelude::*;

mod arithmetic;
mod range_check;
mod x_index;

pub use arithmetic::{ArithmeticBatch, ArithmeticOp};
pub use range_check::RangeCheck;
pub use x_index::{XIndex, XIndexInput, XIndexOutput};

/// The witness column counts a component accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WitnessAmount {
    /// Exactly this many.
    Single(usize),
    /// `min, min + step, …` up to `max`.
    Range {
        /// Smallest accepted count.
        min: usize,
        /// Largest accepted count.
        max: usize,
        /// Distance between accepted counts.
        step: usize,
    },
    /// This many or more.
    AtLeast(usize),
    /// Counts accepted by every member.
    AllOf(Vec<WitnessAmount>),
}

impl WitnessAmount {
    /// Whether `amount` witness columns are accepted.
    pub fn contains(&self, amount: usize) -> bool {
        match self {
            WitnessAmount::Single(n) => amount == *n,
            WitnessAmount::Range { min, max, step } => {
                amount >= *min && amount <= *max && (amount - min) % (*step).max(1) == 0
            }
            WitnessAmount::AtLeast(n) => amount >= *n,
            WitnessAmount::AllOf(members) => members.iter().all(|m| m.contains(amount)),
        }
    }

    /// The counts accepted by both.
    pub fn intersect(&self, other: &WitnessAmount) -> WitnessAmount {
        match (self, other) {
            (WitnessAmount::AtLeast(a), WitnessAmount::AtLeast(b)) => {
                WitnessAmount::AtLeast(*a.max(b))
            }
            (WitnessAmount::AllOf(a), WitnessAmount::AllOf(b)) => {
                WitnessAmount::AllOf(a.iter().chain(b.iter()).cloned().collect())
            }
            (WitnessAmount::AllOf(a), other) | (other, WitnessAmount::AllOf(a)) => {
                let mut members = a.clone();
                members.push(other.clone());
                WitnessAmount::AllOf(members)
            }
            (a, b) => WitnessAmount::AllOf(vec![a.clone(), b.clone()]),
        }
    }

    /// The largest accepted count not above `budget`.
    pub fn best_within(&self, budget: usize) -> Option<usize> {
        (1..=budget).rev().find(|n| self.contains(*n))
    }
}

/// The columns a component needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Accepted witness column counts.
    pub witness: WitnessAmount,
    /// Constant columns.
    pub constant: usize,
    /// Public input columns.
    pub public_input: usize,
}

impl Manifest {
    /// Create a manifest.
    pub fn new(witness: WitnessAmount, constant: usize, public_input: usize) -> Self {
        Self {
            witness,
            constant,
            public_input,
        }
    }

    /// The manifest of a table hosting components with both manifests.
    pub fn merge_with(&self, other: &Manifest) -> Manifest {
        Manifest {
            witness: self.witness.intersect(&other.witness),
            constant: self.constant.max(other.constant),
            public_input: self.public_input.max(other.public_input),
        }
    }

    /// Panics unless `amount` witness columns are accepted.
    pub fn check_witness_amount(&self, component: &str, amount: usize) {
        assert!(
            self.witness.contains(amount),
            "{}: {} witness columns do not fit {:?}",
            component,
            amount,
            self.witness
        );
    }

    /// Panics unless `layout` has the column counts this manifest asks for.
    pub fn validate(&self, component: &str, layout: &ColumnLayout) {
        self.check_witness_amount(component, layout.witness.len());
        assert_eq!(
            layout.constant.len(),
            self.constant,
            "{}: wrong number of constant columns",
            component
        );
        assert_eq!(
            layout.public_input.len(),
            self.public_input,
            "{}: wrong number of public input columns",
            component
        );
    }
}

/// Which table columns a component writes to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Witness column indices.
    pub witness: Vec<usize>,
    /// Constant column indices.
    pub constant: Vec<usize>,
    /// Public input column indices.
    pub public_input: Vec<usize>,
}

impl ColumnLayout {
    /// The first `witness`, `constant` and `public_input` columns of each family.
    pub fn contiguous(witness: usize, constant: usize, public_input: usize) -> Self {
        Self {
            witness: (0..witness).collect(),
            constant: (0..constant).collect(),
            public_input: (0..public_input).collect(),
        }
    }

    /// The number of witness columns.
    pub fn witness_amount(&self) -> usize {
        self.witness.len()
    }
}

/// A selector and the component-relative rows it is enabled on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSpan {
    /// The selector column.
    pub selector: usize,
    /// Rows relative to the component's first row.
    pub rows: Range<usize>,
}

impl SelectorSpan {
    /// Create a span.
    pub fn new(selector: usize, rows: Range<usize>) -> Self {
        Self { selector, rows }
    }
}

/// A gadget placed on consecutive rows of the table.
pub trait Component<F: Scalar> {
    /// The caller's variables.
    type Input;
    /// Handles to the cells holding the results.
    type Output: Clone + PartialEq + Debug;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// The fixed parameters, rendered for diagnostics.
    fn parameters(&self) -> String;

    /// The columns this component is placed on.
    fn layout(&self) -> &ColumnLayout;

    /// The rows one placement occupies.
    fn rows_amount(&self) -> usize;

    /// Fill the component's rows starting at `start_row`.
    fn generate_assignments(
        &self,
        assignment: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Self::Output;

    /// Register gates and lookup gates. The first span is the main gate.
    fn generate_gates(&self, circuit: &mut Circuit<F>, input: &Self::Input) -> Vec<SelectorSpan>;

    /// Wire the component's cells to the input and to each other.
    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    );

    /// The output handles of a placement at `start_row`.
    fn output(&self, input: &Self::Input, start_row: usize) -> Self::Output;

    /// `name(parameters)`.
    fn describe(&self) -> String {
        format!("{}({})", self.name(), self.parameters())
    }

    /// Register gates, enable their selectors and add the copy constraints.
    fn generate_circuit(
        &self,
        circuit: &mut Circuit<F>,
        assignment: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Self::Output {
        for span in self.generate_gates(circuit, input) {
            assert!(
                span.rows.end <= self.rows_amount(),
                "{}: selector {} spans rows {:?} past its {} rows",
                self.describe(),
                span.selector,
                span.rows,
                self.rows_amount()
            );
            assignment.enable_selector(
                span.selector,
                start_row + span.rows.start..start_row + span.rows.end,
            );
        }
        self.generate_copy_constraints(circuit, input, start_row);
        self.output(input, start_row)
    }
}
