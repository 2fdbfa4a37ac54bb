use crate::plonk::component::{ColumnLayout, Component, Manifest, SelectorSpan, WitnessAmount};
use crate::plonk::constraint_system::{AssignmentTable, Circuit, Expression, Variable};
use blueprint_algebra::prelude::*;
use num_integer::Integer;

/// The binary operation of an [`ArithmeticBatch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// `a + b`
    Addition,
    /// `a - b`
    Subtraction,
    /// `a * b`
    Multiplication,
}

impl ArithmeticOp {
    fn apply<F: Scalar>(&self, a: F, b: F) -> F {
        match self {
            ArithmeticOp::Addition => a + b,
            ArithmeticOp::Subtraction => a - b,
            ArithmeticOp::Multiplication => a * b,
        }
    }

    fn expression<F: Scalar>(&self, a: Expression<F>, b: Expression<F>) -> Expression<F> {
        match self {
            ArithmeticOp::Addition => a + b,
            ArithmeticOp::Subtraction => a - b,
            ArithmeticOp::Multiplication => a * b,
        }
    }
}

/// `n` independent binary operations packed as `(a, b, out)` triples,
/// `witness_amount / 3` triples per row.
///
/// Trailing slots of the last row hold zeros and are not wired to anything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArithmeticBatch {
    op: ArithmeticOp,
    n: usize,
    layout: ColumnLayout,
    rows_amount: usize,
}

impl ArithmeticBatch {
    /// The columns an arithmetic batch needs.
    pub fn manifest() -> Manifest {
        Manifest::new(WitnessAmount::AtLeast(3), 0, 0)
    }

    /// Rows taken by `n` operations over `witness_amount` columns.
    pub fn rows_amount(witness_amount: usize, n: usize) -> usize {
        Self::manifest().check_witness_amount("arithmetic", witness_amount);
        Integer::div_ceil(&(3 * n), &(3 * (witness_amount / 3)))
    }

    /// Create a batch of `n` operations on `layout`.
    pub fn new(op: ArithmeticOp, n: usize, layout: ColumnLayout) -> Self {
        assert!(n > 0, "an arithmetic batch needs at least one operation");
        Self::manifest().validate("arithmetic", &layout);
        let rows_amount = Self::rows_amount(layout.witness_amount(), n);
        Self {
            op,
            n,
            layout,
            rows_amount,
        }
    }

    /// The operation.
    pub fn op(&self) -> ArithmeticOp {
        self.op
    }

    fn per_row(&self) -> usize {
        self.layout.witness_amount() / 3
    }

    /// The `(row offset, a column, b column, out column)` of slot `i`.
    fn slot(&self, i: usize) -> (usize, usize, usize, usize) {
        let (row, j) = i.div_rem(&self.per_row());
        (
            row,
            self.layout.witness[3 * j],
            self.layout.witness[3 * j + 1],
            self.layout.witness[3 * j + 2],
        )
    }

    fn check_input<F: Scalar>(&self, input: &[(Variable, Variable)], start_row: usize) {
        assert_eq!(
            input.len(),
            self.n,
            "{} at rows {}..{}: wrong number of operand pairs",
            <Self as Component<F>>::describe(self),
            start_row,
            start_row + self.rows_amount
        );
    }
}

impl<F: Scalar> Component<F> for ArithmeticBatch {
    type Input = Vec<(Variable, Variable)>;
    type Output = Vec<Variable>;

    fn name(&self) -> &'static str {
        match self.op {
            ArithmeticOp::Addition => "addition",
            ArithmeticOp::Subtraction => "subtraction",
            ArithmeticOp::Multiplication => "multiplication",
        }
    }

    fn parameters(&self) -> String {
        format!("n={}, witness={}", self.n, self.layout.witness_amount())
    }

    fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    fn rows_amount(&self) -> usize {
        self.rows_amount
    }

    fn generate_assignments(
        &self,
        assignment: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Self::Output {
        self.check_input::<F>(input, start_row);
        let slots = self.rows_amount * self.per_row();
        for i in 0..slots {
            let (row, a_col, b_col, out_col) = self.slot(i);
            let (a, b) = match input.get(i) {
                Some((a, b)) => (assignment.value(a), assignment.value(b)),
                None => (F::zero(), F::zero()),
            };
            assignment.set_witness(a_col, start_row + row, a);
            assignment.set_witness(b_col, start_row + row, b);
            assignment.set_witness(out_col, start_row + row, self.op.apply(a, b));
        }
        Component::<F>::output(self, input, start_row)
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>, _input: &Self::Input) -> Vec<SelectorSpan> {
        let constraints = (0..self.per_row())
            .map(|j| -> Expression<F> {
                let (_, a, b, out) = self.slot(j);
                self.op.expression(
                    Variable::witness(a, 0).into(),
                    Variable::witness(b, 0).into(),
                ) - Variable::witness(out, 0).into()
            })
            .collect();
        let selector = circuit.add_gate(constraints);
        vec![SelectorSpan::new(selector, 0..self.rows_amount)]
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) {
        self.check_input::<F>(input, start_row);
        for (i, (a, b)) in input.iter().enumerate() {
            let (row, a_col, b_col, _) = self.slot(i);
            circuit.add_copy_constraint(*a, Variable::witness_at(a_col, start_row + row));
            circuit.add_copy_constraint(*b, Variable::witness_at(b_col, start_row + row));
        }
    }

    fn output(&self, input: &Self::Input, start_row: usize) -> Self::Output {
        (0..input.len())
            .map(|i| {
                let (row, _, _, out_col) = self.slot(i);
                Variable::witness_at(out_col, start_row + row)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::plonk::checker::check;
    use crate::plonk::constraint_system::TableShape;
    use blueprint_algebra::baby_bear::BabyBearScalar;

    type F = BabyBearScalar;

    fn place(
        op: ArithmeticOp,
        pairs: &[(u32, u32)],
        witness: usize,
    ) -> (Circuit<F>, AssignmentTable<F>, Vec<Variable>) {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::new(TableShape::new(witness, 1, 0));
        let mut input = Vec::new();
        for (i, (a, b)) in pairs.iter().enumerate() {
            table.set_public_input(0, 2 * i, F::from(*a));
            table.set_public_input(0, 2 * i + 1, F::from(*b));
            input.push((
                Variable::public_input_at(0, 2 * i),
                Variable::public_input_at(0, 2 * i + 1),
            ));
        }
        let batch = ArithmeticBatch::new(op, pairs.len(), ColumnLayout::contiguous(witness, 0, 0));
        let out = batch.generate_assignments(&mut table, &input, 0);
        let out2 = batch.generate_circuit(&mut circuit, &mut table, &input, 0);
        assert_eq!(out, out2);
        (circuit, table, out)
    }

    #[test]
    fn test_rows_amount() {
        assert_eq!(ArithmeticBatch::rows_amount(9, 3), 1);
        assert_eq!(ArithmeticBatch::rows_amount(9, 4), 2);
        assert_eq!(ArithmeticBatch::rows_amount(10, 4), 2);
        assert_eq!(ArithmeticBatch::rows_amount(3, 5), 5);
        assert_eq!(ArithmeticBatch::rows_amount(15, 10), 2);
    }

    #[test]
    #[should_panic(expected = "arithmetic: 2 witness columns do not fit")]
    fn test_rows_amount_below_manifest() {
        ArithmeticBatch::rows_amount(2, 4);
    }

    #[test]
    fn test_addition_and_subtraction() {
        let (circuit, table, out) = place(ArithmeticOp::Addition, &[(2, 3), (4, 5)], 6);
        assert_eq!(table.value(&out[1]), F::from(9u32));
        assert!(check(&circuit, &table).is_ok());

        let (circuit, table, out) = place(ArithmeticOp::Subtraction, &[(2, 3)], 3);
        assert_eq!(table.value(&out[0]), -F::one());
        assert!(check(&circuit, &table).is_ok());
    }

    #[test]
    fn test_trailing_slots_are_zero() {
        // 4 multiplications over 9 columns: the second row has two unused slots
        let (circuit, table, out) =
            place(ArithmeticOp::Multiplication, &[(1, 2), (3, 4), (5, 6), (7, 8)], 9);
        assert_eq!(out[3], Variable::witness_at(2, 1));
        assert_eq!(table.value(&out[3]), F::from(56u32));
        for col in 3..9 {
            assert_eq!(table.value(&Variable::witness_at(col, 1)), F::zero());
        }
        assert!(check(&circuit, &table).is_ok());
        // only external operands are wired
        assert_eq!(circuit.copy_constraints().len(), 8);
    }

    #[test]
    #[should_panic(expected = "multiplication(n=2, witness=3) at rows 0..2: wrong number of operand pairs")]
    fn test_wrong_arity() {
        let mut table = AssignmentTable::<F>::new(TableShape::new(3, 0, 0));
        let batch = ArithmeticBatch::new(
            ArithmeticOp::Multiplication,
            2,
            ColumnLayout::contiguous(3, 0, 0),
        );
        batch.generate_assignments(&mut table, &vec![], 0);
    }
}
