use crate::plonk::component::{ColumnLayout, Component, Manifest, SelectorSpan, WitnessAmount};
use crate::plonk::constraint_system::{AssignmentTable, Circuit, Expression, Variable};
use blueprint_algebra::prelude::*;
use num_integer::Integer;

/// The caller's variables for an [`XIndex`] placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XIndexInput {
    /// The value claimed to be `±ω^j`.
    pub x: Variable,
    /// The bits of the index, least significant first.
    pub bits: Vec<Variable>,
}

/// The cells an [`XIndex`] placement exposes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XIndexOutput {
    /// The ladder result.
    pub tmp: Variable,
    /// One when `x == tmp`, zero when `x == -tmp`.
    pub sign: Variable,
}

/// Proves that `x = ±tmp` where `tmp` is the square-and-multiply ladder over `n`
/// bits read most significant first: `acc ← acc² · (b ? 1 : ω)`, starting from one.
///
/// Witness column 0 carries the previous accumulator; each ladder step takes a
/// `(bit, acc)` pair of columns, `(witness_amount - 1) / 2` steps per row. The
/// constant column holds `ω` on the ladder rows. A final sign row holds
/// `(tmp, x, sign)` and the constant one the ladder starts from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XIndex<F> {
    n: usize,
    omega: F,
    layout: ColumnLayout,
    rows_amount: usize,
}

impl<F: Scalar> XIndex<F> {
    /// The columns an x-index needs.
    pub fn manifest() -> Manifest {
        Manifest::new(WitnessAmount::AtLeast(3), 1, 0)
    }

    /// Rows taken by an `n`-bit ladder over `witness_amount` columns.
    ///
    /// This is `⌈2n / (2k)⌉` ladder rows for `k = (witness_amount - 1) / 2`,
    /// plus one for the sign row.
    pub fn rows_amount(witness_amount: usize, n: usize) -> usize {
        Self::manifest().check_witness_amount("x_index", witness_amount);
        let k = (witness_amount - 1) / 2;
        Integer::div_ceil(&(2 * n), &(2 * k)) + 1
    }

    /// Create an `n`-bit x-index for `omega` on `layout`.
    pub fn new(n: usize, omega: F, layout: ColumnLayout) -> Self {
        assert!(n > 0, "an x-index needs at least one bit");
        Self::manifest().validate("x_index", &layout);
        let rows_amount = Self::rows_amount(layout.witness_amount(), n);
        Self {
            n,
            omega,
            layout,
            rows_amount,
        }
    }

    /// Ladder steps per row.
    fn steps_per_row(&self) -> usize {
        (self.layout.witness_amount() - 1) / 2
    }

    fn ladder_rows(&self) -> usize {
        self.rows_amount - 1
    }

    /// The `(row offset, bit column, acc column)` of ladder step `s`.
    fn step(&self, s: usize) -> (usize, usize, usize) {
        let (row, j) = s.div_rem(&self.steps_per_row());
        (
            row,
            self.layout.witness[1 + 2 * j],
            self.layout.witness[2 + 2 * j],
        )
    }

    fn constant_column(&self) -> usize {
        self.layout.constant[0]
    }

    fn check_input(&self, input: &XIndexInput, start_row: usize) {
        assert_eq!(
            input.bits.len(),
            self.n,
            "{} at rows {}..{}: wrong number of bits",
            self.describe(),
            start_row,
            start_row + self.rows_amount
        );
    }
}

impl<F: Scalar> Component<F> for XIndex<F> {
    type Input = XIndexInput;
    type Output = XIndexOutput;

    fn name(&self) -> &'static str {
        "x_index"
    }

    fn parameters(&self) -> String {
        format!(
            "n={}, omega={}, witness={}",
            self.n,
            self.omega,
            self.layout.witness_amount()
        )
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
        self.check_input(input, start_row);
        let bits: Vec<F> = input.bits.iter().map(|b| assignment.value(b)).collect();
        if let Some(i) = bits.iter().position(|b| !b.is_zero() && !b.is_one()) {
            panic!(
                "{} at rows {}..{}: bit {} is {}, not boolean",
                self.describe(),
                start_row,
                start_row + self.rows_amount,
                i,
                bits[i]
            );
        }

        let prev_col = self.layout.witness[0];
        let mut acc = F::one();
        let mut tmp = F::one();
        for s in 0..self.ladder_rows() * self.steps_per_row() {
            let (row, bit_col, acc_col) = self.step(s);
            if s % self.steps_per_row() == 0 {
                assignment.set_witness(prev_col, start_row + row, acc);
            }
            // steps past the last bit keep squaring with b = 1
            let bit = if s < self.n {
                bits[self.n - 1 - s]
            } else {
                F::one()
            };
            acc = acc.square() * if bit.is_one() { F::one() } else { self.omega };
            assignment.set_witness(bit_col, start_row + row, bit);
            assignment.set_witness(acc_col, start_row + row, acc);
            if s == self.n - 1 {
                tmp = acc;
            }
        }

        let x = assignment.value(&input.x);
        assert!(
            tmp == x || tmp == -x,
            "{} at rows {}..{}: ladder result {} is neither x nor -x for x = {}",
            self.describe(),
            start_row,
            start_row + self.rows_amount,
            tmp,
            x
        );
        let sign = F::from_bool(tmp == x);

        let sign_row = start_row + self.ladder_rows();
        for row in start_row..sign_row {
            assignment.set_constant(self.constant_column(), row, self.omega);
        }
        assignment.set_constant(self.constant_column(), sign_row, F::one());
        assignment.set_witness(self.layout.witness[0], sign_row, tmp);
        assignment.set_witness(self.layout.witness[1], sign_row, x);
        assignment.set_witness(self.layout.witness[2], sign_row, sign);

        Component::<F>::output(self, input, start_row)
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>, _input: &Self::Input) -> Vec<SelectorSpan> {
        let w = |col: usize| -> Expression<F> { Variable::witness(self.layout.witness[col], 0).into() };
        let omega: Expression<F> = Variable::constant(self.constant_column(), 0).into();

        let mut ladder = Vec::with_capacity(2 * self.steps_per_row());
        for j in 0..self.steps_per_row() {
            let prev = if j == 0 { w(0) } else { w(2 * j) };
            let bit = w(1 + 2 * j);
            let acc = w(2 + 2 * j);
            let factor = bit.clone() + omega.clone() * (Expression::one() - bit.clone());
            ladder.push(acc - prev.pow(2) * factor);
            ladder.push(bit.clone() * (Expression::one() - bit));
        }
        let ladder_selector = circuit.add_gate(ladder);

        let (tmp, x, sign) = (w(0), w(1), w(2));
        let two = Expression::constant(F::from(2u32));
        let sign_selector = circuit.add_gate(vec![
            x - tmp * (two * sign.clone() - Expression::one()),
            sign.clone() * (Expression::one() - sign),
        ]);

        vec![
            SelectorSpan::new(ladder_selector, 0..self.ladder_rows()),
            SelectorSpan::new(sign_selector, self.ladder_rows()..self.rows_amount),
        ]
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) {
        self.check_input(input, start_row);
        let prev_col = self.layout.witness[0];
        let last_acc_col = self.layout.witness[2 * self.steps_per_row()];
        let sign_row = start_row + self.ladder_rows();

        for row in start_row + 1..sign_row {
            circuit.add_copy_constraint(
                Variable::witness_at(prev_col, row),
                Variable::witness_at(last_acc_col, row - 1),
            );
        }
        for s in 0..self.n {
            let (row, bit_col, _) = self.step(s);
            circuit.add_copy_constraint(
                input.bits[self.n - 1 - s],
                Variable::witness_at(bit_col, start_row + row),
            );
        }
        circuit.add_copy_constraint(
            Variable::witness_at(prev_col, start_row),
            Variable::constant_at(self.constant_column(), sign_row),
        );
        let (row, _, acc_col) = self.step(self.n - 1);
        circuit.add_copy_constraint(
            Variable::witness_at(acc_col, start_row + row),
            Variable::witness_at(self.layout.witness[0], sign_row),
        );
        circuit.add_copy_constraint(input.x, Variable::witness_at(self.layout.witness[1], sign_row));
    }

    fn output(&self, _input: &Self::Input, start_row: usize) -> Self::Output {
        let sign_row = start_row + self.ladder_rows();
        XIndexOutput {
            tmp: Variable::witness_at(self.layout.witness[0], sign_row),
            sign: Variable::witness_at(self.layout.witness[2], sign_row),
        }
    }
}
