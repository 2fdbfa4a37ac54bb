use crate::plonk::component::{ColumnLayout, Component, Manifest, SelectorSpan, WitnessAmount};
use crate::plonk::constraint_system::{
    range_table, AssignmentTable, Circuit, Expression, LookupConstraint, Variable,
    RANGE_TABLE_MAX_BITS,
};
use blueprint_algebra::prelude::*;
use num_integer::Integer;

/// Checks that each of `n` values fits in `chunks * chunk_bits` bits.
///
/// Each value takes a slot `[x, l_0, …, l_{chunks-1}]` of little-endian limbs,
/// with `witness_amount / (chunks + 1)` slots per row. A gate recomposes `x`
/// from its limbs and a lookup gate checks every limb against the
/// `chunk_bits`-bit range table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCheck {
    n: usize,
    chunk_bits: usize,
    chunks: usize,
    layout: ColumnLayout,
    rows_amount: usize,
}

impl RangeCheck {
    /// The columns a range check with `chunks` limbs needs.
    pub fn manifest(chunks: usize) -> Manifest {
        Manifest::new(WitnessAmount::AtLeast(chunks + 1), 0, 0)
    }

    /// Rows taken by `n` values of `chunks` limbs over `witness_amount` columns.
    pub fn rows_amount(witness_amount: usize, n: usize, chunks: usize) -> usize {
        Self::manifest(chunks).check_witness_amount("range_check", witness_amount);
        Integer::div_ceil(&n, &(witness_amount / (chunks + 1)))
    }

    /// Create a range check of `n` values on `layout`.
    pub fn new(n: usize, chunk_bits: usize, chunks: usize, layout: ColumnLayout) -> Self {
        assert!(n > 0, "a range check needs at least one value");
        assert!(
            chunk_bits > 0 && chunk_bits <= RANGE_TABLE_MAX_BITS,
            "range check limbs of {} bits are not supported",
            chunk_bits
        );
        assert!(chunks > 0, "a range check needs at least one limb");
        Self::manifest(chunks).validate("range_check", &layout);
        let rows_amount = Self::rows_amount(layout.witness_amount(), n, chunks);
        Self {
            n,
            chunk_bits,
            chunks,
            layout,
            rows_amount,
        }
    }

    /// The number of bits every value must fit in.
    pub fn bits(&self) -> usize {
        self.chunk_bits * self.chunks
    }

    fn per_row(&self) -> usize {
        self.layout.witness_amount() / (self.chunks + 1)
    }

    /// The row offset and the columns `[x, l_0, …]` of slot `i`.
    fn slot(&self, i: usize) -> (usize, &[usize]) {
        let (row, j) = i.div_rem(&self.per_row());
        let width = self.chunks + 1;
        (row, &self.layout.witness[j * width..(j + 1) * width])
    }

    fn check_input<F: Scalar>(&self, input: &[Variable], start_row: usize) {
        let context = <Self as Component<F>>::describe(self);
        assert_eq!(
            input.len(),
            self.n,
            "{} at rows {}..{}: wrong number of values",
            context,
            start_row,
            start_row + self.rows_amount
        );
        assert!(
            self.bits() <= F::capacity(),
            "{}: {} bits exceed the field capacity",
            context,
            self.bits()
        );
    }

    fn limbs<F: Scalar>(&self, value: F, i: usize, start_row: usize) -> Vec<F> {
        let bits = value.to_bits_le(self.bits()).unwrap_or_else(|_| {
            panic!(
                "{} at rows {}..{}: value {} of input {} does not fit in {} bits",
                <Self as Component<F>>::describe(self),
                start_row,
                start_row + self.rows_amount,
                value,
                i,
                self.bits()
            )
        });
        bits.chunks(self.chunk_bits)
            .map(|chunk| {
                let limb = chunk
                    .iter()
                    .rev()
                    .fold(0u64, |acc, bit| (acc << 1) | u64::from(*bit));
                F::from(limb)
            })
            .collect()
    }
}

impl<F: Scalar> Component<F> for RangeCheck {
    type Input = Vec<Variable>;
    type Output = Vec<Vec<Variable>>;

    fn name(&self) -> &'static str {
        "range_check"
    }

    fn parameters(&self) -> String {
        format!(
            "n={}, chunk_bits={}, chunks={}, witness={}",
            self.n,
            self.chunk_bits,
            self.chunks,
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
        self.check_input::<F>(input, start_row);
        for i in 0..self.rows_amount * self.per_row() {
            let (row, columns) = self.slot(i);
            let (x, limbs) = match input.get(i) {
                Some(var) => {
                    let x = assignment.value(var);
                    (x, self.limbs(x, i, start_row))
                }
                None => (F::zero(), vec![F::zero(); self.chunks]),
            };
            assignment.set_witness(columns[0], start_row + row, x);
            for (col, limb) in columns[1..].iter().zip(limbs) {
                assignment.set_witness(*col, start_row + row, limb);
            }
        }
        Component::<F>::output(self, input, start_row)
    }

    fn generate_gates(&self, circuit: &mut Circuit<F>, _input: &Self::Input) -> Vec<SelectorSpan> {
        let table_id = circuit.register_lookup_table(range_table(self.chunk_bits));
        let shifts: Vec<F> = (0..self.chunks)
            .map(|l| pow_u64(F::from(2u32), (l * self.chunk_bits) as u64))
            .collect();

        let mut recompose = Vec::with_capacity(self.per_row());
        let mut lookups: Vec<LookupConstraint<F>> =
            Vec::with_capacity(self.per_row() * self.chunks);
        for j in 0..self.per_row() {
            let (_, columns) = self.slot(j);
            let x: Expression<F> = Variable::witness(columns[0], 0).into();
            let sum: Expression<F> = columns[1..]
                .iter()
                .zip(shifts.iter())
                .map(|(col, shift)| {
                    Expression::from(Variable::witness(*col, 0)) * Expression::constant(*shift)
                })
                .sum();
            recompose.push(x - sum);
            for col in &columns[1..] {
                lookups.push(LookupConstraint::new(
                    table_id,
                    vec![Variable::witness(*col, 0).into()],
                ));
            }
        }
        let gate = circuit.add_gate(recompose);
        let lookup_gate = circuit.add_lookup_gate(lookups);
        vec![
            SelectorSpan::new(gate, 0..self.rows_amount),
            SelectorSpan::new(lookup_gate, 0..self.rows_amount),
        ]
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) {
        self.check_input::<F>(input, start_row);
        for (i, var) in input.iter().enumerate() {
            let (row, columns) = self.slot(i);
            circuit.add_copy_constraint(*var, Variable::witness_at(columns[0], start_row + row));
        }
    }

    fn output(&self, input: &Self::Input, start_row: usize) -> Self::Output {
        (0..input.len())
            .map(|i| {
                let (row, columns) = self.slot(i);
                columns[1..]
                    .iter()
                    .map(|col| Variable::witness_at(*col, start_row + row))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::plonk::checker::{check, Unsatisfied};
    use crate::plonk::constraint_system::TableShape;
    use blueprint_algebra::{baby_bear::BabyBearScalar, bn254::BN254Scalar};

    type F = BN254Scalar;

    fn place(
        values: &[u64],
        chunk_bits: usize,
        chunks: usize,
        witness: usize,
    ) -> (Circuit<F>, AssignmentTable<F>, Vec<Vec<Variable>>) {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::new(TableShape::new(witness, 1, 0));
        let input: Vec<Variable> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                table.set_public_input(0, i, F::from(*v));
                Variable::public_input_at(0, i)
            })
            .collect();
        let component = RangeCheck::new(
            values.len(),
            chunk_bits,
            chunks,
            ColumnLayout::contiguous(witness, 0, 0),
        );
        let limbs = component.generate_assignments(&mut table, &input, 0);
        component.generate_circuit(&mut circuit, &mut table, &input, 0);
        (circuit, table, limbs)
    }

    #[test]
    fn test_rows_amount() {
        assert_eq!(RangeCheck::rows_amount(5, 3, 4), 3);
        assert_eq!(RangeCheck::rows_amount(10, 3, 4), 2);
        assert_eq!(RangeCheck::rows_amount(15, 3, 4), 1);
    }

    #[test]
    #[should_panic(expected = "range_check: 4 witness columns do not fit")]
    fn test_rows_amount_below_manifest() {
        RangeCheck::rows_amount(4, 1, 4);
    }

    #[test]
    fn test_limbs() {
        // 0xbeef in 4-bit limbs, little endian
        let (circuit, table, limbs) = place(&[0xbeef, 7], 4, 4, 10);
        let values: Vec<F> = limbs[0].iter().map(|v| table.value(v)).collect();
        assert_eq!(
            values,
            vec![F::from(0xfu32), F::from(0xeu32), F::from(0xeu32), F::from(0xbu32)]
        );
        assert_eq!(table.value(&limbs[1][0]), F::from(7u32));
        assert_eq!(table.value(&limbs[1][3]), F::zero());
        assert_eq!(check(&circuit, &table), Ok(()));
    }

    #[test]
    fn test_trailing_slots() {
        // three values, two slots per row: the last slot is zero filled
        let (circuit, table, _) = place(&[1, 2, 3], 8, 2, 7);
        // the public inputs reach one row past the component
        assert_eq!(table.rows_amount(), 3);
        assert_eq!(table.value(&Variable::witness_at(3, 1)), F::zero());
        assert_eq!(check(&circuit, &table), Ok(()));
        assert_eq!(circuit.lookup_gates().len(), 1);
        assert_eq!(circuit.lookup_gates()[0].constraints.len(), 4);
    }

    #[test]
    fn test_value_at_field_capacity() {
        type G = BabyBearScalar;
        assert_eq!(G::capacity(), 30);
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<G>::new(TableShape::new(4, 1, 0));
        table.set_public_input(0, 0, G::from((1u64 << 30) - 1));
        let input = vec![Variable::public_input_at(0, 0)];
        let component = RangeCheck::new(1, 10, 3, ColumnLayout::contiguous(4, 0, 0));
        let limbs = component.generate_assignments(&mut table, &input, 0);
        component.generate_circuit(&mut circuit, &mut table, &input, 0);
        assert!(limbs[0].iter().all(|l| table.value(l) == G::from(1023u32)));
        assert_eq!(check(&circuit, &table), Ok(()));
    }

    #[test]
    #[should_panic(expected = "value 256 of input 1 does not fit in 8 bits")]
    fn test_oversized_value() {
        place(&[3, 256], 4, 2, 3);
    }

    #[test]
    fn test_forged_limb_fails_lookup() {
        let (circuit, mut table, limbs) = place(&[0x12], 4, 2, 3);
        // 0x12 = 2 + 16 * 1 = 18 + 16 * 0: recomposition holds, the limb is out of range
        table.set_witness(1, 0, F::from(18u32));
        table.set_witness(2, 0, F::zero());
        assert_eq!(limbs[0][0], Variable::witness_at(1, 0));
        match check(&circuit, &table) {
            Err(Unsatisfied::Lookup {
                row,
                table_name,
                tuple,
                ..
            }) => {
                assert_eq!(row, 0);
                assert_eq!(table_name, "range_4");
                assert_eq!(tuple, vec![F::from(18u32)]);
            }
            other => panic!("expected a lookup failure, got {:?}", other),
        }
    }
}
