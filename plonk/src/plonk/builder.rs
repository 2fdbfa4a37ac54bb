//! Places components on consecutive rows of one table.

use crate::plonk::checker::{self, Unsatisfied};
use crate::plonk::component::Component;
use crate::plonk::constraint_system::{
    AssignmentTable, Circuit, TableDescription, TableShape, Variable,
};
use ark_std::{end_timer, start_timer};
use blueprint_algebra::prelude::*;

/// Owns a circuit, its assignment and the next free row.
///
/// Public inputs are appended to public input column 0, independently of the
/// component rows.
#[derive(Clone, Debug)]
pub struct CircuitBuilder<F> {
    circuit: Circuit<F>,
    assignment: AssignmentTable<F>,
    cursor: usize,
    public_inputs: usize,
}

impl<F: Scalar> CircuitBuilder<F> {
    /// Create a builder over an empty table of the given shape.
    pub fn new(shape: TableShape) -> Self {
        Self {
            circuit: Circuit::new(),
            assignment: AssignmentTable::new(shape),
            cursor: 0,
            public_inputs: 0,
        }
    }

    /// Append a public input and return its cell.
    pub fn public_input(&mut self, value: F) -> Variable {
        assert!(
            self.assignment.shape().public_input > 0,
            "the table has no public input column"
        );
        let row = self.public_inputs;
        self.assignment.set_public_input(0, row, value);
        self.public_inputs += 1;
        Variable::public_input_at(0, row)
    }

    /// Place `component` at the next free row and return its output.
    ///
    /// Panics unless the witness and constant rows the component writes span
    /// exactly its declared rows, or if its circuit output disagrees with its
    /// assignment output.
    pub fn add_component<C: Component<F>>(&mut self, component: &C, input: &C::Input) -> C::Output {
        let start_row = self.cursor;
        let rows_amount = component.rows_amount();
        let end_row = start_row + rows_amount;
        log::trace!(
            "placing {} at rows {}..{}",
            component.describe(),
            start_row,
            end_row
        );
        let place_time = start_timer!(|| format!("Place {}", component.describe()));

        self.assignment.mark_writes();
        let output = component.generate_assignments(&mut self.assignment, input, start_row);
        let written = self.assignment.rows_written_since_mark();
        let declared = Some(start_row..end_row).filter(|rows| !rows.is_empty());
        assert!(
            written == declared,
            "{} declares rows {}..{} but wrote {}",
            component.describe(),
            start_row,
            end_row,
            match written {
                Some(rows) => format!("rows {}..{}", rows.start, rows.end),
                None => "no rows".into(),
            }
        );

        let circuit_output =
            component.generate_circuit(&mut self.circuit, &mut self.assignment, input, start_row);
        assert_eq!(
            output,
            circuit_output,
            "{} at rows {}..{}: assignment and circuit outputs differ",
            component.describe(),
            start_row,
            end_row
        );
        self.cursor = end_row;
        end_timer!(place_time);

        #[cfg(feature = "debug")]
        if let Err(failure) = self.check() {
            panic!(
                "{} at rows {}..{} left the circuit unsatisfied: {}",
                component.describe(),
                start_row,
                end_row,
                failure
            );
        }

        output
    }

    /// The next free row.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The circuit built so far.
    pub fn circuit(&self) -> &Circuit<F> {
        &self.circuit
    }

    /// The circuit built so far, for registering tables or gates by hand.
    pub fn circuit_mut(&mut self) -> &mut Circuit<F> {
        &mut self.circuit
    }

    /// The assignment built so far.
    pub fn assignment(&self) -> &AssignmentTable<F> {
        &self.assignment
    }

    /// The assignment built so far, for writing cells by hand.
    pub fn assignment_mut(&mut self) -> &mut AssignmentTable<F> {
        &mut self.assignment
    }

    /// The dimensions a proving backend would see.
    pub fn table_description(&self) -> TableDescription {
        self.assignment.table_description()
    }

    /// Check the circuit against the assignment.
    pub fn check(&self) -> Result<(), Unsatisfied<F>> {
        checker::check(&self.circuit, &self.assignment)
    }

    /// Hand over the circuit and its assignment.
    pub fn finalize(self) -> (Circuit<F>, AssignmentTable<F>) {
        (self.circuit, self.assignment)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::plonk::component::{
        ArithmeticBatch, ArithmeticOp, ColumnLayout, RangeCheck, SelectorSpan, XIndex,
        XIndexInput,
    };
    use blueprint_algebra::baby_bear::BabyBearScalar;

    type F = BabyBearScalar;

    #[test]
    fn test_compose() {
        let mut builder = CircuitBuilder::<F>::new(TableShape::new(9, 1, 1));
        let a = builder.public_input(F::from(6u32));
        let b = builder.public_input(F::from(7u32));

        let mul = ArithmeticBatch::new(
            ArithmeticOp::Multiplication,
            1,
            ColumnLayout::contiguous(9, 0, 0),
        );
        let product = builder.add_component(&mul, &vec![(a, b)]);
        assert_eq!(builder.cursor(), 1);

        let add = ArithmeticBatch::new(ArithmeticOp::Addition, 2, ColumnLayout::contiguous(9, 0, 0));
        let sums = builder.add_component(&add, &vec![(product[0], a), (product[0], b)]);
        assert_eq!(builder.assignment().value(&sums[1]), F::from(49u32));

        let range = RangeCheck::new(2, 4, 2, ColumnLayout::contiguous(9, 0, 0));
        builder.add_component(&range, &sums);
        assert_eq!(builder.cursor(), 3);

        assert_eq!(builder.check(), Ok(()));
        assert_eq!(builder.circuit().gates().len(), 3);
        let description = builder.table_description();
        assert_eq!(description.usable_rows_amount, 3);
        assert_eq!(description.rows_amount, 4);

        let (circuit, assignment) = builder.finalize();
        assert!(checker::is_satisfied(&circuit, &assignment));
    }

    #[test]
    fn test_x_index_after_batch() {
        let mut builder = CircuitBuilder::<F>::new(TableShape::new(5, 1, 1));
        let x = builder.public_input(F::from(25u32));
        let bits = vec![builder.public_input(F::one()), builder.public_input(F::zero())];
        let one = builder.public_input(F::one());
        let mul = ArithmeticBatch::new(
            ArithmeticOp::Multiplication,
            1,
            ColumnLayout::contiguous(5, 0, 0),
        );
        let scaled = builder.add_component(&mul, &vec![(x, one)]);
        let x_index = XIndex::new(2, F::from(5u32), ColumnLayout::contiguous(5, 1, 0));
        let output = builder.add_component(
            &x_index,
            &XIndexInput {
                x: scaled[0],
                bits,
            },
        );
        assert_eq!(builder.cursor(), 3);
        assert_eq!(builder.assignment().value(&output.sign), F::one());
        assert_eq!(builder.check(), Ok(()));
    }

    /// Claims one row but writes two.
    struct Overflowing;

    impl Component<F> for Overflowing {
        type Input = ();
        type Output = ();

        fn name(&self) -> &'static str {
            "overflowing"
        }

        fn parameters(&self) -> String {
            String::new()
        }

        fn layout(&self) -> &ColumnLayout {
            unimplemented!()
        }

        fn rows_amount(&self) -> usize {
            1
        }

        fn generate_assignments(&self, assignment: &mut AssignmentTable<F>, _: &(), start: usize) {
            assignment.set_witness(0, start + 1, F::one());
        }

        fn generate_gates(&self, _: &mut Circuit<F>, _: &()) -> Vec<SelectorSpan> {
            vec![]
        }

        fn generate_copy_constraints(&self, _: &mut Circuit<F>, _: &(), _: usize) {}

        fn output(&self, _: &(), _: usize) {}
    }

    /// Claims one row and also rewrites the row before it.
    struct Clobbering;

    impl Component<F> for Clobbering {
        type Input = ();
        type Output = ();

        fn name(&self) -> &'static str {
            "clobbering"
        }

        fn parameters(&self) -> String {
            String::new()
        }

        fn layout(&self) -> &ColumnLayout {
            unimplemented!()
        }

        fn rows_amount(&self) -> usize {
            1
        }

        fn generate_assignments(&self, assignment: &mut AssignmentTable<F>, _: &(), start: usize) {
            assignment.set_witness(0, start - 1, F::from(99u32));
            assignment.set_witness(0, start, F::one());
        }

        fn generate_gates(&self, _: &mut Circuit<F>, _: &()) -> Vec<SelectorSpan> {
            vec![]
        }

        fn generate_copy_constraints(&self, _: &mut Circuit<F>, _: &(), _: usize) {}

        fn output(&self, _: &(), _: usize) {}
    }

    #[test]
    #[should_panic(expected = "overflowing() declares rows 0..1 but wrote rows 1..2")]
    fn test_row_budget_violation() {
        let mut builder = CircuitBuilder::<F>::new(TableShape::new(1, 0, 0));
        builder.add_component(&Overflowing, &());
    }

    #[test]
    #[should_panic(expected = "clobbering() declares rows 1..2 but wrote rows 0..2")]
    fn test_write_into_previous_component() {
        let mut builder = CircuitBuilder::<F>::new(TableShape::new(3, 1, 0));
        let a = builder.public_input(F::from(3u32));
        let mul = ArithmeticBatch::new(
            ArithmeticOp::Multiplication,
            1,
            ColumnLayout::contiguous(3, 0, 0),
        );
        builder.add_component(&mul, &vec![(a, a)]);
        builder.add_component(&Clobbering, &());
    }

    #[test]
    fn test_hand_written_cells_past_the_cursor() {
        let mut builder = CircuitBuilder::<F>::new(TableShape::new(3, 1, 0));
        builder.assignment_mut().set_witness(2, 10, F::from(5u32));
        let a = builder.public_input(F::from(3u32));
        let mul = ArithmeticBatch::new(
            ArithmeticOp::Multiplication,
            1,
            ColumnLayout::contiguous(3, 0, 0),
        );
        let product = builder.add_component(&mul, &vec![(a, a)]);
        assert_eq!(builder.cursor(), 1);
        assert_eq!(builder.assignment().value(&product[0]), F::from(9u32));
    }

    #[test]
    #[should_panic(expected = "the table has no public input column")]
    fn test_public_input_without_column() {
        CircuitBuilder::<F>::new(TableShape::new(1, 0, 0)).public_input(F::one());
    }
}
