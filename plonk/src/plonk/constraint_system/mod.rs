//! Variables, expressions, gates, lookup tables, the circuit and the assignment table.

mod assignment;
mod circuit;
mod expression;
mod gate;
mod lookup;
mod variable;

pub use assignment::{AssignmentTable, TableDescription, TableShape};
pub use circuit::Circuit;
pub use expression::Expression;
pub use gate::{CopyConstraint, Gate, LookupConstraint, LookupGate};
pub use lookup::{range_table, xor_table, LookupTable, RANGE_TABLE_MAX_BITS, XOR_TABLE_MAX_BITS};
pub use variable::{ColumnKind, Rotation, Variable};
