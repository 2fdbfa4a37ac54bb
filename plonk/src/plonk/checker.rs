//! Satisfiability checking of an assignment against a circuit.
//!
//! Gates are checked first, in registration order, then lookup gates, then copy
//! constraints. The first failure is returned with enough context to locate it.

use crate::errors::PlonkError;
use crate::plonk::constraint_system::{
    AssignmentTable, Circuit, ColumnKind, Expression, LookupTable, Variable,
};
use ark_std::{collections::BTreeSet, end_timer, error, fmt, start_timer};
use blueprint_algebra::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How many valid tuples a lookup failure prints.
const SHOWN_TABLE_ROWS: usize = 16;

/// The first constraint an assignment violates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unsatisfied<F> {
    /// A gate constraint is nonzero.
    Gate {
        /// Position of the gate in the circuit.
        gate_index: usize,
        /// The gate's selector.
        selector_index: usize,
        /// Position of the constraint in the gate.
        constraint_index: usize,
        /// The row it was evaluated at.
        row: usize,
        /// The constraint.
        constraint: Expression<F>,
        /// Its value, expected to be zero.
        value: F,
    },
    /// A looked-up tuple is missing from its table.
    Lookup {
        /// Position of the lookup gate in the circuit.
        gate_index: usize,
        /// The lookup gate's selector.
        selector_index: usize,
        /// Position of the constraint in the lookup gate.
        constraint_index: usize,
        /// The row it was evaluated at.
        row: usize,
        /// The table looked into.
        table_id: usize,
        /// The table's name.
        table_name: String,
        /// The tuple that was looked up.
        tuple: Vec<F>,
        /// The table's tuples, sorted.
        table_rows: Vec<Vec<F>>,
    },
    /// The two cells of a copy constraint differ.
    Copy {
        /// Position of the copy constraint in the circuit.
        index: usize,
        /// One endpoint.
        left: Variable,
        /// The other endpoint.
        right: Variable,
        /// The value at `left`.
        left_value: F,
        /// The value at `right`.
        right_value: F,
    },
    /// An expression could not be evaluated, e.g. a rotation left the table.
    Evaluation {
        /// The selector of the gate or tagged table being evaluated.
        selector_index: usize,
        /// The row it was evaluated at.
        row: usize,
        /// The cause.
        error: PlonkError,
    },
}

fn fmt_tuple<F: Scalar>(f: &mut fmt::Formatter<'_>, tuple: &[F]) -> fmt::Result {
    write!(f, "(")?;
    for (i, value) in tuple.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    write!(f, ")")
}

impl<F: Scalar> fmt::Display for Unsatisfied<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsatisfied::Gate {
                gate_index,
                selector_index,
                constraint_index,
                row,
                constraint,
                value,
            } => write!(
                f,
                "gate {} (selector {}) constraint {} at row {}: {} evaluates to {}, expected 0",
                gate_index, selector_index, constraint_index, row, constraint, value
            ),
            Unsatisfied::Lookup {
                gate_index,
                selector_index,
                constraint_index,
                row,
                table_id,
                table_name,
                tuple,
                table_rows,
            } => {
                write!(
                    f,
                    "lookup gate {} (selector {}) constraint {} at row {}: ",
                    gate_index, selector_index, constraint_index, row
                )?;
                fmt_tuple(f, tuple)?;
                write!(
                    f,
                    " is not in table {} (id {}) of {} tuples: ",
                    table_name,
                    table_id,
                    table_rows.len()
                )?;
                for (i, valid) in table_rows.iter().take(SHOWN_TABLE_ROWS).enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    fmt_tuple(f, valid)?;
                }
                if table_rows.len() > SHOWN_TABLE_ROWS {
                    write!(f, " ...")?;
                }
                Ok(())
            }
            Unsatisfied::Copy {
                index,
                left,
                right,
                left_value,
                right_value,
            } => write!(
                f,
                "copy constraint {}: {} = {} but {} = {}",
                index, left, left_value, right, right_value
            ),
            Unsatisfied::Evaluation {
                selector_index,
                row,
                error,
            } => write!(f, "selector {} at row {}: {}", selector_index, row, error),
        }
    }
}

impl<F: Scalar> error::Error for Unsatisfied<F> {}

/// The rows on which `selector` is nonzero.
fn enabled_rows<F: Scalar>(assignment: &AssignmentTable<F>, selector: usize) -> Vec<usize> {
    assignment
        .columns(ColumnKind::Selector)
        .get(selector)
        .map(|column| {
            column
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_zero())
                .map(|(row, _)| row)
                .collect()
        })
        .unwrap_or_default()
}

/// The result of `f` on the lowest row where it is `Some`.
fn first_failure<R, T>(rows: &[usize], f: T) -> Option<R>
where
    R: Send,
    T: Fn(usize) -> Option<R> + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        rows.par_iter().find_map_first(|row| f(*row))
    }
    #[cfg(not(feature = "parallel"))]
    {
        rows.iter().find_map(|row| f(*row))
    }
}

fn check_gates<F: Scalar>(
    circuit: &Circuit<F>,
    assignment: &AssignmentTable<F>,
) -> Result<(), Unsatisfied<F>> {
    for (gate_index, gate) in circuit.gates().iter().enumerate() {
        let rows = enabled_rows(assignment, gate.selector_index);
        let failure = first_failure(&rows, |row| {
            for (constraint_index, constraint) in gate.constraints.iter().enumerate() {
                match assignment.evaluate(constraint, row) {
                    Ok(value) if value.is_zero() => {}
                    Ok(value) => {
                        return Some(Unsatisfied::Gate {
                            gate_index,
                            selector_index: gate.selector_index,
                            constraint_index,
                            row,
                            constraint: constraint.clone(),
                            value,
                        })
                    }
                    Err(error) => {
                        return Some(Unsatisfied::Evaluation {
                            selector_index: gate.selector_index,
                            row,
                            error,
                        })
                    }
                }
            }
            None
        });
        if let Some(failure) = failure {
            return Err(failure);
        }
    }
    Ok(())
}

/// The tuples of every table; dynamic tables are read from the rows their tag enables.
fn materialize_tables<F: Scalar>(
    circuit: &Circuit<F>,
    assignment: &AssignmentTable<F>,
) -> Result<Vec<BTreeSet<Vec<F>>>, Unsatisfied<F>> {
    let mut tables = Vec::with_capacity(circuit.lookup_tables().len());
    for table in circuit.lookup_tables() {
        let tuples: BTreeSet<Vec<F>> = match table {
            LookupTable::Static { rows, .. } => rows.iter().cloned().collect(),
            LookupTable::Dynamic {
                tag_selector,
                columns,
                ..
            } => {
                let mut tuples = BTreeSet::new();
                for row in enabled_rows(assignment, *tag_selector) {
                    let tuple = columns
                        .iter()
                        .map(|column| assignment.evaluate(column, row))
                        .collect::<Result<Vec<F>, PlonkError>>()
                        .map_err(|error| Unsatisfied::Evaluation {
                            selector_index: *tag_selector,
                            row,
                            error,
                        })?;
                    tuples.insert(tuple);
                }
                tuples
            }
        };
        tables.push(tuples);
    }
    Ok(tables)
}

fn check_lookups<F: Scalar>(
    circuit: &Circuit<F>,
    assignment: &AssignmentTable<F>,
) -> Result<(), Unsatisfied<F>> {
    if circuit.lookup_gates().is_empty() {
        return Ok(());
    }
    let tables = materialize_tables(circuit, assignment)?;
    for (gate_index, gate) in circuit.lookup_gates().iter().enumerate() {
        let rows = enabled_rows(assignment, gate.selector_index);
        let failure = first_failure(&rows, |row| {
            for (constraint_index, constraint) in gate.constraints.iter().enumerate() {
                let tuple = constraint
                    .lookup_input
                    .iter()
                    .map(|e| assignment.evaluate(e, row))
                    .collect::<Result<Vec<F>, PlonkError>>();
                let tuple = match tuple {
                    Ok(tuple) => tuple,
                    Err(error) => {
                        return Some(Unsatisfied::Evaluation {
                            selector_index: gate.selector_index,
                            row,
                            error,
                        })
                    }
                };
                let table = &tables[constraint.table_id];
                if !table.contains(&tuple) {
                    return Some(Unsatisfied::Lookup {
                        gate_index,
                        selector_index: gate.selector_index,
                        constraint_index,
                        row,
                        table_id: constraint.table_id,
                        table_name: circuit
                            .table_name(constraint.table_id)
                            .unwrap_or_default()
                            .into(),
                        tuple,
                        table_rows: table.iter().cloned().collect(),
                    });
                }
            }
            None
        });
        if let Some(failure) = failure {
            return Err(failure);
        }
    }
    Ok(())
}

fn check_copies<F: Scalar>(
    circuit: &Circuit<F>,
    assignment: &AssignmentTable<F>,
) -> Result<(), Unsatisfied<F>> {
    for (index, copy) in circuit.copy_constraints().iter().enumerate() {
        let left_value = assignment.value(&copy.left);
        let right_value = assignment.value(&copy.right);
        if left_value != right_value {
            return Err(Unsatisfied::Copy {
                index,
                left: copy.left,
                right: copy.right,
                left_value,
                right_value,
            });
        }
    }
    Ok(())
}

/// Check every gate, lookup and copy constraint of `circuit` against `assignment`.
pub fn check<F: Scalar>(
    circuit: &Circuit<F>,
    assignment: &AssignmentTable<F>,
) -> Result<(), Unsatisfied<F>> {
    let check_time = start_timer!(|| format!(
        "Check {} gates, {} lookup gates, {} copy constraints",
        circuit.gates().len(),
        circuit.lookup_gates().len(),
        circuit.copy_constraints().len()
    ));
    let result = check_gates(circuit, assignment)
        .and_then(|_| check_lookups(circuit, assignment))
        .and_then(|_| check_copies(circuit, assignment));
    end_timer!(check_time);
    result
}

/// Like [`check`], logging the failure instead of returning it.
pub fn is_satisfied<F: Scalar>(circuit: &Circuit<F>, assignment: &AssignmentTable<F>) -> bool {
    match check(circuit, assignment) {
        Ok(()) => true,
        Err(failure) => {
            log::warn!("unsatisfied circuit: {}", failure);
            false
        }
    }
}
