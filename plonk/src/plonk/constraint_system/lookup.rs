use crate::plonk::constraint_system::Expression;
use blueprint_algebra::prelude::*;

/// The largest `bits` accepted by [`range_table`].
pub const RANGE_TABLE_MAX_BITS: usize = 20;
/// The largest `bits` accepted by [`xor_table`].
pub const XOR_TABLE_MAX_BITS: usize = 8;

/// A set of valid tuples that lookup constraints are checked against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupTable<F> {
    /// A table fixed by the circuit.
    Static {
        /// The registry name.
        name: String,
        /// Tuple width.
        width: usize,
        /// The valid tuples.
        rows: Vec<Vec<F>>,
    },
    /// A table read from the assignment: the column tuple at every row where
    /// `tag_selector` is nonzero.
    Dynamic {
        /// The registry name.
        name: String,
        /// The selector marking the rows that belong to the table.
        tag_selector: usize,
        /// One expression per tuple entry.
        columns: Vec<Expression<F>>,
    },
}

impl<F: Scalar> LookupTable<F> {
    /// Build a static table; panics if a row does not have `width` entries.
    pub fn new_static(name: &str, width: usize, rows: Vec<Vec<F>>) -> Self {
        assert!(width > 0, "lookup table {} has no columns", name);
        if let Some(bad) = rows.iter().position(|row| row.len() != width) {
            panic!(
                "lookup table {}: row {} has {} entries, expected {}",
                name,
                bad,
                rows[bad].len(),
                width
            );
        }
        LookupTable::Static {
            name: name.into(),
            width,
            rows,
        }
    }

    /// Build a dynamic table.
    pub fn new_dynamic(name: &str, tag_selector: usize, columns: Vec<Expression<F>>) -> Self {
        assert!(!columns.is_empty(), "lookup table {} has no columns", name);
        LookupTable::Dynamic {
            name: name.into(),
            tag_selector,
            columns: columns.iter().map(|c| c.canonical()).collect(),
        }
    }

    /// The registry name.
    pub fn name(&self) -> &str {
        match self {
            LookupTable::Static { name, .. } | LookupTable::Dynamic { name, .. } => name,
        }
    }

    /// The tuple width.
    pub fn width(&self) -> usize {
        match self {
            LookupTable::Static { width, .. } => *width,
            LookupTable::Dynamic { columns, .. } => columns.len(),
        }
    }
}

/// The single-column table `0, 1, …, 2^bits - 1`.
pub fn range_table<F: Scalar>(bits: usize) -> LookupTable<F> {
    assert!(
        bits > 0 && bits <= RANGE_TABLE_MAX_BITS,
        "range table of {} bits is not supported",
        bits
    );
    let rows = (0..1u64 << bits).map(|v| vec![F::from(v)]).collect();
    LookupTable::new_static(&format!("range_{}", bits), 1, rows)
}

/// The table of `(a, b, a ^ b)` over `bits`-bit operands.
pub fn xor_table<F: Scalar>(bits: usize) -> LookupTable<F> {
    assert!(
        bits > 0 && bits <= XOR_TABLE_MAX_BITS,
        "xor table of {} bits is not supported",
        bits
    );
    let size = 1u64 << bits;
    let rows = (0..size)
        .cartesian_product(0..size)
        .map(|(a, b)| vec![F::from(a), F::from(b), F::from(a ^ b)])
        .collect();
    LookupTable::new_static(&format!("xor_{}", bits), 3, rows)
}

#[cfg(test)]
mod test {
    use super::*;
    use blueprint_algebra::baby_bear::BabyBearScalar;

    type F = BabyBearScalar;

    #[test]
    fn test_range_table() {
        let table = range_table::<F>(4);
        assert_eq!(table.name(), "range_4");
        assert_eq!(table.width(), 1);
        match table {
            LookupTable::Static { rows, .. } => {
                assert_eq!(rows.len(), 16);
                assert_eq!(rows[15], vec![F::from(15u32)]);
            }
            _ => panic!("range table should be static"),
        }
    }

    #[test]
    fn test_xor_table() {
        let table = xor_table::<F>(2);
        assert_eq!(table.width(), 3);
        match table {
            LookupTable::Static { rows, .. } => {
                assert_eq!(rows.len(), 16);
                assert!(rows.contains(&vec![F::from(1u32), F::from(3u32), F::from(2u32)]));
                assert!(!rows.contains(&vec![F::from(1u32), F::from(3u32), F::from(3u32)]));
            }
            _ => panic!("xor table should be static"),
        }
    }

    #[test]
    #[should_panic(expected = "row 1 has 2 entries, expected 1")]
    fn test_static_table_width_mismatch() {
        LookupTable::new_static("bad", 1, vec![vec![F::zero()], vec![F::zero(), F::one()]]);
    }
}
