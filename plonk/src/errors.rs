use crate::plonk::constraint_system::Variable;
use ark_std::{error, fmt};
use blueprint_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, PlonkError>;

#[derive(Debug, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum PlonkError {
    /// Algebra error.
    Algebra(AlgebraError),
    /// A rotated variable points before the first row or past the table.
    RowOutOfRange {
        variable: Variable,
        row: usize,
        rows_amount: usize,
    },
    /// No lookup table registered under this id.
    UnknownTable(usize),
    /// No gate registered under this selector.
    UnknownSelector(usize),
}

impl fmt::Display for PlonkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlonkError::*;
        match self {
            Algebra(e) => write!(f, "Algebra: {}", e),
            RowOutOfRange {
                variable,
                row,
                rows_amount,
            } => write!(
                f,
                "{} evaluated at row {} falls outside the table of {} rows",
                variable, row, rows_amount
            ),
            UnknownTable(id) => write!(f, "Lookup table {} is not registered", id),
            UnknownSelector(id) => write!(f, "Selector {} has no gate", id),
        }
    }
}

impl error::Error for PlonkError {}

impl From<AlgebraError> for PlonkError {
    fn from(e: AlgebraError) -> PlonkError {
        PlonkError::Algebra(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blueprint_algebra::{baby_bear::BabyBearScalar, prelude::Scalar};

    fn low_bits(value: BabyBearScalar, n_bits: usize) -> Result<Vec<bool>> {
        Ok(value.to_bits_le(n_bits)?)
    }

    #[test]
    fn test_algebra_error_converts() {
        assert_eq!(
            low_bits(BabyBearScalar::from(5u32), 3),
            Ok(vec![true, false, true])
        );
        let err = low_bits(BabyBearScalar::from(300u32), 8).unwrap_err();
        assert_eq!(err, PlonkError::Algebra(AlgebraError::BitConversionError));
        assert_eq!(err.to_string(), "Algebra: Bit conversion is not valid");
    }
}
