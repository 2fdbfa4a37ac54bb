use crate::prelude::*;

/// The number of bytes for a scalar value over BN254
pub const BN254_SCALAR_LEN: usize = 32;

scalar_field_wrapper!(
    BN254Scalar,
    ark_bn254::Fr,
    "The wrapped struct for `ark_bn254::Fr`"
);
