//! The BabyBear field, `p = 15 * 2^27 + 1`.
//!
//! Small enough that the values in circuit tests can be checked by hand.
use crate::prelude::*;
use ark_ff::fields::{Fp64, MontBackend, MontConfig};

/// Montgomery parameters of the BabyBear prime.
#[derive(MontConfig)]
#[modulus = "2013265921"]
#[generator = "31"]
pub struct BabyBearConfig;

/// The arkworks BabyBear field.
pub type BabyBearField = Fp64<MontBackend<BabyBearConfig, 1>>;

/// The BabyBear modulus.
pub const BABY_BEAR_MODULUS: u64 = 2013265921;

scalar_field_wrapper!(
    BabyBearScalar,
    BabyBearField,
    "The wrapped struct for the BabyBear field"
);
