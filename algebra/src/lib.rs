//! Field arithmetic used by the blueprint arithmetization.
//!
//! Every prime field is a thin newtype over an arkworks field that implements
//! the [`traits::Scalar`] trait, so the constraint machinery in `blueprint-plonk`
//! never touches arkworks types directly.
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(unused_import_braces, non_shorthand_field_patterns)]
#![warn(unused_attributes, unused_mut, missing_docs)]
#![deny(bare_trait_objects, unused_must_use)]
#![forbid(unsafe_code)]
#![allow(clippy::upper_case_acronyms)]

#[macro_use]
mod macros;

/// Module for the BabyBear field.
pub mod baby_bear;
/// Module for the BLS12-381 scalar field.
pub mod bls12_381;
/// Module for the BN254 scalar field.
pub mod bn254;
/// Module for error handling.
pub mod errors;
/// Module for the prelude.
pub mod prelude;
/// Module for test rngs.
pub mod rand_helper;
/// Module for serialization of scalars.
pub mod serialization;
/// Module for traits.
pub mod traits;
/// Module for utils.
pub mod utils;

#[doc(hidden)]
pub use ark_std::{
    borrow, cmp, collections, fmt, hash, iter, marker, ops, rand, result, str, One, UniformRand,
    Zero,
};
