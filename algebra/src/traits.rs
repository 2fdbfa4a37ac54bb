use crate::prelude::*;
use ark_std::{
    fmt::{Debug, Display},
    hash::Hash,
};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// The trait for scalars.
///
/// This is the whole surface the arithmetization relies on: ring operations,
/// inversion, a canonical integer encoding and a total order (the order has no
/// algebraic meaning, it only makes gate canonicalisation and lookup-table
/// sets deterministic).
pub trait Scalar:
    Copy
    + Default
    + Debug
    + Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + Serialize
    + for<'de> Deserialize<'de>
    + Into<BigUint>
    + for<'a> From<&'a BigUint>
    + Clone
    + One
    + Zero
    + Sized
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Sum<Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> MulAssign<&'a Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Sum<&'a Self>
    + From<u32>
    + From<u64>
    + Neg<Output = Self>
    + Sync
    + Send
{
    /// Return a random scalar
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Return multiplicative generator of order r,
    /// which is also required to be a quadratic nonresidue
    fn multiplicative_generator() -> Self;

    /// Return the capacity.
    fn capacity() -> usize;

    /// Return the little-endian byte representations of the field size
    fn get_field_size_le_bytes() -> Vec<u8>;

    /// Return the field size as a BigUint
    fn get_field_size_biguint() -> BigUint;

    /// Return a representation of the scalar as a vector of u64 in the little-endian order
    fn get_little_endian_u64(&self) -> Vec<u64>;

    /// Return the len of the byte representation
    fn bytes_len() -> usize;

    /// Convert to bytes
    fn to_bytes(&self) -> Vec<u8>;

    /// Convert from bytes, rejecting non-canonical encodings.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// Return the modular inverse of the scalar if it exists
    fn inv(&self) -> Result<Self>;

    /// Return the square of the field element
    fn square(&self) -> Self;

    /// exponent form: least significant limb first, with u64 limbs
    fn pow(&self, exponent: &[u64]) -> Self {
        let mut base = *self;
        let mut result = Self::one();
        for exp_u64 in exponent {
            let mut e = *exp_u64;
            // we have to square the base for 64 times.
            for _ in 0..64 {
                if e % 2 == 1 {
                    result.mul_assign(&base);
                }
                base = base.mul(&base);
                e >>= 1;
            }
        }
        result
    }

    /// Return `1` for `true` and `0` for `false`.
    #[inline]
    fn from_bool(bit: bool) -> Self {
        if bit {
            Self::one()
        } else {
            Self::zero()
        }
    }

    /// Return the little-endian bits of the canonical integer, `n_bits` of them.
    /// Fails if the value needs more than `n_bits` bits.
    fn to_bits_le(&self, n_bits: usize) -> Result<Vec<bool>> {
        let value: BigUint = (*self).into();
        if value.bits() as usize > n_bits {
            return Err(AlgebraError::BitConversionError);
        }
        Ok((0..n_bits).map(|i| value.bit(i as u64)).collect())
    }

    /// Convert into BigUint, often for debug.
    fn into_biguint(self) -> BigUint {
        self.into()
    }
}
