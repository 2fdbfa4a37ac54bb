use crate::prelude::*;

/// The number of bytes for a scalar value over BLS12-381
pub const BLS12_381_SCALAR_LEN: usize = 32;

scalar_field_wrapper!(
    BLSScalar,
    ark_bls12_381::Fr,
    "The wrapped struct for `ark_bls12_381::Fr`"
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bls_scalar_bytes() {
        assert_eq!(BLSScalar::bytes_len(), BLS12_381_SCALAR_LEN);
        let mut prng = test_rng();
        let a = BLSScalar::random(&mut prng);
        let bytes = a.to_bytes();
        assert_eq!(bytes.len(), BLS12_381_SCALAR_LEN);
        assert_eq!(BLSScalar::from_bytes(&bytes).unwrap(), a);

        // the modulus itself is not a canonical encoding
        let modulus = BLSScalar::get_field_size_le_bytes();
        assert!(BLSScalar::from_bytes(&modulus).is_err());
    }

    #[test]
    fn test_bls_scalar_inverse() {
        let mut prng = test_rng();
        let a = BLSScalar::random(&mut prng);
        let a_inv = a.inv().unwrap();
        assert_eq!(a * a_inv, BLSScalar::one());
        assert!(BLSScalar::zero().inv().is_err());
    }

    #[test]
    fn test_bls_scalar_serde() {
        let a = BLSScalar::from(123456789u64);
        let json = serde_json::to_string(&a).unwrap();
        let b: BLSScalar = serde_json::from_str(&json).unwrap();
        assert_eq!(a, b);

        let raw = bincode::serialize(&a).unwrap();
        let c: BLSScalar = bincode::deserialize(&raw).unwrap();
        assert_eq!(a, c);
    }
}
