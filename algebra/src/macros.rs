/// Wrap an arkworks prime field into a newtype implementing [`crate::traits::Scalar`].
macro_rules! scalar_field_wrapper {
    ($name:ident, $inner:ty, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) $inner);

        impl $name {
            /// Wrap the arkworks representation.
            #[inline]
            pub const fn from_field(field: $inner) -> Self {
                Self(field)
            }

            /// Return the arkworks representation.
            #[inline]
            pub fn get_field(&self) -> $inner {
                self.0
            }
        }

        impl ark_std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
                <num_bigint::BigUint as ark_std::fmt::Debug>::fmt(&self.into_biguint(), f)
            }
        }

        impl ark_std::fmt::Display for $name {
            fn fmt(&self, f: &mut ark_std::fmt::Formatter<'_>) -> ark_std::fmt::Result {
                <num_bigint::BigUint as ark_std::fmt::Display>::fmt(&self.into_biguint(), f)
            }
        }

        impl ark_std::str::FromStr for $name {
            type Err = $crate::errors::AlgebraError;

            fn from_str(string: &str) -> core::result::Result<Self, Self::Err> {
                <$inner as ark_std::str::FromStr>::from_str(string)
                    .map(Self)
                    .map_err(|_| $crate::errors::AlgebraError::DeserializationError)
            }
        }

        impl From<$name> for num_bigint::BigUint {
            #[inline]
            fn from(value: $name) -> num_bigint::BigUint {
                ark_ff::PrimeField::into_bigint(value.0).into()
            }
        }

        impl<'a> From<&'a num_bigint::BigUint> for $name {
            #[inline]
            fn from(src: &num_bigint::BigUint) -> Self {
                Self(<$inner>::from(src.clone()))
            }
        }

        impl One for $name {
            #[inline]
            fn one() -> Self {
                Self(<$inner as One>::one())
            }
        }

        impl Zero for $name {
            #[inline]
            fn zero() -> Self {
                Self(<$inner as Zero>::zero())
            }

            #[inline]
            fn is_zero(&self) -> bool {
                self.0.is_zero()
            }
        }

        impl Add for $name {
            type Output = $name;

            #[inline]
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $name {
            type Output = $name;

            #[inline]
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl Sum<$name> for $name {
            #[inline]
            fn sum<I: Iterator<Item = $name>>(iter: I) -> Self {
                iter.fold(Self::zero(), Add::add)
            }
        }

        impl<'a> Add<&'a $name> for $name {
            type Output = $name;

            #[inline]
            fn add(self, rhs: &Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl<'a> AddAssign<&'a $name> for $name {
            #[inline]
            fn add_assign(&mut self, rhs: &Self) {
                self.0 += &rhs.0;
            }
        }

        impl<'a> Sub<&'a $name> for $name {
            type Output = $name;

            #[inline]
            fn sub(self, rhs: &Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl<'a> SubAssign<&'a $name> for $name {
            #[inline]
            fn sub_assign(&mut self, rhs: &Self) {
                self.0 -= &rhs.0;
            }
        }

        impl<'a> Mul<&'a $name> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: &Self) -> Self::Output {
                Self(self.0 * rhs.0)
            }
        }

        impl<'a> MulAssign<&'a $name> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: &Self) {
                self.0 *= &rhs.0;
            }
        }

        impl<'a> Sum<&'a $name> for $name {
            #[inline]
            fn sum<I: Iterator<Item = &'a $name>>(iter: I) -> Self {
                iter.fold(Self::zero(), Add::add)
            }
        }

        impl Neg for $name {
            type Output = $name;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(value: u32) -> Self {
                Self::from(u64::from(value))
            }
        }

        impl From<u64> for $name {
            #[inline]
            fn from(value: u64) -> Self {
                Self(<$inner>::from(value))
            }
        }

        impl Scalar for $name {
            #[inline]
            fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
                Self(<$inner as UniformRand>::rand(rng))
            }

            #[inline]
            fn multiplicative_generator() -> Self {
                Self(<$inner as ark_ff::FftField>::GENERATOR)
            }

            #[inline]
            fn capacity() -> usize {
                (<$inner as ark_ff::PrimeField>::MODULUS_BIT_SIZE - 1) as usize
            }

            #[inline]
            fn get_field_size_le_bytes() -> Vec<u8> {
                let mut bytes =
                    ark_ff::BigInteger::to_bytes_le(&<$inner as ark_ff::PrimeField>::MODULUS);
                bytes.truncate(Self::bytes_len());
                bytes
            }

            #[inline]
            fn get_field_size_biguint() -> num_bigint::BigUint {
                <$inner as ark_ff::PrimeField>::MODULUS.into()
            }

            #[inline]
            fn get_little_endian_u64(&self) -> Vec<u64> {
                ark_ff::PrimeField::into_bigint(self.0).as_ref().to_vec()
            }

            #[inline]
            fn bytes_len() -> usize {
                ((<$inner as ark_ff::PrimeField>::MODULUS_BIT_SIZE + 7) / 8) as usize
            }

            #[inline]
            fn to_bytes(&self) -> Vec<u8> {
                let mut bytes =
                    ark_ff::BigInteger::to_bytes_le(&ark_ff::PrimeField::into_bigint(self.0));
                bytes.truncate(Self::bytes_len());
                bytes
            }

            #[inline]
            fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() > Self::bytes_len() {
                    return Err(AlgebraError::DeserializationError);
                }
                let value = num_bigint::BigUint::from_bytes_le(bytes);
                if value >= Self::get_field_size_biguint() {
                    return Err(AlgebraError::DeserializationError);
                }
                Ok(Self::from(&value))
            }

            #[inline]
            fn inv(&self) -> Result<Self> {
                ark_ff::Field::inverse(&self.0)
                    .map(Self)
                    .ok_or(AlgebraError::FieldInversionError)
            }

            #[inline]
            fn square(&self) -> Self {
                Self(ark_ff::Field::square(&self.0))
            }

            #[inline]
            fn pow(&self, exponent: &[u64]) -> Self {
                Self(ark_ff::Field::pow(&self.0, exponent))
            }
        }

        $crate::serialize_deserialize!($name);
    };
}
