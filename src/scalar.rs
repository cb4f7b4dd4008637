use elliptic_curve::{
    bigint::{ArrayEncoding, NonZero, U256, U512},
    Curve, Field, PrimeField,
};
use rand_core::{CryptoRng, RngCore};
use serde::{
    de::{self, Deserialize, Deserializer, Unexpected, Visitor},
    ser::{Serialize, Serializer},
};
use sm2::{FieldBytes, Sm2};
use std::{
    fmt,
    ops::{Add, Deref, Mul, Neg, Sub},
};

use crate::error::{Error, Result};

/// Scalar of the SM2 group, i.e. an integer modulo the group order `n`.
///
/// Wrapper type to add the byte-oriented `Serialize`/`Deserialize` impls and
/// the `[1, n-1]` sampler to the backend scalar.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Scalar(pub(crate) sm2::Scalar);

impl Scalar {
    /// Draws a uniform scalar in `[1, n-1]`.
    ///
    /// Reads `BitSize/8 + 8` = 40 bytes and reduces mod `n - 1`; the 64 extra
    /// bits flatten the reduction skew to a negligible bias.
    pub fn random<R>(rng: &mut R) -> Result<Scalar>
    where
        R: RngCore + CryptoRng,
    {
        let mut wide = [0u8; 64];
        rng.try_fill_bytes(&mut wide[24..]).map_err(|_| Error::Entropy)?;
        let t = U512::from_be_slice(&wide);

        let mut modulus = [0u8; 64];
        let order_minus_one = Sm2::ORDER.wrapping_sub(&U256::ONE);
        modulus[32..].copy_from_slice(order_minus_one.to_be_byte_array().as_slice());
        let n1 = Option::from(NonZero::new(U512::from_be_slice(&modulus)))
            .expect("n - 1 is nonzero");

        // k = (t mod (n - 1)) + 1, so k is in [1, n-1] and below the order.
        let k = t.rem(&n1).wrapping_add(&U512::ONE);
        let bytes = k.to_be_byte_array();
        let s = sm2::Scalar::from_repr(*FieldBytes::from_slice(&bytes.as_slice()[32..]));
        Ok(Scalar(Option::from(s).expect("k is below the group order")))
    }

    pub fn zero() -> Scalar {
        Scalar(<sm2::Scalar as Field>::ZERO)
    }

    pub fn one() -> Scalar {
        Scalar(<sm2::Scalar as Field>::ONE)
    }

    /// Multiplicative inverse mod `n`; `None` for zero.
    pub fn invert(&self) -> Option<Scalar> {
        Option::from(Field::invert(&self.0)).map(Scalar)
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_repr().into()
    }
}

impl Deref for Scalar {
    type Target = sm2::Scalar;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        Scalar(-self.0)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(")?;
        for b in self.to_bytes() {
            write!(f, "{:02x}", b)?;
        }
        f.write_str(")")
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("scalar value")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Self::Value, E> {
                if v.len() != 32 {
                    return Err(de::Error::invalid_value(Unexpected::Bytes(v), &"32 bytes"));
                }
                let s = sm2::Scalar::from_repr(*FieldBytes::from_slice(v));
                Option::from(s).map(Scalar).ok_or_else(|| {
                    de::Error::invalid_value(Unexpected::Bytes(v), &"canonical scalar bytes")
                })
            }

            fn visit_borrowed_bytes<E: de::Error>(
                self,
                v: &'de [u8],
            ) -> std::result::Result<Self::Value, E> {
                self.visit_bytes(v)
            }

            fn visit_byte_buf<E: de::Error>(
                self,
                v: Vec<u8>,
            ) -> std::result::Result<Self::Value, E> {
                self.visit_bytes(&v)
            }
        }

        d.deserialize_bytes(ScalarVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    struct Broken;

    impl RngCore for Broken {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }

        fn fill_bytes(&mut self, _: &mut [u8]) {
            unreachable!()
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> std::result::Result<(), rand_core::Error> {
            Err(rand_core::Error::new("broken source"))
        }
    }

    impl CryptoRng for Broken {}

    #[test]
    fn random_is_nonzero_and_canonical() {
        let rng = &mut thread_rng();
        for _ in 0..256 {
            let s = Scalar::random(rng).unwrap();
            assert!(s != Scalar::zero());
            let back = sm2::Scalar::from_repr(*FieldBytes::from_slice(&s.to_bytes()));
            assert!(bool::from(back.is_some()));
        }
    }

    #[test]
    fn entropy_failure_surfaces() {
        assert_eq!(Scalar::random(&mut Broken).unwrap_err(), Error::Entropy);
    }

    #[test]
    fn arithmetic_wraps_mod_n() {
        // n - 1 is a valid scalar; adding one wraps to zero.
        let top = -Scalar::one();
        assert!(top + Scalar::one() == Scalar::zero());
    }
}
