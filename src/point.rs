use elliptic_curve::{
    group::Group,
    ops::MulByGenerator,
    sec1::{FromEncodedPoint, ToEncodedPoint},
};
use rand_core::{CryptoRng, RngCore};
use serde::{
    de::{self, Deserialize, Deserializer, Unexpected, Visitor},
    ser::{Serialize, Serializer},
};
use sm2::{EncodedPoint, ProjectivePoint};
use std::{
    fmt,
    ops::{Add, AddAssign, Deref, Mul, Neg, Sub},
};

use crate::error::Result;
use crate::key::Key;
use crate::scalar::Scalar;

/// A point on the SM2 curve.
///
/// Wrapper type to add `Serialize`/`Deserialize` impls to the backend point.
/// Coordinate arithmetic stays inside the backend field, so every result is
/// canonical mod `p` (negation included).
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct CurvePoint(pub(crate) ProjectivePoint);

impl CurvePoint {
    /// The group generator `B`.
    pub fn generator() -> CurvePoint {
        CurvePoint(ProjectivePoint::GENERATOR)
    }

    /// The point at infinity.
    pub fn identity() -> CurvePoint {
        CurvePoint(ProjectivePoint::IDENTITY)
    }

    /// `s * B` for the group generator `B`.
    pub fn base_mul(s: &Scalar) -> CurvePoint {
        CurvePoint(ProjectivePoint::mul_by_generator(&s.0))
    }

    /// Creates a fresh random point (a random scalar times the generator).
    pub fn random<R>(rng: &mut R) -> Result<CurvePoint>
    where
        R: RngCore + CryptoRng,
    {
        Ok(CurvePoint::base_mul(&Scalar::random(rng)?))
    }

    pub fn is_identity(&self) -> bool {
        self.0.is_identity().into()
    }

    /// Derives the symmetric key this point carries: its affine x-coordinate.
    pub fn symmetric_key(&self) -> Key {
        let enc = self.0.to_affine().to_encoded_point(false);
        let mut k = [0; 32];
        if let Some(x) = enc.x() {
            k.copy_from_slice(x.as_slice());
        }
        Key::new(k)
    }
}

impl Deref for CurvePoint {
    type Target = ProjectivePoint;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Add for CurvePoint {
    type Output = CurvePoint;

    fn add(self, rhs: CurvePoint) -> CurvePoint {
        CurvePoint(self.0 + rhs.0)
    }
}

impl AddAssign for CurvePoint {
    fn add_assign(&mut self, rhs: CurvePoint) {
        self.0 += rhs.0;
    }
}

impl Sub for CurvePoint {
    type Output = CurvePoint;

    fn sub(self, rhs: CurvePoint) -> CurvePoint {
        CurvePoint(self.0 - rhs.0)
    }
}

impl Neg for CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        CurvePoint(-self.0)
    }
}

impl Mul<Scalar> for CurvePoint {
    type Output = CurvePoint;

    fn mul(self, rhs: Scalar) -> CurvePoint {
        CurvePoint(self.0 * rhs.0)
    }
}

impl fmt::Debug for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CurvePoint(")?;
        for b in self.0.to_encoded_point(false).as_bytes() {
            write!(f, "{:02x}", b)?;
        }
        f.write_str(")")
    }
}

impl Serialize for CurvePoint {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_bytes(self.0.to_encoded_point(false).as_bytes())
    }
}

impl<'de> Deserialize<'de> for CurvePoint {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        struct PointVisitor;

        impl<'de> Visitor<'de> for PointVisitor {
            type Value = CurvePoint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("SEC1-encoded curve point")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> std::result::Result<Self::Value, E> {
                let enc = EncodedPoint::from_bytes(v).map_err(|_| {
                    de::Error::invalid_value(Unexpected::Bytes(v), &"SEC1 point encoding")
                })?;
                let p = ProjectivePoint::from_encoded_point(&enc);
                Option::from(p).map(CurvePoint).ok_or_else(|| {
                    de::Error::invalid_value(Unexpected::Bytes(v), &"point on the SM2 curve")
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

        d.deserialize_bytes(PointVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elliptic_curve::bigint::U256;
    use rand::thread_rng;

    // SM2 coordinate field prime.
    const P_HEX: &str = "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff";

    #[test]
    fn negation_reduces_into_field() {
        let p = U256::from_be_hex(P_HEX);
        let rng = &mut thread_rng();
        for _ in 0..16 {
            let a = CurvePoint::random(rng).unwrap();
            let b = -a;
            assert!((a + b).is_identity());

            // y(-P) must be the canonical p - y(P), never a raw negative.
            let ea = a.to_affine().to_encoded_point(false);
            let eb = b.to_affine().to_encoded_point(false);
            let ya = U256::from_be_slice(ea.y().unwrap().as_slice());
            let yb = U256::from_be_slice(eb.y().unwrap().as_slice());
            assert!(yb < p);
            assert_eq!(ya.add_mod(&yb, &p), U256::ZERO);
        }
    }

    #[test]
    fn symmetric_key_is_x_coordinate() {
        let a = CurvePoint::random(&mut thread_rng()).unwrap();
        let enc = a.to_affine().to_encoded_point(false);
        assert_eq!(&*a.symmetric_key(), enc.x().unwrap().as_slice());
    }
}
