use elliptic_curve::{bigint::U256, ops::Reduce, sec1::ToEncodedPoint};
use sm3::{Digest, Sm3};

use crate::point::CurvePoint;
use crate::scalar::Scalar;

/// Fiat-Shamir challenge `c = H(B, Y1, Y2, A1, A2, A, T1, T2, T3)`.
///
/// The generator is hashed first; callers supply the remaining eight points in
/// exactly that order. Each point contributes `x || y` in big-endian with
/// leading zeros stripped, and the 32-byte digest is taken as a big-endian
/// integer, reduced into the scalar field (the backend only accepts canonical
/// scalars).
pub(crate) fn challenge(points: [&CurvePoint; 8]) -> Scalar {
    let mut h = Sm3::new();
    absorb(&mut h, &CurvePoint::generator());
    for p in points {
        absorb(&mut h, p);
    }
    let digest = h.finalize();
    Scalar(<sm2::Scalar as Reduce<U256>>::reduce(U256::from_be_slice(
        digest.as_slice(),
    )))
}

fn absorb(h: &mut Sm3, p: &CurvePoint) {
    let enc = p.to_affine().to_encoded_point(false);
    if let Some(x) = enc.x() {
        h.update(minimal(x.as_slice()));
    }
    if let Some(y) = enc.y() {
        h.update(minimal(y.as_slice()));
    }
}

// Minimal-length big-endian encoding; the identity contributes nothing.
fn minimal(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn minimal_strips_leading_zeros() {
        assert_eq!(minimal(&[0, 0, 1, 2]), &[1, 2]);
        assert_eq!(minimal(&[9, 0, 0]), &[9, 0, 0]);
        assert!(minimal(&[0, 0, 0]).is_empty());
    }

    #[test]
    fn challenge_is_position_sensitive() {
        let rng = &mut thread_rng();
        let a = CurvePoint::random(rng).unwrap();
        let b = CurvePoint::random(rng).unwrap();
        let g = CurvePoint::generator();
        let c1 = challenge([&a, &b, &g, &g, &g, &g, &g, &g]);
        let c2 = challenge([&b, &a, &g, &g, &g, &g, &g, &g]);
        assert!(c1 != c2);
    }
}
