//! Σ-protocol proof of correct share computation.
//!
//! Proves knowledge of two scalars `(y1, y2)` satisfying the simultaneous
//! relations `Y1 = y1*B`, `Y2 = y2*B` and `A = y1*A1 + y2*A2` — three Schnorr
//! relations composed under one Fiat-Shamir challenge. `B` is always the curve
//! generator, so the prover commits with base multiplications and the
//! transcript carries the generator's coordinates in the `B` position.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::cipher::Share;
use crate::error::Result;
use crate::keypair::{PublicKey, SecretKey};
use crate::point::CurvePoint;
use crate::scalar::Scalar;
use crate::util::challenge;

/// A non-interactive proof `(c, r1, r2)`, transmitted alongside its share.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub(crate) c: Scalar,
    pub(crate) r1: Scalar,
    pub(crate) r2: Scalar,
}

/// Proves knowledge of `(y1, y2)` with `Y1 = y1*B`, `Y2 = y2*B` and
/// `A = y1*A1 + y2*A2`.
pub fn prove<R>(
    rng: &mut R,
    y1: &Scalar,
    y2: &Scalar,
    Y1: &CurvePoint,
    Y2: &CurvePoint,
    A1: &CurvePoint,
    A2: &CurvePoint,
    A: &CurvePoint,
) -> Result<Proof>
where
    R: RngCore + CryptoRng,
{
    let v1 = Scalar::random(rng)?;
    let v2 = Scalar::random(rng)?;
    Ok(prove_with_nonces(&v1, &v2, y1, y2, Y1, Y2, A1, A2, A))
}

// Commit-challenge-respond with caller-supplied commitment nonces. Outside the
// test suite the nonces must come fresh from `prove`; a repeated nonce hands
// the witness to anyone holding both proofs.
pub(crate) fn prove_with_nonces(
    v1: &Scalar,
    v2: &Scalar,
    y1: &Scalar,
    y2: &Scalar,
    Y1: &CurvePoint,
    Y2: &CurvePoint,
    A1: &CurvePoint,
    A2: &CurvePoint,
    A: &CurvePoint,
) -> Proof {
    // T1 = v1*B, T2 = v2*B, T3 = v1*A1 + v2*A2
    let T1 = CurvePoint::base_mul(v1);
    let T2 = CurvePoint::base_mul(v2);
    let T3 = CurvePoint(A1.0 * v1.0 + A2.0 * v2.0);

    let c = challenge([Y1, Y2, A1, A2, A, &T1, &T2, &T3]);

    // r1 = v1 - c*y1, r2 = v2 - c*y2 (mod n)
    let r1 = Scalar(v1.0 - c.0 * y1.0);
    let r2 = Scalar(v2.0 - c.0 * y2.0);

    Proof { c, r1, r2 }
}

/// Verifies a proof against the public points `(Y1, Y2, A1, A2, A)`.
///
/// A `false` return is a verdict, not an error; callers decide how to treat
/// the failing prover.
pub fn verify(
    pi: &Proof,
    Y1: &CurvePoint,
    Y2: &CurvePoint,
    A1: &CurvePoint,
    A2: &CurvePoint,
    A: &CurvePoint,
) -> bool {
    // T1' = r1*B + c*Y1, T2' = r2*B + c*Y2, T3' = r1*A1 + r2*A2 + c*A
    let T1 = CurvePoint(CurvePoint::base_mul(&pi.r1).0 + Y1.0 * pi.c.0);
    let T2 = CurvePoint(CurvePoint::base_mul(&pi.r2).0 + Y2.0 * pi.c.0);
    let T3 = CurvePoint(A1.0 * pi.r1.0 + A2.0 * pi.r2.0 + A.0 * pi.c.0);

    let c = challenge([Y1, Y2, A1, A2, A, &T1, &T2, &T3]);
    pi.c.0.ct_eq(&c.0).into()
}

impl Share {
    /// Proves this share was computed from the nonce `ri` and the member's
    /// private key.
    ///
    /// Instantiates the generic relations with `y1 = ri`, `y2 = ki`,
    /// `Y1 = share.K`, `Y2 = ki*B`, `A1 = Q`, `A2 = -rB`, `A = share.C`.
    pub fn prove<R>(
        &self,
        rng: &mut R,
        ri: &Scalar,
        secret: &SecretKey,
        target: &PublicKey,
        rB: &CurvePoint,
    ) -> Result<Proof>
    where
        R: RngCore + CryptoRng,
    {
        let node = secret.public();
        let A2 = -*rB;
        prove(
            rng,
            ri,
            secret.scalar(),
            &self.K,
            node.as_point(),
            target.as_point(),
            &A2,
            &self.C,
        )
    }

    /// Verifies a member's proof against its published public key.
    ///
    /// A failing proof marks the member malicious or faulty; its share must
    /// not enter the aggregation.
    pub fn verify(
        &self,
        pi: &Proof,
        node: &PublicKey,
        target: &PublicKey,
        rB: &CurvePoint,
    ) -> bool {
        let A2 = -*rB;
        verify(
            pi,
            &self.K,
            node.as_point(),
            target.as_point(),
            &A2,
            &self.C,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Keypair;
    use rand::thread_rng;

    #[test]
    fn generic_proof_round_trip() {
        let rng = &mut thread_rng();
        for _ in 0..10 {
            let y1 = Scalar::random(rng).unwrap();
            let y2 = Scalar::random(rng).unwrap();
            let A1 = CurvePoint::random(rng).unwrap();
            let A2 = CurvePoint::random(rng).unwrap();
            let Y1 = CurvePoint::base_mul(&y1);
            let Y2 = CurvePoint::base_mul(&y2);
            let A = A1 * y1 + A2 * y2;

            let pi = prove(rng, &y1, &y2, &Y1, &Y2, &A1, &A2, &A).unwrap();
            assert!(verify(&pi, &Y1, &Y2, &A1, &A2, &A));
        }
    }

    #[test]
    fn share_proof_round_trip() {
        let rng = &mut thread_rng();
        for _ in 0..10 {
            let node = Keypair::new(rng).unwrap();
            let target = Keypair::new(rng).unwrap();
            let rB = CurvePoint::random(rng).unwrap();

            let (share, ri) = node.secret().share(rng, target.public(), &rB).unwrap();
            let pi = share
                .prove(rng, &ri, node.secret(), target.public(), &rB)
                .unwrap();
            assert!(share.verify(&pi, node.public(), target.public(), &rB));
        }
    }

    #[test]
    fn tampering_breaks_verification() {
        let rng = &mut thread_rng();
        let node = Keypair::new(rng).unwrap();
        let target = Keypair::new(rng).unwrap();
        let other = Keypair::new(rng).unwrap();
        let rB = CurvePoint::random(rng).unwrap();

        let (share, ri) = node.secret().share(rng, target.public(), &rB).unwrap();
        let pi = share
            .prove(rng, &ri, node.secret(), target.public(), &rB)
            .unwrap();
        assert!(share.verify(&pi, node.public(), target.public(), &rB));

        let tweak = Scalar::one();
        let g = CurvePoint::generator();

        let bad = Proof { c: pi.c + tweak, ..pi };
        assert!(!share.verify(&bad, node.public(), target.public(), &rB));
        let bad = Proof { r1: pi.r1 + tweak, ..pi };
        assert!(!share.verify(&bad, node.public(), target.public(), &rB));
        let bad = Proof { r2: pi.r2 + tweak, ..pi };
        assert!(!share.verify(&bad, node.public(), target.public(), &rB));

        let bad = Share { K: share.K + g, ..share };
        assert!(!bad.verify(&pi, node.public(), target.public(), &rB));
        let bad = Share { C: share.C + g, ..share };
        assert!(!bad.verify(&pi, node.public(), target.public(), &rB));

        assert!(!share.verify(&pi, other.public(), target.public(), &rB));
        assert!(!share.verify(&pi, node.public(), other.public(), &rB));
        assert!(!share.verify(&pi, node.public(), target.public(), &(rB + g)));
    }

    // Reusing the commitment nonces across two transcripts surrenders both
    // witnesses: with r2 = v2 - c*k and r2' = v2 - c'*k the holder of both
    // proofs computes k = (r2 - r2') / (c' - c) mod n.
    #[test]
    fn nonce_reuse_leaks_private_key() {
        let rng = &mut thread_rng();
        let node = Keypair::new(rng).unwrap();
        let target1 = Keypair::new(rng).unwrap();
        let target2 = Keypair::new(rng).unwrap();
        let rB = CurvePoint::random(rng).unwrap();

        let ri = Scalar::random(rng).unwrap();
        let v1 = Scalar::random(rng).unwrap();
        let v2 = Scalar::random(rng).unwrap();

        let sk = node.secret();
        let node_pk = node.public();
        let A2 = -rB;

        let s1 = sk.share_with_nonce(&ri, target1.public(), &rB);
        let s2 = sk.share_with_nonce(&ri, target2.public(), &rB);

        // reused share nonce: the left points collide, linking the shares
        assert_eq!(s1.K, s2.K);

        let p1 = prove_with_nonces(
            &v1, &v2, &ri, sk.scalar(), &s1.K, node_pk.as_point(),
            target1.public().as_point(), &A2, &s1.C,
        );
        let p2 = prove_with_nonces(
            &v1, &v2, &ri, sk.scalar(), &s2.K, node_pk.as_point(),
            target2.public().as_point(), &A2, &s2.C,
        );
        assert!(p1.c != p2.c);

        let inv = (p2.c - p1.c).invert().unwrap();
        let leaked_sk = (p1.r2 - p2.r2) * inv;
        let leaked_ri = (p1.r1 - p2.r1) * inv;
        assert!(leaked_sk == *sk.scalar());
        assert!(leaked_ri == ri);
    }
}
