use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::point::CurvePoint;

/// An ElGamal-encrypted curve point.
///
/// Under key `P` with plaintext `D` and nonce `r`: `K = r*B`, `C = r*P + D`,
/// so that `C - d*K = D` for the private key `d` behind `P`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherText {
    pub K: CurvePoint,
    pub C: CurvePoint,
}

impl CipherText {
    /// Re-targets this ciphertext using one share per committee member.
    ///
    /// Sums the shares into `(σ.K, σ.C)` and returns `(σ.K, σ.C + C)`; with
    /// honest shares for requester key `Q` the result decrypts under the
    /// requester's private key. Group addition commutes, so shares may be
    /// passed in any order.
    pub fn switch(&self, shares: &[Share]) -> Result<CipherText> {
        let (first, rest) = shares.split_first().ok_or(Error::Empty)?;
        let mut K = first.K;
        let mut C = first.C;
        for s in rest {
            K += s.K;
            C += s.C;
        }
        Ok(CipherText { K, C: C + self.C })
    }
}

/// One committee member's contribution to a key switch.
///
/// For member key `ki`, fresh nonce `ri`, requester key `Q` and ciphertext
/// left point `rB`: `K = ri*B`, `C = ri*Q - ki*rB`. A share is individually
/// useless and only meaningful alongside its proof.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub K: CurvePoint,
    pub C: CurvePoint,
}
