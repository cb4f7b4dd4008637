use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::cipher::{CipherText, Share};
use crate::error::{Error, Result};
use crate::point::CurvePoint;
use crate::scalar::Scalar;

#[derive(Clone, Serialize, Deserialize)]
pub struct Keypair {
    secret: SecretKey,
    public: PublicKey,
}

impl Keypair {
    /// Creates a fresh public and private key.
    pub fn new<R>(rng: &mut R) -> Result<Keypair>
    where
        R: RngCore + CryptoRng,
    {
        let secret = SecretKey::generate(rng)?;
        let public = secret.public();
        Ok(Keypair { secret, public })
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecretKey {
    scalar: Scalar,
}

impl SecretKey {
    /// Samples a private key `d` in `[1, n-1]`.
    pub fn generate<R>(rng: &mut R) -> Result<SecretKey>
    where
        R: RngCore + CryptoRng,
    {
        Ok(SecretKey {
            scalar: Scalar::random(rng)?,
        })
    }

    /// The associated public key `d * B`.
    pub fn public(&self) -> PublicKey {
        PublicKey {
            point: CurvePoint::base_mul(&self.scalar),
        }
    }

    /// Sums the given private keys mod `n` into the committee private key.
    pub fn aggregate(keys: &[SecretKey]) -> Result<SecretKey> {
        if keys.is_empty() {
            return Err(Error::Empty);
        }
        let scalar = keys.iter().fold(Scalar::zero(), |acc, k| acc + k.scalar);
        Ok(SecretKey { scalar })
    }

    /// Decrypts `ct` back to the plaintext point, `C - d * K`.
    pub fn decrypt(&self, ct: &CipherText) -> CurvePoint {
        CurvePoint(ct.C.0 - ct.K.0 * self.scalar.0)
    }

    /// Computes this member's share re-targeting a ciphertext with left point
    /// `rB` to the requester key `target`.
    ///
    /// The returned nonce exists only to feed `Share::prove` and must be
    /// dropped afterwards, never stored or transmitted.
    pub fn share<R>(
        &self,
        rng: &mut R,
        target: &PublicKey,
        rB: &CurvePoint,
    ) -> Result<(Share, Scalar)>
    where
        R: RngCore + CryptoRng,
    {
        let ri = Scalar::random(rng)?;
        let share = self.share_with_nonce(&ri, target, rB);
        Ok((share, ri))
    }

    // share.K = ri*B, share.C = ri*Q - ki*rB
    pub(crate) fn share_with_nonce(
        &self,
        ri: &Scalar,
        target: &PublicKey,
        rB: &CurvePoint,
    ) -> Share {
        Share {
            K: CurvePoint::base_mul(ri),
            C: CurvePoint(target.point.0 * ri.0 - rB.0 * self.scalar.0),
        }
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }
}

impl From<Scalar> for SecretKey {
    fn from(scalar: Scalar) -> SecretKey {
        SecretKey { scalar }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    point: CurvePoint,
}

impl PublicKey {
    /// Sums the given public keys into the committee public key.
    pub fn aggregate(keys: &[PublicKey]) -> Result<PublicKey> {
        if keys.is_empty() {
            return Err(Error::Empty);
        }
        let point = keys
            .iter()
            .fold(CurvePoint::identity(), |acc, k| acc + k.point);
        Ok(PublicKey { point })
    }

    /// ElGamal point encryption: `(K = r*B, C = r*P + D)` for a fresh nonce `r`.
    pub fn encrypt<R>(&self, rng: &mut R, plain: &CurvePoint) -> Result<CipherText>
    where
        R: RngCore + CryptoRng,
    {
        let r = Scalar::random(rng)?;
        Ok(CipherText {
            K: CurvePoint::base_mul(&r),
            C: CurvePoint(self.point.0 * r.0 + plain.0),
        })
    }

    pub fn as_point(&self) -> &CurvePoint {
        &self.point
    }
}
