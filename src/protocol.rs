use rand_core::{CryptoRng, RngCore};
use smallvec::SmallVec;

use crate::cipher::CipherText;
use crate::error::{Error, Result};
use crate::keypair::{Keypair, PublicKey};

type Vector<T> = SmallVec<[T; 8]>;

/// A committee of key-switch servers and its aggregate public key.
///
/// Reference choreography for the full protocol. In a deployment each member
/// runs on its own node and only `(share, proof)` pairs travel; holding the
/// committee in one place keeps the end-to-end flow testable and documented.
#[derive(Clone)]
pub struct Committee {
    members: Vec<Keypair>,
    public: PublicKey,
}

impl Committee {
    /// Creates a committee of `m` fresh members. At least one is required.
    pub fn new<R>(rng: &mut R, m: usize) -> Result<Committee>
    where
        R: RngCore + CryptoRng,
    {
        let mut members = Vec::with_capacity(m);
        for _ in 0..m {
            members.push(Keypair::new(rng)?);
        }
        Committee::from_keypairs(members)
    }

    /// Builds a committee around existing key pairs.
    pub fn from_keypairs(members: Vec<Keypair>) -> Result<Committee> {
        let publics = members
            .iter()
            .map(|kp| kp.public().clone())
            .collect::<Vector<_>>();
        let public = PublicKey::aggregate(&publics)?;
        Ok(Committee { members, public })
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// The aggregate encryption key `(Σ ki) * B`.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Re-targets `ct` to the requester key `target`.
    ///
    /// Every member computes a share plus its proof, and every proof is
    /// checked against the member's published key before the share enters the
    /// aggregation. A failing proof aborts the switch with `Error::Proof`.
    pub fn switch<R>(&self, rng: &mut R, ct: &CipherText, target: &PublicKey) -> Result<CipherText>
    where
        R: RngCore + CryptoRng,
    {
        let mut shares = Vector::with_capacity(self.members.len());
        for member in &self.members {
            let (share, ri) = member.secret().share(rng, target, &ct.K)?;
            let pi = share.prove(rng, &ri, member.secret(), target, &ct.K)?;
            if !share.verify(&pi, member.public(), target, &ct.K) {
                return Err(Error::Proof);
            }
            shares.push(share);
        }
        ct.switch(&shares)
    }
}
