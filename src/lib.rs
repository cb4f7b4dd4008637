//! Practical parallel key switch over the SM2 curve.
//!
//! A plaintext curve point is ElGamal-encrypted under the aggregate public key
//! of a committee of key-switch servers. When a requester presents its own
//! public key, each server non-interactively computes a share; summed and
//! added to the original ciphertext, the shares yield a ciphertext only the
//! requester can decrypt. No server learns the plaintext or another server's
//! key, and each share travels with a Fiat-Shamir Σ-proof binding it to the
//! server's long-term key and the ciphertext, so a junk share is caught before
//! aggregation.
//!
//! ```
//! use ppks::{Committee, CurvePoint, Keypair};
//! use rand::thread_rng;
//!
//! # fn main() -> ppks::Result<()> {
//! let rng = &mut thread_rng();
//!
//! let committee = Committee::new(rng, 5)?;
//! let plain = CurvePoint::random(rng)?;
//! let ct = committee.public_key().encrypt(rng, &plain)?;
//!
//! let requester = Keypair::new(rng)?;
//! let switched = committee.switch(rng, &ct, requester.public())?;
//!
//! assert_eq!(requester.secret().decrypt(&switched), plain);
//! # Ok(())
//! # }
//! ```
//!
//! The curve and hash backends are the RustCrypto `sm2` and `sm3` crates; the
//! backend curve types stay reachable through the re-exported [`sm2`] crate.

#![allow(non_snake_case)]

pub use sm2;

mod cipher;
mod error;
mod key;
mod keypair;
mod point;
pub mod proof;
mod protocol;
mod scalar;
mod util;

pub use cipher::{CipherText, Share};
pub use error::{Error, Result};
pub use key::Key;
pub use keypair::{Keypair, PublicKey, SecretKey};
pub use point::CurvePoint;
pub use proof::Proof;
pub use protocol::Committee;
pub use scalar::Scalar;
