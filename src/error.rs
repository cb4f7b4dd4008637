use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The random source failed to produce the requested bytes.
    Entropy,
    /// Empty collection of keys or shares.
    Empty,
    /// Failed to verify a share proof.
    Proof,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Entropy => f.write_str("entropy source failure"),
            Error::Empty => f.write_str("empty"),
            Error::Proof => f.write_str("proof verification failed"),
        }
    }
}

impl std::error::Error for Error {}
