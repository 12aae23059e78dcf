//! Error taxonomy shared by every fallible operation in the crate.

use thiserror::Error;

/// The Result type for secret sharing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A Context field is unusable (unsupported field size, radix, widths, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-supplied value was rejected (empty secret, bad threshold, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A share string, or one of its pieces, does not match the wire format.
    #[error("invalid share format: {0}")]
    InvalidFormat(String),

    #[error("random source failure: {0}")]
    Random(#[from] rand_core::Error),
}

impl Error {
    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub(crate) fn argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub(crate) fn format<S: Into<String>>(msg: S) -> Self {
        Self::InvalidFormat(msg.into())
    }
}
