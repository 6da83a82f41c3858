//! Error types for the codec.

use putsig_core::{CodecError, DecodeError};
use thiserror::Error;

/// Errors that can occur during codec operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid input to an encode or sign operation.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Signable bytes that could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid codec configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The underlying input error, if this is one.
    pub fn codec(&self) -> Option<&CodecError> {
        match self {
            Error::Codec(e) => Some(e),
            Error::Decode(DecodeError::Invalid(e)) => Some(e),
            _ => None,
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
