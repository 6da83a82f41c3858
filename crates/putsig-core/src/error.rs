//! Error types for putsig core.

use thiserror::Error;

use crate::encoding::EncodingMode;

/// Errors raised while validating input for the signable encoding or for
/// signing.
///
/// Every variant is a caller-correctable input error. Nothing here is
/// retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{field} must be {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("value size must be <= {max} bytes, got {len}")]
    ValueTooLarge { len: usize, max: usize },

    #[error("salt size must be between {min} and {max} bytes (inclusive), got {len}")]
    InvalidSaltSize { len: usize, min: usize, max: usize },

    #[error("options are required")]
    MissingOptions,

    #[error("keypair is required")]
    MissingKeypair,

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(&'static str),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors raised while parsing signable bytes or bencode input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    #[error("unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },

    #[error("malformed integer at offset {0}")]
    MalformedInteger(usize),

    #[error("dictionary keys out of order at offset {0}")]
    UnsortedKeys(usize),

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("{0} encoding is not self-delimiting and cannot be decoded")]
    UnsupportedMode(EncodingMode),

    #[error("malformed signable: {0}")]
    Malformed(String),

    #[error("decoded fields are invalid: {0}")]
    Invalid(#[from] CodecError),
}
