//! # putsig core
//!
//! Pure primitives for signing mutable DHT records: the canonical signable
//! encodings, a strict bencode codec, and the [`CryptoProvider`] seam.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`EncodingMode`] - Which signable layout to produce (raw, versioned, bencode)
//! - [`SignableOptions`] / [`SignOptions`] - Salt, seq, encoding and keypair
//! - [`KeyPair`], [`PublicKey`], [`SecretKey`], [`Signature`] - Ed25519 material
//! - [`CryptoProvider`] - Key generation, detached signatures, hashing, randomness
//!
//! ## Encodings
//!
//! See the [`encoding`] module for the exact byte layouts.

pub mod bencode;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod json;
pub mod options;
pub mod validation;

pub use crypto::{
    CryptoProvider, DalekProvider, KeyPair, PublicKey, SecretKey, Signature, PUBLIC_KEY_SIZE,
    SECRET_KEY_SIZE, SIGNATURE_SIZE,
};
pub use encoding::{
    decode_signable, signable_bytes, EncodingMode, SignableParts, SALT_MAX_SIZE, SALT_MIN_SIZE,
    VALUE_MAX_SIZE,
};
pub use error::{CodecError, DecodeError};
pub use options::{SignOptions, SignableOptions};
pub use validation::{validate_salt, validate_salt_size, validate_signable, validate_value};
