//! # putsig
//!
//! Canonical signable encodings and detached Ed25519 signatures for mutable
//! DHT records.
//!
//! ## Overview
//!
//! A mutable record is a `value` (at most 1000 bytes) optionally namespaced by
//! a `salt` and versioned by a `seq`. Before signing, the three are packed into
//! a canonical byte string, the *signable*. Three layouts are supported:
//!
//! - **raw**: `value`, or `len(salt) || salt || value` when salted
//! - **versioned**: `u64_be(seq) || len(salt) || salt || value`
//! - **bencode**: `4:salt<salt>3:seqi<seq>e1:v<value>` (a bencode dictionary
//!   with its `d`/`e` markers stripped)
//!
//! ## Usage
//!
//! ```rust
//! use putsig::{EncodingMode, SignOptions, SignableCodec};
//!
//! let codec = SignableCodec::new();
//! let keypair = codec.keypair();
//! let salt = codec.salt(Some("profile"), 32).unwrap();
//!
//! let opts = SignOptions::with_keypair(keypair.clone())
//!     .salt(salt)
//!     .seq(1)
//!     .encoding(EncodingMode::Bencode);
//!
//! let signature = codec.sign(b"hello", Some(&opts)).unwrap();
//! assert!(codec
//!     .verify(&signature, b"hello", &opts.signable, &keypair.public_key)
//!     .unwrap());
//! ```
//!
//! ## Re-exports
//!
//! - `putsig::core` - Encodings, bencode, crypto provider and key types

pub mod codec;
pub mod config;
pub mod error;

// Re-export component crates
pub use putsig_core as core;

// Re-export main types for convenience
pub use codec::SignableCodec;
pub use config::{CodecConfig, DEFAULT_SALT_SIZE};
pub use error::{Error, Result};

// Re-export commonly used core types
pub use putsig_core::{
    decode_signable, CodecError, CryptoProvider, DalekProvider, DecodeError, EncodingMode,
    KeyPair, PublicKey, SecretKey, SignOptions, Signature, SignableOptions, SignableParts,
    VALUE_MAX_SIZE,
};
