//! # putsig testkit
//!
//! Testing utilities for putsig.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with expected signatures for cross-platform verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Ed25519 is deterministic, so a matching signature pins the signable bytes:
//!
//! ```rust
//! use putsig_testkit::vectors::verify_all_vectors;
//!
//! for result in verify_all_vectors() {
//!     assert!(result.matches, "{} ({})", result.name, result.mode);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use putsig::SignableCodec;
//! use putsig_testkit::generators::SignableParams;
//!
//! proptest! {
//!     #[test]
//!     fn signatures_verify(params: SignableParams) {
//!         let codec = SignableCodec::new();
//!         let opts = params.sign_options();
//!         let sig = codec.sign(&params.value, Some(&opts)).unwrap();
//!         let pk = params.keypair().public_key;
//!         prop_assert!(codec.verify(&sig, &params.value, &opts.signable, &pk).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use putsig::EncodingMode;
//! use putsig_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let opts = fixture.options(EncodingMode::Bencode).seq(1);
//! let sig = fixture.sign(b"initial data", &opts).unwrap();
//! assert!(fixture.verify(&sig, b"initial data", &opts).unwrap());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::SignableParams;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector, ModeVector, VectorResult};
