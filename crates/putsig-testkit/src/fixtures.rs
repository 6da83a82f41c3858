//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use putsig::{
    CodecConfig, EncodingMode, KeyPair, PublicKey, Result, SignOptions, Signature, SignableCodec,
};

/// A test fixture with a codec and a keypair.
pub struct TestFixture {
    pub codec: SignableCodec,
    pub keypair: KeyPair,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        let codec = SignableCodec::new();
        let keypair = codec.keypair();
        Self { codec, keypair }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            codec: SignableCodec::new(),
            keypair: KeyPair::from_seed(&seed),
        }
    }

    /// Create with a custom codec configuration and a seeded keypair.
    pub fn with_config(config: CodecConfig, seed: [u8; 32]) -> Self {
        Self {
            codec: SignableCodec::with_config(config),
            keypair: KeyPair::from_seed(&seed),
        }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public_key
    }

    /// Sign options carrying this fixture's keypair and the given mode.
    pub fn options(&self, mode: EncodingMode) -> SignOptions {
        SignOptions::with_keypair(self.keypair.clone()).encoding(mode)
    }

    /// Sign `value` with this fixture's keypair.
    pub fn sign(&self, value: &[u8], opts: &SignOptions) -> Result<Signature> {
        let opts = SignOptions {
            keypair: Some(self.keypair.clone()),
            signable: opts.signable.clone(),
        };
        self.codec.sign(value, Some(&opts))
    }

    /// Check a signature over `value` against this fixture's public key.
    pub fn verify(&self, signature: &Signature, value: &[u8], opts: &SignOptions) -> Result<bool> {
        self.codec
            .verify(signature, value, &opts.signable, &self.keypair.public_key)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple fixtures for multi-party testing.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = (i >> 8) as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_sign_verify() {
        let fixture = TestFixture::new();
        for mode in EncodingMode::ALL {
            let opts = fixture.options(mode).seq(3);
            let sig = fixture.sign(b"payload", &opts).unwrap();
            assert!(fixture.verify(&sig, b"payload", &opts).unwrap(), "{mode}");
            assert!(!fixture.verify(&sig, b"other", &opts).unwrap(), "{mode}");
        }
    }

    #[test]
    fn test_seeded_fixture_deterministic() {
        let a = TestFixture::with_seed([9; 32]);
        let b = TestFixture::with_seed([9; 32]);
        assert_eq!(a.public_key(), b.public_key());

        let opts = a.options(EncodingMode::Bencode);
        assert_eq!(a.sign(b"x", &opts).unwrap(), b.sign(b"x", &opts).unwrap());
    }

    #[test]
    fn test_config_fixture_uses_default_encoding() {
        let config = CodecConfig {
            default_encoding: EncodingMode::Versioned,
            ..CodecConfig::default()
        };
        let fixture = TestFixture::with_config(config, [1; 32]);
        let bytes = fixture
            .codec
            .signable(b"v", &Default::default())
            .unwrap();
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 0, 0, b'v']);
    }

    #[test]
    fn test_multi_party_cross_verification() {
        let parties = multi_party_fixtures(3);
        let opts = SignOptions::new().encoding(EncodingMode::Versioned).seq(7);

        let sig = parties[0].sign(b"shared", &opts).unwrap();
        assert!(parties[0].verify(&sig, b"shared", &opts).unwrap());
        for other in &parties[1..] {
            assert_ne!(other.public_key(), parties[0].public_key());
            assert!(!other.verify(&sig, b"shared", &opts).unwrap());
        }
    }
}
