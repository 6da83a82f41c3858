//! Options for building signable bytes and signatures.

use bytes::Bytes;

use crate::crypto::KeyPair;
use crate::encoding::EncodingMode;

/// Salt, seq and encoding for a signable.
///
/// `salt: None` and `salt: Some(empty)` are different things. See
/// [`signable_bytes`](crate::encoding::signable_bytes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignableOptions {
    pub salt: Option<Bytes>,
    pub seq: Option<u64>,
    /// `None` defers to the codec's configured default.
    pub encoding: Option<EncodingMode>,
}

impl SignableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the salt.
    pub fn salt(mut self, salt: impl Into<Bytes>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    /// Set the sequence number.
    pub fn seq(mut self, seq: u64) -> Self {
        self.seq = Some(seq);
        self
    }

    /// Pin the encoding mode.
    pub fn encoding(mut self, mode: EncodingMode) -> Self {
        self.encoding = Some(mode);
        self
    }

    /// The salt as a borrowed slice.
    pub fn salt_bytes(&self) -> Option<&[u8]> {
        self.salt.as_deref()
    }
}

/// Options for signing: a keypair plus the signable options.
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    pub keypair: Option<KeyPair>,
    pub signable: SignableOptions,
}

impl SignOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying `keypair` and nothing else.
    pub fn with_keypair(keypair: KeyPair) -> Self {
        Self::new().keypair(keypair)
    }

    pub fn keypair(mut self, keypair: KeyPair) -> Self {
        self.keypair = Some(keypair);
        self
    }

    pub fn salt(mut self, salt: impl Into<Bytes>) -> Self {
        self.signable = self.signable.salt(salt);
        self
    }

    pub fn seq(mut self, seq: u64) -> Self {
        self.signable = self.signable.seq(seq);
        self
    }

    pub fn encoding(mut self, mode: EncodingMode) -> Self {
        self.signable = self.signable.encoding(mode);
        self
    }
}

impl From<SignableOptions> for SignOptions {
    fn from(signable: SignableOptions) -> Self {
        Self {
            keypair: None,
            signable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let opts = SignableOptions::new()
            .salt(&b"abc"[..])
            .seq(4)
            .encoding(EncodingMode::Bencode);
        assert_eq!(opts.salt_bytes(), Some(&b"abc"[..]));
        assert_eq!(opts.seq, Some(4));
        assert_eq!(opts.encoding, Some(EncodingMode::Bencode));
    }

    #[test]
    fn test_empty_salt_is_present() {
        let opts = SignableOptions::new().salt(Vec::new());
        assert_eq!(opts.salt_bytes(), Some(&[][..]));
        assert_eq!(SignableOptions::new().salt_bytes(), None);
    }

    #[test]
    fn test_sign_options_forward_to_signable() {
        let keypair = KeyPair::from_seed(&[9; 32]);
        let opts = SignOptions::with_keypair(keypair.clone())
            .salt(vec![1u8; 16])
            .seq(2)
            .encoding(EncodingMode::Versioned);
        assert_eq!(opts.keypair, Some(keypair));
        assert_eq!(opts.signable.seq, Some(2));
        assert_eq!(opts.signable.salt_bytes().map(<[u8]>::len), Some(16));
    }
}
