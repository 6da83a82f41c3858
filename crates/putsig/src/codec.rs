//! The SignableCodec: canonical signable bytes and detached signatures.
//!
//! The codec is stateless apart from its configuration. Every call builds its
//! output fresh from caller-owned input, so one codec can be shared across
//! threads without locking.

use bytes::Bytes;
use putsig_core::json::{sign_options_from_json, signable_options_from_json, value_from_json};
use putsig_core::{
    signable_bytes, validate_salt_size, CodecError, CryptoProvider, DalekProvider, EncodingMode,
    KeyPair, PublicKey, SignOptions, Signature, SignableOptions,
};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::error::Result;

/// Encodes and signs mutable-record values.
///
/// Generic over the [`CryptoProvider`]; [`DalekProvider`] by default.
#[derive(Debug, Clone)]
pub struct SignableCodec<P: CryptoProvider = DalekProvider> {
    /// The cryptographic backend.
    provider: P,
    /// Configuration.
    config: CodecConfig,
}

impl SignableCodec<DalekProvider> {
    /// Create a codec with the stock provider and default configuration.
    pub fn new() -> Self {
        Self::with_provider(DalekProvider, CodecConfig::default())
    }

    /// Create a codec with the stock provider.
    pub fn with_config(config: CodecConfig) -> Self {
        Self::with_provider(DalekProvider, config)
    }
}

impl Default for SignableCodec<DalekProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: CryptoProvider> SignableCodec<P> {
    /// Create a codec over a custom provider.
    pub fn with_provider(provider: P, config: CodecConfig) -> Self {
        Self { provider, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Salts and keys
    // ─────────────────────────────────────────────────────────────────────────

    /// Produce a `size`-byte salt.
    ///
    /// With `input`, the salt is a generic hash of its UTF-8 bytes and is
    /// deterministic. Without, it is random. `size` must be 16–64.
    pub fn salt(&self, input: Option<&str>, size: usize) -> Result<Bytes> {
        validate_salt_size(size)?;

        let mut salt = vec![0u8; size];
        match input {
            Some(s) => self.provider.generic_hash(&mut salt, s.as_bytes())?,
            None => self.provider.secure_random_bytes(&mut salt),
        }

        trace!(size, derived = input.is_some(), "generated salt");
        Ok(salt.into())
    }

    /// A random salt of the configured size.
    pub fn default_salt(&self) -> Result<Bytes> {
        self.salt(None, self.config.salt_size)
    }

    /// Generate a fresh keypair.
    pub fn keypair(&self) -> KeyPair {
        let keypair = self.provider.generate_keypair();
        debug!(public_key = ?keypair.public_key, "generated keypair");
        keypair
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Encoding and signing
    // ─────────────────────────────────────────────────────────────────────────

    /// The mode `opts` resolves to under this codec's configuration.
    pub fn encoding_for(&self, opts: &SignableOptions) -> EncodingMode {
        opts.encoding.unwrap_or(self.config.default_encoding)
    }

    /// The exact bytes [`sign`](Self::sign) signs for `value` and `opts`.
    pub fn signable(&self, value: &[u8], opts: &SignableOptions) -> Result<Vec<u8>> {
        let mode = self.encoding_for(opts);
        let bytes = signable_bytes(mode, value, opts.salt_bytes(), opts.seq)?;

        trace!(
            %mode,
            value_len = value.len(),
            salt_len = opts.salt.as_ref().map(Bytes::len),
            seq = opts.seq,
            signable_len = bytes.len(),
            "encoded signable"
        );
        Ok(bytes)
    }

    /// Sign `value` under `opts`.
    ///
    /// Options and a keypair are required. The keypair is checked before any
    /// encoding happens.
    pub fn sign(&self, value: &[u8], opts: Option<&SignOptions>) -> Result<Signature> {
        let opts = opts.ok_or(CodecError::MissingOptions)?;
        let keypair = opts.keypair.as_ref().ok_or(CodecError::MissingKeypair)?;
        keypair.check()?;

        let bytes = self.signable(value, &opts.signable)?;
        let signature = self.provider.sign_detached(&bytes, &keypair.secret_key)?;

        debug!(
            mode = %self.encoding_for(&opts.signable),
            public_key = ?keypair.public_key,
            "signed value"
        );
        Ok(signature)
    }

    /// Sign bytes that are already in signable form, e.g. the output of a
    /// previous [`signable`](Self::signable) call.
    pub fn crypto_sign(&self, message: &[u8], keypair: &KeyPair) -> Result<Signature> {
        keypair.check()?;
        Ok(self.provider.sign_detached(message, &keypair.secret_key)?)
    }

    /// Check `signature` against the signable bytes of `value` and `opts`.
    ///
    /// Invalid input is an error; a signature that does not verify is
    /// `Ok(false)`.
    pub fn verify(
        &self,
        signature: &Signature,
        value: &[u8],
        opts: &SignableOptions,
        public_key: &PublicKey,
    ) -> Result<bool> {
        let bytes = self.signable(value, opts)?;
        Ok(self.provider.verify_detached(signature, &bytes, public_key))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loosely-typed input
    // ─────────────────────────────────────────────────────────────────────────

    /// [`signable`](Self::signable) over JSON input.
    pub fn signable_json(&self, value: &Value, opts: Option<&Value>) -> Result<Vec<u8>> {
        let value = value_from_json(value)?;
        let opts = signable_options_from_json(opts.unwrap_or(&Value::Null))?;
        self.signable(&value, &opts)
    }

    /// [`sign`](Self::sign) over JSON input. Absent or `null` options are
    /// missing options.
    pub fn sign_json(&self, value: &Value, opts: Option<&Value>) -> Result<Signature> {
        let opts = opts
            .filter(|v| !v.is_null())
            .ok_or(CodecError::MissingOptions)?;
        let value = value_from_json(value)?;
        let opts = sign_options_from_json(opts)?;
        self.sign(&value, Some(&opts))
    }
}
