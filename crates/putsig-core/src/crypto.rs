//! Cryptographic primitives for putsig.
//!
//! The codec never touches a signature scheme directly. It talks to a
//! [`CryptoProvider`], which supplies key generation, detached signatures,
//! generic hashing and secure random bytes. [`DalekProvider`] is the stock
//! implementation: Ed25519 via ed25519-dalek, unkeyed BLAKE2b at the
//! requested output length (libsodium's `crypto_generichash`), and the
//! thread-local CSPRNG from `rand`.

use blake2::digest::{Update, VariableOutput};
use blake2::Blake2bVar;
use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CodecError;

/// Public key length in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Secret key length in bytes (`seed || public_key`).
pub const SECRET_KEY_SIZE: usize = 64;

/// Detached signature length in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; PUBLIC_KEY_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }

    /// Verify a detached signature over a message.
    ///
    /// A key that is not a valid curve point verifies nothing.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };

        let sig = DalekSignature::from_bytes(&signature.0);

        verifying_key.verify(message, &sig).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = CodecError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; PUBLIC_KEY_SIZE] = slice
            .try_into()
            .map_err(|_| CodecError::InvalidPublicKey("expected 32 bytes"))?;
        Ok(Self(arr))
    }
}

/// A 64-byte Ed25519 secret key laid out as `seed || public_key`.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; SECRET_KEY_SIZE]);

impl SecretKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.0
    }

    /// The public half embedded in the last 32 bytes.
    pub fn embedded_public_key(&self) -> PublicKey {
        let mut arr = [0u8; PUBLIC_KEY_SIZE];
        arr.copy_from_slice(&self.0[PUBLIC_KEY_SIZE..]);
        PublicKey(arr)
    }

    /// Rebuild the dalek signing key, checking that the embedded public half
    /// matches the seed.
    fn signing_key(&self) -> Result<SigningKey, CodecError> {
        SigningKey::from_keypair_bytes(&self.0)
            .map_err(|_| CodecError::InvalidSecretKey("public half does not match seed"))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(<redacted>)")
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = CodecError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; SECRET_KEY_SIZE] = slice
            .try_into()
            .map_err(|_| CodecError::InvalidSecretKey("expected 64 bytes"))?;
        Ok(Self(arr))
    }
}

/// A 64-byte detached Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_SIZE]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; SIGNATURE_SIZE] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }

    /// The zero signature (never valid, used as placeholder).
    pub const ZERO: Self = Self([0u8; SIGNATURE_SIZE]);
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; SIGNATURE_SIZE]> for Signature {
    fn from(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }
}

/// A signing keypair as handed around by callers.
///
/// The codec only ever borrows this. It is never stored or mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl KeyPair {
    /// Derive a keypair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(&SigningKey::from_bytes(seed))
    }

    /// Build a keypair from unchecked byte slices.
    ///
    /// Fails if either slice has the wrong length or the public key is not
    /// the one embedded in the secret key.
    pub fn from_slices(public_key: &[u8], secret_key: &[u8]) -> Result<Self, CodecError> {
        let public_key = PublicKey::try_from(public_key)?;
        let secret_key = SecretKey::try_from(secret_key)?;
        let keypair = Self {
            public_key,
            secret_key,
        };
        keypair.check()?;
        Ok(keypair)
    }

    /// Check that the public key matches the secret key's public half.
    pub fn check(&self) -> Result<(), CodecError> {
        if self.secret_key.embedded_public_key() != self.public_key {
            return Err(CodecError::InvalidPublicKey(
                "does not match the secret key",
            ));
        }
        Ok(())
    }

    fn from_signing_key(signing_key: &SigningKey) -> Self {
        Self {
            public_key: PublicKey(signing_key.verifying_key().to_bytes()),
            secret_key: SecretKey(signing_key.to_keypair_bytes()),
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.public_key)
    }
}

/// The narrow cryptographic interface the codec consumes.
///
/// Implementations must be safe to share between threads; in particular the
/// random source behind [`secure_random_bytes`](Self::secure_random_bytes)
/// must not need external locking.
pub trait CryptoProvider: Send + Sync {
    /// Generate a fresh random keypair.
    fn generate_keypair(&self) -> KeyPair;

    /// Produce a detached signature over `message`.
    fn sign_detached(&self, message: &[u8], secret_key: &SecretKey)
        -> Result<Signature, CodecError>;

    /// Check a detached signature.
    fn verify_detached(&self, signature: &Signature, message: &[u8], public_key: &PublicKey)
        -> bool;

    /// Fill `output` with a deterministic hash of `input`. The output length
    /// is part of the hash, so different lengths are unrelated.
    fn generic_hash(&self, output: &mut [u8], input: &[u8]) -> Result<(), CodecError>;

    /// Fill `output` with cryptographically secure random bytes.
    fn secure_random_bytes(&self, output: &mut [u8]);
}

/// Ed25519 + BLAKE2b provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct DalekProvider;

impl CryptoProvider for DalekProvider {
    fn generate_keypair(&self) -> KeyPair {
        let mut rng = rand::thread_rng();
        KeyPair::from_signing_key(&SigningKey::generate(&mut rng))
    }

    fn sign_detached(
        &self,
        message: &[u8],
        secret_key: &SecretKey,
    ) -> Result<Signature, CodecError> {
        let signing_key = secret_key.signing_key()?;
        Ok(Signature(signing_key.sign(message).to_bytes()))
    }

    fn verify_detached(
        &self,
        signature: &Signature,
        message: &[u8],
        public_key: &PublicKey,
    ) -> bool {
        public_key.verify(message, signature)
    }

    fn generic_hash(&self, output: &mut [u8], input: &[u8]) -> Result<(), CodecError> {
        let len = output.len();
        let invalid = || {
            CodecError::InvalidArgument(format!("hash output must be 1-64 bytes, got {len}"))
        };
        let mut hasher = Blake2bVar::new(output.len()).map_err(|_| invalid())?;
        hasher.update(input);
        hasher.finalize_variable(output).map_err(|_| invalid())
    }

    fn secure_random_bytes(&self, output: &mut [u8]) {
        rand::thread_rng().fill_bytes(output);
    }
}
