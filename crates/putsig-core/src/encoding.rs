//! Signable encodings for mutable records.
//!
//! Three layouts are supported. They are not interchangeable: the same
//! `(value, salt, seq)` produces different bytes under each.
//!
//! - [`EncodingMode::Raw`]: `value` when unsalted, otherwise
//!   `len(salt) || salt || value`. Seq is not encoded.
//! - [`EncodingMode::Versioned`]: `u64_be(seq) || len(salt) || salt || value`.
//! - [`EncodingMode::Bencode`]: the bencoded dictionary `{salt, seq, v}` with
//!   the outer `d`/`e` stripped, i.e. `4:salt<salt>3:seqi<seq>e1:v<value>`.
//!   Verifiers re-add the markers from context.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::bencode::{self, Value};
use crate::error::{CodecError, DecodeError};
use crate::validation::{validate_salt, validate_signable, validate_value};

/// Maximum value size in bytes.
///
/// The value plus packet overhead (key, signature, framing) has to stay under
/// a typical network MTU of about 1400 bytes.
pub const VALUE_MAX_SIZE: usize = 1000;

/// Smallest salt accepted by raw mode and by salt generation.
pub const SALT_MIN_SIZE: usize = 16;

/// Largest salt accepted by every mode.
pub const SALT_MAX_SIZE: usize = 64;

/// Width of the big-endian seq prefix in versioned mode.
const SEQ_WIDTH: usize = 8;

mod keys {
    pub const SALT: &[u8] = b"salt";
    pub const SEQ: &[u8] = b"seq";
    pub const VALUE: &[u8] = b"v";
}

/// Which signable layout to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Salt prefix only, identity when unsalted.
    #[default]
    Raw,
    /// Fixed-width seq and salt-length prefix.
    Versioned,
    /// Bencode dictionary fragment.
    Bencode,
}

impl EncodingMode {
    /// All modes, in declaration order.
    pub const ALL: [EncodingMode; 3] = [Self::Raw, Self::Versioned, Self::Bencode];

    /// The lowercase mode name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Versioned => "versioned",
            Self::Bencode => "bencode",
        }
    }

    /// Inclusive `(min, max)` salt length for a salt that is present.
    pub const fn salt_bounds(self) -> (usize, usize) {
        match self {
            Self::Raw => (SALT_MIN_SIZE, SALT_MAX_SIZE),
            Self::Versioned | Self::Bencode => (0, SALT_MAX_SIZE),
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| CodecError::InvalidArgument(format!("unknown encoding: {s:?}")))
    }
}

/// Encode `(value, salt, seq)` into signable bytes under `mode`.
///
/// `salt` of `None` means "no salt"; `Some(&[])` is an explicit zero-length
/// salt, which raw mode rejects and the other modes encode as empty. `seq`
/// defaults to 0.
pub fn signable_bytes(
    mode: EncodingMode,
    value: &[u8],
    salt: Option<&[u8]>,
    seq: Option<u64>,
) -> Result<Vec<u8>, CodecError> {
    validate_signable(mode, value, salt)?;

    let bytes = match mode {
        EncodingMode::Raw => encode_raw(value, salt),
        EncodingMode::Versioned => {
            encode_versioned(value, salt.unwrap_or_default(), seq.unwrap_or(0))
        }
        EncodingMode::Bencode => encode_bencode(value, salt.unwrap_or_default(), seq.unwrap_or(0)),
    };
    Ok(bytes)
}

fn encode_raw(value: &[u8], salt: Option<&[u8]>) -> Vec<u8> {
    let Some(salt) = salt else {
        return value.to_vec();
    };

    let mut buf = Vec::with_capacity(1 + salt.len() + value.len());
    // Validated to at most 64, fits in one byte
    buf.push(salt.len() as u8);
    buf.extend_from_slice(salt);
    buf.extend_from_slice(value);
    buf
}

fn encode_versioned(value: &[u8], salt: &[u8], seq: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SEQ_WIDTH + 1 + salt.len() + value.len());
    buf.extend_from_slice(&seq.to_be_bytes());
    buf.push(salt.len() as u8);
    buf.extend_from_slice(salt);
    buf.extend_from_slice(value);
    buf
}

fn encode_bencode(value: &[u8], salt: &[u8], seq: u64) -> Vec<u8> {
    let entries = vec![
        (keys::SALT.to_vec(), Value::Bytes(salt.to_vec())),
        (keys::SEQ.to_vec(), Value::Integer(seq.into())),
        (keys::VALUE.to_vec(), Value::Bytes(value.to_vec())),
    ];
    bencode::encode_dict_body(&entries)
}

/// The fields recovered from signable bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignableParts {
    pub salt: Vec<u8>,
    pub seq: u64,
    pub value: Vec<u8>,
}

impl SignableParts {
    /// Re-encode under `mode`.
    ///
    /// For raw mode an empty salt is treated as absent.
    pub fn encode(&self, mode: EncodingMode) -> Result<Vec<u8>, CodecError> {
        let salt = match mode {
            EncodingMode::Raw if self.salt.is_empty() => None,
            _ => Some(self.salt.as_slice()),
        };
        signable_bytes(mode, &self.value, salt, Some(self.seq))
    }
}

/// Split signable bytes back into their fields.
///
/// Only the self-delimiting layouts can be decoded. Raw bytes without
/// out-of-band knowledge of whether a salt was used are ambiguous.
pub fn decode_signable(mode: EncodingMode, bytes: &[u8]) -> Result<SignableParts, DecodeError> {
    match mode {
        EncodingMode::Raw => Err(DecodeError::UnsupportedMode(mode)),
        EncodingMode::Versioned => decode_versioned(bytes),
        EncodingMode::Bencode => decode_bencode(bytes),
    }
}

fn decode_versioned(bytes: &[u8]) -> Result<SignableParts, DecodeError> {
    if bytes.len() < SEQ_WIDTH + 1 {
        return Err(DecodeError::UnexpectedEof(bytes.len()));
    }

    let mut seq_bytes = [0u8; SEQ_WIDTH];
    seq_bytes.copy_from_slice(&bytes[..SEQ_WIDTH]);
    let seq = u64::from_be_bytes(seq_bytes);

    let salt_len = bytes[SEQ_WIDTH] as usize;
    let rest = &bytes[SEQ_WIDTH + 1..];
    if rest.len() < salt_len {
        return Err(DecodeError::UnexpectedEof(bytes.len()));
    }
    let (salt, value) = rest.split_at(salt_len);

    validate_salt(EncodingMode::Versioned, Some(salt))?;
    validate_value(value)?;

    Ok(SignableParts {
        salt: salt.to_vec(),
        seq,
        value: value.to_vec(),
    })
}

fn decode_bencode(bytes: &[u8]) -> Result<SignableParts, DecodeError> {
    let mut wrapped = Vec::with_capacity(bytes.len() + 2);
    wrapped.push(b'd');
    wrapped.extend_from_slice(bytes);
    wrapped.push(b'e');

    let dict = bencode::decode(&wrapped)?;
    match &dict {
        Value::Dict(entries) if entries.len() == 3 => {}
        _ => {
            return Err(DecodeError::Malformed(
                "expected exactly the keys salt, seq and v".into(),
            ))
        }
    }

    let salt = dict
        .get(keys::SALT)
        .and_then(Value::as_bytes)
        .ok_or_else(|| DecodeError::Malformed("salt must be a byte string".into()))?;
    let seq = dict
        .get(keys::SEQ)
        .and_then(Value::as_integer)
        .ok_or_else(|| DecodeError::Malformed("seq must be an integer".into()))?;
    let seq = u64::try_from(seq)
        .map_err(|_| DecodeError::Malformed(format!("seq {seq} out of range")))?;
    let value = dict
        .get(keys::VALUE)
        .and_then(Value::as_bytes)
        .ok_or_else(|| DecodeError::Malformed("v must be a byte string".into()))?;

    validate_salt(EncodingMode::Bencode, Some(salt))?;
    validate_value(value)?;

    Ok(SignableParts {
        salt: salt.to_vec(),
        seq,
        value: value.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUE: &[u8] = b"test";

    #[test]
    fn test_raw_identity_without_salt() {
        let bytes = signable_bytes(EncodingMode::Raw, VALUE, None, None).unwrap();
        assert_eq!(bytes, VALUE);
    }

    #[test]
    fn test_raw_ignores_seq() {
        let bytes = signable_bytes(EncodingMode::Raw, VALUE, None, Some(1)).unwrap();
        assert_eq!(bytes, VALUE);
    }

    #[test]
    fn test_raw_salt_prefix() {
        let salt = [0xabu8; 16];
        let bytes = signable_bytes(EncodingMode::Raw, VALUE, Some(&salt), None).unwrap();
        assert_eq!(bytes[0], 16);
        assert_eq!(&bytes[1..17], &salt);
        assert_eq!(&bytes[17..], VALUE);
    }

    #[test]
    fn test_raw_rejects_explicit_empty_salt() {
        let result = signable_bytes(EncodingMode::Raw, VALUE, Some(&[]), None);
        assert!(matches!(result, Err(CodecError::InvalidSaltSize { len: 0, .. })));
    }

    #[test]
    fn test_versioned_defaults() {
        let bytes = signable_bytes(EncodingMode::Versioned, VALUE, None, None).unwrap();
        let mut expected = vec![0u8; 9];
        expected.extend_from_slice(VALUE);
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 13);
    }

    #[test]
    fn test_versioned_seq_prefix() {
        let zero = signable_bytes(EncodingMode::Versioned, VALUE, None, Some(0)).unwrap();
        let one = signable_bytes(EncodingMode::Versioned, VALUE, None, Some(1)).unwrap();

        let mut head = [0u8; 8];
        head.copy_from_slice(&one[..8]);
        assert_eq!(u64::from_be_bytes(head), 1);
        assert_eq!(&one[8..], &zero[8..]);
    }

    #[test]
    fn test_versioned_with_salt() {
        let salt = b"ns";
        let bytes = signable_bytes(EncodingMode::Versioned, VALUE, Some(salt), Some(u64::MAX)).unwrap();
        assert_eq!(&bytes[..8], &[0xff; 8]);
        assert_eq!(bytes[8], 2);
        assert_eq!(&bytes[9..11], salt);
        assert_eq!(&bytes[11..], VALUE);
    }

    #[test]
    fn test_bencode_defaults() {
        let bytes = signable_bytes(EncodingMode::Bencode, VALUE, None, None).unwrap();
        assert_eq!(bytes, b"4:salt0:3:seqi0e1:v4:test");
    }

    #[test]
    fn test_bencode_with_salt_and_seq() {
        let bytes = signable_bytes(EncodingMode::Bencode, VALUE, Some(b"foobar"), Some(42)).unwrap();
        assert_eq!(bytes, b"4:salt6:foobar3:seqi42e1:v4:test");
    }

    #[test]
    fn test_bencode_parses_when_wrapped() {
        let bytes = signable_bytes(EncodingMode::Bencode, VALUE, Some(b"ab"), Some(7)).unwrap();
        let mut wrapped = vec![b'd'];
        wrapped.extend_from_slice(&bytes);
        wrapped.push(b'e');

        let dict = bencode::decode(&wrapped).unwrap();
        assert_eq!(dict.get(b"salt").and_then(Value::as_bytes), Some(&b"ab"[..]));
        assert_eq!(dict.get(b"seq").and_then(Value::as_integer), Some(7));
        assert_eq!(dict.get(b"v").and_then(Value::as_bytes), Some(VALUE));
    }

    #[test]
    fn test_modes_differ() {
        let salt = [1u8; 20];
        let raw = signable_bytes(EncodingMode::Raw, VALUE, Some(&salt), Some(3)).unwrap();
        let versioned = signable_bytes(EncodingMode::Versioned, VALUE, Some(&salt), Some(3)).unwrap();
        let bencoded = signable_bytes(EncodingMode::Bencode, VALUE, Some(&salt), Some(3)).unwrap();
        assert_ne!(raw, versioned);
        assert_ne!(versioned, bencoded);
        assert_ne!(raw, bencoded);
    }

    #[test]
    fn test_value_too_large_in_every_mode() {
        let value = vec![0u8; VALUE_MAX_SIZE + 1];
        for mode in EncodingMode::ALL {
            assert!(matches!(
                signable_bytes(mode, &value, None, None),
                Err(CodecError::ValueTooLarge { len: 1001, max: 1000 })
            ));
        }
    }

    #[test]
    fn test_mode_names() {
        for mode in EncodingMode::ALL {
            assert_eq!(mode.as_str().parse::<EncodingMode>().unwrap(), mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
        assert!(matches!(
            "cbor".parse::<EncodingMode>(),
            Err(CodecError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_decode_versioned() {
        let bytes = signable_bytes(EncodingMode::Versioned, VALUE, Some(b"salty"), Some(9)).unwrap();
        let parts = decode_signable(EncodingMode::Versioned, &bytes).unwrap();
        assert_eq!(
            parts,
            SignableParts {
                salt: b"salty".to_vec(),
                seq: 9,
                value: VALUE.to_vec(),
            }
        );
        assert_eq!(parts.encode(EncodingMode::Versioned).unwrap(), bytes);
    }

    #[test]
    fn test_decode_versioned_truncated() {
        assert!(matches!(
            decode_signable(EncodingMode::Versioned, &[0u8; 8]),
            Err(DecodeError::UnexpectedEof(8))
        ));

        // Claims a 10-byte salt but only carries 3 bytes
        let mut bytes = vec![0u8; 8];
        bytes.push(10);
        bytes.extend_from_slice(b"abc");
        assert!(matches!(
            decode_signable(EncodingMode::Versioned, &bytes),
            Err(DecodeError::UnexpectedEof(12))
        ));
    }

    #[test]
    fn test_decode_versioned_rejects_oversized_salt() {
        let mut bytes = vec![0u8; 8];
        bytes.push(65);
        bytes.extend_from_slice(&[0u8; 65]);
        assert!(matches!(
            decode_signable(EncodingMode::Versioned, &bytes),
            Err(DecodeError::Invalid(CodecError::InvalidSaltSize { len: 65, .. }))
        ));
    }

    #[test]
    fn test_decode_bencode() {
        let bytes = b"4:salt3:abc3:seqi5e1:v4:test";
        let parts = decode_signable(EncodingMode::Bencode, bytes).unwrap();
        assert_eq!(parts.salt, b"abc");
        assert_eq!(parts.seq, 5);
        assert_eq!(parts.value, VALUE);
        assert_eq!(parts.encode(EncodingMode::Bencode).unwrap(), bytes);
    }

    #[test]
    fn test_decode_bencode_rejects_bad_shapes() {
        // Missing salt
        assert!(matches!(
            decode_signable(EncodingMode::Bencode, b"3:seqi0e1:v4:test"),
            Err(DecodeError::Malformed(_))
        ));
        // Negative seq
        assert!(matches!(
            decode_signable(EncodingMode::Bencode, b"4:salt0:3:seqi-1e1:v4:test"),
            Err(DecodeError::Malformed(_))
        ));
        // seq as a string
        assert!(matches!(
            decode_signable(EncodingMode::Bencode, b"4:salt0:3:seq1:01:v4:test"),
            Err(DecodeError::Malformed(_))
        ));
        // Keys out of order
        assert!(matches!(
            decode_signable(EncodingMode::Bencode, b"3:seqi0e4:salt0:1:v4:test"),
            Err(DecodeError::UnsortedKeys(_))
        ));
    }

    #[test]
    fn test_decode_raw_unsupported() {
        assert_eq!(
            decode_signable(EncodingMode::Raw, VALUE),
            Err(DecodeError::UnsupportedMode(EncodingMode::Raw))
        );
    }

    #[test]
    fn test_parts_encode_raw_treats_empty_salt_as_absent() {
        let parts = SignableParts {
            salt: Vec::new(),
            seq: 3,
            value: VALUE.to_vec(),
        };
        assert_eq!(parts.encode(EncodingMode::Raw).unwrap(), VALUE);
    }
}
