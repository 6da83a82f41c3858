//! Loosely-typed option objects.
//!
//! Callers on a dynamic boundary (FFI, scripting hosts, JSON-RPC) hand us
//! `serde_json::Value`s instead of typed options. This module turns them into
//! [`SignableOptions`] / [`SignOptions`] and is where `TypeMismatch` shows up.
//!
//! Byte buffers are accepted as a JSON array of integers in `0..=255` or as a
//! Node-style `{"type": "Buffer", "data": [...]}` object.

use serde_json::{Map, Value};

use crate::crypto::{KeyPair, PublicKey, SecretKey};
use crate::error::CodecError;
use crate::options::{SignOptions, SignableOptions};

const BYTES: &str = "a byte buffer";

/// Parse a byte buffer, reporting `field` on mismatch.
pub fn bytes_from_json(field: &'static str, value: &Value) -> Result<Vec<u8>, CodecError> {
    let mismatch = || CodecError::TypeMismatch {
        field,
        expected: BYTES,
    };

    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) if obj.get("type").and_then(Value::as_str) == Some("Buffer") => {
            obj.get("data").and_then(Value::as_array).ok_or_else(mismatch)?
        }
        _ => return Err(mismatch()),
    };

    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(mismatch)
        })
        .collect()
}

/// Parse the value being signed.
pub fn value_from_json(value: &Value) -> Result<Vec<u8>, CodecError> {
    bytes_from_json("value", value)
}

/// Parse signable options. `null` is the same as `{}`.
pub fn signable_options_from_json(opts: &Value) -> Result<SignableOptions, CodecError> {
    match opts {
        Value::Null => Ok(SignableOptions::default()),
        Value::Object(obj) => signable_fields(obj),
        _ => Err(CodecError::TypeMismatch {
            field: "options",
            expected: "an object",
        }),
    }
}

/// Parse signing options. The keypair is optional here; the codec reports
/// its absence.
pub fn sign_options_from_json(opts: &Value) -> Result<SignOptions, CodecError> {
    let Value::Object(obj) = opts else {
        return Err(CodecError::TypeMismatch {
            field: "options",
            expected: "an object",
        });
    };

    let keypair = match obj.get("keypair") {
        None | Some(Value::Null) => None,
        Some(Value::Object(kp)) => Some(keypair_fields(kp)?),
        Some(_) => {
            return Err(CodecError::TypeMismatch {
                field: "keypair",
                expected: "an object",
            })
        }
    };

    Ok(SignOptions {
        keypair,
        signable: signable_fields(obj)?,
    })
}

fn signable_fields(obj: &Map<String, Value>) -> Result<SignableOptions, CodecError> {
    let mut opts = SignableOptions::default();

    match obj.get("salt") {
        None | Some(Value::Null) => {}
        Some(salt) => opts.salt = Some(bytes_from_json("salt", salt)?.into()),
    }

    match obj.get("seq") {
        None | Some(Value::Null) => {}
        Some(seq) => {
            opts.seq = Some(seq.as_u64().ok_or(CodecError::TypeMismatch {
                field: "seq",
                expected: "a non-negative integer",
            })?)
        }
    }

    match obj.get("encoding") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) => opts.encoding = Some(name.parse()?),
        Some(_) => {
            return Err(CodecError::TypeMismatch {
                field: "encoding",
                expected: "a string",
            })
        }
    }

    Ok(opts)
}

fn keypair_fields(obj: &Map<String, Value>) -> Result<KeyPair, CodecError> {
    let secret_key = obj
        .get("secretKey")
        .filter(|v| !v.is_null())
        .ok_or(CodecError::InvalidSecretKey("keypair.secretKey is required"))?;
    let secret_key = bytes_from_json("keypair.secretKey", secret_key)?;

    let public_key = obj
        .get("publicKey")
        .filter(|v| !v.is_null())
        .ok_or(CodecError::InvalidPublicKey("keypair.publicKey is required"))?;
    let public_key = bytes_from_json("keypair.publicKey", public_key)?;

    let keypair = KeyPair {
        public_key: PublicKey::try_from(public_key.as_slice())?,
        secret_key: SecretKey::try_from(secret_key.as_slice())?,
    };
    keypair.check()?;
    Ok(keypair)
}
