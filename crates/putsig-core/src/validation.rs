//! Input validation for signable encodings.
//!
//! Every check runs before any bytes are written, so a failed call never
//! produces partial output.

use crate::encoding::{EncodingMode, SALT_MAX_SIZE, SALT_MIN_SIZE, VALUE_MAX_SIZE};
use crate::error::CodecError;

/// Check the value length.
pub fn validate_value(value: &[u8]) -> Result<(), CodecError> {
    if value.len() > VALUE_MAX_SIZE {
        return Err(CodecError::ValueTooLarge {
            len: value.len(),
            max: VALUE_MAX_SIZE,
        });
    }
    Ok(())
}

/// Check a salt against the bounds of `mode`.
///
/// In raw mode an absent salt is skipped entirely, but a present one, even a
/// zero-length one, must be 16–64 bytes. The other modes treat an absent
/// salt as zero-length and only cap the length at 64.
pub fn validate_salt(mode: EncodingMode, salt: Option<&[u8]>) -> Result<(), CodecError> {
    let Some(salt) = salt else {
        return Ok(());
    };

    let (min, max) = mode.salt_bounds();
    if salt.len() < min || salt.len() > max {
        return Err(CodecError::InvalidSaltSize {
            len: salt.len(),
            min,
            max,
        });
    }
    Ok(())
}

/// Check a requested salt size for salt generation.
pub fn validate_salt_size(size: usize) -> Result<(), CodecError> {
    if !(SALT_MIN_SIZE..=SALT_MAX_SIZE).contains(&size) {
        return Err(CodecError::InvalidArgument(format!(
            "salt size must be between {SALT_MIN_SIZE} and {SALT_MAX_SIZE} bytes (inclusive), got {size}"
        )));
    }
    Ok(())
}

/// Single validation pass for a signable encoding: value first, then salt.
pub fn validate_signable(
    mode: EncodingMode,
    value: &[u8],
    salt: Option<&[u8]>,
) -> Result<(), CodecError> {
    validate_value(value)?;
    validate_salt(mode, salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_boundary() {
        assert!(validate_value(&[0u8; VALUE_MAX_SIZE]).is_ok());
        assert_eq!(
            validate_value(&[0u8; VALUE_MAX_SIZE + 1]),
            Err(CodecError::ValueTooLarge {
                len: 1001,
                max: 1000
            })
        );
    }

    #[test]
    fn test_raw_salt_bounds() {
        for len in [16, 32, 64] {
            assert!(validate_salt(EncodingMode::Raw, Some(&vec![0; len])).is_ok());
        }
        for len in [0, 15, 65] {
            assert!(matches!(
                validate_salt(EncodingMode::Raw, Some(&vec![0; len])),
                Err(CodecError::InvalidSaltSize { min: 16, max: 64, .. })
            ));
        }
        assert!(validate_salt(EncodingMode::Raw, None).is_ok());
    }

    #[test]
    fn test_versioned_and_bencode_salt_bounds() {
        for mode in [EncodingMode::Versioned, EncodingMode::Bencode] {
            for len in [0, 1, 15, 64] {
                assert!(validate_salt(mode, Some(&vec![0; len])).is_ok());
            }
            assert_eq!(
                validate_salt(mode, Some(&[0; 65])),
                Err(CodecError::InvalidSaltSize {
                    len: 65,
                    min: 0,
                    max: 64
                })
            );
        }
    }

    #[test]
    fn test_salt_size_argument() {
        assert!(validate_salt_size(16).is_ok());
        assert!(validate_salt_size(64).is_ok());
        assert!(matches!(validate_salt_size(15), Err(CodecError::InvalidArgument(_))));
        assert!(matches!(validate_salt_size(65), Err(CodecError::InvalidArgument(_))));
    }

    #[test]
    fn test_value_checked_before_salt() {
        let result = validate_signable(EncodingMode::Raw, &[0u8; 1001], Some(&[0u8; 3]));
        assert!(matches!(result, Err(CodecError::ValueTooLarge { .. })));
    }
}
