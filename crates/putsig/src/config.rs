//! Codec configuration.

use putsig_core::{validate_salt_size, EncodingMode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default length of generated salts.
pub const DEFAULT_SALT_SIZE: usize = 32;

/// Configuration for a [`SignableCodec`](crate::SignableCodec).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Encoding used when the options do not pin one.
    pub default_encoding: EncodingMode,
    /// Length of salts produced by `default_salt`.
    pub salt_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_encoding: EncodingMode::Raw,
            salt_size: DEFAULT_SALT_SIZE,
        }
    }
}

impl CodecConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configured salt size is generatable.
    pub fn validate(&self) -> Result<()> {
        validate_salt_size(self.salt_size).map_err(|e| Error::Config(e.to_string()))
    }
}
