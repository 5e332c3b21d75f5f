//! Codec configuration
//!
//! Behavior that would otherwise hang off process-wide switches is carried in
//! an explicit [`CodecConfig`] value and passed to the `*_with` variants of
//! decode and the channel payload accessors. Decoding only consults the frame
//! limits; integer coercion happens when payloads are read or written, so
//! stored payloads always keep their wire kind.
//!
//! ```rust
//! use stationpack::CodecConfig;
//!
//! let config = CodecConfig::from_yaml("coerce_integer_payloads: true\n").unwrap();
//! assert!(config.coerce_integer_payloads);
//! assert_eq!(config.max_decompressed_len, CodecConfig::DEFAULT_MAX_DECOMPRESSED_LEN);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{NumericPayload, PayloadKind, Result};

/// Options threaded through decode and the payload accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(default)]
pub struct CodecConfig {
    /// Surface integer payloads as `Float64` on read, and round (rather than
    /// truncate) float values stored into integer payload kinds on write.
    pub coerce_integer_payloads: bool,
    /// Largest uncompressed length a compressed frame header may declare.
    pub max_decompressed_len: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            coerce_integer_payloads: false,
            max_decompressed_len: Self::DEFAULT_MAX_DECOMPRESSED_LEN,
        }
    }
}

impl CodecConfig {
    /// 64 MiB.
    pub const DEFAULT_MAX_DECOMPRESSED_LEN: u32 = 64 * 1024 * 1024;

    /// Parse a configuration from a YAML document. Missing fields take defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: CodecConfig = serde_yaml_ng::from_str(yaml)?;
        debug!(
            coerce_integer_payloads = config.coerce_integer_payloads,
            max_decompressed_len = config.max_decompressed_len,
            "Loaded codec configuration"
        );
        Ok(config)
    }

    /// Enable or disable integer-to-float coercion.
    pub fn with_integer_coercion(mut self, enabled: bool) -> Self {
        self.coerce_integer_payloads = enabled;
        self
    }

    /// Apply read-side coercion to a payload.
    pub fn coerce_read(&self, payload: NumericPayload) -> NumericPayload {
        if self.coerce_integer_payloads && payload.is_integer() {
            payload.cast(PayloadKind::Float64)
        } else {
            payload
        }
    }

    /// Apply write-side coercion when storing `payload` as `kind`.
    pub fn coerce_write(&self, payload: NumericPayload, kind: PayloadKind) -> NumericPayload {
        if self.coerce_integer_payloads {
            payload.cast_rounded(kind)
        } else {
            payload.cast(kind)
        }
    }
}
