//! Frame layer: length prefix plus LZ4 block compression
//!
//! ## Frame Structure
//!
//! A compressed frame is:
//!
//! 1. **Length Header** (4 bytes) - big-endian `u32`, the message length before compression
//! 2. **Compressed Block** - LZ4 block-format bytes of the serialized message
//!
//! Uncompressed framing carries the serialized message bytes with no header.
//! Which mode applies is decided out of band, conventionally by file extension.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace};

use crate::{CodecConfig, PacketError, Result};

/// Size of the big-endian length header.
pub const LENGTH_HEADER_SIZE: usize = 4;

/// File extension of compressed packet files.
pub const COMPRESSED_EXTENSION: &str = "rdvxz";

/// Transport mode of serialized packet bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    #[default]
    Compressed,
    Uncompressed,
}

impl Framing {
    /// Select framing by file extension, with or without a leading dot.
    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.');
        if extension.eq_ignore_ascii_case(COMPRESSED_EXTENSION) {
            Framing::Compressed
        } else {
            Framing::Uncompressed
        }
    }

    /// Select framing by the extension of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|extension| extension.to_str())
            .map_or(Framing::Uncompressed, Framing::from_extension)
    }

    /// Wrap serialized message bytes for transport.
    pub fn wrap(self, message: &[u8]) -> Result<Vec<u8>> {
        match self {
            Framing::Compressed => compress_frame(message),
            Framing::Uncompressed => Ok(message.to_vec()),
        }
    }

    /// Recover serialized message bytes from transport bytes.
    pub fn unwrap_frame(self, bytes: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
        match self {
            Framing::Compressed => decompress_frame(bytes, config),
            Framing::Uncompressed => Ok(bytes.to_vec()),
        }
    }
}

/// Compress `message` and prefix it with its uncompressed length.
pub fn compress_frame(message: &[u8]) -> Result<Vec<u8>> {
    let declared_len = u32::try_from(message.len()).map_err(|_| PacketError::Encode {
        details: format!("message of {} bytes does not fit a u32 length header", message.len()),
    })?;

    let compressed = lz4_flex::block::compress(message);
    let mut frame = Vec::with_capacity(LENGTH_HEADER_SIZE + compressed.len());
    frame.extend_from_slice(&declared_len.to_be_bytes());
    frame.extend_from_slice(&compressed);

    debug!(message_len = message.len(), frame_len = frame.len(), "Compressed frame");
    Ok(frame)
}

/// Validate the length header and decompress exactly that many bytes.
pub fn decompress_frame(frame: &[u8], config: &CodecConfig) -> Result<Vec<u8>> {
    trace!("Reading frame header ({} bytes)", LENGTH_HEADER_SIZE);
    let Some((header, block)) = frame.split_first_chunk::<LENGTH_HEADER_SIZE>() else {
        return Err(PacketError::decode(
            "frame header",
            format!("need {} header bytes, have {}", LENGTH_HEADER_SIZE, frame.len()),
        ));
    };

    let expected_len = u32::from_be_bytes(*header);
    if expected_len == 0 {
        return Err(PacketError::decode("frame header", "declared uncompressed length is zero"));
    }
    if expected_len > config.max_decompressed_len {
        return Err(PacketError::decode(
            "frame header",
            format!(
                "declared uncompressed length {} exceeds limit {}",
                expected_len, config.max_decompressed_len
            ),
        ));
    }

    let expected_len = expected_len as usize;
    let mut message = vec![0u8; expected_len];
    let written = lz4_flex::block::decompress_into(block, &mut message)
        .map_err(|e| PacketError::decode("compressed block", e.to_string()))?;
    if written != expected_len {
        return Err(PacketError::decode(
            "compressed block",
            format!("decompressed {} bytes, header declared {}", written, expected_len),
        ));
    }

    debug!(frame_len = frame.len(), message_len = expected_len, "Decompressed frame");
    Ok(message)
}
