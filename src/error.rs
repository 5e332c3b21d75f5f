//! Error types for packet decoding, channel codecs, and packet mutation.
//!
//! Every fallible operation in the crate returns [`PacketError`]. Variants carry
//! structured context so callers can report precisely which header, channel
//! type, or interleave stride was at fault.
//!
//! ## Error Categories
//!
//! - **Decode Errors**: malformed length header, corrupt compressed stream, or
//!   message bytes that do not parse as a packet
//! - **Encode Errors**: a message too large for the frame length header
//! - **Payload Errors**: unknown numeric payload discriminator
//! - **Interleave Errors**: stride/offset or arity preconditions violated
//! - **Directory Errors**: duplicate channel types on add, missing types on
//!   edit/delete
//! - **Channel Errors**: channel construction preconditions and metadata shape
//! - **Config Errors**: unreadable codec configuration
//!
//! ## Read Totality
//!
//! Channel accessors such as [`Channel::get_payload`](crate::Channel::get_payload)
//! swallow interleave range errors and return an empty payload instead.
//! [`PacketError::is_read_absence`] identifies the variants treated that way.
//!
//! ```rust
//! use stationpack::{ChannelType, PacketError};
//!
//! let error = PacketError::channel_not_found(ChannelType::Barometer);
//! assert!(!error.is_read_absence());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use crate::ChannelType;
use thiserror::Error;

/// Result type alias for packet operations.
pub type Result<T, E = PacketError> = std::result::Result<T, E>;

/// Main error type for packet operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PacketError {
    #[error("Decode error in {context}: {details}")]
    Decode { context: String, details: String },

    #[error("Encode error: {details}")]
    Encode { details: String },

    #[error("Unknown payload kind '{kind}'")]
    PayloadKind { kind: String },

    #[error("Deinterleave out of range: offset {offset}, step {step}, length {len}")]
    InterleaveRange { offset: usize, step: usize, len: usize },

    #[error("Cannot interleave {count} arrays: {details}")]
    InterleaveArity { count: usize, details: String },

    #[error("Channel type {channel_type:?} already exists in packet")]
    ChannelConflict { channel_type: ChannelType },

    #[error("Channel type {channel_type:?} not found in packet")]
    ChannelNotFound { channel_type: ChannelType },

    #[error("Invalid channel: {details}")]
    InvalidChannel { details: String },

    #[error("Invalid metadata: {details}")]
    Metadata { details: String },

    #[error("Configuration error: {details}")]
    Config { details: String },
}

impl PacketError {
    /// Returns whether total accessors map this error to an empty result.
    pub fn is_read_absence(&self) -> bool {
        matches!(self, PacketError::InterleaveRange { .. })
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            PacketError::Decode { .. } => vec![
                "Check the framing mode matches the file (compressed vs uncompressed)",
                "Verify the byte source was not truncated",
                "Raise max_decompressed_len if the packet is legitimately large",
            ],
            PacketError::Encode { .. } => {
                vec!["Split oversized packets; a frame header holds at most u32::MAX bytes"]
            }
            PacketError::PayloadKind { .. } => vec![
                "Use one of the seven payload kinds (byte, uint32, uint64, int32, int64, float32, float64)",
                "Check spelling of the payload kind name",
            ],
            PacketError::InterleaveRange { .. } => vec![
                "Ensure offset is smaller than step",
                "Ensure the payload length is a multiple of the channel type count",
            ],
            PacketError::InterleaveArity { .. } => vec![
                "Provide at least two component arrays",
                "Ensure all component arrays share one length and payload kind",
            ],
            PacketError::ChannelConflict { .. } => vec![
                "Use edit_channel to replace an existing channel",
                "Delete the existing channel before adding",
            ],
            PacketError::ChannelNotFound { .. } => vec![
                "Check has_channel before editing or deleting",
                "Use add_channel for new channel types",
            ],
            PacketError::InvalidChannel { .. } => vec![
                "Declare at least one channel type",
                "Ensure payload length is a multiple of the channel type count",
                "Use a positive, finite sample rate",
            ],
            PacketError::Metadata { .. } => {
                vec!["Store metadata as alternating key/value entries"]
            }
            PacketError::Config { .. } => {
                vec!["Check configuration field names and value types"]
            }
        }
    }

    /// Helper constructor for decode errors.
    pub fn decode(context: impl Into<String>, details: impl Into<String>) -> Self {
        PacketError::Decode { context: context.into(), details: details.into() }
    }

    /// Helper constructor for unknown payload kinds.
    pub fn payload_kind(kind: impl Into<String>) -> Self {
        PacketError::PayloadKind { kind: kind.into() }
    }

    /// Helper constructor for interleave arity errors.
    pub fn interleave_arity(count: usize, details: impl Into<String>) -> Self {
        PacketError::InterleaveArity { count, details: details.into() }
    }

    /// Helper constructor for duplicate channel types.
    pub fn channel_conflict(channel_type: ChannelType) -> Self {
        PacketError::ChannelConflict { channel_type }
    }

    /// Helper constructor for missing channel types.
    pub fn channel_not_found(channel_type: ChannelType) -> Self {
        PacketError::ChannelNotFound { channel_type }
    }

    /// Helper constructor for channel precondition failures.
    pub fn invalid_channel(details: impl Into<String>) -> Self {
        PacketError::InvalidChannel { details: details.into() }
    }
}

impl From<prost::DecodeError> for PacketError {
    fn from(err: prost::DecodeError) -> Self {
        PacketError::decode("packet message", err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for PacketError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        PacketError::Config { details: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn error_messages_format_correctly_with_arbitrary_context(
            context in ".*",
            details in ".*",
            kind in "\\w+",
            offset in 0usize..1000,
            step in 0usize..1000,
            len in 0usize..1000
          ) {
            let decode_msg = PacketError::decode(context.clone(), details.clone()).to_string();
            prop_assert!(decode_msg.contains(&context));
            prop_assert!(decode_msg.contains(&details));

            let kind_msg = PacketError::payload_kind(kind.clone()).to_string();
            prop_assert!(kind_msg.contains(&kind));

            let range_msg = PacketError::InterleaveRange { offset, step, len }.to_string();
            prop_assert!(range_msg.contains(&offset.to_string()));
            prop_assert!(range_msg.contains(&step.to_string()));
            prop_assert!(range_msg.contains(&len.to_string()));
          }
        }
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<PacketError>();

        let error = PacketError::channel_conflict(ChannelType::Microphone);
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn only_range_errors_are_read_absence() {
        assert!(PacketError::InterleaveRange { offset: 3, step: 3, len: 6 }.is_read_absence());
        assert!(!PacketError::interleave_arity(1, "need two").is_read_absence());
        assert!(!PacketError::decode("header", "short").is_read_absence());
        assert!(!PacketError::channel_not_found(ChannelType::Latitude).is_read_absence());
    }

    #[test]
    fn recovery_methods_work() {
        let errors = [
            PacketError::decode("header", "short"),
            PacketError::Encode { details: "too large".into() },
            PacketError::payload_kind("complex128"),
            PacketError::InterleaveRange { offset: 0, step: 0, len: 0 },
            PacketError::interleave_arity(0, "empty"),
            PacketError::channel_conflict(ChannelType::Microphone),
            PacketError::channel_not_found(ChannelType::Microphone),
            PacketError::invalid_channel("no types"),
            PacketError::Metadata { details: "odd".into() },
            PacketError::Config { details: "bad".into() },
        ];

        for error in &errors {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty(), "{error} should offer guidance");
            for suggestion in suggestions {
                assert!(suggestion.len() > 5);
            }
        }
    }

    #[test]
    fn from_conversions_work() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("not: [a number").unwrap_err();
        let converted: PacketError = yaml_err.into();
        assert!(matches!(converted, PacketError::Config { .. }));
    }
}
