//! Serialization of packets to and from wire bytes.
//!
//! Encoding serializes a [`Packet`] to a [`schema::PacketMessage`] and wraps
//! the message bytes according to a [`Framing`]. Decoding reverses both
//! steps and validates every channel before the directory is built.
//!
//! ## Usage Example
//!
//! ```rust
//! use stationpack::{Channel, ChannelType, Framing, NumericPayload, Packet, PayloadKind};
//!
//! let mut packet = Packet::new();
//! packet.identity.station_id = "1637680001".into();
//! packet.add_channel(
//!     Channel::evenly_sampled("barometer", vec![ChannelType::Barometer], 30.0, 0)?
//!         .with_payload(NumericPayload::Float32(vec![101.3, 101.4]), PayloadKind::Float32)?,
//! )?;
//!
//! let bytes = packet.encode(Framing::Compressed)?;
//! let decoded = Packet::decode(&bytes, Framing::Compressed)?;
//! assert_eq!(decoded, packet);
//! # Ok::<(), stationpack::PacketError>(())
//! ```

pub mod convert;
pub mod framing;
pub mod schema;

pub use framing::{Framing, compress_frame, decompress_frame};

use prost::Message;
use tracing::debug;

use crate::{CodecConfig, Packet, Result};

impl Packet {
    /// Serialize this packet and frame it.
    pub fn encode(&self, framing: Framing) -> Result<Vec<u8>> {
        let message = convert::to_message(self).encode_to_vec();
        debug!(?framing, message_len = message.len(), "Encoding packet");
        framing.wrap(&message)
    }

    /// Decode framed bytes with the default configuration.
    pub fn decode(bytes: &[u8], framing: Framing) -> Result<Self> {
        Self::decode_with(bytes, framing, &CodecConfig::default())
    }

    /// Decode framed bytes, applying `config`'s frame limits.
    ///
    /// Payloads are stored in their wire kind. Integer coercion applies to
    /// reads through [`Channel::get_payload_with`](crate::Channel::get_payload_with),
    /// so a decoded packet re-encodes to the same payload kinds.
    pub fn decode_with(bytes: &[u8], framing: Framing, config: &CodecConfig) -> Result<Self> {
        let message_bytes = framing.unwrap_frame(bytes, config)?;
        debug!(?framing, message_len = message_bytes.len(), "Decoding packet");
        let message = schema::PacketMessage::decode(message_bytes.as_slice())?;
        convert::from_message(message)
    }

    /// Length of this packet's serialized message, before framing.
    pub fn encoded_len(&self) -> usize {
        convert::to_message(self).encoded_len()
    }
}
