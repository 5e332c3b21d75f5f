//! Reading, building and mutating binary sensor packets from monitoring stations.
//!
//! A station packet bundles heterogeneous sensor channels (audio, barometric,
//! inertial, location, image, time synchronization) recorded on one device.
//! Channels are sampled either on a fixed clock or with per-sample timestamps.
//!
//! # Features
//!
//! - **Channel Codec**: several co-timed readings share one interleaved payload
//! - **Numeric Payloads**: exactly one of seven numeric representations per channel
//! - **Statistics Cache**: per-type mean, standard deviation and median kept in
//!   step with payload edits
//! - **Directory**: O(1) lookup of the channel owning any channel type, with
//!   uniqueness on add
//! - **Framing**: length-prefixed LZ4 block compression around a protobuf message
//!
//! # Quick Start
//!
//! ```rust
//! use stationpack::{Channel, ChannelType, Framing, NumericPayload, Packet, PayloadKind};
//!
//! let mut packet = Packet::new();
//! let mut location = Channel::unevenly_sampled(
//!     "gps",
//!     vec![ChannelType::Latitude, ChannelType::Longitude],
//!     vec![1_637_680_001_000_000, 1_637_680_002_000_000],
//! )?;
//! location.set_interleaved_payload(
//!     &[
//!         NumericPayload::Float64(vec![22.22, 22.23]),
//!         NumericPayload::Float64(vec![-159.40, -159.41]),
//!     ],
//!     PayloadKind::Float64,
//!     true,
//! )?;
//! packet.add_channel(location)?;
//!
//! let bytes = packet.encode(Framing::Compressed)?;
//! let decoded = Packet::decode(&bytes, Framing::Compressed)?;
//!
//! let gps = decoded.channel(ChannelType::Longitude).expect("longitude present");
//! let longitude = gps.get_payload(ChannelType::Longitude);
//! assert_eq!(longitude, NumericPayload::Float64(vec![-159.40, -159.41]));
//! # Ok::<(), stationpack::PacketError>(())
//! ```

// Core types and error handling
mod config;
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Channel and packet model
pub mod channel;
pub mod packet;

// Serialization
pub mod wire;

// Core exports
pub use config::CodecConfig;
pub use error::*;
pub use types::{ChannelType, NumericPayload, PayloadKind, SummaryStats};

// Model exports
pub use channel::{Channel, EvenSampling, Sampling, SamplingKind, UnevenSampling};
pub use packet::{
    ChannelDirectory, ChannelSlot, DeviceInfo, Packet, PacketIdentity, PacketTimestamps, ServerInfo,
};

// Wire exports
pub use wire::Framing;
