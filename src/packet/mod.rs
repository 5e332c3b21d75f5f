//! Packets: a station's channels plus descriptive fields.
//!
//! A [`Packet`] owns two ordered channel collections (evenly and unevenly
//! sampled) and a [`ChannelDirectory`] derived from them. Every mutation
//! ends in a full directory rebuild, so lookups by channel type never observe
//! a stale slot.
//!
//! ## Usage Example
//!
//! ```rust
//! use stationpack::{Channel, ChannelType, Packet, PacketError};
//!
//! let mut packet = Packet::default();
//! packet.add_channel(Channel::evenly_sampled("mic", vec![ChannelType::Microphone], 80.0, 0)?)?;
//! packet.add_channel(Channel::unevenly_sampled(
//!     "location",
//!     vec![ChannelType::Latitude, ChannelType::Longitude],
//!     vec![0, 1_000_000],
//! )?)?;
//!
//! assert!(packet.has_channel(ChannelType::Longitude));
//! assert!(!packet.has_channel(ChannelType::Altitude));
//!
//! let duplicate = Channel::evenly_sampled("mic2", vec![ChannelType::Microphone], 800.0, 0)?;
//! assert!(matches!(packet.add_channel(duplicate), Err(PacketError::ChannelConflict { .. })));
//! # Ok::<(), PacketError>(())
//! ```

pub mod directory;

pub use directory::{ChannelDirectory, ChannelSlot};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::channel::metadata_pairs;
use crate::{Channel, ChannelType, PacketError, Result, SamplingKind};

/// Identity and provenance of the station that produced a packet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct PacketIdentity {
    pub api: u32,
    pub uuid: String,
    pub station_id: String,
    pub authenticated_email: String,
    pub authentication_token: String,
    pub messaging_token: String,
    pub is_backfilled: bool,
    pub is_private: bool,
    pub is_scrambled: bool,
}

/// Hardware and software description of the recording device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct DeviceInfo {
    pub make: String,
    pub model: String,
    pub os: String,
    pub os_version: String,
    pub app_version: String,
    pub battery_level_percent: f32,
    pub temperature_celsius: f32,
}

/// Servers the station talks to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct ServerInfo {
    pub acquisition_server: String,
    pub time_synchronization_server: String,
    pub authentication_server: String,
}

/// Packet-level timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct PacketTimestamps {
    pub app_file_start_epoch_microseconds_utc: i64,
    /// Same instant as read from the device's monotonic machine clock.
    pub app_file_start_machine: i64,
    pub server_epoch_microseconds_utc: i64,
}

/// One decoded (or freshly built) packet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packet {
    pub identity: PacketIdentity,
    pub device: DeviceInfo,
    pub servers: ServerInfo,
    pub timestamps: PacketTimestamps,
    /// Free-form metadata, conventionally alternating key/value entries.
    pub metadata: Vec<String>,
    evenly_sampled_channels: Vec<Channel>,
    unevenly_sampled_channels: Vec<Channel>,
    directory: ChannelDirectory,
}

impl Packet {
    /// An empty packet with default descriptive fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install both channel collections at once, as decoded, and index them.
    ///
    /// No uniqueness check is made; duplicates resolve last-write-wins.
    pub(crate) fn with_channels(
        mut self,
        evenly_sampled: Vec<Channel>,
        unevenly_sampled: Vec<Channel>,
    ) -> Self {
        self.evenly_sampled_channels = evenly_sampled;
        self.unevenly_sampled_channels = unevenly_sampled;
        self.rebuild_directory();
        self
    }

    pub fn evenly_sampled_channels(&self) -> &[Channel] {
        &self.evenly_sampled_channels
    }

    pub fn unevenly_sampled_channels(&self) -> &[Channel] {
        &self.unevenly_sampled_channels
    }

    /// All channels, evenly sampled first.
    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.evenly_sampled_channels.iter().chain(self.unevenly_sampled_channels.iter())
    }

    pub fn directory(&self) -> &ChannelDirectory {
        &self.directory
    }

    /// Every declared channel type, in collection order.
    pub fn channel_types(&self) -> Vec<ChannelType> {
        self.channels().flat_map(|channel| channel.channel_types().iter().copied()).collect()
    }

    pub fn has_channel(&self, channel_type: ChannelType) -> bool {
        self.directory.has(channel_type)
    }

    /// True only if every listed channel type is present.
    pub fn has_channels(&self, channel_types: &[ChannelType]) -> bool {
        self.directory.has_all(channel_types)
    }

    /// The channel owning `channel_type` (O(1)).
    pub fn channel(&self, channel_type: ChannelType) -> Option<&Channel> {
        let slot = self.directory.get(channel_type)?;
        self.collection(slot.sampling).get(slot.index)
    }

    /// Mutable access to the channel owning `channel_type`.
    ///
    /// Channel types are fixed per channel, so payload and metadata edits made
    /// through this reference cannot invalidate the directory.
    pub fn channel_mut(&mut self, channel_type: ChannelType) -> Option<&mut Channel> {
        let slot = self.directory.get(channel_type)?;
        self.collection_mut(slot.sampling).get_mut(slot.index)
    }

    /// Append a channel to the collection matching its sampling variant.
    ///
    /// Only the channel's first type is checked against the directory. A
    /// channel whose later types collide is accepted and the rebuilt
    /// directory resolves the overlap last-write-wins.
    pub fn add_channel(&mut self, channel: Channel) -> Result<()> {
        let first_type = first_channel_type(&channel)?;
        if self.directory.has(first_type) {
            return Err(PacketError::channel_conflict(first_type));
        }

        debug!(channel_type = %first_type, sensor_name = %channel.sensor_name, "Adding channel");
        self.collection_mut(channel.sampling_kind()).push(channel);
        self.rebuild_directory();
        Ok(())
    }

    /// Replace the channel owning `channel_type` with `channel`.
    ///
    /// The replacement is appended to the collection matching its own
    /// variant, which need not be the collection the old channel lived in.
    pub fn edit_channel(&mut self, channel_type: ChannelType, channel: Channel) -> Result<()> {
        let slot = self
            .resolve_owner(channel_type)
            .ok_or_else(|| PacketError::channel_not_found(channel_type))?;

        debug!(%channel_type, sensor_name = %channel.sensor_name, "Editing channel");
        self.collection_mut(slot.sampling).remove(slot.index);
        self.collection_mut(channel.sampling_kind()).push(channel);
        self.rebuild_directory();
        Ok(())
    }

    /// Remove and return the channel owning `channel_type`.
    pub fn delete_channel(&mut self, channel_type: ChannelType) -> Result<Channel> {
        let slot = self
            .resolve_owner(channel_type)
            .ok_or_else(|| PacketError::channel_not_found(channel_type))?;

        debug!(%channel_type, "Deleting channel");
        let removed = self.collection_mut(slot.sampling).remove(slot.index);
        self.rebuild_directory();
        Ok(removed)
    }

    /// Packet metadata as a key/value map. Later duplicate keys win.
    pub fn metadata_map(&self) -> Result<BTreeMap<String, String>> {
        metadata_pairs(&self.metadata)
    }

    /// Scan both collections for the first channel declaring `channel_type`.
    fn resolve_owner(&self, channel_type: ChannelType) -> Option<ChannelSlot> {
        [SamplingKind::Evenly, SamplingKind::Unevenly].into_iter().find_map(|sampling| {
            self.collection(sampling)
                .iter()
                .position(|channel| channel.has_channel_type(channel_type))
                .map(|index| ChannelSlot { sampling, index })
        })
    }

    fn collection(&self, sampling: SamplingKind) -> &Vec<Channel> {
        match sampling {
            SamplingKind::Evenly => &self.evenly_sampled_channels,
            SamplingKind::Unevenly => &self.unevenly_sampled_channels,
        }
    }

    fn collection_mut(&mut self, sampling: SamplingKind) -> &mut Vec<Channel> {
        match sampling {
            SamplingKind::Evenly => &mut self.evenly_sampled_channels,
            SamplingKind::Unevenly => &mut self.unevenly_sampled_channels,
        }
    }

    fn rebuild_directory(&mut self) {
        self.directory =
            ChannelDirectory::build(&self.evenly_sampled_channels, &self.unevenly_sampled_channels);
    }
}

fn first_channel_type(channel: &Channel) -> Result<ChannelType> {
    channel
        .channel_types()
        .first()
        .copied()
        .ok_or_else(|| {
            PacketError::invalid_channel("a channel must declare at least one channel type")
        })
}
