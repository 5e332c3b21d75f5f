//! Packet channel directory
//!
//! Maps every channel type declared in a packet to the slot of the channel
//! that owns it. The directory is derived state: it is rebuilt wholesale from
//! the packet's two channel collections after every mutation and is never
//! patched incrementally or serialized.

use std::collections::HashMap;
use tracing::debug;

use crate::{Channel, ChannelType, SamplingKind};

/// Location of a channel within a packet: which collection, and where in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelSlot {
    pub sampling: SamplingKind,
    pub index: usize,
}

/// O(1) lookup from channel type to owning channel slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelDirectory {
    slots: HashMap<ChannelType, ChannelSlot>,
}

impl ChannelDirectory {
    /// Index every channel type of every channel, evenly sampled first.
    ///
    /// Duplicate ownership is not resolved here: the last channel to declare
    /// a type wins.
    pub fn build(evenly_sampled: &[Channel], unevenly_sampled: &[Channel]) -> Self {
        let collections =
            [(SamplingKind::Evenly, evenly_sampled), (SamplingKind::Unevenly, unevenly_sampled)];

        let mut slots = HashMap::new();
        for (sampling, channels) in collections {
            for (index, channel) in channels.iter().enumerate() {
                for channel_type in channel.channel_types() {
                    slots.insert(*channel_type, ChannelSlot { sampling, index });
                }
            }
        }

        debug!(
            evenly_sampled = evenly_sampled.len(),
            unevenly_sampled = unevenly_sampled.len(),
            channel_types = slots.len(),
            "Rebuilt channel directory"
        );
        Self { slots }
    }

    pub fn has(&self, channel_type: ChannelType) -> bool {
        self.slots.contains_key(&channel_type)
    }

    pub fn get(&self, channel_type: ChannelType) -> Option<ChannelSlot> {
        self.slots.get(&channel_type).copied()
    }

    /// True only if every listed type is present. Vacuously true when empty.
    pub fn has_all(&self, channel_types: &[ChannelType]) -> bool {
        channel_types.iter().all(|channel_type| self.has(*channel_type))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Indexed channel types in unspecified order.
    pub fn channel_types(&self) -> impl Iterator<Item = ChannelType> + '_ {
        self.slots.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mic() -> Channel {
        Channel::evenly_sampled("mic", vec![ChannelType::Microphone], 80.0, 0).unwrap()
    }

    fn location() -> Channel {
        Channel::unevenly_sampled(
            "loc",
            vec![ChannelType::Latitude, ChannelType::Longitude],
            vec![0, 1],
        )
        .unwrap()
    }

    #[test]
    fn build_indexes_both_collections() {
        let directory = ChannelDirectory::build(&[mic()], &[location()]);

        assert!(directory.has(ChannelType::Microphone));
        assert!(directory.has(ChannelType::Latitude));
        assert!(directory.has(ChannelType::Longitude));
        assert!(!directory.has(ChannelType::Altitude));
        assert_eq!(directory.len(), 3);

        assert_eq!(
            directory.get(ChannelType::Longitude),
            Some(ChannelSlot { sampling: SamplingKind::Unevenly, index: 0 })
        );
        assert_eq!(
            directory.get(ChannelType::Microphone),
            Some(ChannelSlot { sampling: SamplingKind::Evenly, index: 0 })
        );
    }

    #[test]
    fn has_all_requires_every_type() {
        let directory = ChannelDirectory::build(&[mic()], &[location()]);
        assert!(directory.has_all(&[ChannelType::Microphone, ChannelType::Latitude]));
        assert!(!directory.has_all(&[ChannelType::Microphone, ChannelType::Altitude]));
        assert!(directory.has_all(&[]));
    }

    #[test]
    fn last_write_wins_on_duplicates() {
        let other_mic =
            Channel::unevenly_sampled("mic2", vec![ChannelType::Microphone], vec![0]).unwrap();
        let directory = ChannelDirectory::build(&[mic()], &[other_mic]);
        assert_eq!(
            directory.get(ChannelType::Microphone),
            Some(ChannelSlot { sampling: SamplingKind::Unevenly, index: 0 })
        );
    }

    #[test]
    fn empty_directory() {
        let directory = ChannelDirectory::build(&[], &[]);
        assert!(directory.is_empty());
        assert_eq!(directory.channel_types().count(), 0);
    }
}
