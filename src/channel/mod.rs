//! Sensor channels and their payload codec.
//!
//! A [`Channel`] owns one [`NumericPayload`] holding the readings of every
//! channel type it declares, interleaved sample by sample. With N declared
//! types, sample `i` of type `j` lives at payload position `i * N + j`.
//!
//! ## Invariants
//!
//! - `channel_types` is fixed at construction and never empty, so the
//!   per-channel type→index map can never go stale
//! - a non-empty payload always has a length that is a multiple of N
//! - `value_means`, `value_stds` and `value_medians` start as N `NaN`
//!   sentinels and are index-aligned with `channel_types`; decoding keeps the
//!   transmitted vectors as they are
//!
//! ## Usage Example
//!
//! ```rust
//! use stationpack::{Channel, ChannelType, NumericPayload, PayloadKind};
//!
//! let mut accel = Channel::evenly_sampled(
//!     "accelerometer",
//!     vec![ChannelType::AccelerometerX, ChannelType::AccelerometerY, ChannelType::AccelerometerZ],
//!     50.0,
//!     1_546_300_800_000_000,
//! )?;
//!
//! accel.set_interleaved_payload(
//!     &[
//!         NumericPayload::Float32(vec![0.1, 0.2]),
//!         NumericPayload::Float32(vec![0.0, 0.0]),
//!         NumericPayload::Float32(vec![9.8, 9.7]),
//!     ],
//!     PayloadKind::Float32,
//!     true,
//! )?;
//!
//! let z = accel.get_payload(ChannelType::AccelerometerZ);
//! assert_eq!(z, NumericPayload::Float32(vec![9.8, 9.7]));
//! assert_eq!(accel.sample_count(), 2);
//! # Ok::<(), stationpack::PacketError>(())
//! ```

mod sampling;

pub use sampling::{EvenSampling, Sampling, SamplingKind, UnevenSampling};

use std::collections::{BTreeMap, HashMap};
use tracing::{trace, warn};

use crate::types::SummaryStats;
use crate::types::stats::same_values;
use crate::{ChannelType, CodecConfig, NumericPayload, PacketError, PayloadKind, Result};

/// One sensor channel: a group of co-timed channel types sharing a payload.
#[derive(Debug, Clone)]
pub struct Channel {
    /// Descriptive sensor name; not required to be unique.
    pub sensor_name: String,
    /// Free-form metadata, conventionally alternating key/value entries.
    pub metadata: Vec<String>,
    channel_types: Vec<ChannelType>,
    type_index: HashMap<ChannelType, usize>,
    payload: Option<NumericPayload>,
    value_means: Vec<f64>,
    value_stds: Vec<f64>,
    value_medians: Vec<f64>,
    sampling: Sampling,
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        // type_index is derived from channel_types
        self.sensor_name == other.sensor_name
            && self.metadata == other.metadata
            && self.channel_types == other.channel_types
            && self.payload == other.payload
            && same_values(&self.value_means, &other.value_means)
            && same_values(&self.value_stds, &other.value_stds)
            && same_values(&self.value_medians, &other.value_medians)
            && self.sampling == other.sampling
    }
}

impl Channel {
    /// Create an evenly sampled channel with no payload.
    pub fn evenly_sampled(
        sensor_name: impl Into<String>,
        channel_types: Vec<ChannelType>,
        sample_rate_hz: f64,
        first_sample_timestamp_epoch_microseconds_utc: i64,
    ) -> Result<Self> {
        let sampling =
            EvenSampling::new(sample_rate_hz, first_sample_timestamp_epoch_microseconds_utc)?;
        Self::new(sensor_name.into(), channel_types, Sampling::Evenly(sampling))
    }

    /// Create an unevenly sampled channel with no payload.
    pub fn unevenly_sampled(
        sensor_name: impl Into<String>,
        channel_types: Vec<ChannelType>,
        timestamps_microseconds_utc: Vec<i64>,
    ) -> Result<Self> {
        let sampling = UnevenSampling::new(timestamps_microseconds_utc);
        Self::new(sensor_name.into(), channel_types, Sampling::Unevenly(sampling))
    }

    fn new(
        sensor_name: String,
        channel_types: Vec<ChannelType>,
        sampling: Sampling,
    ) -> Result<Self> {
        if channel_types.is_empty() {
            return Err(PacketError::invalid_channel(
                "a channel must declare at least one channel type",
            ));
        }

        let type_index = build_type_index(&channel_types);
        let unset = vec![f64::NAN; channel_types.len()];
        Ok(Self {
            sensor_name,
            metadata: Vec::new(),
            channel_types,
            type_index,
            payload: None,
            value_means: unset.clone(),
            value_stds: unset.clone(),
            value_medians: unset,
            sampling,
        })
    }

    /// Assemble a channel from decoded parts without recomputing statistics.
    pub(crate) fn from_wire_parts(
        sensor_name: String,
        channel_types: Vec<ChannelType>,
        payload: Option<NumericPayload>,
        value_stats: [Vec<f64>; 3],
        metadata: Vec<String>,
        sampling: Sampling,
    ) -> Result<Self> {
        let mut channel = Self::new(sensor_name, channel_types, sampling)?;
        if let Some(payload) = &payload {
            channel.check_payload_shape(payload)?;
        }

        let [value_means, value_stds, value_medians] = value_stats;
        channel.payload = payload;
        channel.value_means = value_means;
        channel.value_stds = value_stds;
        channel.value_medians = value_medians;
        channel.metadata = metadata;
        Ok(channel)
    }

    /// Builder form of [`Channel::set_payload`] with statistics enabled.
    pub fn with_payload(mut self, values: NumericPayload, kind: PayloadKind) -> Result<Self> {
        self.set_payload(values, kind, true)?;
        Ok(self)
    }

    /// Builder form for metadata.
    pub fn with_metadata(mut self, metadata: Vec<String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn channel_types(&self) -> &[ChannelType] {
        &self.channel_types
    }

    /// Upper-snake-case names of the declared channel types.
    pub fn channel_type_names(&self) -> Vec<&'static str> {
        self.channel_types.iter().map(ChannelType::name).collect()
    }

    /// Number of declared channel types (the interleave factor N).
    pub fn interleave_factor(&self) -> usize {
        self.channel_types.len()
    }

    pub fn has_channel_type(&self, channel_type: ChannelType) -> bool {
        self.type_index.contains_key(&channel_type)
    }

    /// Interleave slot of `channel_type` (O(1)).
    pub fn index_of(&self, channel_type: ChannelType) -> Option<usize> {
        self.type_index.get(&channel_type).copied()
    }

    /// The active payload, if one has been set.
    pub fn payload(&self) -> Option<&NumericPayload> {
        self.payload.as_ref()
    }

    pub fn payload_kind(&self) -> Option<PayloadKind> {
        self.payload.as_ref().map(NumericPayload::kind)
    }

    /// Samples per channel type.
    pub fn sample_count(&self) -> usize {
        self.payload.as_ref().map_or(0, |payload| payload.len() / self.interleave_factor())
    }

    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    /// Mutable evenly-sampled metadata. The variant itself cannot change, so
    /// a channel always stays in the packet collection it was added to.
    pub fn even_sampling_mut(&mut self) -> Option<&mut EvenSampling> {
        self.sampling.as_evenly_mut()
    }

    /// Mutable unevenly-sampled metadata.
    pub fn uneven_sampling_mut(&mut self) -> Option<&mut UnevenSampling> {
        self.sampling.as_unevenly_mut()
    }

    pub fn sampling_kind(&self) -> SamplingKind {
        self.sampling.kind()
    }

    /// Readings of a single channel type.
    ///
    /// Total: an undeclared type, a missing payload, or an unreachable
    /// interleave slot all yield an empty payload.
    pub fn get_payload(&self, channel_type: ChannelType) -> NumericPayload {
        let kind = self.payload_kind().unwrap_or(PayloadKind::Float64);
        let (Some(index), Some(payload)) = (self.index_of(channel_type), &self.payload) else {
            return NumericPayload::empty(kind);
        };

        match payload.deinterleave(index, self.interleave_factor()) {
            Ok(column) => column,
            Err(err) if err.is_read_absence() => {
                trace!(%channel_type, %err, "Unreachable interleave slot, returning empty payload");
                NumericPayload::empty(kind)
            }
            Err(err) => {
                warn!(%channel_type, %err, "Unexpected deinterleave failure");
                NumericPayload::empty(kind)
            }
        }
    }

    /// [`Channel::get_payload`] with read-side coercion applied.
    pub fn get_payload_with(
        &self,
        config: &CodecConfig,
        channel_type: ChannelType,
    ) -> NumericPayload {
        config.coerce_read(self.get_payload(channel_type))
    }

    /// Cross-section of several channel types, interleaved in the order given.
    ///
    /// A single type is returned as-is. Two or more types are fetched
    /// individually and re-interleaved, independent of the channel's native
    /// layout. Missing types make the columns unequal and fail with
    /// [`PacketError::InterleaveArity`].
    pub fn get_multi_payload(&self, channel_types: &[ChannelType]) -> Result<NumericPayload> {
        match channel_types {
            [] => Err(PacketError::interleave_arity(0, "no channel types requested")),
            [single] => Ok(self.get_payload(*single)),
            many => {
                let columns: Vec<NumericPayload> =
                    many.iter().map(|channel_type| self.get_payload(*channel_type)).collect();
                NumericPayload::interleave(&columns)
            }
        }
    }

    /// [`Channel::get_multi_payload`] with read-side coercion applied.
    pub fn get_multi_payload_with(
        &self,
        config: &CodecConfig,
        channel_types: &[ChannelType],
    ) -> Result<NumericPayload> {
        Ok(config.coerce_read(self.get_multi_payload(channel_types)?))
    }

    /// Replace the payload, storing `values` as `kind`.
    ///
    /// Fails without touching the channel when a non-empty payload length is
    /// not a multiple of the interleave factor. With `recompute_stats`, every
    /// column's mean, population standard deviation and median are refreshed.
    pub fn set_payload(
        &mut self,
        values: NumericPayload,
        kind: PayloadKind,
        recompute_stats: bool,
    ) -> Result<()> {
        self.set_payload_with(&CodecConfig::default(), values, kind, recompute_stats)
    }

    /// [`Channel::set_payload`] with write-side coercion applied.
    pub fn set_payload_with(
        &mut self,
        config: &CodecConfig,
        values: NumericPayload,
        kind: PayloadKind,
        recompute_stats: bool,
    ) -> Result<()> {
        self.check_payload_shape(&values)?;
        let payload = config.coerce_write(values, kind);

        if recompute_stats {
            let stats = self.column_stats(&payload)?;
            self.value_means = stats.iter().map(|s| s.mean).collect();
            self.value_stds = stats.iter().map(|s| s.std).collect();
            self.value_medians = stats.iter().map(|s| s.median).collect();
        }

        self.payload = Some(payload);
        Ok(())
    }

    /// Interleave one component per declared channel type and store the result.
    pub fn set_interleaved_payload(
        &mut self,
        components: &[NumericPayload],
        kind: PayloadKind,
        recompute_stats: bool,
    ) -> Result<()> {
        let flat = NumericPayload::interleave(components)?;
        if components.len() != self.interleave_factor() {
            return Err(PacketError::interleave_arity(
                components.len(),
                format!("channel declares {} channel types", self.interleave_factor()),
            ));
        }
        self.set_payload(flat, kind, recompute_stats)
    }

    fn check_payload_shape(&self, payload: &NumericPayload) -> Result<()> {
        let step = self.interleave_factor();
        if !payload.is_empty() && payload.len() % step != 0 {
            return Err(PacketError::InterleaveRange { offset: 0, step, len: payload.len() });
        }
        Ok(())
    }

    fn column_stats(&self, payload: &NumericPayload) -> Result<Vec<SummaryStats>> {
        let step = self.interleave_factor();
        if payload.is_empty() {
            return Ok(vec![SummaryStats::nan(); step]);
        }

        (0..step)
            .map(|index| {
                let column = payload.deinterleave(index, step)?.to_f64_vec();
                let stats = SummaryStats::from_values(&column);
                trace!(
                    index,
                    mean = stats.mean,
                    std = stats.std,
                    median = stats.median,
                    "Recomputed column statistics"
                );
                Ok(stats)
            })
            .collect()
    }

    pub fn value_means(&self) -> &[f64] {
        &self.value_means
    }

    pub fn value_stds(&self) -> &[f64] {
        &self.value_stds
    }

    pub fn value_medians(&self) -> &[f64] {
        &self.value_medians
    }

    pub fn value_mean(&self, channel_type: ChannelType) -> Option<f64> {
        self.value_means.get(self.index_of(channel_type)?).copied()
    }

    pub fn value_std(&self, channel_type: ChannelType) -> Option<f64> {
        self.value_stds.get(self.index_of(channel_type)?).copied()
    }

    pub fn value_median(&self, channel_type: ChannelType) -> Option<f64> {
        self.value_medians.get(self.index_of(channel_type)?).copied()
    }

    /// Cached statistics of one channel type.
    pub fn value_stats(&self, channel_type: ChannelType) -> Option<SummaryStats> {
        Some(SummaryStats {
            mean: self.value_mean(channel_type)?,
            std: self.value_std(channel_type)?,
            median: self.value_median(channel_type)?,
        })
    }

    /// Overwrite the cached statistics, e.g. after `set_payload(.., false)`.
    pub fn set_value_stats(&mut self, stats: &[SummaryStats]) -> Result<()> {
        if stats.len() != self.interleave_factor() {
            return Err(PacketError::invalid_channel(format!(
                "expected {} statistics entries, got {}",
                self.interleave_factor(),
                stats.len()
            )));
        }
        self.value_means = stats.iter().map(|s| s.mean).collect();
        self.value_stds = stats.iter().map(|s| s.std).collect();
        self.value_medians = stats.iter().map(|s| s.median).collect();
        Ok(())
    }

    /// Metadata as a key/value map. Later duplicate keys win.
    pub fn metadata_map(&self) -> Result<BTreeMap<String, String>> {
        metadata_pairs(&self.metadata)
    }

    /// Replace metadata with alternating key/value entries.
    pub fn set_metadata_map(&mut self, map: &BTreeMap<String, String>) {
        self.metadata = map.iter().flat_map(|(key, value)| [key.clone(), value.clone()]).collect();
    }
}

pub(crate) fn metadata_pairs(metadata: &[String]) -> Result<BTreeMap<String, String>> {
    if metadata.len() % 2 != 0 {
        warn!(len = metadata.len(), "Metadata has an unpaired trailing entry");
        return Err(PacketError::Metadata {
            details: format!(
                "expected alternating key/value entries, got {} entries",
                metadata.len()
            ),
        });
    }

    Ok(metadata.chunks_exact(2).map(|pair| (pair[0].clone(), pair[1].clone())).collect())
}

fn build_type_index(channel_types: &[ChannelType]) -> HashMap<ChannelType, usize> {
    channel_types.iter().enumerate().map(|(index, channel_type)| (*channel_type, index)).collect()
}
