//! Sampling metadata for evenly and unevenly sampled channels

use serde::{Deserialize, Serialize};

use crate::types::stats::{SummaryStats, deltas, same_value};
use crate::{PacketError, Result};

/// Which of a packet's two channel collections a channel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub enum SamplingKind {
    Evenly,
    Unevenly,
}

/// Variant-specific sampling metadata of a channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Sampling {
    Evenly(EvenSampling),
    Unevenly(UnevenSampling),
}

impl Sampling {
    pub fn kind(&self) -> SamplingKind {
        match self {
            Sampling::Evenly(_) => SamplingKind::Evenly,
            Sampling::Unevenly(_) => SamplingKind::Unevenly,
        }
    }

    pub fn as_evenly(&self) -> Option<&EvenSampling> {
        match self {
            Sampling::Evenly(even) => Some(even),
            Sampling::Unevenly(_) => None,
        }
    }

    pub fn as_unevenly(&self) -> Option<&UnevenSampling> {
        match self {
            Sampling::Unevenly(uneven) => Some(uneven),
            Sampling::Evenly(_) => None,
        }
    }

    pub(crate) fn as_evenly_mut(&mut self) -> Option<&mut EvenSampling> {
        match self {
            Sampling::Evenly(even) => Some(even),
            Sampling::Unevenly(_) => None,
        }
    }

    pub(crate) fn as_unevenly_mut(&mut self) -> Option<&mut UnevenSampling> {
        match self {
            Sampling::Unevenly(uneven) => Some(uneven),
            Sampling::Evenly(_) => None,
        }
    }
}

/// Fixed-clock sampling: a rate plus the timestamp of the first sample.
#[derive(Debug, Clone)]
pub struct EvenSampling {
    sample_rate_hz: f64,
    first_sample_timestamp_epoch_microseconds_utc: i64,
}

// Decoded rates are not validated, so a NaN rate must still equal itself.
impl PartialEq for EvenSampling {
    fn eq(&self, other: &Self) -> bool {
        same_value(self.sample_rate_hz, other.sample_rate_hz)
            && self.first_sample_timestamp_epoch_microseconds_utc
                == other.first_sample_timestamp_epoch_microseconds_utc
    }
}

impl EvenSampling {
    /// Create sampling metadata; the rate must be positive and finite.
    pub fn new(
        sample_rate_hz: f64,
        first_sample_timestamp_epoch_microseconds_utc: i64,
    ) -> Result<Self> {
        validate_rate(sample_rate_hz)?;
        Ok(Self { sample_rate_hz, first_sample_timestamp_epoch_microseconds_utc })
    }

    /// Decoded values are taken as-is.
    pub(crate) fn from_wire(sample_rate_hz: f64, first_sample_timestamp: i64) -> Self {
        Self {
            sample_rate_hz,
            first_sample_timestamp_epoch_microseconds_utc: first_sample_timestamp,
        }
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn set_sample_rate_hz(&mut self, sample_rate_hz: f64) -> Result<()> {
        validate_rate(sample_rate_hz)?;
        self.sample_rate_hz = sample_rate_hz;
        Ok(())
    }

    pub fn first_sample_timestamp_epoch_microseconds_utc(&self) -> i64 {
        self.first_sample_timestamp_epoch_microseconds_utc
    }

    pub fn set_first_sample_timestamp_epoch_microseconds_utc(&mut self, timestamp: i64) {
        self.first_sample_timestamp_epoch_microseconds_utc = timestamp;
    }

    /// Microseconds between consecutive samples.
    pub fn sample_period_microseconds(&self) -> f64 {
        1_000_000.0 / self.sample_rate_hz
    }

    /// Timestamp of sample `sample_count - 1`, or `None` for an empty channel.
    pub fn last_sample_timestamp_epoch_microseconds_utc(&self, sample_count: usize) -> Option<i64> {
        let last_index = sample_count.checked_sub(1)?;
        let offset = (last_index as f64 * self.sample_period_microseconds()).round() as i64;
        Some(self.first_sample_timestamp_epoch_microseconds_utc + offset)
    }
}

fn validate_rate(sample_rate_hz: f64) -> Result<()> {
    if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
        return Err(PacketError::invalid_channel(format!(
            "sample rate must be positive and finite, got {}",
            sample_rate_hz
        )));
    }
    Ok(())
}

/// Per-sample timestamps plus the derived sample interval statistics.
///
/// Equality goes through [`SummaryStats`], so the `NaN` intervals of a
/// channel with fewer than two timestamps compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct UnevenSampling {
    timestamps_microseconds_utc: Vec<i64>,
    sample_interval: SummaryStats,
}

impl UnevenSampling {
    /// Create sampling metadata, deriving interval statistics from the
    /// timestamp deltas. Fewer than two timestamps yield `NaN` statistics.
    pub fn new(timestamps_microseconds_utc: Vec<i64>) -> Self {
        let sample_interval = SummaryStats::from_values(&deltas(&timestamps_microseconds_utc));
        Self { timestamps_microseconds_utc, sample_interval }
    }

    /// Decoded interval statistics are kept as transmitted.
    pub(crate) fn from_wire(timestamps: Vec<i64>, sample_interval: SummaryStats) -> Self {
        Self { timestamps_microseconds_utc: timestamps, sample_interval }
    }

    pub fn timestamps_microseconds_utc(&self) -> &[i64] {
        &self.timestamps_microseconds_utc
    }

    /// Replace the timestamps and recompute the interval statistics.
    pub fn set_timestamps_microseconds_utc(&mut self, timestamps: Vec<i64>) {
        *self = Self::new(timestamps);
    }

    pub fn sample_interval_mean(&self) -> f64 {
        self.sample_interval.mean
    }

    pub fn sample_interval_std(&self) -> f64 {
        self.sample_interval.std
    }

    pub fn sample_interval_median(&self) -> f64 {
        self.sample_interval.median
    }

    pub fn sample_interval(&self) -> SummaryStats {
        self.sample_interval
    }
}
