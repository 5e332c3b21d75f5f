//! Summary statistics for channel columns and sample intervals
//!
//! Empty inputs resolve to `NaN` rather than failing so that statistics can be
//! refreshed unconditionally after any payload edit. Equality treats two `NaN`
//! sentinels as equal, so cached statistics compare the same after a round trip.

use serde::{Deserialize, Serialize};

/// Mean, population standard deviation and median of one column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
    pub median: f64,
}

impl SummaryStats {
    /// Compute all three statistics over `values`.
    pub fn from_values(values: &[f64]) -> Self {
        Self { mean: mean(values), std: population_std(values), median: median(values) }
    }

    /// Statistics of an empty column.
    pub const fn nan() -> Self {
        Self { mean: f64::NAN, std: f64::NAN, median: f64::NAN }
    }
}

impl PartialEq for SummaryStats {
    fn eq(&self, other: &Self) -> bool {
        same_value(self.mean, other.mean)
            && same_value(self.std, other.std)
            && same_value(self.median, other.median)
    }
}

/// Float equality where `NaN` equals `NaN`.
pub(crate) fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Element-wise [`same_value`] over two slices.
pub(crate) fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same_value(*a, *b))
}

/// Arithmetic mean; `NaN` when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population (divide by N) standard deviation; `NaN` when empty.
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mu = mean(values);
    let variance = values.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Median, averaging the two middle values for even counts; `NaN` when empty.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 { (sorted[mid - 1] + sorted[mid]) / 2.0 } else { sorted[mid] }
}

/// Consecutive differences `values[i + 1] - values[i]` as floats.
///
/// Differences are taken in `i128`, so any pair of `i64` timestamps is valid.
pub fn deltas(values: &[i64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| (i128::from(pair[1]) - i128::from(pair[0])) as f64)
        .collect()
}
