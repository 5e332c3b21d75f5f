//! Discriminated numeric payload
//!
//! A channel stores its readings in exactly one of seven numeric
//! representations. [`NumericPayload`] is that tagged union; [`PayloadKind`]
//! is its bare discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::interleave::{deinterleave, interleave};
use crate::{PacketError, Result};

/// Discriminator for the seven numeric payload representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    Byte,
    UInt32,
    UInt64,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl PayloadKind {
    /// Every kind, in wire tag order.
    pub const ALL: [PayloadKind; 7] = [
        PayloadKind::Byte,
        PayloadKind::UInt32,
        PayloadKind::UInt64,
        PayloadKind::Int32,
        PayloadKind::Int64,
        PayloadKind::Float32,
        PayloadKind::Float64,
    ];

    /// Schema field name, e.g. `float64_payload`.
    pub const fn field_name(&self) -> &'static str {
        match self {
            PayloadKind::Byte => "byte_payload",
            PayloadKind::UInt32 => "uint32_payload",
            PayloadKind::UInt64 => "uint64_payload",
            PayloadKind::Int32 => "int32_payload",
            PayloadKind::Int64 => "int64_payload",
            PayloadKind::Float32 => "float32_payload",
            PayloadKind::Float64 => "float64_payload",
        }
    }

    /// Whether values of this kind are whole numbers.
    pub const fn is_integer(&self) -> bool {
        !matches!(self, PayloadKind::Float32 | PayloadKind::Float64)
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for PayloadKind {
    type Err = PacketError;

    /// Accepts schema field names (`int32_payload`) and bare names (`int32`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        let bare = normalized.strip_suffix("_payload").unwrap_or(&normalized);
        PayloadKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.field_name().strip_suffix("_payload") == Some(bare))
            .ok_or_else(|| PacketError::payload_kind(s))
    }
}

/// The one active numeric representation of a channel's readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumericPayload {
    Byte(Vec<u8>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl Default for NumericPayload {
    fn default() -> Self {
        NumericPayload::Float64(Vec::new())
    }
}

/// Apply `$body` to the inner vector of whichever variant is active.
macro_rules! with_values {
    ($payload:expr, $values:ident => $body:expr) => {
        match $payload {
            NumericPayload::Byte($values) => $body,
            NumericPayload::UInt32($values) => $body,
            NumericPayload::UInt64($values) => $body,
            NumericPayload::Int32($values) => $body,
            NumericPayload::Int64($values) => $body,
            NumericPayload::Float32($values) => $body,
            NumericPayload::Float64($values) => $body,
        }
    };
}

/// Same as `with_values!`, re-wrapping the result in the same variant.
macro_rules! map_values {
    ($payload:expr, $values:ident => $body:expr) => {
        match $payload {
            NumericPayload::Byte($values) => NumericPayload::Byte($body),
            NumericPayload::UInt32($values) => NumericPayload::UInt32($body),
            NumericPayload::UInt64($values) => NumericPayload::UInt64($body),
            NumericPayload::Int32($values) => NumericPayload::Int32($body),
            NumericPayload::Int64($values) => NumericPayload::Int64($body),
            NumericPayload::Float32($values) => NumericPayload::Float32($body),
            NumericPayload::Float64($values) => NumericPayload::Float64($body),
        }
    };
}

impl NumericPayload {
    /// An empty payload of the given kind.
    pub fn empty(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::Byte => NumericPayload::Byte(Vec::new()),
            PayloadKind::UInt32 => NumericPayload::UInt32(Vec::new()),
            PayloadKind::UInt64 => NumericPayload::UInt64(Vec::new()),
            PayloadKind::Int32 => NumericPayload::Int32(Vec::new()),
            PayloadKind::Int64 => NumericPayload::Int64(Vec::new()),
            PayloadKind::Float32 => NumericPayload::Float32(Vec::new()),
            PayloadKind::Float64 => NumericPayload::Float64(Vec::new()),
        }
    }

    /// Build a payload of `kind` from float values.
    ///
    /// Integer kinds truncate toward zero (saturating at the type bounds)
    /// unless `round` is set, in which case values are rounded to nearest first.
    pub fn from_f64(kind: PayloadKind, values: &[f64], round: bool) -> Self {
        let prepare = |v: f64| if round { v.round() } else { v };
        match kind {
            PayloadKind::Byte => {
                NumericPayload::Byte(values.iter().map(|&v| prepare(v) as u8).collect())
            }
            PayloadKind::UInt32 => {
                NumericPayload::UInt32(values.iter().map(|&v| prepare(v) as u32).collect())
            }
            PayloadKind::UInt64 => {
                NumericPayload::UInt64(values.iter().map(|&v| prepare(v) as u64).collect())
            }
            PayloadKind::Int32 => {
                NumericPayload::Int32(values.iter().map(|&v| prepare(v) as i32).collect())
            }
            PayloadKind::Int64 => {
                NumericPayload::Int64(values.iter().map(|&v| prepare(v) as i64).collect())
            }
            PayloadKind::Float32 => {
                NumericPayload::Float32(values.iter().map(|&v| v as f32).collect())
            }
            PayloadKind::Float64 => NumericPayload::Float64(values.to_vec()),
        }
    }

    /// Tag of the active variant.
    pub fn kind(&self) -> PayloadKind {
        match self {
            NumericPayload::Byte(_) => PayloadKind::Byte,
            NumericPayload::UInt32(_) => PayloadKind::UInt32,
            NumericPayload::UInt64(_) => PayloadKind::UInt64,
            NumericPayload::Int32(_) => PayloadKind::Int32,
            NumericPayload::Int64(_) => PayloadKind::Int64,
            NumericPayload::Float32(_) => PayloadKind::Float32,
            NumericPayload::Float64(_) => PayloadKind::Float64,
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_integer(&self) -> bool {
        self.kind().is_integer()
    }

    /// Widen every value to `f64`.
    ///
    /// 64-bit integers beyond 2^53 lose precision.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        with_values!(self, values => values.iter().map(|&v| v as f64).collect())
    }

    /// Convert into `kind`, truncating floats stored into integer kinds.
    pub fn cast(self, kind: PayloadKind) -> Self {
        if self.kind() == kind {
            return self;
        }
        Self::from_f64(kind, &self.to_f64_vec(), false)
    }

    /// Convert into `kind`, rounding floats stored into integer kinds.
    pub fn cast_rounded(self, kind: PayloadKind) -> Self {
        if self.kind() == kind {
            return self;
        }
        Self::from_f64(kind, &self.to_f64_vec(), true)
    }

    /// Extract one component of an interleaved payload.
    pub fn deinterleave(&self, offset: usize, step: usize) -> Result<Self> {
        Ok(map_values!(self, values => deinterleave(values, offset, step)?))
    }

    /// Round-robin merge payload components that share one kind.
    pub fn interleave(components: &[NumericPayload]) -> Result<Self> {
        let count = components.len();
        let Some(first) = components.first() else {
            return Err(PacketError::interleave_arity(0, "at least two arrays are required"));
        };

        let kind = first.kind();
        if let Some(mixed) = components.iter().find(|c| c.kind() != kind) {
            return Err(PacketError::interleave_arity(
                count,
                format!("mixed payload kinds {} and {}", kind, mixed.kind()),
            ));
        }

        macro_rules! merge {
            ($variant:ident) => {{
                let arrays: Vec<&[_]> = components
                    .iter()
                    .filter_map(|c| match c {
                        NumericPayload::$variant(values) => Some(values.as_slice()),
                        _ => None,
                    })
                    .collect();
                NumericPayload::$variant(interleave(&arrays)?)
            }};
        }

        Ok(match kind {
            PayloadKind::Byte => merge!(Byte),
            PayloadKind::UInt32 => merge!(UInt32),
            PayloadKind::UInt64 => merge!(UInt64),
            PayloadKind::Int32 => merge!(Int32),
            PayloadKind::Int64 => merge!(Int64),
            PayloadKind::Float32 => merge!(Float32),
            PayloadKind::Float64 => merge!(Float64),
        })
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            NumericPayload::Byte(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&[i64]> {
        match self {
            NumericPayload::Int64(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            NumericPayload::Float32(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<&[f64]> {
        match self {
            NumericPayload::Float64(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for NumericPayload {
                fn from(values: Vec<$ty>) -> Self {
                    NumericPayload::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec!(
    u8 => Byte,
    u32 => UInt32,
    u64 => UInt64,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
);
