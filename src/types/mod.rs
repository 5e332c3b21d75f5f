//! Core value types for channel payloads.
//!
//! This module provides the leaf building blocks of the channel codec:
//! - [`ChannelType`] names the physical quantity of one interleave slot and
//!   carries the stable wire enumerant values
//! - [`NumericPayload`] is the seven-way tagged union holding a channel's readings
//! - [`interleave`] / [`deinterleave`] fold N component arrays into one flat
//!   array and back
//! - [`SummaryStats`] caches mean, population standard deviation and median
//!
//! ## Usage Example
//!
//! ```rust
//! use stationpack::types::{NumericPayload, deinterleave, interleave};
//!
//! let flat = interleave(&[[1, 2, 3], [4, 5, 6]]).unwrap();
//! assert_eq!(flat, vec![1, 4, 2, 5, 3, 6]);
//! assert_eq!(deinterleave(&flat, 1, 2).unwrap(), vec![4, 5, 6]);
//!
//! let payload = NumericPayload::Float64(vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
//! let column = payload.deinterleave(1, 3).unwrap();
//! assert_eq!(column, NumericPayload::Float64(vec![20.0, 50.0]));
//! ```

mod channel_type;
mod interleave;
mod payload;
pub mod stats;

pub use channel_type::ChannelType;
pub use interleave::{deinterleave, interleave};
pub use payload::{NumericPayload, PayloadKind};
pub use stats::SummaryStats;
