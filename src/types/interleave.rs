//! Interleave and deinterleave engine
//!
//! A channel declaring N channel types stores its readings as one flat array
//! in which sample `i` of component `j` lives at position `i * N + j`. These
//! functions fold N equal-length component arrays into that layout and unfold
//! a single component back out of it.

use crate::{PacketError, Result};

/// Extract every `step`-th element of `flat`, starting at `offset`.
///
/// Preconditions: `flat` is non-empty, `step >= 1`, `offset < step`,
/// `step <= flat.len()` and `flat.len()` is a multiple of `step`. Any
/// violation yields [`PacketError::InterleaveRange`].
pub fn deinterleave<T: Copy>(flat: &[T], offset: usize, step: usize) -> Result<Vec<T>> {
    let len = flat.len();
    let valid = len >= 1 && step >= 1 && offset < step && step <= len && len % step == 0;
    if !valid {
        return Err(PacketError::InterleaveRange { offset, step, len });
    }

    Ok(flat.iter().skip(offset).step_by(step).copied().collect())
}

/// Round-robin merge of `K >= 2` equal-length arrays into one flat array.
///
/// Position `i * K + j` of the result holds `arrays[j][i]`. Fewer than two
/// arrays, an empty array, or mismatched lengths yield
/// [`PacketError::InterleaveArity`].
pub fn interleave<T: Copy, A: AsRef<[T]>>(arrays: &[A]) -> Result<Vec<T>> {
    let count = arrays.len();
    if count < 2 {
        return Err(PacketError::interleave_arity(count, "at least two arrays are required"));
    }

    let len = arrays[0].as_ref().len();
    if len == 0 {
        return Err(PacketError::interleave_arity(count, "arrays must not be empty"));
    }

    if let Some((index, array)) =
        arrays.iter().enumerate().find(|(_, array)| array.as_ref().len() != len)
    {
        return Err(PacketError::interleave_arity(
            count,
            format!("array {} has length {}, expected {}", index, array.as_ref().len(), len),
        ));
    }

    let mut flat = Vec::with_capacity(len * count);
    for i in 0..len {
        for array in arrays {
            flat.push(array.as_ref()[i]);
        }
    }

    Ok(flat)
}
