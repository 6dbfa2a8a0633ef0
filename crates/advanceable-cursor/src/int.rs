//! Fixed-width integer encoding.
//!
//! Integers are stored as `width` consecutive bytes in either byte order.
//! Signed values use two's complement, sign-extended from `8 * width` bits
//! on decode. Widths up to 8 bytes are supported here; the cursor limits
//! its variable-width accessors to [`MAX_VAR_WIDTH`].

use crate::error::{CursorError, Result};

/// Largest width accepted by the variable-width accessors.
pub const MAX_VAR_WIDTH: usize = 6;

/// Byte order of a multi-byte integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

/// Reject widths the variable-width accessors cannot handle.
pub fn check_width(width: usize) -> Result<()> {
    if (1..=MAX_VAR_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(CursorError::InvalidWidth { width })
    }
}

/// Reject unsigned values that need more than `width` bytes.
pub fn check_uint_range(value: u64, width: usize) -> Result<()> {
    if width >= 8 || value >> (8 * width) == 0 {
        return Ok(());
    }
    Err(CursorError::ValueOutOfRange {
        value: i128::from(value),
        width,
    })
}

/// Reject signed values outside `[-2^(8w-1), 2^(8w-1) - 1]`.
pub fn check_int_range(value: i64, width: usize) -> Result<()> {
    if width >= 8 {
        return Ok(());
    }
    let bits = 8 * width as u32;
    let max = (1i64 << (bits - 1)) - 1;
    let min = -(1i64 << (bits - 1));
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CursorError::ValueOutOfRange {
            value: i128::from(value),
            width,
        })
    }
}

/// Decode an unsigned integer from all of `bytes` (at most 8).
pub fn decode_uint(bytes: &[u8], endian: Endian) -> u64 {
    debug_assert!(bytes.len() <= 8);
    let push = |acc: u64, &b: &u8| (acc << 8) | u64::from(b);
    match endian {
        Endian::Big => bytes.iter().fold(0, push),
        Endian::Little => bytes.iter().rev().fold(0, push),
    }
}

/// Decode a two's-complement signed integer from all of `bytes` (at most 8).
pub fn decode_int(bytes: &[u8], endian: Endian) -> i64 {
    if bytes.is_empty() {
        return 0;
    }
    let shift = 64 - 8 * bytes.len() as u32;
    ((decode_uint(bytes, endian) << shift) as i64) >> shift
}

/// Encode the low `dst.len()` bytes of `value` into `dst`.
///
/// Callers range-check first; bits above the destination width are dropped.
pub fn encode_uint(value: u64, dst: &mut [u8], endian: Endian) {
    let width = dst.len();
    for i in 0..width {
        let byte = (value >> (8 * i)) as u8;
        match endian {
            Endian::Big => dst[width - 1 - i] = byte,
            Endian::Little => dst[i] = byte,
        }
    }
}

/// Encode `value` as a two's-complement integer filling `dst`.
pub fn encode_int(value: i64, dst: &mut [u8], endian: Endian) {
    encode_uint(value as u64, dst, endian);
}
