use crate::encoding::Encoding;

/// Errors returned by cursor operations.
///
/// Every variant is detected before the cursor touches its offset or its
/// buffer, so a failed call never leaves a partial effect behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The request reaches past the end of the buffer.
    #[error("out of bounds: {len} bytes requested at offset {offset}, capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },

    /// A variable-width integer accessor was given a width outside 1..=6.
    #[error("invalid integer width {width} (expected 1..=6 bytes)")]
    InvalidWidth { width: usize },

    /// The value does not fit in the requested number of bytes.
    #[error("value {value} does not fit in {width} bytes")]
    ValueOutOfRange { value: i128, width: usize },

    /// The byte at `offset` of an uninitialized allocation was never written.
    #[error("byte at offset {offset} was read before it was written")]
    Uninitialized { offset: usize },

    /// The text cannot be encoded under the requested encoding.
    #[error("invalid {encoding} text: {reason}")]
    InvalidText {
        encoding: Encoding,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CursorError>;
