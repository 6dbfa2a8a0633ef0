//! Bounds-checked byte cursor with integer and text accessors.
//!
//! # Crate Structure
//!
//! - [`cursor`]: the cursor, its numeric codec and text encodings
//!
//! The `advanceable` binary (behind the `cli` feature) decodes and encodes
//! field layouts on the command line using the same cursor.

/// Re-export cursor types.
pub mod cursor {
    pub use advanceable_cursor::*;
}

pub use advanceable_cursor::{Allocation, Cursor, CursorError, Encoding, Endian, WriteSource};
