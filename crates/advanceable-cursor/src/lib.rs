//! Bounds-checked read/write cursor over a fixed-size byte buffer.
//!
//! A [`Cursor`] pairs a byte buffer with an offset. Every read, peek, skip
//! and write checks `offset + len <= capacity` first and has no effect at
//! all when the check fails. On top of the raw `read`/`write` primitives
//! sit integer accessors for 1-6 and 8 byte widths in both byte orders,
//! signed and unsigned, and text accessors for several encodings.
//!
//! ```
//! use advanceable_cursor::{Cursor, Encoding};
//!
//! let mut cursor = Cursor::zeroed(8);
//! cursor.write_u16_be(0x0102).unwrap();
//! cursor.write_string("héllo", Encoding::Utf8).unwrap();
//! assert!(cursor.write_byte(0).is_err());
//!
//! cursor.set_offset(0).unwrap();
//! assert_eq!(cursor.read_u16_be().unwrap(), 0x0102);
//! assert_eq!(cursor.read_string(6, Encoding::Utf8).unwrap(), "héllo");
//! ```
//!
//! The cursor is a plain value with no internal locking. Share it across
//! threads only behind external synchronization.

pub mod cursor;
pub mod encoding;
pub mod error;
pub mod int;
pub mod source;

mod init;

pub use cursor::{Allocation, Cursor};
pub use encoding::{Encoding, UnknownEncoding};
pub use error::{CursorError, Result};
pub use int::{Endian, MAX_VAR_WIDTH};
pub use source::WriteSource;
