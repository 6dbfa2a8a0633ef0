//! The cursor: a position over a fixed-size buffer.
//!
//! Reads and writes check the span first and only then touch the buffer or
//! the offset.

use std::ops::Range;

use bytes::BytesMut;
use tracing::{debug, trace};

use crate::encoding::Encoding;
use crate::error::{CursorError, Result};
use crate::init::InitMap;
use crate::int::{self, Endian};
use crate::source::WriteSource;

/// How [`Cursor::alloc`] prepares a fresh buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Allocation {
    /// Every byte starts as zero and may be read immediately.
    #[default]
    Zeroed,
    /// Contents are undefined until written.
    ///
    /// The cursor tracks which bytes have been written and refuses to read
    /// any byte that has not, failing with [`CursorError::Uninitialized`].
    /// Skipping over unwritten bytes with [`Cursor::advance`] is allowed.
    Uninitialized,
}

/// A read/write position over a fixed-size byte buffer.
///
/// Every operation that touches bytes is bounds-checked against the
/// buffer's length before anything changes: on failure the offset and the
/// buffer are exactly as they were. The offset only moves forward, except
/// through [`Cursor::set_offset`].
///
/// The buffer may be owned (`Vec<u8>`, `BytesMut`, `Box<[u8]>`) or borrowed
/// (`&[u8]`, `&mut [u8]`). Reading needs `AsRef<[u8]>`; writing also needs
/// `AsMut<[u8]>`.
#[derive(Debug, Clone)]
pub struct Cursor<B> {
    buf: B,
    offset: usize,
    init: Option<InitMap>,
}

impl Cursor<BytesMut> {
    /// Allocate a new `size`-byte buffer.
    pub fn alloc(size: usize, allocation: Allocation) -> Self {
        debug!(size, ?allocation, "allocating cursor buffer");
        let init = match allocation {
            Allocation::Zeroed => None,
            Allocation::Uninitialized => Some(InitMap::new(size)),
        };
        Self {
            buf: BytesMut::zeroed(size),
            offset: 0,
            init,
        }
    }

    /// Allocate a zero-filled buffer of `size` bytes.
    pub fn zeroed(size: usize) -> Self {
        Self::alloc(size, Allocation::Zeroed)
    }

    /// Allocate a buffer of `size` bytes that must be written before it is read.
    pub fn uninit(size: usize) -> Self {
        Self::alloc(size, Allocation::Uninitialized)
    }
}

impl<B> Cursor<B> {
    /// Current position in the buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Borrow the underlying buffer.
    pub fn get_ref(&self) -> &B {
        &self.buf
    }

    /// Consume the cursor and return the buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }
}

macro_rules! named_reads {
    ($($name:ident: $via:ident($width:literal, $endian:ident) -> $ty:ty;)+) => {
        $(
            #[doc = concat!(
                "Read a `", stringify!($ty), "` from ", stringify!($width),
                " byte(s), ", stringify!($endian), " endian."
            )]
            pub fn $name(&mut self) -> Result<$ty> {
                self.$via($width, Endian::$endian).map(|v| v as $ty)
            }
        )+
    };
}

macro_rules! named_writes {
    ($($name:ident: $via:ident($width:literal, $endian:ident, $ty:ty);)+) => {
        $(
            #[doc = concat!(
                "Write a `", stringify!($ty), "` as ", stringify!($width),
                " byte(s), ", stringify!($endian), " endian."
            )]
            pub fn $name(&mut self, value: $ty) -> Result<()> {
                self.$via($width, value.into(), Endian::$endian)
            }
        )+
    };
}

impl<B: AsRef<[u8]>> Cursor<B> {
    /// Wrap an existing buffer, starting at offset 0.
    pub fn new(buf: B) -> Self {
        Self {
            buf,
            offset: 0,
            init: None,
        }
    }

    /// Length of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Bytes left between the offset and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(self.offset)
    }

    /// True once the offset has reached the end of the buffer.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying buffer.
    pub fn as_slice(&self) -> &[u8] {
        self.buf.as_ref()
    }

    /// Whether `len` more bytes fit between the offset and the end.
    pub fn available(&self, len: usize) -> bool {
        self.offset
            .checked_add(len)
            .is_some_and(|end| end <= self.capacity())
    }

    /// Move to an absolute position. `pos` may equal the capacity.
    pub fn set_offset(&mut self, pos: usize) -> Result<()> {
        let capacity = self.capacity();
        if pos > capacity {
            trace!(pos, capacity, "cursor seek rejected");
            return Err(CursorError::OutOfBounds {
                offset: pos,
                len: 0,
                capacity,
            });
        }
        self.offset = pos;
        Ok(())
    }

    /// Read `len` bytes and advance past them.
    pub fn read(&mut self, len: usize) -> Result<&[u8]> {
        let range = self.readable(len)?;
        self.offset = range.end;
        Ok(&self.buf.as_ref()[range])
    }

    /// Return the next `len` bytes without advancing.
    pub fn peek(&self, len: usize) -> Result<&[u8]> {
        let range = self.readable(len)?;
        Ok(&self.buf.as_ref()[range])
    }

    /// Skip `len` bytes without inspecting them.
    pub fn advance(&mut self, len: usize) -> Result<()> {
        let range = self.span(len)?;
        self.offset = range.end;
        Ok(())
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        self.read(1).map(|bytes| bytes[0])
    }

    /// Read `len` bytes and decode them as text.
    pub fn read_string(&mut self, len: usize, encoding: Encoding) -> Result<String> {
        let bytes = self.read(len)?;
        Ok(encoding.decode(bytes))
    }

    /// Read an unsigned big-endian integer of `width` bytes (1..=6).
    pub fn read_uint_be(&mut self, width: usize) -> Result<u64> {
        int::check_width(width)?;
        self.read_uint_with(width, Endian::Big)
    }

    /// Read an unsigned little-endian integer of `width` bytes (1..=6).
    pub fn read_uint_le(&mut self, width: usize) -> Result<u64> {
        int::check_width(width)?;
        self.read_uint_with(width, Endian::Little)
    }

    /// Read a signed big-endian integer of `width` bytes (1..=6).
    pub fn read_int_be(&mut self, width: usize) -> Result<i64> {
        int::check_width(width)?;
        self.read_int_with(width, Endian::Big)
    }

    /// Read a signed little-endian integer of `width` bytes (1..=6).
    pub fn read_int_le(&mut self, width: usize) -> Result<i64> {
        int::check_width(width)?;
        self.read_int_with(width, Endian::Little)
    }

    named_reads! {
        read_u8: read_uint_with(1, Big) -> u8;
        read_u16_be: read_uint_with(2, Big) -> u16;
        read_u16_le: read_uint_with(2, Little) -> u16;
        read_u24_be: read_uint_with(3, Big) -> u32;
        read_u24_le: read_uint_with(3, Little) -> u32;
        read_u32_be: read_uint_with(4, Big) -> u32;
        read_u32_le: read_uint_with(4, Little) -> u32;
        read_u40_be: read_uint_with(5, Big) -> u64;
        read_u40_le: read_uint_with(5, Little) -> u64;
        read_u48_be: read_uint_with(6, Big) -> u64;
        read_u48_le: read_uint_with(6, Little) -> u64;
        read_u64_be: read_uint_with(8, Big) -> u64;
        read_u64_le: read_uint_with(8, Little) -> u64;
        read_i8: read_int_with(1, Big) -> i8;
        read_i16_be: read_int_with(2, Big) -> i16;
        read_i16_le: read_int_with(2, Little) -> i16;
        read_i24_be: read_int_with(3, Big) -> i32;
        read_i24_le: read_int_with(3, Little) -> i32;
        read_i32_be: read_int_with(4, Big) -> i32;
        read_i32_le: read_int_with(4, Little) -> i32;
        read_i40_be: read_int_with(5, Big) -> i64;
        read_i40_le: read_int_with(5, Little) -> i64;
        read_i48_be: read_int_with(6, Big) -> i64;
        read_i48_le: read_int_with(6, Little) -> i64;
        read_i64_be: read_int_with(8, Big) -> i64;
        read_i64_le: read_int_with(8, Little) -> i64;
    }

    fn read_uint_with(&mut self, width: usize, endian: Endian) -> Result<u64> {
        let bytes = self.read(width)?;
        Ok(int::decode_uint(bytes, endian))
    }

    fn read_int_with(&mut self, width: usize, endian: Endian) -> Result<i64> {
        let bytes = self.read(width)?;
        Ok(int::decode_int(bytes, endian))
    }

    /// The byte range `len` bytes from the offset, if it fits.
    fn span(&self, len: usize) -> Result<Range<usize>> {
        if !self.available(len) {
            trace!(
                offset = self.offset,
                len,
                capacity = self.capacity(),
                "cursor bounds check failed"
            );
            return Err(CursorError::OutOfBounds {
                offset: self.offset,
                len,
                capacity: self.capacity(),
            });
        }
        Ok(self.offset..self.offset + len)
    }

    /// Like [`span`](Self::span), but also requires every byte to be written.
    fn readable(&self, len: usize) -> Result<Range<usize>> {
        let range = self.span(len)?;
        if let Some(init) = &self.init {
            if let Some(offset) = init.first_unwritten(range.start, range.len()) {
                trace!(offset, "read of unwritten byte rejected");
                return Err(CursorError::Uninitialized { offset });
            }
        }
        Ok(range)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Cursor<B> {
    /// Mutably borrow the buffer contents.
    ///
    /// Only a slice is handed out so the capacity stays fixed. Bytes changed
    /// here do not count as written for [`Allocation::Uninitialized`].
    pub fn get_mut(&mut self) -> &mut [u8] {
        self.buf.as_mut()
    }

    /// Copy `source` into the buffer and advance past it.
    ///
    /// Returns the number of bytes written. Text is measured in encoded
    /// bytes, so multi-byte characters count fully against the space left.
    pub fn write<'a>(&mut self, source: impl Into<WriteSource<'a>>) -> Result<usize> {
        let bytes = source.into().to_bytes()?;
        let range = self.span(bytes.len())?;
        self.buf.as_mut()[range.clone()].copy_from_slice(&bytes);
        self.commit(range);
        Ok(bytes.len())
    }

    /// Encode `value` as text and write it.
    pub fn write_string(&mut self, value: &str, encoding: Encoding) -> Result<usize> {
        self.write(WriteSource::text(value, encoding))
    }

    /// Write a single byte.
    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.write_uint_with(1, value.into(), Endian::Big)
    }

    /// Write an unsigned big-endian integer of `width` bytes (1..=6).
    pub fn write_uint_be(&mut self, width: usize, value: u64) -> Result<()> {
        int::check_width(width)?;
        self.write_uint_with(width, value, Endian::Big)
    }

    /// Write an unsigned little-endian integer of `width` bytes (1..=6).
    pub fn write_uint_le(&mut self, width: usize, value: u64) -> Result<()> {
        int::check_width(width)?;
        self.write_uint_with(width, value, Endian::Little)
    }

    /// Write a signed big-endian integer of `width` bytes (1..=6).
    pub fn write_int_be(&mut self, width: usize, value: i64) -> Result<()> {
        int::check_width(width)?;
        self.write_int_with(width, value, Endian::Big)
    }

    /// Write a signed little-endian integer of `width` bytes (1..=6).
    pub fn write_int_le(&mut self, width: usize, value: i64) -> Result<()> {
        int::check_width(width)?;
        self.write_int_with(width, value, Endian::Little)
    }

    named_writes! {
        write_u8: write_uint_with(1, Big, u8);
        write_u16_be: write_uint_with(2, Big, u16);
        write_u16_le: write_uint_with(2, Little, u16);
        write_u24_be: write_uint_with(3, Big, u32);
        write_u24_le: write_uint_with(3, Little, u32);
        write_u32_be: write_uint_with(4, Big, u32);
        write_u32_le: write_uint_with(4, Little, u32);
        write_u40_be: write_uint_with(5, Big, u64);
        write_u40_le: write_uint_with(5, Little, u64);
        write_u48_be: write_uint_with(6, Big, u64);
        write_u48_le: write_uint_with(6, Little, u64);
        write_u64_be: write_uint_with(8, Big, u64);
        write_u64_le: write_uint_with(8, Little, u64);
        write_i8: write_int_with(1, Big, i8);
        write_i16_be: write_int_with(2, Big, i16);
        write_i16_le: write_int_with(2, Little, i16);
        write_i24_be: write_int_with(3, Big, i32);
        write_i24_le: write_int_with(3, Little, i32);
        write_i32_be: write_int_with(4, Big, i32);
        write_i32_le: write_int_with(4, Little, i32);
        write_i40_be: write_int_with(5, Big, i64);
        write_i40_le: write_int_with(5, Little, i64);
        write_i48_be: write_int_with(6, Big, i64);
        write_i48_le: write_int_with(6, Little, i64);
        write_i64_be: write_int_with(8, Big, i64);
        write_i64_le: write_int_with(8, Little, i64);
    }

    // Bounds are checked before range so a full buffer always reports OutOfBounds.
    fn write_uint_with(&mut self, width: usize, value: u64, endian: Endian) -> Result<()> {
        let range = self.span(width)?;
        int::check_uint_range(value, width)?;
        int::encode_uint(value, &mut self.buf.as_mut()[range.clone()], endian);
        self.commit(range);
        Ok(())
    }

    fn write_int_with(&mut self, width: usize, value: i64, endian: Endian) -> Result<()> {
        let range = self.span(width)?;
        int::check_int_range(value, width)?;
        int::encode_int(value, &mut self.buf.as_mut()[range.clone()], endian);
        self.commit(range);
        Ok(())
    }

    fn commit(&mut self, range: Range<usize>) {
        if let Some(init) = &mut self.init {
            init.mark(range.start, range.len());
        }
        self.offset = range.end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_matches_capacity_after_construction() {
        let cursor = Cursor::new(vec![0u8; 5]);
        for len in 0..=8 {
            assert_eq!(cursor.available(len), len <= 5, "len {len}");
        }
        assert!(!cursor.available(usize::MAX));
    }

    #[test]
    fn alloc_zeroed() {
        let mut cursor = Cursor::zeroed(3);
        assert_eq!(cursor.capacity(), 3);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.read(3).unwrap(), &[0, 0, 0]);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn read_advances_and_returns_slice() {
        let mut cursor = Cursor::new(&[1u8, 2, 3, 4][..]);
        assert_eq!(cursor.read(2).unwrap(), &[1, 2]);
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.read_byte().unwrap(), 3);
        assert_eq!(cursor.remaining(), 1);
    }

    #[test]
    fn read_past_end_has_no_effect() {
        let mut cursor = Cursor::new(vec![1u8, 2, 3]);
        cursor.advance(2).unwrap();

        let err = cursor.read(2).unwrap_err();
        assert_eq!(
            err,
            CursorError::OutOfBounds {
                offset: 2,
                len: 2,
                capacity: 3
            }
        );
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.read(1).unwrap(), &[3]);
    }

    #[test]
    fn zero_length_read_at_end() {
        let mut cursor = Cursor::new(vec![9u8]);
        cursor.advance(1).unwrap();
        assert_eq!(cursor.read(0).unwrap(), &[] as &[u8]);
        assert!(cursor.read_byte().is_err());
    }

    #[test]
    fn peek_is_idempotent() {
        let mut cursor = Cursor::new(vec![5u8, 6, 7]);
        cursor.advance(1).unwrap();

        let first = cursor.peek(2).unwrap().to_vec();
        let second = cursor.peek(2).unwrap().to_vec();
        assert_eq!(first, vec![6, 7]);
        assert_eq!(first, second);
        assert_eq!(cursor.offset(), 1);
        assert!(cursor.peek(3).is_err());
    }

    #[test]
    fn advance_is_bounds_checked() {
        let mut cursor = Cursor::new(vec![0u8; 4]);
        assert!(cursor.advance(3).is_ok());
        assert!(cursor.advance(2).is_err());
        assert_eq!(cursor.offset(), 3);
        assert!(cursor.advance(1).is_ok());
        assert!(cursor.advance(usize::MAX).is_err());
        assert_eq!(cursor.offset(), 4);
    }

    #[test]
    fn set_offset_allows_capacity_but_not_beyond() {
        let mut cursor = Cursor::new(vec![0u8; 4]);
        cursor.set_offset(4).unwrap();
        assert!(cursor.is_exhausted());
        assert!(cursor.set_offset(5).is_err());
        assert_eq!(cursor.offset(), 4);
        cursor.set_offset(0).unwrap();
        assert_eq!(cursor.remaining(), 4);
    }

    #[test]
    fn u16_writes_fill_buffer_then_fail() {
        let mut cursor = Cursor::zeroed(4);

        cursor.write_u16_be(0x0102).unwrap();
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.as_slice(), &[0x01, 0x02, 0x00, 0x00]);

        cursor.write_u16_be(0x0304).unwrap();
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.as_slice(), &[0x01, 0x02, 0x03, 0x04]);

        let err = cursor.write_byte(5).unwrap_err();
        assert!(matches!(err, CursorError::OutOfBounds { .. }));
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.as_slice(), &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn all_ones_is_minus_one() {
        let mut cursor = Cursor::new([0xFFu8; 4]);
        assert_eq!(cursor.read_i32_be().unwrap(), -1);
    }

    #[test]
    fn u32_le_roundtrip_at_offset() {
        let mut cursor = Cursor::zeroed(7);
        let k = 3;
        let samples = (0..=u32::MAX)
            .step_by(65_521)
            .chain([0, 1, 0xFF, 0x100, 0xFFFF_FFFE, u32::MAX]);
        for x in samples {
            cursor.set_offset(k).unwrap();
            cursor.write_u32_le(x).unwrap();
            assert_eq!(cursor.offset(), k + 4);
            cursor.set_offset(k).unwrap();
            assert_eq!(cursor.read_u32_le().unwrap(), x);
        }
    }

    #[test]
    fn i24_be_roundtrip_covers_range() {
        let mut cursor = Cursor::zeroed(3);
        let min = -(1i32 << 23);
        let max = (1i32 << 23) - 1;
        let samples = (min..=max).step_by(97).chain([min, -1, 0, 1, max]);
        for x in samples {
            cursor.set_offset(0).unwrap();
            cursor.write_i24_be(x).unwrap();
            cursor.set_offset(0).unwrap();
            assert_eq!(cursor.read_i24_be().unwrap(), x);
        }
    }

    #[test]
    fn byte_order_of_named_accessors() {
        let mut cursor = Cursor::zeroed(16);
        cursor.write_u24_le(0x010203).unwrap();
        cursor.write_u40_be(0x01_0203_0405).unwrap();
        cursor.write_i16_le(-2).unwrap();
        cursor.write_u48_le(0x0102_0304_0506).unwrap();
        assert_eq!(
            cursor.as_slice(),
            &[
                0x03, 0x02, 0x01, 0x01, 0x02, 0x03, 0x04, 0x05, 0xFE, 0xFF, 0x06, 0x05, 0x04,
                0x03, 0x02, 0x01
            ]
        );

        cursor.set_offset(0).unwrap();
        assert_eq!(cursor.read_u24_be().unwrap(), 0x030201);
        assert_eq!(cursor.read_u40_be().unwrap(), 0x01_0203_0405);
        assert_eq!(cursor.read_i16_le().unwrap(), -2);
        assert_eq!(cursor.read_i48_le().unwrap(), 0x0102_0304_0506);
    }

    #[test]
    fn sixty_four_bit_accessors() {
        let mut cursor = Cursor::zeroed(32);
        cursor.write_u64_be(0x0102_0304_0506_0708).unwrap();
        cursor.write_u64_le(u64::MAX - 1).unwrap();
        cursor.write_i64_be(i64::MIN).unwrap();
        cursor.write_i64_le(-42).unwrap();
        assert_eq!(&cursor.as_slice()[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);

        cursor.set_offset(0).unwrap();
        assert_eq!(cursor.read_u64_be().unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(cursor.read_u64_le().unwrap(), u64::MAX - 1);
        assert_eq!(cursor.read_i64_be().unwrap(), i64::MIN);
        assert_eq!(cursor.read_i64_le().unwrap(), -42);
        assert!(cursor.read_u64_le().is_err());
    }

    #[test]
    fn signed_reads_sign_extend() {
        let mut cursor = Cursor::new(vec![0x80, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(cursor.read_i8().unwrap(), i8::MIN);
        assert_eq!(cursor.read_int_le(5).unwrap(), 0x7F_FFFF_FFFF);
        cursor.set_offset(1).unwrap();
        assert_eq!(cursor.read_int_be(2).unwrap(), -1);
    }

    #[test]
    fn generic_accessors_validate_width() {
        let mut cursor = Cursor::zeroed(8);
        assert_eq!(
            cursor.read_uint_be(0),
            Err(CursorError::InvalidWidth { width: 0 })
        );
        assert_eq!(
            cursor.write_int_le(7, 1),
            Err(CursorError::InvalidWidth { width: 7 })
        );
        assert_eq!(cursor.offset(), 0);

        cursor.write_uint_le(6, 0xAABB_CCDD_EEFF).unwrap();
        cursor.set_offset(0).unwrap();
        assert_eq!(cursor.read_uint_le(6).unwrap(), 0xAABB_CCDD_EEFF);
    }

    #[test]
    fn short_typed_read_does_not_advance() {
        let mut cursor = Cursor::new(vec![0u8; 5]);
        cursor.advance(2).unwrap();
        assert!(cursor.read_u32_be().is_err());
        assert!(cursor.read_int_le(4).is_err());
        assert!(cursor.read_u64_le().is_err());
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.read_u24_le().unwrap(), 0);
    }

    #[test]
    fn out_of_range_values_are_rejected_uniformly() {
        let mut cursor = Cursor::zeroed(8);

        assert_eq!(
            cursor.write_u24_be(1 << 24),
            Err(CursorError::ValueOutOfRange {
                value: 1 << 24,
                width: 3
            })
        );
        assert!(cursor.write_uint_le(2, 0x1_0000).is_err());
        assert!(cursor.write_i24_le(1 << 23).is_err());
        assert!(cursor.write_int_be(1, -129).is_err());
        assert!(cursor.write_i40_be(1 << 39).is_err());
        assert!(cursor.write_u48_be(1 << 48).is_err());

        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.as_slice(), &[0u8; 8]);
    }

    #[test]
    fn full_buffer_reports_bounds_before_range() {
        let mut cursor = Cursor::zeroed(2);
        cursor.advance(2).unwrap();
        assert!(matches!(
            cursor.write_u24_be(u32::MAX),
            Err(CursorError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn write_sources_share_bounds_rules() {
        let mut cursor = Cursor::zeroed(6);
        assert_eq!(cursor.write(&[1u8, 2]).unwrap(), 2);
        assert_eq!(cursor.write(&[0x103i64, -1][..]).unwrap(), 2);
        assert_eq!(cursor.write("hi").unwrap(), 2);
        assert_eq!(cursor.as_slice(), &[1, 2, 3, 0xFF, b'h', b'i']);

        assert!(cursor.write(&[7u8]).is_err());
        assert!(cursor.write(&[7i64][..]).is_err());
        assert!(cursor.write(("07", Encoding::Hex)).is_err());
        assert_eq!(cursor.offset(), 6);
    }

    #[test]
    fn partial_fit_writes_nothing() {
        let mut cursor = Cursor::zeroed(3);
        cursor.write_byte(0xAA).unwrap();
        assert!(cursor.write(&[1u8, 2, 3]).is_err());
        assert_eq!(cursor.as_slice(), &[0xAA, 0, 0]);
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn string_roundtrip_uses_encoded_length() {
        let mut cursor = Cursor::zeroed(6);
        assert_eq!(cursor.write_string("héllo", Encoding::Utf8).unwrap(), 6);
        cursor.set_offset(0).unwrap();
        assert_eq!(cursor.read_string(6, Encoding::Utf8).unwrap(), "héllo");

        // five chars, six bytes
        let mut small = Cursor::zeroed(5);
        assert!(small.write_string("héllo", Encoding::Utf8).is_err());
        assert_eq!(small.offset(), 0);
        assert_eq!(small.as_slice(), &[0u8; 5]);
        assert_eq!(small.write_string("héllo", Encoding::Latin1).unwrap(), 5);
    }

    #[test]
    fn read_string_fails_like_read() {
        let mut cursor = Cursor::new(b"abc".to_vec());
        assert!(cursor.read_string(4, Encoding::Ascii).is_err());
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.read_string(3, Encoding::Hex).unwrap(), "616263");
    }

    #[test]
    fn invalid_base64_writes_nothing() {
        let mut cursor = Cursor::zeroed(8);
        let err = cursor.write_string("%%%", Encoding::Base64).unwrap_err();
        assert!(matches!(err, CursorError::InvalidText { .. }));
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn uninit_refuses_unwritten_reads() {
        let mut cursor = Cursor::uninit(4);
        assert_eq!(
            cursor.read_byte(),
            Err(CursorError::Uninitialized { offset: 0 })
        );
        assert_eq!(cursor.offset(), 0);

        cursor.write_u16_le(0xBEEF).unwrap();
        cursor.set_offset(0).unwrap();
        assert_eq!(cursor.read_u16_le().unwrap(), 0xBEEF);
        assert_eq!(
            cursor.peek(2),
            Err(CursorError::Uninitialized { offset: 2 })
        );

        cursor.advance(1).unwrap();
        cursor.set_offset(1).unwrap();
        assert_eq!(
            cursor.read_u16_be(),
            Err(CursorError::Uninitialized { offset: 2 })
        );
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn uninit_bounds_take_precedence() {
        let mut cursor = Cursor::uninit(2);
        assert!(matches!(
            cursor.read(3),
            Err(CursorError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn borrowed_mut_buffer_is_written_in_place() {
        let mut storage = [0u8; 4];
        {
            let mut cursor = Cursor::new(&mut storage[..]);
            cursor.write_i16_be(-1).unwrap();
            cursor.write_u8(0x7F).unwrap();
            cursor.write_i8(-128).unwrap();
        }
        assert_eq!(storage, [0xFF, 0xFF, 0x7F, 0x80]);
    }

    #[test]
    fn offset_never_exceeds_capacity() {
        let mut cursor = Cursor::zeroed(5);
        let _ = cursor.write_u32_be(1);
        let _ = cursor.write_u16_be(1);
        let _ = cursor.advance(3);
        let _ = cursor.read(2);
        let _ = cursor.write_byte(1);
        let _ = cursor.write_string("xy", Encoding::Utf8);
        assert!(cursor.offset() <= cursor.capacity());
        assert_eq!(cursor.offset(), 5);
    }

    #[test]
    fn accessors_and_into_inner() {
        let mut cursor = Cursor::new(vec![1u8, 2]);
        assert_eq!(cursor.get_ref(), &vec![1, 2]);
        cursor.get_mut()[1] = 3;
        assert_eq!(cursor.capacity(), 2);
        assert_eq!(cursor.into_inner(), vec![1, 3]);
    }

    #[test]
    fn get_mut_keeps_offset_within_capacity() {
        let mut cursor = Cursor::new(vec![0u8; 4]);
        cursor.advance(4).unwrap();
        cursor.get_mut().fill(0xAA);
        assert_eq!(cursor.capacity(), 4);
        assert!(cursor.offset() <= cursor.capacity());
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.into_inner(), vec![0xAA; 4]);
    }

    #[test]
    fn get_mut_does_not_mark_uninitialized_bytes() {
        let mut cursor = Cursor::uninit(2);
        cursor.get_mut()[1] = 7;
        cursor.set_offset(1).unwrap();
        assert_eq!(
            cursor.read_byte(),
            Err(CursorError::Uninitialized { offset: 1 })
        );
        assert_eq!(cursor.offset(), 1);
    }
}
