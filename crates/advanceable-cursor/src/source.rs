//! Inputs accepted by the raw write.

use std::borrow::Cow;

use crate::encoding::Encoding;
use crate::error::Result;

/// Anything [`Cursor::write`](crate::Cursor::write) can copy into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteSource<'a> {
    /// Raw bytes, copied as-is.
    Bytes(&'a [u8]),
    /// Byte values; each entry keeps only its low 8 bits.
    Values(&'a [i64]),
    /// Text, written in the given encoding.
    Text { value: &'a str, encoding: Encoding },
}

impl<'a> WriteSource<'a> {
    /// Text source with an explicit encoding.
    pub fn text(value: &'a str, encoding: Encoding) -> Self {
        Self::Text { value, encoding }
    }

    /// The bytes this source writes, borrowed when no conversion is needed.
    pub fn to_bytes(&self) -> Result<Cow<'a, [u8]>> {
        match *self {
            Self::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Self::Values(values) => Ok(Cow::Owned(values.iter().map(|&v| v as u8).collect())),
            Self::Text {
                value,
                encoding: Encoding::Utf8,
            } => Ok(Cow::Borrowed(value.as_bytes())),
            Self::Text { value, encoding } => encoding.encode(value).map(Cow::Owned),
        }
    }
}

impl<'a> From<&'a [u8]> for WriteSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for WriteSource<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for WriteSource<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a [i64]> for WriteSource<'a> {
    fn from(values: &'a [i64]) -> Self {
        Self::Values(values)
    }
}

impl<'a> From<&'a str> for WriteSource<'a> {
    fn from(value: &'a str) -> Self {
        Self::text(value, Encoding::Utf8)
    }
}

impl<'a> From<(&'a str, Encoding)> for WriteSource<'a> {
    fn from((value, encoding): (&'a str, Encoding)) -> Self {
        Self::text(value, encoding)
    }
}
