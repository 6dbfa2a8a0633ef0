//! Field layouts accepted by `decode` and `encode`.
//!
//! Integer fields are named by bit width and byte order (`u8`, `i16le`,
//! `u48be`, `i64le`) or by byte width (`uint3be`, `int5le`). Single-byte
//! fields take no byte order. Other fields: `bytes:N`, `skip:N` and
//! `str:N[:ENCODING]` when decoding; `bytes=HEX`, `skip:N` and
//! `str[:ENCODING]=TEXT` when encoding.

use std::fmt;
use std::str::FromStr;

use advanceable_cursor::{Cursor, CursorError, Encoding, Endian};
use serde::Serialize;

/// One field to read from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Uint { width: usize, endian: Endian },
    Int { width: usize, endian: Endian },
    Bytes(usize),
    Skip(usize),
    Str { len: usize, encoding: Encoding },
}

/// A decoded field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Uint(u64),
    Int(i64),
    /// Lowercase hex.
    Bytes(String),
    Text(String),
    Skipped,
}

impl Field {
    /// Read this field at the cursor's offset.
    pub fn read<B>(&self, cursor: &mut Cursor<B>) -> Result<FieldValue, CursorError>
    where
        B: AsRef<[u8]>,
    {
        let value = match *self {
            Field::Uint { width: 8, endian } => FieldValue::Uint(match endian {
                Endian::Big => cursor.read_u64_be()?,
                Endian::Little => cursor.read_u64_le()?,
            }),
            Field::Uint { width, endian } => FieldValue::Uint(match endian {
                Endian::Big => cursor.read_uint_be(width)?,
                Endian::Little => cursor.read_uint_le(width)?,
            }),
            Field::Int { width: 8, endian } => FieldValue::Int(match endian {
                Endian::Big => cursor.read_i64_be()?,
                Endian::Little => cursor.read_i64_le()?,
            }),
            Field::Int { width, endian } => FieldValue::Int(match endian {
                Endian::Big => cursor.read_int_be(width)?,
                Endian::Little => cursor.read_int_le(width)?,
            }),
            Field::Bytes(len) => FieldValue::Bytes(cursor.read_string(len, Encoding::Hex)?),
            Field::Skip(len) => {
                cursor.advance(len)?;
                FieldValue::Skipped
            }
            Field::Str { len, encoding } => FieldValue::Text(cursor.read_string(len, encoding)?),
        };
        Ok(value)
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(len) = s.strip_prefix("bytes:") {
            return parse_len(len).map(Field::Bytes);
        }
        if let Some(len) = s.strip_prefix("skip:") {
            return parse_len(len).map(Field::Skip);
        }
        if let Some(rest) = s.strip_prefix("str:") {
            let (len, encoding) = match rest.split_once(':') {
                Some((len, encoding)) => (len, parse_encoding(encoding)?),
                None => (rest, Encoding::Utf8),
            };
            return Ok(Field::Str {
                len: parse_len(len)?,
                encoding,
            });
        }
        if matches!(s, "bytes" | "str") {
            return Err(format!("field `{s}` needs a length when decoding"));
        }
        parse_int_name(s).ok_or_else(|| format!("unknown field `{s}`"))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Field::Uint { width, endian } => write_int_name(f, 'u', width, endian),
            Field::Int { width, endian } => write_int_name(f, 'i', width, endian),
            Field::Bytes(len) => write!(f, "bytes:{len}"),
            Field::Skip(len) => write!(f, "skip:{len}"),
            Field::Str { len, encoding } => write!(f, "str:{len}:{encoding}"),
        }
    }
}

/// One value to write into the output buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeItem {
    Uint {
        width: usize,
        endian: Endian,
        value: u64,
    },
    Int {
        width: usize,
        endian: Endian,
        value: i64,
    },
    Bytes(Vec<u8>),
    Skip(usize),
    Text {
        value: String,
        encoding: Encoding,
    },
}

impl EncodeItem {
    /// Write this item at the cursor's offset.
    pub fn write<B>(&self, cursor: &mut Cursor<B>) -> Result<(), CursorError>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        match self {
            EncodeItem::Uint {
                width: 8,
                endian,
                value,
            } => match endian {
                Endian::Big => cursor.write_u64_be(*value),
                Endian::Little => cursor.write_u64_le(*value),
            },
            EncodeItem::Uint {
                width,
                endian,
                value,
            } => match endian {
                Endian::Big => cursor.write_uint_be(*width, *value),
                Endian::Little => cursor.write_uint_le(*width, *value),
            },
            EncodeItem::Int {
                width: 8,
                endian,
                value,
            } => match endian {
                Endian::Big => cursor.write_i64_be(*value),
                Endian::Little => cursor.write_i64_le(*value),
            },
            EncodeItem::Int {
                width,
                endian,
                value,
            } => match endian {
                Endian::Big => cursor.write_int_be(*width, *value),
                Endian::Little => cursor.write_int_le(*width, *value),
            },
            EncodeItem::Bytes(bytes) => cursor.write(bytes).map(drop),
            EncodeItem::Skip(len) => cursor.advance(*len),
            EncodeItem::Text { value, encoding } => {
                cursor.write_string(value, *encoding).map(drop)
            }
        }
    }
}

impl FromStr for EncodeItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((name, value)) = s.split_once('=') else {
            return match s.strip_prefix("skip:") {
                Some(len) => parse_len(len).map(EncodeItem::Skip),
                None => Err(format!("`{s}` needs a value (FIELD=VALUE)")),
            };
        };

        if name == "bytes" {
            return parse_hex(value).map(EncodeItem::Bytes);
        }
        if name == "str" || name.starts_with("str:") {
            let encoding = match name.strip_prefix("str:") {
                Some(encoding) => parse_encoding(encoding)?,
                None => Encoding::Utf8,
            };
            return Ok(EncodeItem::Text {
                value: value.to_string(),
                encoding,
            });
        }

        match parse_int_name(name) {
            Some(Field::Uint { width, endian }) => Ok(EncodeItem::Uint {
                width,
                endian,
                value: parse_u64(value)?,
            }),
            Some(Field::Int { width, endian }) => Ok(EncodeItem::Int {
                width,
                endian,
                value: parse_i64(value)?,
            }),
            _ => Err(format!("unknown field `{name}`")),
        }
    }
}

impl fmt::Display for EncodeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeItem::Uint { width, endian, .. } => write_int_name(f, 'u', *width, *endian),
            EncodeItem::Int { width, endian, .. } => write_int_name(f, 'i', *width, *endian),
            EncodeItem::Bytes(bytes) => write!(f, "bytes:{}", bytes.len()),
            EncodeItem::Skip(len) => write!(f, "skip:{len}"),
            EncodeItem::Text { encoding, .. } => write!(f, "str:{encoding}"),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Uint(v) => write!(f, "{v}"),
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Bytes(hex) => f.write_str(hex),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Skipped => f.write_str("-"),
        }
    }
}

/// Strict hex: ASCII whitespace is ignored, everything else must be digit pairs.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let digits: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex `{input}`"));
    }
    Encoding::Hex.encode(&digits).map_err(|err| err.to_string())
}

fn parse_int_name(name: &str) -> Option<Field> {
    // `uint`/`int` count bytes, `u`/`i` count bits.
    let (signed, byte_units, rest) = if let Some(rest) = name.strip_prefix("uint") {
        (false, true, rest)
    } else if let Some(rest) = name.strip_prefix("int") {
        (true, true, rest)
    } else if let Some(rest) = name.strip_prefix('u') {
        (false, false, rest)
    } else if let Some(rest) = name.strip_prefix('i') {
        (true, false, rest)
    } else {
        return None;
    };

    let (digits, endian) = if let Some(digits) = rest.strip_suffix("be") {
        (digits, Some(Endian::Big))
    } else if let Some(digits) = rest.strip_suffix("le") {
        (digits, Some(Endian::Little))
    } else {
        (rest, None)
    };

    let n: usize = digits.parse().ok()?;
    let width = if byte_units {
        n
    } else if n % 8 == 0 {
        n / 8
    } else {
        return None;
    };
    if !(1..=6).contains(&width) && width != 8 {
        return None;
    }

    let endian = match (width, endian) {
        (1, endian) => endian.unwrap_or(Endian::Big),
        (_, Some(endian)) => endian,
        (_, None) => return None,
    };
    Some(if signed {
        Field::Int { width, endian }
    } else {
        Field::Uint { width, endian }
    })
}

fn write_int_name(
    f: &mut fmt::Formatter<'_>,
    prefix: char,
    width: usize,
    endian: Endian,
) -> fmt::Result {
    let bits = width * 8;
    match (width, endian) {
        (1, _) => write!(f, "{prefix}{bits}"),
        (_, Endian::Big) => write!(f, "{prefix}{bits}be"),
        (_, Endian::Little) => write!(f, "{prefix}{bits}le"),
    }
}

fn parse_len(input: &str) -> Result<usize, String> {
    input
        .parse()
        .map_err(|_| format!("invalid length `{input}`"))
}

fn parse_encoding(input: &str) -> Result<Encoding, String> {
    input.parse().map_err(|err: advanceable_cursor::UnknownEncoding| err.to_string())
}

fn parse_u64(input: &str) -> Result<u64, String> {
    let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("invalid unsigned value `{input}`"))
}

fn parse_i64(input: &str) -> Result<i64, String> {
    let (negative, magnitude) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let magnitude = i128::from(
        parse_u64(magnitude).map_err(|_| format!("invalid signed value `{input}`"))?,
    );
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).map_err(|_| format!("signed value `{input}` exceeds 64 bits"))
}
