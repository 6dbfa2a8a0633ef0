//! Text encodings for the string accessors.
//!
//! Decoding bytes into text never fails: malformed input is replaced or
//! masked. Encoding text into bytes only fails for base64 input that is not
//! base64 at all.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine as _};

use crate::error::{CursorError, Result};

/// Accepts padded and unpadded input with stray trailing bits.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Character encoding used to convert between text and bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    /// Two bytes per UTF-16 code unit, little endian.
    Utf16Le,
    /// One byte per character, the low 8 bits of the code point.
    Latin1,
    /// Like `Latin1` on encode; decoding masks every byte to 7 bits.
    Ascii,
    /// Two hex digits per byte.
    Hex,
    Base64,
    /// URL-safe alphabet, rendered without padding.
    Base64Url,
}

impl Encoding {
    /// All supported encodings.
    pub const ALL: [Encoding; 7] = [
        Encoding::Utf8,
        Encoding::Utf16Le,
        Encoding::Latin1,
        Encoding::Ascii,
        Encoding::Hex,
        Encoding::Base64,
        Encoding::Base64Url,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
            Encoding::Base64Url => "base64url",
        }
    }

    /// Number of bytes `value` occupies once encoded.
    ///
    /// This is the encoded length, not the character count.
    pub fn byte_len(self, value: &str) -> Result<usize> {
        Ok(match self {
            Encoding::Utf8 => value.len(),
            Encoding::Utf16Le => value.encode_utf16().count() * 2,
            Encoding::Latin1 | Encoding::Ascii => value.chars().count(),
            Encoding::Hex | Encoding::Base64 | Encoding::Base64Url => self.encode(value)?.len(),
        })
    }

    /// Encode `value` into bytes.
    pub fn encode(self, value: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(value.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(value
                .encode_utf16()
                .flat_map(u16::to_le_bytes)
                .collect()),
            Encoding::Latin1 | Encoding::Ascii => {
                Ok(value.chars().map(|c| c as u32 as u8).collect())
            }
            Encoding::Hex => Ok(hex_to_bytes(value)),
            Encoding::Base64 | Encoding::Base64Url => base64_to_bytes(self, value),
        }
    }

    /// Decode `bytes` into text.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Utf16Le => {
                let units = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
                char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
            Encoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Encoding::Ascii => bytes.iter().map(|&b| char::from(b & 0x7F)).collect(),
            Encoding::Hex => bytes.iter().map(|b| format!("{b:02x}")).collect(),
            Encoding::Base64 => STANDARD.encode(bytes),
            Encoding::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an encoding name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown encoding `{0}`")]
pub struct UnknownEncoding(pub String);

impl FromStr for Encoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Encoding::Utf16Le),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "ascii" => Ok(Encoding::Ascii),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            "base64url" => Ok(Encoding::Base64Url),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

// Stops at the first pair that is not two hex digits; a lone trailing digit is dropped.
fn hex_to_bytes(value: &str) -> Vec<u8> {
    value
        .as_bytes()
        .chunks_exact(2)
        .map_while(|pair| {
            let hi = char::from(pair[0]).to_digit(16)?;
            let lo = char::from(pair[1]).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        })
        .collect()
}

fn base64_to_bytes(encoding: Encoding, value: &str) -> Result<Vec<u8>> {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    LENIENT_BASE64
        .decode(normalized)
        .map_err(|err| CursorError::InvalidText {
            encoding,
            reason: err.to_string(),
        })
}
