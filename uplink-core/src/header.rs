use std::fmt;

use serde::{Serialize, Serializer};

use crate::MIN_PAYLOAD_LEN;
use crate::error::{DecodeError, DecodeResult};

/// Byte carrying the work mode in bits 2..=6.
pub const MODE_BYTE: usize = 6;
const MODE_MASK: u8 = 0x7C;

/// Frequency plan reported in the first payload byte.
///
/// Carried for information only; it never changes how fields are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Eu868,
    Us915,
    In865,
    Au915,
    Kz865,
    Ru864,
    As923,
    As923_1,
    As923_2,
    As923_3,
    As923_4,
    Cn470,
    Eu433,
    Kr920,
    Ma869,
    /// A code outside the table. Its name is empty.
    Unknown(u8),
}

impl Band {
    pub const fn from_code(code: u8) -> Self {
        match code {
            0x01 => Band::Eu868,
            0x02 => Band::Us915,
            0x03 => Band::In865,
            0x04 => Band::Au915,
            0x05 => Band::Kz865,
            0x06 => Band::Ru864,
            0x07 => Band::As923,
            0x08 => Band::As923_1,
            0x09 => Band::As923_2,
            0x0A => Band::As923_3,
            0x0B => Band::Cn470,
            0x0C => Band::Eu433,
            0x0D => Band::Kr920,
            0x0E => Band::Ma869,
            0x0F => Band::As923_4,
            other => Band::Unknown(other),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Band::Eu868 => "EU868",
            Band::Us915 => "US915",
            Band::In865 => "IN865",
            Band::Au915 => "AU915",
            Band::Kz865 => "KZ865",
            Band::Ru864 => "RU864",
            Band::As923 => "AS923",
            Band::As923_1 => "AS923_1",
            Band::As923_2 => "AS923_2",
            Band::As923_3 => "AS923_3",
            Band::As923_4 => "AS923_4",
            Band::Cn470 => "CN470",
            Band::Eu433 => "EU433",
            Band::Kr920 => "KR920",
            Band::Ma869 => "MA869",
            Band::Unknown(_) => "",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Band {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Fields derived from a payload before it is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Work mode code, 0..=31.
    pub mode: u8,
    pub band: Band,
}

impl Header {
    pub fn parse(raw: &[u8]) -> DecodeResult<Self> {
        if raw.len() < MIN_PAYLOAD_LEN {
            return Err(DecodeError::ShortPayload(raw.len()));
        }

        Ok(Self {
            mode: (raw[MODE_BYTE] & MODE_MASK) >> 2,
            band: Band::from_code(raw[0]),
        })
    }
}
