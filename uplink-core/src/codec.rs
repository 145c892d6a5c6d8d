use tracing::trace;

use crate::Measurement;

/// Raw value reported by a node for a reading it did not take.
pub const NOT_MEASURED: u16 = 0x7FFF;
/// Raw value reported by a node when the sensor is missing or failed.
pub const ABSENT: u16 = 0xFFFF;

/// Assemble an unsigned big-endian 16-bit value.
pub const fn uint16_be(hi: u8, lo: u8) -> u16 {
    ((hi as u16) << 8) | lo as u16
}

/// Assemble a signed big-endian 16-bit value.
///
/// Only the high byte is sign-extended before the low byte is OR-ed in
/// unsigned, so `0xFF 0x9C` gives `-100`.
pub const fn int16_be(hi: u8, lo: u8) -> i16 {
    let wide = ((hi as i8 as i32) << 8) | lo as i32;
    wide as i16
}

/// Assemble an unsigned big-endian 32-bit value.
pub const fn uint32_be(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    ((b0 as u32) << 24) | ((b1 as u32) << 16) | ((b2 as u32) << 8) | b3 as u32
}

/// Convert a fixed-point integer to its decimal value.
pub fn scale(value: impl Into<f64>, divisor: f64) -> f64 {
    value.into() / divisor
}

/// Exact comparison of two payload bytes against a reserved pattern.
pub const fn is_sentinel(bytes: [u8; 2], pattern: u16) -> bool {
    uint16_be(bytes[0], bytes[1]) == pattern
}

/// Which reserved patterns make a field absent from the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Always emitted.
    None,
    /// `0x7FFF`.
    NotMeasured,
    /// `0xFFFF`.
    Absent,
    /// Either `0x7FFF` or `0xFFFF`.
    Unset,
    /// `0x0000`.
    Zero,
}

impl Sentinel {
    /// The concrete byte patterns this rule rejects.
    pub const fn patterns(self) -> &'static [u16] {
        match self {
            Sentinel::None => &[],
            Sentinel::NotMeasured => &[NOT_MEASURED],
            Sentinel::Absent => &[ABSENT],
            Sentinel::Unset => &[NOT_MEASURED, ABSENT],
            Sentinel::Zero => &[0x0000],
        }
    }

    pub fn matches(self, bytes: [u8; 2]) -> bool {
        self.patterns()
            .iter()
            .any(|&pattern| is_sentinel(bytes, pattern))
    }
}

/// How a field's bytes are assembled into an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    U8,
    U16,
    I16,
    U32,
    /// 32-bit value sent low word first: bytes `[o+2, o+3, o, o+1]`.
    U32WordSwapped,
}

impl Encoding {
    pub const fn width(self) -> usize {
        match self {
            Encoding::U8 => 1,
            Encoding::U16 | Encoding::I16 => 2,
            Encoding::U32 | Encoding::U32WordSwapped => 4,
        }
    }

    fn read(self, raw: &[u8], offset: usize) -> f64 {
        let b = &raw[offset..offset + self.width()];
        match self {
            Encoding::U8 => f64::from(b[0]),
            Encoding::U16 => f64::from(uint16_be(b[0], b[1])),
            Encoding::I16 => f64::from(int16_be(b[0], b[1])),
            Encoding::U32 => f64::from(uint32_be(b[0], b[1], b[2], b[3])),
            Encoding::U32WordSwapped => f64::from(uint32_be(b[2], b[3], b[0], b[1])),
        }
    }
}

/// One entry of a work mode's layout table.
///
/// Reads are unchecked; the payload must be at least [`Field::end`] bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub encoding: Encoding,
    pub divisor: f64,
    pub sentinel: Sentinel,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, encoding: Encoding) -> Self {
        Self {
            name,
            offset,
            encoding,
            divisor: 1.0,
            sentinel: Sentinel::None,
        }
    }

    pub const fn divisor(mut self, divisor: f64) -> Self {
        self.divisor = divisor;
        self
    }

    pub const fn sentinel(mut self, sentinel: Sentinel) -> Self {
        self.sentinel = sentinel;
        self
    }

    /// Exclusive end offset; the payload must be at least this long.
    pub const fn end(&self) -> usize {
        self.offset + self.encoding.width()
    }

    /// The two bytes a sentinel is checked against.
    pub fn raw_bytes(&self, raw: &[u8]) -> [u8; 2] {
        [raw[self.offset], raw[self.offset + 1]]
    }

    /// Whether the field carries a sentinel pattern in this payload.
    pub fn is_unset(&self, raw: &[u8]) -> bool {
        self.sentinel != Sentinel::None && self.sentinel.matches(self.raw_bytes(raw))
    }

    /// Read and scale the field, or `None` if its sentinel matched.
    pub fn read(&self, raw: &[u8]) -> Option<Measurement> {
        if self.is_unset(raw) {
            trace!(field = self.name, offset = self.offset, "sentinel matched, field omitted");
            return None;
        }

        let value = scale(self.encoding.read(raw, self.offset), self.divisor);
        Some(Measurement::new(self.name, value))
    }
}
