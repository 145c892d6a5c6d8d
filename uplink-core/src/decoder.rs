use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{DecodeError, DecodeResult};
use crate::header::Header;
use crate::mode::WorkMode;
use crate::transport::Transport;
use crate::{Measurement, Uplink};

/// Dispatches payloads to the work mode named in their header.
///
/// The set of registered modes is fixed at construction; a `Decoder` is
/// never mutated afterwards and can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Decoder {
    modes: BTreeMap<u8, WorkMode>,
}

impl Decoder {
    /// A decoder for every supported work mode.
    pub fn new() -> Self {
        Self::with_modes(WorkMode::ALL)
    }

    /// A decoder restricted to `modes`. Payloads for any other mode are
    /// rejected as unsupported.
    pub fn with_modes(modes: impl IntoIterator<Item = WorkMode>) -> Self {
        Self {
            modes: modes.into_iter().map(|mode| (mode.code(), mode)).collect(),
        }
    }

    pub fn modes(&self) -> impl Iterator<Item = WorkMode> + '_ {
        self.modes.values().copied()
    }

    pub fn lookup(&self, code: u8) -> Option<WorkMode> {
        self.modes.get(&code).copied()
    }

    /// Decode standard base64 text.
    pub fn decode_base64(&self, text: &str) -> DecodeResult<Vec<Measurement>> {
        self.decode_text(text, Transport::Base64)
            .map(|uplink| uplink.measurements)
    }

    /// Decode transport-encoded text, keeping the header.
    pub fn decode_text(&self, text: &str, transport: Transport) -> DecodeResult<Uplink> {
        let raw = transport.decode(text)?;
        self.decode_uplink(&raw)
    }

    /// Decode raw payload bytes.
    pub fn decode(&self, raw: &[u8]) -> DecodeResult<Vec<Measurement>> {
        self.decode_uplink(raw).map(|uplink| uplink.measurements)
    }

    /// Decode raw payload bytes, keeping the header.
    pub fn decode_uplink(&self, raw: &[u8]) -> DecodeResult<Uplink> {
        let header = Header::parse(raw)?;
        let mode = self
            .lookup(header.mode)
            .ok_or(DecodeError::UnsupportedMode(header.mode))?;

        let measurements = mode.decode(&header, raw)?;

        debug!(
            mode = header.mode,
            band = %header.band,
            len = raw.len(),
            count = measurements.len(),
            "Decoded uplink"
        );

        Ok(Uplink {
            header,
            measurements,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registers_all_modes() {
        let decoder = Decoder::default();
        let codes: Vec<u8> = decoder.modes().map(WorkMode::code).collect();
        assert_eq!(codes, [0, 1, 2, 3, 4, 5, 7, 8]);
        assert_eq!(decoder.lookup(6), None);
    }

    #[test]
    fn restricted_decoder_rejects_other_modes() {
        let decoder = Decoder::with_modes([WorkMode::Counting]);
        let mut raw = [0u8; 11];
        raw[6] = 1 << 2;
        assert!(matches!(
            decoder.decode(&raw),
            Err(DecodeError::UnsupportedMode(1))
        ));

        raw[6] = 5 << 2;
        raw[10] = 7;
        assert_eq!(
            decoder.decode(&raw).unwrap(),
            [Measurement::new("Count", 7.0)]
        );
    }

    #[test]
    fn length_floor_precedes_mode_lookup() {
        let decoder = Decoder::with_modes(Vec::new());
        assert!(matches!(
            decoder.decode(&[0u8; 6]),
            Err(DecodeError::ShortPayload(6))
        ));
        assert!(matches!(
            decoder.decode(&[0u8; 7]),
            Err(DecodeError::UnsupportedMode(0))
        ));
    }

    #[test]
    fn header_is_kept() {
        let mut raw = [0u8; 11];
        raw[0] = 0x0D;
        raw[6] = (5 << 2) | 0x01;
        let uplink = Decoder::new().decode_uplink(&raw).unwrap();
        assert_eq!(uplink.header.mode, 5);
        assert_eq!(uplink.header.band.name(), "KR920");
    }
}
