use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Text encoding an uplink payload arrives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Standard alphabet, padded. What network servers put in `frm_payload`.
    #[default]
    Base64,
    Hex,
}

impl Transport {
    pub fn decode(self, text: &str) -> Result<Vec<u8>, TransportError> {
        let text = text.trim();
        let raw = match self {
            Transport::Base64 => STANDARD.decode(text)?,
            Transport::Hex => hex::decode(text)?,
        };
        Ok(raw)
    }

    pub fn encode(self, raw: &[u8]) -> String {
        match self {
            Transport::Base64 => STANDARD.encode(raw),
            Transport::Hex => hex::encode_upper(raw),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Base64 => f.write_str("base64"),
            Transport::Hex => f.write_str("hex"),
        }
    }
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "base64" => Ok(Transport::Base64),
            "hex" => Ok(Transport::Hex),
            other => Err(format!("unknown payload encoding '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_standard_alphabet() {
        let raw = Transport::Base64.decode("AGR//wDIBAEsAGQ=").unwrap();
        assert_eq!(
            raw,
            [0x00, 0x64, 0x7F, 0xFF, 0x00, 0xC8, 0x04, 0x01, 0x2C, 0x00, 0x64]
        );
    }

    #[test]
    fn base64_rejects_garbage() {
        assert!(matches!(
            Transport::Base64.decode("not-base64!!"),
            Err(TransportError::Base64(_))
        ));
    }

    #[test]
    fn hex_is_case_insensitive() {
        assert_eq!(Transport::Hex.decode("7fFF").unwrap(), [0x7F, 0xFF]);
        assert!(matches!(
            Transport::Hex.decode("7FF"),
            Err(TransportError::Hex(_))
        ));
    }

    #[test]
    fn encode_matches_decode() {
        let raw = [0x0B, 0x45, 0x01, 0x0C];
        for transport in [Transport::Base64, Transport::Hex] {
            assert_eq!(transport.decode(&transport.encode(&raw)).unwrap(), raw);
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("HEX".parse::<Transport>(), Ok(Transport::Hex));
        assert_eq!("base64".parse::<Transport>(), Ok(Transport::Base64));
        assert!("b64".parse::<Transport>().is_err());
    }
}
