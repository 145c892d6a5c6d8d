#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("transport decode error: {0}")]
    Transport(#[from] TransportError),
    #[error("payload too short: {0} bytes")]
    ShortPayload(usize),
    #[error("unsupported mode {0}")]
    UnsupportedMode(u8),
    #[error("malformed payload: mode {mode} needs {needed} bytes, got {available}")]
    MalformedPayload {
        mode: u8,
        needed: usize,
        available: usize,
    },
}

pub type DecodeResult<T> = core::result::Result<T, DecodeError>;
