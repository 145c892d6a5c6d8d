pub mod codec;
pub mod decoder;
pub mod error;
pub mod header;
pub mod mode;
pub mod transport;

use serde::Serialize;

pub use codec::{Encoding, Field, Sentinel};
pub use decoder::Decoder;
pub use error::{DecodeError, TransportError};
pub use header::{Band, Header};
pub use mode::WorkMode;
pub use transport::Transport;

/// Smallest payload the decoder will look at. Byte 6 carries the work mode.
pub const MIN_PAYLOAD_LEN: usize = 7;

/// A single named value decoded from an uplink.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Label from the work mode's fixed vocabulary, e.g. `"Bat V"`.
    pub name: &'static str,
    /// Scaled value.
    pub value: f64,
}

impl Measurement {
    pub const fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
}

/// A decoded uplink: the header it was dispatched on and its measurements in
/// emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Uplink {
    #[serde(flatten)]
    pub header: Header,
    pub measurements: Vec<Measurement>,
}
