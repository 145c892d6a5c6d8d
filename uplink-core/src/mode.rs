use std::fmt;

use tracing::trace;

use crate::codec::{Encoding, Field, Sentinel};
use crate::error::{DecodeError, DecodeResult};
use crate::header::Header;
use crate::{MIN_PAYLOAD_LEN, Measurement};

const BAT_V: Field = Field::new("Bat V", 0, Encoding::U16).divisor(1000.0);
const TEMP_C1: Field = Field::new("Temp C1", 2, Encoding::I16)
    .divisor(10.0)
    .sentinel(Sentinel::Unset);
const ADC_CH0V: Field = Field::new("ADC CH0V", 4, Encoding::U16).divisor(1000.0);

const ILLUM: Field = Field::new("Illum", 7, Encoding::U16);
const TEMP_SHT: Field = Field::new("TempC SHT", 7, Encoding::I16)
    .divisor(10.0)
    .sentinel(Sentinel::Unset);
const HUM_SHT: Field = Field::new("Hum SHT", 9, Encoding::U16)
    .divisor(10.0)
    .sentinel(Sentinel::Absent);

const DISTANCE: Field = Field::new("Distance Cm", 7, Encoding::U16)
    .divisor(10.0)
    .sentinel(Sentinel::Zero);
const SIGNAL: Field = Field::new("Signal", 9, Encoding::U16).sentinel(Sentinel::Absent);

// Mode 2 moves the battery to a single byte after the I2C block.
const BAT_V_BYTE: Field = Field::new("Bat V", 11, Encoding::U8).divisor(10.0);
const ADC_CH0V_FIRST: Field = Field::new("ADC CH0V", 0, Encoding::U16).divisor(1000.0);
const ADC_CH1V_SECOND: Field = Field::new("ADC CH1V", 2, Encoding::U16).divisor(1000.0);
const ADC_CH4V_THIRD: Field = Field::new("ADC CH4V", 4, Encoding::U16).divisor(1000.0);

const TEMP_C2: Field = Field::new("Temp C2", 7, Encoding::I16)
    .divisor(10.0)
    .sentinel(Sentinel::Unset);
const TEMP_C3: Field = Field::new("Temp C3", 9, Encoding::I16)
    .divisor(10.0)
    .sentinel(Sentinel::Unset);

const WEIGHT: Field = Field::new("Weight", 7, Encoding::U32WordSwapped);
const COUNT: Field = Field::new("Count", 7, Encoding::U32);

const ADC_CH1V: Field = Field::new("ADC CH1V", 7, Encoding::U16).divisor(1000.0);
const ADC_CH4V: Field = Field::new("ADC CH4V", 9, Encoding::U16).divisor(1000.0);

// Mode 8 drops ADC CH0V and reuses its bytes for the second temperature sensor.
const TEMP_C2_DUAL: Field = Field::new("Temp C2", 4, Encoding::I16)
    .divisor(10.0)
    .sentinel(Sentinel::Unset);
const TEMP_C3_DUAL: Field = Field::new("Temp C3", 7, Encoding::I16)
    .divisor(10.0)
    .sentinel(Sentinel::Unset);
const COUNT_1: Field = Field::new("Count 1", 9, Encoding::U32);
const COUNT_2: Field = Field::new("Count 2", 13, Encoding::U32);

/// Supported work modes. Code 6 is reserved on the hardware and has no
/// variant.
///
/// Each mode's layout is a table of [`Field`]s in emission order. Modes 0
/// and 2 additionally pick between an illumination reading and an SHT
/// temperature/humidity pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkMode {
    /// 0: ADC, DS18B20 and an I2C SHT sensor or light sensor.
    Iic,
    /// 1: ultrasonic distance.
    Distance,
    /// 2: three ADC channels plus the I2C block.
    TripleAdc,
    /// 3: three DS18B20 sensors.
    TripleTemp,
    /// 4: load cell.
    Weight,
    /// 5: interrupt counter.
    Counting,
    /// 7: three ADC channels plus one DS18B20.
    AdcTemp,
    /// 8: three DS18B20 sensors plus two counters.
    DualCounting,
}

impl WorkMode {
    pub const ALL: [WorkMode; 8] = [
        WorkMode::Iic,
        WorkMode::Distance,
        WorkMode::TripleAdc,
        WorkMode::TripleTemp,
        WorkMode::Weight,
        WorkMode::Counting,
        WorkMode::AdcTemp,
        WorkMode::DualCounting,
    ];

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(WorkMode::Iic),
            1 => Some(WorkMode::Distance),
            2 => Some(WorkMode::TripleAdc),
            3 => Some(WorkMode::TripleTemp),
            4 => Some(WorkMode::Weight),
            5 => Some(WorkMode::Counting),
            7 => Some(WorkMode::AdcTemp),
            8 => Some(WorkMode::DualCounting),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            WorkMode::Iic => 0,
            WorkMode::Distance => 1,
            WorkMode::TripleAdc => 2,
            WorkMode::TripleTemp => 3,
            WorkMode::Weight => 4,
            WorkMode::Counting => 5,
            WorkMode::AdcTemp => 7,
            WorkMode::DualCounting => 8,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WorkMode::Iic => "IIC",
            WorkMode::Distance => "Distance",
            WorkMode::TripleAdc => "3ADC+IIC",
            WorkMode::TripleTemp => "3DS18B20",
            WorkMode::Weight => "Weight",
            WorkMode::Counting => "Count",
            WorkMode::AdcTemp => "3ADC+1DS18B20",
            WorkMode::DualCounting => "3DS18B20+2Count",
        }
    }

    /// Every field the mode can emit, in emission order.
    pub const fn fields(self) -> &'static [Field] {
        match self {
            WorkMode::Iic => &[BAT_V, TEMP_C1, ADC_CH0V, ILLUM, TEMP_SHT, HUM_SHT],
            WorkMode::Distance => &[BAT_V, TEMP_C1, ADC_CH0V, DISTANCE, SIGNAL],
            WorkMode::TripleAdc => &[
                BAT_V_BYTE,
                ADC_CH0V_FIRST,
                ADC_CH1V_SECOND,
                ADC_CH4V_THIRD,
                ILLUM,
                TEMP_SHT,
                HUM_SHT,
            ],
            WorkMode::TripleTemp => &[BAT_V, TEMP_C1, ADC_CH0V, TEMP_C2, TEMP_C3],
            WorkMode::Weight => &[WEIGHT],
            WorkMode::Counting => &[COUNT],
            WorkMode::AdcTemp => &[BAT_V, TEMP_C1, ADC_CH0V, ADC_CH1V, ADC_CH4V],
            WorkMode::DualCounting => &[BAT_V, TEMP_C1, TEMP_C2_DUAL, TEMP_C3_DUAL, COUNT_1, COUNT_2],
        }
    }

    /// Shortest payload every field of this mode fits in.
    pub fn min_len(self) -> usize {
        self.fields()
            .iter()
            .map(Field::end)
            .fold(MIN_PAYLOAD_LEN, usize::max)
    }

    /// Decode a payload already dispatched to this mode.
    pub fn decode(self, header: &Header, raw: &[u8]) -> DecodeResult<Vec<Measurement>> {
        let needed = self.min_len();
        if raw.len() < needed {
            return Err(DecodeError::MalformedPayload {
                mode: self.code(),
                needed,
                available: raw.len(),
            });
        }

        let measurements = match self {
            WorkMode::Iic => {
                let mut out = read_all(&[BAT_V, TEMP_C1, ADC_CH0V], raw);
                if illum_selected(raw) {
                    out.extend(ILLUM.read(raw));
                } else if let Some(temp) = TEMP_SHT.read(raw) {
                    out.push(temp);
                    out.extend(HUM_SHT.read(raw));
                }
                out
            }
            WorkMode::TripleAdc => {
                let mut out = read_all(
                    &[BAT_V_BYTE, ADC_CH0V_FIRST, ADC_CH1V_SECOND, ADC_CH4V_THIRD],
                    raw,
                );
                if illum_selected(raw) {
                    out.extend(ILLUM.read(raw));
                } else {
                    out.extend(TEMP_SHT.read(raw));
                    out.extend(HUM_SHT.read(raw));
                }
                out
            }
            _ => read_all(self.fields(), raw),
        };

        trace!(mode = header.mode, count = measurements.len(), "fields extracted");
        Ok(measurements)
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}

fn read_all(fields: &[Field], raw: &[u8]) -> Vec<Measurement> {
    fields.iter().filter_map(|field| field.read(raw)).collect()
}

// A light sensor leaves the humidity word zeroed.
fn illum_selected(raw: &[u8]) -> bool {
    Sentinel::Zero.matches(HUM_SHT.raw_bytes(raw))
}
