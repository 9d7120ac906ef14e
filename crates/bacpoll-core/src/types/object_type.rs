use core::fmt;
use core::str::FromStr;

/// BACnet object types whose present-value the poller can read.
///
/// Every other number, standard or vendor-specific, is carried as
/// [`Other`](Self::Other).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    AnalogInput,
    AnalogOutput,
    AnalogValue,
    BinaryInput,
    BinaryOutput,
    BinaryValue,
    Device,
    Loop,
    MultiStateInput,
    MultiStateOutput,
    MultiStateValue,
    Accumulator,
    Other(u16),
}

/// Highest object type number that fits the 10-bit field of an object identifier.
pub const MAX_OBJECT_TYPE: u16 = 0x03FF;

const NAMED: [(ObjectType, &str); 12] = [
    (ObjectType::AnalogInput, "analog-input"),
    (ObjectType::AnalogOutput, "analog-output"),
    (ObjectType::AnalogValue, "analog-value"),
    (ObjectType::BinaryInput, "binary-input"),
    (ObjectType::BinaryOutput, "binary-output"),
    (ObjectType::BinaryValue, "binary-value"),
    (ObjectType::Device, "device"),
    (ObjectType::Loop, "loop"),
    (ObjectType::MultiStateInput, "multi-state-input"),
    (ObjectType::MultiStateOutput, "multi-state-output"),
    (ObjectType::MultiStateValue, "multi-state-value"),
    (ObjectType::Accumulator, "accumulator"),
];

impl ObjectType {
    /// Converts this object type to its numeric BACnet identifier.
    pub const fn to_u16(self) -> u16 {
        match self {
            Self::AnalogInput => 0,
            Self::AnalogOutput => 1,
            Self::AnalogValue => 2,
            Self::BinaryInput => 3,
            Self::BinaryOutput => 4,
            Self::BinaryValue => 5,
            Self::Device => 8,
            Self::Loop => 12,
            Self::MultiStateInput => 13,
            Self::MultiStateOutput => 14,
            Self::MultiStateValue => 19,
            Self::Accumulator => 23,
            Self::Other(v) => v,
        }
    }

    pub const fn from_u16(value: u16) -> Self {
        match value {
            0 => Self::AnalogInput,
            1 => Self::AnalogOutput,
            2 => Self::AnalogValue,
            3 => Self::BinaryInput,
            4 => Self::BinaryOutput,
            5 => Self::BinaryValue,
            8 => Self::Device,
            12 => Self::Loop,
            13 => Self::MultiStateInput,
            14 => Self::MultiStateOutput,
            19 => Self::MultiStateValue,
            23 => Self::Accumulator,
            v => Self::Other(v),
        }
    }

    /// Kebab-case name, `None` for [`Other`](Self::Other).
    pub fn name(self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(t, _)| *t == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.to_u16()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseObjectTypeError;

impl fmt::Display for ParseObjectTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected an object type name or a number up to {MAX_OBJECT_TYPE}"
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseObjectTypeError {}

impl FromStr for ObjectType {
    type Err = ParseObjectTypeError;

    /// Accepts `analog-value`, `analog_value`, `AnalogValue`-style names
    /// case-insensitively, or a decimal number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u16>() {
            if n > MAX_OBJECT_TYPE {
                return Err(ParseObjectTypeError);
            }
            return Ok(Self::from_u16(n));
        }
        NAMED
            .iter()
            .find(|(_, name)| same_name(name, s))
            .map(|(t, _)| *t)
            .ok_or(ParseObjectTypeError)
    }
}

fn same_name(kebab: &str, candidate: &str) -> bool {
    let mut want = kebab.bytes().filter(|b| *b != b'-');
    let mut got = candidate.bytes().filter(|b| *b != b'-' && *b != b'_');
    loop {
        match (want.next(), got.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a == b.to_ascii_lowercase() => {}
            _ => return false,
        }
    }
}
