use core::fmt;

/// A decoded present-value. Only REAL and ENUMERATED are accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PresentValue {
    Real(f32),
    Enumerated(u32),
}

impl PresentValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Real(v) => f64::from(v),
            Self::Enumerated(v) => f64::from(v),
        }
    }
}

impl fmt::Display for PresentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{v}"),
            Self::Enumerated(v) => write!(f, "{v}"),
        }
    }
}

/// A successfully decoded reading, handed to the sink and then dropped.
///
/// `timestamp` is whatever clock the host passed in, conventionally seconds
/// since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedSample<'a> {
    pub name: &'a str,
    pub value: PresentValue,
    pub timestamp: f64,
}
