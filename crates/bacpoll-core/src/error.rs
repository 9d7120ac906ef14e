use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall,
    ValueOutOfRange,
    /// More properties than a one-byte invoke id can address.
    TooManyProperties,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::ValueOutOfRange => f.write_str("value out of range"),
            Self::TooManyProperties => f.write_str("more than 255 properties per device"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    UnexpectedEof,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Why a received datagram was not accepted as a `ReadProperty` acknowledgement.
///
/// Every variant is an expected outcome on a shared UDP port (noise, late
/// retransmits, foreign traffic); none of them is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RejectReason {
    TooShort,
    BadVlc,
    LengthMismatch,
    BadNpdu,
    NotComplexAck,
    UnknownInvokeId,
    WrongService,
    BadTag,
    ObjectMismatch,
    WrongProperty,
    UnsupportedValueType,
}

impl RejectReason {
    pub const ALL: [RejectReason; 11] = [
        Self::TooShort,
        Self::BadVlc,
        Self::LengthMismatch,
        Self::BadNpdu,
        Self::NotComplexAck,
        Self::UnknownInvokeId,
        Self::WrongService,
        Self::BadTag,
        Self::ObjectMismatch,
        Self::WrongProperty,
        Self::UnsupportedValueType,
    ];

    /// Position of this reason in [`RejectReason::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => f.write_str("datagram too short"),
            Self::BadVlc => f.write_str("not a BACnet/IP original-unicast frame"),
            Self::LengthMismatch => f.write_str("BVLC length does not match datagram length"),
            Self::BadNpdu => f.write_str("unsupported NPDU version"),
            Self::NotComplexAck => f.write_str("APDU is not a complex ack"),
            Self::UnknownInvokeId => f.write_str("invoke id not pending"),
            Self::WrongService => f.write_str("service choice is not ReadProperty"),
            Self::BadTag => f.write_str("unexpected tag octet"),
            Self::ObjectMismatch => f.write_str("object identifier does not match request"),
            Self::WrongProperty => f.write_str("property is not present-value"),
            Self::UnsupportedValueType => f.write_str("unsupported application value type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RejectReason {}

impl From<DecodeError> for RejectReason {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnexpectedEof => Self::TooShort,
        }
    }
}
