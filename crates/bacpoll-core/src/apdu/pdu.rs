/// PDU type carried in the upper nibble of the first APDU octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ApduType {
    ConfirmedRequest = 0,
    UnconfirmedRequest = 1,
    SimpleAck = 2,
    ComplexAck = 3,
    SegmentAck = 4,
    Error = 5,
    Reject = 6,
    Abort = 7,
}

impl ApduType {
    const ALL: [Self; 8] = [
        Self::ConfirmedRequest,
        Self::UnconfirmedRequest,
        Self::SimpleAck,
        Self::ComplexAck,
        Self::SegmentAck,
        Self::Error,
        Self::Reject,
        Self::Abort,
    ];

    /// `None` for the reserved types 8..=15.
    pub fn from_first_octet(first: u8) -> Option<Self> {
        Self::ALL.get(usize::from(first >> 4)).copied()
    }

    /// First octet of an unsegmented PDU of this type.
    pub const fn first_octet(self) -> u8 {
        (self as u8) << 4
    }
}

#[cfg(test)]
mod tests {
    use super::ApduType;

    #[test]
    fn type_lives_in_the_upper_nibble() {
        assert_eq!(ApduType::from_first_octet(0x30), Some(ApduType::ComplexAck));
        assert_eq!(ApduType::from_first_octet(0x02), Some(ApduType::ConfirmedRequest));
        assert_eq!(ApduType::from_first_octet(0x50), Some(ApduType::Error));
        assert_eq!(ApduType::from_first_octet(0x80), None);
        assert_eq!(ApduType::Abort.first_octet(), 0x70);
    }
}
