use crate::apdu::ApduType;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Unsegmented confirmed-request header.
///
/// Segmentation flags are never set and max-segments is always zero, so the
/// second octet is just the max-APDU code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedRequestHeader {
    pub max_apdu: u8,
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl ConfirmedRequestHeader {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_all(&[
            ApduType::ConfirmedRequest.first_octet(),
            self.max_apdu & 0x0f,
            self.invoke_id,
            self.service_choice,
        ])
    }

    /// Reads the four header octets without checking the PDU type.
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let [_, max_apdu, invoke_id, service_choice] = r.read_exact(4)? else {
            return Err(DecodeError::UnexpectedEof);
        };
        Ok(Self {
            max_apdu: max_apdu & 0x0f,
            invoke_id: *invoke_id,
            service_choice: *service_choice,
        })
    }
}

/// Unsegmented complex-ack header. The first octet is kept whole so a foreign
/// PDU can still be told apart after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexAckHeader {
    pub first_octet: u8,
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl ComplexAckHeader {
    pub const fn new(invoke_id: u8, service_choice: u8) -> Self {
        Self {
            first_octet: ApduType::ComplexAck.first_octet(),
            invoke_id,
            service_choice,
        }
    }

    pub fn pdu_type(&self) -> Option<ApduType> {
        ApduType::from_first_octet(self.first_octet)
    }

    /// Flag bits in the low nibble are ignored.
    pub fn is_complex_ack(&self) -> bool {
        self.pdu_type() == Some(ApduType::ComplexAck)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_all(&[self.first_octet, self.invoke_id, self.service_choice])
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let [first_octet, invoke_id, service_choice] = r.read_exact(3)? else {
            return Err(DecodeError::UnexpectedEof);
        };
        Ok(Self {
            first_octet: *first_octet,
            invoke_id: *invoke_id,
            service_choice: *service_choice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ComplexAckHeader, ConfirmedRequestHeader};
    use crate::apdu::ApduType;
    use crate::encoding::{reader::Reader, writer::Writer};

    #[test]
    fn confirmed_request_header_layout() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf);
        ConfirmedRequestHeader {
            max_apdu: 5,
            invoke_id: 7,
            service_choice: 12,
        }
        .encode(&mut w)
        .unwrap();
        assert_eq!(w.as_written(), &[0x00, 0x05, 0x07, 0x0C]);

        let mut r = Reader::new(&buf);
        let dec = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(dec.invoke_id, 7);
        assert_eq!(dec.max_apdu, 5);
    }

    #[test]
    fn complex_ack_header_ignores_segment_flags_in_type() {
        let mut r = Reader::new(&[0x38, 1, 12]);
        let h = ComplexAckHeader::decode(&mut r).unwrap();
        assert!(h.is_complex_ack());
        assert_eq!(h.invoke_id, 1);

        let mut r = Reader::new(&[0x20, 1, 12]);
        let h = ComplexAckHeader::decode(&mut r).unwrap();
        assert!(!h.is_complex_ack());
        assert_eq!(h.pdu_type(), Some(ApduType::SimpleAck));
    }
}
