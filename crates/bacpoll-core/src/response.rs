//! `ReadProperty` complex-ack validator.
//!
//! A received datagram is checked layer by layer, in a fixed order, against
//! exactly the shape the poller asked for. The first failed check names the
//! [`RejectReason`]; nothing is partially decoded and nothing panics.

use crate::apdu::ComplexAckHeader;
use crate::bvlc::{BvlcFunction, BvlcHeader};
use crate::constants::{
    APP_TAG_ENUMERATED, APP_TAG_REAL, BVLC_HEADER_LEN, BVLC_TYPE_BIP, MIN_ACK_APDU_LEN,
    NPDU_VERSION, PROPERTY_PRESENT_VALUE, SERVICE_READ_PROPERTY, TAG_OBJECT_ID, TAG_PROPERTY_ID,
    TAG_VALUE_OPEN,
};
use crate::encoding::{
    reader::Reader,
    tag::{split_octet, Tag},
    writer::Writer,
};
use crate::npdu::Npdu;
use crate::request::PendingRequestTable;
use crate::types::{ObjectId, PresentValue, PropertySpec};
use crate::{EncodeError, RejectReason};

/// How the BVLC type and function octets are vetted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BvlcCheck {
    /// Reject only when the type octet *and* the function octet are both wrong.
    /// A frame with one of the two corrupted is still inspected further.
    #[default]
    Lenient,
    /// Reject when either octet is wrong.
    Strict,
}

impl BvlcCheck {
    fn rejects(self, header: &BvlcHeader) -> bool {
        let bad_type = header.bvlc_type != BVLC_TYPE_BIP;
        let bad_function = header.function != BvlcFunction::OriginalUnicastNpdu;
        match self {
            Self::Lenient => bad_type && bad_function,
            Self::Strict => bad_type || bad_function,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    pub bvlc_check: BvlcCheck,
}

/// An accepted acknowledgement and the property it answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedAck<'t> {
    pub invoke_id: u8,
    pub property: &'t PropertySpec,
    pub value: PresentValue,
}

/// Validates `frame` with the default options.
pub fn decode_read_property_ack<'t>(
    frame: &[u8],
    pending: &'t PendingRequestTable,
) -> Result<DecodedAck<'t>, RejectReason> {
    decode_read_property_ack_with(frame, pending, DecodeOptions::default())
}

pub fn decode_read_property_ack_with<'t>(
    frame: &[u8],
    pending: &'t PendingRequestTable,
    options: DecodeOptions,
) -> Result<DecodedAck<'t>, RejectReason> {
    if frame.len() < BVLC_HEADER_LEN {
        return Err(RejectReason::TooShort);
    }

    let mut r = Reader::new(frame);
    let bvlc = BvlcHeader::decode(&mut r)?;
    if options.bvlc_check.rejects(&bvlc) {
        return Err(RejectReason::BadVlc);
    }
    if usize::from(bvlc.length) != frame.len() {
        return Err(RejectReason::LengthMismatch);
    }

    // The control octet is not inspected: any NPDU is assumed to be two octets.
    if r.read_u8()? != NPDU_VERSION {
        return Err(RejectReason::BadNpdu);
    }
    let apdu: &[u8] = match r.read_u8() {
        Ok(_control) => r.rest(),
        Err(_) => &[],
    };
    if apdu.len() < MIN_ACK_APDU_LEN {
        return Err(RejectReason::TooShort);
    }

    let mut a = Reader::new(apdu);
    let header = ComplexAckHeader::decode(&mut a)?;
    if !header.is_complex_ack() {
        return Err(RejectReason::NotComplexAck);
    }
    let property = pending
        .get(header.invoke_id)
        .ok_or(RejectReason::UnknownInvokeId)?;
    if header.service_choice != SERVICE_READ_PROPERTY {
        return Err(RejectReason::WrongService);
    }

    if a.read_u8()? != TAG_OBJECT_ID {
        return Err(RejectReason::BadTag);
    }
    let object_id = ObjectId::from_raw(a.read_be_u32()?);
    if object_id.type_number() != property.object_id.type_number()
        || object_id.instance() != property.object_id.instance()
    {
        return Err(RejectReason::ObjectMismatch);
    }

    if a.read_u8()? != TAG_PROPERTY_ID {
        return Err(RejectReason::BadTag);
    }
    if a.read_u8()? != PROPERTY_PRESENT_VALUE {
        return Err(RejectReason::WrongProperty);
    }
    if a.read_u8()? != TAG_VALUE_OPEN {
        return Err(RejectReason::BadTag);
    }

    // Class bit ignored: only the tag nibble and the length are compared.
    let value = match split_octet(a.read_u8()?) {
        (APP_TAG_REAL, 4) => PresentValue::Real(a.read_be_f32()?),
        (APP_TAG_ENUMERATED, 1) => PresentValue::Enumerated(u32::from(a.read_u8()?)),
        _ => return Err(RejectReason::UnsupportedValueType),
    };

    Ok(DecodedAck {
        invoke_id: header.invoke_id,
        property,
        value,
    })
}

/// Writes the complex-ack datagram a device sends back for a present-value
/// read. Enumerated values wider than one octet cannot be expressed in the
/// accepted form and are refused.
pub fn encode_read_property_ack(
    w: &mut Writer<'_>,
    invoke_id: u8,
    object_id: ObjectId,
    value: PresentValue,
) -> Result<(), EncodeError> {
    let start = w.position();
    BvlcHeader::original_unicast(0).encode(w)?;
    Npdu::new(0).encode(w)?;
    ComplexAckHeader::new(invoke_id, SERVICE_READ_PROPERTY).encode(w)?;
    Tag::Context { tag_num: 0, len: 4 }.encode(w)?;
    w.write_be_u32(object_id.raw())?;
    Tag::Context { tag_num: 1, len: 1 }.encode(w)?;
    w.write_u8(PROPERTY_PRESENT_VALUE)?;
    Tag::Opening { tag_num: 3 }.encode(w)?;
    match value {
        PresentValue::Real(v) => {
            Tag::Application {
                tag: APP_TAG_REAL,
                len: 4,
            }
            .encode(w)?;
            w.write_be_u32(v.to_bits())?;
        }
        PresentValue::Enumerated(v) => {
            let v = u8::try_from(v).map_err(|_| EncodeError::ValueOutOfRange)?;
            Tag::Application {
                tag: APP_TAG_ENUMERATED,
                len: 1,
            }
            .encode(w)?;
            w.write_u8(v)?;
        }
    }
    Tag::Closing { tag_num: 3 }.encode(w)?;

    let total = u16::try_from(w.position() - start).map_err(|_| EncodeError::ValueOutOfRange)?;
    w.patch_be_u16(start + BvlcHeader::LENGTH_OFFSET, total)
}

#[cfg(test)]
mod tests {
    use super::{
        decode_read_property_ack, decode_read_property_ack_with, encode_read_property_ack,
        BvlcCheck, DecodeOptions,
    };
    use crate::encoding::writer::Writer;
    use crate::request::{build_requests, PendingRequestTable};
    use crate::types::{ObjectId, ObjectType, PresentValue, PropertySpec};
    use crate::{EncodeError, RejectReason};
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn pending() -> PendingRequestTable {
        build_requests([
            PropertySpec::new("A001", ObjectType::AnalogValue, 1).unwrap(),
            PropertySpec::new("D169", ObjectType::BinaryValue, 169).unwrap(),
        ])
        .unwrap()
        .into_parts()
        .1
    }

    fn ack(invoke_id: u8, object_id: ObjectId, value: PresentValue) -> Vec<u8> {
        let mut buf = [0u8; 32];
        let mut w = Writer::new(&mut buf);
        encode_read_property_ack(&mut w, invoke_id, object_id, value).unwrap();
        w.as_written().to_vec()
    }

    fn real_ack() -> Vec<u8> {
        ack(
            1,
            ObjectId::new(ObjectType::AnalogValue, 1),
            PresentValue::Real(3.5),
        )
    }

    #[test]
    fn ack_layout() {
        assert_eq!(
            real_ack(),
            [
                0x81, 0x0A, 0x00, 0x17, 0x01, 0x00, 0x30, 0x01, 0x0C, 0x0C, 0x00, 0x80, 0x00,
                0x01, 0x19, 0x55, 0x3E, 0x44, 0x40, 0x60, 0x00, 0x00, 0x3F,
            ]
        );
    }

    #[test]
    fn decodes_real_present_value() {
        let table = pending();
        let frame = real_ack();
        let decoded = decode_read_property_ack(&frame, &table).unwrap();
        assert_eq!(decoded.invoke_id, 1);
        assert_eq!(decoded.property.name, "A001");
        assert_eq!(decoded.value, PresentValue::Real(3.5));
    }

    #[test]
    fn decodes_real_bytes_exactly() {
        let table = pending();
        let mut frame = real_ack();
        frame[18..22].copy_from_slice(&[0x40, 0x70, 0x00, 0x00]);
        let decoded = decode_read_property_ack(&frame, &table).unwrap();
        assert_eq!(decoded.value, PresentValue::Real(3.75));
    }

    #[test]
    fn decodes_enumerated_present_value() {
        let table = pending();
        let frame = ack(
            2,
            ObjectId::new(ObjectType::BinaryValue, 169),
            PresentValue::Enumerated(1),
        );
        assert_eq!(&frame[17..19], &[0x91, 0x01]);
        let decoded = decode_read_property_ack(&frame, &table).unwrap();
        assert_eq!(decoded.property.name, "D169");
        assert_eq!(decoded.value, PresentValue::Enumerated(1));
    }

    #[test]
    fn short_datagrams_are_too_short() {
        let table = pending();
        for len in 0..4 {
            let frame = [0x81u8, 0x0A, 0x00, 0x04];
            assert_eq!(
                decode_read_property_ack(&frame[..len], &table).unwrap_err(),
                RejectReason::TooShort
            );
        }
        // Header claims exactly its own four octets: nothing to read the NPDU from.
        assert_eq!(
            decode_read_property_ack(&[0x81, 0x0A, 0x00, 0x04], &table).unwrap_err(),
            RejectReason::TooShort
        );
    }

    #[test]
    fn bvlc_rejected_only_when_both_octets_are_wrong() {
        let table = pending();

        let mut both = real_ack();
        both[0] = 0x82;
        both[1] = 0x0B;
        assert_eq!(
            decode_read_property_ack(&both, &table).unwrap_err(),
            RejectReason::BadVlc
        );

        let mut bad_type = real_ack();
        bad_type[0] = 0x82;
        assert!(decode_read_property_ack(&bad_type, &table).is_ok());

        let mut bad_function = real_ack();
        bad_function[1] = 0x0B;
        assert!(decode_read_property_ack(&bad_function, &table).is_ok());
    }

    #[test]
    fn strict_bvlc_check_rejects_either_octet() {
        let table = pending();
        let strict = DecodeOptions {
            bvlc_check: BvlcCheck::Strict,
        };
        let mut bad_type = real_ack();
        bad_type[0] = 0x82;
        assert_eq!(
            decode_read_property_ack_with(&bad_type, &table, strict).unwrap_err(),
            RejectReason::BadVlc
        );
        let mut bad_function = real_ack();
        bad_function[1] = 0x0B;
        assert_eq!(
            decode_read_property_ack_with(&bad_function, &table, strict).unwrap_err(),
            RejectReason::BadVlc
        );
        assert!(decode_read_property_ack_with(&real_ack(), &table, strict).is_ok());
    }

    #[test]
    fn length_field_must_match() {
        let table = pending();
        let mut frame = real_ack();
        frame[3] = 0x18;
        assert_eq!(
            decode_read_property_ack(&frame, &table).unwrap_err(),
            RejectReason::LengthMismatch
        );

        let mut padded = real_ack();
        padded.push(0);
        assert_eq!(
            decode_read_property_ack(&padded, &table).unwrap_err(),
            RejectReason::LengthMismatch
        );
    }

    #[test]
    fn npdu_version_must_be_one() {
        let table = pending();
        let mut frame = real_ack();
        frame[4] = 0x02;
        assert_eq!(
            decode_read_property_ack(&frame, &table).unwrap_err(),
            RejectReason::BadNpdu
        );
    }

    #[test]
    fn apdu_shorter_than_thirteen_octets() {
        let table = pending();
        let frame = [
            0x81, 0x0A, 0x00, 0x12, 0x01, 0x00, 0x30, 0x01, 0x0C, 0x0C, 0x00, 0x80, 0x00, 0x01,
            0x19, 0x55, 0x3E, 0x91,
        ];
        assert_eq!(
            decode_read_property_ack(&frame, &table).unwrap_err(),
            RejectReason::TooShort
        );
    }

    #[test]
    fn layered_rejections() {
        let table = pending();
        let cases: [(usize, u8, RejectReason); 8] = [
            (6, 0x20, RejectReason::NotComplexAck),
            (7, 9, RejectReason::UnknownInvokeId),
            (8, 0x0E, RejectReason::WrongService),
            (9, 0x0D, RejectReason::BadTag),
            (13, 0x02, RejectReason::ObjectMismatch),
            (14, 0x1A, RejectReason::BadTag),
            (15, 77, RejectReason::WrongProperty),
            (16, 0x2E, RejectReason::BadTag),
        ];
        for (offset, byte, reason) in cases {
            let mut frame = real_ack();
            frame[offset] = byte;
            assert_eq!(
                decode_read_property_ack(&frame, &table).unwrap_err(),
                reason,
                "offset {offset}"
            );
        }
    }

    #[test]
    fn object_type_mismatch() {
        let table = pending();
        let frame = ack(
            1,
            ObjectId::new(ObjectType::AnalogInput, 1),
            PresentValue::Real(1.0),
        );
        assert_eq!(
            decode_read_property_ack(&frame, &table).unwrap_err(),
            RejectReason::ObjectMismatch
        );
    }

    #[test]
    fn unsupported_value_types() {
        let table = pending();
        // Unsigned (tag 2), REAL with length 2, ENUMERATED with length 2.
        for octet in [0x21u8, 0x42, 0x92] {
            let mut frame = real_ack();
            frame[17] = octet;
            assert_eq!(
                decode_read_property_ack(&frame, &table).unwrap_err(),
                RejectReason::UnsupportedValueType
            );
        }
    }

    #[test]
    fn truncated_real_is_too_short() {
        let table = pending();
        let mut frame = real_ack();
        frame.truncate(20);
        frame[3] = 20;
        assert_eq!(
            decode_read_property_ack(&frame, &table).unwrap_err(),
            RejectReason::TooShort
        );
    }

    #[test]
    fn wide_enumerated_cannot_be_encoded() {
        let mut buf = [0u8; 32];
        let mut w = Writer::new(&mut buf);
        assert_eq!(
            encode_read_property_ack(
                &mut w,
                1,
                ObjectId::new(ObjectType::BinaryValue, 1),
                PresentValue::Enumerated(256)
            )
            .unwrap_err(),
            EncodeError::ValueOutOfRange
        );
    }

    proptest! {
        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let table = pending();
            let _ = decode_read_property_ack(&bytes, &table);
        }

        #[test]
        fn real_values_survive_the_wire(v in any::<f32>().prop_filter("not NaN", |v| !v.is_nan())) {
            let table = pending();
            let frame = ack(1, ObjectId::new(ObjectType::AnalogValue, 1), PresentValue::Real(v));
            let decoded = decode_read_property_ack(&frame, &table).unwrap();
            prop_assert_eq!(decoded.value, PresentValue::Real(v));
        }
    }
}
