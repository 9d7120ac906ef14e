//! `ReadProperty` request encoder.
//!
//! Every tracked property gets one complete BACnet/IP datagram, built once,
//! and a one-byte invoke id that names it in the [`PendingRequestTable`] for
//! the lifetime of the client.

use alloc::vec::Vec;

use crate::apdu::ConfirmedRequestHeader;
use crate::bvlc::BvlcHeader;
use crate::constants::{
    MAX_APDU_1476, MAX_INVOKE_ID, PROPERTY_PRESENT_VALUE, READ_PROPERTY_REQUEST_LEN,
    SERVICE_READ_PROPERTY,
};
use crate::encoding::{tag::Tag, writer::Writer};
use crate::npdu::Npdu;
use crate::types::{ObjectId, PropertySpec};
use crate::EncodeError;

/// One outbound datagram and the invoke id it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    pub invoke_id: u8,
    pub frame: Vec<u8>,
}

/// Invoke id → property, fixed at build time.
///
/// Ids are assigned densely from 1, so the table is a vector indexed by
/// `invoke_id - 1`. A stale acknowledgement from an earlier cycle still maps
/// to the right property.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRequestTable {
    entries: Vec<PropertySpec>,
}

impl PendingRequestTable {
    pub fn get(&self, invoke_id: u8) -> Option<&PropertySpec> {
        let idx = usize::from(invoke_id).checked_sub(1)?;
        self.entries.get(idx)
    }

    pub fn contains(&self, invoke_id: u8) -> bool {
        self.get(invoke_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &PropertySpec)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, spec)| ((i + 1) as u8, spec))
    }
}

/// The ordered request list plus its pending table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSet {
    requests: Vec<EncodedRequest>,
    pending: PendingRequestTable,
}

impl RequestSet {
    pub fn requests(&self) -> &[EncodedRequest] {
        &self.requests
    }

    pub fn pending(&self) -> &PendingRequestTable {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn into_parts(self) -> (Vec<EncodedRequest>, PendingRequestTable) {
        (self.requests, self.pending)
    }
}

/// Encodes one request per property, in iteration order, with invoke ids
/// 1, 2, 3, …
///
/// Fails only when more than 255 properties are supplied.
pub fn build_requests<I>(properties: I) -> Result<RequestSet, EncodeError>
where
    I: IntoIterator<Item = PropertySpec>,
{
    let mut set = RequestSet::default();
    for (idx, spec) in properties.into_iter().enumerate() {
        if idx >= usize::from(MAX_INVOKE_ID) {
            return Err(EncodeError::TooManyProperties);
        }
        let invoke_id = (idx + 1) as u8;

        let mut buf = [0u8; READ_PROPERTY_REQUEST_LEN];
        let mut w = Writer::new(&mut buf);
        encode_read_property_request(&mut w, invoke_id, spec.object_id)?;

        log::trace!(
            "request {invoke_id} -> {} ({})",
            spec.name,
            spec.object_id
        );
        set.requests.push(EncodedRequest {
            invoke_id,
            frame: w.as_written().to_vec(),
        });
        set.pending.entries.push(spec);
    }
    Ok(set)
}

/// Writes a complete BACnet/IP datagram reading present-value of `object_id`.
pub fn encode_read_property_request(
    w: &mut Writer<'_>,
    invoke_id: u8,
    object_id: ObjectId,
) -> Result<(), EncodeError> {
    let start = w.position();
    BvlcHeader::original_unicast(0).encode(w)?;
    Npdu::expecting_reply().encode(w)?;
    ConfirmedRequestHeader {
        max_apdu: MAX_APDU_1476,
        invoke_id,
        service_choice: SERVICE_READ_PROPERTY,
    }
    .encode(w)?;
    Tag::Context { tag_num: 0, len: 4 }.encode(w)?;
    w.write_be_u32(object_id.raw())?;
    Tag::Context { tag_num: 1, len: 1 }.encode(w)?;
    w.write_u8(PROPERTY_PRESENT_VALUE)?;

    let total = u16::try_from(w.position() - start).map_err(|_| EncodeError::ValueOutOfRange)?;
    w.patch_be_u16(start + BvlcHeader::LENGTH_OFFSET, total)
}

#[cfg(test)]
mod tests {
    use super::{build_requests, encode_read_property_request};
    use crate::encoding::writer::Writer;
    use crate::types::{ObjectId, ObjectType, PropertySpec};
    use crate::EncodeError;
    use alloc::format;
    use alloc::vec::Vec;

    fn spec(name: &str, object_type: ObjectType, instance: u32) -> PropertySpec {
        PropertySpec::new(name, object_type, instance).unwrap()
    }

    #[test]
    fn analog_value_request_layout() {
        let mut buf = [0u8; 32];
        let mut w = Writer::new(&mut buf);
        encode_read_property_request(&mut w, 1, ObjectId::new(ObjectType::AnalogValue, 1))
            .unwrap();
        assert_eq!(
            w.as_written(),
            &[
                0x81, 0x0A, 0x00, 0x11, 0x01, 0x04, 0x00, 0x05, 0x01, 0x0C, 0x0C, 0x00, 0x80,
                0x00, 0x01, 0x19, 0x55,
            ]
        );
    }

    #[test]
    fn assigns_invoke_ids_in_order() {
        let set = build_requests([
            spec("A001", ObjectType::AnalogValue, 1),
            spec("I132", ObjectType::AnalogValue, 1132),
            spec("D169", ObjectType::BinaryValue, 169),
        ])
        .unwrap();

        let ids: Vec<u8> = set.requests().iter().map(|r| r.invoke_id).collect();
        assert_eq!(ids, [1, 2, 3]);
        for req in set.requests() {
            assert_eq!(req.frame[8], req.invoke_id);
        }
        assert_eq!(set.pending().get(2).unwrap().name, "I132");
        assert_eq!(set.pending().get(3).unwrap().instance(), 169);
        assert!(set.pending().get(0).is_none());
        assert!(set.pending().get(4).is_none());
    }

    #[test]
    fn empty_input_builds_nothing() {
        let set = build_requests(Vec::new()).unwrap();
        assert!(set.is_empty());
        assert!(set.pending().is_empty());
    }

    #[test]
    fn invoke_id_ceiling() {
        let props = |n: u32| {
            (0..n)
                .map(|i| spec(&format!("P{i}"), ObjectType::AnalogInput, i))
                .collect::<Vec<_>>()
        };
        let set = build_requests(props(255)).unwrap();
        assert_eq!(set.requests().last().unwrap().invoke_id, 255);
        assert_eq!(
            build_requests(props(256)).unwrap_err(),
            EncodeError::TooManyProperties
        );
    }

    #[test]
    fn pending_table_iterates_by_invoke_id() {
        let set = build_requests([
            spec("a", ObjectType::AnalogInput, 7),
            spec("b", ObjectType::Device, 77000),
        ])
        .unwrap();
        let listed: Vec<(u8, u32)> = set
            .pending()
            .iter()
            .map(|(id, p)| (id, p.instance()))
            .collect();
        assert_eq!(listed, [(1, 7), (2, 77000)]);
    }
}
