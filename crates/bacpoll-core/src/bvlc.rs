use crate::constants::{BVLC_HEADER_LEN, BVLC_ORIGINAL_UNICAST_NPDU, BVLC_TYPE_BIP};
use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// BVLC function octet. The poller only ever sends and accepts
/// Original-Unicast-NPDU; anything else is carried raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BvlcFunction {
    OriginalUnicastNpdu,
    Other(u8),
}

impl From<u8> for BvlcFunction {
    fn from(value: u8) -> Self {
        match value {
            BVLC_ORIGINAL_UNICAST_NPDU => Self::OriginalUnicastNpdu,
            other => Self::Other(other),
        }
    }
}

impl From<BvlcFunction> for u8 {
    fn from(value: BvlcFunction) -> Self {
        match value {
            BvlcFunction::OriginalUnicastNpdu => BVLC_ORIGINAL_UNICAST_NPDU,
            BvlcFunction::Other(other) => other,
        }
    }
}

/// BACnet Virtual Link Control header as read off the wire.
///
/// `bvlc_type` is kept raw: whether a foreign type octet is acceptable is the
/// caller's decision, not the codec's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BvlcHeader {
    pub bvlc_type: u8,
    pub function: BvlcFunction,
    /// Whole datagram length, header included.
    pub length: u16,
}

impl BvlcHeader {
    /// Offset of the 16-bit length field inside the header.
    pub const LENGTH_OFFSET: usize = BVLC_HEADER_LEN - 2;

    pub const fn original_unicast(length: u16) -> Self {
        Self {
            bvlc_type: BVLC_TYPE_BIP,
            function: BvlcFunction::OriginalUnicastNpdu,
            length,
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_all(&[self.bvlc_type, self.function.into()])?;
        w.write_be_u16(self.length)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let bvlc_type = r.read_u8()?;
        let function = r.read_u8()?.into();
        Ok(Self {
            bvlc_type,
            function,
            length: r.read_be_u16()?,
        })
    }
}
