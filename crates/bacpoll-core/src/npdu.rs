use crate::constants::{NPDU_CONTROL_EXPECTING_REPLY, NPDU_VERSION};
use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Two-octet NPDU header: protocol version and control flags.
///
/// The poller talks to one device on the local network, so no DNET/SNET
/// addressing, hop count, or network-layer message fields are ever present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Npdu {
    pub version: u8,
    pub control: u8,
}

impl Npdu {
    pub const fn new(control: u8) -> Self {
        Self {
            version: NPDU_VERSION,
            control,
        }
    }

    pub const fn expecting_reply() -> Self {
        Self::new(NPDU_CONTROL_EXPECTING_REPLY)
    }

    pub const fn expects_reply(&self) -> bool {
        (self.control & NPDU_CONTROL_EXPECTING_REPLY) != 0
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(self.version)?;
        w.write_u8(self.control)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            version: r.read_u8()?,
            control: r.read_u8()?,
        })
    }
}
