//! Single-octet BACnet tags.
//!
//! Every tag the poller emits or inspects has a tag number ≤ 14 and a length
//! ≤ 4, so the whole tag fits in the initial octet:
//! `tag_num << 4 | class << 3 | length/value/type`.

use crate::encoding::writer::Writer;
use crate::EncodeError;

const CLASS_CONTEXT: u8 = 0b0000_1000;
const LVT_MASK: u8 = 0b0000_0111;
const LVT_OPENING: u8 = 6;
const LVT_CLOSING: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Application { tag: u8, len: u8 },
    Context { tag_num: u8, len: u8 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

impl Tag {
    /// The initial tag octet. Tag numbers above 14 and lengths above 4 need
    /// extension octets and are rejected.
    pub const fn octet(self) -> Result<u8, EncodeError> {
        match self {
            Tag::Application { tag, len } => meta_octet(tag, false, len),
            Tag::Context { tag_num, len } => meta_octet(tag_num, true, len),
            Tag::Opening { tag_num } => open_close_octet(tag_num, LVT_OPENING),
            Tag::Closing { tag_num } => open_close_octet(tag_num, LVT_CLOSING),
        }
    }

    pub fn encode(self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(self.octet()?)
    }
}

/// Splits an octet into its tag number (high nibble) and length/value/type
/// (low three bits), ignoring the class bit.
pub const fn split_octet(first: u8) -> (u8, u8) {
    (first >> 4, first & LVT_MASK)
}

const fn meta_octet(tag_num: u8, context: bool, len: u8) -> Result<u8, EncodeError> {
    if tag_num > 14 || len > 4 {
        return Err(EncodeError::ValueOutOfRange);
    }
    let class = if context { CLASS_CONTEXT } else { 0 };
    Ok((tag_num << 4) | class | len)
}

const fn open_close_octet(tag_num: u8, lvt: u8) -> Result<u8, EncodeError> {
    if tag_num > 14 {
        return Err(EncodeError::ValueOutOfRange);
    }
    Ok((tag_num << 4) | CLASS_CONTEXT | lvt)
}
