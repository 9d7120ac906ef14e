//! Wire constants for the BACnet/IP `ReadProperty` profile spoken by the poller.
//!
//! All multi-byte values on the wire are big-endian.

/// BVLC type octet for BACnet/IP (Annex J).
pub const BVLC_TYPE_BIP: u8 = 0x81;
/// BVLC function code for Original-Unicast-NPDU.
pub const BVLC_ORIGINAL_UNICAST_NPDU: u8 = 0x0A;
/// Size of the BVLC header: type, function, and 16-bit total length.
pub const BVLC_HEADER_LEN: usize = 4;

/// BACnet network layer protocol version (ASHRAE 135).
pub const NPDU_VERSION: u8 = 0x01;
/// NPDU control octet with only the expecting-reply bit set.
pub const NPDU_CONTROL_EXPECTING_REPLY: u8 = 0x04;
/// Size of the NPDU header the poller emits and expects.
pub const NPDU_HEADER_LEN: usize = 2;

/// Max-APDU code for 1476 octets.
pub const MAX_APDU_1476: u8 = 0x05;
/// Confirmed service choice for ReadProperty.
pub const SERVICE_READ_PROPERTY: u8 = 12;
/// Property identifier of present-value.
pub const PROPERTY_PRESENT_VALUE: u8 = 85;

/// Context tag 0, length 4: the object identifier.
pub const TAG_OBJECT_ID: u8 = 0x0C;
/// Context tag 1, length 1: the property identifier.
pub const TAG_PROPERTY_ID: u8 = 0x19;
/// Context tag 3, opening: the property value.
pub const TAG_VALUE_OPEN: u8 = 0x3E;

/// Application tag number of REAL.
pub const APP_TAG_REAL: u8 = 4;
/// Application tag number of ENUMERATED.
pub const APP_TAG_ENUMERATED: u8 = 9;

/// Highest invoke id the one-byte APDU field can carry.
pub const MAX_INVOKE_ID: u8 = 255;

/// Default BACnet/IP UDP port (0xBAC0).
pub const BACNET_IP_DEFAULT_PORT: u16 = 47808;

/// Smallest APDU the validator will inspect.
pub const MIN_ACK_APDU_LEN: usize = 13;

/// Length of every request datagram the encoder produces.
pub const READ_PROPERTY_REQUEST_LEN: usize = BVLC_HEADER_LEN + NPDU_HEADER_LEN + 11;
