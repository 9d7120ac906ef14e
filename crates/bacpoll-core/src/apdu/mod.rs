/// Confirmed-request and complex-ack headers.
pub mod confirmed;
/// APDU type discriminant.
pub mod pdu;

pub use confirmed::{ComplexAckHeader, ConfirmedRequestHeader};
pub use pdu::ApduType;
