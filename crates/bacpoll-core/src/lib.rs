//! Sans-IO BACnet/IP `ReadProperty` polling in pure Rust.
//!
//! `bacpoll-core` builds one BACnet/IP (Annex J) datagram per tracked property,
//! validates the matching `ReadProperty` complex acknowledgements byte for byte,
//! and keeps a round-robin cursor over the outstanding requests. It never touches
//! a socket or a clock: the host owns the transport, the timing, and the retries,
//! and feeds received datagrams back in.
//!
//! # Feature flags
//!
//! - **`std`** (default) — enables `std::error::Error` implementations.
//! - **`serde`** — derives `Serialize`/`Deserialize` on value and statistics types.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// APDU type discriminant and the confirmed-request / complex-ack headers.
pub mod apdu;
/// BACnet Virtual Link Control header for BACnet/IP.
pub mod bvlc;
/// Fixed protocol values used on the wire.
pub mod constants;
/// Bounded byte reader/writer and tag octet helpers.
pub mod encoding;
/// Error and rejection types.
pub mod error;
/// NPDU header as emitted and accepted by the poller.
pub mod npdu;
/// Round-robin poll state machine and sample sink.
pub mod poll;
/// `ReadProperty` request encoder and pending-request table.
pub mod request;
/// `ReadProperty` complex-ack validator.
pub mod response;
/// Object identifiers, property specs, and decoded values.
pub mod types;

pub use error::{DecodeError, EncodeError, RejectReason};
pub use poll::{PollClient, PollCursor, PollOutcome, PollStats, SampleSink};
pub use request::{build_requests, EncodedRequest, PendingRequestTable, RequestSet};
pub use response::{
    decode_read_property_ack, decode_read_property_ack_with, BvlcCheck, DecodeOptions, DecodedAck,
};
pub use types::{DecodedSample, ObjectId, ObjectType, PresentValue, PropertySpec};
