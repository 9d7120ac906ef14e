//! Round-robin poll state machine.
//!
//! [`PollClient`] ties the encoder and the validator together: the host asks
//! for the current request, sends it, and hands back whatever arrived (or
//! reports that nothing did). Every outcome moves the cursor one slot forward;
//! a property whose read failed is retried on its next turn, so a reading is at
//! most one full cycle stale.

use alloc::vec::Vec;

use crate::request::{build_requests, EncodedRequest, PendingRequestTable};
use crate::response::{decode_read_property_ack_with, DecodeOptions};
use crate::types::{DecodedSample, PropertySpec};
use crate::{EncodeError, RejectReason};

/// What the host should do after a slot has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    KeepPolling,
    /// The cursor wrapped back to the first request.
    CycleComplete,
}

/// Cursor over `len` requests plus the retry counter for the current slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCursor {
    index: usize,
    len: usize,
    retries: u32,
}

impl PollCursor {
    pub const fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            retries: 0,
        }
    }

    /// Index of the outstanding request, `None` when there is nothing to poll.
    pub const fn current(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.index)
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Records one more resend of the current request and returns the count.
    pub fn note_retry(&mut self) -> u32 {
        self.retries = self.retries.saturating_add(1);
        self.retries
    }

    /// Moves to the next slot. `success` is informational only: the retry
    /// counter is cleared and the cursor moves either way.
    pub fn advance(&mut self, success: bool) -> PollOutcome {
        log::trace!("slot {} handled, success={success}", self.index);
        self.retries = 0;
        if self.len == 0 {
            return PollOutcome::CycleComplete;
        }
        self.index = (self.index + 1) % self.len;
        if self.index == 0 {
            PollOutcome::CycleComplete
        } else {
            PollOutcome::KeepPolling
        }
    }
}

/// Receives decoded samples. Implemented for any `FnMut(DecodedSample<'_>)`.
pub trait SampleSink {
    fn on_sample(&mut self, sample: DecodedSample<'_>);
}

impl<F> SampleSink for F
where
    F: FnMut(DecodedSample<'_>),
{
    fn on_sample(&mut self, sample: DecodedSample<'_>) {
        self(sample)
    }
}

/// Counters kept across the life of a [`PollClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PollStats {
    pub samples: u64,
    pub timeouts: u64,
    pub cycles: u64,
    rejected: [u64; RejectReason::ALL.len()],
}

impl PollStats {
    pub fn rejected(&self, reason: RejectReason) -> u64 {
        self.rejected[reason.index()]
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejected.iter().sum()
    }

    /// Non-zero rejection counters, in [`RejectReason::ALL`] order.
    pub fn rejections(&self) -> impl Iterator<Item = (RejectReason, u64)> + '_ {
        RejectReason::ALL
            .iter()
            .map(|r| (*r, self.rejected[r.index()]))
            .filter(|(_, n)| *n > 0)
    }

    fn record_reject(&mut self, reason: RejectReason) {
        let slot = &mut self.rejected[reason.index()];
        *slot = slot.saturating_add(1);
    }
}

/// A sans-IO `ReadProperty` poller for one device.
///
/// The request list and pending table are fixed at construction. The only
/// state that changes afterwards is the cursor and the statistics.
#[derive(Debug)]
pub struct PollClient<S> {
    requests: Vec<EncodedRequest>,
    pending: PendingRequestTable,
    cursor: PollCursor,
    options: DecodeOptions,
    stats: PollStats,
    sink: S,
}

impl<S: SampleSink> PollClient<S> {
    pub fn new<I>(properties: I, sink: S) -> Result<Self, EncodeError>
    where
        I: IntoIterator<Item = PropertySpec>,
    {
        Self::with_options(properties, sink, DecodeOptions::default())
    }

    pub fn with_options<I>(
        properties: I,
        sink: S,
        options: DecodeOptions,
    ) -> Result<Self, EncodeError>
    where
        I: IntoIterator<Item = PropertySpec>,
    {
        let (requests, pending) = build_requests(properties)?.into_parts();
        Ok(Self {
            cursor: PollCursor::new(requests.len()),
            requests,
            pending,
            options,
            stats: PollStats::default(),
            sink,
        })
    }

    /// The datagram to send now. Repeated calls without an intervening
    /// [`on_datagram`](Self::on_datagram) or [`on_timeout`](Self::on_timeout)
    /// return the same bytes.
    pub fn current_request(&self) -> Option<&[u8]> {
        let idx = self.cursor.current()?;
        self.requests.get(idx).map(|r| r.frame.as_slice())
    }

    pub fn current_invoke_id(&self) -> Option<u8> {
        let idx = self.cursor.current()?;
        self.requests.get(idx).map(|r| r.invoke_id)
    }

    /// Validates `datagram`, emits a sample on success, and advances.
    /// Rejections are counted and logged, never returned.
    pub fn on_datagram(&mut self, datagram: &[u8], timestamp: f64) -> PollOutcome {
        let success = match decode_read_property_ack_with(datagram, &self.pending, self.options) {
            Ok(ack) => {
                self.stats.samples += 1;
                self.sink.on_sample(DecodedSample {
                    name: &ack.property.name,
                    value: ack.value,
                    timestamp,
                });
                true
            }
            Err(reason) => {
                log::debug!("dropping {}-byte datagram: {reason}", datagram.len());
                self.stats.record_reject(reason);
                false
            }
        };
        self.advance(success)
    }

    /// No datagram arrived for the current slot; moves on exactly as a
    /// rejection would.
    pub fn on_timeout(&mut self) -> PollOutcome {
        self.stats.timeouts += 1;
        self.advance(false)
    }

    /// Counts a resend of the current request; the host decides how many it allows.
    pub fn note_retry(&mut self) -> u32 {
        self.cursor.note_retry()
    }

    pub fn retries(&self) -> u32 {
        self.cursor.retries()
    }

    fn advance(&mut self, success: bool) -> PollOutcome {
        let outcome = self.cursor.advance(success);
        if outcome == PollOutcome::CycleComplete {
            self.stats.cycles += 1;
        }
        outcome
    }

    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    pub fn cursor(&self) -> &PollCursor {
        &self.cursor
    }

    pub fn pending(&self) -> &PendingRequestTable {
        &self.pending
    }

    pub fn stats(&self) -> &PollStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
