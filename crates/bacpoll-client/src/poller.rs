//! Drives a [`PollClient`] over a [`DataLink`].
//!
//! One slot: send the current request, wait for a datagram, resend on silence
//! up to `max_retries` times, then hand the result (or the silence) to the
//! core, which moves the cursor on. Cycles are paced by `interval`.

use crate::transport::{DataLink, MAX_BIP_FRAME_LEN};
use bacpoll_core::{PollClient, PollOutcome, PollStats, SampleSink};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::{timeout, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// How long to wait for a reply before resending.
    pub response_timeout: Duration,
    /// Resends of one request before it is given up until the next cycle.
    pub max_retries: u32,
    /// Time between the starts of consecutive cycles.
    pub interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            response_timeout: Duration::from_secs(3),
            max_retries: 2,
            interval: Duration::from_secs(3),
        }
    }
}

/// Seconds since the Unix epoch, as stamped on decoded samples.
pub fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[derive(Debug)]
pub struct Poller<D, S> {
    datalink: D,
    client: PollClient<S>,
    config: PollerConfig,
}

impl<D: DataLink, S: SampleSink> Poller<D, S> {
    pub fn new(datalink: D, client: PollClient<S>, config: PollerConfig) -> Self {
        Self {
            datalink,
            client,
            config,
        }
    }

    /// Polls the current slot to completion and returns what the core decided.
    /// An empty request list reports a complete cycle straight away.
    ///
    /// Transport errors never escape: a failed send or receive is logged and
    /// counts as a missed reply.
    pub async fn poll_slot(&mut self) -> PollOutcome {
        let mut buf = [0u8; MAX_BIP_FRAME_LEN];
        loop {
            let Some(frame) = self.client.current_request() else {
                return PollOutcome::CycleComplete;
            };

            let sent = self.datalink.send(frame).await;
            if let Err(err) = sent {
                log::warn!("send failed: {err}");
                tokio::time::sleep(self.config.response_timeout).await;
            } else {
                match timeout(self.config.response_timeout, self.datalink.recv(&mut buf)).await {
                    Ok(Ok(n)) => return self.client.on_datagram(&buf[..n], unix_timestamp()),
                    Ok(Err(err)) => log::warn!("receive failed: {err}"),
                    Err(_elapsed) => {}
                }
            }

            if self.client.retries() >= self.config.max_retries {
                log::debug!(
                    "no reply for invoke id {:?} after {} retries",
                    self.client.current_invoke_id(),
                    self.client.retries()
                );
                return self.client.on_timeout();
            }
            let attempt = self.client.note_retry();
            log::debug!(
                "resending invoke id {:?} (retry {attempt})",
                self.client.current_invoke_id()
            );
        }
    }

    /// Polls every slot once, starting wherever the cursor is.
    pub async fn run_cycle(&mut self) {
        while self.poll_slot().await == PollOutcome::KeepPolling {}
    }

    /// Runs `cycles` cycles, or forever when `cycles` is zero. Each cycle starts
    /// `interval` after the previous one started, or as soon as it finished if
    /// it overran. Returns at once when there is nothing to poll.
    pub async fn run(&mut self, cycles: u64) {
        if self.client.request_count() == 0 {
            log::warn!("no properties to poll");
            return;
        }
        let mut ticker = (!self.config.interval.is_zero()).then(|| {
            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        let mut done = 0u64;
        loop {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await;
            }
            self.run_cycle().await;
            done += 1;

            let stats = self.client.stats();
            log::info!(
                "cycle {done} complete: {} samples, {} rejected, {} timeouts",
                stats.samples,
                stats.total_rejected(),
                stats.timeouts
            );
            if cycles != 0 && done >= cycles {
                return;
            }
        }
    }

    pub fn client(&self) -> &PollClient<S> {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut PollClient<S> {
        &mut self.client
    }

    pub fn stats(&self) -> &PollStats {
        self.client.stats()
    }

    pub fn datalink(&self) -> &D {
        &self.datalink
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    pub fn into_parts(self) -> (D, PollClient<S>) {
        (self.datalink, self.client)
    }
}
