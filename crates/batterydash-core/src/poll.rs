//! Poll loop
//!
//! Fetches a snapshot from a [`TelemetrySource`] on a fixed interval. The
//! first fetch happens immediately. Each fetch runs in its own task so a
//! request that hangs never holds up the timer; finished fetches are sent,
//! in completion order, to whoever owns the dashboard. If the network
//! reorders responses the later arrival wins.
//!
//! There is no backoff and no retry: a failed tick is reported and the next
//! tick fires on schedule.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::FetchError;
use crate::source::TelemetrySource;
use crate::telemetry::Snapshot;

/// Default refresh interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Result of one poll tick
#[derive(Debug)]
pub struct PollOutcome {
    /// Sequence number of the tick that issued the fetch, starting at 1
    pub tick: u64,
    /// Snapshot, or why the fetch failed
    pub result: Result<Snapshot, FetchError>,
}

/// Start polling `source` every `interval` until `cancel` fires.
///
/// Returns the receiving end of the outcome channel. The channel closes once
/// the poller has stopped and every in-flight fetch has finished or been
/// dropped.
pub fn spawn_poller<S: TelemetrySource>(
    source: S,
    interval: Duration,
    cancel: CancellationToken,
) -> mpsc::UnboundedReceiver<PollOutcome> {
    let (tx, rx) = mpsc::unbounded_channel();
    let source = Arc::new(source);

    tokio::spawn(async move {
        info!(source = %source.describe(), interval_ms = interval.as_millis() as u64, "poller started");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tick: u64 = 0;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tick += 1;
            let source = Arc::clone(&source);
            let tx = tx.clone();
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let result = tokio::select! {
                    _ = cancel.cancelled() => return,
                    result = source.fetch() => result,
                };
                debug!(tick, ok = result.is_ok(), "poll finished");
                // Receiver gone means the front end has shut down
                let _ = tx.send(PollOutcome { tick, result });
            });
        }

        info!(ticks = tick, "poller stopped");
    });

    rx
}
