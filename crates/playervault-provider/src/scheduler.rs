//! Background flush task.
//!
//! Started when the provider is built. On every tick it checks the closed
//! flag and exits if set; otherwise it drains the cache, writes each drained
//! entry when autosave is off, and leaves the cache empty either way. Close
//! wakes the task early through a [`Notify`](tokio::sync::Notify) so it does
//! not sleep out a long interval before exiting.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::codec;
use crate::provider::Shared;

/// Outcome of one flush tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Entries removed from the cache.
    pub drained: usize,
    /// Entries written to the store.
    pub written: usize,
    /// Entries whose write failed. Their data is lost.
    pub failed: usize,
}

/// Spawn the flush loop on `runtime`.
pub(crate) fn spawn(runtime: &tokio::runtime::Handle, shared: Arc<Shared>) -> JoinHandle<()> {
    runtime.spawn(run(shared))
}

async fn run(shared: Arc<Shared>) {
    let period = shared.config.flush_interval();
    let start = Instant::now().checked_add(period).unwrap_or_else(Instant::now);
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        interval_ms = shared.config.flush_interval_ms,
        autosave = shared.config.autosave,
        "Flush scheduler started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = shared.shutdown.notified() => {}
        }

        if shared.is_closed() {
            break;
        }

        let report = flush(&shared).await;
        if report.drained > 0 {
            info!(
                drained = report.drained,
                written = report.written,
                failed = report.failed,
                "Flushed player data"
            );
        } else {
            debug!("Flush tick with empty cache");
        }
    }

    info!("Flush scheduler stopped");
}

/// Drain the cache and, unless autosave already wrote every save, write each
/// drained entry. Write failures are logged per entry and do not stop the
/// rest of the drain.
///
/// Flushes never overlap, so two writes for one player cannot race. Drained
/// entries stay readable from the cache until their own write is done.
pub(crate) async fn flush(shared: &Shared) -> FlushReport {
    let _serial = shared.flush_lock.lock().await;
    let drained = {
        let _gate = shared.drain_gate.write().await;
        shared.cache.drain_all()
    };
    let mut report = FlushReport {
        drained: drained.len(),
        ..FlushReport::default()
    };

    for (id, state) in drained {
        if !shared.config.autosave {
            let record =
                codec::to_record(&state.player, state.world.as_ref(), &shared.config.save);
            match shared.store.write(id, &record).await {
                Ok(()) => report.written = report.written.saturating_add(1),
                Err(e) => {
                    error!(%id, error = %e, "Failed to flush player data");
                    report.failed = report.failed.saturating_add(1);
                }
            }
        }
        shared.cache.finish_flush(id);
    }
    report
}
