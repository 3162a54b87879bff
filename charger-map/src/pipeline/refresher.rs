//! Background periodic refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::{Pipeline, RefreshOutcome};

/// Run one refresh and log what happened.
///
/// Transport failures are logged and swallowed; the store keeps its
/// previous collection.
pub async fn refresh_logged(pipeline: &Pipeline) -> Option<RefreshOutcome> {
    match pipeline.refresh().await {
        Ok(outcome) => {
            if outcome == RefreshOutcome::AlreadyRunning {
                info!("refresh already in flight; skipping");
            }
            Some(outcome)
        }
        Err(e) => {
            warn!(error = %e, "failed to refresh site directory");
            None
        }
    }
}

/// Refresh every `period`, starting one period from now.
///
/// Refreshes run sequentially on one task, so there is never more than one
/// fetch in flight from this loop. Ticks missed while a slow fetch is
/// running are dropped rather than queued.
pub fn spawn_periodic(pipeline: Arc<Pipeline>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(every_secs = period.as_secs(), "starting periodic site refresh");
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            refresh_logged(&pipeline).await;
        }
    })
}
