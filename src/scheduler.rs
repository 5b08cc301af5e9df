// src/scheduler.rs
use anyhow::Result;
use metrics::counter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::engine::{ensure_metrics_described, run_batch};
use crate::page::PageAccess;
use crate::snapshot::SnapshotSink;
use crate::source::SourceDefinition;
use crate::strategy::StrategyRegistry;

#[derive(Clone, Copy, Debug)]
pub struct SchedulerCfg {
    pub interval: Duration,
}

/// Run one batch per tick (the first tick fires immediately). Each run gets a
/// fresh page session from `open_page`, which `run_batch` closes. A failure to
/// open a session or persist a snapshot is logged and the loop carries on.
///
/// A run that overruns the interval pushes the schedule back; missed ticks
/// are not replayed back to back.
pub fn spawn_scheduler<P, F, S>(
    cfg: SchedulerCfg,
    sources: Arc<Vec<SourceDefinition>>,
    registry: Arc<StrategyRegistry>,
    sink: S,
    open_page: F,
) -> JoinHandle<()>
where
    P: PageAccess + 'static,
    F: Fn() -> Result<P> + Send + 'static,
    S: SnapshotSink + 'static,
{
    ensure_metrics_described();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cfg.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            counter!("price_runs_total").increment(1);

            let page = match open_page() {
                Ok(p) => p,
                Err(e) => {
                    tracing::warn!(error = ?e, "could not open page session; skipping tick");
                    continue;
                }
            };

            let outcomes = run_batch(&sources, page, &registry).await;
            if let Err(e) = sink.store(&outcomes).await {
                tracing::warn!(error = ?e, "persisting snapshot failed");
            }

            tracing::info!(
                target: "scheduler",
                records = outcomes.len(),
                next_in_secs = cfg.interval.as_secs(),
                "scheduled price run done"
            );
        }
    })
}
