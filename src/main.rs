//! price-watch — Binary Entrypoint
//! Loads the source list, runs the extraction engine over a live HTTP page
//! session and writes the snapshot JSON. With `PRICE_WATCH_INTERVAL_SECS` set
//! it keeps running on that interval instead of exiting after one batch.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use price_watch::config::{load_sources_default, RuntimeSettings};
use price_watch::page::HttpPage;
use price_watch::scheduler::{spawn_scheduler, SchedulerCfg};
use price_watch::snapshot::{JsonFileSink, SnapshotSink};
use price_watch::{run_batch, StrategyRegistry};

/// Compact logs by default; `PRICE_WATCH_LOG_FORMAT=json` for JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("price_watch=info,warn"));

    let json = std::env::var("PRICE_WATCH_LOG_FORMAT")
        .ok()
        .is_some_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = RuntimeSettings::from_env();
    let sources = load_sources_default().context("loading source list")?;
    tracing::info!(sources = sources.len(), "price-watch starting");

    let registry = StrategyRegistry::with_defaults();
    let sink = JsonFileSink::new(settings.output_path.clone());

    let Some(interval) = settings.interval else {
        let page = HttpPage::new(&settings.user_agent, settings.nav_timeout)?;
        let outcomes = run_batch(&sources, page, &registry).await;
        sink.store(&outcomes).await?;
        tracing::info!("prices updated");
        return Ok(());
    };

    let user_agent = settings.user_agent.clone();
    let nav_timeout = settings.nav_timeout;
    let handle = spawn_scheduler(
        SchedulerCfg { interval },
        Arc::new(sources),
        Arc::new(registry),
        sink,
        move || HttpPage::new(&user_agent, nav_timeout),
    );

    tokio::select! {
        res = handle => res.context("scheduler task ended")?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutdown requested"),
    }
    Ok(())
}
