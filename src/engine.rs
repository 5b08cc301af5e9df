// src/engine.rs
//! # Extraction Orchestrator
//! Sequential, one source at a time, over a single shared page session.
//! Each source yields exactly one outcome; a failing source is recorded as an
//! `error` outcome and the loop moves on. No retries inside a run: the engine
//! is invoked on a schedule, so a transient failure clears on the next run.

use chrono::Utc;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;
use rust_decimal::Decimal;
use std::time::Instant;

use crate::error::ExtractError;
use crate::normalize::normalize_price;
use crate::outcome::{ExtractionOutcome, Snapshot};
use crate::page::{PageAccess, ReadyState};
use crate::source::SourceDefinition;
use crate::strategy::StrategyRegistry;

/// One-time metrics registration.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("price_checks_total", "Sources checked, by kind.");
        describe_counter!(
            "price_check_errors_total",
            "Sources that produced an error outcome, by error kind."
        );
        describe_histogram!(
            "price_extract_ms",
            "Navigate + extract + normalize time per source in milliseconds."
        );
        describe_gauge!("price_run_last_ts", "Unix ts when the engine last ran.");
        describe_counter!("price_runs_total", "Scheduled engine runs.");
    });
}

/// Navigate, extract and normalize one source.
async fn check_source(
    source: &SourceDefinition,
    page: &mut dyn PageAccess,
    registry: &StrategyRegistry,
) -> Result<Decimal, ExtractError> {
    let doc = page
        .navigate(&source.target_url, ReadyState::DomContentLoaded)
        .await?;
    let strategy = registry.resolve(source.kind)?;
    let raw = strategy.extract(page, &doc, source).await?;
    tracing::debug!(source = %source.id, raw = %raw, "raw price text");
    normalize_price(&raw)
}

/// Run every source once, in list order. Never fails as a whole:
/// `outcomes.len() == sources.len()` and outcome `i` belongs to source `i`.
pub async fn run_once(
    sources: &[SourceDefinition],
    page: &mut dyn PageAccess,
    registry: &StrategyRegistry,
) -> Snapshot {
    ensure_metrics_described();

    let mut outcomes = Vec::with_capacity(sources.len());
    for source in sources {
        tracing::info!(source = %source.id, kind = %source.kind, "checking price for {}", source.label());
        let t0 = Instant::now();
        let result = check_source(source, page, registry).await;
        let attempted_at = Utc::now();

        histogram!("price_extract_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        counter!("price_checks_total", "kind" => source.kind.as_str()).increment(1);

        let outcome = match result {
            Ok(price) => {
                tracing::info!(source = %source.id, %price, "price found");
                ExtractionOutcome::success(&source.id, price, attempted_at)
            }
            Err(e) => {
                if e.is_config_fault() {
                    tracing::error!(source = %source.id, error = %e, "source misconfigured");
                } else {
                    tracing::warn!(source = %source.id, error = %e, "price check failed");
                }
                counter!("price_check_errors_total", "error" => e.kind_label()).increment(1);
                ExtractionOutcome::failure(&source.id, &e, attempted_at)
            }
        };
        outcomes.push(outcome);
    }

    let ok = outcomes.iter().filter(|o| o.is_success()).count();
    gauge!("price_run_last_ts").set(Utc::now().timestamp().max(0) as f64);
    tracing::info!(
        total = outcomes.len(),
        ok,
        failed = outcomes.len() - ok,
        page = page.name(),
        "price run finished"
    );

    outcomes
}

/// Run a whole batch over an owned page session and close the session
/// afterwards, whatever the outcomes were.
pub async fn run_batch<P: PageAccess>(
    sources: &[SourceDefinition],
    mut page: P,
    registry: &StrategyRegistry,
) -> Snapshot {
    let outcomes = run_once(sources, &mut page, registry).await;
    if let Err(e) = page.close().await {
        tracing::warn!(error = ?e, page = page.name(), "closing page session failed");
    }
    outcomes
}
