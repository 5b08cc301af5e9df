// src/snapshot.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::outcome::ExtractionOutcome;

#[async_trait::async_trait]
pub trait SnapshotSink: Send + Sync {
    /// Persist one run's outcomes. Pure serialization, no reformatting.
    async fn store(&self, outcomes: &[ExtractionOutcome]) -> Result<()>;
}

/// Writes the snapshot as pretty JSON, via a temp file + rename so readers
/// never observe a half-written file.
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SnapshotSink for JsonFileSink {
    async fn store(&self, outcomes: &[ExtractionOutcome]) -> Result<()> {
        let body = serde_json::to_string_pretty(outcomes).context("serializing snapshot")?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("renaming into {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), records = outcomes.len(), "snapshot written");
        Ok(())
    }
}

// --- Test helper ---
pub struct MemorySink {
    pub calls: std::sync::Mutex<Vec<Vec<ExtractionOutcome>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            calls: std::sync::Mutex::new(vec![]),
        }
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SnapshotSink for MemorySink {
    async fn store(&self, outcomes: &[ExtractionOutcome]) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink poisoned"))?
            .push(outcomes.to_vec());
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: SnapshotSink + ?Sized> SnapshotSink for std::sync::Arc<S> {
    async fn store(&self, outcomes: &[ExtractionOutcome]) -> Result<()> {
        (**self).store(outcomes).await
    }
}
