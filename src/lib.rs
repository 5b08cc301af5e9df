// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod outcome;
pub mod page;
pub mod scheduler;
pub mod snapshot;
pub mod source;
pub mod strategy;

// ---- Re-exports for stable public API ----
pub use crate::engine::{run_batch, run_once};
pub use crate::error::ExtractError;
pub use crate::normalize::normalize_price;
pub use crate::outcome::{ExtractionOutcome, OutcomeStatus, Snapshot};
pub use crate::page::{Document, Element, PageAccess, ReadyState};
pub use crate::source::{Locator, SourceDefinition, SourceKind};
pub use crate::strategy::{ExtractionStrategy, StrategyRegistry};
