// src/error.rs
use thiserror::Error;

use crate::source::SourceKind;

/// Per-source extraction failures. Every variant is caught at the engine's
/// per-source boundary and recorded as an `error` outcome.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Page unreachable, non-2xx response, or body unreadable.
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Locator did not resolve within the timeout. Layout changes, bot walls
    /// and genuinely missing elements are indistinguishable here.
    #[error("element `{selector}` not found within {timeout_ms}ms")]
    ElementNotFound { selector: String, timeout_ms: u64 },

    #[error("could not parse a price from {raw:?}")]
    UnparsablePrice { raw: String },

    /// No strategy registered for the kind. Configuration fault.
    #[error("no extraction strategy registered for kind `{0}`")]
    UnknownStrategy(SourceKind),

    /// Locator shape does not fit the strategy, or a selector does not parse.
    /// Configuration fault.
    #[error("invalid locator: {0}")]
    InvalidLocator(String),
}

impl ExtractError {
    pub fn not_found(selector: &str, timeout_ms: u64) -> Self {
        ExtractError::ElementNotFound {
            selector: selector.to_string(),
            timeout_ms,
        }
    }

    /// Faults caused by the source list rather than by the remote page.
    pub fn is_config_fault(&self) -> bool {
        matches!(
            self,
            ExtractError::UnknownStrategy(_) | ExtractError::InvalidLocator(_)
        )
    }

    /// Short label used for metrics and structured logs.
    pub fn kind_label(&self) -> &'static str {
        match self {
            ExtractError::Navigation { .. } => "navigation",
            ExtractError::ElementNotFound { .. } => "element_not_found",
            ExtractError::UnparsablePrice { .. } => "unparsable_price",
            ExtractError::UnknownStrategy(_) => "unknown_strategy",
            ExtractError::InvalidLocator(_) => "invalid_locator",
        }
    }
}
