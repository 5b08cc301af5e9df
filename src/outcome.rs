// src/outcome.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Result of one source for one run. Built once, never mutated.
///
/// The timestamp is the time of the attempt and is set on both success and
/// error records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutcome {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub status: OutcomeStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl ExtractionOutcome {
    pub fn success(id: &str, price: Decimal, at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            price: Some(price),
            status: OutcomeStatus::Success,
            timestamp: at,
            error_detail: None,
        }
    }

    pub fn failure(id: &str, err: &ExtractError, at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            price: None,
            status: OutcomeStatus::Error,
            timestamp: at,
            error_detail: Some(err.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }
}

/// Ordered batch output of one run, one outcome per source.
pub type Snapshot = Vec<ExtractionOutcome>;
