// src/source.rs
//! Static, declarative description of one price source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default bounded wait for a locator to resolve.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Default rank for ranked listings: the first entry is conventionally a
/// "Shop on eBay" header or a sponsored slot, so the second one is read.
pub const DEFAULT_LISTING_RANK: usize = 2;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Extraction strategy discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A retailer product page with one unambiguous price element.
    #[serde(alias = "retailer")]
    SinglePricePage,
    /// A marketplace search page sorted by price ascending; the price is read
    /// from the entry at a configured rank.
    #[serde(alias = "ebay_search")]
    RankedSearchListing,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::SinglePricePage => "single_price_page",
            SourceKind::RankedSearchListing => "ranked_search_listing",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector expression(s) identifying the DOM fragment holding price text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// Price element. For ranked listings it is evaluated inside the chosen entry.
    pub selector: String,
    /// Listing entry selector (ranked listings only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// 1-based entry rank (ranked listings only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

impl Locator {
    pub fn single(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            container: None,
            rank: None,
        }
    }

    pub fn ranked(container: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            container: Some(container.into()),
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn rank_or_default(&self) -> usize {
        self.rank.unwrap_or(DEFAULT_LISTING_RANK)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefinition {
    pub id: String,
    pub kind: SourceKind,
    #[serde(default)]
    pub display_name: String,
    pub target_url: String,
    pub locator: Locator,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl SourceDefinition {
    pub fn new(
        id: impl Into<String>,
        kind: SourceKind,
        target_url: impl Into<String>,
        locator: Locator,
    ) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            kind,
            target_url: target_url.into(),
            locator,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    /// Label for logs; falls back to the id when no display name is set.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}
