// src/strategy/mod.rs
pub mod ranked_listing;
pub mod single_price;

pub use ranked_listing::RankedSearchListing;
pub use single_price::SinglePricePage;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::ExtractError;
use crate::page::{Document, PageAccess};
use crate::source::{SourceDefinition, SourceKind};

/// Given a loaded page and a source's locator, produce raw price text.
/// Strategies return plain text only; normalization happens in one place.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn extract(
        &self,
        page: &mut dyn PageAccess,
        doc: &Document,
        source: &SourceDefinition,
    ) -> Result<String, ExtractError>;
}

/// `SourceKind` -> strategy dispatch. New kinds are added with `register`.
pub struct StrategyRegistry {
    strategies: HashMap<SourceKind, Box<dyn ExtractionStrategy>>,
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::empty()
            .register(Box::new(SinglePricePage))
            .register(Box::new(RankedSearchListing))
    }

    /// Registers `strategy` under its own kind, replacing any previous one.
    pub fn register(mut self, strategy: Box<dyn ExtractionStrategy>) -> Self {
        self.strategies.insert(strategy.kind(), strategy);
        self
    }

    pub fn resolve(&self, kind: SourceKind) -> Result<&dyn ExtractionStrategy, ExtractError> {
        self.strategies
            .get(&kind)
            .map(|s| s.as_ref())
            .ok_or(ExtractError::UnknownStrategy(kind))
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
