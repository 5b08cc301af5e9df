// src/page/mod.rs
pub mod dom;
pub mod fixture;
pub mod http;

pub use dom::{Document, Element};
pub use fixture::FixturePage;
pub use http::HttpPage;

use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

use crate::error::ExtractError;

/// Load condition to wait for after navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// Markup parsed; subresources may still be loading.
    #[default]
    DomContentLoaded,
    /// All resources loaded.
    Load,
}

/// Navigation session used by the engine. One session is acquired per run,
/// re-navigated between sources, and closed at the end of the run.
#[async_trait]
pub trait PageAccess: Send {
    async fn navigate(&mut self, url: &str, ready: ReadyState) -> Result<Document, ExtractError>;

    /// Wait up to `timeout` for `selector` to resolve in `doc`.
    /// The default looks the selector up once in the static snapshot.
    async fn wait_for_selector(
        &mut self,
        doc: &Document,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element, ExtractError> {
        doc.select_first(selector)?
            .ok_or_else(|| ExtractError::not_found(selector, timeout.as_millis() as u64))
    }

    fn read_text(&self, element: &Element) -> String {
        element.text().to_string()
    }

    async fn close(&mut self) -> Result<()>;

    fn name(&self) -> &'static str;
}
