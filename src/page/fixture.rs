// src/page/fixture.rs
//! Canned-HTML page session for tests and offline runs.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{Document, Element, PageAccess, ReadyState};
use crate::error::ExtractError;

struct FixtureEntry {
    html: String,
    /// Simulated time until the page's elements render.
    render_delay: Duration,
}

#[derive(Default)]
pub struct FixturePage {
    pages: HashMap<String, FixtureEntry>,
    current_delay: Duration,
    navigations: Vec<String>,
    closed: Arc<AtomicBool>,
}

impl FixturePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FixtureEntry {
                html: html.to_string(),
                render_delay: Duration::ZERO,
            },
        );
        self
    }

    /// A page whose elements only appear after `delay`.
    pub fn with_slow_page(mut self, url: &str, html: &str, delay: Duration) -> Self {
        self.pages.insert(
            url.to_string(),
            FixtureEntry {
                html: html.to_string(),
                render_delay: delay,
            },
        );
        self
    }

    /// URLs navigated to so far, in order.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Flag flipped by `close`, observable after the page has been moved.
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }
}

#[async_trait]
impl PageAccess for FixturePage {
    async fn navigate(&mut self, url: &str, _ready: ReadyState) -> Result<Document, ExtractError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ExtractError::Navigation {
                url: url.to_string(),
                reason: "session closed".into(),
            });
        }
        self.navigations.push(url.to_string());
        let entry = self.pages.get(url).ok_or_else(|| ExtractError::Navigation {
            url: url.to_string(),
            reason: "no fixture for url".into(),
        })?;
        self.current_delay = entry.render_delay;
        Ok(Document::new(url, entry.html.clone()))
    }

    async fn wait_for_selector(
        &mut self,
        doc: &Document,
        selector: &str,
        timeout: Duration,
    ) -> Result<Element, ExtractError> {
        if self.current_delay > timeout {
            tokio::time::sleep(timeout).await;
            return Err(ExtractError::not_found(selector, timeout.as_millis() as u64));
        }
        tokio::time::sleep(self.current_delay).await;
        doc.select_first(selector)?
            .ok_or_else(|| ExtractError::not_found(selector, timeout.as_millis() as u64))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
