// src/page/http.rs
//! reqwest + scraper page session. No JavaScript is executed: a page counts as
//! ready once its full HTML body has arrived, which satisfies both
//! `ReadyState` variants.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::{Duration, Instant};

use super::{Document, PageAccess, ReadyState};
use crate::error::ExtractError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct HttpPage {
    client: reqwest::Client,
    nav_timeout: Duration,
    closed: bool,
}

impl HttpPage {
    pub fn new(user_agent: &str, nav_timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB,en;q=0.8"));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("building http client")?;

        Ok(Self {
            client,
            nav_timeout,
            closed: false,
        })
    }

    fn nav_error(url: &str, reason: impl ToString) -> ExtractError {
        ExtractError::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl PageAccess for HttpPage {
    async fn navigate(&mut self, url: &str, ready: ReadyState) -> Result<Document, ExtractError> {
        if self.closed {
            return Err(Self::nav_error(url, "session closed"));
        }
        let t0 = Instant::now();

        let resp = self
            .client
            .get(url)
            .timeout(self.nav_timeout)
            .send()
            .await
            .map_err(|e| Self::nav_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::nav_error(url, format!("HTTP {status}")));
        }

        let body = resp.text().await.map_err(|e| Self::nav_error(url, e))?;
        tracing::debug!(
            url,
            ?ready,
            bytes = body.len(),
            ms = t0.elapsed().as_millis() as u64,
            "page loaded"
        );
        Ok(Document::new(url, body))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        tracing::debug!(page = self.name(), "session closed");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closed_session_refuses_navigation() {
        let mut page = HttpPage::new(DEFAULT_USER_AGENT, Duration::from_secs(1)).unwrap();
        page.close().await.unwrap();
        let err = page
            .navigate("https://example.test/", ReadyState::DomContentLoaded)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Navigation { .. }));
    }
}
