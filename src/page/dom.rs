// src/page/dom.rs
//! Detached DOM snapshots. `Document` and `Element` own their HTML so they can
//! cross await points; each query re-parses with `scraper` synchronously.

use once_cell::sync::OnceCell;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;

fn parse_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector)
        .map_err(|e| ExtractError::InvalidLocator(format!("selector `{selector}`: {e:?}")))
}

/// Whitespace folding close to what a browser's `innerText` yields.
fn visible_text(el: &ElementRef<'_>) -> String {
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    let raw: String = el.text().collect();
    re_ws.replace_all(&raw, " ").trim().to_string()
}

fn to_element(el: &ElementRef<'_>) -> Element {
    Element {
        html: el.html(),
        text: visible_text(el),
    }
}

fn collect(html: &Html, selector: &Selector) -> Vec<Element> {
    html.select(selector).map(|el| to_element(&el)).collect()
}

/// A loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    url: String,
    html: String,
}

impl Document {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// All elements matching `selector`, in document order.
    pub fn select_all(&self, selector: &str) -> Result<Vec<Element>, ExtractError> {
        let sel = parse_selector(selector)?;
        let html = Html::parse_document(&self.html);
        Ok(collect(&html, &sel))
    }

    pub fn select_first(&self, selector: &str) -> Result<Option<Element>, ExtractError> {
        Ok(self.select_all(selector)?.into_iter().next())
    }

    /// Pick the `rank`-th (1-based) element matching `container`, then the
    /// first descendant of it matching `selector`. Runs on the live tree, so
    /// context-dependent entries (`<tr>`, `<td>`, `<option>`) stay intact.
    ///
    /// Returns the number of matched entries alongside the hit; the hit is
    /// `None` when there are fewer than `rank` entries or the entry holds no
    /// `selector` match.
    pub fn select_nth_within(
        &self,
        container: &str,
        rank: usize,
        selector: &str,
    ) -> Result<(usize, Option<Element>), ExtractError> {
        let container_sel = parse_selector(container)?;
        let inner_sel = parse_selector(selector)?;
        let html = Html::parse_document(&self.html);

        let entries: Vec<ElementRef<'_>> = html.select(&container_sel).collect();
        let hit = rank
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .and_then(|entry| entry.select(&inner_sel).next())
            .map(|el| to_element(&el));
        Ok((entries.len(), hit))
    }
}

/// One matched element: its outer HTML and its folded text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    html: String,
    text: String,
}

impl Element {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn outer_html(&self) -> &str {
        &self.html
    }
}
