// src/strategy/ranked_listing.rs
//! Marketplace search results used as an arbitrage query.
//!
//! The source URL sorts by price (plus shipping) ascending, sets a minimum
//! price floor to drop accessory decoys and keeps buy-now listings only. The
//! entry at the configured rank (default 2: the first slot is usually a
//! "Shop on eBay" header or a sponsored item) is then a reproducible proxy for
//! the cheapest genuine live listing. This depends on the marketplace's current
//! markup; changing the rank changes what the reported price means.

use async_trait::async_trait;

use super::ExtractionStrategy;
use crate::error::ExtractError;
use crate::page::{Document, PageAccess};
use crate::source::{SourceDefinition, SourceKind};

pub struct RankedSearchListing;

#[async_trait]
impl ExtractionStrategy for RankedSearchListing {
    fn kind(&self) -> SourceKind {
        SourceKind::RankedSearchListing
    }

    async fn extract(
        &self,
        page: &mut dyn PageAccess,
        doc: &Document,
        source: &SourceDefinition,
    ) -> Result<String, ExtractError> {
        let locator = &source.locator;
        let container = locator.container.as_deref().ok_or_else(|| {
            ExtractError::InvalidLocator(format!(
                "source `{}`: ranked listing needs a container selector",
                source.id
            ))
        })?;
        let rank = locator.rank_or_default();
        if rank == 0 {
            return Err(ExtractError::InvalidLocator(format!(
                "source `{}`: rank is 1-based",
                source.id
            )));
        }

        // Wait for the listing to render before indexing into it.
        page.wait_for_selector(doc, container, source.timeout()).await?;

        let (entries, hit) = doc.select_nth_within(container, rank, &locator.selector)?;
        if entries < rank {
            return Err(ExtractError::not_found(
                &format!("{container} (rank {rank})"),
                source.timeout_ms,
            ));
        }
        tracing::debug!(source = %source.id, entries, rank, "ranked entry selected");

        let price =
            hit.ok_or_else(|| ExtractError::not_found(&locator.selector, source.timeout_ms))?;
        Ok(page.read_text(&price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{FixturePage, ReadyState};
    use crate::source::Locator;

    const URL: &str = "https://market.example.test/sch?_sop=15";
    const LISTING: &str = r#"
        <ul>
          <li class="s-item"><span class="s-item__price">Shop on eBay</span></li>
          <li class="s-item"><span class="s-item__price">£22.50</span></li>
          <li class="s-item"><span class="s-item__price">£25.00</span></li>
        </ul>"#;

    fn source(locator: Locator) -> SourceDefinition {
        SourceDefinition::new("kirkland", SourceKind::RankedSearchListing, URL, locator)
    }

    async fn run(locator: Locator) -> Result<String, ExtractError> {
        let mut page = FixturePage::new().with_page(URL, LISTING);
        let doc = page.navigate(URL, ReadyState::DomContentLoaded).await?;
        RankedSearchListing
            .extract(&mut page, &doc, &source(locator))
            .await
    }

    #[tokio::test]
    async fn default_rank_skips_header_slot() {
        let raw = run(Locator::ranked(".s-item", ".s-item__price")).await.unwrap();
        assert_eq!(raw, "£22.50");
    }

    #[tokio::test]
    async fn explicit_rank_is_honoured() {
        let raw = run(Locator::ranked(".s-item", ".s-item__price").with_rank(3))
            .await
            .unwrap();
        assert_eq!(raw, "£25.00");
    }

    #[tokio::test]
    async fn rank_past_end_is_not_found() {
        let err = run(Locator::ranked(".s-item", ".s-item__price").with_rank(4))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn table_row_entries_are_read_in_place() {
        let url = "https://market.example.test/table";
        let mut page = FixturePage::new().with_page(
            url,
            r#"<table>
                 <tr class="row"><td class="p">Header</td></tr>
                 <tr class="row"><td class="p">£22.50</td></tr>
               </table>"#,
        );
        let doc = page.navigate(url, ReadyState::DomContentLoaded).await.unwrap();
        let src = SourceDefinition::new(
            "table_listing",
            SourceKind::RankedSearchListing,
            url,
            Locator::ranked("tr.row", "td.p"),
        );
        let raw = RankedSearchListing
            .extract(&mut page, &doc, &src)
            .await
            .unwrap();
        assert_eq!(raw, "£22.50");
    }

    #[tokio::test]
    async fn entry_without_price_element_is_not_found() {
        let err = run(Locator::ranked(".s-item", ".s-item__shipping"))
            .await
            .unwrap_err();
        match err {
            ExtractError::ElementNotFound { selector, .. } => {
                assert_eq!(selector, ".s-item__shipping")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_listing_times_out_as_not_found() {
        let mut page =
            FixturePage::new().with_slow_page(URL, LISTING, std::time::Duration::from_secs(30));
        let doc = page.navigate(URL, ReadyState::DomContentLoaded).await.unwrap();
        let err = RankedSearchListing
            .extract(
                &mut page,
                &doc,
                &source(Locator::ranked(".s-item", ".s-item__price")),
            )
            .await
            .unwrap_err();
        match err {
            ExtractError::ElementNotFound {
                selector,
                timeout_ms,
            } => {
                assert_eq!(selector, ".s-item");
                assert_eq!(timeout_ms, 5_000);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_container_is_invalid_locator() {
        let err = run(Locator::single(".s-item__price")).await.unwrap_err();
        assert!(err.is_config_fault());
    }
}
