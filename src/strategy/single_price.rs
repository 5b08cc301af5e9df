// src/strategy/single_price.rs
use async_trait::async_trait;

use super::ExtractionStrategy;
use crate::error::ExtractError;
use crate::page::{Document, PageAccess};
use crate::source::{SourceDefinition, SourceKind};

/// Retailer product page: one unambiguous price element.
pub struct SinglePricePage;

#[async_trait]
impl ExtractionStrategy for SinglePricePage {
    fn kind(&self) -> SourceKind {
        SourceKind::SinglePricePage
    }

    async fn extract(
        &self,
        page: &mut dyn PageAccess,
        doc: &Document,
        source: &SourceDefinition,
    ) -> Result<String, ExtractError> {
        let el = page
            .wait_for_selector(doc, &source.locator.selector, source.timeout())
            .await?;
        Ok(page.read_text(&el))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{FixturePage, ReadyState};
    use crate::source::Locator;

    const URL: &str = "https://shop.example.test/regaine";

    fn source(selector: &str) -> SourceDefinition {
        SourceDefinition::new(
            "regaine_boots",
            SourceKind::SinglePricePage,
            URL,
            Locator::single(selector),
        )
    }

    #[tokio::test]
    async fn reads_price_text_verbatim() {
        let mut page = FixturePage::new().with_page(
            URL,
            r#"<div class="price_container"><span class="price">£34.99</span></div>"#,
        );
        let doc = page.navigate(URL, ReadyState::DomContentLoaded).await.unwrap();
        let raw = SinglePricePage
            .extract(&mut page, &doc, &source(".price_container .price"))
            .await
            .unwrap();
        assert_eq!(raw, "£34.99");
    }

    #[tokio::test]
    async fn missing_element_is_not_found() {
        let mut page = FixturePage::new().with_page(URL, "<p>Sorry, we could not verify you</p>");
        let doc = page.navigate(URL, ReadyState::DomContentLoaded).await.unwrap();
        let err = SinglePricePage
            .extract(&mut page, &doc, &source(".price"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::ElementNotFound { .. }));
    }
}
