// tests/strategies.rs
use price_watch::page::FixturePage;
use price_watch::strategy::{RankedSearchListing, SinglePricePage};
use price_watch::{
    normalize_price, ExtractionStrategy, Locator, PageAccess, ReadyState, SourceDefinition,
    SourceKind,
};
use rust_decimal::Decimal;
use std::str::FromStr;

const URL: &str = "https://page.example.test/";

async fn extract(
    strategy: &dyn ExtractionStrategy,
    html: &str,
    source: SourceDefinition,
) -> String {
    let mut page = FixturePage::new().with_page(URL, html);
    let doc = page
        .navigate(URL, ReadyState::DomContentLoaded)
        .await
        .expect("fixture navigation");
    strategy
        .extract(&mut page, &doc, &source)
        .await
        .expect("extract ok")
}

#[tokio::test]
async fn single_price_page_reads_and_normalizes() {
    let src = SourceDefinition::new(
        "regaine_boots",
        SourceKind::SinglePricePage,
        URL,
        Locator::single(".price_container .price"),
    );
    let raw = extract(
        &SinglePricePage,
        include_str!("fixtures/retailer_boots.html"),
        src,
    )
    .await;
    assert_eq!(raw, "£34.99");
    assert_eq!(normalize_price(&raw).unwrap(), Decimal::from_str("34.99").unwrap());
}

#[tokio::test]
async fn ranked_listing_picks_second_entry() {
    let src = SourceDefinition::new(
        "kirkland",
        SourceKind::RankedSearchListing,
        URL,
        Locator::ranked(".s-item", ".s-item__price"),
    );
    let raw = extract(
        &RankedSearchListing,
        include_str!("fixtures/ebay_search.html"),
        src,
    )
    .await;
    assert_eq!(raw, "£22.50");
    assert_eq!(normalize_price(&raw).unwrap(), Decimal::from_str("22.50").unwrap());
}

#[tokio::test]
async fn ranked_listing_range_reports_lower_bound() {
    let src = SourceDefinition::new(
        "kirkland",
        SourceKind::RankedSearchListing,
        URL,
        Locator::ranked(".s-item", ".s-item__price"),
    );
    let raw = extract(
        &RankedSearchListing,
        include_str!("fixtures/ebay_range.html"),
        src,
    )
    .await;
    assert_eq!(raw, "£20.00 to £30.00");
    assert_eq!(normalize_price(&raw).unwrap(), Decimal::from_str("20.00").unwrap());
}
