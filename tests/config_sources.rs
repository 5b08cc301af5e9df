// tests/config_sources.rs
use price_watch::config::load_sources_from;
use price_watch::SourceKind;
use std::fs;
use std::path::Path;

#[test]
fn shipped_source_list_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/sources.toml");
    let v = load_sources_from(&path).unwrap();

    let ids: Vec<_> = v.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["regaine_boots", "sons_minox", "kirkland_ebay_6_month"]);
    assert_eq!(v[2].kind, SourceKind::RankedSearchListing);
    assert_eq!(v[2].locator.container.as_deref(), Some(".s-item"));
    assert_eq!(v[2].locator.rank_or_default(), 2);
    assert!(v.iter().all(|s| s.timeout_ms == 5000));
}

#[test]
fn legacy_json_shape_loads() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("sources.json");
    fs::write(
        &p,
        r#"{"sources": [
            {"id": "regaine_boots", "kind": "retailer", "display_name": "Regaine Foam (Boots)",
             "target_url": "https://shop.example.test/regaine",
             "locator": {"selector": ".price_container .price"}},
            {"id": "kirkland", "kind": "ebay_search",
             "target_url": "https://market.example.test/sch",
             "locator": {"container": ".s-item", "selector": ".s-item__price"}}
        ]}"#,
    )
    .unwrap();
    let v = load_sources_from(&p).unwrap();
    assert_eq!(v[0].kind, SourceKind::SinglePricePage);
    assert_eq!(v[1].kind, SourceKind::RankedSearchListing);
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("sources.toml");
    fs::write(
        &p,
        r#"
[[sources]]
id = "a"
kind = "single_price_page"
target_url = "https://x.test/1"
locator = { selector = ".p" }

[[sources]]
id = "a"
kind = "single_price_page"
target_url = "https://x.test/2"
locator = { selector = ".p" }
"#,
    )
    .unwrap();
    let err = load_sources_from(&p).unwrap_err();
    assert!(format!("{err:#}").contains("duplicate source id `a`"));
}
