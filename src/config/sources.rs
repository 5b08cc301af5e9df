// src/config/sources.rs
use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::{SourceDefinition, SourceKind};

pub const ENV_SOURCES_PATH: &str = "PRICE_WATCH_SOURCES_PATH";

/// Load the source list from an explicit path. Supports TOML or JSON formats.
pub fn load_sources_from(path: &Path) -> Result<Vec<SourceDefinition>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let sources = parse_sources(&content, ext.as_str())
        .with_context(|| format!("parsing {}", path.display()))?;
    validate(&sources)?;
    Ok(sources)
}

/// Load the source list using env var + fallbacks:
/// 1) $PRICE_WATCH_SOURCES_PATH
/// 2) config/sources.toml
/// 3) config/sources.json
pub fn load_sources_default() -> Result<Vec<SourceDefinition>> {
    if let Ok(p) = std::env::var(ENV_SOURCES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        } else {
            return Err(anyhow!("{ENV_SOURCES_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/sources.toml");
    if toml_p.exists() {
        return load_sources_from(&toml_p);
    }
    let json_p = PathBuf::from("config/sources.json");
    if json_p.exists() {
        return load_sources_from(&json_p);
    }
    Err(anyhow!(
        "no source list found (set {ENV_SOURCES_PATH} or add config/sources.toml)"
    ))
}

#[derive(serde::Deserialize)]
struct SourceFile {
    sources: Vec<SourceDefinition>,
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<SourceDefinition>> {
    if hint_ext == "toml" {
        let v: SourceFile = toml::from_str(s)?;
        return Ok(v.sources);
    }
    if hint_ext == "json" {
        return parse_json(s);
    }
    // Unknown extension: JSON first, then TOML.
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    let v: SourceFile = toml::from_str(s).context("unsupported sources format")?;
    Ok(v.sources)
}

/// JSON accepts `{"sources": [...]}` or a bare array.
fn parse_json(s: &str) -> Result<Vec<SourceDefinition>> {
    if let Ok(v) = serde_json::from_str::<SourceFile>(s) {
        return Ok(v.sources);
    }
    Ok(serde_json::from_str::<Vec<SourceDefinition>>(s)?)
}

/// Load-time integrity checks. The list is static for the process lifetime, so
/// anything caught here would otherwise fail the same way on every run.
pub fn validate(sources: &[SourceDefinition]) -> Result<()> {
    let mut seen = HashSet::new();
    for src in sources {
        let id = src.id.trim();
        if id.is_empty() {
            bail!("source with empty id (url {})", src.target_url);
        }
        if !seen.insert(id) {
            bail!("duplicate source id `{id}`");
        }
        if !(src.target_url.starts_with("http://") || src.target_url.starts_with("https://")) {
            bail!("source `{id}`: target_url must be http(s), got `{}`", src.target_url);
        }
        if src.locator.selector.trim().is_empty() {
            bail!("source `{id}`: empty locator selector");
        }
        if src.kind == SourceKind::RankedSearchListing {
            if src.locator.container.as_deref().map_or(true, |c| c.trim().is_empty()) {
                bail!("source `{id}`: ranked_search_listing needs locator.container");
            }
            if src.locator.rank == Some(0) {
                bail!("source `{id}`: locator.rank is 1-based");
            }
        }
    }
    Ok(())
}
