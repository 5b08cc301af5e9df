// src/config/runtime.rs
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::page::http::DEFAULT_USER_AGENT;

pub const ENV_OUTPUT_PATH: &str = "PRICE_WATCH_OUTPUT_PATH";
pub const ENV_USER_AGENT: &str = "PRICE_WATCH_USER_AGENT";
pub const ENV_NAV_TIMEOUT_MS: &str = "PRICE_WATCH_NAV_TIMEOUT_MS";
pub const ENV_INTERVAL_SECS: &str = "PRICE_WATCH_INTERVAL_SECS";

pub const DEFAULT_OUTPUT_PATH: &str = "price_snapshot.json";
pub const DEFAULT_NAV_TIMEOUT_MS: u64 = 30_000;

/// Settings owned by the invoking shell, not by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub output_path: PathBuf,
    pub user_agent: String,
    pub nav_timeout: Duration,
    /// `None` = single run.
    pub interval: Option<Duration>,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            nav_timeout: Duration::from_millis(DEFAULT_NAV_TIMEOUT_MS),
            interval: None,
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring non-numeric setting");
            None
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RuntimeSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            output_path: env_non_empty(ENV_OUTPUT_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            user_agent: env_non_empty(ENV_USER_AGENT).unwrap_or(defaults.user_agent),
            nav_timeout: env_u64(ENV_NAV_TIMEOUT_MS)
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.nav_timeout),
            interval: env_u64(ENV_INTERVAL_SECS)
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
        }
    }
}
