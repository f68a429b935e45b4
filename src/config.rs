//! Site configuration module.
//!
//! Handles loading and validating `site.config.json`. The file is sparse:
//! any key it leaves out takes its stock default.
//!
//! ## Configuration Options
//!
//! ```json
//! {
//!   "site_name": "Site",
//!   "sources": [
//!     { "type": "rss", "name": "Example Deals", "url": "https://example.com/feed.xml" }
//!   ],
//!   "fetch": {
//!     "user_agent": "feedpress/0.1",
//!     "timeout_seconds": 30
//!   }
//! }
//! ```
//!
//! - `site_name`: title of the generated site index.
//! - `sources`: feeds to aggregate, in output order. Only `"rss"` sources are
//!   fetched; any other `type` is kept in the config but ignored.
//! - `fetch.timeout_seconds`: omit (or `null`) for the HTTP client default.
//!
//! Keys this crate does not know about are ignored, so the same file can carry
//! settings for other tools (webhook targets and the like).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Site name used when the config does not set one.
pub const DEFAULT_SITE_NAME: &str = "Site";

/// The only source type the aggregator fetches.
pub const RSS_SOURCE_TYPE: &str = "rss";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.config.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Name shown on the generated site index.
    pub site_name: String,
    /// Configured feed sources, in aggregation order.
    pub sources: Vec<Source>,
    /// HTTP fetch settings.
    pub fetch: FetchSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            sources: Vec::new(),
            fetch: FetchSettings::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch.timeout_seconds == Some(0) {
            return Err(ConfigError::Validation(
                "fetch.timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.fetch.user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "fetch.user_agent must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Sources the aggregator will actually fetch.
    pub fn rss_sources(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter().filter(|s| s.is_fetchable())
    }
}

/// A configured feed descriptor.
///
/// `name` and `url` are optional in the file: a missing name becomes the empty
/// string on every post, a missing url means the source is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Source {
    pub fn rss(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: RSS_SOURCE_TYPE.to_string(),
            name: Some(name.into()),
            url: Some(url.into()),
        }
    }

    /// Display name stamped on every post from this source.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// True for `rss` sources with a non-empty url.
    pub fn is_fetchable(&self) -> bool {
        self.kind == RSS_SOURCE_TYPE && self.url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// HTTP fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// `User-Agent` header sent with every feed request.
    pub user_agent: String,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout_seconds: Option<u64>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: concat!("feedpress/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: None,
        }
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Parse config JSON and validate it. Absent keys take their defaults.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from the JSON file at `path`.
///
/// A missing file yields the stock defaults (no sources, site name `"Site"`).
/// Returns `Err` if the file exists but is not valid JSON or fails validation.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    if !path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a stock `site.config.json` with one example source.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_json() -> String {
    let config = SiteConfig {
        sources: vec![Source::rss(
            "Example Feed",
            "https://example.com/feed.xml",
        )],
        ..SiteConfig::default()
    };
    serde_json::to_string_pretty(&config).unwrap_or_default()
}
