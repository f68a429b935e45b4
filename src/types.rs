//! Shared types used across all pipeline stages.
//!
//! [`Post`] is the only record that crosses a stage boundary: the fetch stage
//! writes a snapshot of posts to `data/posts.json` and the markdown, site and
//! newsletter stages read it back. All of them must agree on this shape.

use serde::{Deserialize, Deserializer, Serialize};

/// Title used when a feed entry has none (or only whitespace).
pub const UNTITLED: &str = "untitled";

/// One normalized feed entry.
///
/// Posts are plain values. There is no identity field: the same entry fetched
/// twice produces two equal posts, and nothing downstream deduplicates them.
///
/// No field is ever missing. Absent or `null` values in a snapshot load as
/// empty strings, and an empty title loads as [`UNTITLED`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Entry title, whitespace-trimmed.
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    /// Entry link, verbatim. May be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    /// Raw summary text or HTML exactly as the feed supplied it.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    /// Publication timestamp in whatever format the feed used. Never parsed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published: String,
    /// Display name of the configured source this entry came from.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
}

impl Post {
    /// Build a post from raw entry fields, applying the title rules.
    pub fn new(
        title: &str,
        link: impl Into<String>,
        summary: impl Into<String>,
        published: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: normalize_title(title),
            link: link.into(),
            summary: summary.into(),
            published: published.into(),
            source: source.into(),
        }
    }
}

fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        untitled()
    } else {
        trimmed.to_string()
    }
}

fn untitled() -> String {
    UNTITLED.to_string()
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn title_or_untitled<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(normalize_title(&raw))
}
