//! Feed aggregation.
//!
//! Stage 1 of the pipeline. Walks the configured sources in order, fetches
//! each RSS feed, and normalizes every item into a [`Post`]. The result is the
//! snapshot the render stages consume.
//!
//! ## Failure Isolation
//!
//! A source that cannot be fetched or parsed contributes zero posts. The
//! failure is logged as a warning and reported as [`FetchEvent::SourceFailed`];
//! the remaining sources are still fetched. There are no retries.
//!
//! ## Fetching
//!
//! [`FeedFetcher`] is the seam between aggregation and I/O. [`HttpFetcher`]
//! is the production implementation:
//!
//! - `http://` and `https://` urls go through a blocking `reqwest` client,
//!   one request at a time.
//! - `file://` urls and bare paths are read from disk, so a saved feed can be
//!   used as a source.
//!
//! ## Feed Formats
//!
//! Only RSS documents are parsed, through the `rss` crate. An Atom document
//! behind an `rss` source fails to parse and counts as a failed source. Atom
//! support would need a format-agnostic parser, and those normalize
//! `pubDate` into a timestamp, while posts keep the feed's date string
//! verbatim.
//!
//! ## Progress Reporting
//!
//! [`aggregate`] takes an optional channel sender and emits a [`FetchEvent`]
//! per source plus a final count. The CLI drains it on a printer thread;
//! tests either pass `None` or collect the events.

use crate::config::{FetchSettings, RSS_SOURCE_TYPE, Source};
use crate::types::Post;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("feed parse error: {0}")]
    Parse(#[from] rss::Error),
    #[error("unsupported URL: {0}")]
    UnsupportedUrl(String),
}

/// Progress notifications emitted while aggregating.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// About to fetch a source. `index` is 1-based among fetched sources.
    SourceStarted {
        index: usize,
        name: String,
        url: String,
    },
    /// A source was fetched and parsed.
    SourceFetched { name: String, post_count: usize },
    /// A source failed and contributed no posts.
    SourceFailed {
        name: String,
        url: String,
        error: String,
    },
    /// A source was not fetched: not `rss`, or no url.
    SourceSkipped { name: String, reason: String },
    /// All sources processed.
    Finished {
        post_count: usize,
        sources_ok: usize,
        sources_failed: usize,
    },
}

/// Retrieves raw feed bytes for a source url.
pub trait FeedFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetches over HTTP(S), or from disk for `file://` urls and bare paths.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(&settings.user_agent);
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send()?.error_for_status()?;
        Ok(response.bytes()?.to_vec())
    }
}

impl FeedFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match Url::parse(url) {
            Ok(parsed) => match parsed.scheme() {
                "http" | "https" => self.fetch_http(url),
                "file" => {
                    let path = parsed
                        .to_file_path()
                        .map_err(|_| FetchError::UnsupportedUrl(url.to_string()))?;
                    Ok(std::fs::read(path)?)
                }
                _ => Err(FetchError::UnsupportedUrl(url.to_string())),
            },
            // Not a URL at all: treat it as a filesystem path.
            Err(_) => Ok(std::fs::read(PathBuf::from(url))?),
        }
    }
}

/// Parse RSS bytes into posts attributed to `source_name`.
///
/// Items without a `<description>` take their summary from
/// `<content:encoded>`; items without a `<link>` use a permalink `<guid>`.
///
/// Pure: no I/O, so parsing can be tested without a network.
pub fn parse_feed(body: &[u8], source_name: &str) -> Result<Vec<Post>, FetchError> {
    let channel = rss::Channel::read_from(body)?;
    Ok(channel
        .items()
        .iter()
        .map(|item| {
            Post::new(
                item.title().unwrap_or_default(),
                item_link(item),
                item.description().or(item.content()).unwrap_or_default(),
                item.pub_date().unwrap_or_default(),
                source_name,
            )
        })
        .collect())
}

/// `<link>`, or a permalink `<guid>` when the item has no link.
fn item_link(item: &rss::Item) -> &str {
    item.link()
        .or_else(|| {
            item.guid()
                .filter(|guid| guid.is_permalink())
                .map(|guid| guid.value())
        })
        .unwrap_or_default()
}

/// Fetch one source and parse its entries.
pub fn fetch_source(fetcher: &dyn FeedFetcher, source: &Source) -> Result<Vec<Post>, FetchError> {
    let url = source.url.as_deref().unwrap_or_default();
    let body = fetcher.fetch(url)?;
    parse_feed(&body, source.display_name())
}

fn skip_reason(source: &Source) -> String {
    if source.kind != RSS_SOURCE_TYPE {
        format!("unsupported source type {:?}", source.kind)
    } else {
        "no url".to_string()
    }
}

/// Aggregate all fetchable sources into one ordered post list.
///
/// Order is the concatenation of each source's item order, sources in config
/// order. Non-rss sources and sources without a url are skipped and reported
/// as [`FetchEvent::SourceSkipped`].
pub fn aggregate(
    sources: &[Source],
    fetcher: &dyn FeedFetcher,
    events: Option<Sender<FetchEvent>>,
) -> Vec<Post> {
    let emit = |event: FetchEvent| {
        if let Some(tx) = &events {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    };

    let mut posts = Vec::new();
    let mut sources_ok = 0;
    let mut sources_failed = 0;

    for source in sources {
        if !source.is_fetchable() {
            let reason = skip_reason(source);
            debug!(kind = %source.kind, name = source.display_name(), "skipping source: {}", reason);
            emit(FetchEvent::SourceSkipped {
                name: source.display_name().to_string(),
                reason,
            });
            continue;
        }
        let name = source.display_name().to_string();
        let url = source.url.clone().unwrap_or_default();

        info!("Fetching feed: {} from {}", name, url);
        emit(FetchEvent::SourceStarted {
            index: sources_ok + sources_failed + 1,
            name: name.clone(),
            url: url.clone(),
        });

        match fetch_source(fetcher, source) {
            Ok(entries) => {
                sources_ok += 1;
                emit(FetchEvent::SourceFetched {
                    name,
                    post_count: entries.len(),
                });
                posts.extend(entries);
            }
            Err(e) => {
                sources_failed += 1;
                warn!("Failed to parse feed {}: {}", url, e);
                emit(FetchEvent::SourceFailed {
                    name,
                    url,
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Aggregated {} posts ({} sources ok, {} failed)",
        posts.len(),
        sources_ok,
        sources_failed
    );
    emit(FetchEvent::Finished {
        post_count: posts.len(),
        sources_ok,
        sources_failed,
    });
    posts
}
