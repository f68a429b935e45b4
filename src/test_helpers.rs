//! Shared test utilities for the feedpress test suite.
//!
//! Provides post fixtures, an RSS document builder, and an in-memory
//! [`FeedFetcher`] so aggregation can be tested without a network.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fetcher = StaticFetcher::new()
//!     .with("http://a", &rss_feed(&[("Title", "http://a/1", "Summary", "")]));
//! let posts = aggregate(&[Source::rss("A", "http://a")], &fetcher, None);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use crate::feed::{FeedFetcher, FetchError};
use crate::types::Post;

// =========================================================================
// Post fixtures
// =========================================================================

/// `n` distinct posts titled `Post 1` .. `Post n`.
pub fn sample_posts(n: usize) -> Vec<Post> {
    (1..=n)
        .map(|i| {
            Post::new(
                &format!("Post {i}"),
                format!("https://example.com/{i}"),
                format!("<p>Summary {i}</p>"),
                format!("Mon, 0{} Jan 2024 00:00:00 +0000", i % 10),
                "Example",
            )
        })
        .collect()
}

/// A post with the given title and otherwise fixed fields.
pub fn post_titled(title: &str) -> Post {
    Post::new(title, "http://x", "Body text", "2024-01-01", "Test")
}

// =========================================================================
// RSS fixtures
// =========================================================================

/// Build an RSS 2.0 document from `(title, link, description, pubDate)` tuples.
///
/// Empty strings omit the element entirely.
pub fn rss_feed(items: &[(&str, &str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">\n<channel>\n\
         <title>Fixture</title>\n<link>https://example.com</link>\n\
         <description>Fixture feed</description>\n",
    );
    for (title, link, description, pub_date) in items {
        xml.push_str("<item>\n");
        for (tag, value) in [
            ("title", title),
            ("link", link),
            ("description", description),
            ("pubDate", pub_date),
        ] {
            if !value.is_empty() {
                xml.push_str(&format!("<{tag}>{}</{tag}>\n", xml_escape(value)));
            }
        }
        xml.push_str("</item>\n");
    }
    xml.push_str("</channel>\n</rss>\n");
    xml
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// =========================================================================
// Fetchers
// =========================================================================

/// In-memory fetcher: known urls return their body, anything else fails.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
    calls: RefCell<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, body: &str) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    /// Urls requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl FeedFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        self.bodies
            .get(url)
            .map(|body| body.as_bytes().to_vec())
            .ok_or_else(|| {
                FetchError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    format!("no fixture for {url}"),
                ))
            })
    }
}
