//! CLI output formatting for all pipeline stages.
//!
//! Output is a content inventory: each post leads with its positional index
//! and title, and the file it produced is shown after an arrow. Paths are
//! secondary context.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! 001 Example Deals
//!     Source: https://example.com/feed.xml
//!     12 posts
//! 002 Broken Feed
//!     Source: https://broken.example/rss
//!     FAILED: HTTP error: 404 Not Found
//! --- Newsletter Archive (skipped: unsupported source type "atom")
//! Fetched 12 posts from 1 of 2 sources
//! ```
//!
//! ## Site
//!
//! ```text
//! Home → index.html
//! 001 Hello, World! → hello-world.html
//! 002 Big Sale! → big-sale.html (overwritten by 003)
//! 003 Big Sale? → big-sale.html
//! Generated 3 post pages into dist
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::feed::FetchEvent;
use crate::newsletter::Newsletter;
use crate::site::{INDEX_FILE, SiteSummary};
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Missing input
// ============================================================================

/// Message for a render stage that found no snapshot to work from.
pub fn format_missing_input(stage: &str, snapshot: &Path) -> String {
    format!(
        "No posts for {stage}: {} not found. Run `feedpress fetch` first.",
        snapshot.display()
    )
}

pub fn print_missing_input(stage: &str, snapshot: &Path) {
    println!("{}", format_missing_input(stage, snapshot));
}

// ============================================================================
// Stage 1: Fetch
// ============================================================================

/// Format one aggregation progress event.
pub fn format_fetch_event(event: &FetchEvent) -> Vec<String> {
    match event {
        FetchEvent::SourceStarted { index, name, url } => vec![
            format!("{} {}", format_index(*index), name),
            format!("    Source: {}", url),
        ],
        FetchEvent::SourceFetched { post_count, .. } => {
            vec![format!("    {}", plural(*post_count, "post"))]
        }
        FetchEvent::SourceFailed { error, .. } => vec![format!("    FAILED: {}", error)],
        FetchEvent::SourceSkipped { name, reason } => {
            vec![format!("--- {} (skipped: {})", name, reason)]
        }
        FetchEvent::Finished {
            post_count,
            sources_ok,
            sources_failed,
        } => vec![format!(
            "Fetched {} from {} of {}",
            plural(*post_count, "post"),
            sources_ok,
            plural(sources_ok + sources_failed, "source")
        )],
    }
}

/// Format the snapshot write confirmation.
pub fn format_snapshot_output(post_count: usize, snapshot: &Path) -> Vec<String> {
    vec![format!(
        "Wrote {} to {}",
        plural(post_count, "post"),
        snapshot.display()
    )]
}

pub fn print_snapshot_output(post_count: usize, snapshot: &Path) {
    for line in format_snapshot_output(post_count, snapshot) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Markdown
// ============================================================================

pub fn format_markdown_output(written: usize, output_dir: &Path) -> Vec<String> {
    vec![format!(
        "Wrote {} to {}",
        plural(written, "markdown file"),
        output_dir.display()
    )]
}

pub fn print_markdown_output(written: usize, output_dir: &Path) {
    for line in format_markdown_output(written, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 3: Site
// ============================================================================

/// Format the generated site inventory.
///
/// Entries whose page was later overwritten by a colliding slug are marked
/// with the index of the entry that owns the file.
pub fn format_site_output(summary: &SiteSummary, output_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Home \u{2192} {}", INDEX_FILE)];

    let mut owner: HashMap<&str, usize> = HashMap::new();
    for (i, entry) in summary.entries.iter().enumerate() {
        owner.insert(entry.url.as_str(), i + 1);
    }

    for (i, entry) in summary.entries.iter().enumerate() {
        let pos = i + 1;
        let mut line = format!("{} {} \u{2192} {}", format_index(pos), entry.title, entry.url);
        if let Some(&last) = owner.get(entry.url.as_str()) {
            if last != pos {
                line.push_str(&format!(" (overwritten by {})", format_index(last)));
            }
        }
        lines.push(line);
    }

    lines.push(format!(
        "Generated {} into {}",
        plural(summary.pages_written, "post page"),
        output_dir.display()
    ));
    lines
}

pub fn print_site_output(summary: &SiteSummary, output_dir: &Path) {
    for line in format_site_output(summary, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 4: Newsletter
// ============================================================================

pub fn format_newsletter_output(newsletter: &Newsletter, items: usize, path: &Path) -> Vec<String> {
    vec![
        format!("Subject: {}", newsletter.subject),
        format!(
            "Created {} with {}",
            path.display(),
            plural(items, "item")
        ),
    ]
}

pub fn print_newsletter_output(newsletter: &Newsletter, items: usize, path: &Path) {
    for line in format_newsletter_output(newsletter, items, path) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::IndexEntry;

    fn entry(title: &str, url: &str) -> IndexEntry {
        IndexEntry {
            title: title.to_string(),
            url: url.to_string(),
            source: String::new(),
            published: String::new(),
        }
    }

    #[test]
    fn format_index_single_digit() {
        assert_eq!(format_index(1), "001");
    }

    #[test]
    fn format_index_triple_digit() {
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(0, "post"), "0 posts");
        assert_eq!(plural(1, "post"), "1 post");
        assert_eq!(plural(2, "post"), "2 posts");
    }

    #[test]
    fn missing_input_message() {
        let msg = format_missing_input("site", Path::new("data/posts.json"));
        assert_eq!(
            msg,
            "No posts for site: data/posts.json not found. Run `feedpress fetch` first."
        );
    }

    #[test]
    fn fetch_started_event() {
        let lines = format_fetch_event(&FetchEvent::SourceStarted {
            index: 2,
            name: "Deals".into(),
            url: "https://example.com/rss".into(),
        });
        assert_eq!(lines, vec!["002 Deals", "    Source: https://example.com/rss"]);
    }

    #[test]
    fn fetch_result_events() {
        let ok = format_fetch_event(&FetchEvent::SourceFetched {
            name: "Deals".into(),
            post_count: 1,
        });
        assert_eq!(ok, vec!["    1 post"]);

        let failed = format_fetch_event(&FetchEvent::SourceFailed {
            name: "Deals".into(),
            url: "u".into(),
            error: "boom".into(),
        });
        assert_eq!(failed, vec!["    FAILED: boom"]);
    }

    #[test]
    fn fetch_skipped_event() {
        let lines = format_fetch_event(&FetchEvent::SourceSkipped {
            name: "Archive".into(),
            reason: "no url".into(),
        });
        assert_eq!(lines, vec!["--- Archive (skipped: no url)"]);
    }

    #[test]
    fn fetch_finished_event() {
        let lines = format_fetch_event(&FetchEvent::Finished {
            post_count: 12,
            sources_ok: 1,
            sources_failed: 1,
        });
        assert_eq!(lines, vec!["Fetched 12 posts from 1 of 2 sources"]);
    }

    #[test]
    fn site_output_lists_entries() {
        let summary = SiteSummary {
            pages_written: 2,
            entries: vec![entry("Hello", "hello.html"), entry("World", "world.html")],
        };
        let lines = format_site_output(&summary, Path::new("dist"));
        assert_eq!(
            lines,
            vec![
                "Home \u{2192} index.html",
                "001 Hello \u{2192} hello.html",
                "002 World \u{2192} world.html",
                "Generated 2 post pages into dist",
            ]
        );
    }

    #[test]
    fn site_output_marks_overwritten_pages() {
        let summary = SiteSummary {
            pages_written: 3,
            entries: vec![
                entry("Big Sale!", "big-sale.html"),
                entry("Other", "other.html"),
                entry("Big Sale?", "big-sale.html"),
            ],
        };
        let lines = format_site_output(&summary, Path::new("dist"));
        assert_eq!(
            lines[1],
            "001 Big Sale! \u{2192} big-sale.html (overwritten by 003)"
        );
        assert_eq!(lines[3], "003 Big Sale? \u{2192} big-sale.html");
    }

    #[test]
    fn markdown_output_summary() {
        let lines = format_markdown_output(3, Path::new("content"));
        assert_eq!(lines, vec!["Wrote 3 markdown files to content"]);
    }

    #[test]
    fn newsletter_output_summary() {
        let n = Newsletter {
            subject: "ByteBench Deals - 2024-01-01".into(),
            html: String::new(),
            text: String::new(),
        };
        let lines = format_newsletter_output(&n, 10, Path::new("dist/newsletter.json"));
        assert_eq!(
            lines,
            vec![
                "Subject: ByteBench Deals - 2024-01-01",
                "Created dist/newsletter.json with 10 items",
            ]
        );
    }
}
