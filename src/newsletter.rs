//! Newsletter payload construction.
//!
//! Builds a short digest of the first [`NEWSLETTER_LIMIT`] posts in snapshot
//! order and writes it as `newsletter.json`:
//!
//! ```json
//! {
//!   "subject": "ByteBench Deals - 2024-01-01",
//!   "html": "<h1>ByteBench Deals - 2024-01-01</h1>\n<h2><a href=\"…\">…</a></h2><p>…</p>",
//!   "text": "ByteBench Deals - 2024-01-01\n\nTitle\nhttps://…\nSummary\n"
//! }
//! ```
//!
//! Titles, links and summaries are embedded raw in both bodies. Whatever sends
//! the payload owns escaping.

use crate::types::Post;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Maximum number of posts in one newsletter.
pub const NEWSLETTER_LIMIT: usize = 10;

/// Subject prefix; the send date is appended.
pub const SUBJECT_PREFIX: &str = "ByteBench Deals";

/// Payload filename inside the output directory.
pub const NEWSLETTER_FILE: &str = "newsletter.json";

#[derive(Error, Debug)]
pub enum NewsletterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Newsletter {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Subject line for a newsletter sent at `now`.
pub fn subject_for<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{} - {}", SUBJECT_PREFIX, now.format("%Y-%m-%d"))
}

/// Build the newsletter from the first [`NEWSLETTER_LIMIT`] posts.
pub fn build<Tz: TimeZone>(posts: &[Post], now: &DateTime<Tz>) -> Newsletter
where
    Tz::Offset: std::fmt::Display,
{
    let subject = subject_for(now);
    let selected = &posts[..posts.len().min(NEWSLETTER_LIMIT)];

    let mut html_parts = vec![format!("<h1>{subject}</h1>")];
    let mut text_parts = vec![subject.clone()];
    for post in selected {
        html_parts.push(format!(
            "<h2><a href=\"{}\">{}</a></h2><p>{}</p>",
            post.link, post.title, post.summary
        ));
        text_parts.push(format!("{}\n{}\n{}\n", post.title, post.link, post.summary));
    }

    Newsletter {
        subject,
        html: html_parts.join("\n"),
        text: text_parts.join("\n\n"),
    }
}

/// Write the payload to `{output_dir}/newsletter.json`.
pub fn write_newsletter(newsletter: &Newsletter, output_dir: &Path) -> Result<(), NewsletterError> {
    fs::create_dir_all(output_dir)?;
    let json = serde_json::to_string_pretty(newsletter)?;
    fs::write(output_dir.join(NEWSLETTER_FILE), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_posts;
    use chrono::Utc;
    use tempfile::TempDir;

    fn jan_first() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()
    }

    fn item_count(n: &Newsletter) -> usize {
        n.html.matches("<h2>").count()
    }

    #[test]
    fn subject_embeds_date() {
        let n = build(&[], &jan_first());
        assert_eq!(n.subject, "ByteBench Deals - 2024-01-01");
    }

    #[test]
    fn subject_zero_pads_month_and_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 0, 0, 0).unwrap();
        assert_eq!(subject_for(&now), "ByteBench Deals - 2025-03-07");
    }

    #[test]
    fn empty_posts_only_header() {
        let n = build(&[], &jan_first());
        assert_eq!(n.html, "<h1>ByteBench Deals - 2024-01-01</h1>");
        assert_eq!(n.text, "ByteBench Deals - 2024-01-01");
        assert_eq!(item_count(&n), 0);
    }

    #[test]
    fn twelve_posts_truncated_to_first_ten() {
        let posts = sample_posts(12);
        let n = build(&posts, &jan_first());

        assert_eq!(item_count(&n), 10);
        for i in 1..=10 {
            assert!(n.html.contains(&format!(">Post {i}</a>")), "missing post {i}");
            assert!(n.text.contains(&format!("Post {i}\n")));
        }
        assert!(!n.html.contains("Post 11"));
        assert!(!n.html.contains("Post 12"));
        assert!(!n.text.contains("Post 11"));
        // positional order preserved
        assert!(n.html.find(">Post 1<").unwrap() < n.html.find(">Post 2<").unwrap());
        assert!(n.text.find("Post 9\n").unwrap() < n.text.find("Post 10\n").unwrap());
    }

    #[test]
    fn three_posts_all_included() {
        let n = build(&sample_posts(3), &jan_first());
        assert_eq!(item_count(&n), 3);
    }

    #[test]
    fn html_layout() {
        let posts = vec![
            Post::new("A", "http://a", "<b>sa</b>", "", ""),
            Post::new("B", "http://b", "sb", "", ""),
        ];
        let n = build(&posts, &jan_first());
        assert_eq!(
            n.html,
            "<h1>ByteBench Deals - 2024-01-01</h1>\n\
             <h2><a href=\"http://a\">A</a></h2><p><b>sa</b></p>\n\
             <h2><a href=\"http://b\">B</a></h2><p>sb</p>"
        );
    }

    #[test]
    fn text_layout() {
        let posts = vec![
            Post::new("A", "http://a", "sa", "", ""),
            Post::new("B", "http://b", "sb", "", ""),
        ];
        let n = build(&posts, &jan_first());
        assert_eq!(
            n.text,
            "ByteBench Deals - 2024-01-01\n\nA\nhttp://a\nsa\n\n\nB\nhttp://b\nsb\n"
        );
    }

    #[test]
    fn no_escaping_performed() {
        let posts = vec![Post::new("Tom & Jerry <3", "http://x?a=1&b=2", "<i>raw</i>", "", "")];
        let n = build(&posts, &jan_first());
        assert!(n.html.contains("Tom & Jerry <3"));
        assert!(n.html.contains("http://x?a=1&b=2"));
        assert!(n.text.contains("<i>raw</i>"));
    }

    #[test]
    fn write_newsletter_creates_json() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("dist");
        let n = build(&sample_posts(2), &jan_first());

        write_newsletter(&n, &out).unwrap();

        let raw = fs::read_to_string(out.join(NEWSLETTER_FILE)).unwrap();
        let loaded: Newsletter = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded, n);
        assert!(raw.starts_with("{\n  \"subject\""));
    }
}
