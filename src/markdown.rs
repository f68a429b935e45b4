//! Markdown post export.
//!
//! Writes one file per post into the content directory, named
//! `{date}-{slug}.md`, where `date` is the day the stage runs:
//!
//! ```text
//! ---
//! title: Hello, World!
//! published: Mon, 01 Jan 2024 00:00:00 +0000
//! source: Example
//! link: https://example.com/hello
//! ---
//!
//! <p>Body text</p>
//! ```
//!
//! Front matter values are written as-is, with no quoting, and the summary
//! follows verbatim. Posts whose titles slug the same on the same day share a
//! filename; the later one overwrites the earlier.

use crate::slug::{SLUG_MAX_LEN, slug};
use crate::types::Post;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Filename for a post exported on `date_stamp`.
pub fn markdown_filename(post: &Post, date_stamp: &str) -> String {
    format!("{}-{}.md", date_stamp, slug(&post.title, SLUG_MAX_LEN))
}

/// Render the full markdown document for one post.
pub fn render_markdown(post: &Post) -> String {
    let mut doc = String::with_capacity(post.summary.len() + 128);
    doc.push_str("---\n");
    doc.push_str(&format!("title: {}\n", post.title));
    doc.push_str(&format!("published: {}\n", post.published));
    doc.push_str(&format!("source: {}\n", post.source));
    doc.push_str(&format!("link: {}\n", post.link));
    doc.push_str("---\n\n");
    doc.push_str(&post.summary);
    doc
}

/// Write every post to `output_dir`. Returns the number of posts written,
/// counting overwritten collisions.
pub fn write_posts(
    posts: &[Post],
    output_dir: &Path,
    date_stamp: &str,
) -> Result<usize, MarkdownError> {
    fs::create_dir_all(output_dir)?;
    for post in posts {
        let path = output_dir.join(markdown_filename(post, date_stamp));
        fs::write(path, render_markdown(post))?;
    }
    Ok(posts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{post_titled, sample_posts};
    use tempfile::TempDir;

    #[test]
    fn single_post_file_name_and_content() {
        let tmp = TempDir::new().unwrap();
        let post = Post::new("Hello, World!", "http://x", "Body text", "2024-01-01", "Test");

        let count = write_posts(&[post], tmp.path(), "2024-01-01").unwrap();

        assert_eq!(count, 1);
        let files: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
        let content = fs::read_to_string(tmp.path().join("2024-01-01-hello-world.md")).unwrap();
        assert_eq!(
            content,
            "---\ntitle: Hello, World!\npublished: 2024-01-01\nsource: Test\nlink: http://x\n---\n\nBody text"
        );
    }

    #[test]
    fn front_matter_field_order_is_fixed() {
        let doc = render_markdown(&post_titled("T"));
        let keys: Vec<&str> = doc
            .lines()
            .skip(1)
            .take(4)
            .map(|l| l.split(':').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["title", "published", "source", "link"]);
    }

    #[test]
    fn summary_written_verbatim() {
        let summary = "<p>Keep <b>this</b></p>\n\n  indented: yes\n---\n";
        let post = Post::new("T", "", summary, "", "");
        assert!(render_markdown(&post).ends_with(summary));
    }

    #[test]
    fn one_file_per_post() {
        let tmp = TempDir::new().unwrap();
        let count = write_posts(&sample_posts(4), tmp.path(), "2024-05-06").unwrap();
        assert_eq!(count, 4);
        for i in 1..=4 {
            assert!(tmp.path().join(format!("2024-05-06-post-{i}.md")).exists());
        }
    }

    #[test]
    fn colliding_slugs_last_write_wins() {
        let tmp = TempDir::new().unwrap();
        let first = Post::new("Big Sale!", "http://first", "first", "", "A");
        let second = Post::new("Big Sale?", "http://second", "second", "", "B");

        let count = write_posts(&[first, second], tmp.path(), "2024-01-01").unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
        let content = fs::read_to_string(tmp.path().join("2024-01-01-big-sale.md")).unwrap();
        assert!(content.ends_with("second"));
    }

    #[test]
    fn creates_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("content");
        write_posts(&[], &out, "2024-01-01").unwrap();
        assert!(out.is_dir());
    }
}
