//! Static HTML site generation.
//!
//! Renders the post snapshot into a flat site:
//!
//! ```text
//! dist/
//! ├── index.html          # Every post, in snapshot order
//! ├── hello-world.html    # One page per post, named by title slug
//! └── ...
//! ```
//!
//! Every run rewrites all post pages and the index. Files in the output
//! directory that the run does not produce are left alone.
//!
//! ## Filename Collisions
//!
//! Pages are named `{slug}.html`, so posts whose titles slug the same share a
//! page and the later post in the snapshot wins. The index still lists every
//! post, so two index entries may link to the same page.
//!
//! ## HTML Generation
//!
//! Templates are [maud](https://maud.lambda.xyz/) functions. Text fields are
//! escaped by maud as usual. The summary is feed-supplied HTML and is embedded
//! without escaping.

use crate::config::SiteConfig;
use crate::slug::{SLUG_MAX_LEN, slug};
use crate::types::Post;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Index page filename.
pub const INDEX_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One row of the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    /// Page filename, relative to the index.
    pub url: String,
    pub source: String,
    pub published: String,
}

/// What a render produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    /// Post page writes performed, counting overwritten collisions.
    pub pages_written: usize,
    /// Index entries in snapshot order.
    pub entries: Vec<IndexEntry>,
}

const CSS: &str = include_str!("../static/style.css");

/// Page filename for a post.
pub fn page_filename(post: &Post) -> String {
    format!("{}.html", slug(&post.title, SLUG_MAX_LEN))
}

/// Render every post page plus `index.html` into `output_dir`.
pub fn render_site(
    posts: &[Post],
    config: &SiteConfig,
    output_dir: &Path,
) -> Result<SiteSummary, SiteError> {
    fs::create_dir_all(output_dir)?;

    let mut entries = Vec::with_capacity(posts.len());
    for post in posts {
        let filename = page_filename(post);
        let page = render_post_page(post);
        fs::write(output_dir.join(&filename), page.into_string())?;
        entries.push(IndexEntry {
            title: post.title.clone(),
            url: filename,
            source: post.source.clone(),
            published: post.published.clone(),
        });
    }

    let index = render_index(&config.site_name, &entries);
    fs::write(output_dir.join(INDEX_FILE), index.into_string())?;

    Ok(SiteSummary {
        pages_written: posts.len(),
        entries,
    })
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Source and publish date line shared by index rows and post pages.
fn post_meta(source: &str, published: &str) -> Markup {
    html! {
        p.post-meta {
            (source)
            @if !source.is_empty() && !published.is_empty() {
                " · "
            }
            @if !published.is_empty() {
                time { (published) }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page listing every entry in order
pub fn render_index(site_name: &str, entries: &[IndexEntry]) -> Markup {
    let content = html! {
        header.site-header {
            h1 { (site_name) }
        }
        main.index-page {
            ul.post-list {
                @for entry in entries {
                    li {
                        a href=(entry.url) { (entry.title) }
                        (post_meta(&entry.source, &entry.published))
                    }
                }
            }
        }
    };

    base_document(site_name, content)
}

/// Renders a single post page
pub fn render_post_page(post: &Post) -> Markup {
    let content = html! {
        header.site-header {
            a href=(INDEX_FILE) { "← All posts" }
        }
        article.post {
            h1 { (post.title) }
            (post_meta(&post.source, &post.published))
            div.post-summary {
                (PreEscaped(&post.summary))
            }
            @if !post.link.is_empty() {
                p {
                    a href=(post.link) rel="noopener" { "Read the original" }
                }
            }
        }
    };

    base_document(&post.title, content)
}

// ============================================================================
// Tests
// ============================================================================
