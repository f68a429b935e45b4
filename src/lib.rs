//! # Feedpress
//!
//! A small publishing pipeline for deal feeds: pull RSS feeds, keep one JSON
//! snapshot of every post, and turn that snapshot into markdown, a static HTML
//! site, and a newsletter payload.
//!
//! # Architecture: Snapshot-Centred Stages
//!
//! Every stage is an independent batch job. Fetch is the only stage that talks
//! to the network; the render stages only read the snapshot it writes:
//!
//! ```text
//! 1. Fetch       sources   →  data/posts.json        (feeds → snapshot)
//! 2. Write       snapshot  →  content/*.md           (markdown export)
//! 3. Site        snapshot  →  dist/*.html            (static site)
//! 4. Newsletter  snapshot  →  dist/newsletter.json   (digest payload)
//! ```
//!
//! The snapshot is human-readable JSON, so a render stage can be rerun or
//! debugged without refetching. A render stage that finds no snapshot reports
//! it and writes nothing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`feed`] | Stage 1: fetches sources and parses RSS items into posts |
//! | [`store`] | Reads and writes the `posts.json` snapshot |
//! | [`markdown`] | Stage 2: one front-matter markdown file per post |
//! | [`site`] | Stage 3: index and post pages rendered with Maud |
//! | [`newsletter`] | Stage 4: subject, HTML and plain-text digest of the newest posts |
//! | [`pipeline`] | Stage runners shared by the CLI subcommands |
//! | [`config`] | `site.config.json` loading, merging onto defaults, validation |
//! | [`slug`] | Title → filename-safe slug |
//! | [`types`] | The [`types::Post`] record shared by every stage |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Failures Stay Per-Source
//!
//! A feed that is unreachable or unparseable is logged and skipped. The
//! snapshot is still written from whatever the other sources returned, so one
//! broken feed never blocks a run.
//!
//! ## Slugs Name Files
//!
//! Markdown files and site pages are named by title slug. Two titles that slug
//! the same share a file and the later post wins. The index and the stage
//! output still list both.

pub mod config;
pub mod feed;
pub mod markdown;
pub mod newsletter;
pub mod output;
pub mod pipeline;
pub mod site;
pub mod slug;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
