//! Stage runners.
//!
//! Each function here is one independently invokable batch job, wired the way
//! the CLI runs it: fetch writes the snapshot, the three render stages read it.
//! A render stage that finds no snapshot returns [`Outcome::NoInput`] without
//! touching its output directory; the caller reports it and exits cleanly.

use crate::config::SiteConfig;
use crate::feed::{self, FeedFetcher, FetchEvent};
use crate::markdown::{self, MarkdownError};
use crate::newsletter::{self, NEWSLETTER_FILE, NEWSLETTER_LIMIT, Newsletter, NewsletterError};
use crate::site::{self, SiteError, SiteSummary};
use crate::store::{PostStore, StoreError};
use crate::types::Post;
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Markdown(#[from] MarkdownError),
    #[error(transparent)]
    Site(#[from] SiteError),
    #[error(transparent)]
    Newsletter(#[from] NewsletterError),
}

/// Working-directory layout shared by all stages.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Holds `posts.json`.
    pub data_dir: PathBuf,
    /// Markdown output.
    pub content_dir: PathBuf,
    /// Site pages and `newsletter.json`.
    pub output_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
        }
    }
}

impl Paths {
    /// Standard layout under `root`.
    pub fn under(root: &Path) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: root.join(defaults.data_dir),
            content_dir: root.join(defaults.content_dir),
            output_dir: root.join(defaults.output_dir),
        }
    }

    pub fn store(&self) -> PostStore {
        PostStore::new(&self.data_dir)
    }

    pub fn newsletter_path(&self) -> PathBuf {
        self.output_dir.join(NEWSLETTER_FILE)
    }
}

/// Result of a render stage.
#[derive(Debug, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    /// The snapshot does not exist; nothing was written.
    NoInput(PathBuf),
}

/// Newsletter stage result.
#[derive(Debug, PartialEq)]
pub struct NewsletterReport {
    pub newsletter: Newsletter,
    /// Posts included (at most [`NEWSLETTER_LIMIT`]).
    pub items: usize,
}

/// Load the snapshot, mapping a missing file to `None`.
pub fn load_snapshot(store: &PostStore) -> Result<Option<Vec<Post>>, StoreError> {
    match store.load() {
        Ok(posts) => Ok(Some(posts)),
        Err(StoreError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Aggregate every configured source and overwrite the snapshot.
pub fn run_fetch(
    config: &SiteConfig,
    paths: &Paths,
    fetcher: &dyn FeedFetcher,
    events: Option<Sender<FetchEvent>>,
) -> Result<Vec<Post>, PipelineError> {
    let posts = feed::aggregate(&config.sources, fetcher, events);
    paths.store().save(&posts)?;
    Ok(posts)
}

/// Export the snapshot as markdown files stamped with `date_stamp`.
pub fn run_markdown(paths: &Paths, date_stamp: &str) -> Result<Outcome<usize>, PipelineError> {
    let store = paths.store();
    let Some(posts) = load_snapshot(&store)? else {
        return Ok(Outcome::NoInput(store.path().to_path_buf()));
    };
    let written = markdown::write_posts(&posts, &paths.content_dir, date_stamp)?;
    Ok(Outcome::Done(written))
}

/// Render the snapshot into the static site.
pub fn run_site(paths: &Paths, config: &SiteConfig) -> Result<Outcome<SiteSummary>, PipelineError> {
    let store = paths.store();
    let Some(posts) = load_snapshot(&store)? else {
        return Ok(Outcome::NoInput(store.path().to_path_buf()));
    };
    let summary = site::render_site(&posts, config, &paths.output_dir)?;
    Ok(Outcome::Done(summary))
}

/// Build the newsletter from the snapshot and write `newsletter.json`.
pub fn run_newsletter<Tz: TimeZone>(
    paths: &Paths,
    now: &DateTime<Tz>,
) -> Result<Outcome<NewsletterReport>, PipelineError>
where
    Tz::Offset: std::fmt::Display,
{
    let store = paths.store();
    let Some(posts) = load_snapshot(&store)? else {
        return Ok(Outcome::NoInput(store.path().to_path_buf()));
    };
    let newsletter = newsletter::build(&posts, now);
    newsletter::write_newsletter(&newsletter, &paths.output_dir)?;
    Ok(Outcome::Done(NewsletterReport {
        newsletter,
        items: posts.len().min(NEWSLETTER_LIMIT),
    }))
}
