//! Post snapshot persistence.
//!
//! The snapshot at `data/posts.json` is the only hand-off between the fetch
//! stage and the three render stages. It is rewritten in full on every fetch
//! and only ever read afterwards.
//!
//! ```json
//! [
//!   {
//!     "title": "Hello, World!",
//!     "link": "https://example.com/hello",
//!     "summary": "<p>Body text</p>",
//!     "published": "Mon, 01 Jan 2024 00:00:00 +0000",
//!     "source": "Example"
//!   }
//! ]
//! ```

use crate::types::Post;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Snapshot filename inside the data directory.
pub const SNAPSHOT_FILE: &str = "posts.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no post snapshot at {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads and writes the post snapshot inside a data directory.
#[derive(Debug, Clone)]
pub struct PostStore {
    path: PathBuf,
}

impl PostStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the snapshot with `posts`, creating the data directory first.
    pub fn save(&self, posts: &[Post]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(posts)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the snapshot in stored order.
    ///
    /// Returns [`StoreError::NotFound`] when no snapshot has been written yet.
    pub fn load(&self) -> Result<Vec<Post>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }
}
