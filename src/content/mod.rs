//! Content module - front-matter, markdown rendering and the post model

mod frontmatter;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{estimate_read_time, excerpt_fallback, Post};

use std::path::PathBuf;
use thiserror::Error;

/// A recoverable, per-post failure. One post failing never aborts the
/// batch; the orchestrator logs the error and drops the post from the
/// index and feed.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("unparseable date {0:?}")]
    Date(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
