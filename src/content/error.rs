//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading posts from the content directory
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk content directory {path:?}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("Malformed front-matter in {path:?}: {reason}")]
    MalformedFrontMatter { path: PathBuf, reason: String },

    #[error("Missing required front-matter field `{field}` in {path:?}")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("Invalid pubDate {value:?} in {path:?}")]
    InvalidDate { path: PathBuf, value: String },

    #[error("Slug {0:?} does not resolve inside the content directory")]
    InvalidSlug(String),
}
