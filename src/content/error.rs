//! Errors raised while resolving content

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a stored file into a post
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("post not found: {slug}")]
    NotFound { slug: String },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("post {slug} is missing required front-matter field `{field}`")]
    MissingField { slug: String, field: &'static str },
}

impl ContentError {
    /// Whether this is the "no such post" case callers turn into a 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
