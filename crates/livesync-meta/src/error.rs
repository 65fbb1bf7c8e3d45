//! Error types for livesync-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] livesync_fs::Error),

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Artifact #{index} has no image name")]
    MissingImage { index: usize },

    #[error("Sync rule #{rule} of artifact {image}: {message}")]
    InvalidRule {
        image: String,
        rule: usize,
        message: String,
    },

    #[error("Sync rule #{rule} of artifact {image} has invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        image: String,
        rule: usize,
        pattern: String,
        message: String,
    },

    #[error("Artifact not found: {image}")]
    ArtifactNotFound { image: String },
}
