//! Error types for livesync-fs

use std::path::PathBuf;

/// Result type for livesync-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in livesync-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("File {path} is {size} bytes (max {max})")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("{target} can't be made relative to {base}")]
    NotRelative { base: String, target: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
