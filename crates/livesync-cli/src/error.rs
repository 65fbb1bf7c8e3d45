//! Error types for livesync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from livesync-core
    #[error(transparent)]
    Core(#[from] livesync_core::Error),

    /// Error from livesync-meta
    #[error(transparent)]
    Meta(#[from] livesync_meta::Error),

    /// Error from livesync-fs
    #[error(transparent)]
    Fs(#[from] livesync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
