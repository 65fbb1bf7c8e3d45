//! Error types for kubectl and docker operations

/// Errors that can occur while running external tools
#[derive(Debug, thiserror::Error)]
pub enum KubeError {
    /// The program could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Subprocess exited with non-zero status
    #[error("Command `{command}` failed (exit code {code}): {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// Error parsing command output
    #[error("Failed to parse output of {program}: {message}")]
    ParseError { program: String, message: String },
}

/// Result type alias for kubectl and docker operations
pub type Result<T> = std::result::Result<T, KubeError>;
