//! Error types for livesync-core

use crate::cluster::BoxError;

/// Result type for livesync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of a change batch an intersection was run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSet {
    /// Added and modified files, destined for the copy map
    Copy,
    /// Deleted files, destined for the delete map
    Delete,
}

impl std::fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeSet::Copy => write!(f, "added, modified"),
            ChangeSet::Delete => write!(f, "deleted"),
        }
    }
}

/// Errors that can occur while planning or performing a sync
///
/// "Nothing to do" and "fall back to a rebuild" are not errors; they are
/// reported through [`crate::PlanOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No build record for the artifact's image
    #[error("could not find latest tag for image {image} in builds: {builds:?}")]
    MissingTag { image: String, builds: Vec<String> },

    /// The working-dir collaborator failed
    #[error("retrieving working dir for {tag}: {source}")]
    WorkingDir {
        tag: String,
        #[source]
        source: BoxError,
    },

    /// A changed path cannot be expressed relative to the workspace
    #[error("changed file {path} can't be found relative to context {workspace}: {source}")]
    PathResolution {
        path: String,
        workspace: String,
        #[source]
        source: livesync_fs::Error,
    },

    /// A sync rule source is not a valid glob
    #[error("pattern error for {path} (pattern '{pattern}'): {source}")]
    Pattern {
        path: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Intersection of one half of the batch failed
    #[error("intersecting sync map and {set} files: {source}")]
    Intersect {
        set: ChangeSet,
        #[source]
        source: Box<Error>,
    },

    /// Listing pods failed
    #[error("getting pods for namespace {namespace}: {source}")]
    Discovery {
        namespace: String,
        #[source]
        source: BoxError,
    },

    /// A generated operation failed; earlier operations stay applied
    #[error("{source}")]
    Execution {
        operation: String,
        pod: String,
        container: String,
        #[source]
        source: BoxError,
    },

    /// Every step succeeded but nothing was executed
    #[error("didn't sync any files")]
    NoFilesSynced,

    /// The cancel flag was raised between remote calls
    #[error("sync cancelled")]
    Cancelled,
}

impl Error {
    /// Whether the dev loop should fall back to a full build and deploy.
    ///
    /// Cancellation is the only outcome where a rebuild makes no sense.
    pub fn requires_rebuild(&self) -> bool {
        !matches!(self, Error::Cancelled)
    }
}
