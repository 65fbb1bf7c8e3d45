//! Live-sync engine for livesync
//!
//! Instead of rebuilding and redeploying an image on every source change,
//! this crate works out which changed files can be pushed straight into
//! containers that are already running, and pushes them:
//!
//! - **Rule matching**: map one workspace-relative path onto container paths
//! - **Intersection**: resolve a whole change batch, all or nothing
//! - **Plan building**: resolve the image tag and container working dir,
//!   then intersect copies and deletes into one [`SyncPlan`]
//! - **Execution**: find every running container of the image and apply
//!   the plan through a caller-supplied [`CommandGenerator`]
//!
//! # Architecture
//!
//! ```text
//!              livesync-cli
//!                   |
//!     livesync-core + livesync-kube
//!                   |
//!        +----------+----------+
//!        |                     |
//!   livesync-fs          livesync-meta
//! ```
//!
//! Cluster access, working-dir lookup and the commands that move bytes are
//! collaborators behind the traits in [`cluster`]; this crate never talks to
//! a cluster directly.

pub mod cluster;
pub mod error;
pub mod events;
pub mod rules;
pub mod sync;

pub use cluster::{
    BoxError, CommandGenerator, Container, Operation, Pod, PodLister, WorkingDirResolver,
};
pub use error::{Error, Result};
pub use events::ChangeEventBatch;
pub use rules::match_sync_rules;
pub use sync::{
    CancelFlag, PlanBuilder, PlanExecutor, PlanOutcome, SyncEntry, SyncMap, SyncPlan, intersect,
    latest_tag,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_no_files_synced_displays_correctly() {
        let display = Error::NoFilesSynced.to_string();
        assert!(
            display.contains("didn't sync any files"),
            "Error display should say nothing was synced, got: {}",
            display
        );
    }
}
