//! Change batches produced by the file watcher

use livesync_fs::NormalizedPath;

/// One batch of filesystem changes, as absolute host paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeEventBatch {
    pub added: Vec<NormalizedPath>,
    pub modified: Vec<NormalizedPath>,
    pub deleted: Vec<NormalizedPath>,
}

impl ChangeEventBatch {
    pub fn new<A, M, D>(added: A, modified: M, deleted: D) -> Self
    where
        A: IntoIterator,
        A::Item: Into<NormalizedPath>,
        M: IntoIterator,
        M::Item: Into<NormalizedPath>,
        D: IntoIterator,
        D::Item: Into<NormalizedPath>,
    {
        Self {
            added: added.into_iter().map(Into::into).collect(),
            modified: modified.into_iter().map(Into::into).collect(),
            deleted: deleted.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_changed(&self) -> bool {
        !(self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty())
    }

    /// Files whose new content should be copied: added, then modified.
    pub fn copy_candidates(&self) -> Vec<NormalizedPath> {
        self.added.iter().chain(&self.modified).cloned().collect()
    }

    pub fn deleted(&self) -> &[NormalizedPath] {
        &self.deleted
    }

    /// The part of the batch that lies under `workspace`.
    ///
    /// Paths outside it, or that cannot be related to it at all, belong to
    /// some other artifact and are left out.
    pub fn within(&self, workspace: &NormalizedPath) -> ChangeEventBatch {
        let inside = |paths: &[NormalizedPath]| -> Vec<NormalizedPath> {
            paths
                .iter()
                .filter(|path| is_under(path, workspace))
                .cloned()
                .collect()
        };
        ChangeEventBatch {
            added: inside(&self.added),
            modified: inside(&self.modified),
            deleted: inside(&self.deleted),
        }
    }
}

fn is_under(path: &NormalizedPath, workspace: &NormalizedPath) -> bool {
    match path.relative_to(workspace) {
        Ok(rel) => rel != ".." && !rel.starts_with("../"),
        Err(_) => false,
    }
}
