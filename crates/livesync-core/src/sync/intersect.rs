//! Intersection of changed files with sync rules

use livesync_fs::NormalizedPath;
use livesync_meta::SyncRule;

use super::plan::SyncMap;
use crate::rules::match_sync_rules;
use crate::{Error, Result};

/// Resolve every changed file to its container destinations.
///
/// Returns `Ok(None)` as soon as one file matches no rule; the whole batch
/// is then given up and the caller should rebuild instead.
///
/// # Errors
///
/// Returns [`Error::PathResolution`] when a file cannot be expressed
/// relative to `workspace`, and [`Error::Pattern`] for a malformed rule.
pub fn intersect(
    workspace: &NormalizedPath,
    container_wd: &str,
    rules: &[SyncRule],
    files: &[NormalizedPath],
) -> Result<Option<SyncMap>> {
    let mut map = SyncMap::new();
    for file in files {
        let rel_path = file
            .relative_to(workspace)
            .map_err(|source| Error::PathResolution {
                path: file.to_string(),
                workspace: workspace.to_string(),
                source,
            })?;

        let destinations = match_sync_rules(rules, &rel_path, container_wd)?;
        if destinations.is_empty() {
            tracing::info!(
                "Changed file {} does not match any sync pattern. Skipping sync",
                rel_path
            );
            return Ok(None);
        }

        tracing::debug!(file = %file, ?destinations, "Matched sync rules");
        map.insert(file.to_string(), destinations);
    }
    Ok(Some(map))
}
