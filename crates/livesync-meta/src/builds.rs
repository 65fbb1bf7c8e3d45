//! Build records: which tag was most recently produced for an image

use std::collections::HashSet;

use livesync_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pairing of a logical image name with its most recently built tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifact {
    #[serde(alias = "imageName")]
    pub image_name: String,
    pub tag: String,
}

impl BuildArtifact {
    pub fn new(image_name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            image_name: image_name.into(),
            tag: tag.into(),
        }
    }
}

/// On-disk shape of a builds file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildsFile {
    #[serde(default)]
    pub builds: Vec<BuildArtifact>,
}

impl BuildsFile {
    /// Load the build list from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Vec<BuildArtifact>> {
        let file: BuildsFile = ConfigStore::new().load(path)?;
        tracing::debug!(%path, count = file.builds.len(), "Loaded builds");
        Ok(file.builds)
    }
}

/// Merge previous or prebuilt build records into `builds`.
///
/// Every entry of `builds` is kept in order. An entry of `previous` is
/// appended only when its image name does not already appear in `builds`.
pub fn merge_with_previous_builds(
    builds: &[BuildArtifact],
    previous: &[BuildArtifact],
) -> Vec<BuildArtifact> {
    let updated: HashSet<&str> = builds.iter().map(|b| b.image_name.as_str()).collect();

    let mut merged = builds.to_vec();
    merged.extend(
        previous
            .iter()
            .filter(|b| !updated.contains(b.image_name.as_str()))
            .cloned(),
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_fresh_builds() {
        let builds = vec![BuildArtifact::new("app", "app:v2")];
        let previous = vec![
            BuildArtifact::new("app", "app:v1"),
            BuildArtifact::new("worker", "worker:v1"),
        ];

        let merged = merge_with_previous_builds(&builds, &previous);
        assert_eq!(
            merged,
            vec![
                BuildArtifact::new("app", "app:v2"),
                BuildArtifact::new("worker", "worker:v1"),
            ]
        );
    }

    #[test]
    fn test_merge_with_no_previous() {
        let builds = vec![BuildArtifact::new("app", "app:v2")];
        assert_eq!(merge_with_previous_builds(&builds, &[]), builds);
    }
}
