//! Plan builder

use std::collections::BTreeSet;

use livesync_meta::{ArtifactConfig, BuildArtifact};

use super::intersect::intersect;
use super::plan::{PlanOutcome, SyncPlan};
use super::tag::latest_tag;
use crate::cluster::WorkingDirResolver;
use crate::error::ChangeSet;
use crate::events::ChangeEventBatch;
use crate::{Error, Result};

/// Builds one [`SyncPlan`] per artifact and change batch.
///
/// The working-directory lookup is injected, and looked up afresh on every
/// call; nothing is cached between cycles.
pub struct PlanBuilder<'a> {
    resolver: &'a dyn WorkingDirResolver,
    insecure_registries: BTreeSet<String>,
}

impl<'a> PlanBuilder<'a> {
    pub fn new(resolver: &'a dyn WorkingDirResolver) -> Self {
        Self {
            resolver,
            insecure_registries: BTreeSet::new(),
        }
    }

    /// Registries the working-dir lookup may reach over plain HTTP.
    pub fn with_insecure_registries(mut self, registries: BTreeSet<String>) -> Self {
        self.insecure_registries = registries;
        self
    }

    /// Build the plan for `artifact`.
    ///
    /// An unchanged batch or an artifact without sync rules yields
    /// [`PlanOutcome::NoChangeNeeded`] without touching the build list or
    /// the resolver. A changed file that matches no rule, in either the
    /// copy or the delete half, yields [`PlanOutcome::AbortRequiresRebuild`].
    ///
    /// # Errors
    ///
    /// - [`Error::MissingTag`] if no build exists for the artifact's image
    /// - [`Error::WorkingDir`] if the resolver fails
    /// - [`Error::Intersect`] if a path or pattern cannot be resolved
    pub fn build(
        &self,
        artifact: &ArtifactConfig,
        batch: &ChangeEventBatch,
        builds: &[BuildArtifact],
    ) -> Result<PlanOutcome> {
        if !batch.has_changed() || !artifact.has_sync_rules() {
            return Ok(PlanOutcome::NoChangeNeeded);
        }

        let tag = match latest_tag(&artifact.image, builds) {
            Some(tag) if !tag.is_empty() => tag,
            _ => {
                return Err(Error::MissingTag {
                    image: artifact.image.clone(),
                    builds: builds
                        .iter()
                        .map(|b| format!("{}={}", b.image_name, b.tag))
                        .collect(),
                });
            }
        };

        let container_wd = self
            .resolver
            .working_dir(tag, &self.insecure_registries)
            .map_err(|source| Error::WorkingDir {
                tag: tag.to_string(),
                source,
            })?;
        tracing::debug!(%tag, %container_wd, "Resolved container working dir");

        let workspace = artifact.workspace_path();
        let rules = artifact.rules();

        let to_copy = intersect(&workspace, &container_wd, rules, &batch.copy_candidates())
            .map_err(|e| Error::Intersect {
                set: ChangeSet::Copy,
                source: Box::new(e),
            })?;

        let to_delete = intersect(&workspace, &container_wd, rules, batch.deleted()).map_err(
            |e| Error::Intersect {
                set: ChangeSet::Delete,
                source: Box::new(e),
            },
        )?;

        let (Some(copy), Some(delete)) = (to_copy, to_delete) else {
            return Ok(PlanOutcome::AbortRequiresRebuild);
        };

        tracing::debug!(
            image = %artifact.image,
            copy = copy.len(),
            delete = delete.len(),
            "Built sync plan"
        );
        Ok(PlanOutcome::Plan(SyncPlan {
            target_image_tag: tag.to_string(),
            copy,
            delete,
        }))
    }
}
