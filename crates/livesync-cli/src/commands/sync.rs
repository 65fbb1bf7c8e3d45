//! Sync command implementation

use std::path::Path;

use colored::Colorize;
use livesync_core::{PlanExecutor, PlanOutcome};
use livesync_kube::{KubectlCommands, KubectlPodLister};

use super::Prepared;
use crate::cli::BatchArgs;
use crate::error::{CliError, Result};

/// Run the sync command
///
/// Every artifact is planned before anything is applied, so a batch that
/// needs a rebuild for one image touches no container at all.
pub fn run_sync(config_path: &Path, args: &BatchArgs, context: Option<String>) -> Result<()> {
    let prepared = Prepared::load(config_path, args)?;
    let outcomes = prepared.plan_all(args)?;

    let rebuild: Vec<&str> = outcomes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, PlanOutcome::AbortRequiresRebuild))
        .map(|(artifact, _)| artifact.image.as_str())
        .collect();
    if !rebuild.is_empty() {
        return Err(CliError::user(format!(
            "changes can't be synced, rebuild required for: {}",
            rebuild.join(", ")
        )));
    }

    let lister = KubectlPodLister::new().with_context(context.clone());
    let generator = KubectlCommands::new().with_context(context);
    let executor = PlanExecutor::new(&lister);

    for (artifact, outcome) in &outcomes {
        let Some(plan) = outcome.plan() else {
            println!("{} {}", artifact.image.bold(), "up to date".dimmed());
            continue;
        };
        if plan.is_empty() {
            println!("{} {}", artifact.image.bold(), "nothing to sync".dimmed());
            continue;
        }

        let count = executor
            .perform(
                &plan.target_image_tag,
                plan,
                &prepared.config.namespaces,
                &generator,
            )
            .map_err(|e| {
                if e.requires_rebuild() {
                    CliError::user(format!("{e} (rebuild required for {})", artifact.image))
                } else {
                    e.into()
                }
            })?;
        println!(
            "{} {} {} file(s) to {} ({} operations)",
            "+".green(),
            "Synced".green().bold(),
            plan.file_count(),
            plan.target_image_tag.cyan(),
            count
        );
    }

    Ok(())
}
