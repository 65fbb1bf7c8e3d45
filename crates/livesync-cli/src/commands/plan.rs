//! Plan command implementation

use std::path::Path;

use colored::Colorize;
use livesync_core::{PlanOutcome, SyncMap};
use serde_json::json;

use super::Prepared;
use crate::cli::BatchArgs;
use crate::error::Result;

/// Run the plan command
pub fn run_plan(config_path: &Path, args: &BatchArgs, json_output: bool) -> Result<()> {
    let prepared = Prepared::load(config_path, args)?;
    let outcomes = prepared.plan_all(args)?;

    if json_output {
        let report: Vec<_> = outcomes
            .iter()
            .map(|(artifact, outcome)| match outcome {
                PlanOutcome::NoChangeNeeded => {
                    json!({ "image": artifact.image, "outcome": "no_change" })
                }
                PlanOutcome::AbortRequiresRebuild => {
                    json!({ "image": artifact.image, "outcome": "rebuild" })
                }
                PlanOutcome::Plan(plan) => {
                    json!({ "image": artifact.image, "outcome": "plan", "plan": plan })
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (artifact, outcome) in &outcomes {
        println!("{}", artifact.image.bold());
        match outcome {
            PlanOutcome::NoChangeNeeded => println!("  {}", "No sync needed".dimmed()),
            PlanOutcome::AbortRequiresRebuild => {
                println!("  {}", "Rebuild required".yellow());
            }
            PlanOutcome::Plan(plan) => {
                println!("  {}: {}", "Target".dimmed(), plan.target_image_tag.cyan());
                print_map("copy", &plan.copy);
                print_map("delete", &plan.delete);
            }
        }
    }

    Ok(())
}

fn print_map(label: &str, map: &SyncMap) {
    for entry in map {
        println!(
            "  {} {} -> {}",
            label.green(),
            entry.host,
            entry.destinations.join(", ")
        );
    }
}
