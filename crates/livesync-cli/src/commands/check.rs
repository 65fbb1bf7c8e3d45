//! Check command implementation

use std::path::Path;

use colored::Colorize;

use super::load_config;
use crate::error::Result;

/// Run the check command
pub fn run_check(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    println!("{}", "Configuration OK".green().bold());
    println!();
    println!("{}: {}", "Config".dimmed(), config_path.display());
    println!("{}: {}", "Namespaces".dimmed(), config.namespaces.join(", "));
    if !config.insecure_registries.is_empty() {
        println!(
            "{}: {}",
            "Insecure registries".dimmed(),
            config.insecure_registries.join(", ")
        );
    }
    println!();

    println!("{}:", "Artifacts".bold());
    if config.artifacts.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for artifact in &config.artifacts {
        println!("  {} {} ({})", "+".green(), artifact.image.cyan(), artifact.workspace);
        if !artifact.has_sync_rules() {
            println!("      {}", "no sync rules".yellow());
        }
        for rule in artifact.rules() {
            if rule.strip.is_empty() {
                println!("      {} -> {}", rule.src, rule.dest);
            } else {
                println!("      {} -> {} (strip {})", rule.src, rule.dest, rule.strip);
            }
        }
    }

    Ok(())
}
