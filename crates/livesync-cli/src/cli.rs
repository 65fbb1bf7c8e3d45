//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// livesync - push changed files straight into running containers
#[derive(Parser, Debug)]
#[command(name = "livesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the livesync configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "LIVESYNC_CONFIG",
        default_value = "livesync.toml"
    )]
    pub config: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate the configuration and list artifacts and their sync rules
    Check,

    /// Show what a change batch would sync, without touching the cluster
    ///
    /// Examples:
    ///   livesync plan --builds builds.json --modified app/src/main.js
    ///   livesync plan --builds builds.json --deleted app/old.js --json
    Plan {
        #[command(flatten)]
        batch: BatchArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Plan a change batch and apply it to every running container
    Sync {
        #[command(flatten)]
        batch: BatchArgs,

        /// kubeconfig context to use
        #[arg(long)]
        context: Option<String>,
    },
}

/// Inputs shared by `plan` and `sync`
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct BatchArgs {
    /// Builds file listing the most recent tag of each image
    #[arg(short, long)]
    pub builds: PathBuf,

    /// Builds file from an earlier run, used for images not rebuilt since
    #[arg(long)]
    pub previous_builds: Option<PathBuf>,

    /// Only plan for this image (default: every artifact)
    #[arg(short, long)]
    pub artifact: Option<String>,

    /// Added file
    #[arg(long = "added", value_name = "PATH")]
    pub added: Vec<PathBuf>,

    /// Modified file
    #[arg(long = "modified", value_name = "PATH")]
    pub modified: Vec<PathBuf>,

    /// Deleted file
    #[arg(long = "deleted", value_name = "PATH")]
    pub deleted: Vec<PathBuf>,

    /// Use this container working dir instead of inspecting the image
    #[arg(long)]
    pub working_dir: Option<String>,
}
