use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "appctl")]
#[command(version)]
#[command(about = "CLI for hosted application configurations", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show differences between the local app configuration and a deployed export
    Diff(DiffArgs),

    /// Parse and summarize the local app configuration
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct DiffArgs {
    /// Path to the deployed app export to compare against
    pub deployed: PathBuf,

    /// Path to the local app config (defaults to searching for app.json
    /// upward from the working directory)
    #[arg(short = 'C', long = "local-config")]
    pub local_config: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the local app config (defaults to searching for app.json
    /// upward from the working directory)
    #[arg(short = 'C', long = "local-config")]
    pub local_config: Option<PathBuf>,
}
