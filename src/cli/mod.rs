use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "fleet-lifecycle")]
#[command(about = "Bulk pause/lock and unlock/unpause of compute instances")]
#[command(long_about = "fleet-lifecycle drives the openstack CLI to move every ACTIVE instance to \
                       paused+locked, or every PAUSED instance back to unlocked+active, waiting for \
                       each transition to converge and printing a final report.")]
pub struct Cli {
    /// Additional TOML configuration file
    #[arg(long, global = true, help = "Load settings from this TOML file on top of fleet-lifecycle.toml")]
    pub config: Option<PathBuf>,

    /// Cloud entry from clouds.yaml
    #[arg(long, global = true, help = "Forwarded to every openstack call as --os-cloud")]
    pub os_cloud: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pause and then lock every ACTIVE instance
    PauseLock {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long, help = "Proceed without asking for confirmation")]
        yes: bool,
        /// Show which instances would be processed without changing anything
        #[arg(long, help = "Preview the instances that would be paused and locked")]
        dry_run: bool,
    },
    /// Unlock and then unpause every PAUSED instance
    UnlockUnpause {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long, help = "Proceed without asking for confirmation")]
        yes: bool,
        /// Show which instances would be processed without changing anything
        #[arg(long, help = "Preview the instances that would be unlocked and unpaused")]
        dry_run: bool,
    },
    /// Print every instance with its status and lock flag
    Report {
        /// Emit the report as JSON
        #[arg(long, help = "Print the report as JSON instead of text")]
        json: bool,
    },
    /// Print the current instance inventory
    List,
    /// Print the effective configuration as TOML
    Config,
}
