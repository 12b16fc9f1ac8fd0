//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use linkswitch::output::OutputConfig;

/// linkswitch - Switch between file groups by linking them into a working directory
#[derive(Parser, Debug)]
#[command(name = "linkswitch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `sync`)
    #[command(subcommand)]
    command: Option<Commands>,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clean stale links, overlay files into every group and expose the groups
    Sync(commands::sync::SyncArgs),

    /// Write a template linkswitch.ini configuration
    Init(commands::init::InitArgs),

    /// Show the groups and whether each one is exposed
    Status(commands::status::StatusArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Fails only if a logger is already installed.
        let _ = env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .try_init();

        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Some(Commands::Sync(args)) => commands::sync::execute(args, &output),
            Some(Commands::Init(args)) => commands::init::execute(args),
            Some(Commands::Status(args)) => commands::status::execute(args, &output),
            Some(Commands::Completions(args)) => commands::completions::execute(args),
            None => commands::sync::execute(commands::sync::SyncArgs::default(), &output),
        }
    }
}
