//! # Init Command Implementation
//!
//! This module implements the `init` subcommand, which writes the template
//! `linkswitch.ini` into the working directory. `sync` writes the same
//! template automatically when no configuration exists; `init` lets users do
//! it up front or reset an existing file with `--force`.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use linkswitch::config;
use linkswitch::suggestions;

use super::sync::locate;

/// Write a template linkswitch.ini configuration
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path of the configuration file to create
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the configuration belongs to (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the `init` command.
pub fn execute(args: InitArgs) -> Result<()> {
    let (_, config_path) = locate(args.working_dir, args.config)?;

    if config_path.exists() && !args.force {
        return Err(suggestions::config_exists(&config_path));
    }

    config::write_template(&config_path, args.force)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("✅ Created {}", config_path.display());
    println!("💡 Edit the paths, then run `linkswitch` to link your groups");

    Ok(())
}
