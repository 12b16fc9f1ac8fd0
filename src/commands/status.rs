//! # Status Command Implementation
//!
//! Lists every group under the groups root together with how it currently
//! appears in the working directory and how many overlay entries it has.
//!
//! This command is read-only: it never creates or removes links.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use linkswitch::config::Config;
use linkswitch::link::{exposure_of, Exposure};
use linkswitch::output::{emoji, OutputConfig};
use linkswitch::scan::{scan_or_empty, ScanMode};

use super::sync::locate;

/// Show the groups and whether each one is exposed
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Path to the configuration file (defaults to linkswitch.ini in the working directory)
    #[arg(short, long, value_name = "FILE", env = "LINKSWITCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that receives the group links (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

/// Execute the `status` command.
pub fn execute(args: StatusArgs, output: &OutputConfig) -> Result<()> {
    let (working_dir, config_path) = locate(args.working_dir, args.config)?;

    let config = Config::from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let roots = config
        .resolve(&working_dir)
        .context("Failed to resolve configured directories")?;

    let groups = scan_or_empty(&roots.groups, ScanMode::Immediate)?;
    println!("📂 Groups root: {}", roots.groups.display());
    println!("🧩 Overlay root: {}", roots.overlay.display());
    println!();

    if groups.is_empty() {
        println!("No groups found.");
        return Ok(());
    }

    for group in &groups {
        let overlays = scan_or_empty(&roots.overlay.join(group), ScanMode::All)?.len();
        let state = match exposure_of(&roots.groups, &working_dir, group) {
            Exposure::Linked => format!("{} exposed", emoji(output, "🔗", "[LINK]")),
            Exposure::LinkedElsewhere(target) => format!(
                "{} linked to {}",
                emoji(output, "⚠️ ", "[ELSEWHERE]"),
                target.display()
            ),
            Exposure::Occupied => format!(
                "{} occupied by a non-link entry",
                emoji(output, "⚠️ ", "[OCCUPIED]")
            ),
            Exposure::Missing => format!("{} not exposed", emoji(output, "➖", "[MISSING]")),
        };
        println!("  {group}: {state} ({overlays} overlay entries)");
    }
    println!();
    println!("Total: {} groups", groups.len());

    Ok(())
}
