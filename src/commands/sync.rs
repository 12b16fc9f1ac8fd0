//! # Sync Command Implementation
//!
//! The sync command performs a full run:
//! 1. Platform and volume guard
//! 2. Configuration load (writing a template and stopping if it is missing)
//! 3. Link cleanup, cache reset, group enumeration, overlay and exposure
//! 4. Trace output in execution order
//!
//! Running `linkswitch` without a subcommand runs this with default arguments.

use anyhow::{Context, Result};
use clap::Args;
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use linkswitch::config::{self, Config};
use linkswitch::defaults::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILENAME};
use linkswitch::error::Error;
use linkswitch::output::{emoji, format_event, OutputConfig};
use linkswitch::platform::{self, Platform};
use linkswitch::suggestions;
use linkswitch::sync::{self, SyncContext};

/// Arguments for the sync command
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Path to the configuration file (defaults to linkswitch.ini in the working directory)
    #[arg(short, long, value_name = "FILE", env = "LINKSWITCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that receives the group links (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Print the trace as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Resolve the working directory and configuration path shared by commands.
pub(crate) fn locate(
    working_dir: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    let working_dir = match working_dir {
        Some(dir) => dir,
        None => env::current_dir().context("Failed to get current directory")?,
    };
    let config_path = config
        .or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| working_dir.join(DEFAULT_CONFIG_FILENAME));
    Ok((working_dir, config_path))
}

/// Execute the sync command
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();
    let (working_dir, config_path) = locate(args.working_dir, args.config)?;

    let platform = Platform::current().map_err(suggestions::guard_failed)?;
    platform::ensure_local_volume(platform, &working_dir).map_err(suggestions::guard_failed)?;

    let config = match Config::from_file(&config_path) {
        Ok(config) => config,
        Err(Error::ConfigMissing { path }) => {
            config::write_template(&path, false)
                .with_context(|| format!("Failed to write template to {}", path.display()))?;
            if !args.quiet {
                println!("{}", suggestions::template_written(&path));
            }
            return Ok(());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to load config from {}", config_path.display()))
        }
    };

    let roots = config
        .resolve(&working_dir)
        .context("Failed to resolve configured directories")?;
    let report = sync::run(&SyncContext::new(roots, working_dir));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if args.quiet {
        return Ok(());
    }

    for event in report.trace.events() {
        println!("{}", format_event(output, event));
    }
    println!();

    let trace = &report.trace;
    let marker = if trace.failures() > 0 {
        emoji(output, "⚠️ ", "[DONE]")
    } else {
        emoji(output, "✅", "[DONE]")
    };
    println!(
        "{} Synchronized {} groups in {:.2}s",
        marker,
        report.groups.len(),
        start_time.elapsed().as_secs_f64()
    );
    println!(
        "   {} links created, {} removed, {} skipped, {} failed",
        trace.created(),
        trace.removed(),
        trace.notices(),
        trace.failures()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locate_defaults_config_into_working_dir() {
        let temp = TempDir::new().unwrap();
        let (work, config) = locate(Some(temp.path().to_path_buf()), None).unwrap();
        assert_eq!(work, temp.path());
        if env::var_os(CONFIG_ENV_VAR).is_none() {
            assert_eq!(config, temp.path().join(DEFAULT_CONFIG_FILENAME));
        }
    }

    #[test]
    fn test_execute_writes_template_when_config_missing() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("linkswitch.ini");
        let args = SyncArgs {
            config: Some(config_path.clone()),
            working_dir: Some(temp.path().to_path_buf()),
            json: false,
            quiet: true,
        };

        execute(args, &OutputConfig { use_color: false }).unwrap();

        assert!(config_path.is_file());
        // No run happened, so no cache directory was created.
        assert!(!temp.path().join("cache").exists());
    }

    #[test]
    fn test_execute_rejects_broken_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("linkswitch.ini");
        fs::write(&config_path, "[paths]\nalways = a\n").unwrap();
        let args = SyncArgs {
            config: Some(config_path),
            working_dir: Some(temp.path().to_path_buf()),
            json: false,
            quiet: true,
        };

        let err = execute(args, &OutputConfig { use_color: false }).unwrap_err();
        assert!(format!("{:#}", err).contains("missing value"));
    }
}
