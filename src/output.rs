//! # Output Configuration
//!
//! This module controls how the run trace looks on the terminal: whether
//! lines get an emoji marker and colour, or a plain bracketed tag.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use linkswitch::output::{OutputConfig, emoji};
//!
//! let config = OutputConfig::from_env_and_flag("auto");
//! println!("{} Synchronizing...", emoji(&config, "🔗", "[SYNC]"));
//! ```

use std::env;

use console::style;

use crate::report::{Event, Outcome};

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` environment variable is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stdout is not a TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, otherwise the plain alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Marker shown in front of a trace line for the given outcome.
pub fn outcome_marker(config: &OutputConfig, outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Created => emoji(config, "🔗", "[LINK]"),
        Outcome::Removed => emoji(config, "✂️ ", "[UNLINK]"),
        Outcome::Recreated => emoji(config, "🧹", "[RESET]"),
        Outcome::NotALink => emoji(config, "📄", "[KEEP]"),
        Outcome::AlreadyExists | Outcome::SourceMissing | Outcome::DirectoryAbsent => {
            emoji(config, "⚠️ ", "[SKIP]")
        }
        Outcome::Failed { .. } => emoji(config, "❌", "[FAIL]"),
    }
}

/// Render one trace event as a user-facing line.
pub fn format_event(config: &OutputConfig, event: &Event) -> String {
    let line = format!("{} {}", outcome_marker(config, &event.outcome), event);
    if !config.use_color {
        return line;
    }
    match event.outcome {
        Outcome::Failed { .. } => style(line).red().to_string(),
        Outcome::AlreadyExists | Outcome::SourceMissing | Outcome::DirectoryAbsent => {
            style(line).yellow().to_string()
        }
        _ => line,
    }
}
