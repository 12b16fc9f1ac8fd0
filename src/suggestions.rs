//! # Error Suggestions
//!
//! Helper functions that build user-facing errors with hints. Errors should
//! tell users what went wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use linkswitch::suggestions;
//!
//! return Err(suggestions::config_exists(path));
//! ```

use std::path::Path;

use crate::defaults::CONFIG_ENV_VAR;
use crate::error::Error;

/// The configuration file is already present and `init` was not forced.
pub fn config_exists(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file already exists: {path}\n\n\
         hint: Use --force to overwrite it with the template\n\
         hint: Edit the existing file to change the overlay, cache or group paths",
        path = path.display()
    )
}

/// A template was written because no configuration existed.
pub fn template_written(path: &Path) -> String {
    format!(
        "No configuration found, wrote a template to {path}\n\n\
         hint: Set 'always', 'cache' and 'path' in the file, then run linkswitch again\n\
         hint: Use -c/--config or {CONFIG_ENV_VAR} to point at another file",
        path = path.display()
    )
}

/// Explain a fatal pre-run guard failure.
pub fn guard_failed(error: Error) -> anyhow::Error {
    let hint = match &error {
        Error::DisallowedVolume { .. } => {
            "hint: Run linkswitch from a directory on a local disk"
        }
        Error::UnsupportedPlatform { .. } => {
            "hint: linkswitch supports macOS, Linux and Windows"
        }
        Error::Io(_) => "hint: The volume check needs a working `df` on the PATH",
        _ => return anyhow::anyhow!("{error}"),
    };
    anyhow::anyhow!("{error}\n\n{hint}")
}
