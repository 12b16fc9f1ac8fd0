//! # Error Handling
//!
//! This module defines the error type shared by the `linkswitch` library. It
//! uses `thiserror` to derive descriptive messages for every failure mode that
//! can stop a run or a configuration load.
//!
//! Individual link and unlink attempts never surface here. Their outcomes are
//! recorded as [`crate::report::Outcome`] values in the run trace, so a single
//! failing entry cannot abort the rest of the synchronization.
//!
//! The variants fall into three groups:
//!
//! - Configuration: `ConfigMissing`, `ConfigParse`.
//! - Environment guards that abort before any step runs: `UnsupportedPlatform`,
//!   `DisallowedVolume`.
//! - Filesystem: `DirectoryAbsent` (recovered locally by callers) and wrapped
//!   I/O errors.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for linkswitch operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist.
    ///
    /// Callers recover by emitting a template configuration and stopping.
    #[error("Configuration file not found: {}", path.display())]
    ConfigMissing { path: PathBuf },

    /// The configuration file exists but could not be understood.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A scan or cleanup target directory does not exist.
    #[error("Directory does not exist: {}", path.display())]
    DirectoryAbsent { path: PathBuf },

    /// The tool was started on an operating system it does not support.
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    /// The invocation root lives on a remote or network-mounted volume.
    #[error("Refusing to run on a network volume: {}", path.display())]
    DisallowedVolume { path: PathBuf },

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error aborts a run before any synchronization step.
    pub fn is_fatal_guard(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedPlatform { .. } | Error::DisallowedVolume { .. }
        )
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
