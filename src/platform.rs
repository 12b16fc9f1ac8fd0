//! Platform detection and the pre-run volume guard.
//!
//! Both checks run once, before the configuration is loaded. The detected
//! [`Platform`] is passed to [`ensure_local_volume`] explicitly rather than
//! being consulted from global state.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Operating systems linkswitch runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an `std::env::consts::OS` value to a supported platform.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "macos" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            "windows" => Ok(Platform::Windows),
            other => Err(Error::UnsupportedPlatform {
                os: other.to_string(),
            }),
        }
    }

    /// Whether runs on this platform must happen on a local volume.
    pub fn requires_local_volume(self) -> bool {
        matches!(self, Platform::MacOs | Platform::Linux)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        })
    }
}

/// Refuse to run when `root` is on a network volume and `platform` cares.
pub fn ensure_local_volume(platform: Platform, root: &Path) -> Result<()> {
    if !platform.requires_local_volume() {
        return Ok(());
    }

    let output = Command::new("df").arg("-P").arg(root).output()?;
    debug!("df -P {}: {:?}", root.display(), output.status);
    if !output.status.success() {
        return Err(Error::Io(io::Error::other(format!(
            "df failed for {}: {}",
            root.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        ))));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if is_network_volume(&stdout) {
        Err(Error::DisallowedVolume {
            path: root.to_path_buf(),
        })
    } else {
        Ok(())
    }
}

/// Interpret `df -P` output for a single path.
///
/// The first column of the row after the header names the mounted source.
/// SMB and AFP shares show up as `//server/share`, NFS exports as
/// `host:/export`.
pub fn is_network_volume(df_stdout: &str) -> bool {
    df_stdout
        .lines()
        .nth(1)
        .and_then(|row| row.split_whitespace().next())
        .is_some_and(|source| source.starts_with("//") || source.contains(':'))
}
