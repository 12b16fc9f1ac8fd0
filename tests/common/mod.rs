//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a fixture that lays out a working directory with a
//! configuration file, an overlay root, a cache root and a groups root.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new()
//!     .with_default_config()
//!     .with_group("A")
//!     .with_overlay_file("A", "config.ini", "x");
//! fixture.command().assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Standard layout: `always/`, `cache/`, `groups/` next to the config.
    pub const DEFAULT: &str = "[paths]\n\
        always = always <overlay files per group>\n\
        cache = cache <scratch>\n\
        path = groups <switchable groups>\n";

    /// Keys without a section header.
    pub const SECTIONLESS: &str = "always = always\ncache = cache\npath = groups\n";

    /// Missing the `path` key.
    pub const MISSING_PATH: &str = "[paths]\nalways = always\ncache = cache\n";
}

/// A temporary working directory populated with linkswitch roots.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `linkswitch.ini` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("linkswitch.ini")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    pub fn with_default_config(self) -> Self {
        self.with_config(configs::DEFAULT)
    }

    /// Create `groups/<name>`.
    pub fn with_group(self, name: &str) -> Self {
        self.temp_dir
            .child("groups")
            .child(name)
            .create_dir_all()
            .expect("Failed to create group");
        self
    }

    /// Add a real file inside `groups/<group>`.
    pub fn with_group_file(self, group: &str, name: &str, content: &str) -> Self {
        self.temp_dir
            .child("groups")
            .child(group)
            .child(name)
            .write_str(content)
            .expect("Failed to write group file");
        self
    }

    /// Add a file under `always/<group>`.
    pub fn with_overlay_file(self, group: &str, name: &str, content: &str) -> Self {
        self.temp_dir
            .child("always")
            .child(group)
            .child(name)
            .write_str(content)
            .expect("Failed to write overlay file");
        self
    }

    /// Add a file anywhere in the working directory.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add a symlink at `path` pointing at `target`.
    #[cfg(unix)]
    pub fn with_link(self, path: &str, target: &Path) -> Self {
        std::os::unix::fs::symlink(target, self.path().join(path))
            .expect("Failed to create symlink");
        self
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("linkswitch.ini")
    }

    pub fn groups(&self) -> PathBuf {
        self.path().join("groups")
    }

    pub fn overlay(&self) -> PathBuf {
        self.path().join("always")
    }

    pub fn cache(&self) -> PathBuf {
        self.path().join("cache")
    }

    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("linkswitch");
        cmd.current_dir(self.path())
            .env_remove("LINKSWITCH_CONFIG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
