//! Default values for linkswitch configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Name of the configuration file looked up in the invocation root.
pub const DEFAULT_CONFIG_FILENAME: &str = "linkswitch.ini";

/// Environment variable that overrides the configuration file path.
pub const CONFIG_ENV_VAR: &str = "LINKSWITCH_CONFIG";

/// Section holding the three root paths.
pub const PATHS_SECTION: &str = "paths";

/// Template written when no configuration file exists.
///
/// Text in angle brackets is commentary and is stripped on load.
pub const CONFIG_TEMPLATE: &str = r#"# linkswitch configuration
#
# Paths are relative to the directory linkswitch runs in, unless absolute.
# Text in angle brackets after a value is a comment and is ignored.

[paths]
always = always <one subdirectory per group; its files are linked into that group>
cache = cache <scratch directory, emptied on every run>
path = groups <one subdirectory per switchable group>
"#;
