//! # Configuration
//!
//! linkswitch reads three directory paths from a configuration file in the
//! invocation root. The default is an INI file, `linkswitch.ini`:
//!
//! ```ini
//! [paths]
//! always = always <overlay root>
//! cache = cache
//! path = groups
//! ```
//!
//! - `always` is the overlay root. Each subdirectory mirrors a group name and
//!   holds the files linked into that group.
//! - `cache` is a scratch directory emptied on every run.
//! - `path` is the groups root. Each subdirectory is one switchable group.
//!
//! Text in `<angle brackets>` is free-form commentary and is removed before
//! the file is parsed. Keys may also appear before any section header.
//!
//! ## YAML configuration files
//!
//! Earlier releases read a YAML file with one top-level key per path, each
//! value on its own line:
//!
//! ```yaml
//! always:
//!     .content/.always <files for every group>
//! cache:
//!     .content/.cache
//! path:
//!     .content/groups
//! ```
//!
//! That format still loads: a path ending in `.yaml` or `.yml` (passed with
//! `--config` or `LINKSWITCH_CONFIG`) is parsed as YAML, with the same
//! commentary rules. Only the INI template is ever written.
//!
//! Paths are resolved against the invocation root into absolute [`Roots`],
//! which are then handed to the synchronization driver explicitly.

use std::fs;
use std::io;
use std::path::{self, Path, PathBuf};

use ini::{Ini, ParseOption};
use regex::Regex;
use serde::Deserialize;

use crate::defaults::{CONFIG_TEMPLATE, PATHS_SECTION};
use crate::error::{Error, Result};

/// Raw configuration values as written in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Overlay root (`always`).
    pub always: PathBuf,
    /// Cache root (`cache`).
    pub cache: PathBuf,
    /// Groups root (`path`).
    pub path: PathBuf,
}

/// Absolute directory roots a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub overlay: PathBuf,
    pub cache: PathBuf,
    pub groups: PathBuf,
}

/// On-disk syntax of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Ini,
    Yaml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything but YAML is INI.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ConfigFormat::Yaml
            }
            _ => ConfigFormat::Ini,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct YamlConfig {
    always: Option<String>,
    cache: Option<String>,
    path: Option<String>,
}

impl Config {
    /// Parse INI configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let cleaned = strip_commentary(content)?;
        let options = ParseOption {
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(&cleaned, options).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: None,
        })?;

        let section = ini.section(Some(PATHS_SECTION));
        let general = ini.general_section();
        let lookup = |key: &str| section.and_then(|s| s.get(key)).or_else(|| general.get(key));

        Ok(Self {
            always: required(lookup("always"), "always")?,
            cache: required(lookup("cache"), "cache")?,
            path: required(lookup("path"), "path")?,
        })
    }

    /// Parse YAML configuration text.
    pub fn parse_yaml(content: &str) -> Result<Self> {
        let cleaned = strip_commentary(content)?;
        let raw: Option<YamlConfig> =
            serde_yaml::from_str(&cleaned).map_err(|e| Error::ConfigParse {
                message: e.to_string(),
                hint: Some("Each of always, cache and path must be a plain string".to_string()),
            })?;
        let raw = raw.unwrap_or_default();

        Ok(Self {
            always: required(raw.always.as_deref(), "always")?,
            cache: required(raw.cache.as_deref(), "cache")?,
            path: required(raw.path.as_deref(), "path")?,
        })
    }

    /// Load and parse the configuration file at `path`.
    ///
    /// The syntax follows [`ConfigFormat::from_path`]. Returns
    /// [`Error::ConfigMissing`] when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ConfigMissing {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(Error::Io(e)),
        };
        match ConfigFormat::from_path(path) {
            ConfigFormat::Ini => Self::parse(&content),
            ConfigFormat::Yaml => Self::parse_yaml(&content),
        }
    }

    /// Resolve the configured paths against `invocation_root`.
    pub fn resolve(&self, invocation_root: &Path) -> Result<Roots> {
        let base = path::absolute(invocation_root)?;
        Ok(Roots {
            overlay: path::absolute(base.join(&self.always))?,
            cache: path::absolute(base.join(&self.cache))?,
            groups: path::absolute(base.join(&self.path))?,
        })
    }
}

fn required(value: Option<&str>, key: &str) -> Result<PathBuf> {
    let value = value.map(str::trim).unwrap_or_default();

    if value.is_empty() {
        return Err(Error::ConfigParse {
            message: format!("missing value for '{}'", key),
            hint: Some(format!(
                "Add '{} = <directory>' under [{}]",
                key, PATHS_SECTION
            )),
        });
    }
    Ok(PathBuf::from(value))
}

/// Remove `<...>` commentary from configuration text.
///
/// Square brackets are left alone, so section headers and paths such as
/// `groups[2024]` survive.
pub fn strip_commentary(content: &str) -> Result<String> {
    let commentary = Regex::new(r"[ \t]*<[^>]*>").map_err(Error::Regex)?;
    Ok(commentary.replace_all(content, "").into_owned())
}

/// Write the template configuration to `path`.
///
/// Fails if a file already exists there unless `force` is set.
pub fn write_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, CONFIG_TEMPLATE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_paths_section() {
        let config = Config::parse(
            "[paths]\nalways = shared\ncache = tmp/cache\npath = variants\n",
        )
        .unwrap();
        assert_eq!(config.always, PathBuf::from("shared"));
        assert_eq!(config.cache, PathBuf::from("tmp/cache"));
        assert_eq!(config.path, PathBuf::from("variants"));
    }

    #[test]
    fn test_parse_general_section() {
        let config = Config::parse("always=a\ncache=c\npath=p\n").unwrap();
        assert_eq!(config.path, PathBuf::from("p"));
    }

    #[test]
    fn test_parse_strips_angle_commentary() {
        let config = Config::parse(
            "[paths]\nalways = shared <files for every group>\ncache = cache<scratch>\npath = groups <variants> <more>\n",
        )
        .unwrap();
        assert_eq!(config.always, PathBuf::from("shared"));
        assert_eq!(config.cache, PathBuf::from("cache"));
        assert_eq!(config.path, PathBuf::from("groups"));
    }

    #[test]
    fn test_parse_keeps_square_brackets_in_values() {
        let config =
            Config::parse("[paths]\nalways = shared\ncache = c\npath = groups[2024] [b]\n").unwrap();
        assert_eq!(config.path, PathBuf::from("groups[2024] [b]"));
    }

    #[test]
    fn test_parse_template() {
        let config = Config::parse(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.always, PathBuf::from("always"));
        assert_eq!(config.cache, PathBuf::from("cache"));
        assert_eq!(config.path, PathBuf::from("groups"));
    }

    #[test]
    fn test_parse_keeps_backslashes() {
        let config =
            Config::parse("[paths]\nalways = C:\\shared\ncache = c\npath = p\n").unwrap();
        assert_eq!(config.always, PathBuf::from("C:\\shared"));
    }

    #[test]
    fn test_parse_missing_key() {
        let err = Config::parse("[paths]\nalways = a\npath = p\n").unwrap_err();
        match err {
            Error::ConfigParse { message, hint } => {
                assert!(message.contains("cache"));
                assert!(hint.unwrap().contains("cache ="));
            }
            other => panic!("expected ConfigParse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_value_that_is_only_commentary() {
        let err = Config::parse("[paths]\nalways = <todo>\ncache = c\npath = p\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_from_file_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("linkswitch.ini");
        assert!(matches!(
            Config::from_file(&path),
            Err(Error::ConfigMissing { .. })
        ));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let temp = TempDir::new().unwrap();
        let absolute_cache = temp.path().join("elsewhere");
        let config = Config {
            always: PathBuf::from("always"),
            cache: absolute_cache.clone(),
            path: PathBuf::from("groups"),
        };
        let roots = config.resolve(temp.path()).unwrap();
        assert_eq!(roots.overlay, temp.path().join("always"));
        assert_eq!(roots.cache, absolute_cache);
        assert_eq!(roots.groups, temp.path().join("groups"));
    }

    #[test]
    fn test_write_template_refuses_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("linkswitch.ini");
        write_template(&path, false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);

        fs::write(&path, "custom").unwrap();
        assert!(write_template(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");

        write_template(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn test_strip_commentary_leaves_headers() {
        let out = strip_commentary("[paths]\n# note\nkey = v <c>").unwrap();
        assert_eq!(out, "[paths]\n# note\nkey = v");
    }

    #[test]
    fn test_parse_yaml_with_values_on_their_own_lines() {
        let config = Config::parse_yaml(
            "always:\n    .content/.always <files for every group>\ncache:\n    .content/.cache\npath:\n    .content/(chosen)\n",
        )
        .unwrap();
        assert_eq!(config.always, PathBuf::from(".content/.always"));
        assert_eq!(config.cache, PathBuf::from(".content/.cache"));
        assert_eq!(config.path, PathBuf::from(".content/(chosen)"));
    }

    #[test]
    fn test_parse_yaml_missing_key() {
        let err = Config::parse_yaml("always: a\ncache: c\n").unwrap_err();
        match err {
            Error::ConfigParse { message, .. } => assert!(message.contains("'path'")),
            other => panic!("expected ConfigParse, got {:?}", other),
        }
        assert!(matches!(
            Config::parse_yaml(""),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_from_file_picks_format_by_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("b.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("linkswitch.ini")), ConfigFormat::Ini);
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), ConfigFormat::Ini);

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yaml");
        fs::write(&path, "always: a\ncache: c\npath: p\n").unwrap();
        assert_eq!(Config::from_file(&path).unwrap().path, PathBuf::from("p"));
    }

    proptest! {
        /// Property: commentary after a value never changes the parsed path
        #[test]
        fn commentary_is_ignored(value in "[a-zA-Z0-9_/.-]{1,20}", note in "[a-zA-Z0-9 ]{0,20}") {
            let text = format!("[paths]\nalways = {value} <{note}>\ncache = c\npath = p\n");
            let config = Config::parse(&text).unwrap();
            prop_assert_eq!(config.always, PathBuf::from(value));
        }
    }
}
