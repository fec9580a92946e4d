//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `BINTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Rule, DEFAULT_HEIGHT, DEFAULT_ROOT};

/// Default build parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Number of levels (root counts as level 1)
    pub height: i64,
    /// Root value; TOML and env integers are 64-bit, wider roots need `--root`
    pub root: i64,
    /// Rule for left children
    pub left: String,
    /// Rule for right children
    pub right: String,
    /// Cache generator results within one build
    pub memoize: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            root: DEFAULT_ROOT,
            left: Rule::Cube.to_string(),
            right: Rule::DoubleMinusOne.to_string(),
            memoize: false,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub height: Option<i64>,
    pub root: Option<i64>,
    pub left: Option<String>,
    pub right: Option<String>,
    pub memoize: Option<bool>,
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a config path.
pub fn expand_path(path: &Path) -> ApplicationResult<PathBuf> {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| ApplicationError::Config {
            message: format!("expand {}: {}", raw, e),
        })
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            height: overlay.height.unwrap_or(self.height),
            root: overlay.root.unwrap_or(self.root),
            left: overlay.left.clone().unwrap_or_else(|| self.left.clone()),
            right: overlay.right.clone().unwrap_or_else(|| self.right.clone()),
            memoize: overlay.memoize.unwrap_or(self.memoize),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file; it must exist when given
    pub fn load(local: Option<&Path>) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit local config
        if let Some(path) = local {
            let path = expand_path(path)?;
            debug!("loading local config: {}", path.display());
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply BINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("BINTREE"))
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_int("height"))? {
            settings.height = val;
        }
        if let Some(val) = optional(config.get_int("root"))? {
            settings.root = val;
        }
        if let Some(val) = optional(config.get_string("left"))? {
            settings.left = val;
        }
        if let Some(val) = optional(config.get_string("right"))? {
            settings.right = val;
        }
        if let Some(val) = optional(config.get_bool("memoize"))? {
            settings.memoize = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# bintree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/bintree/bintree.toml
#   Local:  file passed with --config
#   Env:    BINTREE_* environment variables (explicit overrides)

# Number of levels, root counts as level 1 (0 builds no tree)
# height = 4

# Root value (64-bit; use --root for values outside that range)
# root = 12

# Child rules: identity, negate, square, cube, double, double-minus-one,
#              add:N, mul:N, pow:N, affine:A:B (x * A + B)
# left = "cube"
# right = "double-minus-one"

# Cache rule results for repeated parent values within one build
# memoize = false
"#
        .to_string()
    }
}

/// A missing key is not an error; a malformed value is.
fn optional<T>(result: Result<T, ConfigError>) -> ApplicationResult<Option<T>> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_matches_default_tree() {
        let settings = Settings::default();
        assert_eq!(settings.height, 4);
        assert_eq!(settings.root, 12);
        assert_eq!(settings.left, "cube");
        assert_eq!(settings.right, "double-minus-one");
        assert!(!settings.memoize);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified() {
        let overlay = RawSettings {
            height: Some(6),
            right: Some("add:3".into()),
            ..Default::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.height, 6);
        assert_eq!(merged.root, 12);
        assert_eq!(merged.left, "cube");
        assert_eq!(merged.right, "add:3");
    }

    #[test]
    fn given_template_when_parsed_then_yields_empty_overlay() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.height.is_none());
        assert!(raw.left.is_none());
    }

    #[test]
    fn given_settings_when_to_toml_then_parses_back() {
        let settings = Settings {
            height: 2,
            root: -7,
            left: "mul:2".into(),
            right: "add:3".into(),
            memoize: true,
        };
        let text = settings.to_toml().unwrap();
        let back: Settings = toml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn given_template_when_read_then_states_root_range() {
        assert!(Settings::template().contains("use --root for values outside that range"));
    }

    #[test]
    fn given_tilde_in_path_when_expanding_then_uses_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        let expanded = expand_path(Path::new("~/bintree.toml")).unwrap();
        assert!(expanded.starts_with(&home), "{}", expanded.display());
    }
}
