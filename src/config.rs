//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/menutree/menutree.toml`
//! 3. Environment variables: `MENUTREE_*` prefix

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Unified configuration for menutree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file holding menus and nodes (default: ./menutree.json)
    pub catalog: PathBuf,
    /// Directory export files are written to (default: ./exports)
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("menutree.json"),
            export_dir: PathBuf::from("exports"),
        }
    }
}

/// Get the XDG config directory for menutree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "menutree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("menutree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path));
            }
        }

        let config = builder
            .add_source(Environment::with_prefix("MENUTREE"))
            .build()?;

        let mut settings = Settings::default();
        if let Ok(catalog) = config.get_string("catalog") {
            settings.catalog = PathBuf::from(catalog);
        }
        if let Ok(export_dir) = config.get_string("export_dir") {
            settings.export_dir = PathBuf::from(export_dir);
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overrides_when_loading_then_defaults_apply() {
        let settings = Settings::default();

        assert_eq!(settings.catalog, PathBuf::from("menutree.json"));
        assert_eq!(settings.export_dir, PathBuf::from("exports"));
    }
}
