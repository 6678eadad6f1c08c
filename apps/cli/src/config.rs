//! Configuration file for the CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name inside a config directory.
const CONFIG_FILE: &str = "config.toml";

/// Values read from `config.toml`. Every key is optional; command line flags
/// take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default model.
    pub model: Option<String>,
    /// Default temperature, 0..=100.
    pub temperature: Option<f32>,
    /// Response token ceiling override.
    pub max_tokens: Option<usize>,
    /// Query timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Otherwise the first file found among
    /// [`Config::search_paths`] is used, and defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let cwd = std::env::current_dir().ok();
        let found = Self::search_paths(cwd.as_deref(), dirs::config_dir().as_deref())
            .into_iter()
            .find(|path| path.is_file());
        match found {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Read and parse a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Candidate config files in priority order: the project directory,
    /// then the user config directory.
    pub fn search_paths(cwd: Option<&Path>, config_dir: Option<&Path>) -> Vec<PathBuf> {
        let project = cwd.map(|dir| dir.join(".sqirvy").join(CONFIG_FILE));
        let user = config_dir.map(|dir| dir.join("sqirvy").join(CONFIG_FILE));
        project.into_iter().chain(user).collect()
    }
}
