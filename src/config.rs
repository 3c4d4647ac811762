//! User configuration.
//!
//! Settings are read from `<config_dir>/cineflow/config.json` and then overridden
//! by environment variables:
//! - `CINEFLOW_COST_PER_SECOND` - price per generated second (default: `0.005`)
//! - `CINEFLOW_VERSIONS` - tasks created per segment (default: `1`)
//! - `CINEFLOW_OUTPUT_ROOT` - root directory for generated outputs (default: `output`)

use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::DEFAULT_MAX_FILES_SHOWN;
use crate::summary::DEFAULT_COST_PER_SECOND;

const APP_NAME: &str = "cineflow";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Price per generated second, used for the cost estimate.
    pub cost_per_second: f64,
    /// Number of tasks created for each segment.
    pub versions_per_segment: u32,
    /// Root directory for generated outputs; each storyboard gets a subdirectory.
    pub output_root: PathBuf,
    /// Owning files listed per character name before truncating with `...`.
    pub max_files_shown: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cost_per_second: DEFAULT_COST_PER_SECOND,
            versions_per_segment: 1,
            output_root: PathBuf::from("output"),
            max_files_shown: DEFAULT_MAX_FILES_SHOWN,
        }
    }
}

impl Config {
    /// Load from the user's config directory, then apply environment overrides.
    /// Falls back to defaults if the file is missing or fails to parse.
    pub fn load() -> Self {
        let mut config = match config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Load from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `CINEFLOW_*` overrides using `lookup` to read variables.
    /// Values that fail to parse are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup("CINEFLOW_COST_PER_SECOND") {
            match raw.trim().parse::<f64>() {
                Ok(value) if value >= 0.0 => self.cost_per_second = value,
                _ => tracing::warn!("Ignoring invalid CINEFLOW_COST_PER_SECOND: {}", raw),
            }
        }
        if let Some(raw) = lookup("CINEFLOW_VERSIONS") {
            match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => self.versions_per_segment = value,
                _ => tracing::warn!("Ignoring invalid CINEFLOW_VERSIONS: {}", raw),
            }
        }
        if let Some(raw) = lookup("CINEFLOW_OUTPUT_ROOT") {
            if raw.trim().is_empty() {
                tracing::warn!("Ignoring empty CINEFLOW_OUTPUT_ROOT");
            } else {
                self.output_root = PathBuf::from(raw.trim());
            }
        }
    }
}

fn config_path() -> Result<PathBuf, ConfigError> {
    let mut path = config_dir().ok_or(ConfigError::NoConfigDir)?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
