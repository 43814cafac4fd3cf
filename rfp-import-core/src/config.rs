use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::models::ValidationOptions;

/// Environment variable that points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "RFP_VALIDATE_CONFIG";

/// User-level defaults for the validator, read from a YAML file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Report unknown record fields as warnings instead of errors
    pub allow_unknown_fields: bool,
    /// Print the per-category table after a valid requirements file
    pub show_summary: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            allow_unknown_fields: false,
            show_summary: true,
        }
    }
}

impl ValidatorConfig {
    /// Loads the config from the provided path
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads the config if the file exists, falling back to defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> std::result::Result<Self, Error> {
        if !path.as_ref().exists() {
            log::debug!("no config at {:?}, using defaults", path.as_ref());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            allow_unknown_fields: self.allow_unknown_fields,
        }
    }
}

/// Gets the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    // Default to ~/.rfp-validate.config
    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

    Ok(home_dir.join(".rfp-validate.config"))
}
