//! Layered configuration system
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `PRISM_LOG`, `PRISM_FAIL_ON_INVALID`
//! 2. Project-local: `.prism/config.toml`
//! 3. Global: `~/.prism/config.toml`

use prism_core::{PrismError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

const LOG_ENV: &str = "PRISM_LOG";
const FAIL_ON_INVALID_ENV: &str = "PRISM_FAIL_ON_INVALID";

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: Option<String>,
}

/// Validation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub fail_on_invalid: Option<bool>,
}

/// Config file structure; unset keys fall through to lower layers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrismConfigFile {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Resolved configuration with environment variable overrides applied
#[derive(Debug, Clone)]
pub struct PrismConfig {
    pub log_level: Level,
    pub fail_on_invalid: bool,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            log_level: Level::WARN,
            fail_on_invalid: true,
        }
    }
}

impl PrismConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = PrismConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                Self::merge_into(&mut config, Self::load_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(".prism/config.toml");
        if local_path.exists() {
            Self::merge_into(&mut config, Self::load_file(&local_path)?);
        }

        Self::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
        Self::resolve(config)
    }

    /// Load config from a specific file path only, without env overrides
    #[cfg(test)]
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::resolve(Self::load_file(path)?)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".prism").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<PrismConfigFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            PrismError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn merge_into(base: &mut PrismConfigFile, overlay: PrismConfigFile) {
        if overlay.log.level.is_some() {
            base.log.level = overlay.log.level;
        }
        if overlay.validation.fail_on_invalid.is_some() {
            base.validation.fail_on_invalid = overlay.validation.fail_on_invalid;
        }
    }

    fn apply_env_overrides<F>(config: &mut PrismConfigFile, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(LOG_ENV) {
            config.log.level = Some(level);
        }
        if let Some(value) = lookup(FAIL_ON_INVALID_ENV) {
            let flag = parse_bool(&value).ok_or_else(|| {
                PrismError::ConfigError(format!(
                    "{} must be true or false, got '{}'",
                    FAIL_ON_INVALID_ENV, value
                ))
            })?;
            config.validation.fail_on_invalid = Some(flag);
        }
        Ok(())
    }

    fn resolve(file: PrismConfigFile) -> Result<Self> {
        let defaults = Self::default();
        let log_level = match file.log.level {
            Some(level) => level.parse::<Level>().map_err(|_| {
                PrismError::ConfigError(format!("Unknown log level '{}'", level))
            })?,
            None => defaults.log_level,
        };

        Ok(Self {
            log_level,
            fail_on_invalid: file
                .validation
                .fail_on_invalid
                .unwrap_or(defaults.fail_on_invalid),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
