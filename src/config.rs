//! App configuration persisted as TOML in the `.credscope` directory.
//!
//! The config carries the applicant input bounds shown by the form and
//! optional overrides for the fitted artifact locations. A missing file means
//! defaults; out-of-order bounds are normalized rather than rejected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;

/// Filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory could be resolved or created.
    #[error("Failed to prepare config directory: {0}")]
    ConfigDir(#[from] app_dirs::AppDirError),
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write the config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse the TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize the config to TOML.
    #[error("Failed to serialize config for {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
}

/// Closed range for one numeric applicant input, in INR.
///
/// Config keys: `min`, `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound.
    pub max: f64,
}

impl InputRange {
    /// Whether `value` lies within the closed range.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp `value` into the closed range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn normalized(mut self) -> Self {
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        self
    }
}

/// Bounds enforced on the applicant inputs.
///
/// Config keys: `income`, `debt`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    /// Annual income bounds (INR).
    #[serde(default = "default_income_range")]
    pub income: InputRange,
    /// Total debt bounds (INR).
    #[serde(default = "default_debt_range")]
    pub debt: InputRange,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            income: default_income_range(),
            debt: default_debt_range(),
        }
    }
}

fn default_income_range() -> InputRange {
    InputRange {
        min: 200_000.0,
        max: 10_000_000.0,
    }
}

fn default_debt_range() -> InputRange {
    InputRange {
        min: 50_000.0,
        max: 4_000_000.0,
    }
}

/// Optional overrides for where fitted artifacts are loaded from.
///
/// Config keys: `preprocessor`, `model`. Unset entries fall back to the
/// models directory and then to the bundled artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Path to a re-fitted preprocessor JSON file.
    #[serde(default)]
    pub preprocessor: Option<PathBuf>,
    /// Path to a re-fitted classifier JSON file.
    #[serde(default)]
    pub model: Option<PathBuf>,
}

/// Aggregate application settings loaded from disk.
///
/// Config keys (TOML): `bounds`, `artifacts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Applicant input bounds.
    #[serde(default)]
    pub bounds: InputBounds,
    /// Artifact location overrides.
    #[serde(default)]
    pub artifacts: ArtifactPaths,
}

impl AppConfig {
    fn normalized(mut self) -> Self {
        self.bounds.income = self.bounds.income.normalized();
        self.bounds.debt = self.bounds.debt.normalized();
        self
    }
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if the file is missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from_path(&config_path()?)
}

/// Load configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.normalized())
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Persist configuration to an explicit path.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let text = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, text).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
