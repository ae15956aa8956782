//! Configuration loading and validation for promptslider.
//!
//! Loads configuration from `~/.promptslider/config.toml` with environment
//! variable overrides. A missing file means defaults, which reproduce the
//! standard `[0.0, 2.0]` / `1.0` / one-digit behaviour.

use promptslider_core::{StrengthPolicy, DEFAULT_MAX_LABEL_CHARS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.promptslider/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Strength range, default, and formatting
    #[serde(default)]
    pub strength: StrengthConfig,

    /// Slider panel display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthConfig {
    #[serde(default = "default_min")]
    pub min: f64,

    #[serde(default = "default_max")]
    pub max: f64,

    /// Strength for labels without a usable value
    #[serde(default = "default_strength")]
    pub default: f64,

    /// Fractional digits in formatted output
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Slider quantization step
    #[serde(default = "default_step")]
    pub step: f64,
}

fn default_min() -> f64 {
    0.0
}
fn default_max() -> f64 {
    2.0
}
fn default_strength() -> f64 {
    1.0
}
fn default_precision() -> usize {
    1
}
fn default_step() -> f64 {
    0.1
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            default: default_strength(),
            precision: default_precision(),
            step: default_step(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Labels longer than this are shortened with an ellipsis
    #[serde(default = "default_max_label_chars")]
    pub max_label_chars: usize,
}

fn default_max_label_chars() -> usize {
    DEFAULT_MAX_LABEL_CHARS
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_label_chars: default_max_label_chars(),
        }
    }
}

impl SliderConfig {
    /// Load configuration from the default path (~/.promptslider/config.toml).
    ///
    /// Environment variables override the file:
    /// - `PROMPTSLIDER_MIN_STRENGTH`
    /// - `PROMPTSLIDER_MAX_STRENGTH`
    /// - `PROMPTSLIDER_DEFAULT_STRENGTH`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_overrides(&Self::config_path())
    }

    /// Load from `path`, then apply environment overrides and validate.
    pub fn load_with_overrides(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `PROMPTSLIDER_*` overrides using `lookup` to read variables.
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: [(&str, &mut f64); 3] = [
            ("PROMPTSLIDER_MIN_STRENGTH", &mut self.strength.min),
            ("PROMPTSLIDER_MAX_STRENGTH", &mut self.strength.max),
            ("PROMPTSLIDER_DEFAULT_STRENGTH", &mut self.strength.default),
        ];
        for (key, slot) in overrides {
            if let Some(raw) = lookup(key) {
                *slot = raw.trim().parse().map_err(|_| {
                    ConfigError::ValidationError(format!("{key} must be a number, got '{raw}'"))
                })?;
                tracing::debug!(key, value = *slot, "Applied environment override");
            }
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".promptslider")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// The strength policy described by this configuration.
    pub fn policy(&self) -> StrengthPolicy {
        StrengthPolicy {
            min: self.strength.min,
            max: self.strength.max,
            default: self.strength.default,
            precision: self.strength.precision,
            step: self.strength.step,
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy()
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.display.max_label_chars < 2 {
            return Err(ConfigError::ValidationError(
                "display.max_label_chars must be at least 2".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
