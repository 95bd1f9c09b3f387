//! TOML-based planner configuration.
//!
//! Holds the tunable constants of the plan generator:
//! - continuous focus before a break is due
//! - break length and label
//! - where the morning/afternoon/evening thirds of the window split
//!
//! Stored at `~/.config/dayplan/config.toml` unless a path is given.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Allowed break length (minutes).
pub const BREAK_MINUTES_RANGE: std::ops::RangeInclusive<i64> = 10..=15;

/// Planner configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Continuous focus (minutes) after which a break becomes due.
    #[serde(default = "default_focus_threshold")]
    pub focus_threshold_minutes: i64,
    /// Break length (minutes), 10-15.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
    #[serde(default = "default_break_label")]
    pub break_label: String,
    /// Fraction of the window that counts as morning.
    #[serde(default = "default_morning_end")]
    pub morning_end_ratio: f64,
    /// Fraction of the window after which evening starts.
    #[serde(default = "default_afternoon_end")]
    pub afternoon_end_ratio: f64,
}

fn default_focus_threshold() -> i64 {
    90
}
fn default_break_minutes() -> i64 {
    15
}
fn default_break_label() -> String {
    "Break".into()
}
fn default_morning_end() -> f64 {
    1.0 / 3.0
}
fn default_afternoon_end() -> f64 {
    2.0 / 3.0
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            focus_threshold_minutes: default_focus_threshold(),
            break_minutes: default_break_minutes(),
            break_label: default_break_label(),
            morning_end_ratio: default_morning_end(),
            afternoon_end_ratio: default_afternoon_end(),
        }
    }
}

impl PlannerConfig {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(crate::data_dir()?.join("config.toml"))
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a value is
    /// out of range.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: PlannerConfig = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults when the file
    /// is missing or unusable.
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unusable planner config");
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if self.focus_threshold_minutes <= 0 {
            return Err(invalid(
                "focus_threshold_minutes",
                format!("must be positive, got {}", self.focus_threshold_minutes),
            ));
        }
        if !BREAK_MINUTES_RANGE.contains(&self.break_minutes) {
            return Err(invalid(
                "break_minutes",
                format!(
                    "must be within {}-{}, got {}",
                    BREAK_MINUTES_RANGE.start(),
                    BREAK_MINUTES_RANGE.end(),
                    self.break_minutes
                ),
            ));
        }
        if self.break_label.trim().is_empty() {
            return Err(invalid("break_label", "must not be empty".into()));
        }
        let ordered = 0.0 < self.morning_end_ratio
            && self.morning_end_ratio < self.afternoon_end_ratio
            && self.afternoon_end_ratio < 1.0;
        if !ordered {
            return Err(invalid(
                "morning_end_ratio",
                format!(
                    "expected 0 < morning ({}) < afternoon ({}) < 1",
                    self.morning_end_ratio, self.afternoon_end_ratio
                ),
            ));
        }
        Ok(())
    }
}
