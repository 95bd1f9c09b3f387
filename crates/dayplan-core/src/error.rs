//! Core error types for dayplan-core.
//!
//! The plan generator itself only ever fails with [`PlanError`]; the other
//! enums cover the board, task drafts and configuration that sit around it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Plan generation errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Board-related errors
    #[error("Board error: {0}")]
    Board(#[from] BoardError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Precondition failures of the time arithmetic and the plan generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A time string is not a 24-hour "HH:MM" value
    #[error("Invalid time '{input}': expected HH:MM (00:00-23:59)")]
    InvalidTimeFormat { input: String },

    /// Day end does not come strictly after day start
    #[error("Invalid day window: end ({end}) must be after start ({start})")]
    InvalidWindow { start: String, end: String },
}

/// Board-specific errors.
#[derive(Error, Debug)]
pub enum BoardError {
    /// No task with the given id
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Window or time input rejected
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Task draft rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The persistence port failed
    #[error("Board store failed: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BoardError {
    /// Wrap a store backend failure.
    pub fn store<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        BoardError::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Home or config directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is blank
    #[error("Field '{0}' must not be empty")]
    Empty(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_error_messages_name_the_input() {
        let err = PlanError::InvalidTimeFormat {
            input: "8.00".to_string(),
        };
        assert!(err.to_string().contains("8.00"));

        let err = PlanError::InvalidWindow {
            start: "18:00".to_string(),
            end: "08:00".to_string(),
        };
        assert!(err.to_string().contains("18:00"));
        assert!(err.to_string().contains("08:00"));
    }

    #[test]
    fn board_error_is_transparent_over_plan_error() {
        let inner = PlanError::InvalidTimeFormat {
            input: "x".to_string(),
        };
        let err: BoardError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn core_error_wraps_config_error() {
        let err: CoreError = ConfigError::InvalidValue {
            key: "break_minutes".to_string(),
            message: "too short".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn core_error_wraps_toml_error() {
        let parse = toml::from_str::<toml::Table>("break_minutes = ").unwrap_err();
        let err: CoreError = parse.into();
        assert!(matches!(err, CoreError::Toml(_)));
        assert!(err.to_string().starts_with("TOML error:"));
    }
}
