//! Error types for promptslider.
//!
//! The formatting pipeline itself never fails; these errors cover the
//! operations around it that can (encoding a session, validating a
//! strength policy, parsing `label=value` assignments).

use thiserror::Error;

/// The top-level error type for all promptslider operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid strength for '{label}': {value}")]
    InvalidStrength { label: String, value: f64 },

    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    #[error("Invalid assignment '{0}', expected label=value")]
    InvalidAssignment(String),

    #[error("Invalid strength policy: {0}")]
    InvalidPolicy(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
