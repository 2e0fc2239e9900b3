//! Error types for the dashboard client

use thiserror::Error;

/// Core error type for dashboard configuration operations
#[derive(Error, Debug)]
pub enum DashError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failures (connection refused, DNS, reset)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success HTTP status from the telemetry server
    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// Request did not complete in time
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Preference storage errors
    #[error("Preference error: {0}")]
    Preference(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashError>;

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for DashError {
    fn from(err: toml::de::Error) -> Self {
        DashError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for DashError {
    fn from(err: toml::ser::Error) -> Self {
        DashError::Serialization(err.to_string())
    }
}
