//! Error types and handling for Enyaq
//!
//! This module defines the error types used throughout the connector,
//! providing consistent error handling and reporting.

use thiserror::Error;

/// Result type alias for Enyaq operations
pub type Result<T> = std::result::Result<T, EnyaqError>;

/// Main error type for Enyaq
#[derive(Debug, Error)]
pub enum EnyaqError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Errors in data received from the manufacturer API
    #[error("API error: {message}")]
    Api { message: String },

    /// HTTP/Web server errors
    #[error("Web server error: {message}")]
    Web { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Validation errors (invalid arguments, malformed fields)
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl EnyaqError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        EnyaqError::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        EnyaqError::Api {
            message: message.into(),
        }
    }

    /// Create a new web error
    pub fn web<S: Into<String>>(message: S) -> Self {
        EnyaqError::Web {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        EnyaqError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        EnyaqError::Io {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        EnyaqError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for EnyaqError {
    fn from(err: std::io::Error) -> Self {
        EnyaqError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for EnyaqError {
    fn from(err: serde_yaml::Error) -> Self {
        EnyaqError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnyaqError {
    fn from(err: serde_json::Error) -> Self {
        EnyaqError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for EnyaqError {
    fn from(err: chrono::ParseError) -> Self {
        EnyaqError::validation("datetime", &err.to_string())
    }
}
