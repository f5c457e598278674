//! Error types and handling for `Packwise`

use thiserror::Error;

/// Main error type for the `Packwise` application
#[derive(Error, Debug)]
pub enum PackwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External service errors (geocoding, weather, chat completion)
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Persistent store errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl PackwiseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Whether a local fallback exists for this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PackwiseError::Api { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PackwiseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PackwiseError::Api { .. } => {
                "An external service was unavailable, so local recommendations were used."
                    .to_string()
            }
            PackwiseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PackwiseError::Storage { .. } => {
                "Saving or loading packing lists failed. You may need to clear your data directory."
                    .to_string()
            }
            PackwiseError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            PackwiseError::General { message } => message.clone(),
        }
    }
}
