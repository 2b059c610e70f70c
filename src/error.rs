//! Error types and handling for the Tourcast application

use thiserror::Error;

/// Main error type for the Tourcast application
///
/// The ranking core itself never surfaces errors - unknown destinations and
/// empty buckets resolve to fallback data - so these variants cover the
/// edges: configuration, data loading, inference transport and request
/// validation.
#[derive(Error, Debug)]
pub enum TourcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Inference collaborator errors
    #[error("Inference error: {message}")]
    Inference { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Catalog or city database loading errors
    #[error("Data error: {message}")]
    Data { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TourcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new inference error
    pub fn inference<S: Into<String>>(message: S) -> Self {
        Self::Inference {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new data error
    pub fn data<S: Into<String>>(message: S) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourcastError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TourcastError::Inference { .. } => {
                "Unable to reach the inference service. Please check your internet connection."
                    .to_string()
            }
            TourcastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TourcastError::Data { .. } => {
                "Failed to load application data. Please check the data files.".to_string()
            }
            TourcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TourcastError::config("missing API key");
        assert!(matches!(config_err, TourcastError::Config { .. }));

        let inference_err = TourcastError::inference("connection failed");
        assert!(matches!(inference_err, TourcastError::Inference { .. }));

        let validation_err = TourcastError::validation("missing destination");
        assert!(matches!(validation_err, TourcastError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = TourcastError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let inference_err = TourcastError::inference("test");
        assert!(inference_err.user_message().contains("Unable to reach"));

        let validation_err = TourcastError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let tourcast_err: TourcastError = io_err.into();
        assert!(matches!(tourcast_err, TourcastError::Io { .. }));
    }
}
