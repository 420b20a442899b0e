//! Error types and handling for `CommuteOS`

use thiserror::Error;

use crate::models::TravelMode;

/// Main error type for the `CommuteOS` application
#[derive(Error, Debug)]
pub enum CommuteError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Provider communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// The routing provider answered, but had no route for the pair
    #[error("No {mode} route found")]
    NoRoute { mode: TravelMode },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Location store and cache errors
    #[error("Store error: {message}")]
    Store { message: String },

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

impl CommuteError {
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

    #[must_use]
    pub fn no_route(mode: TravelMode) -> Self {
        Self::NoRoute { mode }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CommuteError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            CommuteError::Api { .. } => {
                "Unable to reach the weather or routing services. Please check your internet connection."
                    .to_string()
            }
            CommuteError::NoRoute { mode } => {
                format!("No {mode} route between home and work.")
            }
            CommuteError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            CommuteError::Store { .. } => {
                "Saved locations could not be read or written. Please check the data directory."
                    .to_string()
            }
            CommuteError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            CommuteError::General { message } => message.clone(),
        }
    }
}

/// Find the classified error inside an `anyhow` chain, if any
#[must_use]
pub fn classify(err: &anyhow::Error) -> Option<&CommuteError> {
    err.chain().find_map(|cause| cause.downcast_ref::<CommuteError>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_creation() {
        let config_err = CommuteError::config("missing base url");
        assert!(matches!(config_err, CommuteError::Config { .. }));

        let api_err = CommuteError::api("connection failed");
        assert!(matches!(api_err, CommuteError::Api { .. }));

        let validation_err = CommuteError::validation("invalid coordinates");
        assert!(matches!(validation_err, CommuteError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = CommuteError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = CommuteError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let validation_err = CommuteError::validation("latitude 91");
        assert!(validation_err.user_message().contains("latitude 91"));

        let route_err = CommuteError::no_route(TravelMode::Cycling);
        assert_eq!(route_err.to_string(), "No cycling route found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let commute_err: CommuteError = io_err.into();
        assert!(matches!(commute_err, CommuteError::Io { .. }));
    }

    #[test]
    fn test_classify_through_context() {
        let err = Err::<(), _>(CommuteError::no_route(TravelMode::Driving))
            .context("route lookup")
            .unwrap_err();
        assert!(matches!(
            classify(&err),
            Some(CommuteError::NoRoute {
                mode: TravelMode::Driving
            })
        ));

        let plain = anyhow::anyhow!("boom");
        assert!(classify(&plain).is_none());
    }
}
