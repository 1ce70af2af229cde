//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the wirebox container
///
/// Errors are fail-fast: nothing in the construction pipeline retries or
/// returns partial results. Every failure propagates synchronously to the
/// caller of `resolve`/`build`.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or incomplete service definition
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem
        message: String,
    },

    /// A named service could not be resolved to an instance
    #[error("Service '{service}' cannot be resolved: {message}")]
    ServiceResolution {
        /// The service (or class) name that failed to resolve
        service: String,
        /// Description of the resolution failure
        message: String,
    },

    /// An argument specification is missing or malformed
    #[error("Argument error: {message}")]
    Argument {
        /// Description of the argument problem
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a service resolution error
    pub fn service_resolution<N: Into<String>, S: Into<String>>(service: N, message: S) -> Self {
        Self::ServiceResolution {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create an argument error
    pub fn argument<S: Into<String>>(message: S) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Create an argument error naming the argument's position
    pub fn argument_at<S: std::fmt::Display>(position: usize, message: S) -> Self {
        Self::Argument {
            message: format!("{message} (argument at position {position})"),
        }
    }
}
