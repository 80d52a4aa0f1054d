//! Builder configuration errors.

use thiserror::Error;

/// Errors in doc builder configuration.
///
/// These occur while setting up a [`DocBuilder`](crate::DocBuilder),
/// before any request is recorded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A default header name or value was rejected.
    #[error("Invalid default header `{name}`: {message}")]
    InvalidHeader {
        /// The header name as given.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A required configuration value is empty.
    #[error("Configuration value `{field}` must not be empty")]
    Empty {
        /// The name of the empty field.
        field: &'static str,
    },
}

impl ConfigError {
    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
