//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP layer the recorder drives.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed due to network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request path could not be joined onto the base URL.
    #[error("Invalid request URL for path `{path}`: {source}")]
    InvalidUrl {
        /// The path passed to the verb call.
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl ClientError {
    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout(),
            Self::InvalidUrl { .. } => false,
        }
    }

    /// Returns `true` if the server could not be reached.
    pub fn is_connect(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect(),
            Self::InvalidUrl { .. } => false,
        }
    }
}
