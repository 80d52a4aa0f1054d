//! Errors raised by the fluent recorder.

use thiserror::Error;

use super::{AssertionError, ClientError};

/// Errors from record-building calls and from sending the pending request.
///
/// [`RecorderError::NoCurrentRecord`] is programmer misuse (a modifier or
/// `commit` with no open record). It never mutates the committed sequence.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// A modifier or `commit` was called before any verb call, or after
    /// `commit` and before the next verb call.
    #[error("No open endpoint record for `{operation}`; call a verb method first")]
    NoCurrentRecord {
        /// The recorder call that was attempted.
        operation: &'static str,
    },

    /// The pending request was already sent and cannot be modified or resent.
    #[error("Request for {endpoint} was already sent")]
    RequestAlreadySent {
        /// Label of the open record, e.g. `GET /api/user`.
        endpoint: String,
    },

    /// Header name or value rejected by the HTTP layer.
    #[error("Invalid header `{name}`: {message}")]
    InvalidHeader {
        /// The header name as given.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// A header expectation pattern is not a valid regular expression.
    #[error("Invalid header pattern for `{name}`: {source}")]
    InvalidPattern {
        /// The header the pattern was meant for.
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The request payload could not be converted to JSON.
    #[error("Request payload is not JSON-serializable: {0}")]
    Payload(#[source] serde_json::Error),

    /// An expectation registered on the request did not hold.
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// The request could not be completed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl RecorderError {
    /// Creates a no-current-record error for `operation`.
    pub fn no_current_record(operation: &'static str) -> Self {
        Self::NoCurrentRecord { operation }
    }

    /// Returns `true` if this error is recorder misuse rather than a
    /// runtime failure of the request under test.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::NoCurrentRecord { .. } | Self::RequestAlreadySent { .. }
        )
    }
}
