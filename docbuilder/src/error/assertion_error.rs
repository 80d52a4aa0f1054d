//! Failed response expectations.

use thiserror::Error;

/// A status or header expectation that did not hold for the response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// The response status differs from the expected one.
    #[error("expected status {expected}, got {actual}")]
    Status {
        /// The status registered with `expect_status`.
        expected: u16,
        /// The status the server returned.
        actual: u16,
    },

    /// A header is missing or does not match its pattern.
    #[error("expected header `{name}` to match /{pattern}/, got {}", display_actual(actual))]
    Header {
        /// Header name.
        name: String,
        /// The regular expression the value had to match.
        pattern: String,
        /// The received value, or `None` if the header was absent.
        actual: Option<String>,
    },
}

fn display_actual(actual: &Option<String>) -> String {
    match actual {
        Some(value) => format!("{value:?}"),
        None => "no such header".to_string(),
    }
}

impl AssertionError {
    /// Returns the status the server actually returned, if this is a
    /// status mismatch.
    pub fn actual_status(&self) -> Option<u16> {
        match self {
            Self::Status { actual, .. } => Some(*actual),
            Self::Header { .. } => None,
        }
    }
}
