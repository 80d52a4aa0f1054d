//! Assertions registered on a pending request.

use regex::Regex;

use crate::error::AssertionError;
use crate::recorder::RecordedResponse;

/// One expectation, checked once the response arrives.
#[derive(Debug, Clone)]
pub(crate) enum Expectation {
    Status(u16),
    Header { name: String, pattern: Regex },
}

impl Expectation {
    pub(crate) fn check(&self, response: &RecordedResponse) -> Result<(), AssertionError> {
        match self {
            Self::Status(expected) => {
                if response.status() == *expected {
                    Ok(())
                } else {
                    Err(AssertionError::Status {
                        expected: *expected,
                        actual: response.status(),
                    })
                }
            }
            Self::Header { name, pattern } => match response.header(name) {
                Some(value) if pattern.is_match(value) => Ok(()),
                actual => Err(AssertionError::Header {
                    name: name.clone(),
                    pattern: pattern.as_str().to_string(),
                    actual: actual.map(str::to_string),
                }),
            },
        }
    }
}

/// Checks `expectations` in registration order, stopping at the first failure.
pub(crate) fn check_all(
    expectations: &[Expectation],
    response: &RecordedResponse,
) -> Result<(), AssertionError> {
    expectations.iter().try_for_each(|e| e.check(response))
}
