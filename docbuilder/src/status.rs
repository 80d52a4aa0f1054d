//! Status code classification.

/// Bucket an observed status code is documented under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// `200..=299`
    Success,
    /// `400..=499`
    Error,
    /// Anything else (1xx, 3xx, 5xx, or out of range).
    Other,
}

impl StatusClass {
    /// Classifies a status code by numeric range.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use docbuilder::StatusClass;
    ///
    /// assert_eq!(StatusClass::classify(204), StatusClass::Success);
    /// assert_eq!(StatusClass::classify(404), StatusClass::Error);
    /// assert_eq!(StatusClass::classify(500), StatusClass::Other);
    /// ```
    pub fn classify(code: u16) -> Self {
        match code {
            200..=299 => Self::Success,
            400..=499 => Self::Error,
            _ => Self::Other,
        }
    }
}

/// Returns the canonical reason phrase for a status code, if it has one.
pub fn canonical_reason(code: u16) -> Option<&'static str> {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
}

/// Formats a status line such as `HTTP/1.1 404 Not Found`.
pub fn status_line(code: u16) -> String {
    match canonical_reason(code) {
        Some(reason) => format!("HTTP/1.1 {code} {reason}"),
        None => format!("HTTP/1.1 {code}"),
    }
}
