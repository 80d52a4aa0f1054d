//! Doc block rendering errors.

use thiserror::Error;

/// A committed record could not be rendered.
///
/// Rendering is all-or-nothing: the first failure aborts the whole render
/// and no partial text is returned.
#[derive(Debug, Error)]
pub enum RenderError {
    /// An example value could not be serialized.
    #[error("Failed to serialize {section} example for {endpoint}: {source}")]
    Serialize {
        /// Label of the record being rendered, e.g. `GET /api/user`.
        endpoint: String,
        /// Which example failed (`request`, `success`, `error`).
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Writing into the output buffer failed.
    #[error("Failed to format doc block for {endpoint}")]
    Format {
        /// Label of the record being rendered.
        endpoint: String,
        #[source]
        source: std::fmt::Error,
    },
}

impl RenderError {
    /// Returns the label of the record that failed to render.
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Serialize { endpoint, .. } | Self::Format { endpoint, .. } => endpoint,
        }
    }
}
