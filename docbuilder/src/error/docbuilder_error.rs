//! Top-level doc builder error type.

use super::{ConfigError, RecorderError, RenderError, SinkError};
use thiserror::Error;

/// Top-level error type for the doc builder.
///
/// Record-building calls return [`RecorderError`] directly. This enum is
/// what [`DocBuilder::to_file`](crate::DocBuilder::to_file) returns, and
/// what callers can collect everything into with `?`.
///
/// ## Examples
///
/// ```rust,ignore
/// use docbuilder::DocBuilderError;
///
/// match builder.to_file("./genDoc/userDoc.js").await {
///     Ok(output) => println!("{}", output.stdout),
///     Err(DocBuilderError::Render(e)) => eprintln!("bad example value: {e}"),
///     Err(DocBuilderError::Sink(e)) => eprintln!("apidoc step failed: {e}"),
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum DocBuilderError {
    /// Recorder misuse or a failed request/assertion.
    #[error(transparent)]
    Recorder(#[from] RecorderError),

    /// A committed record could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Writing the docs or running the generator failed.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
