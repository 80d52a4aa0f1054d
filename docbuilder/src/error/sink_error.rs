//! Errors from writing docs and invoking the documentation generator.

use std::path::PathBuf;

use thiserror::Error;

/// Failures after rendering: writing the text out or running `apidoc`.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Writing the rendered docs file failed.
    #[error("Failed to write docs to '{}': {source}", path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generator process could not be started.
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The generator ran but exited unsuccessfully.
    #[error("Documentation generator exited with {}: {stderr}", display_status(status))]
    GeneratorFailed {
        /// Exit code, or `None` if the process was killed by a signal.
        status: Option<i32>,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}

fn display_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no exit status".to_string(),
    }
}
