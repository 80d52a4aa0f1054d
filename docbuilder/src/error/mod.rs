//! Layered error types for the doc builder.
//!
//! - [`DocBuilderError`] - Top-level error for the render-and-write pipeline
//! - [`RecorderError`] - Misuse of the fluent recorder and failed requests
//! - [`AssertionError`] - A status or header expectation did not hold
//! - [`ClientError`] - HTTP transport failures
//! - [`RenderError`] - A record could not be turned into a doc block
//! - [`SinkError`] - Writing the docs file or running the generator failed
//! - [`ConfigError`] - Invalid builder configuration

mod assertion_error;
mod client_error;
mod config_error;
mod docbuilder_error;
mod recorder_error;
mod render_error;
mod sink_error;

pub use assertion_error::AssertionError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use docbuilder_error::DocBuilderError;
pub use recorder_error::RecorderError;
pub use render_error::RenderError;
pub use sink_error::SinkError;
