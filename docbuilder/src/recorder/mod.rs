//! Endpoint recording.
//!
//! The [`DocBuilder`] wraps a `reqwest` client and shadows each fluent call
//! into an [`EndpointRecord`](crate::EndpointRecord). Requests are awaited
//! with [`DocBuilder::send`]; the returned [`RecordedResponse`] feeds the
//! success and error examples.

mod config;
mod doc_builder;
mod expectation;
mod response;

pub use config::{DocBuilderConfig, DEFAULT_APIDOC_PROGRAM, DEFAULT_OUTPUT_DIR_NAME};
pub use doc_builder::DocBuilder;
pub use response::RecordedResponse;
