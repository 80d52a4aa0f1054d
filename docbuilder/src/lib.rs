//! Live API documentation from HTTP tests.
//!
//! The `docbuilder` crate wraps an HTTP test client and records what each
//! test call does: the method and path, the payload sent, the status
//! expected and the bodies observed. The records are rendered as
//! [apidoc](https://apidocjs.com) comment blocks and handed to the `apidoc`
//! generator.
//!
//! ## Features
//!
//! - **Fluent recorder**: verb calls open a record, `with_*` calls fill it
//!   in, `commit` moves it into the output sequence
//! - **Request assertions**: status and header-pattern expectations checked
//!   when the request is sent
//! - **Pure rendering**: committed records render to the same text every time
//! - **Generator hand-off**: write the docs file and run `apidoc` on it
//!
//! ## Example
//!
//! ```rust,ignore
//! use docbuilder::DocBuilder;
//!
//! let mut docs = DocBuilder::from_url("http://localhost:3000")?;
//!
//! docs.get("/api/user")
//!     .with_name("GetCSRF")?
//!     .with_group("User")?
//!     .with_description("returns session csrfToken")?
//!     .set_header("Accept", "application/json")?
//!     .expect_header("Content-Type", "json")?
//!     .expect_status(200)?;
//!
//! let response = docs.send().await?;
//! docs.with_success_example(response.into_example())?.commit()?;
//!
//! docs.to_file("./genDoc/userDoc.js").await?;
//! ```

pub mod error;
pub mod method;
pub mod output;
pub mod record;
pub mod recorder;
pub mod render;
pub mod status;

// Re-exports for convenience
pub use error::{
    AssertionError, ClientError, ConfigError, DocBuilderError, RecorderError, RenderError,
    SinkError,
};
pub use method::RestMethod;
pub use output::{write_docs, ApidocCommand, GeneratorOutput};
pub use record::EndpointRecord;
pub use recorder::{DocBuilder, DocBuilderConfig, RecordedResponse};
pub use render::{pretty_json, render};
pub use status::StatusClass;
