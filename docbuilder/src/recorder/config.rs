//! Configuration for a [`DocBuilder`].

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::error::ConfigError;
use crate::recorder::DocBuilder;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Program invoked by [`DocBuilder::to_file`] to generate HTML docs.
pub const DEFAULT_APIDOC_PROGRAM: &str = "apidoc";

/// Directory, relative to the docs file, the generator writes into.
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "genDocs";

/// Builder for configuring a [`DocBuilder`].
///
/// ## Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use docbuilder::DocBuilder;
///
/// let builder = DocBuilder::builder(Url::parse("http://localhost:3000")?)
///     .timeout(Duration::from_secs(10))
///     .default_header("Accept", "application/json")?
///     .output_dir_name("html")
///     .build()?;
/// ```
#[derive(Debug)]
pub struct DocBuilderConfig {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
    apidoc_program: String,
    output_dir_name: String,
}

impl DocBuilderConfig {
    pub(crate) fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
            apidoc_program: DEFAULT_APIDOC_PROGRAM.to_string(),
            output_dir_name: DEFAULT_OUTPUT_DIR_NAME.to_string(),
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent with every recorded request.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name_str = name.as_ref();
        let header_name =
            HeaderName::try_from(name_str).map_err(|e| ConfigError::invalid_header(name_str, e))?;
        let header_value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(name_str, e))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Sets the documentation generator executable.
    pub fn apidoc_program(mut self, program: impl Into<String>) -> Self {
        self.apidoc_program = program.into();
        self
    }

    /// Sets the generator output directory name, relative to the docs file.
    pub fn output_dir_name(mut self, name: impl Into<String>) -> Self {
        self.output_dir_name = name.into();
        self
    }

    /// Builds the [`DocBuilder`].
    ///
    /// ## Errors
    ///
    /// Returns an error if a configured value is empty or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<DocBuilder, ConfigError> {
        if self.apidoc_program.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "apidoc_program",
            });
        }
        if self.output_dir_name.trim().is_empty() {
            return Err(ConfigError::Empty {
                field: "output_dir_name",
            });
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .build()?;

        Ok(DocBuilder::from_parts(
            client,
            self.base_url,
            self.apidoc_program,
            self.output_dir_name,
        ))
    }
}
