//! The fluent recorder.
//!
//! [`DocBuilder`] mirrors the calls a test makes against an HTTP API and
//! shadows each call into an [`EndpointRecord`]. A verb call opens a record,
//! modifiers fill it in, [`DocBuilder::send`] performs the request and
//! [`DocBuilder::commit`] moves the record into the committed sequence.

use std::path::Path;

use regex::Regex;
use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn, Span};
use url::Url;

use crate::error::{ClientError, ConfigError, DocBuilderError, RecorderError, RenderError};
use crate::method::RestMethod;
use crate::output::{write_docs, ApidocCommand, GeneratorOutput};
use crate::record::EndpointRecord;
use crate::recorder::config::DocBuilderConfig;
use crate::recorder::expectation::{check_all, Expectation};
use crate::recorder::RecordedResponse;
use crate::render::render;

/// The record under construction, if any.
#[derive(Debug)]
enum Slot {
    Empty,
    Open(OpenRecord),
}

#[derive(Debug)]
struct OpenRecord {
    record: EndpointRecord,
    request: PendingRequest,
    expectations: Vec<Expectation>,
}

#[derive(Debug)]
enum PendingRequest {
    Ready { url: Url, builder: reqwest::RequestBuilder },
    /// The path did not resolve against the base URL; reported by `send`.
    Unresolved(ClientError),
    Sent,
}

/// Records API test calls and renders them as apidoc comment blocks.
///
/// At most one record is open at a time. Record-building calls fail with
/// [`RecorderError::NoCurrentRecord`] when no record is open, and never
/// touch the committed sequence when they fail.
///
/// ## Examples
///
/// ```rust,ignore
/// use docbuilder::DocBuilder;
///
/// let mut docs = DocBuilder::from_url("http://localhost:3000")?;
///
/// docs.get("/api/user")
///     .with_name("GetCSRF")?
///     .with_group("User")?
///     .set_header("Accept", "application/json")?
///     .expect_header("Content-Type", "json")?
///     .expect_status(200)?;
///
/// let response = docs.send().await?;
/// docs.with_success_example(response.into_example())?.commit()?;
///
/// docs.to_file("./genDoc/userDoc.js").await?;
/// ```
#[derive(Debug)]
pub struct DocBuilder {
    client: reqwest::Client,
    base_url: Url,
    apidoc_program: String,
    output_dir_name: String,
    current: Slot,
    records: Vec<EndpointRecord>,
}

impl DocBuilder {
    /// Creates a configuration builder targeting `base_url`.
    pub fn builder(base_url: Url) -> DocBuilderConfig {
        DocBuilderConfig::new(base_url)
    }

    /// Creates a doc builder with default settings.
    ///
    /// ## Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    /// Parses `base_url` and creates a doc builder with default settings.
    pub fn from_url(base_url: &str) -> Result<Self, ConfigError> {
        Self::new(Url::parse(base_url)?)
    }

    pub(crate) fn from_parts(
        client: reqwest::Client,
        base_url: Url,
        apidoc_program: String,
        output_dir_name: String,
    ) -> Self {
        Self {
            client,
            base_url,
            apidoc_program,
            output_dir_name,
            current: Slot::Empty,
            records: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn apidoc_program(&self) -> &str {
        &self.apidoc_program
    }

    pub fn output_dir_name(&self) -> &str {
        &self.output_dir_name
    }

    /// Committed records, in commit order.
    pub fn records(&self) -> &[EndpointRecord] {
        &self.records
    }

    /// The open record, if a verb call has not been committed yet.
    pub fn current(&self) -> Option<&EndpointRecord> {
        match &self.current {
            Slot::Open(open) => Some(&open.record),
            Slot::Empty => None,
        }
    }

    // ---------------------------------------------------------------
    // Verb calls
    // ---------------------------------------------------------------

    /// Opens a record for `method` on `path` and prepares the request.
    ///
    /// An open record that was never committed is discarded.
    pub fn request(&mut self, method: RestMethod, path: impl Into<String>) -> &mut Self {
        let path = path.into();

        if let Slot::Open(previous) = &self.current {
            warn!(
                discarded = %previous.record.label(),
                "Uncommitted endpoint record discarded by new request"
            );
        }

        let request = match endpoint_url(&self.base_url, &path) {
            Ok(url) => PendingRequest::Ready {
                builder: self.client.request(method.into(), url.clone()),
                url,
            },
            Err(source) => PendingRequest::Unresolved(ClientError::InvalidUrl {
                path: path.clone(),
                source,
            }),
        };

        debug!(%method, %path, "Opened endpoint record");
        self.current = Slot::Open(OpenRecord {
            record: EndpointRecord::new(method, path),
            request,
            expectations: Vec::new(),
        });
        self
    }

    pub fn get(&mut self, path: impl Into<String>) -> &mut Self {
        self.request(RestMethod::Get, path)
    }

    pub fn post(&mut self, path: impl Into<String>) -> &mut Self {
        self.request(RestMethod::Post, path)
    }

    pub fn put(&mut self, path: impl Into<String>) -> &mut Self {
        self.request(RestMethod::Put, path)
    }

    pub fn patch(&mut self, path: impl Into<String>) -> &mut Self {
        self.request(RestMethod::Patch, path)
    }

    pub fn delete(&mut self, path: impl Into<String>) -> &mut Self {
        self.request(RestMethod::Delete, path)
    }

    // ---------------------------------------------------------------
    // Request modifiers
    // ---------------------------------------------------------------

    /// Sends `payload` as the JSON request body and records it as the
    /// request example.
    pub fn send_json<T>(&mut self, payload: &T) -> Result<&mut Self, RecorderError>
    where
        T: Serialize + ?Sized,
    {
        let open = self.open_mut("send_json")?;
        open.ensure_unsent()?;
        let value = serde_json::to_value(payload).map_err(RecorderError::Payload)?;

        let method = open.record.method();
        if !method.has_body() {
            warn!(
                %method,
                endpoint = %open.record.endpoint(),
                "JSON payload attached to a bodyless method"
            );
        }
        open.map_request(|builder| builder.json(&value));
        open.record.request_example = Some(value);
        Ok(self)
    }

    /// Sets a request header. Headers are not documented.
    pub fn set_header(
        &mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<&mut Self, RecorderError> {
        let open = self.open_mut("set_header")?;
        open.ensure_unsent()?;

        let name = name.as_ref();
        let invalid = |message: String| RecorderError::InvalidHeader {
            name: name.to_string(),
            message,
        };
        let header_name = HeaderName::try_from(name).map_err(|e| invalid(e.to_string()))?;
        let header_value =
            HeaderValue::try_from(value.as_ref()).map_err(|e| invalid(e.to_string()))?;

        open.map_request(|builder| builder.header(header_name, header_value));
        Ok(self)
    }

    /// Expects the response status to equal `code` and documents it under
    /// the success, error or other bucket by range.
    pub fn expect_status(&mut self, code: u16) -> Result<&mut Self, RecorderError> {
        let open = self.open_mut("expect_status")?;
        open.ensure_unsent()?;

        let class = open.record.record_status(code);
        debug!(code, ?class, "Expecting status");
        open.expectations.push(Expectation::Status(code));
        Ok(self)
    }

    /// Expects header `name` to match the regular expression `pattern`.
    /// The record is not changed.
    ///
    /// A pattern written in slash-delimited form (`/json/`) has the
    /// delimiters stripped.
    pub fn expect_header(
        &mut self,
        name: impl Into<String>,
        pattern: &str,
    ) -> Result<&mut Self, RecorderError> {
        let open = self.open_mut("expect_header")?;
        open.ensure_unsent()?;

        let name = name.into();
        let source = pattern
            .strip_prefix('/')
            .and_then(|p| p.strip_suffix('/'))
            .unwrap_or(pattern);
        let pattern = match Regex::new(source) {
            Ok(pattern) => pattern,
            Err(source) => return Err(RecorderError::InvalidPattern { name, source }),
        };
        open.expectations.push(Expectation::Header { name, pattern });
        Ok(self)
    }

    // ---------------------------------------------------------------
    // Documentation modifiers
    // ---------------------------------------------------------------

    pub fn with_name(&mut self, name: impl Into<String>) -> Result<&mut Self, RecorderError> {
        self.open_mut("with_name")?.record.name = Some(name.into());
        Ok(self)
    }

    pub fn with_title(&mut self, title: impl Into<String>) -> Result<&mut Self, RecorderError> {
        self.open_mut("with_title")?.record.title = Some(title.into());
        Ok(self)
    }

    pub fn with_group(&mut self, group: impl Into<String>) -> Result<&mut Self, RecorderError> {
        self.open_mut("with_group")?.record.group = Some(group.into());
        Ok(self)
    }

    pub fn with_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<&mut Self, RecorderError> {
        self.open_mut("with_description")?.record.description = Some(description.into());
        Ok(self)
    }

    /// Sets the example success body, usually the observed response JSON.
    pub fn with_success_example(&mut self, example: Value) -> Result<&mut Self, RecorderError> {
        self.open_mut("with_success_example")?.record.success_example = Some(example);
        Ok(self)
    }

    /// Sets descriptions for fields of the success example.
    pub fn with_success_field_descriptions<I, K, V>(
        &mut self,
        fields: I,
    ) -> Result<&mut Self, RecorderError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let open = self.open_mut("with_success_field_descriptions")?;
        open.record.success_fields = Some(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        Ok(self)
    }

    pub fn with_error_example(&mut self, example: Value) -> Result<&mut Self, RecorderError> {
        self.open_mut("with_error_example")?.record.error_example = Some(example);
        Ok(self)
    }

    pub fn with_error_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<&mut Self, RecorderError> {
        self.open_mut("with_error_description")?.record.error_description =
            Some(description.into());
        Ok(self)
    }

    // ---------------------------------------------------------------
    // Completion and commit
    // ---------------------------------------------------------------

    /// Sends the pending request and checks every expectation in the order
    /// it was registered.
    ///
    /// The open record is not modified. Use the returned response to call
    /// [`with_success_example`](Self::with_success_example) or
    /// [`with_error_example`](Self::with_error_example).
    ///
    /// ## Errors
    ///
    /// - [`RecorderError::NoCurrentRecord`] if no record is open
    /// - [`RecorderError::RequestAlreadySent`] on a second call
    /// - [`RecorderError::Client`] on transport failure
    /// - [`RecorderError::Assertion`] for the first failed expectation
    #[instrument(
        name = "docbuilder_request",
        skip(self),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub async fn send(&mut self) -> Result<RecordedResponse, RecorderError> {
        let open = self.open_mut("send")?;
        Span::current().record("http.method", open.record.method().to_string().as_str());

        let builder = match std::mem::replace(&mut open.request, PendingRequest::Sent) {
            PendingRequest::Ready { url, builder } => {
                Span::current().record("http.url", url.as_str());
                builder
            }
            PendingRequest::Unresolved(e) => return Err(e.into()),
            PendingRequest::Sent => {
                return Err(RecorderError::RequestAlreadySent {
                    endpoint: open.record.label(),
                });
            }
        };

        let response = builder.send().await.map_err(ClientError::Request)?;
        let status = response.status().as_u16();
        Span::current().record("http.status_code", status);

        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ClientError::Request)?;
        let recorded = RecordedResponse::new(status, headers, body);

        check_all(&open.expectations, &recorded)?;
        debug!(status, "Request completed");
        Ok(recorded)
    }

    /// Moves the open record into the committed sequence and clears the
    /// slot, so the next verb call starts from a fresh request.
    pub fn commit(&mut self) -> Result<&mut Self, RecorderError> {
        match std::mem::replace(&mut self.current, Slot::Empty) {
            Slot::Open(open) => {
                debug!(
                    endpoint = %open.record.label(),
                    committed = self.records.len() + 1,
                    "Committed endpoint record"
                );
                self.records.push(open.record);
                Ok(self)
            }
            Slot::Empty => Err(RecorderError::no_current_record("commit")),
        }
    }

    // ---------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------

    /// Renders every committed record.
    ///
    /// Calling this again returns the same text plus blocks for records
    /// committed since.
    pub fn build(&self) -> Result<String, RenderError> {
        render(&self.records)
    }

    /// Renders the docs, writes them to `path` and runs the documentation
    /// generator on the containing directory.
    ///
    /// ## Errors
    ///
    /// Returns [`DocBuilderError::Render`] if rendering fails (nothing is
    /// written), or [`DocBuilderError::Sink`] if writing or the generator
    /// fails.
    pub async fn to_file(&self, path: impl AsRef<Path>) -> Result<GeneratorOutput, DocBuilderError> {
        let path = path.as_ref();
        let text = self.build()?;
        write_docs(path, &text).await?;

        let command = ApidocCommand::for_file(path, &self.apidoc_program, &self.output_dir_name);
        let output = command.run().await?;
        info!(
            records = self.records.len(),
            output_dir = %command.output_dir().display(),
            "Generated API documentation"
        );
        Ok(output)
    }

    fn open_mut(&mut self, operation: &'static str) -> Result<&mut OpenRecord, RecorderError> {
        match &mut self.current {
            Slot::Open(open) => Ok(open),
            Slot::Empty => Err(RecorderError::no_current_record(operation)),
        }
    }
}

/// Resolves `path` under `base`, keeping any path prefix of `base`.
///
/// `http://host/v1` with `/api/user` gives `http://host/v1/api/user`.
fn endpoint_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(path.trim_start_matches('/'))
}

impl OpenRecord {
    fn ensure_unsent(&self) -> Result<(), RecorderError> {
        match self.request {
            PendingRequest::Sent => Err(RecorderError::RequestAlreadySent {
                endpoint: self.record.label(),
            }),
            _ => Ok(()),
        }
    }

    /// Applies `f` to the pending request builder, if there is one.
    fn map_request(&mut self, f: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder) {
        self.request = match std::mem::replace(&mut self.request, PendingRequest::Sent) {
            PendingRequest::Ready { url, builder } => PendingRequest::Ready {
                url,
                builder: f(builder),
            },
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssertionError;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn offline() -> DocBuilder {
        DocBuilder::from_url("http://localhost:9").unwrap()
    }

    fn assert_no_record(result: Result<&mut DocBuilder, RecorderError>, operation: &str) {
        match result {
            Err(RecorderError::NoCurrentRecord { operation: op }) => assert_eq!(op, operation),
            other => panic!("expected NoCurrentRecord for {operation}, got {other:?}"),
        }
    }

    #[test]
    fn test_modifiers_without_open_record_fail() {
        let mut docs = offline();

        assert_no_record(docs.with_name("a"), "with_name");
        assert_no_record(docs.with_title("a"), "with_title");
        assert_no_record(docs.with_group("a"), "with_group");
        assert_no_record(docs.with_description("a"), "with_description");
        assert_no_record(docs.with_success_example(json!({})), "with_success_example");
        assert_no_record(
            docs.with_success_field_descriptions([("a", "b")]),
            "with_success_field_descriptions",
        );
        assert_no_record(docs.with_error_example(json!({})), "with_error_example");
        assert_no_record(docs.with_error_description("a"), "with_error_description");
        assert_no_record(docs.send_json(&json!({"a": 1})), "send_json");
        assert_no_record(docs.set_header("Accept", "application/json"), "set_header");
        assert_no_record(docs.expect_status(200), "expect_status");
        assert_no_record(docs.expect_header("Content-Type", "json"), "expect_header");
        assert_no_record(docs.commit(), "commit");

        assert!(docs.records().is_empty());
    }

    #[test]
    fn test_modifiers_after_commit_fail() {
        let mut docs = offline();
        docs.get("/a").commit().unwrap();

        assert_no_record(docs.with_name("late"), "with_name");
        assert_eq!(docs.records().len(), 1);
        assert_eq!(docs.records()[0].name(), None);
    }

    #[test]
    fn test_double_commit_fails() {
        let mut docs = offline();
        docs.get("/a");
        docs.commit().unwrap();

        assert_no_record(docs.commit(), "commit");
        assert_eq!(docs.records().len(), 1);
    }

    #[test]
    fn test_records_reflect_modifiers_between_verb_and_commit() {
        let mut docs = offline();

        docs.get("/api/user")
            .with_name("GetUser")
            .unwrap()
            .with_group("User")
            .unwrap();
        docs.commit().unwrap();

        docs.post("/api/login")
            .with_title("Log in")
            .unwrap()
            .send_json(&json!({"user": "ada"}))
            .unwrap()
            .expect_status(401)
            .unwrap()
            .with_error_description("Bad credentials")
            .unwrap();
        docs.commit().unwrap();

        let records = docs.records();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].method(), RestMethod::Get);
        assert_eq!(records[0].endpoint(), "/api/user");
        assert_eq!(records[0].name(), Some("GetUser"));
        assert_eq!(records[0].group(), Some("User"));
        assert_eq!(records[0].title(), None);

        assert_eq!(records[1].method(), RestMethod::Post);
        assert_eq!(records[1].title(), Some("Log in"));
        assert_eq!(records[1].name(), None);
        assert_eq!(records[1].request_example(), Some(&json!({"user": "ada"})));
        assert_eq!(records[1].http_error_code(), Some(401));
        assert_eq!(records[1].http_success_code(), None);
        assert_eq!(records[1].error_description(), Some("Bad credentials"));
    }

    #[test]
    fn test_expect_status_classifies() {
        let mut docs = offline();
        docs.get("/a").expect_status(302).unwrap();

        let current = docs.current().unwrap();
        assert_eq!(current.http_other_code(), Some(302));
        assert_eq!(current.http_success_code(), None);
        assert_eq!(current.http_error_code(), None);
    }

    #[test]
    fn test_set_header_and_expect_header_leave_record_alone() {
        let mut docs = offline();
        docs.get("/a");
        let before = docs.current().unwrap().clone();

        docs.set_header("Accept", "application/json")
            .unwrap()
            .expect_header("Content-Type", "/json/")
            .unwrap();

        assert_eq!(docs.current().unwrap(), &before);
    }

    #[test]
    fn test_invalid_header_and_pattern() {
        let mut docs = offline();
        docs.get("/a");

        assert!(matches!(
            docs.set_header("Bad Header", "x"),
            Err(RecorderError::InvalidHeader { .. })
        ));
        assert!(matches!(
            docs.expect_header("Content-Type", "(json"),
            Err(RecorderError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let root = Url::parse("http://localhost:3000").unwrap();
        let nested = Url::parse("http://localhost:3000/v1").unwrap();
        let slashed = Url::parse("http://localhost:3000/v1/").unwrap();

        assert_eq!(
            endpoint_url(&root, "/api/user").unwrap().as_str(),
            "http://localhost:3000/api/user"
        );
        assert_eq!(
            endpoint_url(&nested, "/api/user").unwrap().as_str(),
            "http://localhost:3000/v1/api/user"
        );
        assert_eq!(
            endpoint_url(&slashed, "api/user?page=2").unwrap().as_str(),
            "http://localhost:3000/v1/api/user?page=2"
        );
        // The base itself is left untouched.
        assert_eq!(nested.path(), "/v1");
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_send_json_on_bodyless_method_warns() {
        let mut docs = offline();
        docs.get("/search").send_json(&json!({"q": "ada"})).unwrap();

        assert_eq!(
            docs.current().unwrap().request_example(),
            Some(&json!({"q": "ada"}))
        );
        assert!(logs_contain("JSON payload attached to a bodyless method"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn test_new_verb_discards_uncommitted_record() {
        let mut docs = offline();
        docs.get("/first").with_name("Lost").unwrap();
        docs.get("/second");

        assert_eq!(docs.current().unwrap().endpoint(), "/second");
        assert_eq!(docs.current().unwrap().name(), None);
        docs.commit().unwrap();

        assert_eq!(docs.records().len(), 1);
        assert_eq!(docs.records()[0].endpoint(), "/second");
        assert!(logs_contain("Uncommitted endpoint record discarded"));
    }

    #[test]
    fn test_build_renders_in_commit_order() {
        let mut docs = offline();
        docs.get("/a").with_name("A").unwrap();
        docs.commit().unwrap();
        docs.get("/b").with_name("B").unwrap();
        docs.commit().unwrap();

        let text = docs.build().unwrap();
        assert!(text.find("@apiName A").unwrap() < text.find("@apiName B").unwrap());
        assert_eq!(docs.build().unwrap(), text);
    }

    #[tokio::test]
    async fn test_send_without_record_fails() {
        let mut docs = offline();
        assert!(matches!(
            docs.send().await,
            Err(RecorderError::NoCurrentRecord { operation: "send" })
        ));
    }

    #[tokio::test]
    async fn test_send_records_nothing_and_returns_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/user"))
            .and(header("accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"csrfToken": "abc"})),
            )
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&mock_server.uri()).unwrap();
        docs.get("/api/user")
            .set_header("Accept", "application/json")
            .unwrap()
            .expect_header("Content-Type", "/json/")
            .unwrap()
            .expect_status(200)
            .unwrap();
        let before = docs.current().unwrap().clone();

        let response = docs.send().await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.json(), Some(&json!({"csrfToken": "abc"})));
        assert_eq!(docs.current().unwrap(), &before);
    }

    #[tokio::test]
    async fn test_send_json_body_reaches_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(json!({"user": "ada", "password": "pw"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&mock_server.uri()).unwrap();
        docs.post("/api/login")
            .send_json(&json!({"user": "ada", "password": "pw"}))
            .unwrap()
            .expect_status(201)
            .unwrap();

        let response = docs.send().await.unwrap();
        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn test_status_assertion_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&mock_server.uri()).unwrap();
        docs.get("/missing").expect_status(200).unwrap();

        let err = docs.send().await.unwrap_err();
        assert!(matches!(
            err,
            RecorderError::Assertion(AssertionError::Status {
                expected: 200,
                actual: 404
            })
        ));
    }

    #[tokio::test]
    async fn test_header_assertion_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&mock_server.uri()).unwrap();
        docs.get("/page").expect_header("Content-Type", "json").unwrap();

        let err = docs.send().await.unwrap_err();
        assert!(matches!(
            err,
            RecorderError::Assertion(AssertionError::Header { .. })
        ));
    }

    #[tokio::test]
    async fn test_second_send_and_late_modifiers_fail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/user/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&mock_server.uri()).unwrap();
        docs.delete("/api/user/1");
        docs.send().await.unwrap();

        assert!(matches!(
            docs.send().await,
            Err(RecorderError::RequestAlreadySent { .. })
        ));
        assert!(matches!(
            docs.set_header("Accept", "*/*"),
            Err(RecorderError::RequestAlreadySent { .. })
        ));
        assert!(matches!(
            docs.expect_status(204),
            Err(RecorderError::RequestAlreadySent { .. })
        ));

        // Documentation modifiers still apply after the response arrives.
        docs.with_description("Deletes a user").unwrap().commit().unwrap();
        assert_eq!(docs.records()[0].description(), Some("Deletes a user"));
    }

    #[tokio::test]
    async fn test_commit_resets_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/a"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&mock_server.uri()).unwrap();
        docs.get("/a");
        docs.send().await.unwrap();
        docs.commit().unwrap();

        docs.get("/a");
        docs.send().await.unwrap();
        docs.commit().unwrap();

        assert_eq!(docs.records().len(), 2);
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_is_kept() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/api/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&format!("{}/v1", mock_server.uri())).unwrap();
        docs.get("/api/user").expect_status(200).unwrap();

        let response = docs.send().await.unwrap();
        assert_eq!(response.json(), Some(&json!({"id": 1})));
        assert_eq!(docs.current().unwrap().endpoint(), "/api/user");
    }

    #[tokio::test]
    async fn test_connection_failure_is_client_error() {
        let mut docs = offline();
        docs.get("/unreachable");

        let err = docs.send().await.unwrap_err();
        assert!(matches!(err, RecorderError::Client(ClientError::Request(_))));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_send_emits_span_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/traced"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let mut docs = DocBuilder::from_url(&mock_server.uri()).unwrap();
        docs.get("/traced");
        docs.send().await.unwrap();

        assert!(logs_contain("docbuilder_request"));
        assert!(logs_contain("Request completed"));
    }
}
