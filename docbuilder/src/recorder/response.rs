//! The observed response of a recorded request.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Status, headers and body of a completed request.
///
/// The body is kept raw and, when it parses, as JSON so it can be handed
/// straight to `with_success_example` / `with_error_example`.
#[derive(Debug, Clone)]
pub struct RecordedResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
    json: Option<Value>,
}

impl RecordedResponse {
    pub(crate) fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        let json = serde_json::from_slice(&body).ok();
        Self {
            status,
            headers,
            body,
            json,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON, or `None` if it is not JSON.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Takes the parsed body, falling back to the text as a JSON string.
    pub fn into_example(self) -> Value {
        match self.json {
            Some(value) => value,
            None => Value::String(String::from_utf8_lossy(&self.body).into_owned()),
        }
    }
}
