//! The structured capture of one documented HTTP interaction.

use std::collections::HashMap;

use serde_json::Value;

use crate::method::RestMethod;
use crate::status::StatusClass;

/// One documented endpoint, captured while a test exercises it.
///
/// The method and path are fixed when the record is opened by a verb call.
/// Everything else is optional and filled in by the recorder's `with_*`
/// calls before the record is committed. Committed records are only
/// reachable through `&EndpointRecord`, so they cannot change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointRecord {
    method: RestMethod,
    endpoint: String,
    pub(crate) name: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) group: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) request_example: Option<Value>,
    pub(crate) success_fields: Option<HashMap<String, String>>,
    pub(crate) success_example: Option<Value>,
    pub(crate) error_description: Option<String>,
    pub(crate) error_example: Option<Value>,
    pub(crate) http_success_code: Option<u16>,
    pub(crate) http_error_code: Option<u16>,
    pub(crate) http_other_code: Option<u16>,
}

impl EndpointRecord {
    /// Opens a record for `method` on `endpoint`.
    pub fn new(method: RestMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            name: None,
            title: None,
            group: None,
            description: None,
            request_example: None,
            success_fields: None,
            success_example: None,
            error_description: None,
            error_example: None,
            http_success_code: None,
            http_error_code: None,
            http_other_code: None,
        }
    }

    /// Stores `code` in the slot its range selects.
    pub(crate) fn record_status(&mut self, code: u16) -> StatusClass {
        let class = StatusClass::classify(code);
        let slot = match class {
            StatusClass::Success => &mut self.http_success_code,
            StatusClass::Error => &mut self.http_error_code,
            StatusClass::Other => &mut self.http_other_code,
        };
        *slot = Some(code);
        class
    }

    pub fn method(&self) -> RestMethod {
        self.method
    }

    /// Path the request was issued against, e.g. `/api/user`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Payload sent with the request, if any.
    pub fn request_example(&self) -> Option<&Value> {
        self.request_example.as_ref()
    }

    /// Per-field descriptions for the success example.
    pub fn success_fields(&self) -> Option<&HashMap<String, String>> {
        self.success_fields.as_ref()
    }

    /// Looks up the description of a single success field.
    pub fn success_field_description(&self, field: &str) -> Option<&str> {
        self.success_fields
            .as_ref()
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn success_example(&self) -> Option<&Value> {
        self.success_example.as_ref()
    }

    pub fn error_description(&self) -> Option<&str> {
        self.error_description.as_deref()
    }

    pub fn error_example(&self) -> Option<&Value> {
        self.error_example.as_ref()
    }

    /// Expected status in `200..=299`.
    pub fn http_success_code(&self) -> Option<u16> {
        self.http_success_code
    }

    /// Expected status in `400..=499`.
    pub fn http_error_code(&self) -> Option<u16> {
        self.http_error_code
    }

    /// Expected status outside both documented ranges.
    pub fn http_other_code(&self) -> Option<u16> {
        self.http_other_code
    }

    /// Short label used in logs and error messages, e.g. `GET /api/user`.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }
}
