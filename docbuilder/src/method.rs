//! HTTP verbs a recorded endpoint can be documented under.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods supported by the recorder.
///
/// The `Display`/`FromStr` form is upper-case (`GET`), matching what goes
/// over the wire. Doc tag lines use [`RestMethod::apidoc_verb`] instead.
///
/// ## Examples
///
/// ```rust
/// use docbuilder::RestMethod;
///
/// let method: RestMethod = "DELETE".parse().unwrap();
/// assert_eq!(method, RestMethod::Delete);
/// assert_eq!(method.apidoc_verb(), "delete");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
    /// HTTP PUT.
    Put,
    /// HTTP PATCH.
    Patch,
    /// HTTP DELETE.
    Delete,
    /// HTTP HEAD.
    Head,
    /// HTTP OPTIONS.
    Options,
}

impl RestMethod {
    /// Returns the lower-case verb used inside `@api {verb}` tag lines.
    pub fn apidoc_verb(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Returns `true` if requests with this method usually carry a body.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        match method {
            RestMethod::Get => reqwest::Method::GET,
            RestMethod::Post => reqwest::Method::POST,
            RestMethod::Put => reqwest::Method::PUT,
            RestMethod::Patch => reqwest::Method::PATCH,
            RestMethod::Delete => reqwest::Method::DELETE,
            RestMethod::Head => reqwest::Method::HEAD,
            RestMethod::Options => reqwest::Method::OPTIONS,
        }
    }
}
