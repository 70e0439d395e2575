//! Outgoing request description.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP verbs supported by the API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// PATCH.
    Patch,
    /// DELETE.
    Delete,
}

impl HttpMethod {
    /// Returns the wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a single multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain text field.
    Text(String),
    /// File upload.
    File {
        /// File contents.
        data: Bytes,
        /// Reported file name.
        file_name: Option<String>,
        /// MIME type of the file.
        mime: Option<String>,
    },
}

/// Named multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: FormValue,
}

/// Multipart form payload, e.g. an assignment upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormValue::Text(value.into()),
        });
        self
    }

    /// Appends a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        mime: Option<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormValue::File {
                data: data.into(),
                file_name: Some(file_name.into()),
                mime,
            },
        });
        self
    }

    /// Returns the fields in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON document.
    Json(Value),
    /// Raw bytes; the transport picks the content type.
    Binary(Bytes),
    /// Multipart form; the transport sets the boundary header.
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Serializes a value into a JSON body.
    ///
    /// # Errors
    /// Returns error if the value cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Json)
    }

    /// Whether the default JSON content type applies to this body.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// Per-call overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; these win over defaults.
    pub headers: HashMap<String, String>,
    /// Deadline override.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Overrides the request deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Fully resolved request, handed read-only to the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    method: HttpMethod,
    path: String,
    headers: HashMap<String, String>,
    body: Option<RequestBody>,
    timeout: Duration,
}

impl RequestConfig {
    /// Creates a config with no headers, no body and the default deadline.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builds the config for an API call.
    ///
    /// JSON and body-less requests get `Content-Type: application/json`;
    /// binary and multipart bodies leave the header to the transport.
    #[must_use]
    pub fn build(
        method: HttpMethod,
        path: impl Into<String>,
        body: Option<RequestBody>,
        options: RequestOptions,
        default_timeout: Duration,
    ) -> Self {
        let mut config = Self::new(method, path);

        if body.as_ref().is_none_or(RequestBody::is_json) {
            config.set_header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        }
        for (name, value) in options.headers {
            config.set_header(name, value);
        }

        config.body = body;
        config.timeout = options
            .timeout
            .filter(|t| !t.is_zero())
            .unwrap_or(default_timeout);
        config
    }

    /// Sets the deadline. Zero is ignored.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header, replacing any existing one with the same name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Removes a header by case-insensitive name.
    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    }

    /// Looks up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Request body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_body_gets_default_content_type() {
        let body = RequestBody::json(&json!({"name": "Algebra"})).unwrap();
        let config = RequestConfig::build(
            HttpMethod::Post,
            "/courses",
            Some(body),
            RequestOptions::new(),
            DEFAULT_TIMEOUT,
        );

        assert_eq!(config.header("content-type"), Some("application/json"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_multipart_body_omits_content_type() {
        let form = MultipartForm::new()
            .text("assignment_id", "7")
            .file("file", "essay.pdf", None, b"%PDF".to_vec());
        let config = RequestConfig::build(
            HttpMethod::Post,
            "/assignments/submit",
            Some(RequestBody::Multipart(form)),
            RequestOptions::new(),
            DEFAULT_TIMEOUT,
        );

        assert_eq!(config.header("Content-Type"), None);
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_binary_body_omits_content_type() {
        let config = RequestConfig::build(
            HttpMethod::Put,
            "/profile/avatar",
            Some(RequestBody::Binary(Bytes::from_static(b"\x89PNG"))),
            RequestOptions::new(),
            DEFAULT_TIMEOUT,
        );

        assert_eq!(config.header("Content-Type"), None);
    }

    #[test]
    fn test_caller_headers_override_defaults() {
        let options = RequestOptions::new()
            .with_header("content-type", "text/csv")
            .with_timeout(Duration::from_secs(5));
        let config = RequestConfig::build(
            HttpMethod::Get,
            "/reports",
            None,
            options,
            DEFAULT_TIMEOUT,
        );

        assert_eq!(config.header("Content-Type"), Some("text/csv"));
        assert_eq!(config.headers().len(), 1);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_zero_timeout_is_ignored() {
        let config =
            RequestConfig::new(HttpMethod::Get, "/profile").with_timeout(Duration::ZERO);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }
}
