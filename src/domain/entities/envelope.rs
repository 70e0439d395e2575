//! Backend response envelope: `{ data?, error?: {code, message} | string, message? }`.

use serde_json::Value;

/// Error code the backend uses for an invalid or expired session.
pub const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";

/// Fallback when neither the body nor the status says anything useful.
pub const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// Envelope fields read from a body.
///
/// Each field is read on its own: one field of an unexpected type leaves the
/// others intact. Unknown fields are ignored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Envelope {
    /// Payload.
    pub data: Option<Value>,
    /// `error.code`, when the error is structured and the code is a string.
    pub error_code: Option<String>,
    /// `error` as a bare string, or `error.message`.
    pub error_message: Option<String>,
    /// Top-level free-form message.
    pub message: Option<String>,
}

impl Envelope {
    /// Reads envelope fields from an arbitrary body. Non-objects yield an empty envelope.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };

        let text = |value: Option<&Value>| value.and_then(Value::as_str).map(str::to_string);
        let error = object.get("error");

        Self {
            data: object.get("data").cloned(),
            error_code: text(error.and_then(|e| e.get("code"))),
            error_message: match error {
                Some(Value::String(message)) => Some(message.clone()),
                Some(detail) => text(detail.get("message")),
                None => None,
            },
            message: text(object.get("message")),
        }
    }

    /// The error's machine code, if structured.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// The error's text: the string form, or the structured `message`.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// Whether a body carries the session-expired marker.
#[must_use]
pub fn is_unauthorized(body: &Value) -> bool {
    Envelope::from_body(body).error_code() == Some(UNAUTHORIZED_CODE)
}

/// Picks the user-facing message for a failed response.
#[must_use]
pub fn failure_message(body: Option<&Value>, status_text: Option<&str>) -> String {
    let envelope = body.map(Envelope::from_body).unwrap_or_default();

    [
        envelope.error_message(),
        envelope.message.as_deref(),
        status_text,
    ]
    .into_iter()
    .flatten()
    .find(|m| !m.trim().is_empty())
    .unwrap_or(GENERIC_MESSAGE)
    .to_string()
}
