//! Response value object
//!
//! The response-shaped value produced by the handler chain and by the error
//! reporter. Transport details (status line, header encoding) belong to the
//! emitter that delivers it.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A response produced by a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Status code
    pub status: u16,
    /// Headers in insertion order
    pub headers: Vec<(String, String)>,
    /// Response body
    pub body: String,
}

impl Response {
    /// Create a response with the given body and status
    pub fn new<B: Into<String>>(body: B, status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// `200` response with a plain text body
    pub fn text<B: Into<String>>(body: B) -> Self {
        Self::new(body, 200).with_header("Content-Type", "text/plain; charset=utf-8")
    }

    /// Response with a pretty-printed JSON body
    pub fn json<T: Serialize + ?Sized>(body: &T, status: u16) -> Result<Self> {
        let body = serde_json::to_string_pretty(body)?;
        Ok(Self::new(body, status).with_header("Content-Type", "application/json"))
    }

    /// `404` response naming the path that was not found
    pub fn not_found(path: Option<&str>) -> Self {
        let body = match path {
            Some(path) => format!("Not Found \"{path}\""),
            None => "Not Found".to_string(),
        };
        Self::new(body, 404).with_header("Content-Type", "text/plain; charset=utf-8")
    }

    /// Error response
    ///
    /// A string body is sent as is. Any other body becomes a JSON document
    /// `{"error": <message>, "errors": <rest>}`, where the message is lifted
    /// out of the body's `message` key.
    pub fn error(body: Value, status: u16) -> Result<Self> {
        match body {
            Value::String(text) => Ok(Self::new(text, status)),
            Value::Object(mut fields) => {
                let message = match fields.remove("message") {
                    Some(Value::String(message)) if !message.is_empty() => message,
                    _ => "Error".to_string(),
                };
                let document = serde_json::json!({ "error": message, "errors": fields });
                Self::json(&document, status)
            }
            other => {
                let document = serde_json::json!({ "error": "Error", "errors": other });
                Self::json(&document, status)
            }
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// True for `2xx` statuses
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
