//! Gateway to the flight-operations backend.
//!
//! Everything above this module talks to the backend through the [`Gateway`]
//! trait. [`HttpGateway`] is the production implementation; tests substitute a
//! recording stub.

mod http;

use serde::Serialize;
use serde_json::Value;

pub use http::HttpGateway;

use crate::error::Result;

/// HTTP verbs the backend surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Partial update.
    Patch,
    /// Remove.
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request relative to the gateway's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Verb.
    pub method: Method,
    /// Path starting with `/`.
    pub path: String,
    /// Optional JSON body.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// A `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// A `PATCH` request without a body.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    /// A `POST` request carrying `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Post, path).with_json(body)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach `body` as the JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn with_json(mut self, body: &impl Serialize) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// A client bound to one backend.
///
/// On success the decoded body is returned (`Value::Null` for an empty body,
/// a JSON string for non-JSON text). A non-2xx answer becomes
/// [`Error::Status`](crate::Error::Status) carrying the code and raw body; a
/// request that never got an answer becomes
/// [`Error::Transport`](crate::Error::Transport). Nothing is retried.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync + std::fmt::Debug {
    /// Send one request and wait for its answer.
    ///
    /// # Errors
    ///
    /// Returns `Error::Status` for a non-2xx answer and `Error::Transport`
    /// when no answer arrives.
    async fn execute(&self, request: ApiRequest) -> Result<Value>;
}

/// Decode a successful response body.
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_post_carries_json_body() {
        let request = ApiRequest::post("/airlines", &json!({"name": "KLM"})).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/airlines");
        assert_eq!(request.body, Some(json!({"name": "KLM"})));
    }

    #[test]
    fn test_patch_without_body() {
        let request = ApiRequest::patch("/flights/1/occupancy/20");
        assert_eq!(request.method, Method::Patch);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body(r#"{"id": 1}"#), json!({"id": 1}));
        assert_eq!(parse_body("Flight updated"), json!("Flight updated"));
    }
}
