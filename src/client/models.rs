//! Request and response types exchanged with the admin panel

use reqwest::{Method, StatusCode};
use serde_json::Value;

/// Longest body excerpt quoted in failure messages
const EXCERPT_LEN: usize = 300;

/// A single outbound request, relative to the configured base URL
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

/// A fully-read response.
///
/// The body is always kept as text; `json` holds the parsed document when
/// the body was valid JSON, regardless of the declared content type.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub set_cookies: Vec<String>,
    pub text: String,
    pub json: Option<Value>,
}

impl ApiResponse {
    /// Build a response from its raw parts, parsing the body when possible
    pub fn from_parts(
        status: StatusCode,
        content_type: Option<String>,
        set_cookies: Vec<String>,
        text: String,
    ) -> Self {
        let json = serde_json::from_str(&text).ok();
        Self {
            status,
            content_type,
            set_cookies,
            text,
            json,
        }
    }

    /// Numeric status code
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }

    /// The parsed JSON body, or `Value::Null` when the body was not JSON
    pub fn body(&self) -> &Value {
        self.json.as_ref().unwrap_or(&Value::Null)
    }

    /// Top-level field lookup on the JSON body
    pub fn field(&self, key: &str) -> &Value {
        &self.body()[key]
    }

    /// Whether the body reports `success: true`
    pub fn success(&self) -> bool {
        self.field("success").as_bool().unwrap_or(false)
    }

    /// Server-provided explanation, read from `message` then `error`
    pub fn message(&self) -> Option<&str> {
        self.field("message")
            .as_str()
            .or_else(|| self.field("error").as_str())
    }

    /// Explanation for an unexpected status: the server message, or a body excerpt
    pub fn detail(&self) -> String {
        match self.message() {
            Some(msg) => msg.to_string(),
            None => self.excerpt(),
        }
    }

    /// The body text, truncated for display
    pub fn excerpt(&self) -> String {
        let trimmed = self.text.trim();
        if trimmed.chars().count() <= EXCERPT_LEN {
            trimmed.to_string()
        } else {
            let cut: String = trimmed.chars().take(EXCERPT_LEN).collect();
            format!("{}...", cut)
        }
    }

    /// Whether the response set a cookie whose name starts with `prefix`
    pub fn sets_cookie(&self, prefix: &str) -> bool {
        self.set_cookies
            .iter()
            .any(|c| c.trim_start().starts_with(prefix))
    }

    /// Whether the server declared a CSV body
    pub fn is_csv(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/csv"))
    }
}
