//! Mock admin panel for testing
//!
//! Provides a [`PanelApi`] implementation that answers from canned
//! responses and records every request, so checks can be unit tested
//! without a server.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::{ApiRequest, ApiResponse, PanelApi};
use crate::error::{ApiError, Result};

/// Canned reply for one request
enum Reply {
    Response(ApiResponse),
    Error(String),
}

/// Mock admin panel.
///
/// Replies are queued per `METHOD path`. Queued replies are consumed in
/// order; the last one keeps answering once the queue is down to it.
///
/// # Example
/// ```ignore
/// let mock = MockPanel::new()
///     .with_json(Method::GET, "/api/discounts", 200, json!({"success": true, "discounts": []}));
///
/// let resp = mock.get("/api/discounts").await?;
/// assert_eq!(mock.request_count(), 1);
/// ```
#[derive(Default)]
pub struct MockPanel {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    captured: Mutex<Vec<ApiRequest>>,
}

fn route(method: &Method, path: &str) -> String {
    format!("{} {}", method, path)
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, method: Method, path: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(route(&method, path))
            .or_default()
            .push_back(reply);
        self
    }

    /// Queue a JSON reply
    pub fn with_json(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        let response = ApiResponse::from_parts(
            StatusCode::from_u16(status).unwrap(),
            Some("application/json".to_string()),
            Vec::new(),
            body.to_string(),
        );
        self.push(method, path, Reply::Response(response))
    }

    /// Queue a JSON reply that also sets cookies
    pub fn with_cookie_json(
        self,
        method: Method,
        path: &str,
        status: u16,
        cookies: &[&str],
        body: Value,
    ) -> Self {
        let response = ApiResponse::from_parts(
            StatusCode::from_u16(status).unwrap(),
            Some("application/json".to_string()),
            cookies.iter().map(|c| c.to_string()).collect(),
            body.to_string(),
        );
        self.push(method, path, Reply::Response(response))
    }

    /// Queue a non-JSON reply
    pub fn with_text(
        self,
        method: Method,
        path: &str,
        status: u16,
        content_type: &str,
        body: &str,
    ) -> Self {
        let response = ApiResponse::from_parts(
            StatusCode::from_u16(status).unwrap(),
            Some(content_type.to_string()),
            Vec::new(),
            body.to_string(),
        );
        self.push(method, path, Reply::Response(response))
    }

    /// Queue a transport failure
    pub fn with_network_error(self, method: Method, path: &str, message: &str) -> Self {
        self.push(method, path, Reply::Error(message.to_string()))
    }

    /// All requests sent so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.captured.lock().unwrap().clone()
    }

    /// Number of requests sent so far
    pub fn request_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.captured.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl PanelApi for MockPanel {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let key = route(&request.method, &request.path);
        self.captured.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        let queue = replies
            .get_mut(&key)
            .ok_or_else(|| ApiError::InvalidResponse(format!("no mock reply for {}", key)))?;

        let reply = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|r| match r {
                Reply::Response(resp) => Reply::Response(resp.clone()),
                Reply::Error(msg) => Reply::Error(msg.clone()),
            })
        };

        match reply {
            Some(Reply::Response(resp)) => Ok(resp),
            Some(Reply::Error(msg)) => Err(ApiError::Network(msg).into()),
            None => Err(ApiError::InvalidResponse(format!("no mock reply for {}", key)).into()),
        }
    }

    fn base_url(&self) -> &str {
        "http://mock.invalid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_queue_consumes_then_repeats_last() {
        let mock = MockPanel::new()
            .with_json(Method::GET, "/a", 200, json!({"n": 1}))
            .with_json(Method::GET, "/a", 401, json!({"n": 2}));

        assert_eq!(mock.get("/a").await.unwrap().code(), 200);
        assert_eq!(mock.get("/a").await.unwrap().code(), 401);
        assert_eq!(mock.get("/a").await.unwrap().code(), 401);
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn test_unregistered_route_is_error() {
        let mock = MockPanel::new();
        let err = mock.get("/missing").await.unwrap_err();
        assert!(err.to_string().contains("GET /missing"));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_network_error_reply() {
        let mock = MockPanel::new().with_network_error(Method::GET, "/a", "Request timed out");
        let err = mock.get("/a").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
