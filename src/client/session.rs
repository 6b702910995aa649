//! Cookie-carrying HTTP session against the admin panel

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{ACCEPT, CONTENT_TYPE, SET_COOKIE};

use super::{ApiRequest, ApiResponse, PanelApi};
use crate::error::{ApiError, Result};

/// One persistent session: a reqwest client with a cookie jar, so the
/// admin session cookie set by login rides along on every later request
/// until the server clears it.
pub struct SessionClient {
    http: HttpClient,
    base_url: String,
}

impl SessionClient {
    /// Create a new session against `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .cookie_store(true)
            .user_agent(concat!("panelprobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PanelApi for SessionClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from)?;

        let status = response.status();
        log::debug!("{} {} -> {}", request.method, url, status);

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse::from_parts(status, content_type, set_cookies, text))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
