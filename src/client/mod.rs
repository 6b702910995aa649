//! Admin panel HTTP client
//!
//! Checks talk to the server through the [`PanelApi`] trait so they can run
//! against the real cookie-carrying session, an in-memory mock, or a
//! stateful in-memory fake.

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fake;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod session;

#[cfg(test)]
pub use fake::FakePanel;
#[cfg(test)]
pub use mock::MockPanel;
pub use models::{ApiRequest, ApiResponse};
pub use session::SessionClient;

/// Admin panel API surface used by the checks
#[async_trait]
pub trait PanelApi: Send + Sync {
    /// Send a request and read the whole response.
    ///
    /// Any HTTP status is a successful return; only transport failures
    /// (connect, timeout, unreadable body) are errors.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Base URL requests are resolved against
    fn base_url(&self) -> &str;

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(ApiRequest::get(path)).await
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<ApiResponse> {
        self.send(ApiRequest::post(path).json(body)).await
    }
}
