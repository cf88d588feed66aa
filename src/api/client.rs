//! api::client
//!
//! Control-plane HTTP client built on reqwest.
//!
//! # Design
//!
//! The client is constructed from an explicit [`Session`] (target + token);
//! it never reads ambient state. The base URL is overridable so tests can
//! point it at a local mock server.
//!
//! # Error mapping
//!
//! HTTP 412 Precondition Failed is a distinct variant because the swap
//! command treats it as a soft, user-confirmable failure rather than a hard
//! error. Every other non-success status maps to [`ApiError::Api`] carrying
//! the status code and the server's message.
//!
//! The server usually answers errors with plain text, but newer versions wrap
//! them as `{"Message": "..."}`; both forms are handled.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::session::Session;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "tsuru-client";

/// Errors from control-plane API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// The server refused the operation unless it is explicitly forced.
    #[error("precondition failed: {message}")]
    PreconditionFailed {
        /// Server-supplied warning message.
        message: String,
    },

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },
}

/// JSON error payload shape used by newer server versions.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(rename = "Message")]
    message: String,
}

/// Control-plane API client.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client for making requests.
    client: Client,
    /// Base URL of the control plane (the session target).
    base: String,
    /// Session auth token.
    token: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Create a client from a resolved session.
    pub fn new(session: &Session) -> Self {
        Self::with_base(session.target.clone(), session.token.clone())
    }

    /// Create a client against an explicit base URL.
    ///
    /// Tests use this to target a mock server.
    pub fn with_base(base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Base URL this client talks to.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Standard headers for every request.
    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        let auth = format!("bearer {}", self.token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|e| ApiError::Network(format!("invalid token header: {}", e)))?,
        );
        Ok(headers)
    }

    /// Swap routing between two applications.
    ///
    /// Issues `PUT /swap?app1=..&app2=..&force=..&cnameOnly=..`. A 412
    /// response surfaces as [`ApiError::PreconditionFailed`] so the caller
    /// can offer a forced retry.
    pub async fn swap(
        &self,
        app1: &str,
        app2: &str,
        force: bool,
        cname_only: bool,
    ) -> Result<(), ApiError> {
        let url = format!("{}/swap", self.base);
        let response = self
            .client
            .put(&url)
            .headers(self.headers()?)
            .query(&[("app1", app1), ("app2", app2)])
            .query(&[("force", force), ("cnameOnly", cname_only)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response).await
    }
}

/// Map a non-success response into the error taxonomy.
async fn check_status(response: Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let message = error_message(response).await;
    if status == StatusCode::PRECONDITION_FAILED {
        return Err(ApiError::PreconditionFailed { message });
    }
    Err(ApiError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Extract the server's error message from a response body.
async fn error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorPayload>(&body) {
        Ok(payload) => payload.message,
        Err(_) => body,
    }
}
