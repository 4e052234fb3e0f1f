//! # HTTP Transport
//!
//! The seam between the dispatcher and the network.
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Dispatcher ──► ApiRequest { method, path, query, body, token }         │
//! │                        │                                                │
//! │                        ▼                                                │
//! │               HttpTransport::send  (one attempt, no retry)              │
//! │                        │                                                │
//! │          ┌─────────────┴──────────────┐                                 │
//! │          ▼                            ▼                                 │
//! │   ReqwestTransport              FakeBackend (tests)                     │
//! │   base_url + path               in-process routes                       │
//! │   Authorization: Bearer                                                 │
//! │   X-Request-Id, timeout                                                 │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   ApiResponse { status, body } ──► into_result::<T>() / ensure_success  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One call to the storefront API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute API path, e.g. `/api/cart/3`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Bearer token, when the endpoint needs one.
    pub token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn post(path: impl Into<String>, body: &impl Serialize) -> ClientResult<Self> {
        Self::new(Method::Post, path).json(body)
    }

    pub fn put(path: impl Into<String>, body: &impl Serialize) -> ClientResult<Self> {
        Self::new(Method::Put, path).json(body)
    }

    /// Attaches a JSON body. Serialization failures are [`ClientError::Encode`].
    pub fn json(mut self, body: &impl Serialize) -> ClientResult<Self> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

// =============================================================================
// Response
// =============================================================================

/// Status and decoded body of an API response.
///
/// Bodies that are not JSON are kept as a JSON string; an empty body is
/// `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        ApiResponse { status, body }
    }

    /// Builds a response from raw body text.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        ApiResponse { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The message the API reported, or one derived from the status.
    ///
    /// The API reports errors as `{"error": ...}`; the auth layer uses
    /// `{"msg": ...}` and some handlers `{"message": ...}`.
    pub fn error_message(&self) -> String {
        ["error", "message", "msg"]
            .iter()
            .find_map(|key| self.body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| status_message(self.status))
    }

    /// Fails with [`ClientError::Api`] unless the status is 2xx.
    pub fn ensure_success(self) -> ClientResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::Api {
                status: self.status,
                message: self.error_message(),
            })
        }
    }

    /// Decodes the body of a 2xx response.
    pub fn into_result<T: DeserializeOwned>(self) -> ClientResult<T> {
        let response = self.ensure_success()?;
        Ok(serde_json::from_value(response.body)?)
    }
}

fn status_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "Unauthorized".to_string(),
        403 => "Forbidden".to_string(),
        404 => "Not found".to_string(),
        500..=599 => format!("Server error ({})", status),
        _ => format!("Request failed with status {}", status),
    }
}

// =============================================================================
// Transport Trait
// =============================================================================

/// Sends one request and returns whatever the API answered.
///
/// Only a missing response is an `Err`; error statuses come back as an
/// [`ApiResponse`] for the caller to interpret.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

// =============================================================================
// reqwest Implementation
// =============================================================================

/// Production transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(ReqwestTransport { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL, keeping any path prefix the base has.
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> ClientResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{}/{}", base, path))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let request_id = Uuid::new_v4();
        let url = self.endpoint(&request.path, &request.query)?;
        let started = Instant::now();

        let mut builder = self
            .client
            .request(request.method.into(), url)
            .header("X-Request-Id", request_id.to_string());
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    %request_id,
                    method = %request.method,
                    path = %request.path,
                    error = %e,
                    "Request failed without a response"
                );
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(
            %request_id,
            method = %request.method,
            path = %request.path,
            status,
            latency_ms = started.elapsed().as_millis() as u64,
            "API request completed"
        );

        Ok(ApiResponse::from_text(status, &text))
    }
}
