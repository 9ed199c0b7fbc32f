//! Request model and the refresh-aware HTTP client.
//!
//! ARCHITECTURE
//! ============
//! `Transport` is the only platform seam: it takes an [`ApiRequest`] relative
//! to the API base URL, attaches credentials (cookies), and returns the raw
//! status plus JSON body. [`HttpClient`] layers the retry policy on top:
//! a 401 on the first attempt triggers one `POST /api/refresh` and one
//! replay of the original request. A second 401 is returned to the caller.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

pub const REFRESH_PATH: &str = "/api/refresh";

/// Refresh-and-replay cycles allowed per call.
pub const MAX_REFRESH_RETRIES: u8 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// An outbound API call, relative to the configured base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Whether a 401 may be answered with a token refresh and a replay.
    /// Off for the auth endpoints themselves.
    pub refresh_on_unauthorized: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: None, refresh_on_unauthorized: true }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }

    /// Join `path` onto `base_url` without doubling or dropping the slash.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.path.trim_start_matches('/'))
    }
}

/// Status and decoded body of a response. Empty bodies decode to `Null`.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Decode a response from its body text. Empty bodies become `Null`;
    /// text that is not JSON is kept as a string so error pages still reach
    /// the caller.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
        };
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_result(self) -> Result<Value, ApiError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ApiError::Status { status: self.status, body: self.body })
        }
    }
}

/// Platform wire: browser fetch, `reqwest`, or a scripted test double.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status; `Err` is reserved for requests that got no response at all.
#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// API client applying the refresh-once-on-401 policy.
#[derive(Clone, Debug)]
pub struct HttpClient<T> {
    transport: T,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and return the raw response of the final attempt,
    /// successful or not.
    pub async fn send_raw(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let mut attempt: u8 = 0;
        loop {
            let response = self.transport.execute(request).await?;
            if response.status != 401 || !request.refresh_on_unauthorized || attempt >= MAX_REFRESH_RETRIES {
                return Ok(response);
            }
            attempt += 1;
            tracing::debug!(path = %request.path, attempt, "unauthorized; refreshing session before replay");
            self.refresh().await?;
        }
    }

    /// Send `request`, mapping non-2xx responses to [`ApiError::Status`].
    pub async fn send(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        self.send_raw(request).await?.into_result()
    }

    /// Send `request` and decode a successful body into `R`.
    pub async fn send_json<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let body = self.send(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn refresh(&self) -> Result<(), ApiError> {
        let request = ApiRequest::post(REFRESH_PATH).json(Value::Object(serde_json::Map::new())).without_refresh();
        match self.transport.execute(&request).await?.into_result() {
            Ok(_) => Ok(()),
            Err(err) => {
                tracing::warn!(error = %err, "session refresh rejected");
                Err(err)
            }
        }
    }
}
