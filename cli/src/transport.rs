//! `reqwest`-backed [`Transport`] for the CLI.
//!
//! Cookies set by the API (the session cookie in particular) are kept for
//! the lifetime of the process, so a `login` followed by other calls in the
//! same invocation is authenticated.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use portal::config::ClientConfig;
use portal::error::ApiError;
use portal::http::{ApiRequest, Method, RawResponse, Transport};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Build a client with the configured request and connect timeouts.
    ///
    /// # Errors
    ///
    /// Returns the `reqwest` builder error (TLS backend initialization).
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()?;
        Ok(Self { client, base_url: config.base_url.clone() })
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn api_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else if err.is_decode() || err.is_body() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let mut builder = self
            .client
            .request(reqwest_method(request.method), request.url(&self.base_url))
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(api_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(api_error)?;
        tracing::debug!(method = request.method.as_str(), path = %request.path, status, "api response");
        Ok(RawResponse::from_text(status, &text))
    }
}
