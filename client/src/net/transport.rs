//! `fetch`-backed [`Transport`] for the browser build.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, cookies included on
//! every request so the API session survives page loads.
//! Native builds (tests, checks without the feature): every request fails
//! with a transport error, since there is no `fetch` to call.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use portal::error::ApiError;
use portal::http::{ApiRequest, RawResponse, Transport};

/// Transport issuing requests against `base_url` with browser `fetch`.
#[derive(Clone, Debug)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::{Method as FetchMethod, RequestBuilder};
            use portal::http::Method;

            let method = match request.method {
                Method::Get => FetchMethod::GET,
                Method::Post => FetchMethod::POST,
                Method::Put => FetchMethod::PUT,
                Method::Patch => FetchMethod::PATCH,
                Method::Delete => FetchMethod::DELETE,
            };
            let builder = RequestBuilder::new(&request.url(&self.base_url))
                .method(method)
                .credentials(web_sys::RequestCredentials::Include)
                .header("Accept", "application/json")
                .query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            let outgoing = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let response = outgoing
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))?;
            tracing::trace!(method = request.method.as_str(), path = %request.path, status, "api response");
            Ok(RawResponse::from_text(status, &text))
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(ApiError::Transport(format!(
                "{} {}: fetch is only available in the browser build",
                request.method.as_str(),
                request.url(&self.base_url)
            )))
        }
    }
}
