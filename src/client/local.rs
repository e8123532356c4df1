//! In-process transport that drives an axum [`Router`] directly.
//!
//! Useful for embedding the store in the same process and for tests: requests
//! go through the same handlers, extractors, and error mapping as over HTTP.

use crate::{
    client::transport::{ApiRequest, ApiResponse, Transport},
    errors::{Error, Result},
};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, header},
};
use reqwest::Url;
use tower::ServiceExt;

const LOCAL_BASE: &str = "http://localhost/";

/// Sends requests straight into a router.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    router: Router,
}

impl LocalTransport {
    /// Wraps `router`, usually from [`crate::api::router`].
    #[must_use]
    pub const fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for LocalTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let base = Url::parse(LOCAL_BASE).map_err(|e| Error::transport(e.to_string()))?;
        let url = request.url(&base)?;
        let uri = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };

        let builder = Request::builder().method(request.method).uri(uri);
        let http_request = match request.body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?)),
            None => builder.body(Body::empty()),
        }
        .map_err(|e| Error::transport(format!("could not build request: {e}")))?;

        let response = self
            .router
            .clone()
            .oneshot(http_request)
            .await
            .map_err(|never| -> Error { match never {} })?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| Error::transport(format!("reading response body failed: {e}")))?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}
