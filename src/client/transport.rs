//! The request/response seam between the record client and the remote store.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use std::fmt;

/// One call against the remote store.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute collection path, e.g. `/api/products`
    pub path: String,
    /// Extra path segments, unencoded. Each one stays a single segment.
    pub segments: Vec<String>,
    /// Query parameters, unencoded
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl ApiRequest {
    /// A request with no query and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends one path segment, such as a record id. `/`, `?`, `#` and `%`
    /// inside it are percent-encoded rather than interpreted.
    #[must_use]
    pub fn with_segment(mut self, segment: &str) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Path with segments appended unencoded, for logs and error messages.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.segments
            .iter()
            .fold(self.path.clone(), |path, segment| format!("{path}/{segment}"))
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Resolves this request against `base`, percent-encoding segments and query.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for an empty, `.` or `..` segment, which no
    /// URL can carry verbatim.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base
            .join(&self.path)
            .map_err(|e| Error::transport(format!("invalid request path '{}': {e}", self.path)))?;
        if let Some(bad) = self
            .segments
            .iter()
            .find(|s| matches!(s.as_str(), "" | "." | ".."))
        {
            return Err(Error::validation(format!("'{bad}' is not a usable record id")));
        }
        if !self.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| Error::transport(format!("base URL '{base}' cannot take a path")))?
                .pop_if_empty()
                .extend(&self.segments);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// What came back: the status and the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw response body
    pub body: Vec<u8>,
}

/// Carries an [`ApiRequest`] to the remote store.
///
/// Implementations only fail for transport reasons (unreachable host, broken
/// connection). Non-success statuses are returned as ordinary responses and
/// interpreted by [`super::RecordClient`].
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends one request and waits for the full response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
