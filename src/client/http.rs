//! Transport over HTTP with `reqwest`.

use crate::{
    client::transport::{ApiRequest, ApiResponse, Transport},
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Talks to a remote store at `base_url`. No request timeout is applied.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Creates a transport for the store at `base_url`, e.g. `http://localhost:3001`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::Config {
            message: format!("invalid store URL '{base_url}': {e}"),
        })?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = request.url(&self.base_url)?;
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            Error::transport(format!(
                "{} {} failed: {e}",
                request.method,
                request.display_path()
            ))
        })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(format!("reading response body failed: {e}")))?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}
