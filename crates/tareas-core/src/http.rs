use std::time::Duration;

use anyhow::Context;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tareas_shared::error::{ClientError, Result};
use tareas_shared::{ApiRequest, ApiResponse, Method, Transport};
use tracing::{debug, warn};

/// Native transport for the REST backend.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

impl Transport for HttpTransport {
    #[tracing::instrument(skip(self, request), fields(method = request.method.as_str(), path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url(&request.path);
        let mut builder = self
            .client
            .request(reqwest_method(request.method), &url)
            .header(ACCEPT, "application/json");

        if let Some(token) = request.bearer.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(|err| {
            warn!(url = %url, error = %err, "request failed");
            ClientError::Transport(err.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        debug!(status, bytes = body.len(), "received response");

        Ok(ApiResponse { status, body })
    }
}
