//! Kroki-compatible renderer: POST a JSON render request, read back markup.

use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, instrument, warn};

use metaview_core::{
    application::{
        ApplicationError,
        ports::{DiagramRenderer, RenderRequest},
    },
    error::MetaviewResult,
};

pub const DEFAULT_ENDPOINT: &str = "https://kroki.io/";

/// Renders through a Kroki endpoint.
#[derive(Debug, Clone)]
pub struct KrokiRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl Default for KrokiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl KrokiRenderer {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl DiagramRenderer for KrokiRenderer {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, diagram_type = %request.diagram_type))]
    async fn render(&self, request: &RenderRequest) -> MetaviewResult<String> {
        let failed = |reason: String| ApplicationError::RenderingFailed { reason };

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| failed(e.to_string()))?;
        if !status.is_success() {
            warn!(%status, "Renderer rejected diagram");
            return Err(failed(format!("{status}: {}", body.trim())).into());
        }

        debug!(bytes = body.len(), "Renderer answered");
        Ok(body)
    }
}
