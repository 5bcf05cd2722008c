//! HTTP fetcher backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, header};
use tracing::{debug, instrument, warn};

use metaview_core::{
    application::{ApplicationError, ports::ResourceFetcher},
    domain::Link,
    error::{MetaviewError, MetaviewResult},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ACCEPT_JSON: &str = "application/json";
/// Longest body excerpt kept in an error message.
const EXCERPT: usize = 200;

/// Production fetcher: one shared client, optional basic auth.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    credentials: Option<(String, String)>,
}

impl HttpFetcher {
    pub fn new() -> MetaviewResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> MetaviewResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetaviewError::Configuration {
                message: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    #[instrument(skip_all, fields(method = %link.method, href = %link.href))]
    async fn fetch(&self, link: &Link) -> MetaviewResult<String> {
        let method = Method::from_bytes(link.method.as_bytes()).unwrap_or(Method::GET);
        let mut request = self
            .client
            .request(method.clone(), &link.href)
            .header(header::ACCEPT, ACCEPT_JSON);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }
        if method != Method::GET {
            if let Some(arguments) = &link.arguments {
                request = request.json(arguments);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::fetch(&link.href, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Fetch rejected");
            return Err(ApplicationError::FetchFailed {
                href: link.href.clone(),
                status: Some(status.as_u16()),
                reason: format!("{status}: {}", excerpt(&body)),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApplicationError::fetch(&link.href, e))?;
        debug!(bytes = body.len(), "Fetched");
        Ok(body)
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(EXCERPT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
