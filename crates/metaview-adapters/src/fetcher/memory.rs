//! In-memory fetcher for testing and offline use.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;

use metaview_core::{
    application::{ApplicationError, ports::ResourceFetcher},
    domain::Link,
    error::MetaviewResult,
};

/// Serves canned bodies by href; unknown hrefs answer 404.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    bodies: Arc<RwLock<HashMap<String, String>>>,
    requests: Arc<RwLock<Vec<String>>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, href: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(href, body);
        self
    }

    pub fn insert(&self, href: impl Into<String>, body: impl Into<String>) {
        if let Ok(mut bodies) = self.bodies.write() {
            bodies.insert(href.into(), body.into());
        }
    }

    /// Hrefs requested so far, in request order (testing helper).
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .read()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    async fn fetch(&self, link: &Link) -> MetaviewResult<String> {
        self.requests
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(link.href.clone());

        let bodies = self
            .bodies
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        bodies.get(&link.href).cloned().ok_or_else(|| {
            ApplicationError::FetchFailed {
                href: link.href.clone(),
                status: Some(404),
                reason: "not found".into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_href_is_not_found() {
        let fetcher = MemoryFetcher::new().with("http://x/user", "{}");
        assert_eq!(fetcher.fetch(&Link::new("self", "http://x/user")).await.unwrap(), "{}");

        let err = fetcher
            .fetch(&Link::new("self", "http://x/version"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("http://x/version"));
        assert_eq!(fetcher.requests(), vec!["http://x/user", "http://x/version"]);
    }
}
