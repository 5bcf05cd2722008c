use std::sync::Arc;

use futures::StreamExt;
use reqwest::header;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use metaview_core::{
    application::{
        ApplicationError,
        ports::{SlotContent, SlotId, SlotSink},
    },
    error::MetaviewResult,
};

use super::SseDecoder;

/// Written into the slot when no push endpoint is configured.
pub const UNSUPPORTED: &str = "Server push is not supported";

/// Streams pushed messages into one slot.
#[derive(Clone)]
pub struct PushListener {
    client: reqwest::Client,
    url: Option<String>,
    slots: Arc<dyn SlotSink>,
    slot: SlotId,
}

impl PushListener {
    pub fn new(url: Option<String>, slots: Arc<dyn SlotSink>, slot: SlotId) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            slots,
            slot,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Listen until the server closes the stream. Returns the number of
    /// messages delivered.
    #[instrument(skip_all, fields(slot = %self.slot))]
    pub async fn listen(&self) -> MetaviewResult<usize> {
        let Some(url) = &self.url else {
            info!("No push endpoint configured");
            self.slots
                .update(&self.slot, SlotContent::Text(UNSUPPORTED.to_string()))?;
            return Ok(0);
        };

        let failed = |reason: String| ApplicationError::PushFailed { reason };
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;
        if !response.status().is_success() {
            return Err(failed(format!("{} answered {}", url, response.status())).into());
        }

        info!(%url, "Listening for pushed messages");
        let mut stream = response.bytes_stream();
        let mut decoder = SseDecoder::new();
        let mut delivered = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| failed(e.to_string()))?;
            for message in decoder.feed(&chunk) {
                match message {
                    Ok(text) => {
                        self.slots.update(&self.slot, SlotContent::Text(text))?;
                        delivered += 1;
                    }
                    Err(e) => warn!(error = %e, "Dropping undecodable message"),
                }
            }
        }
        info!(delivered, "Push stream closed");
        Ok(delivered)
    }

    pub fn spawn(self) -> JoinHandle<MetaviewResult<usize>> {
        tokio::spawn(async move { self.listen().await })
    }
}
