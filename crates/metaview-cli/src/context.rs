//! Composition root: wires the adapters behind the core ports.
//!
//! Every command that talks to a server builds one [`AppContext`] from the
//! loaded configuration and asks it for services.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use metaview_adapters::{FileSlots, HttpFetcher, KrokiRenderer};
use metaview_core::{
    application::{
        ApplicationError, DiagramService, HandlerRegistry, LinkResolver,
        ports::{DiagramRenderer, ResourceFetcher, SlotContent, SlotId, SlotSink},
    },
    error::MetaviewResult,
};

use crate::config::AppConfig;
use crate::output::OutputManager;

/// Shared collaborators for one CLI invocation.
#[derive(Clone)]
pub struct AppContext {
    pub registry: Arc<HandlerRegistry>,
    pub fetcher: Arc<dyn ResourceFetcher>,
    pub renderer: Arc<dyn DiagramRenderer>,
    pub slots: Arc<dyn SlotSink>,
    pub base_url: String,
    diagram_type: String,
    output_format: String,
}

impl AppContext {
    pub fn from_config(config: &AppConfig, output: &OutputManager) -> MetaviewResult<Self> {
        let mut fetcher =
            HttpFetcher::with_timeout(Duration::from_secs(config.server.timeout_secs))?;
        if let Some(user) = &config.server.user {
            let password = config.server.password.clone().unwrap_or_default();
            fetcher = fetcher.with_credentials(user.clone(), password);
        }

        let renderer = KrokiRenderer::new().with_endpoint(config.render.endpoint.clone());

        let slots: Arc<dyn SlotSink> = match &config.output.slot_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "Writing slots to files");
                Arc::new(FileSlots::new(dir.clone()))
            }
            None => Arc::new(ConsoleSlots::new(output.clone())),
        };

        Ok(Self {
            registry: Arc::new(HandlerRegistry::new()),
            fetcher: Arc::new(fetcher),
            renderer: Arc::new(renderer),
            slots,
            base_url: config.server.base_url.clone(),
            diagram_type: config.render.diagram_type.clone(),
            output_format: config.render.output_format.clone(),
        })
    }

    pub fn resolver(&self) -> LinkResolver {
        LinkResolver::new(self.fetcher.clone(), self.registry.clone())
    }

    pub fn diagram_service(&self) -> DiagramService {
        DiagramService::new(self.renderer.clone(), self.slots.clone())
            .with_format(self.diagram_type.clone(), self.output_format.clone())
    }
}

/// Prints slot contents to stdout; errors go through the error indicator.
#[derive(Debug, Clone)]
pub struct ConsoleSlots {
    output: OutputManager,
}

impl ConsoleSlots {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl SlotSink for ConsoleSlots {
    fn update(&self, slot: &SlotId, content: SlotContent) -> MetaviewResult<()> {
        let written = match &content {
            SlotContent::Markup(text) | SlotContent::Text(text) => self.output.result(text),
            SlotContent::Error(message) => self.output.error(&format!("[{slot}] {message}")),
        };
        written.map_err(|e| {
            ApplicationError::SlotUpdateFailed {
                slot: slot.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
