//! Driven (output) ports - implemented by infrastructure.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{DiagramText, Link};
use crate::error::MetaviewResult;

pub const PLANTUML: &str = "plantuml";
pub const SVG: &str = "svg";

/// Port for fetching linked resources.
///
/// Implemented by:
/// - `metaview_adapters::fetcher::HttpFetcher` (production)
/// - `metaview_adapters::fetcher::MemoryFetcher` (testing, canned bodies by href)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// GET the link target and return the raw response body.
    async fn fetch(&self, link: &Link) -> MetaviewResult<String>;
}

/// Body of a remote render request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRequest {
    pub diagram_source: String,
    pub diagram_type: String,
    pub output_format: String,
}

impl RenderRequest {
    pub fn new(text: &DiagramText) -> Self {
        Self {
            diagram_source: text.as_str().to_string(),
            diagram_type: PLANTUML.into(),
            output_format: SVG.into(),
        }
    }

    pub fn with_format(mut self, diagram_type: impl Into<String>, output_format: impl Into<String>) -> Self {
        self.diagram_type = diagram_type.into();
        self.output_format = output_format.into();
        self
    }
}

/// Port for the remote diagram renderer.
///
/// Implemented by `metaview_adapters::renderer::KrokiRenderer`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    /// Render the request and return the produced markup (SVG by default).
    async fn render(&self, request: &RenderRequest) -> MetaviewResult<String>;
}

/// Opaque identifier of a UI target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What a slot receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotContent {
    /// Rendered markup, inserted as-is.
    Markup(String),
    /// Plain text, e.g. a pushed message.
    Text(String),
    Error(String),
}

impl SlotContent {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Markup(s) | Self::Text(s) | Self::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Port for UI slots.
///
/// Implemented by:
/// - `metaview_adapters::slots::MemorySlots` (testing)
/// - `metaview_adapters::slots::FileSlots` (one file per slot)
/// - `ConsoleSlots` in the `metaview` binary (terminal output)
#[cfg_attr(test, mockall::automock)]
pub trait SlotSink: Send + Sync {
    /// Replace the slot's content.
    fn update(&self, slot: &SlotId, content: SlotContent) -> MetaviewResult<()>;
}

/// Called once when an aggregator's model becomes displayable.
pub trait Presenter<D>: Send {
    fn present(&mut self, model: &D);
}

impl<D, F> Presenter<D> for F
where
    F: FnMut(&D) + Send,
{
    fn present(&mut self, model: &D) {
        self(model)
    }
}
