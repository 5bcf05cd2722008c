//! Application ports (traits) for external dependencies.
//!
//! Adapters in `metaview-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by the application
//!   - `ResourceFetcher`: GET a linked resource
//!   - `DiagramRenderer`: turn diagram text into markup
//!   - `SlotSink`: deliver content to a UI slot
//!   - `Presenter`: show a display model once it is ready

pub mod output;

pub use output::{
    DiagramRenderer, Presenter, RenderRequest, ResourceFetcher, SlotContent, SlotId, SlotSink,
};

#[cfg(test)]
pub use output::{MockDiagramRenderer, MockResourceFetcher, MockSlotSink};
