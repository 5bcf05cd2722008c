//! Application layer for Metaview.
//!
//! This layer contains:
//! - **Handlers**: payload kind dispatch into typed transfer objects
//! - **Services**: aggregation, link resolution and diagram rendering
//! - **Ports**: traits for the network, the render service and the UI
//! - **Errors**: orchestration failures
//!
//! Business rules (readiness, metamodel, diagram text) live in `crate::domain`.

pub mod error;
pub mod handlers;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use handlers::{Handler, HandlerRegistry};
pub use ports::{DiagramRenderer, Presenter, ResourceFetcher, SlotSink};
pub use services::{
    Aggregator, AggregatorHandle, Arrival, DiagramPresenter, DiagramService, LinkResolver,
    ObjectLoader, SystemLinks, SystemLoader, TypeLoader,
};
