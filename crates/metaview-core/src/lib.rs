//! Metaview Core - metadata aggregation and class diagrams
//!
//! This crate provides the domain and application layers for Metaview, a
//! client that turns the hypermedia JSON of a Restful Objects server into
//! typed transfer objects, aggregates them into display models and renders
//! class diagrams through a remote PlantUML service.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          metaview-cli (CLI)             │
//! │     (Wires adapters, runs commands)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (LinkResolver, Aggregator, Diagrams)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Fetcher, DiagramRenderer, SlotSink)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    metaview-adapters (Infrastructure)   │
//! │  (HttpFetcher, KrokiRenderer, Slots)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (TransferObject, MetaClass, DiagramDm)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use metaview_core::prelude::*;
//!
//! let registry = HandlerRegistry::new();
//! let raw = r#"{"canonicalName": "demo.Customer", "members": []}"#;
//! let obj = registry.parse(PayloadKind::DomainType, raw).unwrap();
//!
//! if let TransferObject::DomainType(domain_type) = obj {
//!     let text = DiagramBuilder::new().build_for_type(&domain_type, None);
//!     println!("{text}");
//! }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Aggregator, AggregatorHandle, Arrival, DiagramPresenter, DiagramService, Handler,
        HandlerRegistry, LinkResolver, ObjectLoader, SystemLinks, SystemLoader, TypeLoader,
        ports::{DiagramRenderer, Presenter, RenderRequest, ResourceFetcher, SlotContent, SlotId, SlotSink},
    };
    pub use crate::domain::{
        DiagramBuilder, DiagramDm, DiagramText, DisplayModel, DomainType, Layout, Link, MetaClass,
        ObjectDm, PayloadKind, SystemDm, TransferObject,
    };
    pub use crate::error::{MetaviewError, MetaviewResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
