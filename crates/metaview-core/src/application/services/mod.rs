//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports: resolving links into
//! transfer objects, aggregating them, and rendering diagrams.

pub mod aggregator;
pub mod diagram_service;
pub mod resolver;

pub use aggregator::{Aggregator, AggregatorHandle, Arrival, ArrivalQueue};
pub use diagram_service::{DiagramPresenter, DiagramService};
pub use resolver::{LinkResolver, ObjectLoader, SystemLinks, SystemLoader, TypeLoader};
