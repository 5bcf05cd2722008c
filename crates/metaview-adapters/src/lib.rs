//! Infrastructure adapters for Metaview.
//!
//! This crate implements the ports defined in `metaview-core::application::ports`.
//! It contains all network and filesystem I/O.

pub mod fetcher;
pub mod push;
pub mod renderer;
pub mod slots;

// Re-export commonly used adapters
pub use fetcher::{HttpFetcher, MemoryFetcher};
pub use push::{PushListener, SseDecoder};
pub use renderer::KrokiRenderer;
pub use slots::{FileSlots, MemorySlots};
