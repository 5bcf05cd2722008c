//! Resource fetchers.

mod http;
mod memory;

pub use http::{DEFAULT_TIMEOUT, HttpFetcher};
pub use memory::MemoryFetcher;
