//! Remote diagram renderers.

mod kroki;

pub use kroki::{DEFAULT_ENDPOINT, KrokiRenderer};
