//! Server push over server-sent events.
//!
//! Each event's `data` carries base64-encoded UTF-8 text that is written
//! verbatim into a slot.

mod listener;
mod sse;

pub use listener::{PushListener, UNSUPPORTED};
pub use sse::SseDecoder;
