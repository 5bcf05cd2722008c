use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::trace;

use metaview_core::application::ApplicationError;

/// Incremental SSE decoder.
///
/// Feed it raw chunks as they arrive; lines may be split across chunks.
/// Only `data` fields are kept. The `data` lines of one event form a single
/// payload; ASCII whitespace, including the line breaks between them, is
/// ignored when decoding.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode every event completed by `chunk`.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<String, ApplicationError>> {
        self.pending.extend_from_slice(chunk);
        let mut messages = Vec::new();

        while let Some(newline) = self.pending.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=newline).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            if let Some(message) = self.line(&String::from_utf8_lossy(&line)) {
                messages.push(message);
            }
        }
        messages
    }

    fn line(&mut self, line: &str) -> Option<Result<String, ApplicationError>> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = line.split_once(':').unwrap_or((line, ""));
        let value = value.strip_prefix(' ').unwrap_or(value);
        match field {
            "data" => self.data.push(value.to_string()),
            other => trace!(field = other, "Ignoring SSE field"),
        }
        None
    }

    fn dispatch(&mut self) -> Option<Result<String, ApplicationError>> {
        if self.data.is_empty() {
            return None;
        }
        let joined = self.data.join("\n");
        self.data.clear();
        let encoded: String = joined.split_ascii_whitespace().collect();
        Some(decode(&encoded))
    }
}

fn decode(encoded: &str) -> Result<String, ApplicationError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ApplicationError::PushFailed {
            reason: format!("invalid base64 payload: {e}"),
        })?;
    String::from_utf8(bytes).map_err(|e| ApplicationError::PushFailed {
        reason: format!("payload is not UTF-8: {e}"),
    })
}
