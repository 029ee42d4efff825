//! HTTP request handlers.

pub mod attachment;
pub mod chat;
pub mod conversation;
pub mod message;
pub mod status;

use std::time::Instant;

/// Per-request id and start time for the response envelope.
pub(crate) fn begin() -> (String, Instant) {
    (uuid::Uuid::now_v7().to_string(), Instant::now())
}

pub(crate) fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
