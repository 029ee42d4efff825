//! Observability for Chatlog: subscriber setup and span attribute names.

pub mod genai_attrs;
pub mod tracing_setup;
