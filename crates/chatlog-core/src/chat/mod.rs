//! Conversation, message, and attachment lifecycle.
//!
//! `ChatService` validates input, resolves identifiers, and drives the
//! repositories and the reply generator for every chat operation.

pub mod service;
