//! Shared domain types for Chatlog.
//!
//! This crate contains the core domain types used across the Chatlog service:
//! record identifiers, conversations, messages, attachments, LLM request shapes,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod attachment;
pub mod chat;
pub mod config;
pub mod error;
pub mod id;
pub mod llm;
pub mod timestamp;
