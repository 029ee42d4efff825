//! HTTP API layer for Chatlog.
//!
//! Axum-based JSON API with envelope response format and permissive CORS.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
