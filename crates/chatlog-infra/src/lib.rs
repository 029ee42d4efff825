//! Infrastructure layer for Chatlog.
//!
//! Contains implementations of the traits defined in `chatlog-core`:
//! SQLite repositories, the OpenAI-compatible completion provider, plus
//! configuration loading and data-directory resolution.

pub mod config;
pub mod llm;
pub mod sqlite;
