//! Business logic and repository trait definitions for Chatlog.
//!
//! This crate defines the "ports" (repository and completion-provider traits)
//! that the infrastructure layer implements, plus the reply policy and the
//! chat service built on top of them. It depends only on `chatlog-types` --
//! never on `chatlog-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod reply;
pub mod repository;
