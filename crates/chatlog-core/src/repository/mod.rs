//! Repository trait definitions (ports).
//!
//! These traits define the document-store interface that the infrastructure
//! layer (chatlog-infra) implements. The store assigns identifiers and
//! creation timestamps on insert; records are never updated or deleted.

pub mod attachment;
pub mod conversation;
pub mod message;

#[cfg(test)]
pub(crate) mod memory;
