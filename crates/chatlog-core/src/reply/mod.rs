//! Assistant reply generation.
//!
//! `rules` holds the deterministic keyword policy; `generator` optionally
//! delegates to an external provider and falls back to the rules.

pub mod generator;
pub mod rules;
