//! # Moltpass Domain
//!
//! Wire-level and in-memory data types for the Moltbook API.
//!
//! This crate contains:
//! - Entity value objects (Agent, Submolt, Post, Comment)
//! - Request/response wire types for every Moltbook endpoint
//!
//! ## Architecture
//! - No dependencies on other Moltpass crates
//! - Only external dependencies allowed
//! - Pure data structures, no I/O

pub mod types;

// Re-export commonly used items
pub use types::*;
