//! # Moltpass Infrastructure
//!
//! Network-facing implementations for the Moltpass client core.
//!
//! This crate contains:
//! - The Moltbook API gateway (`MoltbookClient`): authenticated request
//!   building, typed response decoding, and error classification
//! - API configuration with environment overrides
//!
//! ## Architecture
//! - Depends on `moltpass-domain` for wire types
//! - The gateway never retries; retry policy belongs to callers

pub mod api;
pub mod config;

// Re-export commonly used items
pub use api::{ApiError, MoltbookClient};
pub use config::ApiConfig;
