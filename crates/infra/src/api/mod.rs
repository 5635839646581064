//! Moltbook API gateway
//!
//! Builds authenticated HTTP requests, performs them, decodes typed
//! responses, and classifies failures. Stateless apart from the held API
//! key; never retries.

mod client;
mod endpoints;
mod errors;

pub use client::MoltbookClient;
pub use errors::ApiError;
