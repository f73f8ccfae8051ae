//! Shared types for the canteen server
//!
//! Domain models, request/response payloads and the unified error system
//! used by the server and any client driving its API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
