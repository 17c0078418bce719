//! Core Service Layer
//!
//! Authentication, identity context, data models, configuration and storage
//! for the notes server.

pub mod auth;
pub mod config;
pub mod ctx;
pub mod error;
pub mod extract;
pub mod models;
pub mod notes;
pub mod router;
pub mod store;

// Re-exports for convenience
pub use config::{AppState, ServerConfig};
pub use ctx::Ctx;
pub use error::{Error, Result};
pub use router::router;
