//! Clipnote API Library
//!
//! This crate provides the HTTP surface of the media intake subsystem: the
//! image and video upload endpoints, static serving of stored files and
//! application setup.

pub mod constants;
pub mod error;
mod handlers;
mod middleware;
pub mod setup;
pub mod state;
mod telemetry;
mod utils;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use handlers::UploadResponse;
pub use state::AppState;
