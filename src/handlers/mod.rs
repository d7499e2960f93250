//! Event Handlers
//!
//! This module contains handlers for different types of events:
//! - api: responses from the background API service
//! - jobs: snapshots published by the analysis job tracker
//! - keyboard: user keyboard input

pub mod api;
pub mod jobs;
pub mod keyboard;

// Re-export for convenience
pub use api::handle_api_response;
pub use jobs::handle_job_update;
pub use keyboard::handle_key;
