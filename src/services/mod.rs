//! External Services
//!
//! This module contains services that interact with the analysis backend:
//! - api: background queue for document and latest-result lookups
//! - tracker: analysis job submission and status polling

pub mod api;
pub mod tracker;

// Re-export commonly used types for convenience
pub use api::{ApiRequest, ApiResponse};
pub use tracker::{AnalysisBackend, AnalysisJobTracker, JobHandle, PollOutcome, TrackerOptions};
