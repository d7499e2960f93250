//! App Orchestration Methods
//!
//! This module contains App implementation methods grouped by domain.
//! Each submodule contains methods that orchestrate between:
//! - Model state (pure, in sdgdash::model)
//! - Services (job tracker, API queue, cache)
//! - Logic (pure business logic in sdgdash::logic)
//!
//! Methods are kept as `impl App` but organized by functional domain.

pub(crate) mod analysis;
pub(crate) mod documents;
