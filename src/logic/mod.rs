//! Business Logic
//!
//! This module contains pure business logic functions that can be unit tested:
//! - errors: analysis error taxonomy and transport error classification
//! - formatting: human-readable durations, scores, bars
//! - navigation: list selection with wrapping
//! - topics: LDA topic parsing and SDG color assignment
//! - ui: focus cycling and toast timing
//! - validation: analysis form rules

pub mod errors;
pub mod formatting;
pub mod navigation;
pub mod topics;
pub mod ui;
pub mod validation;
