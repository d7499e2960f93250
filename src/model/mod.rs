//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **DocumentsModel**: document list, selection, backend connection
//! - **AnalysisModel**: configuration form, job snapshot, displayed result
//! - **UiModel**: preferences, toast, lifecycle
//! - **job**: the analysis job types shared with the tracker
//!
//! Key principles:
//! - Clone + Debug: Can snapshot state
//! - No services: All I/O lives in the App
//! - Pure accessors: Helper methods are side-effect free

pub mod analysis;
pub mod documents;
pub mod job;
pub mod ui;

pub use analysis::{AnalysisModel, DisplayedResult, ResultSource};
pub use documents::{ConnectionState, DocumentsModel};
pub use job::{AnalysisRequest, AnalysisResult, JobState, JobStatus};
pub use ui::{Toast, UiModel};

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub documents: DocumentsModel,
    pub analysis: AnalysisModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(vim_mode: bool, form_defaults: (u32, u32)) -> Self {
        let (num_topics, max_iterations) = form_defaults;
        Self {
            documents: DocumentsModel::new(),
            analysis: AnalysisModel::new(num_topics, max_iterations),
            ui: UiModel::new(vim_mode),
        }
    }

    pub fn selected_document(&self) -> Option<&crate::api::DocumentSummary> {
        self.documents.selected_document()
    }

    pub fn should_dismiss_toast(&self) -> bool {
        self.ui.should_dismiss_toast()
    }

    pub fn dismiss_toast(&mut self) {
        self.ui.dismiss_toast();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = Model::new(false, (5, 200));
        assert!(model.documents.documents.is_empty());
        assert_eq!(model.analysis.num_topics, 5);
        assert_eq!(model.analysis.max_iterations, 200);
        assert_eq!(model.analysis.job, JobState::Idle);
        assert!(!model.ui.vim_mode);
    }

    #[test]
    fn test_model_is_cloneable() {
        let model = Model::new(false, (5, 200));
        let _cloned = model.clone();
    }

    #[test]
    fn test_selected_document() {
        let model = Model::new(false, (5, 200));
        assert!(model.selected_document().is_none());
    }
}
