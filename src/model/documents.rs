//! Documents Model
//!
//! Selectable source documents and the connection state of the backend that
//! serves them.

use crate::api::DocumentSummary;
use crate::logic;
use crate::logic::errors::ErrorType;

/// Connection state for the analysis backend
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionState {
    /// Last request to the backend succeeded
    Connected,
    /// Nothing has come back yet
    Connecting,
    /// Last request failed (with error type and user-friendly message)
    Disconnected {
        error_type: ErrorType,
        message: String,
    },
}

/// Document list plus selection
#[derive(Clone, Debug)]
pub struct DocumentsModel {
    pub documents: Vec<DocumentSummary>,

    /// Index into `documents`
    pub selected: Option<usize>,

    pub connection_state: ConnectionState,

    /// Whether `documents` came from the local cache rather than the backend
    pub from_cache: bool,

    /// A refresh request is in flight
    pub loading: bool,
}

impl DocumentsModel {
    pub fn new() -> Self {
        Self {
            documents: Vec::new(),
            selected: None,
            connection_state: ConnectionState::Connecting,
            from_cache: false,
            loading: false,
        }
    }

    pub fn selected_document(&self) -> Option<&DocumentSummary> {
        self.selected.and_then(|idx| self.documents.get(idx))
    }

    pub fn select_next(&mut self) {
        self.selected = logic::navigation::next_selection(self.selected, self.documents.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = logic::navigation::prev_selection(self.selected, self.documents.len());
    }

    /// Swap in a fresh list, keeping the selected document when it still exists
    pub fn replace_documents(&mut self, documents: Vec<DocumentSummary>, from_cache: bool) {
        let previous_id = self.selected_document().map(|doc| doc.id.clone());
        self.selected = logic::navigation::reselect(
            &documents,
            previous_id.as_deref(),
            self.selected,
            |doc: &DocumentSummary| doc.id.as_str(),
        );
        self.documents = documents;
        self.from_cache = from_cache;
    }

    pub fn name_of(&self, document_id: &str) -> Option<&str> {
        self.documents
            .iter()
            .find(|doc| doc.id == document_id)
            .map(|doc| doc.name.as_str())
    }
}

impl Default for DocumentsModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, name: &str) -> DocumentSummary {
        DocumentSummary {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_documents_model_creation() {
        let model = DocumentsModel::new();
        assert!(model.documents.is_empty());
        assert!(model.selected_document().is_none());
        assert_eq!(model.connection_state, ConnectionState::Connecting);
    }

    #[test]
    fn test_replace_selects_first() {
        let mut model = DocumentsModel::new();
        model.replace_documents(vec![doc("1", "a.csv"), doc("2", "b.csv")], false);
        assert_eq!(model.selected_document().map(|d| d.id.as_str()), Some("1"));
    }

    #[test]
    fn test_replace_keeps_selected_document() {
        let mut model = DocumentsModel::new();
        model.replace_documents(vec![doc("1", "a.csv"), doc("2", "b.csv")], true);
        model.select_next();

        model.replace_documents(vec![doc("0", "new.csv"), doc("1", "a.csv"), doc("2", "b.csv")], false);
        assert_eq!(model.selected_document().map(|d| d.id.as_str()), Some("2"));
        assert!(!model.from_cache);
    }

    #[test]
    fn test_selection_wraps() {
        let mut model = DocumentsModel::new();
        model.replace_documents(vec![doc("1", "a.csv"), doc("2", "b.csv")], false);
        model.select_prev();
        assert_eq!(model.selected, Some(1));
        model.select_next();
        assert_eq!(model.selected, Some(0));
    }

    #[test]
    fn test_name_of() {
        let mut model = DocumentsModel::new();
        model.replace_documents(vec![doc("1", "a.csv")], false);
        assert_eq!(model.name_of("1"), Some("a.csv"));
        assert_eq!(model.name_of("9"), None);
    }
}
