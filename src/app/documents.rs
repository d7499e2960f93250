//! Document list orchestration

use sdgdash::services::ApiRequest;

use crate::App;

impl App {
    /// Move the document selection and fetch what is known about the new one
    pub(crate) fn move_selection(&mut self, forward: bool) {
        let before = self.model.documents.selected;
        if forward {
            self.model.documents.select_next();
        } else {
            self.model.documents.select_prev();
        }
        if self.model.documents.selected != before {
            self.lookup_latest(false);
        }
    }

    /// Ask the backend for the document list again
    pub(crate) fn refresh_documents(&mut self) {
        if self.model.documents.loading {
            return;
        }
        self.model.documents.loading = true;
        let _ = self.api_tx.send(ApiRequest::ListDocuments);
    }
}

#[cfg(test)]
mod tests {
    use sdgdash::services::ApiRequest;

    use crate::App;

    #[test]
    fn test_moving_selection_requests_latest_quietly() {
        let (mut app, mut requests) = App::for_tests();
        assert_eq!(app.model.documents.selected, Some(0));

        app.move_selection(true);

        assert_eq!(
            requests.try_recv().unwrap(),
            ApiRequest::LatestAnalysis {
                document_id: "doc_2".to_string()
            }
        );
        assert_eq!(app.model.analysis.loading_latest.as_deref(), Some("doc_2"));
        assert!(!app.model.analysis.announce_latest);
    }

    #[test]
    fn test_single_document_selection_does_not_refetch() {
        let (mut app, mut requests) = App::for_tests();
        app.model.documents.replace_documents(
            vec![sdgdash::api::DocumentSummary {
                id: "doc_1".to_string(),
                name: "water_report.csv".to_string(),
            }],
            false,
        );

        app.move_selection(true);
        assert!(requests.try_recv().is_err());
    }

    #[test]
    fn test_explicit_load_is_announced() {
        let (mut app, mut requests) = App::for_tests();
        app.load_latest();
        assert!(matches!(
            requests.try_recv(),
            Ok(ApiRequest::LatestAnalysis { .. })
        ));
        assert!(app.model.analysis.announce_latest);
    }
}
