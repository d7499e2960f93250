//! Analysis orchestration methods
//!
//! - Submitting the configured analysis to the job tracker
//! - Resetting the tracked job
//! - Loading the latest stored result for the selected document

use tracing::{debug, info, warn};

use sdgdash::logic;
use sdgdash::model::{JobState, ResultSource};
use sdgdash::services::ApiRequest;

use crate::App;

impl App {
    /// Validate the form and hand the request to the tracker
    ///
    /// Validation failures are shown as a toast and never reach the network.
    pub(crate) fn start_analysis(&mut self) {
        let document_id = self.model.selected_document().map(|doc| doc.id.clone());
        let request = match logic::validation::build_request(
            document_id.as_deref(),
            self.model.analysis.num_topics,
            self.model.analysis.max_iterations,
        ) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected analysis form: {}", e);
                self.model.ui.show_error(e);
                return;
            }
        };

        match self.tracker.submit(request.clone()) {
            Ok(_handle) => {
                info!(
                    "Submitted analysis for document {} ({} topics, {} iterations)",
                    request.document_id, request.num_topics, request.max_iterations
                );
                self.model.analysis.job_started(request);
            }
            Err(e) => self.model.ui.show_error(e),
        }
    }

    /// Drop the tracked job and stop polling
    pub(crate) fn reset_analysis(&mut self) {
        if self.tracker.snapshot() == JobState::Idle {
            return;
        }
        self.tracker.reset();
        self.model.ui.show_info("Analysis reset");
    }

    /// Show the newest result known for the selected document, on request
    pub(crate) fn load_latest(&mut self) {
        if self.model.selected_document().is_none() {
            self.model.ui.show_error("Select a document first");
            return;
        }
        self.lookup_latest(true);
    }

    /// Look up the newest result for the selected document
    ///
    /// The local history answers immediately; the backend's copy replaces it
    /// when it arrives. Only an explicit lookup (`announce`) reports its
    /// outcome as a toast.
    pub(crate) fn lookup_latest(&mut self, announce: bool) {
        let Some(document) = self.model.selected_document().cloned() else {
            return;
        };

        match self.cache.latest_for_document(&document.id) {
            Ok(Some(entry)) => {
                debug!(
                    "Showing cached analysis {} for {}",
                    entry.analysis_id, document.id
                );
                self.model.analysis.show_result(
                    document.id.clone(),
                    ResultSource::Cache {
                        completed_at: entry.completed_at,
                    },
                    entry.result,
                );
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to read analysis history: {:#}", e),
        }

        self.model.analysis.loading_latest = Some(document.id.clone());
        self.model.analysis.announce_latest = announce;
        let _ = self.api_tx.send(ApiRequest::LatestAnalysis {
            document_id: document.id,
        });
    }
}
