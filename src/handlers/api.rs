//! API Response Handler
//!
//! Handles responses from the background API service: the document list and
//! latest stored analyses.

use tracing::{debug, warn};

use sdgdash::logic::errors::{classify_error, format_error_message};
use sdgdash::model::{ConnectionState, ResultSource};
use sdgdash::services::ApiResponse;

use crate::App;

/// Handle API response from background service
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::DocumentsResult { documents } => {
            app.model.documents.loading = false;

            let documents = match documents {
                Ok(documents) => documents,
                Err(error) => {
                    warn!("Failed to list documents: {:#}", error);
                    let message = format_error_message(&error);
                    app.model.documents.connection_state = ConnectionState::Disconnected {
                        error_type: classify_error(&error),
                        message: message.clone(),
                    };
                    if app.model.documents.documents.is_empty() {
                        app.model.ui.show_error(message);
                    }
                    return;
                }
            };

            app.model.documents.connection_state = ConnectionState::Connected;
            debug!("Fetched {} documents", documents.len());

            if let Err(e) = app.cache.save_documents(&documents) {
                warn!("Failed to cache documents: {:#}", e);
            }
            app.model.documents.replace_documents(documents, false);
        }

        ApiResponse::LatestAnalysisResult {
            document_id,
            result,
        } => {
            // The user may have asked for another document in the meantime
            if app.model.analysis.loading_latest.as_deref() != Some(document_id.as_str()) {
                debug!("Dropping stale latest analysis for {}", document_id);
                return;
            }
            app.model.analysis.loading_latest = None;
            let announce = std::mem::take(&mut app.model.analysis.announce_latest);

            let name = app
                .model
                .documents
                .name_of(&document_id)
                .unwrap_or(document_id.as_str())
                .to_string();

            match result {
                Ok(Some(result)) => {
                    app.model.documents.connection_state = ConnectionState::Connected;
                    app.model
                        .analysis
                        .show_result(document_id, ResultSource::Remote, result);
                    if announce {
                        app.model
                            .ui
                            .show_success(format!("Loaded latest analysis of {}", name));
                    }
                }
                Ok(None) => {
                    app.model.documents.connection_state = ConnectionState::Connected;
                    let has_cached = app
                        .model
                        .analysis
                        .displayed
                        .as_ref()
                        .is_some_and(|shown| shown.document_id == document_id);
                    if announce && !has_cached {
                        app.model
                            .ui
                            .show_info(format!("No stored analysis for {}", name));
                    }
                }
                Err(error) => {
                    warn!("Failed to load latest analysis of {}: {:#}", document_id, error);
                    if announce {
                        app.model.ui.show_error(format_error_message(&error));
                    }
                }
            }
        }
    }
}
