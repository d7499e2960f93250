//! Job Snapshot Handler
//!
//! Reacts to state changes published by the analysis job tracker.

use chrono::Utc;
use tracing::{debug, info, warn};

use sdgdash::logic::errors::AnalysisError;
use sdgdash::model::{ConnectionState, JobState, ResultSource};

use crate::App;

/// Apply a tracker snapshot to the model
///
/// Called once per published transition. Two jobs can end in identical
/// states, so the snapshot is never compared against the previous one.
pub fn handle_job_update(app: &mut App, state: JobState) {
    debug!("Job state: {}", state.status().as_str());

    app.model.analysis.apply_snapshot(state.clone());

    match state {
        JobState::Idle | JobState::Submitting => {}

        JobState::Running { id } => {
            app.model.documents.connection_state = ConnectionState::Connected;
            info!("Analysis {} accepted", id);
        }

        JobState::Completed { id, result } => {
            info!("Analysis {} completed", id);
            app.model.documents.connection_state = ConnectionState::Connected;

            let Some(request) = app.model.analysis.submitted.clone() else {
                return;
            };

            if let Err(e) = app
                .cache
                .save_completed_analysis(&id, &request, &result, Utc::now())
            {
                warn!("Failed to store analysis {}: {:#}", id, e);
            }

            let message = match result.top_sdg() {
                Some(sdg) => format!("Analysis complete: strongest match {}", sdg.code),
                None => "Analysis complete".to_string(),
            };
            app.model.analysis.show_result(
                request.document_id,
                ResultSource::Job { analysis_id: id },
                result,
            );
            app.model.ui.show_success(message);
        }

        JobState::Failed { id, error } => {
            warn!("Analysis {:?} failed: {} ({})", id, error, error.kind());
            if let AnalysisError::Polling { detail } = &error {
                debug!("Status check failed: {}", detail);
            }
            app.model.ui.show_error(error);
        }
    }
}
