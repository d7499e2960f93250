use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{AnalysisClient, DocumentSummary};
use crate::model::job::AnalysisResult;

/// Background API request types
///
/// Job submission and polling go through the job tracker. This service only
/// carries the dashboard's read-only lookups so the render loop never blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Refresh the selectable documents
    ListDocuments,

    /// Load the most recent stored analysis of a document
    LatestAnalysis { document_id: String },
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    DocumentsResult {
        documents: Result<Vec<DocumentSummary>, anyhow::Error>,
    },

    LatestAnalysisResult {
        document_id: String,
        result: Result<Option<AnalysisResult>, anyhow::Error>,
    },
}

/// Execute an API request and return the response
async fn execute_request(client: &AnalysisClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::ListDocuments => {
            let documents = client.list_documents().await;
            ApiResponse::DocumentsResult { documents }
        }

        ApiRequest::LatestAnalysis { document_id } => {
            let result = client.latest_analysis(&document_id).await;
            ApiResponse::LatestAnalysisResult {
                document_id,
                result,
            }
        }
    }
}

/// Spawn the API service worker
///
/// Every request runs in its own task; responses come back in completion
/// order and the handler checks whether they are still relevant.
pub fn spawn_api_service(
    client: AnalysisClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            debug!(?request, "api request");
            let client = client.clone();
            let response_tx = response_tx.clone();

            tokio::spawn(async move {
                let response = execute_request(&client, request).await;
                // Receiver gone means the dashboard is shutting down
                let _ = response_tx.send(response);
            });
        }
    });

    (request_tx, response_rx)
}
