use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::logic::topics;
use crate::model::job::{AnalysisRequest, AnalysisResult, SdgScore, TopicWeight, TopicWord};
use crate::services::tracker::{AnalysisBackend, PollOutcome};

/// Non-success HTTP response, carrying the backend's `detail` text when present
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("HTTP {status}: {detail}")]
pub struct HttpStatusError {
    pub status: u16,
    pub detail: String,
}

/// A document that can be selected as analysis input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(alias = "file_id", alias = "document_id", deserialize_with = "string_or_number")]
    id: String,
    #[serde(default, alias = "file_name", alias = "title")]
    name: Option<String>,
}

impl From<RawDocument> for DocumentSummary {
    fn from(raw: RawDocument) -> Self {
        let name = raw
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| raw.id.clone());
        Self { id: raw.id, name }
    }
}

/// `GET /documents` answers with a bare list or a wrapped one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocumentsResponse {
    List(Vec<RawDocument>),
    Files { files: Vec<RawDocument> },
    Documents { documents: Vec<RawDocument> },
}

impl DocumentsResponse {
    fn into_documents(self) -> Vec<DocumentSummary> {
        let raw = match self {
            DocumentsResponse::List(docs)
            | DocumentsResponse::Files { files: docs }
            | DocumentsResponse::Documents { documents: docs } => docs,
        };
        raw.into_iter().map(DocumentSummary::from).collect()
    }
}

#[derive(Debug, Serialize)]
struct AnalyzePayload<'a> {
    document_id: &'a str,
    num_topics: u32,
    iterations: u32,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(deserialize_with = "string_or_number")]
    analysis_id: String,
}

/// Backend job status. Anything other than completed/failed means keep polling
/// (`running`, `processing`, `pending`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    Completed,
    Failed,
    #[serde(other)]
    Running,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: RemoteStatus,
    #[serde(default)]
    pub results: Option<RawResults>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn into_outcome(self) -> PollOutcome {
        match self.status {
            RemoteStatus::Completed => {
                PollOutcome::Completed(self.results.map(RawResults::into_result).unwrap_or_default())
            }
            RemoteStatus::Failed => PollOutcome::Failed(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ),
            RemoteStatus::Running => PollOutcome::Running,
        }
    }
}

/// Result payload as the backend sends it
///
/// Both the status endpoint and the latest-result endpoint have shipped the
/// topics under `topic_distribution` and `topics`, sometimes both at once.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub topic_distribution: Option<Vec<RawTopic>>,
    #[serde(default)]
    pub topics: Option<Vec<RawTopic>>,
    #[serde(default)]
    pub sdg_mapping: Option<Vec<RawSdg>>,
    #[serde(default)]
    pub sdg_results: Option<Vec<RawSdg>>,
}

impl RawResults {
    pub fn into_result(self) -> AnalysisResult {
        let topics = first_non_empty(self.topic_distribution, self.topics);
        let sdgs = first_non_empty(self.sdg_mapping, self.sdg_results);

        AnalysisResult {
            topic_distribution: topics
                .into_iter()
                .enumerate()
                .map(|(index, topic)| topic.into_topic(index))
                .collect(),
            sdg_mapping: sdgs
                .into_iter()
                .enumerate()
                .map(|(index, sdg)| sdg.into_score(index))
                .collect(),
        }
    }
}

fn first_non_empty<T>(preferred: Option<Vec<T>>, fallback: Option<Vec<T>>) -> Vec<T> {
    match preferred {
        Some(items) if !items.is_empty() => items,
        _ => fallback.unwrap_or_default(),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTopic {
    /// Raw LDA string, parsed client-side
    Text(String),
    Weighted {
        #[serde(alias = "label", alias = "name")]
        topic: String,
        weight: f64,
        #[serde(default)]
        words: Vec<TopicWord>,
        #[serde(default)]
        color: Option<String>,
    },
}

impl RawTopic {
    fn into_topic(self, index: usize) -> TopicWeight {
        match self {
            RawTopic::Text(raw) => topics::parse_lda_topic(&raw, index),
            RawTopic::Weighted {
                topic,
                weight,
                words,
                color,
            } => TopicWeight {
                label: topic,
                weight,
                words,
                color: color.unwrap_or_else(|| topics::topic_color(index).to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSdg {
    #[serde(
        alias = "sdg_code",
        alias = "code",
        alias = "sdg_name",
        deserialize_with = "string_or_number"
    )]
    pub sdg: String,
    #[serde(default, alias = "sdg_description", alias = "name")]
    pub description: String,
    #[serde(default, alias = "weight")]
    pub score: f64,
    #[serde(default)]
    pub color: Option<String>,
}

impl RawSdg {
    fn into_score(self, index: usize) -> SdgScore {
        let code = topics::normalize_sdg_code(&self.sdg);
        let color = self
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| topics::sdg_color(&code, index));
        SdgScore {
            code,
            description: self.description,
            score: self.score,
            color,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<RawResults>,
}

/// Accept ids and codes the backend sends as either JSON strings or numbers
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Int(i64),
        Float(f64),
    }

    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Int(n) => n.to_string(),
        StringOrNumber::Float(n) => n.to_string(),
    })
}

/// Pull `detail` (FastAPI) or `message` out of an error body, else the raw text
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
        message: Option<String>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(serde_json::Value::String(detail)),
            ..
        }) => detail,
        Ok(ErrorBody {
            detail: Some(other), ..
        }) => other.to_string(),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ if body.trim().is_empty() => "Unknown error".to_string(),
        _ => body.trim().to_string(),
    }
}

/// Turn a non-success response into an `HttpStatusError`
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HttpStatusError {
        status: status.as_u16(),
        detail: error_detail(&body),
    }
    .into())
}

/// REST client for the topic-modeling backend
#[derive(Clone)]
pub struct AnalysisClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl AnalysisClient {
    pub fn new(base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Documents the user can analyse
    pub async fn list_documents(&self) -> Result<Vec<DocumentSummary>> {
        let url = format!("{}/documents", self.base_url);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch documents")?;
        let response = ensure_success(response)
            .await
            .context("Failed to fetch documents")?;

        let documents: DocumentsResponse = response
            .json()
            .await
            .context("Failed to parse documents")?;

        Ok(documents.into_documents())
    }

    /// Start an analysis job, returning the backend's analysis id
    pub async fn create_analysis(&self, request: &AnalysisRequest) -> Result<String> {
        let url = format!("{}/analyze", self.base_url);
        let payload = AnalyzePayload {
            document_id: &request.document_id,
            num_topics: request.num_topics,
            iterations: request.max_iterations,
        };

        let response = self
            .authorized(self.client.post(&url))
            .json(&payload)
            .send()
            .await
            .context("Failed to start analysis")?;
        let response = ensure_success(response)
            .await
            .context("Failed to start analysis")?;

        let ack: AnalyzeResponse = response
            .json()
            .await
            .context("Failed to parse analysis acknowledgement")?;

        debug!(analysis_id = %ack.analysis_id, document_id = %request.document_id, "analysis accepted");
        Ok(ack.analysis_id)
    }

    pub async fn analysis_status(&self, analysis_id: &str) -> Result<StatusResponse> {
        let url = format!(
            "{}/analysis/status/{}",
            self.base_url,
            urlencoding::encode(analysis_id)
        );
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch analysis status")?;
        let response = ensure_success(response)
            .await
            .context("Failed to fetch analysis status")?;

        response
            .json()
            .await
            .context("Failed to parse analysis status")
    }

    /// Most recent stored analysis for a document, `None` if it was never analysed
    pub async fn latest_analysis(&self, document_id: &str) -> Result<Option<AnalysisResult>> {
        let url = format!("{}/a/{}", self.base_url, urlencoding::encode(document_id));
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch latest analysis")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response)
            .await
            .context("Failed to fetch latest analysis")?;

        let latest: LatestResponse = response
            .json()
            .await
            .context("Failed to parse latest analysis")?;

        Ok(match latest.data {
            Some(data) if latest.success => Some(data.into_result()),
            _ => None,
        })
    }
}

#[async_trait]
impl AnalysisBackend for AnalysisClient {
    async fn create(&self, request: &AnalysisRequest) -> Result<String> {
        self.create_analysis(request).await
    }

    async fn status(&self, analysis_id: &str) -> Result<PollOutcome> {
        Ok(self.analysis_status(analysis_id).await?.into_outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_running_variants() {
        for status in ["running", "processing", "pending", "queued"] {
            let json = format!(r#"{{"status":"{}"}}"#, status);
            let response: StatusResponse = serde_json::from_str(&json).unwrap();
            assert_eq!(response.into_outcome(), PollOutcome::Running);
        }
    }

    #[test]
    fn test_status_failed_without_message() {
        let response: StatusResponse = serde_json::from_str(r#"{"status":"failed"}"#).unwrap();
        assert_eq!(
            response.into_outcome(),
            PollOutcome::Failed("Unknown error".to_string())
        );
    }

    #[test]
    fn test_status_completed_with_raw_topics() {
        let json = serde_json::json!({
            "status": "completed",
            "results": {
                "topic_distribution": [
                    "Topic 1: 0.050*\"water\" + 0.030*\"river\"",
                    "Topic 2: 0.040*\"energy\""
                ],
                "sdg_mapping": [
                    { "sdg": 6, "description": "Clean Water and Sanitation", "score": 0.82 },
                    { "sdg_code": "SDG 7", "description": "Affordable Energy", "score": 0.41, "color": "#123456" }
                ]
            }
        });
        let response: StatusResponse = serde_json::from_value(json).unwrap();
        let PollOutcome::Completed(result) = response.into_outcome() else {
            panic!("expected completed outcome");
        };

        assert_eq!(result.topic_distribution.len(), 2);
        assert_eq!(result.topic_distribution[0].label, "Topic 1");
        assert_eq!(result.topic_distribution[1].words[0].word, "energy");
        assert_eq!(result.sdg_mapping[0].code, "SDG 6");
        assert_eq!(result.sdg_mapping[0].color, "#26BDE2");
        assert_eq!(result.sdg_mapping[1].color, "#123456");
    }

    #[test]
    fn test_results_prefer_topic_distribution() {
        let json = serde_json::json!({
            "topics": ["Topic 9: 0.5*\"ignored\""],
            "topic_distribution": [{ "topic": "Water", "weight": 42.0 }]
        });
        let raw: RawResults = serde_json::from_value(json).unwrap();
        let result = raw.into_result();
        assert_eq!(result.topic_distribution.len(), 1);
        assert_eq!(result.topic_distribution[0].label, "Water");
        assert_eq!(result.topic_distribution[0].color, topics::TOPIC_COLORS[0]);
    }

    #[test]
    fn test_results_fall_back_to_topics_and_sdg_results() {
        let json = serde_json::json!({
            "topic_distribution": [],
            "topics": ["Topic 3: 0.2*\"soil\""],
            "sdg_results": [{ "sdg_name": "15", "score": 0.3 }]
        });
        let result = serde_json::from_value::<RawResults>(json).unwrap().into_result();
        assert_eq!(result.topic_distribution[0].label, "Topic 3");
        assert_eq!(result.sdg_mapping[0].code, "SDG 15");
    }

    #[test]
    fn test_documents_response_shapes() {
        let bare: DocumentsResponse =
            serde_json::from_str(r#"[{"id": 1, "file_name": "corpus.csv"}]"#).unwrap();
        assert_eq!(
            bare.into_documents(),
            vec![DocumentSummary {
                id: "1".to_string(),
                name: "corpus.csv".to_string()
            }]
        );

        let wrapped: DocumentsResponse =
            serde_json::from_str(r#"{"files": [{"id": "doc_2"}]}"#).unwrap();
        let docs = wrapped.into_documents();
        assert_eq!(docs[0].name, "doc_2");
    }

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(error_detail(r#"{"detail":"File not found"}"#), "File not found");
        assert_eq!(error_detail(r#"{"message":"nope"}"#), "nope");
        assert_eq!(error_detail("Internal Server Error"), "Internal Server Error");
        assert_eq!(error_detail(""), "Unknown error");
    }

    #[test]
    fn test_client_trims_base_url() {
        let client = AnalysisClient::new("http://localhost:8000/api/", Some(" ".to_string()));
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert!(client.api_token.is_none());
    }
}
