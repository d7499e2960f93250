//! Analysis Job Model
//!
//! An analysis job is one backend execution of the topic-modeling pipeline.
//! Its client-side lifecycle is a single tagged union, so a result can only
//! exist on a completed job and an error only on a failed one.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::logic::errors::AnalysisError;

/// Topic counts the dashboard accepts
pub const TOPIC_RANGE: RangeInclusive<u32> = 1..=25;

/// Iteration counts the dashboard accepts
pub const ITERATION_RANGE: RangeInclusive<u32> = 1..=1000;

/// Parameters for one analysis run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub document_id: String,
    pub num_topics: u32,
    pub max_iterations: u32,
}

impl AnalysisRequest {
    pub fn new(document_id: impl Into<String>, num_topics: u32, max_iterations: u32) -> Self {
        Self {
            document_id: document_id.into(),
            num_topics,
            max_iterations,
        }
    }

    /// Structural check only. Range rules live in `logic::validation` and are
    /// applied by the dashboard before it ever builds a request.
    pub fn check_structure(&self) -> Result<(), AnalysisError> {
        if self.document_id.trim().is_empty() {
            return Err(AnalysisError::Validation(
                "A document must be selected".to_string(),
            ));
        }
        if self.num_topics == 0 {
            return Err(AnalysisError::Validation(
                "Topic count must be positive".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(AnalysisError::Validation(
                "Iteration count must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// One word of an LDA topic with its weight
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopicWord {
    pub word: String,
    pub weight: f64,
}

/// One entry of the topic distribution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopicWeight {
    pub label: String,
    pub weight: f64,
    #[serde(default)]
    pub words: Vec<TopicWord>,
    pub color: String,
}

/// One entry of the SDG mapping
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SdgScore {
    pub code: String,
    pub description: String,
    pub score: f64,
    pub color: String,
}

/// Output of a completed analysis
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub topic_distribution: Vec<TopicWeight>,
    pub sdg_mapping: Vec<SdgScore>,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.topic_distribution.is_empty() && self.sdg_mapping.is_empty()
    }

    /// Highest scoring SDG, if any were mapped
    pub fn top_sdg(&self) -> Option<&SdgScore> {
        self.sdg_mapping
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Flat status label, mostly for display and assertions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Idle,
    Submitting,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Idle => "idle",
            JobStatus::Submitting => "submitting",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }
}

/// Lifecycle of one analysis job
#[derive(Clone, Debug, Default, PartialEq)]
pub enum JobState {
    #[default]
    Idle,
    Submitting,
    Running {
        id: String,
    },
    Completed {
        id: String,
        result: AnalysisResult,
    },
    Failed {
        /// `None` when the backend never acknowledged the job
        id: Option<String>,
        error: AnalysisError,
    },
}

impl JobState {
    pub fn status(&self) -> JobStatus {
        match self {
            JobState::Idle => JobStatus::Idle,
            JobState::Submitting => JobStatus::Submitting,
            JobState::Running { .. } => JobStatus::Running,
            JobState::Completed { .. } => JobStatus::Completed,
            JobState::Failed { .. } => JobStatus::Failed,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            JobState::Running { id } | JobState::Completed { id, .. } => Some(id),
            JobState::Failed { id, .. } => id.as_deref(),
            JobState::Idle | JobState::Submitting => None,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            JobState::Completed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            JobState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Completed and failed jobs never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed { .. } | JobState::Failed { .. })
    }

    /// A submit or a poll chain is outstanding
    pub fn is_active(&self) -> bool {
        matches!(self, JobState::Submitting | JobState::Running { .. })
    }
}
