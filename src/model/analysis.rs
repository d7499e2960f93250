//! Analysis Model
//!
//! The configuration form, the latest tracker snapshot, and whichever result
//! the results panel is showing.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::job::{AnalysisRequest, AnalysisResult, JobState};
use crate::logic::validation;
use crate::model::job::{ITERATION_RANGE, TOPIC_RANGE};
use crate::Focus;

/// Where the displayed result came from
#[derive(Clone, Debug, PartialEq)]
pub enum ResultSource {
    /// The job this session submitted
    Job { analysis_id: String },
    /// Latest stored analysis fetched from the backend
    Remote,
    /// Local history
    Cache { completed_at: DateTime<Utc> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayedResult {
    pub document_id: String,
    pub source: ResultSource,
    pub result: AnalysisResult,
}

#[derive(Clone, Debug)]
pub struct AnalysisModel {
    pub focus: Focus,
    pub num_topics: u32,
    pub max_iterations: u32,

    /// Last snapshot published by the job tracker
    pub job: JobState,

    /// Request behind the current job
    pub submitted: Option<AnalysisRequest>,

    /// When the current job was submitted
    pub started_at: Option<Instant>,

    /// Frozen once the job reaches a terminal state
    pub finished_after: Option<Duration>,

    pub displayed: Option<DisplayedResult>,

    /// Document whose latest result is being fetched
    pub loading_latest: Option<String>,

    /// Whether the pending lookup was asked for explicitly and should toast
    pub announce_latest: bool,
}

impl AnalysisModel {
    pub fn new(num_topics: u32, max_iterations: u32) -> Self {
        Self {
            focus: Focus::Documents,
            num_topics,
            max_iterations,
            job: JobState::Idle,
            submitted: None,
            started_at: None,
            finished_after: None,
            displayed: None,
            loading_latest: None,
            announce_latest: false,
        }
    }

    /// Apply +/- to the focused number field
    pub fn step_focused(&mut self, delta: i64) {
        match self.focus {
            Focus::Topics => {
                self.num_topics = validation::step_value(self.num_topics, delta, &TOPIC_RANGE)
            }
            Focus::Iterations => {
                self.max_iterations =
                    validation::step_value(self.max_iterations, delta, &ITERATION_RANGE)
            }
            Focus::Documents => {}
        }
    }

    /// Type a digit into the focused number field
    pub fn type_digit(&mut self, digit: u32) {
        match self.focus {
            Focus::Topics => {
                self.num_topics = validation::push_digit(self.num_topics, digit, &TOPIC_RANGE)
            }
            Focus::Iterations => {
                self.max_iterations =
                    validation::push_digit(self.max_iterations, digit, &ITERATION_RANGE)
            }
            Focus::Documents => {}
        }
    }

    pub fn erase_digit(&mut self) {
        match self.focus {
            Focus::Topics => self.num_topics = validation::pop_digit(self.num_topics),
            Focus::Iterations => self.max_iterations = validation::pop_digit(self.max_iterations),
            Focus::Documents => {}
        }
    }

    /// A new job replaces whatever result was on screen
    pub fn job_started(&mut self, request: AnalysisRequest) {
        self.displayed = None;
        self.submitted = Some(request);
        self.started_at = Some(Instant::now());
        self.finished_after = None;
    }

    /// Store a new tracker snapshot, freezing the timer on terminal states
    pub fn apply_snapshot(&mut self, state: JobState) {
        if state.is_terminal() && self.finished_after.is_none() {
            self.finished_after = self.started_at.map(|t| t.elapsed());
        }
        // Reset discards the result along with the job
        if matches!(state, JobState::Idle) {
            self.displayed = None;
            self.submitted = None;
            self.started_at = None;
            self.finished_after = None;
        }
        self.job = state;
    }

    /// Seconds the current job has been running (or ran)
    pub fn elapsed_secs(&self) -> Option<u64> {
        self.finished_after
            .or_else(|| self.started_at.map(|t| t.elapsed()))
            .map(|d| d.as_secs())
    }

    pub fn show_result(&mut self, document_id: String, source: ResultSource, result: AnalysisResult) {
        self.displayed = Some(DisplayedResult {
            document_id,
            source,
            result,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::errors::AnalysisError;

    #[test]
    fn test_step_only_touches_focused_field() {
        let mut model = AnalysisModel::new(5, 200);
        model.step_focused(1);
        assert_eq!((model.num_topics, model.max_iterations), (5, 200));

        model.focus = Focus::Topics;
        model.step_focused(1);
        assert_eq!(model.num_topics, 6);

        model.focus = Focus::Iterations;
        model.step_focused(-10);
        assert_eq!(model.max_iterations, 190);
    }

    #[test]
    fn test_typing_digits() {
        let mut model = AnalysisModel::new(5, 200);
        model.focus = Focus::Topics;
        model.erase_digit();
        model.type_digit(1);
        model.type_digit(2);
        assert_eq!(model.num_topics, 12);
    }

    #[test]
    fn test_terminal_snapshot_freezes_timer() {
        let mut model = AnalysisModel::new(5, 200);
        model.job_started(AnalysisRequest::new("1", 5, 200));
        model.apply_snapshot(JobState::Failed {
            id: None,
            error: AnalysisError::Submission("HTTP 500: boom".to_string()),
        });
        assert!(model.finished_after.is_some());
        assert!(model.elapsed_secs().is_some());
    }

    #[test]
    fn test_reset_discards_displayed_result() {
        let mut model = AnalysisModel::new(5, 200);
        model.job_started(AnalysisRequest::new("doc_1", 5, 200));
        model.apply_snapshot(JobState::Completed {
            id: "job_42".to_string(),
            result: AnalysisResult::default(),
        });
        model.show_result(
            "doc_1".to_string(),
            ResultSource::Job {
                analysis_id: "job_42".to_string(),
            },
            AnalysisResult::default(),
        );

        model.apply_snapshot(JobState::Idle);
        assert_eq!(model.job, JobState::Idle);
        assert!(model.displayed.is_none());
    }

    #[test]
    fn test_new_job_clears_previous_result() {
        let mut model = AnalysisModel::new(5, 200);
        model.show_result(
            "doc_1".to_string(),
            ResultSource::Remote,
            AnalysisResult::default(),
        );
        model.job_started(AnalysisRequest::new("doc_1", 5, 200));
        assert!(model.displayed.is_none());
        assert!(model.started_at.is_some());
    }

    #[test]
    fn test_idle_snapshot_clears_job() {
        let mut model = AnalysisModel::new(5, 200);
        model.job_started(AnalysisRequest::new("1", 5, 200));
        model.apply_snapshot(JobState::Idle);
        assert!(model.submitted.is_none());
        assert!(model.elapsed_secs().is_none());
    }
}
