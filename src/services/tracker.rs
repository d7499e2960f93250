//! Analysis Job Tracker
//!
//! Drives one analysis job through `idle → submitting → running →
//! completed | failed` and publishes every transition on a `watch` channel
//! that the dashboard reads once per frame.
//!
//! Each submitted job runs as a single tokio task: one create call, then a
//! strictly sequential sleep/poll loop, so two polls for the same job never
//! overlap. The task is owned by the tracker and aborted on `reset()` and on
//! teardown. Every transition is applied under the state mutex only if the
//! task's generation is still current, which keeps a late response from a
//! cancelled task from touching the published state.
//!
//! There are no retries. A failed create or a single failed poll ends the job.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::logic::errors::{format_error_message, AnalysisError};
use crate::model::job::{AnalysisRequest, AnalysisResult, JobState};

/// Delay between status polls
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// What one status poll reported
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Running,
    Completed(AnalysisResult),
    Failed(String),
}

/// The two backend calls the tracker needs
#[async_trait]
pub trait AnalysisBackend: Send + Sync + 'static {
    /// Create a job, returning the backend's analysis id
    async fn create(&self, request: &AnalysisRequest) -> Result<String>;

    /// Fetch the current status of a job
    async fn status(&self, analysis_id: &str) -> Result<PollOutcome>;
}

#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub poll_interval: Duration,
    /// Fail the job after this many polls; `None` polls until the backend decides
    pub max_poll_attempts: Option<u32>,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            max_poll_attempts: None,
        }
    }
}

struct Slot {
    state: JobState,
    generation: u64,
}

struct Shared {
    slot: Mutex<Slot>,
    tx: watch::Sender<JobState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    /// Apply a transition computed by the task of `generation`
    ///
    /// Returns false, leaving state untouched, when that task has been
    /// superseded by a reset, a newer submit, or teardown.
    fn transition(&self, generation: u64, next: JobState) -> bool {
        let mut slot = self.lock();
        if slot.generation != generation {
            debug!(
                generation,
                current = slot.generation,
                status = next.status().as_str(),
                "dropping stale job transition"
            );
            return false;
        }

        debug!(generation, status = next.status().as_str(), "job transition");
        slot.state = next.clone();
        self.tx.send_replace(next);
        true
    }

    /// Invalidate any running task, optionally publishing a new state
    fn bump(&self, publish: Option<JobState>) -> u64 {
        let mut slot = self.lock();
        slot.generation += 1;
        if let Some(state) = publish {
            slot.state = state.clone();
            self.tx.send_replace(state);
        }
        slot.generation
    }
}

/// Read side of a submitted job
#[derive(Debug, Clone)]
pub struct JobHandle {
    rx: watch::Receiver<JobState>,
}

impl JobHandle {
    /// Current snapshot
    pub fn state(&self) -> JobState {
        self.rx.borrow().clone()
    }

    /// Wait for the job to finish
    ///
    /// Resolves with the terminal state, or with `Idle` if the job was reset
    /// first. If the tracker is torn down meanwhile, resolves with the last
    /// published state.
    pub async fn wait(mut self) -> JobState {
        let finished = self
            .rx
            .wait_for(|state| state.is_terminal() || *state == JobState::Idle)
            .await
            .map(|state| (*state).clone());

        finished.unwrap_or_else(|_| self.rx.borrow().clone())
    }
}

pub struct AnalysisJobTracker<B> {
    backend: Arc<B>,
    shared: Arc<Shared>,
    options: TrackerOptions,
    task: Option<JoinHandle<()>>,
}

impl<B: AnalysisBackend> AnalysisJobTracker<B> {
    pub fn new(backend: Arc<B>, options: TrackerOptions) -> Self {
        let (tx, _rx) = watch::channel(JobState::Idle);
        Self {
            backend,
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    state: JobState::Idle,
                    generation: 0,
                }),
                tx,
            }),
            options,
            task: None,
        }
    }

    /// Start a new job
    ///
    /// Refuses while another job is submitting or running. A finished job is
    /// simply replaced. Must be called from within a tokio runtime.
    pub fn submit(&mut self, request: AnalysisRequest) -> Result<JobHandle, AnalysisError> {
        request.check_structure()?;

        let generation = {
            let mut slot = self.shared.lock();
            if slot.state.is_active() {
                return Err(AnalysisError::InProgress);
            }
            slot.generation += 1;
            slot.state = JobState::Submitting;
            self.shared.tx.send_replace(JobState::Submitting);
            slot.generation
        };

        info!(
            generation,
            document_id = %request.document_id,
            num_topics = request.num_topics,
            max_iterations = request.max_iterations,
            "submitting analysis"
        );

        let task = tokio::spawn(run_job(
            Arc::clone(&self.backend),
            Arc::clone(&self.shared),
            self.options.clone(),
            generation,
            request,
        ));

        // Only a finished task can be here, since active jobs are refused above
        if let Some(previous) = self.task.replace(task) {
            previous.abort();
        }

        Ok(JobHandle {
            rx: self.shared.tx.subscribe(),
        })
    }
}

impl<B> AnalysisJobTracker<B> {
    /// Current job snapshot
    pub fn snapshot(&self) -> JobState {
        self.shared.lock().state.clone()
    }

    /// Receiver that sees every published state
    pub fn subscribe(&self) -> watch::Receiver<JobState> {
        self.shared.tx.subscribe()
    }

    /// Whether a poll chain is currently scheduled
    pub fn is_polling(&self) -> bool {
        let task_alive = self.task.as_ref().is_some_and(|task| !task.is_finished());
        task_alive && matches!(self.shared.lock().state, JobState::Running { .. })
    }

    /// Back to idle, discarding any result or error and cancelling polling
    pub fn reset(&mut self) {
        let generation = self.shared.bump(Some(JobState::Idle));
        self.abort_task();
        debug!(generation, "job reset");
    }

    /// Teardown: cancel polling without publishing anything
    ///
    /// Responses that were already in flight are discarded.
    pub fn shutdown(&mut self) {
        if self.task.is_some() {
            let generation = self.shared.bump(None);
            self.abort_task();
            debug!(generation, "job tracker shut down");
        }
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<B> Drop for AnalysisJobTracker<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn run_job<B: AnalysisBackend>(
    backend: Arc<B>,
    shared: Arc<Shared>,
    options: TrackerOptions,
    generation: u64,
    request: AnalysisRequest,
) {
    let analysis_id = match backend.create(&request).await {
        Ok(id) => id,
        Err(e) => {
            warn!(generation, document_id = %request.document_id, error = %e, "analysis submission failed");
            shared.transition(
                generation,
                JobState::Failed {
                    id: None,
                    error: AnalysisError::Submission(format_error_message(&e)),
                },
            );
            return;
        }
    };

    info!(generation, %analysis_id, "analysis running");
    if !shared.transition(
        generation,
        JobState::Running {
            id: analysis_id.clone(),
        },
    ) {
        return;
    }

    poll_until_done(backend.as_ref(), &shared, &options, generation, analysis_id).await;
}

async fn poll_until_done<B: AnalysisBackend>(
    backend: &B,
    shared: &Shared,
    options: &TrackerOptions,
    generation: u64,
    analysis_id: String,
) {
    let mut attempts: u32 = 0;

    loop {
        tokio::time::sleep(options.poll_interval).await;
        if !shared.is_current(generation) {
            return;
        }

        attempts += 1;
        if let Some(max) = options.max_poll_attempts {
            if attempts > max {
                warn!(generation, %analysis_id, attempts = max, "analysis poll limit reached");
                shared.transition(
                    generation,
                    JobState::Failed {
                        id: Some(analysis_id),
                        error: AnalysisError::TimedOut { attempts: max },
                    },
                );
                return;
            }
        }

        let next = match backend.status(&analysis_id).await {
            Ok(PollOutcome::Running) => {
                debug!(generation, %analysis_id, attempts, "analysis still running");
                continue;
            }
            Ok(PollOutcome::Completed(result)) => {
                info!(
                    generation,
                    %analysis_id,
                    topics = result.topic_distribution.len(),
                    sdgs = result.sdg_mapping.len(),
                    "analysis completed"
                );
                JobState::Completed {
                    id: analysis_id,
                    result,
                }
            }
            Ok(PollOutcome::Failed(message)) => {
                warn!(generation, %analysis_id, %message, "analysis failed on backend");
                JobState::Failed {
                    id: Some(analysis_id),
                    error: AnalysisError::JobFailure(message),
                }
            }
            Err(e) => {
                warn!(generation, %analysis_id, error = %e, "analysis status poll failed");
                JobState::Failed {
                    id: Some(analysis_id),
                    error: AnalysisError::Polling {
                        detail: format_error_message(&e),
                    },
                }
            }
        };

        shared.transition(generation, next);
        return;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend whose create call always succeeds and whose polls always say running
    struct AlwaysRunning {
        polls: AtomicUsize,
    }

    #[async_trait]
    impl AnalysisBackend for AlwaysRunning {
        async fn create(&self, _request: &AnalysisRequest) -> Result<String> {
            Ok("job_1".to_string())
        }

        async fn status(&self, _analysis_id: &str) -> Result<PollOutcome> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            Ok(PollOutcome::Running)
        }
    }

    fn tracker(options: TrackerOptions) -> (AnalysisJobTracker<AlwaysRunning>, Arc<AlwaysRunning>) {
        let backend = Arc::new(AlwaysRunning {
            polls: AtomicUsize::new(0),
        });
        (AnalysisJobTracker::new(Arc::clone(&backend), options), backend)
    }

    #[tokio::test]
    async fn test_invalid_request_leaves_job_idle() {
        let (mut tracker, backend) = tracker(TrackerOptions::default());
        let err = tracker.submit(AnalysisRequest::new("", 5, 200)).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
        assert_eq!(tracker.snapshot(), JobState::Idle);
        assert!(tracker.task.is_none());
        assert_eq!(backend.polls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_is_refused_while_running() {
        let (mut tracker, _backend) = tracker(TrackerOptions::default());
        tracker.submit(AnalysisRequest::new("doc_1", 5, 200)).unwrap();
        let err = tracker.submit(AnalysisRequest::new("doc_2", 5, 200)).unwrap_err();
        assert_eq!(err, AnalysisError::InProgress);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_ceiling_fails_job() {
        let (mut tracker, backend) = tracker(TrackerOptions {
            poll_interval: POLL_INTERVAL,
            max_poll_attempts: Some(3),
        });
        let handle = tracker.submit(AnalysisRequest::new("doc_1", 5, 200)).unwrap();

        let state = handle.wait().await;
        assert_eq!(
            state.error(),
            Some(&AnalysisError::TimedOut { attempts: 3 })
        );
        assert_eq!(state.id(), Some("job_1"));
        assert_eq!(backend.polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_publishes_idle_and_stops_polling() {
        let (mut tracker, backend) = tracker(TrackerOptions::default());
        let mut rx = tracker.subscribe();
        tracker.submit(AnalysisRequest::new("doc_1", 5, 200)).unwrap();
        rx.wait_for(|s| matches!(s, JobState::Running { .. }))
            .await
            .unwrap();
        assert!(tracker.is_polling());

        tracker.reset();
        assert_eq!(tracker.snapshot(), JobState::Idle);
        assert!(!tracker.is_polling());

        tokio::time::sleep(POLL_INTERVAL * 5).await;
        assert_eq!(backend.polls.load(Ordering::SeqCst), 0);
        assert_eq!(*rx.borrow(), JobState::Idle);
    }
}
