//! Submission/poll controller and its session state.
//!
//! [`RedesignController`] drives the whole pipeline for one view
//! instance: validate inputs, submit the job, poll status to a terminal
//! state, fetch the result payload, and map it to displayable artifact
//! paths. The session state is owned exclusively by the controller —
//! initialized on construction, cleared by [`reset`](RedesignController::reset),
//! no process-wide singletons.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use furnish_core::job::{Job, JobPhase, JobStatus};
use furnish_core::naming;
use furnish_core::request::{parse_budget, EditRequest, ImageUpload, RedesignRequest};
use furnish_core::types::JobId;

use crate::api::RedesignApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::poller::poll_until_done;
use crate::source::JobSource;

/// Displayable outcome of a completed redesign job.
#[derive(Debug, Clone)]
pub struct RedesignOutcome {
    /// The job the outcome belongs to.
    pub job_id: JobId,
    /// Path of the redesigned room image.
    pub result_image_path: String,
    /// Paths of the furniture item images, in catalog order.
    pub furniture_paths: Vec<String>,
    /// Total price of the furniture selection, when known.
    pub total_price: Option<f64>,
}

/// Component-local view state for one submission flow.
///
/// Mirrors the form fields plus the last-known job snapshot. Owned by
/// the controller; no other task touches it.
#[derive(Debug, Default)]
struct SessionState {
    image: Option<ImageUpload>,
    prompt: String,
    budget: String,
    edit_prompt: String,
    job: Option<Job>,
    outcome: Option<RedesignOutcome>,
    last_error: Option<String>,
}

/// Drives one submission flow end to end against a [`JobSource`].
pub struct RedesignController {
    source: Arc<dyn JobSource>,
    config: ClientConfig,
    phase: JobPhase,
    state: SessionState,
    /// Cancellation token threaded through the poll loop. Replaced on
    /// reset so an abandoned in-flight poll unwinds.
    cancel: CancellationToken,
}

impl RedesignController {
    /// Create a controller over an arbitrary job source.
    pub fn new(source: Arc<dyn JobSource>, config: ClientConfig) -> Self {
        Self {
            source,
            config,
            phase: JobPhase::Idle,
            state: SessionState::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Create a controller over the live HTTP backend in `config`.
    pub fn live(config: ClientConfig) -> Self {
        let api = RedesignApi::new(config.base_url.clone());
        Self::new(Arc::new(api), config)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> JobPhase {
        self.phase
    }

    /// Last-known job snapshot, if a submission got that far.
    pub fn job(&self) -> Option<&Job> {
        self.state.job.as_ref()
    }

    /// Outcome of the most recent successful run.
    pub fn outcome(&self) -> Option<&RedesignOutcome> {
        self.state.outcome.as_ref()
    }

    /// User-visible message for the most recent failure.
    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error.as_deref()
    }

    /// Submit a redesign job and drive it to completion.
    ///
    /// Validates all preconditions first — a validation failure costs
    /// zero network calls and leaves the phase at `Idle`. On success
    /// the controller moves `Submitting -> Polling -> Succeeded` and
    /// returns the mapped outcome; on failure the phase lands on
    /// `Failed` (or `TimedOut` when the poll budget ran out).
    pub async fn submit(
        &mut self,
        image: Option<ImageUpload>,
        prompt: &str,
        budget: &str,
    ) -> ClientResult<RedesignOutcome> {
        if !self.phase.can_submit() {
            tracing::warn!(phase = ?self.phase, "Submit ignored: a job is already in flight");
            return Err(ClientError::Core(furnish_core::error::CoreError::Validation(
                "A submission is already in progress; reset to start over".into(),
            )));
        }

        self.state.image = image;
        self.state.prompt = prompt.to_string();
        self.state.budget = budget.to_string();
        self.state.last_error = None;
        self.state.outcome = None;

        let request = match self.build_request() {
            Ok(request) => request,
            Err(e) => {
                self.state.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        let result = self.run_pipeline(&request).await;
        self.record(result)
    }

    /// Submit an edit follow-up against the last completed job.
    ///
    /// Reuses the stored budget, requires a previous `Succeeded` run,
    /// and polls the *new* job id returned by the edit endpoint.
    pub async fn submit_edit(&mut self, edit_prompt: &str) -> ClientResult<RedesignOutcome> {
        self.state.edit_prompt = edit_prompt.to_string();
        self.state.last_error = None;

        let target = match self.state.outcome.as_ref() {
            Some(outcome) => outcome.job_id.clone(),
            None => {
                let e = ClientError::MissingJob;
                self.state.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        let request = match self.build_edit_request() {
            Ok(request) => request,
            Err(e) => {
                self.state.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        let result = self.run_edit_pipeline(&target, &request).await;
        let outcome = self.record(result)?;
        self.state.edit_prompt.clear();
        Ok(outcome)
    }

    /// Cancel the in-flight pipeline, if any.
    ///
    /// The poll loop observes the token and returns
    /// [`ClientError::Cancelled`] promptly.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Clear every session field and return to `Idle`.
    ///
    /// The "start new" action: image, prompt, budget, edit prompt,
    /// job snapshot, outcome, and error all revert to their initial
    /// empty values. Also replaces the cancellation token so any
    /// abandoned in-flight poll unwinds.
    pub fn reset(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.state = SessionState::default();
        self.phase = JobPhase::Idle;
        tracing::debug!("Session reset");
    }

    // ---- pipeline internals ----

    fn build_request(&self) -> ClientResult<RedesignRequest> {
        let image = self.state.image.clone().ok_or_else(|| {
            furnish_core::error::CoreError::Validation("Please upload an image of your room".into())
        })?;
        let max_price = parse_budget(&self.state.budget)?;

        let request = RedesignRequest {
            prompt: self.state.prompt.clone(),
            max_price,
            image,
        };
        request.validate()?;
        Ok(request)
    }

    fn build_edit_request(&self) -> ClientResult<EditRequest> {
        let max_price = parse_budget(&self.state.budget)?;
        let request = EditRequest {
            edit_prompt: self.state.edit_prompt.clone(),
            max_price,
        };
        request.validate()?;
        Ok(request)
    }

    async fn run_pipeline(&mut self, request: &RedesignRequest) -> ClientResult<RedesignOutcome> {
        self.phase = JobPhase::Submitting;
        tracing::info!(prompt_len = request.prompt.len(), "Submitting redesign job");

        let job_id = self.source.submit(request).await?;
        tracing::info!(job_id = %job_id, "Job created");

        self.track_and_finish(job_id).await
    }

    async fn run_edit_pipeline(
        &mut self,
        target: &JobId,
        request: &EditRequest,
    ) -> ClientResult<RedesignOutcome> {
        self.phase = JobPhase::Submitting;
        tracing::info!(target_job_id = %target, "Submitting edit job");

        let job_id = self.source.submit_edit(target, request).await?;
        tracing::info!(job_id = %job_id, "Edit job created");

        self.track_and_finish(job_id).await
    }

    /// Poll the given job to completion, then fetch and map its result.
    async fn track_and_finish(&mut self, job_id: JobId) -> ClientResult<RedesignOutcome> {
        self.state.job = Some(Job {
            id: job_id.clone(),
            status: JobStatus::Pending,
            submitted_at: chrono::Utc::now(),
        });

        self.phase = JobPhase::Polling;
        poll_until_done(self.source.as_ref(), &job_id, &self.config.poll, &self.cancel).await?;

        if let Some(job) = self.state.job.as_mut() {
            job.status = JobStatus::Done;
        }

        let payload = self.source.fetch_result(&job_id).await?;
        tracing::info!(
            job_id = %job_id,
            furniture_count = payload.furniture_ids.len(),
            "Result payload fetched",
        );

        Ok(RedesignOutcome {
            result_image_path: naming::result_image_path(&self.config.results_dir, &job_id),
            furniture_paths: naming::furniture_image_paths(
                &self.config.results_dir,
                &job_id,
                &payload.furniture_ids,
            ),
            total_price: payload.total_price,
            job_id,
        })
    }

    /// Record a pipeline result: set the terminal phase, stash the
    /// outcome or the user-visible error message.
    fn record(&mut self, result: ClientResult<RedesignOutcome>) -> ClientResult<RedesignOutcome> {
        match result {
            Ok(outcome) => {
                self.phase = JobPhase::Succeeded;
                self.state.outcome = Some(outcome.clone());
                Ok(outcome)
            }
            Err(e) => {
                self.phase = match e {
                    ClientError::Timeout { .. } => JobPhase::TimedOut,
                    _ => JobPhase::Failed,
                };
                if let Some(job) = self.state.job.as_mut() {
                    if matches!(e, ClientError::JobFailed { .. }) {
                        job.status = JobStatus::Failed;
                    }
                }
                tracing::warn!(error = %e, phase = ?self.phase, "Pipeline failed");
                self.state.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
