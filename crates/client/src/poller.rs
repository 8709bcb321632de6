//! Cancellable status polling with an attempt budget.
//!
//! [`poll_until_done`] issues one status request per attempt at a fixed
//! cadence (optionally growing under [`BackoffConfig`]) until the job
//! reaches a terminal status, the budget runs out, or the
//! [`CancellationToken`] is triggered.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use furnish_core::job::JobStatus;
use furnish_core::types::JobId;

use crate::error::{ClientError, ClientResult};
use crate::source::JobSource;

/// Tunable parameters for the polling loop.
///
/// The defaults are the production cadence: one status check every two
/// seconds, up to seventy attempts, no backoff. Tests shrink both.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between consecutive status checks.
    pub interval: Duration,
    /// Hard ceiling on status checks before giving up as timed out.
    pub max_attempts: u32,
    /// Optional exponential growth of the delay between attempts.
    pub backoff: Option<BackoffConfig>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 70,
            backoff: None,
        }
    }
}

/// Exponential-backoff parameters for the inter-attempt delay.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Factor by which the delay grows after each attempt.
    pub multiplier: f64,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            multiplier: 2.0,
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Calculate the next inter-attempt delay from the current delay.
///
/// The result is clamped to [`BackoffConfig::max_delay`].
pub fn next_delay(current: Duration, config: &BackoffConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Poll a job's status until a terminal state, timeout, or cancellation.
///
/// - Returns `Ok(())` immediately on the first `done` observation.
/// - Returns [`ClientError::JobFailed`] immediately on `failed`,
///   consuming no further attempts.
/// - Returns [`ClientError::Timeout`] once `max_attempts` checks have
///   all observed `pending`.
/// - A transport error on any single check is immediately fatal.
/// - Returns [`ClientError::Cancelled`] as soon as `cancel` triggers,
///   including mid-sleep.
///
/// Sleeps only *between* attempts; a terminal observation never incurs
/// a trailing delay.
pub async fn poll_until_done(
    source: &dyn JobSource,
    job_id: &JobId,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> ClientResult<()> {
    let mut delay = config.interval;

    for attempt in 1..=config.max_attempts {
        if cancel.is_cancelled() {
            tracing::info!(job_id = %job_id, "Polling cancelled");
            return Err(ClientError::Cancelled);
        }

        let status = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(job_id = %job_id, "Polling cancelled");
                return Err(ClientError::Cancelled);
            }
            result = source.status(job_id) => result?,
        };

        tracing::debug!(job_id = %job_id, attempt, status = %status, "Status check");

        match status {
            JobStatus::Done => {
                tracing::info!(job_id = %job_id, attempt, "Job completed");
                return Ok(());
            }
            JobStatus::Failed => {
                tracing::warn!(job_id = %job_id, attempt, "Job failed on server");
                return Err(ClientError::JobFailed {
                    job_id: job_id.clone(),
                });
            }
            JobStatus::Pending => {}
        }

        // Still pending. Wait before the next attempt, respecting
        // cancellation; the final attempt gets no trailing sleep.
        if attempt < config.max_attempts {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(job_id = %job_id, "Polling cancelled");
                    return Err(ClientError::Cancelled);
                }
                _ = tokio::time::sleep(delay) => {}
            }

            if let Some(ref backoff) = config.backoff {
                delay = next_delay(delay, backoff);
            }
        }
    }

    tracing::warn!(
        job_id = %job_id,
        attempts = config.max_attempts,
        "Poll attempt budget exhausted",
    );
    Err(ClientError::Timeout {
        job_id: job_id.clone(),
        attempts: config.max_attempts,
    })
}
