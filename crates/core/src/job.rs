//! Job status and client-side phase modeling.
//!
//! [`JobStatus`] mirrors the server's `job_status` wire field.
//! [`JobPhase`] tracks the client-side lifecycle of one submission:
//! `Idle -> Submitting -> Polling -> {Succeeded, Failed, TimedOut}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{JobId, Timestamp};

/// Server-reported status of a redesign job.
///
/// Serialized in lowercase to match the `job_status` field of
/// `GET /jobs/status/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Queued or generating; keep polling.
    Pending,
    /// Generation finished; results are available.
    Done,
    /// Generation failed server-side. Terminal, not retryable.
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Done => "done",
            JobStatus::Failed => "failed",
        }
    }

    /// Whether no further status transition can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Failed)
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "done" => Ok(JobStatus::Done),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(format!("Invalid job status: {s}")),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only snapshot of a server-tracked job.
///
/// Created when submission succeeds and refreshed by polling; only the
/// remote server mutates the underlying job.
#[derive(Debug, Clone)]
pub struct Job {
    /// Server-assigned opaque identifier.
    pub id: JobId,
    /// Last observed status.
    pub status: JobStatus,
    /// When the client submitted the job.
    pub submitted_at: Timestamp,
}

/// Client-side lifecycle phase of a job-in-progress.
///
/// Terminal phases are `Succeeded`, `Failed`, and `TimedOut`; only
/// `Idle` is re-enterable, via an explicit reset that clears all
/// session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPhase {
    /// No submission in flight. The only phase new work may start from.
    Idle,
    /// The create request has been sent; awaiting a job id.
    Submitting,
    /// Status polling is underway.
    Polling,
    /// Results were fetched and mapped.
    Succeeded,
    /// Submission, polling, or result fetch failed.
    Failed,
    /// The poll attempt budget was exhausted while still pending.
    TimedOut,
}

impl JobPhase {
    /// Whether this phase admits no further transition (short of reset).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobPhase::Succeeded | JobPhase::Failed | JobPhase::TimedOut
        )
    }

    /// Whether a new submission may start from this phase.
    pub fn can_submit(&self) -> bool {
        matches!(self, JobPhase::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [JobStatus::Pending, JobStatus::Done, JobStatus::Failed] {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!("queued".parse::<JobStatus>().is_err());
        assert!("".parse::<JobStatus>().is_err());
    }

    #[test]
    fn status_deserializes_from_lowercase_wire_value() {
        let status: JobStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, JobStatus::Pending);
    }

    #[test]
    fn pending_is_not_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn only_idle_can_submit() {
        assert!(JobPhase::Idle.can_submit());
        for phase in [
            JobPhase::Submitting,
            JobPhase::Polling,
            JobPhase::Succeeded,
            JobPhase::Failed,
            JobPhase::TimedOut,
        ] {
            assert!(!phase.can_submit());
        }
    }

    #[test]
    fn terminal_phases() {
        assert!(JobPhase::Succeeded.is_terminal());
        assert!(JobPhase::Failed.is_terminal());
        assert!(JobPhase::TimedOut.is_terminal());
        assert!(!JobPhase::Idle.is_terminal());
        assert!(!JobPhase::Submitting.is_terminal());
        assert!(!JobPhase::Polling.is_terminal());
    }
}
