//! Client-side error taxonomy.
//!
//! Every failure in the submit → poll → fetch pipeline collapses into a
//! single [`ClientError`] value; [`ClientError::user_message`] maps each
//! kind to the one user-visible string a view layer should display.

use furnish_core::error::CoreError;
use furnish_core::types::JobId;

/// Errors from the job client pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A submission precondition failed. No network call was made.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The server reported the job as `failed`. Terminal, not retried.
    #[error("Job {job_id} failed on server")]
    JobFailed {
        /// The job that failed.
        job_id: JobId,
    },

    /// The poll attempt budget was exhausted while still `pending`.
    #[error("Job {job_id} did not complete within {attempts} status checks")]
    Timeout {
        /// The job that timed out.
        job_id: JobId,
        /// Number of status checks issued before giving up.
        attempts: u32,
    },

    /// The operation was cancelled via the controller's token.
    #[error("Operation cancelled")]
    Cancelled,

    /// An edit was requested with no completed job in the session.
    #[error("No completed job to edit")]
    MissingJob,
}

/// Convenience type alias for client return values.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// The single user-visible message for this error.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Core(CoreError::Validation(msg)) => msg.clone(),
            ClientError::Request(_) | ClientError::Api { .. } => {
                "Something went wrong talking to the server.".into()
            }
            ClientError::JobFailed { .. } => "Job failed on server.".into(),
            ClientError::Timeout { .. } => "Job did not complete in time.".into(),
            ClientError::Cancelled => "Cancelled.".into(),
            ClientError::MissingJob => "No completed job to edit.".into(),
        }
    }

    /// Whether this error came from precondition validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Core(CoreError::Validation(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_passes_through_verbatim() {
        let err = ClientError::Core(CoreError::Validation("Please provide a budget".into()));
        assert_eq!(err.user_message(), "Please provide a budget");
        assert!(err.is_validation());
    }

    #[test]
    fn timeout_display_names_job_and_attempts() {
        let err = ClientError::Timeout {
            job_id: "42".into(),
            attempts: 70,
        };
        assert_eq!(
            err.to_string(),
            "Job 42 did not complete within 70 status checks"
        );
        assert!(!err.is_validation());
    }
}
