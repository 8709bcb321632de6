//! Swappable job data-source seam.
//!
//! [`JobSource`] is the capability set the poll controller needs:
//! submit, status, edit, fetch-result. The live implementation is
//! [`RedesignApi`]; tests and offline mode use
//! [`MockJobSource`](crate::mock::MockJobSource).

use async_trait::async_trait;

use furnish_core::job::JobStatus;
use furnish_core::request::{EditRequest, RedesignRequest};
use furnish_core::types::JobId;

use crate::api::{RedesignApi, ResultPayload};
use crate::error::ClientResult;

/// Backend capability set used by the submission/poll controller.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Create a redesign job; returns the server-assigned id.
    async fn submit(&self, request: &RedesignRequest) -> ClientResult<JobId>;

    /// Fetch the current status of a job.
    async fn status(&self, job_id: &JobId) -> ClientResult<JobStatus>;

    /// Create an edit follow-up job; returns a fresh id.
    async fn submit_edit(&self, job_id: &JobId, request: &EditRequest) -> ClientResult<JobId>;

    /// Fetch the result payload of a completed job.
    async fn fetch_result(&self, job_id: &JobId) -> ClientResult<ResultPayload>;
}

#[async_trait]
impl JobSource for RedesignApi {
    async fn submit(&self, request: &RedesignRequest) -> ClientResult<JobId> {
        Ok(RedesignApi::submit(self, request).await?.job_id)
    }

    async fn status(&self, job_id: &JobId) -> ClientResult<JobStatus> {
        Ok(RedesignApi::status(self, job_id).await?.job_status)
    }

    async fn submit_edit(&self, job_id: &JobId, request: &EditRequest) -> ClientResult<JobId> {
        Ok(RedesignApi::submit_edit(self, job_id, request).await?.job_id)
    }

    async fn fetch_result(&self, job_id: &JobId) -> ClientResult<ResultPayload> {
        RedesignApi::fetch_result(self, job_id).await
    }
}
