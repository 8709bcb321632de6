//! Scripted in-memory job source for tests and offline mode.
//!
//! [`MockJobSource`] replaces the backend with a scripted status
//! sequence and a canned result payload. Call counters let tests assert
//! exactly how many requests a pipeline issued.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use furnish_core::job::JobStatus;
use furnish_core::request::{EditRequest, RedesignRequest};
use furnish_core::types::JobId;

use crate::api::ResultPayload;
use crate::error::{ClientError, ClientResult};
use crate::source::JobSource;

/// In-memory [`JobSource`] driven by a scripted status sequence.
///
/// Each `status` call pops the front of the script; once the script is
/// exhausted, the last observed status repeats (a drained script with
/// no terminal entry keeps reporting `pending`, which is how timeout
/// scenarios are scripted).
pub struct MockJobSource {
    script: Mutex<VecDeque<JobStatus>>,
    result: Mutex<ResultPayload>,
    /// Error to return from `submit` instead of a job id.
    fail_submit: bool,
    submit_calls: AtomicU32,
    status_calls: AtomicU32,
    edit_calls: AtomicU32,
    result_calls: AtomicU32,
}

impl MockJobSource {
    /// Create a mock whose `status` calls replay `script` in order.
    pub fn with_script(script: impl IntoIterator<Item = JobStatus>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            result: Mutex::new(ResultPayload {
                furniture_ids: Vec::new(),
                total_price: None,
            }),
            fail_submit: false,
            submit_calls: AtomicU32::new(0),
            status_calls: AtomicU32::new(0),
            edit_calls: AtomicU32::new(0),
            result_calls: AtomicU32::new(0),
        }
    }

    /// Create a mock that completes immediately (`[done]`).
    pub fn completing() -> Self {
        Self::with_script([JobStatus::Done])
    }

    /// Replace the canned result payload.
    pub fn with_result(self, result: ResultPayload) -> Self {
        *self.result.lock().expect("result lock poisoned") = result;
        self
    }

    /// Make `submit` and `submit_edit` fail with an API error.
    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    /// Number of `submit` calls observed.
    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::SeqCst)
    }

    /// Number of `status` calls observed.
    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }

    /// Number of `submit_edit` calls observed.
    pub fn edit_calls(&self) -> u32 {
        self.edit_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_result` calls observed.
    pub fn result_calls(&self) -> u32 {
        self.result_calls.load(Ordering::SeqCst)
    }

    /// Total network-equivalent calls observed across all operations.
    pub fn total_calls(&self) -> u32 {
        self.submit_calls() + self.status_calls() + self.edit_calls() + self.result_calls()
    }

    fn submit_error() -> ClientError {
        ClientError::Api {
            status: 500,
            body: "scripted submit failure".into(),
        }
    }

    fn next_status(&self) -> JobStatus {
        let mut script = self.script.lock().expect("script lock poisoned");
        match script.len() {
            0 => JobStatus::Pending,
            1 => *script.front().expect("len checked"),
            _ => script.pop_front().expect("len checked"),
        }
    }
}

#[async_trait]
impl JobSource for MockJobSource {
    async fn submit(&self, _request: &RedesignRequest) -> ClientResult<JobId> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_submit {
            return Err(Self::submit_error());
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn status(&self, _job_id: &JobId) -> ClientResult<JobStatus> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.next_status())
    }

    async fn submit_edit(&self, _job_id: &JobId, _request: &EditRequest) -> ClientResult<JobId> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_submit {
            return Err(Self::submit_error());
        }
        Ok(uuid::Uuid::new_v4().to_string())
    }

    async fn fetch_result(&self, _job_id: &JobId) -> ClientResult<ResultPayload> {
        self.result_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.lock().expect("result lock poisoned").clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn script_replays_in_order_and_last_entry_repeats() {
        let mock = MockJobSource::with_script([JobStatus::Pending, JobStatus::Done]);
        let id: JobId = "j".into();

        assert_eq!(mock.status(&id).await.unwrap(), JobStatus::Pending);
        assert_eq!(mock.status(&id).await.unwrap(), JobStatus::Done);
        // Exhausted script repeats its final entry.
        assert_eq!(mock.status(&id).await.unwrap(), JobStatus::Done);
        assert_eq!(mock.status_calls(), 3);
    }

    #[tokio::test]
    async fn empty_script_reports_pending_forever() {
        let mock = MockJobSource::with_script([]);
        let id: JobId = "j".into();
        assert_eq!(mock.status(&id).await.unwrap(), JobStatus::Pending);
        assert_eq!(mock.status(&id).await.unwrap(), JobStatus::Pending);
    }

    #[tokio::test]
    async fn submit_returns_distinct_ids() {
        let mock = MockJobSource::completing();
        let request = test_request();
        let first = mock.submit(&request).await.unwrap();
        let second = mock.submit(&request).await.unwrap();
        assert_ne!(first, second);
        assert_eq!(mock.submit_calls(), 2);
    }

    fn test_request() -> RedesignRequest {
        RedesignRequest {
            prompt: "cozy".into(),
            max_price: 100.0,
            image: furnish_core::request::ImageUpload::new(
                "room.jpg",
                vec![0xFF, 0xD8, 0xFF, 0xE0],
            ),
        }
    }
}
