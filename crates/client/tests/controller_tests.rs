//! Integration tests for the submission/poll controller.
//!
//! Exercises the full validate → submit → poll → fetch pipeline against
//! [`MockJobSource`], asserting phases, mapped artifact paths, and that
//! validation failures never reach the network.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;

use furnish_client::api::ResultPayload;
use furnish_client::poller::PollConfig;
use furnish_client::{ClientConfig, ClientError, MockJobSource, RedesignController};
use furnish_core::job::{JobPhase, JobStatus};
use furnish_core::request::ImageUpload;

fn fast_config() -> ClientConfig {
    ClientConfig {
        poll: PollConfig {
            interval: Duration::from_millis(1),
            max_attempts: 4,
            backoff: None,
        },
        ..Default::default()
    }
}

fn controller(mock: MockJobSource) -> (RedesignController, Arc<MockJobSource>) {
    let source = Arc::new(mock);
    (
        RedesignController::new(source.clone(), fast_config()),
        source,
    )
}

/// Minimal JPEG header: enough for format sniffing.
fn jpeg() -> ImageUpload {
    ImageUpload::new("room.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

// ---------------------------------------------------------------------------
// Validation never touches the network
// ---------------------------------------------------------------------------

/// Missing image, empty prompt, and empty budget each yield a
/// validation error with zero network-equivalent calls, leaving the
/// phase at `Idle`.
#[tokio::test]
async fn validation_failures_issue_no_calls() {
    let (mut controller, source) = controller(MockJobSource::completing());

    let err = controller.submit(None, "cozy den", "100").await.unwrap_err();
    assert!(err.is_validation());

    let err = controller
        .submit(Some(jpeg()), "   ", "100")
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = controller
        .submit(Some(jpeg()), "cozy den", "")
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(source.total_calls(), 0);
    assert_eq!(controller.phase(), JobPhase::Idle);
    assert!(controller.last_error().is_some());
}

/// A non-numeric budget is a validation error, not a transport error.
#[tokio::test]
async fn unparseable_budget_is_validation() {
    let (mut controller, source) = controller(MockJobSource::completing());

    let err = controller
        .submit(Some(jpeg()), "cozy den", "a lot")
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(source.total_calls(), 0);
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

/// A full run maps the result payload into artifact paths following the
/// fixed naming convention, in input order, and lands on `Succeeded`.
#[tokio::test]
async fn successful_run_maps_artifact_paths() {
    let mock = MockJobSource::with_script([JobStatus::Pending, JobStatus::Done]).with_result(
        ResultPayload {
            furniture_ids: vec!["a".into(), "b".into()],
            total_price: Some(700.0),
        },
    );
    let (mut controller, source) = controller(mock);

    let outcome = controller
        .submit(Some(jpeg()), "mid-century modern", "1000")
        .await
        .unwrap();

    let id = &outcome.job_id;
    assert_eq!(outcome.result_image_path, format!("results/{id}.png"));
    assert_eq!(
        outcome.furniture_paths,
        vec![
            format!("results/{id}_furniture_a.jpg"),
            format!("results/{id}_furniture_b.jpg"),
        ]
    );
    assert_eq!(outcome.total_price, Some(700.0));

    assert_eq!(controller.phase(), JobPhase::Succeeded);
    assert_eq!(source.submit_calls(), 1);
    assert_eq!(source.status_calls(), 2);
    assert_eq!(source.result_calls(), 1);
    assert!(controller.last_error().is_none());
}

/// A zero total price is a legitimate value, not "no price".
#[tokio::test]
async fn zero_total_price_is_preserved() {
    let mock = MockJobSource::completing().with_result(ResultPayload {
        furniture_ids: vec![],
        total_price: Some(0.0),
    });
    let (mut controller, _source) = controller(mock);

    let outcome = controller
        .submit(Some(jpeg()), "spartan", "50")
        .await
        .unwrap();

    assert_eq!(outcome.total_price, Some(0.0));
    assert!(outcome.furniture_paths.is_empty());
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

/// A server-side `failed` status lands on `Failed` without fetching
/// results.
#[tokio::test]
async fn server_failure_skips_result_fetch() {
    let (mut controller, source) = controller(MockJobSource::with_script([JobStatus::Failed]));

    let err = controller
        .submit(Some(jpeg()), "cozy den", "100")
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::JobFailed { .. });
    assert_eq!(controller.phase(), JobPhase::Failed);
    assert_eq!(source.result_calls(), 0);
    assert_eq!(controller.job().map(|j| j.status), Some(JobStatus::Failed));
}

/// Exhausting the poll budget lands on `TimedOut` with exactly
/// `max_attempts` status calls.
#[tokio::test]
async fn poll_budget_exhaustion_lands_on_timed_out() {
    let (mut controller, source) = controller(MockJobSource::with_script([]));

    let err = controller
        .submit(Some(jpeg()), "cozy den", "100")
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Timeout { attempts: 4, .. });
    assert_eq!(controller.phase(), JobPhase::TimedOut);
    assert_eq!(source.status_calls(), 4);
    assert_eq!(source.result_calls(), 0);
}

/// A failing create call surfaces as "submission failed" without any
/// status polling.
#[tokio::test]
async fn failed_submission_polls_nothing() {
    let (mut controller, source) = controller(MockJobSource::completing().failing_submit());

    let err = controller
        .submit(Some(jpeg()), "cozy den", "100")
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Api { status: 500, .. });
    assert_eq!(controller.phase(), JobPhase::Failed);
    assert_eq!(source.status_calls(), 0);
}

// ---------------------------------------------------------------------------
// Edit flow
// ---------------------------------------------------------------------------

/// An edit reuses the stored budget, targets the completed job, and
/// produces a fresh outcome under the new job id.
#[tokio::test]
async fn edit_runs_the_same_pipeline_under_a_new_id() {
    let mock = MockJobSource::with_script([JobStatus::Done, JobStatus::Done]).with_result(
        ResultPayload {
            furniture_ids: vec!["c".into()],
            total_price: Some(250.0),
        },
    );
    let (mut controller, source) = controller(mock);

    let first = controller
        .submit(Some(jpeg()), "cozy den", "500")
        .await
        .unwrap();

    let second = controller.submit_edit("swap the rug").await.unwrap();

    assert_ne!(first.job_id, second.job_id);
    assert_eq!(
        second.furniture_paths,
        vec![format!("results/{}_furniture_c.jpg", second.job_id)]
    );
    assert_eq!(controller.phase(), JobPhase::Succeeded);
    assert_eq!(source.edit_calls(), 1);
}

/// An empty edit prompt is a validation error with no network calls.
#[tokio::test]
async fn empty_edit_prompt_is_validation() {
    let (mut controller, source) = controller(MockJobSource::completing());

    controller
        .submit(Some(jpeg()), "cozy den", "500")
        .await
        .unwrap();
    let calls_after_submit = source.total_calls();

    let err = controller.submit_edit("   ").await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(source.total_calls(), calls_after_submit);
}

/// Editing before any successful run reports `MissingJob`.
#[tokio::test]
async fn edit_without_a_job_is_rejected() {
    let (mut controller, source) = controller(MockJobSource::completing());

    let err = controller.submit_edit("brighter").await.unwrap_err();
    assert_matches!(err, ClientError::MissingJob);
    assert_eq!(source.total_calls(), 0);
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// Reset clears every session field back to its initial empty value and
/// re-enters `Idle`, after which a fresh submission is allowed.
#[tokio::test]
async fn reset_restores_the_initial_session() {
    let (mut controller, source) = controller(MockJobSource::completing());

    controller
        .submit(Some(jpeg()), "cozy den", "500")
        .await
        .unwrap();
    assert_eq!(controller.phase(), JobPhase::Succeeded);
    assert!(controller.outcome().is_some());
    assert!(controller.job().is_some());

    controller.reset();

    assert_eq!(controller.phase(), JobPhase::Idle);
    assert!(controller.outcome().is_none());
    assert!(controller.job().is_none());
    assert!(controller.last_error().is_none());

    // A fresh submission proceeds normally after reset.
    controller
        .submit(Some(jpeg()), "new room", "300")
        .await
        .unwrap();
    assert_eq!(source.submit_calls(), 2);
}
