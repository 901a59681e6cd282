//! Retry helper and endpoint probe tests.

mod common;

use common::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use vcadmin::models::endpoint::{EndpointStatus, probe};
use vcadmin::retry::with_backoff;

#[actix_rt::test]
async fn succeeds_on_first_attempt_without_sleeping() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, &str> = with_backoff(3, Duration::from_millis(1), |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok(42) }
    })
    .await;

    assert_eq!(result.expect("should succeed"), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn retries_until_transient_failure_clears() {
    let result: Result<u32, &str> = with_backoff(5, Duration::from_millis(1), |attempt| async move {
        if attempt < 3 { Err("not yet") } else { Ok(attempt) }
    })
    .await;

    assert_eq!(result.expect("should succeed on third attempt"), 3);
}

#[actix_rt::test]
async fn surfaces_last_error_after_exhausting_attempts() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, String> = with_backoff(4, Duration::from_millis(1), |attempt| {
        calls.fetch_add(1, Ordering::SeqCst);
        async move { Err(format!("attempt {attempt} failed")) }
    })
    .await;

    assert_eq!(result.expect_err("should fail"), "attempt 4 failed");
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[actix_rt::test]
async fn zero_attempts_still_runs_once() {
    let calls = AtomicU32::new(0);
    let result: Result<u32, &str> = with_backoff(0, Duration::from_millis(1), |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok(7) }
    })
    .await;

    assert_eq!(result.expect("should succeed"), 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[actix_rt::test]
async fn probe_outcome_is_deterministic_per_endpoint() {
    let ep = endpoint("EP-1700000000001", "Boardroom Bridge A");

    let first = probe(&ep).await;
    let second = probe(&ep).await;
    assert_eq!(first, second);
    assert!(matches!(
        first,
        EndpointStatus::Connected | EndpointStatus::Disconnected
    ));
}
