//! The non-blocking escape hatch: `wait = false` returns before workers do.

use std::time::Duration;

use volley_core::{CallId, Caller, WaitPolicy, run_all};

use crate::common::wait_until_completed;

const CALL_SLEEP: Duration = Duration::from_millis(200);

#[test]
fn returns_before_slow_workers_finish() {
    let caller = Caller::with_id("slow", |n: u32| {
        std::thread::sleep(CALL_SLEEP);
        n
    }, 9);

    let policy = WaitPolicy::new().with_wait(false);
    let results = run_all(&[caller.clone()], policy).expect("run");

    // Orchestration overhead only: far below the callable's own runtime.
    assert!(results.total().duration() < CALL_SLEEP / 2);
    assert_eq!(results.waiting().duration(), Duration::ZERO);

    // The snapshot was taken before the worker finished.
    let snapshotted = results.result(&CallId::new("slow")).expect("found");
    assert!(snapshotted.is_none());

    // The worker keeps running in the background; the live descriptor handle
    // sees its completion, the immutable snapshot never does.
    assert!(wait_until_completed(&caller, Duration::from_secs(5)));
    let live = caller.result().expect("result stored after completion");
    assert_eq!(*live.returns(), 9);
    let snapshotted = results.result(&CallId::new("slow")).expect("found");
    assert!(snapshotted.is_none());

    caller.take_worker().expect("worker").join().expect("join");
}

#[test]
fn no_wait_policy_is_carried_on_the_results() {
    let caller = Caller::from_fn(|| ());
    let policy = WaitPolicy::new().with_wait(false);

    let results = run_all(&[caller.clone()], policy).expect("run");

    assert!(!results.policy().wait);
    assert!(wait_until_completed(&caller, Duration::from_secs(5)));
}
