//! True-parallelism scenarios: many sleeping callers finishing together.

use std::time::Duration;

use volley_core::{CallId, Caller, WaitPolicy, run_all};

const CALLS: u64 = 50;
const CALL_SLEEP: Duration = Duration::from_millis(10);

fn sleeper(n: u64) -> u64 {
    std::thread::sleep(CALL_SLEEP);
    n
}

#[test]
fn fifty_sleepers_run_in_parallel_not_sequentially() {
    let callers: Vec<_> = (0..CALLS)
        .map(|n| Caller::with_id(format!("call-{n}"), sleeper, n))
        .collect();

    let policy = WaitPolicy::new().with_fixed_sleep(Duration::from_millis(1));
    let results = run_all(&callers, policy).expect("run");

    assert_eq!(results.len(), CALLS as usize);
    for (n, (caller, result)) in results.iter().enumerate() {
        let result = result.as_ref().expect("every call completed");
        assert_eq!(*result.returns(), n as u64);
        assert!(caller.completed());
        assert!(result.worker().is_some());
    }

    // Sequential execution would take CALLS * CALL_SLEEP = 500ms. Allow a
    // generous margin for thread scheduling, but stay far below that.
    let serial = CALL_SLEEP * CALLS as u32;
    assert!(
        results.total().duration() < serial / 2,
        "total {:?} suggests sequential execution",
        results.total().duration()
    );
    assert!(results.total().duration() >= CALL_SLEEP);
}

#[test]
fn total_timing_covers_the_wait_phase() {
    let callers: Vec<_> = (0..8u64)
        .map(|n| Caller::with_id(format!("call-{n}"), sleeper, n))
        .collect();

    let results = run_all(&callers, WaitPolicy::default()).expect("run");

    assert!(results.total().duration() >= results.waiting().duration());
    assert!(results.total().start() <= results.waiting().start());
    assert!(results.total().end() >= results.waiting().end());
}

#[test]
fn results_are_addressable_by_identifier() {
    let callers: Vec<_> = (0..5u64)
        .map(|n| Caller::with_id(format!("call-{n}"), sleeper, n))
        .collect();

    let results = run_all(&callers, WaitPolicy::default()).expect("run");

    let caller = results.caller(&CallId::new("call-3")).expect("caller");
    assert_eq!(caller.id().as_str(), "call-3");

    let result = results
        .result(&CallId::new("call-3"))
        .expect("found")
        .expect("completed");
    assert_eq!(*result.returns(), 3);

    let err = results.caller(&CallId::new("call-99")).unwrap_err();
    assert!(err.to_string().contains("call-0"));
    assert!(err.to_string().contains("call-4"));
}
