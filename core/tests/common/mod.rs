//! Shared helpers for the integration suite.

use std::time::{Duration, Instant};

use volley_core::Caller;

/// Poll a caller's completion flag with an external deadline, so a test can
/// observe "never completes" without hanging the suite.
pub fn wait_until_completed<A, R>(caller: &Caller<A, R>, deadline: Duration) -> bool {
    let end = Instant::now() + deadline;
    while Instant::now() < end {
        if caller.completed() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    caller.completed()
}
