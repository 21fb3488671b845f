//! Completion waiter: busy-polls a set of callers until all report complete.

use std::thread;
use std::time::Instant;

use tracing::trace;
use volley_types::{SleepInterval, Timing, WaitPolicy};

use crate::caller::Caller;

/// Poll `callers` until every one reports `completed`, returning a [`Timing`]
/// that spans the wait.
///
/// With `policy.wait = false` this returns immediately with a zero-duration
/// record. Otherwise each iteration checks every caller's completion flag and
/// then sleeps for the poll interval minus the time the check itself took, so
/// the cadence stays close to the configured interval instead of drifting. A
/// [`SleepInterval::Dynamic`] interval is recomputed every iteration; a
/// [`SleepInterval::Fixed`] one is read once at loop entry.
///
/// This is a deliberate busy-polling design, not a condition-variable wait:
/// it keeps the coordination lock-free and portable, trading CPU for wakeup
/// latency under the control of the interval. A caller whose target panicked
/// never reports complete, so this function then never returns; there is no
/// built-in bounded wait. Callers that need a deadline must enforce it
/// externally (or opt out with `wait = false`).
pub fn wait_for_completion<A, R>(callers: &[Caller<A, R>], policy: &WaitPolicy) -> Timing {
    let start = Instant::now();
    if !policy.wait {
        return Timing::new(start, start);
    }

    let fixed = match &policy.sleep {
        SleepInterval::Fixed(interval) => Some(*interval),
        SleepInterval::Dynamic(_) => None,
    };

    trace!(callers = callers.len(), "waiting for completion");
    loop {
        let iteration = Instant::now();
        if callers.iter().all(Caller::completed) {
            break;
        }

        let interval = fixed.unwrap_or_else(|| policy.sleep.current());
        if let Some(remaining) = interval.checked_sub(iteration.elapsed()) {
            thread::sleep(remaining);
        }
    }

    let timing = Timing::since(start);
    trace!(waited_us = timing.duration().as_micros() as u64, "all callers complete");
    timing
}
