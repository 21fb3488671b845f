//! Top-level entry point: validate, start workers, wait, snapshot.

use std::time::Instant;

use tracing::debug;
use volley_types::{Timing, WaitPolicy};

use crate::caller::Caller;
use crate::errors::HarnessError;
use crate::results::RunResults;
use crate::waiter::wait_for_completion;

/// Run every caller on its own worker thread and collect the results.
///
/// Sequence: validate that no caller still has a live worker, apply the
/// policy's pre-run lifecycle actions (`clean_before`, then `reset_before`),
/// start one worker thread per caller (unbounded fan-out), wait for
/// completion under the policy, snapshot each caller's result, apply the
/// post-run lifecycle actions (`reset_after`, then `clean_after`), and
/// return the assembled [`RunResults`]. The snapshot is taken *before* the
/// post-run actions, so `clean_after` cannot discard captured results.
///
/// With `policy.wait = false` this returns as soon as all workers are
/// launched; the snapshot may then hold `None` entries and the workers keep
/// running in the background. Synchronizing with them is the caller's
/// responsibility.
///
/// There is no retry and no cancellation. A target that panics does so on
/// its own worker thread, leaves its descriptor incomplete, and (with
/// `wait = true`) makes the wait phase spin forever, since the harness has
/// no built-in bounded wait. Sibling workers are unaffected either way.
pub fn run_all<A, R>(
    callers: &[Caller<A, R>],
    policy: WaitPolicy,
) -> Result<RunResults<A, R>, HarnessError>
where
    A: Clone + Send + 'static,
    R: Clone + Send + 'static,
{
    let start = Instant::now();

    // Fail fast before any thread exists: a caller with a live worker would
    // be written by two threads at once if started again.
    for caller in callers {
        if caller.is_running() {
            return Err(HarnessError::CallerBusy {
                id: caller.id().clone(),
            });
        }
    }

    if policy.clean_before {
        for caller in callers {
            caller.clean();
        }
    }
    if policy.reset_before {
        for caller in callers {
            caller.reset();
        }
    }

    debug!(callers = callers.len(), wait = policy.wait, "starting workers");
    for caller in callers {
        caller.start()?;
    }

    let waiting = wait_for_completion(callers, &policy);

    let entries = callers
        .iter()
        .map(|caller| (caller.clone(), caller.result()))
        .collect();

    if policy.reset_after {
        for caller in callers {
            caller.reset();
        }
    }
    if policy.clean_after {
        for caller in callers {
            caller.clean();
        }
    }

    let total = Timing::since(start);
    Ok(RunResults::new(entries, total, waiting, policy))
}
