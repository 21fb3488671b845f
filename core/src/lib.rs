//! Parallel invocation harness.
//!
//! Volley runs a collection of independent callables, one dedicated OS thread
//! per call, waits for all of them under a configurable [`WaitPolicy`], and
//! returns a [`RunResults`] snapshot with per-call timing, return values, and
//! identifiers.
//!
//! The waiter is a deliberate busy-polling design: it re-checks completion
//! flags on a configurable interval rather than parking on a condition
//! variable. That keeps the coordination lock-free and portable at a
//! CPU-vs-latency cost controlled by the interval. `WaitPolicy::wait = false`
//! is the non-blocking escape hatch: the orchestrator returns immediately and
//! callers own any further synchronization with the still-running workers.
//!
//! There is no retry, no cancellation, and no error aggregation. A callable
//! that panics does so on its own worker thread; the harness neither catches
//! nor observes it, sibling workers are unaffected, and the failed call never
//! reports complete (see [`run_all`] for the hang hazard this implies).

mod caller;
mod errors;
mod orchestrator;
mod results;
mod waiter;

pub use caller::Caller;
pub use errors::{HarnessError, LookupError};
pub use orchestrator::run_all;
pub use results::{RunResults, find_caller};
pub use waiter::wait_for_completion;

pub use volley_types::{CallId, CallResult, SleepInterval, Timing, WaitPolicy};
