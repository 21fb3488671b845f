//! Call descriptors: one unit of deferred work each.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{debug, trace};
use volley_types::{CallId, CallResult, Timing};

use crate::errors::HarnessError;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mutable call state, shared between descriptor handles and the worker.
///
/// Single-writer discipline: the flags and slots are written either by the
/// descriptor's own worker thread (during `invoke`) or by the orchestrator
/// thread while no worker is running against this descriptor. The atomics
/// exist so the waiter can poll `completed` from another thread; the mutexes
/// are uncontended by construction.
struct CallState<A, R> {
    invoked: AtomicBool,
    completed: AtomicBool,
    args: Mutex<A>,
    result: Mutex<Option<CallResult<R>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// A unit of deferred work: a callable plus its argument value, an
/// identifier, and lifecycle flags.
///
/// The argument is a single value of type `A`; wrap multiple arguments in a
/// tuple or struct. Cloning a `Caller` produces another handle onto the same
/// underlying call (flags, stored arguments, result, and worker handle are
/// all shared), which is how a [`RunResults`](crate::RunResults) snapshot can
/// refer to the very descriptors the creator of the run still holds.
///
/// Descriptors are reusable: [`Caller::reset`] clears the lifecycle flags for
/// re-invocation and [`Caller::clean`] additionally discards the previous
/// worker handle and result. The harness never destroys a descriptor; its
/// lifetime belongs to whoever created it.
pub struct Caller<A, R> {
    id: CallId,
    target: Arc<dyn Fn(A) -> R + Send + Sync>,
    state: Arc<CallState<A, R>>,
}

impl<A, R> Clone for Caller<A, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            target: Arc::clone(&self.target),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A, R> fmt::Debug for Caller<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Caller")
            .field("id", &self.id)
            .field("invoked", &self.invoked())
            .field("completed", &self.completed())
            .finish_non_exhaustive()
    }
}

impl<A, R> Caller<A, R> {
    /// Wrap a callable and its argument value under a generated identifier.
    pub fn new(target: impl Fn(A) -> R + Send + Sync + 'static, args: A) -> Self {
        Self::with_id(CallId::generate(), target, args)
    }

    /// Wrap a callable under an explicit identifier.
    pub fn with_id(
        id: impl Into<CallId>,
        target: impl Fn(A) -> R + Send + Sync + 'static,
        args: A,
    ) -> Self {
        Self {
            id: id.into(),
            target: Arc::new(target),
            state: Arc::new(CallState {
                invoked: AtomicBool::new(false),
                completed: AtomicBool::new(false),
                args: Mutex::new(args),
                result: Mutex::new(None),
                worker: Mutex::new(None),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> &CallId {
        &self.id
    }

    /// Whether the target has been entered since the last reset.
    #[must_use]
    pub fn invoked(&self) -> bool {
        self.state.invoked.load(Ordering::Acquire)
    }

    /// Whether the target has returned since the last reset.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.state.completed.load(Ordering::Acquire)
    }

    /// Whether a started worker is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        lock(&self.state.worker)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Replace the stored argument value.
    pub fn set_args(&self, args: A) {
        *lock(&self.state.args) = args;
    }

    /// Remove and return the worker handle, if any.
    ///
    /// Joining the returned handle is how a panic in the target becomes
    /// observable: `join` yields `Err` for a panicked worker.
    #[must_use]
    pub fn take_worker(&self) -> Option<JoinHandle<()>> {
        lock(&self.state.worker).take()
    }

    /// Clear the `invoked`/`completed` flags so the descriptor can run again.
    ///
    /// Leaves the stored result and worker handle untouched; idempotent.
    pub fn reset(&self) {
        self.state.invoked.store(false, Ordering::Release);
        self.state.completed.store(false, Ordering::Release);
    }

    /// Discard the worker handle and stored result, and reset the flags.
    ///
    /// After `clean` the descriptor is indistinguishable from a freshly
    /// constructed one, apart from its stored arguments.
    pub fn clean(&self) {
        trace!(id = %self.id, "cleaning caller state");
        drop(lock(&self.state.worker).take());
        *lock(&self.state.result) = None;
        self.reset();
    }
}

impl<A, R: Clone> Caller<A, R> {
    /// The result of the most recent completed invocation, if still stored.
    #[must_use]
    pub fn result(&self) -> Option<CallResult<R>> {
        lock(&self.state.result).clone()
    }

    /// Run the target with the supplied argument value instead of the stored
    /// one, synchronously on the calling thread.
    ///
    /// The stored arguments are not replaced; use [`Caller::set_args`] for
    /// that.
    pub fn invoke_with(&self, args: A) -> CallResult<R> {
        let start = Instant::now();
        self.state.invoked.store(true, Ordering::Release);

        // A panic here unwinds the calling thread with `completed` still
        // false; the harness does not catch it.
        let returns = (self.target)(args);

        let timing = Timing::new(start, Instant::now());
        let result = CallResult::new(returns, Some(thread::current().id()), timing);
        *lock(&self.state.result) = Some(result.clone());
        self.state.completed.store(true, Ordering::Release);
        result
    }
}

impl<A: Clone, R: Clone> Caller<A, R> {
    /// A copy of the stored argument value.
    #[must_use]
    pub fn args(&self) -> A {
        lock(&self.state.args).clone()
    }

    /// Run the target with the stored argument value, synchronously on the
    /// calling thread.
    pub fn invoke(&self) -> CallResult<R> {
        let args = self.args();
        self.invoke_with(args)
    }
}

impl<A, R> Caller<A, R>
where
    A: Clone + Send + 'static,
    R: Clone + Send + 'static,
{
    /// Launch [`Caller::invoke`] on a newly created worker thread and store
    /// the join handle on the descriptor. Fire-and-forget: the worker is not
    /// joined by the harness.
    ///
    /// Fails with [`HarnessError::CallerBusy`] if a previous worker is still
    /// running; two concurrent workers on one descriptor would both write its
    /// state.
    pub fn start(&self) -> Result<(), HarnessError> {
        let mut worker = lock(&self.state.worker);
        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return Err(HarnessError::CallerBusy {
                id: self.id.clone(),
            });
        }

        debug!(id = %self.id, "spawning worker thread");
        let this = self.clone();
        let handle = thread::Builder::new()
            .name(format!("volley-{}", self.id))
            .spawn(move || {
                let _ = this.invoke();
            })
            .map_err(|source| HarnessError::Spawn {
                id: self.id.clone(),
                source,
            })?;
        *worker = Some(handle);
        Ok(())
    }
}

impl<R> Caller<(), R> {
    /// Wrap a zero-argument callable under a generated identifier.
    pub fn from_fn(target: impl Fn() -> R + Send + Sync + 'static) -> Self {
        Self::new(move |()| target(), ())
    }
}
