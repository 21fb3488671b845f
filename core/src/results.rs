//! Aggregate output of one orchestration run.

use volley_types::{CallId, CallResult, Timing, WaitPolicy};

use crate::caller::Caller;
use crate::errors::LookupError;

/// Find the first caller whose identifier equals `id`.
///
/// Linear scan in input order; identifiers need not be unique, so with
/// duplicates the earliest match wins. Fails with a [`LookupError`] that
/// enumerates every known identifier.
pub fn find_caller<'a, A, R>(
    callers: impl IntoIterator<Item = &'a Caller<A, R>>,
    id: &CallId,
) -> Result<&'a Caller<A, R>, LookupError>
where
    A: 'a,
    R: 'a,
{
    let mut known = Vec::new();
    for caller in callers {
        if caller.id() == id {
            return Ok(caller);
        }
        known.push(caller.id().to_string());
    }
    Err(LookupError::new(id.clone(), known))
}

/// Snapshot of one orchestration run: each caller paired with the result it
/// held when the snapshot was taken, in input order.
///
/// A `None` result means the caller had not completed at snapshot time,
/// possible only when the run used `wait = false` or the call failed. The
/// snapshot itself is immutable; the `Caller` entries are live handles onto
/// the same descriptors the run was given, so a background worker finishing
/// later is visible through [`Caller::result`], never through
/// [`RunResults::result`].
#[derive(Debug)]
pub struct RunResults<A, R> {
    entries: Vec<(Caller<A, R>, Option<CallResult<R>>)>,
    total: Timing,
    waiting: Timing,
    policy: WaitPolicy,
}

impl<A, R> RunResults<A, R> {
    pub(crate) fn new(
        entries: Vec<(Caller<A, R>, Option<CallResult<R>>)>,
        total: Timing,
        waiting: Timing,
        policy: WaitPolicy,
    ) -> Self {
        Self {
            entries,
            total,
            waiting,
            policy,
        }
    }

    /// Find the first caller with the given identifier.
    pub fn caller(&self, id: &CallId) -> Result<&Caller<A, R>, LookupError> {
        find_caller(self.entries.iter().map(|(caller, _)| caller), id)
    }

    /// Find the snapshotted result of the first caller with the given
    /// identifier.
    ///
    /// `Ok(None)` means the caller exists but had not completed when the
    /// snapshot was taken.
    pub fn result(&self, id: &CallId) -> Result<Option<&CallResult<R>>, LookupError> {
        let mut known = Vec::new();
        for (caller, result) in &self.entries {
            if caller.id() == id {
                return Ok(result.as_ref());
            }
            known.push(caller.id().to_string());
        }
        Err(LookupError::new(id.clone(), known))
    }

    /// The snapshotted entries, in input order.
    #[must_use]
    pub fn entries(&self) -> &[(Caller<A, R>, Option<CallResult<R>>)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Caller<A, R>, Option<CallResult<R>>)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timing of the whole orchestration, validation through snapshot.
    #[must_use]
    pub fn total(&self) -> Timing {
        self.total
    }

    /// Timing of the wait phase alone.
    #[must_use]
    pub fn waiting(&self) -> Timing {
        self.waiting
    }

    /// The policy the run was executed under.
    #[must_use]
    pub fn policy(&self) -> &WaitPolicy {
        &self.policy
    }
}
