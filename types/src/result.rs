use std::thread::ThreadId;

use crate::Timing;

/// Immutable record of one completed invocation.
///
/// Created exactly once per successful call; a re-invocation of the same
/// descriptor replaces the previous record wholesale.
#[derive(Debug, Clone)]
pub struct CallResult<R> {
    returns: R,
    worker: Option<ThreadId>,
    timing: Timing,
}

impl<R> CallResult<R> {
    #[must_use]
    pub fn new(returns: R, worker: Option<ThreadId>, timing: Timing) -> Self {
        Self {
            returns,
            worker,
            timing,
        }
    }

    /// The value the wrapped callable returned.
    #[must_use]
    pub fn returns(&self) -> &R {
        &self.returns
    }

    /// Consume the record, keeping only the return value.
    #[must_use]
    pub fn into_returns(self) -> R {
        self.returns
    }

    /// Id of the thread that executed the call, when known.
    #[must_use]
    pub fn worker(&self) -> Option<ThreadId> {
        self.worker
    }

    #[must_use]
    pub fn timing(&self) -> Timing {
        self.timing
    }
}
