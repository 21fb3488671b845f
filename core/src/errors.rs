use std::io;

use thiserror::Error;
use volley_types::CallId;

/// Errors raised by the orchestrator before or while starting workers.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A descriptor in the input collection still has a live worker from a
    /// previous run. Raised before any thread is spawned; starting such a
    /// descriptor again would let two threads write its state concurrently.
    #[error("caller `{id}` still has a live worker; wait for it to finish before running it again")]
    CallerBusy { id: CallId },

    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn worker thread for caller `{id}`")]
    Spawn {
        id: CallId,
        #[source]
        source: io::Error,
    },
}

/// Lookup by identifier found no matching caller.
///
/// The message enumerates every known identifier so a typo is diagnosable
/// from the error alone.
#[derive(Debug, Error)]
#[error("cannot find a caller with identifier `{id}`; valid identifiers are: {}", .known.join(", "))]
pub struct LookupError {
    id: CallId,
    known: Vec<String>,
}

impl LookupError {
    #[must_use]
    pub fn new(id: CallId, known: Vec<String>) -> Self {
        Self { id, known }
    }

    /// The identifier that failed to match.
    #[must_use]
    pub fn id(&self) -> &CallId {
        &self.id
    }

    /// Every identifier that was present in the searched collection.
    #[must_use]
    pub fn known(&self) -> &[String] {
        &self.known
    }
}
