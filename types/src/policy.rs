use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Poll interval used by the completion waiter.
///
/// A `Fixed` interval is read once when the wait loop starts. A `Dynamic`
/// interval is recomputed from the provider on every loop iteration, for
/// callers that need the cadence to change while a wait is in progress.
#[derive(Clone)]
pub enum SleepInterval {
    Fixed(Duration),
    Dynamic(Arc<dyn Fn() -> Duration + Send + Sync>),
}

impl SleepInterval {
    /// Build a dynamic interval from a provider closure.
    #[must_use]
    pub fn dynamic(provider: impl Fn() -> Duration + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(provider))
    }

    /// The interval value as of right now.
    #[must_use]
    pub fn current(&self) -> Duration {
        match self {
            Self::Fixed(interval) => *interval,
            Self::Dynamic(provider) => provider(),
        }
    }
}

impl fmt::Debug for SleepInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(interval) => f.debug_tuple("Fixed").field(interval).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Configuration bundle for one orchestration run.
///
/// Controls whether the orchestrator blocks until every call completes, how
/// often the waiter polls, and which lifecycle actions run before and after
/// the workers. A policy is a plain value; construct one with the builder
/// methods and hand it to `run_all`.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    /// Block until all calls complete. With `wait = false` the orchestrator
    /// returns immediately while workers keep running in the background, and
    /// the snapshot it returns may hold incomplete entries.
    pub wait: bool,
    /// Reset every descriptor's lifecycle flags before starting workers.
    pub reset_before: bool,
    /// Reset every descriptor's lifecycle flags after the run (after the
    /// result snapshot is taken).
    pub reset_after: bool,
    /// Discard every descriptor's previous worker handle and result before
    /// starting workers.
    pub clean_before: bool,
    /// Discard worker handles and results after the run. Runs after the
    /// result snapshot, so the returned results are unaffected.
    pub clean_after: bool,
    /// Poll interval for the completion waiter.
    pub sleep: SleepInterval,
}

impl WaitPolicy {
    /// Default poll interval.
    pub const DEFAULT_SLEEP: Duration = Duration::from_micros(100);

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    #[must_use]
    pub fn with_reset_before(mut self, reset_before: bool) -> Self {
        self.reset_before = reset_before;
        self
    }

    #[must_use]
    pub fn with_reset_after(mut self, reset_after: bool) -> Self {
        self.reset_after = reset_after;
        self
    }

    #[must_use]
    pub fn with_clean_before(mut self, clean_before: bool) -> Self {
        self.clean_before = clean_before;
        self
    }

    #[must_use]
    pub fn with_clean_after(mut self, clean_after: bool) -> Self {
        self.clean_after = clean_after;
        self
    }

    #[must_use]
    pub fn with_sleep(mut self, sleep: SleepInterval) -> Self {
        self.sleep = sleep;
        self
    }

    /// Shorthand for a fixed poll interval.
    #[must_use]
    pub fn with_fixed_sleep(self, interval: Duration) -> Self {
        self.with_sleep(SleepInterval::Fixed(interval))
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            wait: true,
            reset_before: true,
            reset_after: false,
            clean_before: true,
            clean_after: false,
            sleep: SleepInterval::Fixed(Self::DEFAULT_SLEEP),
        }
    }
}
