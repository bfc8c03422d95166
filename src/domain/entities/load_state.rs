//! Load lifecycle state machine for one image resource.
//!
//! The machine is pure and synchronous: callers report load outcomes and
//! apply the returned [`FailureAction`]. Timers and fetching live in the
//! application layer.

use std::time::Duration;

use super::source::{SourceKind, SourceSet};

/// Default delay before retrying the primary source.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Default number of same-source retries of the primary.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Lifecycle phase of one image load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// A request for the current source is in flight (or about to be).
    #[default]
    Loading,
    /// The current source loaded successfully. Terminal for this pair.
    Success,
    /// No source could be loaded. Terminal for this pair.
    Error,
}

impl LoadPhase {
    /// Returns true while a load is unresolved.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true once an image loaded.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns true once loading failed terminally.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

/// Retry behavior for the primary source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum same-source retries of the primary before falling back.
    pub max_retries: u32,
    /// Delay between a primary failure and its retry.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// What the driver must do after a recorded failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Re-attempt the primary source after the given delay.
    RetryAfter(Duration),
    /// The machine switched to the fallback source; re-attempt immediately.
    UseFallback,
    /// No recovery possible; the machine entered [`LoadPhase::Error`].
    GiveUp,
}

/// State machine tracking the load of one logical image.
///
/// Keyed by a [`SourceSet`]: a new pair means a new machine, so retry counts
/// never leak across source changes.
#[derive(Debug, Clone)]
pub struct LoadStateMachine {
    sources: SourceSet,
    policy: RetryPolicy,
    phase: LoadPhase,
    current: SourceKind,
    retry_count: u32,
}

impl LoadStateMachine {
    /// Creates a machine in its initial state: loading the primary source
    /// with no retries spent.
    #[must_use]
    pub fn new(sources: SourceSet, policy: RetryPolicy) -> Self {
        Self {
            sources,
            policy,
            phase: LoadPhase::Loading,
            current: SourceKind::Primary,
            retry_count: 0,
        }
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Returns which source is currently active.
    #[must_use]
    pub const fn current_kind(&self) -> SourceKind {
        self.current
    }

    /// Returns the URL of the currently active source.
    #[must_use]
    pub fn current_url(&self) -> &str {
        self.sources.url(self.current)
    }

    /// Returns how many same-source retries have been spent.
    #[must_use]
    pub const fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Returns the source pair driving this machine.
    #[must_use]
    pub const fn sources(&self) -> &SourceSet {
        &self.sources
    }

    /// Records a successful load of the current source.
    pub fn record_success(&mut self) {
        self.phase = LoadPhase::Success;
    }

    /// Records a failed load of the current source and decides recovery.
    ///
    /// Decision order: retry the primary while retries remain, then switch
    /// to a distinct fallback, then give up. An identical fallback would
    /// re-request the same URL and is skipped.
    pub fn record_failure(&mut self) -> FailureAction {
        if self.current == SourceKind::Primary && self.retry_count < self.policy.max_retries {
            self.phase = LoadPhase::Loading;
            return FailureAction::RetryAfter(self.policy.retry_delay);
        }

        if self.current != SourceKind::Fallback && self.sources.has_distinct_fallback() {
            self.current = SourceKind::Fallback;
            self.phase = LoadPhase::Loading;
            return FailureAction::UseFallback;
        }

        self.phase = LoadPhase::Error;
        FailureAction::GiveUp
    }

    /// Applies a fired retry timer: spends one retry and re-enters loading
    /// on the primary source.
    pub fn begin_retry(&mut self) {
        self.retry_count += 1;
        self.phase = LoadPhase::Loading;
    }
}
