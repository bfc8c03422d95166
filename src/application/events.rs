//! Events emitted while loading one image.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::SourceKind;
use crate::domain::errors::FetchError;

/// Message describing a load lifecycle transition.
///
/// Events for one load are strictly sequential; the presentation layer
/// mirrors them into view state.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// A request for the given source was issued.
    AttemptStarted {
        /// Which configured source is being requested.
        kind: SourceKind,
        /// The URL being requested.
        url: String,
    },
    /// The current source loaded and decoded successfully.
    Loaded {
        /// Which configured source resolved.
        kind: SourceKind,
        /// The URL that resolved.
        url: String,
        /// The decoded image.
        image: Arc<image::DynamicImage>,
    },
    /// One individual attempt failed. Emitted for every failure, including
    /// ones that will be retried or will engage the fallback.
    AttemptFailed {
        /// Which configured source failed.
        kind: SourceKind,
        /// The URL that failed.
        url: String,
        /// Why the attempt failed.
        error: FetchError,
    },
    /// A retry of the primary source was scheduled.
    RetryScheduled {
        /// Delay before the retry fires.
        delay: Duration,
    },
    /// The loader switched to the fallback source.
    FallbackEngaged {
        /// The fallback URL now being requested.
        url: String,
    },
    /// No source could be loaded. Terminal.
    Failed,
}
