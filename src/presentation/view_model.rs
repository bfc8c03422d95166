//! Derived presentation state for one resilient image view.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::application::events::LoadEvent;
use crate::domain::entities::{LoadPhase, MotionPreference};

/// Error events tolerated before the broken-state visual replaces the
/// placeholder, when a fallback is configured.
const ERROR_TOLERANCE_WITH_FALLBACK: u32 = 3;
/// Error events tolerated without a fallback.
const ERROR_TOLERANCE_WITHOUT_FALLBACK: u32 = 2;

/// Mirrors load events into everything the widgets need to draw.
///
/// This is a projection, not a second state machine: it tracks the mirrored
/// phase plus a consecutive-failure counter that decides when to stop
/// showing the placeholder and show the broken-state visual instead. The
/// counter tolerates more transient errors than the loader's own retry
/// count, so recoverable failures never flash an error state.
#[derive(Debug)]
pub struct ImageViewModel {
    phase: LoadPhase,
    consecutive_errors: u32,
    error_tolerance: u32,
    alt: String,
    show_skeleton: bool,
    motion: MotionPreference,
    fade_duration: Duration,
    revealed_at: Option<Instant>,
    image: Option<Arc<image::DynamicImage>>,
    active_url: Option<String>,
}

impl ImageViewModel {
    /// Creates a view model for a pair that may or may not have a fallback.
    #[must_use]
    pub fn new(
        alt: impl Into<String>,
        show_skeleton: bool,
        motion: MotionPreference,
        fade_duration: Duration,
        has_fallback: bool,
    ) -> Self {
        Self {
            phase: LoadPhase::Loading,
            consecutive_errors: 0,
            error_tolerance: Self::tolerance(has_fallback),
            alt: alt.into(),
            show_skeleton,
            motion,
            fade_duration,
            revealed_at: None,
            image: None,
            active_url: None,
        }
    }

    const fn tolerance(has_fallback: bool) -> u32 {
        if has_fallback {
            ERROR_TOLERANCE_WITH_FALLBACK
        } else {
            ERROR_TOLERANCE_WITHOUT_FALLBACK
        }
    }

    /// Applies one load event observed at `now`.
    pub fn on_event(&mut self, event: &LoadEvent, now: Instant) {
        match event {
            LoadEvent::AttemptStarted { url, .. } => {
                self.active_url = Some(url.clone());
            }
            LoadEvent::Loaded { image, url, .. } => {
                self.phase = LoadPhase::Success;
                self.image = Some(image.clone());
                self.active_url = Some(url.clone());
                self.reveal(now);
            }
            LoadEvent::AttemptFailed { .. } => {
                self.consecutive_errors += 1;
                if self.consecutive_errors >= self.error_tolerance {
                    self.phase = LoadPhase::Error;
                    self.reveal(now);
                }
            }
            LoadEvent::RetryScheduled { .. } | LoadEvent::FallbackEngaged { .. } => {}
            LoadEvent::Failed => {
                self.phase = LoadPhase::Error;
                self.reveal(now);
            }
        }
    }

    fn reveal(&mut self, now: Instant) {
        if self.revealed_at.is_none() {
            self.revealed_at = Some(now);
        }
    }

    /// Resets for a fresh load of a (possibly different) source pair.
    pub fn reset(&mut self, has_fallback: bool) {
        self.phase = LoadPhase::Loading;
        self.consecutive_errors = 0;
        self.error_tolerance = Self::tolerance(has_fallback);
        self.revealed_at = None;
        self.image = None;
        self.active_url = None;
    }

    /// Returns the mirrored phase.
    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// True while the decorative placeholder should be drawn.
    ///
    /// The placeholder never carries the alt text; that always belongs to
    /// the image itself.
    #[must_use]
    pub const fn placeholder_visible(&self) -> bool {
        self.show_skeleton && self.phase.is_loading()
    }

    /// Opacity of the image layer at `now`: 0 while loading, cross-fading
    /// to 1 once resolved. Reduced motion reveals instantly.
    #[must_use]
    pub fn image_opacity(&self, now: Instant) -> f32 {
        if self.phase.is_loading() {
            return 0.0;
        }
        if self.motion.is_reduced() || self.fade_duration.is_zero() {
            return 1.0;
        }
        match self.revealed_at {
            Some(revealed) => {
                let elapsed = now.saturating_duration_since(revealed);
                (elapsed.as_secs_f32() / self.fade_duration.as_secs_f32()).min(1.0)
            }
            None => 1.0,
        }
    }

    /// True once loading failed for good and the broken-state treatment
    /// should be drawn instead of an empty gap.
    #[must_use]
    pub const fn is_broken(&self) -> bool {
        self.phase.is_error()
    }

    /// Returns the caller-supplied descriptive text.
    #[must_use]
    pub fn alt(&self) -> &str {
        &self.alt
    }

    /// Returns the resolved image, if any.
    #[must_use]
    pub const fn image(&self) -> Option<&Arc<image::DynamicImage>> {
        self.image.as_ref()
    }

    /// Returns the URL of the most recent attempt.
    #[must_use]
    pub fn active_url(&self) -> Option<&str> {
        self.active_url.as_deref()
    }

    /// Returns the motion capability this view was built with.
    #[must_use]
    pub const fn motion(&self) -> MotionPreference {
        self.motion
    }
}
