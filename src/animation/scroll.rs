//! Smooth-scroll animator.
//!
//! Animates the viewport's vertical scroll offset toward a target over a
//! fixed duration. The animator knows nothing about sections; it only owns
//! the single in-flight [`ScrollAnimation`] and the generation counter that
//! identifies it.
//!
//! Hosts drive it cooperatively: [`ScrollAnimator::animate_to`] returns an
//! [`AnimationHandle`], and the host calls [`ScrollAnimator::frame`] with
//! that handle once per animation frame for as long as it reports
//! [`FrameOutcome::Continue`]. A handle from a superseded animation never
//! writes the scroll offset again.

use web_time::{Duration, Instant};

use crate::host::Viewport;
use crate::util::easing::EasingFunction;

/// Identifies one scroll animation request.
///
/// Carried by every frame callback a host schedules. Only the handle of the
/// most recent request is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    /// Raw generation number.
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Result of running one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Progress is below 1; schedule another frame with the same handle.
    Continue,
    /// The target was written and the animation retired. Reported once.
    Finished,
    /// The handle is stale (superseded or already finished).
    /// Nothing was written.
    Superseded,
}

impl FrameOutcome {
    /// Whether the host should request another frame.
    #[must_use]
    pub fn wants_next_frame(self) -> bool {
        self == Self::Continue
    }
}

/// A single in-flight scroll request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    start_y: f64,
    target_y: f64,
    start_time: Instant,
    duration: Duration,
    easing: EasingFunction,
}

impl ScrollAnimation {
    /// Animation from `start_y` to `target_y` beginning at `start_time`.
    #[must_use]
    pub fn new(
        start_y: f64,
        target_y: f64,
        start_time: Instant,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            start_y,
            target_y,
            start_time,
            duration,
            easing,
        }
    }

    /// Offset the animation started from.
    #[must_use]
    pub fn start_y(&self) -> f64 {
        self.start_y
    }

    /// Offset the animation settles on.
    #[must_use]
    pub fn target_y(&self) -> f64 {
        self.target_y
    }

    /// Configured duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Normalized linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Scroll offset at the given linear progress.
    #[must_use]
    pub fn offset_at(&self, progress: f64) -> f64 {
        let eased = self.easing.evaluate(progress);
        self.start_y + (self.target_y - self.start_y) * eased
    }
}

/// Owner of the one active scroll animation.
#[derive(Debug)]
pub struct ScrollAnimator {
    easing: EasingFunction,
    generation: u64,
    active: Option<ScrollAnimation>,
}

impl ScrollAnimator {
    /// Animator using the given easing curve.
    #[must_use]
    pub fn new(easing: EasingFunction) -> Self {
        Self {
            easing,
            generation: 0,
            active: None,
        }
    }

    /// Start animating from the viewport's current offset to `target_y`.
    ///
    /// Any animation already in flight is superseded: its handle becomes
    /// stale and its frames turn into no-ops.
    pub fn animate_to(
        &mut self,
        target_y: f64,
        duration: Duration,
        viewport: &dyn Viewport,
        now: Instant,
    ) -> AnimationHandle {
        self.generation = self.generation.wrapping_add(1);
        let start_y = viewport.scroll_y();
        if self.active.is_some() {
            log::trace!(
                "scroll animation superseded by generation {}",
                self.generation
            );
        }
        self.active = Some(ScrollAnimation::new(
            start_y,
            target_y,
            now,
            duration,
            self.easing,
        ));
        AnimationHandle(self.generation)
    }

    /// Run one frame for `handle`.
    pub fn frame(
        &mut self,
        handle: AnimationHandle,
        viewport: &mut dyn Viewport,
        now: Instant,
    ) -> FrameOutcome {
        if handle.0 != self.generation {
            return FrameOutcome::Superseded;
        }
        let Some(animation) = self.active.as_ref() else {
            return FrameOutcome::Superseded;
        };

        let progress = animation.progress(now);
        viewport.scroll_to(animation.offset_at(progress));

        if progress < 1.0 {
            FrameOutcome::Continue
        } else {
            self.active = None;
            FrameOutcome::Finished
        }
    }

    /// Whether an animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// The in-flight animation, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ScrollAnimation> {
        self.active.as_ref()
    }
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(EasingFunction::DEFAULT)
    }
}
