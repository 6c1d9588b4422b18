//! Section navigator: the snapping state machine.
//!
//! Owns the current section index and the cooldown phase, turns gestures
//! into "go to section i" requests, and hands the actual motion to the
//! [`ScrollAnimator`].
//!
//! ```text
//!            request_go_to(i), i in range
//!   Idle ──────────────────────────────────▶ Transitioning { until }
//!    ▲                                              │
//!    └──────────── settle(now), now ≥ until ────────┘
//! ```
//!
//! Requests arriving while `Transitioning` are dropped, not queued. The
//! cooldown is a fixed deadline set when the transition starts; it does not
//! wait for the animation to finish.

use web_time::Instant;

use crate::animation::{AnimationHandle, ScrollAnimator};
use crate::host::{SectionRegistry, Viewport};
use crate::input::Gesture;
use crate::options::NavigationOptions;

/// Cooldown phase of the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    /// Accepting navigation requests.
    Idle,
    /// A transition started; requests are dropped until `until`.
    Transitioning {
        /// Deadline at which the navigator returns to `Idle`.
        until: Instant,
    },
}

/// Why an input produced no navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// A transition is still in its cooldown.
    Cooldown,
    /// The requested index is outside `[0, section_count)`.
    OutOfRange,
    /// The viewport is at or below the narrow breakpoint.
    NarrowViewport,
    /// A swipe did not travel far enough.
    BelowThreshold,
    /// A fragment link does not name a registered section.
    UnknownAnchor,
    /// A landmark click named no registered section.
    UnknownLandmark,
}

/// A section transition that was started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionTransition {
    /// Index before the transition.
    pub from: usize,
    /// Index the navigator now reports as current.
    pub to: usize,
    /// Scroll offset being animated to.
    pub target_y: f64,
    /// Frame handle for the host's animation loop.
    pub handle: AnimationHandle,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Navigation {
    /// The transition started.
    Started(SectionTransition),
    /// The request was dropped.
    Ignored(IgnoreReason),
}

impl Navigation {
    /// The started transition, if any.
    #[must_use]
    pub fn transition(&self) -> Option<&SectionTransition> {
        match self {
            Self::Started(t) => Some(t),
            Self::Ignored(_) => None,
        }
    }
}

/// Snapping state machine over one section registry.
pub struct SectionNavigator<R> {
    sections: R,
    options: NavigationOptions,
    animator: ScrollAnimator,
    current: usize,
    phase: NavPhase,
}

impl<R: SectionRegistry> SectionNavigator<R> {
    /// Navigator over `sections`, starting `Idle` at section 0.
    ///
    /// Call [`sync_to`](Self::sync_to) once the page is laid out to pick
    /// up the initial scroll position.
    #[must_use]
    pub fn new(sections: R, options: NavigationOptions) -> Self {
        let animator = ScrollAnimator::new(options.easing);
        Self {
            sections,
            options,
            animator,
            current: 0,
            phase: NavPhase::Idle,
        }
    }

    /// Pick the initial section from the viewport's scroll offset: the last
    /// section whose top, less the lookahead, the offset has reached.
    pub fn sync_to(&mut self, viewport: &dyn Viewport) {
        let scroll_y = viewport.scroll_y();
        let lookahead = self.options.lookahead_px;
        self.current = (0..self.sections.len())
            .rev()
            .find(|&i| {
                self.sections
                    .geometry(i)
                    .is_some_and(|g| g.top - lookahead <= scroll_y)
            })
            .unwrap_or(0);
        log::debug!(
            "initial section {} of {} at scroll {scroll_y}",
            self.current,
            self.sections.len()
        );
    }

    /// The section registry.
    #[must_use]
    pub fn sections(&self) -> &R {
        &self.sections
    }

    /// Mutable access to the registry, for hosts that own the geometry.
    pub fn sections_mut(&mut self) -> &mut R {
        &mut self.sections
    }

    /// Navigation options in effect.
    #[must_use]
    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    /// Current section index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Current cooldown phase. May report an expired `Transitioning` until
    /// [`settle`](Self::settle) runs.
    #[must_use]
    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    /// Whether the cooldown is still running at `now`.
    #[must_use]
    pub fn is_transitioning(&self, now: Instant) -> bool {
        matches!(self.phase, NavPhase::Transitioning { until } if now < until)
    }

    /// The scroll animator shared by every motion on the page.
    #[must_use]
    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    /// Mutable animator access for motion that bypasses the cooldown
    /// (back-to-top, indicator landmarks) and for frame delivery.
    pub fn animator_mut(&mut self) -> &mut ScrollAnimator {
        &mut self.animator
    }

    /// End an expired cooldown. Returns `true` when this call moved the
    /// navigator back to `Idle`.
    pub fn settle(&mut self, now: Instant) -> bool {
        match self.phase {
            NavPhase::Transitioning { until } if now >= until => {
                self.phase = NavPhase::Idle;
                log::trace!("cooldown over at section {}", self.current);
                true
            }
            _ => false,
        }
    }

    /// Translate a gesture into a request relative to the current section.
    pub fn handle_gesture(
        &mut self,
        gesture: Gesture,
        viewport: &dyn Viewport,
        now: Instant,
    ) -> Navigation {
        let target = match gesture {
            Gesture::Next => self.current.checked_add(1),
            Gesture::Previous => self.current.checked_sub(1),
            Gesture::GoTo(index) => Some(index),
        };
        match target {
            Some(index) => self.request_go_to(index, viewport, now),
            None => {
                let _ = self.settle(now);
                if self.is_transitioning(now) {
                    return self.ignore(IgnoreReason::Cooldown);
                }
                self.ignore(IgnoreReason::OutOfRange)
            }
        }
    }

    /// Go to section `index`.
    ///
    /// Dropped during the cooldown and for indices outside the registry.
    /// Otherwise the navigator enters `Transitioning`, adopts `index` as
    /// current immediately, and starts animating to the section's top.
    pub fn request_go_to(
        &mut self,
        index: usize,
        viewport: &dyn Viewport,
        now: Instant,
    ) -> Navigation {
        let _ = self.settle(now);
        if self.is_transitioning(now) {
            return self.ignore(IgnoreReason::Cooldown);
        }
        let Some(geometry) = self.sections.geometry(index) else {
            return self.ignore(IgnoreReason::OutOfRange);
        };

        let from = self.current;
        self.current = index;
        self.phase = NavPhase::Transitioning {
            until: now + self.options.cooldown(),
        };
        let handle = self.animator.animate_to(
            geometry.top,
            self.options.transition(),
            viewport,
            now,
        );
        log::debug!(
            "section {from} -> {index}, scrolling to {}",
            geometry.top
        );

        Navigation::Started(SectionTransition {
            from,
            to: index,
            target_y: geometry.top,
            handle,
        })
    }

    /// Passive scroll observed. While idle, re-derive the current section
    /// from geometry so native scrolling (momentum, narrow viewports,
    /// landmark jumps) keeps the index honest. Never animates.
    ///
    /// Returns `true` when the index changed.
    pub fn on_scroll(&mut self, viewport: &dyn Viewport, now: Instant) -> bool {
        let _ = self.settle(now);
        if self.is_transitioning(now) {
            return false;
        }
        let scroll_y = viewport.scroll_y();
        let lookahead = self.options.lookahead_px;
        let found = (0..self.sections.len()).rev().find(|&i| {
            self.sections.geometry(i).is_some_and(|g| {
                scroll_y >= g.top - lookahead
                    && scroll_y < g.bottom() - lookahead
            })
        });
        match found {
            Some(index) if index != self.current => {
                log::trace!("scroll tracking: section {} -> {index}", self.current);
                self.current = index;
                true
            }
            _ => false,
        }
    }

    fn ignore(&self, reason: IgnoreReason) -> Navigation {
        log::trace!("navigation dropped at section {}: {reason:?}", self.current);
        Navigation::Ignored(reason)
    }
}

impl<R: SectionRegistry + std::fmt::Debug> std::fmt::Debug for SectionNavigator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionNavigator")
            .field("sections", &self.sections)
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("animating", &self.animator.is_animating())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::animation::FrameOutcome;
    use crate::host::{SectionGeometry, SimulatedViewport, StaticSections};

    const HEIGHT: f64 = 900.0;

    fn setup(count: usize) -> (SectionNavigator<StaticSections>, SimulatedViewport) {
        let sections = StaticSections::uniform(count, HEIGHT);
        let viewport =
            SimulatedViewport::new(1440.0, HEIGHT, sections.document_height());
        let mut nav = SectionNavigator::new(sections, NavigationOptions::default());
        nav.sync_to(&viewport);
        (nav, viewport)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_idle_at_first_section() {
        let (nav, _) = setup(4);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.phase(), NavPhase::Idle);
    }

    #[test]
    fn initial_index_uses_lookahead() {
        let sections = StaticSections::uniform(4, HEIGHT);
        let mut viewport = SimulatedViewport::new(1440.0, HEIGHT, 3600.0);

        // 100px above section 2's top already counts as section 2.
        viewport.scroll_to(1700.0);
        let mut nav =
            SectionNavigator::new(sections.clone(), NavigationOptions::default());
        nav.sync_to(&viewport);
        assert_eq!(nav.current_index(), 2);

        viewport.scroll_to(1699.0);
        let mut nav = SectionNavigator::new(sections, NavigationOptions::default());
        nav.sync_to(&viewport);
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn empty_registry_stays_at_zero_and_drops_everything() {
        let (mut nav, vp) = setup(0);
        assert_eq!(nav.current_index(), 0);
        let now = Instant::now();
        assert_eq!(
            nav.request_go_to(0, &vp, now),
            Navigation::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(
            nav.handle_gesture(Gesture::Next, &vp, now),
            Navigation::Ignored(IgnoreReason::OutOfRange)
        );
    }

    #[test]
    fn valid_request_transitions_then_settles() {
        let (mut nav, vp) = setup(4);
        let t0 = Instant::now();

        let nav_result = nav.request_go_to(2, &vp, t0);
        let transition = nav_result.transition().copied().unwrap();
        assert_eq!(transition.from, 0);
        assert_eq!(transition.to, 2);
        assert_eq!(transition.target_y, 1800.0);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.phase(), NavPhase::Transitioning { until: t0 + ms(1000) });

        assert!(!nav.settle(t0 + ms(999)));
        assert!(nav.is_transitioning(t0 + ms(999)));
        assert!(nav.settle(t0 + ms(1000)));
        assert_eq!(nav.phase(), NavPhase::Idle);
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn out_of_range_requests_are_no_ops() {
        let (mut nav, vp) = setup(4);
        let now = Instant::now();
        for index in [4, 5, usize::MAX] {
            assert_eq!(
                nav.request_go_to(index, &vp, now),
                Navigation::Ignored(IgnoreReason::OutOfRange)
            );
            assert_eq!(nav.current_index(), 0);
            assert_eq!(nav.phase(), NavPhase::Idle);
        }
        assert_eq!(
            nav.handle_gesture(Gesture::Previous, &vp, now),
            Navigation::Ignored(IgnoreReason::OutOfRange)
        );
        assert!(!nav.animator().is_animating());
    }

    #[test]
    fn no_wraparound_at_last_section() {
        let (mut nav, mut vp) = setup(3);
        let now = Instant::now();
        vp.scroll_to(1800.0);
        nav.sync_to(&vp);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(
            nav.handle_gesture(Gesture::Next, &vp, now),
            Navigation::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn second_request_within_cooldown_is_dropped() {
        let (mut nav, vp) = setup(4);
        let t0 = Instant::now();

        assert!(nav.handle_gesture(Gesture::Next, &vp, t0).transition().is_some());
        assert_eq!(
            nav.handle_gesture(Gesture::Next, &vp, t0 + ms(50)),
            Navigation::Ignored(IgnoreReason::Cooldown)
        );
        // Even out-of-range requests report the cooldown first.
        assert_eq!(
            nav.request_go_to(99, &vp, t0 + ms(900)),
            Navigation::Ignored(IgnoreReason::Cooldown)
        );
        assert_eq!(nav.current_index(), 1);

        // After the cooldown the next request goes through.
        let later = nav.handle_gesture(Gesture::Next, &vp, t0 + ms(1000));
        assert_eq!(later.transition().map(|t| t.to), Some(2));
    }

    #[test]
    fn cooldown_outlasts_animation() {
        let (mut nav, mut vp) = setup(4);
        let t0 = Instant::now();
        let handle = nav
            .handle_gesture(Gesture::Next, &vp, t0)
            .transition()
            .map(|t| t.handle)
            .unwrap();

        assert_eq!(
            nav.animator_mut().frame(handle, &mut vp, t0 + ms(800)),
            FrameOutcome::Finished
        );
        assert_eq!(vp.scroll_y(), HEIGHT);
        // Animation done, cooldown still running.
        assert!(nav.is_transitioning(t0 + ms(900)));
        assert_eq!(
            nav.handle_gesture(Gesture::Next, &vp, t0 + ms(900)),
            Navigation::Ignored(IgnoreReason::Cooldown)
        );
    }

    #[test]
    fn passive_scroll_tracks_index_only_when_idle() {
        let (mut nav, mut vp) = setup(4);
        let t0 = Instant::now();

        vp.scroll_to(2000.0);
        assert!(nav.on_scroll(&vp, t0));
        assert_eq!(nav.current_index(), 2);
        assert!(!nav.animator().is_animating());

        let _ = nav.request_go_to(0, &vp, t0);
        vp.scroll_to(2800.0);
        assert!(!nav.on_scroll(&vp, t0 + ms(500)));
        assert_eq!(nav.current_index(), 0);

        assert!(nav.on_scroll(&vp, t0 + ms(1000)));
        assert_eq!(nav.current_index(), 3);
    }

    #[test]
    fn passive_scroll_band_is_shifted_by_lookahead() {
        let (mut nav, mut vp) = setup(4);
        let now = Instant::now();

        vp.scroll_to(HEIGHT - 100.0);
        let _ = nav.on_scroll(&vp, now);
        assert_eq!(nav.current_index(), 1);

        vp.scroll_to(HEIGHT - 101.0);
        let _ = nav.on_scroll(&vp, now);
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn geometry_is_read_at_request_time() {
        let (mut nav, vp) = setup(3);
        nav.sections_mut().set_geometry(
            1,
            SectionGeometry {
                top: 1234.0,
                height: 700.0,
            },
        );
        let now = Instant::now();
        let target = nav
            .request_go_to(1, &vp, now)
            .transition()
            .map(|t| t.target_y);
        assert_eq!(target, Some(1234.0));
    }
}
