//! The page controller: one object a host drives.
//!
//! Composes the gesture processor, the section navigator, the position
//! indicator and the scroll effects. Hosts forward three kinds of calls:
//!
//! - [`handle_event`](PageController::handle_event) for discrete input,
//!   honoring [`EventResponse::prevent_default`] and scheduling frames for
//!   [`EventResponse::animation`];
//! - [`on_frame`](PageController::on_frame) once per animation frame while
//!   it returns [`FrameOutcome::Continue`];
//! - [`on_scroll`](PageController::on_scroll) for every scroll event,
//!   native or animated.
//!
//! [`settle`](PageController::settle) should also be called when the
//! cooldown deadline passes so passive index tracking resumes without
//! waiting for the next input.

use web_time::{Duration, Instant};

use crate::animation::{AnimationHandle, FrameOutcome};
use crate::effects::ScrollEffects;
use crate::host::{ClassSink, SectionRegistry, Viewport};
use crate::indicator::PositionIndicator;
use crate::input::{GestureProcessor, InputContext, Interpretation, PageEvent};
use crate::navigator::{IgnoreReason, NavPhase, Navigation, SectionNavigator, SectionTransition};
use crate::options::Options;

/// What became of one page event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// Left to the browser.
    Passthrough,
    /// Recorded without effect (touch start).
    Consumed,
    /// A section transition started.
    Navigated(SectionTransition),
    /// A free scroll started (back-to-top, landmark), outside the
    /// navigator's cooldown.
    Scrolled(AnimationHandle),
    /// Dropped.
    Ignored(IgnoreReason),
}

/// The controller's answer to one page event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventResponse {
    /// What happened.
    pub outcome: EventOutcome,
    /// Whether the host must cancel the event's native action.
    pub prevent_default: bool,
}

impl EventResponse {
    fn passthrough() -> Self {
        Self {
            outcome: EventOutcome::Passthrough,
            prevent_default: false,
        }
    }

    fn ignored(reason: IgnoreReason, prevent_default: bool) -> Self {
        Self {
            outcome: EventOutcome::Ignored(reason),
            prevent_default,
        }
    }

    /// Handle the host should start delivering frames for, if any.
    #[must_use]
    pub fn animation(&self) -> Option<AnimationHandle> {
        match self.outcome {
            EventOutcome::Navigated(t) => Some(t.handle),
            EventOutcome::Scrolled(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Full-page scroll controller over one section registry.
pub struct PageController<R> {
    options: Options,
    processor: GestureProcessor,
    navigator: SectionNavigator<R>,
    indicator: PositionIndicator,
    effects: ScrollEffects,
}

impl<R: SectionRegistry> PageController<R> {
    /// Controller over `sections`.
    ///
    /// Call [`start`](Self::start) once the page is laid out.
    #[must_use]
    pub fn new(sections: R, options: Options) -> Self {
        let processor =
            GestureProcessor::new(&options.navigation, options.keybindings.clone());
        let navigator = SectionNavigator::new(sections, options.navigation.clone());
        let indicator = PositionIndicator::new(options.indicator.clone());
        let effects = ScrollEffects::new(options.effects.clone());
        Self {
            options,
            processor,
            navigator,
            indicator,
            effects,
        }
    }

    /// Pick the initial section and sync every visual state to the current
    /// scroll position.
    pub fn start(&mut self, viewport: &dyn Viewport, sink: &mut dyn ClassSink) {
        self.navigator.sync_to(viewport);
        self.refresh_visuals(viewport, sink);
        log::info!(
            "snap scrolling over {} sections, starting at {}",
            self.navigator.sections().len(),
            self.navigator.current_index()
        );
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The section navigator.
    #[must_use]
    pub fn navigator(&self) -> &SectionNavigator<R> {
        &self.navigator
    }

    /// Mutable navigator access (registry updates, direct requests).
    pub fn navigator_mut(&mut self) -> &mut SectionNavigator<R> {
        &mut self.navigator
    }

    /// The position indicator.
    #[must_use]
    pub fn indicator(&self) -> &PositionIndicator {
        &self.indicator
    }

    /// Current section index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    /// Cooldown duration, for hosts that schedule [`settle`](Self::settle)
    /// with a timer.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        self.options.navigation.cooldown()
    }

    /// Whether `viewport` currently disables section snapping.
    #[must_use]
    pub fn is_narrow(&self, viewport: &dyn Viewport) -> bool {
        self.options.navigation.is_narrow(viewport.width())
    }

    /// Interpret and act on one page event.
    pub fn handle_event(
        &mut self,
        event: &PageEvent,
        viewport: &dyn Viewport,
        now: Instant,
    ) -> EventResponse {
        let _ = self.navigator.settle(now);
        match event {
            PageEvent::LandmarkClick { landmark } => {
                return self.jump_to_landmark(landmark, viewport, now);
            }
            PageEvent::BackToTop => return self.back_to_top(viewport, now),
            _ => {}
        }

        // The width is read per event; some embeddings resize without
        // emitting a resize event.
        let ctx = InputContext {
            narrow: self.is_narrow(viewport),
            transitioning: self.navigator.is_transitioning(now),
        };
        let interpretation =
            self.processor
                .interpret(event, ctx, self.navigator.sections());

        match interpretation {
            Interpretation::Passthrough => {
                if ctx.narrow && self.is_snap_input(event) {
                    return EventResponse::ignored(IgnoreReason::NarrowViewport, false);
                }
                EventResponse::passthrough()
            }
            Interpretation::Consumed => EventResponse {
                outcome: EventOutcome::Consumed,
                prevent_default: false,
            },
            Interpretation::Suppressed => {
                log::trace!("input suppressed during transition: {event:?}");
                EventResponse::ignored(IgnoreReason::Cooldown, true)
            }
            Interpretation::BelowThreshold => {
                EventResponse::ignored(IgnoreReason::BelowThreshold, false)
            }
            Interpretation::UnknownAnchor => {
                EventResponse::ignored(IgnoreReason::UnknownAnchor, false)
            }
            Interpretation::Navigate {
                gesture,
                prevent_default,
            } => {
                let outcome =
                    match self.navigator.handle_gesture(gesture, viewport, now) {
                        Navigation::Started(t) => EventOutcome::Navigated(t),
                        Navigation::Ignored(reason) => EventOutcome::Ignored(reason),
                    };
                EventResponse {
                    outcome,
                    prevent_default,
                }
            }
        }
    }

    /// Deliver one animation frame for `handle`.
    pub fn on_frame(
        &mut self,
        handle: AnimationHandle,
        viewport: &mut dyn Viewport,
        now: Instant,
    ) -> FrameOutcome {
        self.navigator.animator_mut().frame(handle, viewport, now)
    }

    /// A scroll event fired (native or animated): track the section index
    /// while idle and refresh indicator and header state.
    pub fn on_scroll(
        &mut self,
        viewport: &dyn Viewport,
        sink: &mut dyn ClassSink,
        now: Instant,
    ) {
        let _ = self.navigator.on_scroll(viewport, now);
        self.refresh_visuals(viewport, sink);
    }

    /// End an expired cooldown. Returns `true` when the navigator went back
    /// to idle.
    pub fn settle(&mut self, now: Instant) -> bool {
        self.navigator.settle(now)
    }

    /// Deadline of the running cooldown, if any.
    #[must_use]
    pub fn cooldown_deadline(&self) -> Option<Instant> {
        match self.navigator.phase() {
            NavPhase::Transitioning { until } => Some(until),
            NavPhase::Idle => None,
        }
    }

    fn refresh_visuals(&mut self, viewport: &dyn Viewport, sink: &mut dyn ClassSink) {
        let scroll_y = viewport.scroll_y();
        self.effects.update(scroll_y, sink);
        self.indicator.update(
            scroll_y,
            viewport.height(),
            self.navigator.sections(),
            sink,
        );
    }

    fn jump_to_landmark(
        &mut self,
        landmark: &str,
        viewport: &dyn Viewport,
        now: Instant,
    ) -> EventResponse {
        let Some(target_y) =
            self.indicator.jump_target(landmark, self.navigator.sections())
        else {
            return EventResponse::ignored(IgnoreReason::UnknownLandmark, false);
        };
        let duration = Duration::from_millis(self.options.indicator.jump_ms);
        let handle =
            self.navigator
                .animator_mut()
                .animate_to(target_y, duration, viewport, now);
        log::debug!("landmark '{landmark}' -> scrolling to {target_y}");
        EventResponse {
            outcome: EventOutcome::Scrolled(handle),
            prevent_default: false,
        }
    }

    /// Inputs the narrow breakpoint hands back to native scrolling.
    fn is_snap_input(&self, event: &PageEvent) -> bool {
        match event {
            PageEvent::Wheel { .. } | PageEvent::TouchEnd { .. } => true,
            PageEvent::Key { key } => {
                self.processor.key_bindings().lookup(key).is_some()
            }
            _ => false,
        }
    }

    fn back_to_top(&mut self, viewport: &dyn Viewport, now: Instant) -> EventResponse {
        if !self.effects.has_back_to_top() {
            return EventResponse::passthrough();
        }
        let duration = self.effects.back_to_top_duration();
        let handle = self
            .navigator
            .animator_mut()
            .animate_to(0.0, duration, viewport, now);
        log::debug!("back to top");
        EventResponse {
            outcome: EventOutcome::Scrolled(handle),
            prevent_default: false,
        }
    }
}
