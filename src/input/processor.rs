//! Converts raw page events into navigation gestures.
//!
//! The `GestureProcessor` owns all transient input state (the pending touch
//! start) and the key-binding map. It decides *what* an event means and
//! whether its native action must be cancelled; whether the resulting
//! gesture is honored is the navigator's call.

use super::event::{Gesture, Interpretation, PageEvent};
use super::keyboard::NavAction;
use crate::host::SectionRegistry;
use crate::options::{KeybindingOptions, NavigationOptions};

/// Navigator state an event is interpreted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    /// The viewport is at or below the narrow breakpoint.
    pub narrow: bool,
    /// A section transition is in its cooldown.
    pub transitioning: bool,
}

/// Converts [`PageEvent`]s into [`Interpretation`]s.
#[derive(Debug, Clone)]
pub struct GestureProcessor {
    /// Client-space y of the last touch start, consumed by the next touch
    /// end.
    touch_start_y: Option<f64>,
    /// Minimum swipe travel, exclusive.
    swipe_threshold: f64,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl GestureProcessor {
    /// Processor with the given thresholds and key bindings.
    #[must_use]
    pub fn new(
        navigation: &NavigationOptions,
        key_bindings: KeybindingOptions,
    ) -> Self {
        Self {
            touch_start_y: None,
            swipe_threshold: navigation.swipe_threshold_px,
            key_bindings,
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeybindingOptions {
        &mut self.key_bindings
    }

    /// Interpret one event.
    ///
    /// `sections` resolves anchor targets. Landmark and back-to-top clicks
    /// are not navigation gestures and pass through.
    pub fn interpret(
        &mut self,
        event: &PageEvent,
        ctx: InputContext,
        sections: &dyn SectionRegistry,
    ) -> Interpretation {
        match event {
            PageEvent::Wheel { delta_y } => Self::interpret_wheel(*delta_y, ctx),
            PageEvent::Key { key } => self.interpret_key(key, ctx),
            PageEvent::TouchStart { y } => {
                self.touch_start_y = Some(*y);
                Interpretation::Consumed
            }
            PageEvent::TouchEnd { y } => self.interpret_touch_end(*y, ctx),
            PageEvent::AnchorClick { href } => {
                Self::interpret_anchor(href, sections)
            }
            PageEvent::LandmarkClick { .. } | PageEvent::BackToTop => {
                Interpretation::Passthrough
            }
        }
    }

    /// One wheel tick issues at most one gesture. During a transition the
    /// tick is swallowed so native scrolling cannot fight the animation.
    fn interpret_wheel(delta_y: f64, ctx: InputContext) -> Interpretation {
        if ctx.transitioning {
            return Interpretation::Suppressed;
        }
        if ctx.narrow {
            return Interpretation::Passthrough;
        }
        let gesture = if delta_y > 0.0 {
            Gesture::Next
        } else {
            Gesture::Previous
        };
        Interpretation::Navigate {
            gesture,
            prevent_default: true,
        }
    }

    fn interpret_key(&self, key: &str, ctx: InputContext) -> Interpretation {
        let Some(action) = self.key_bindings.lookup(key) else {
            return Interpretation::Passthrough;
        };
        // Narrow viewports keep native key scrolling, even mid-cooldown.
        if ctx.narrow {
            return Interpretation::Passthrough;
        }
        if ctx.transitioning {
            return Interpretation::Suppressed;
        }
        let gesture = match action {
            NavAction::NextSection => Gesture::Next,
            NavAction::PreviousSection => Gesture::Previous,
        };
        Interpretation::Navigate {
            gesture,
            prevent_default: true,
        }
    }

    /// Touch listeners are passive: a swipe never cancels the native
    /// action.
    fn interpret_touch_end(
        &mut self,
        end_y: f64,
        ctx: InputContext,
    ) -> Interpretation {
        let Some(start_y) = self.touch_start_y.take() else {
            return Interpretation::Passthrough;
        };
        if ctx.narrow {
            return Interpretation::Passthrough;
        }
        let diff = start_y - end_y;
        if diff.abs() <= self.swipe_threshold {
            return Interpretation::BelowThreshold;
        }
        // Finger moved up: content should advance.
        let gesture = if diff > 0.0 {
            Gesture::Next
        } else {
            Gesture::Previous
        };
        Interpretation::Navigate {
            gesture,
            prevent_default: false,
        }
    }

    /// Only same-page fragment links that name a registered section are
    /// taken over; everything else keeps the browser's jump.
    fn interpret_anchor(
        href: &str,
        sections: &dyn SectionRegistry,
    ) -> Interpretation {
        let Some(id) = href.strip_prefix('#') else {
            return Interpretation::Passthrough;
        };
        if id.is_empty() {
            return Interpretation::Passthrough;
        }
        match sections.index_of(id) {
            Some(index) => Interpretation::Navigate {
                gesture: Gesture::GoTo(index),
                prevent_default: true,
            },
            None => Interpretation::UnknownAnchor,
        }
    }
}

impl Default for GestureProcessor {
    fn default() -> Self {
        Self::new(&NavigationOptions::default(), KeybindingOptions::default())
    }
}
