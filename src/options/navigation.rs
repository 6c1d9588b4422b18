use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Navigation", inline)]
#[serde(default)]
/// Section snapping, cooldown and gesture thresholds.
pub struct NavigationOptions {
    /// CSS selector matching the sections, in document order.
    #[schemars(skip)]
    pub section_selector: String,
    /// Duration of one section transition in milliseconds.
    #[schemars(title = "Transition (ms)", range(min = 100, max = 3000), extend("step" = 50))]
    pub transition_ms: u64,
    /// Time after a transition starts during which new navigation is
    /// dropped, in milliseconds. Kept longer than `transition_ms`.
    #[schemars(title = "Cooldown (ms)", range(min = 100, max = 5000), extend("step" = 50))]
    pub cooldown_ms: u64,
    /// How far ahead of a section's top the scroll offset may be and
    /// still count as inside that section.
    #[schemars(title = "Lookahead (px)", range(min = 0.0, max = 400.0), extend("step" = 10.0))]
    pub lookahead_px: f64,
    /// Minimum vertical travel of a swipe, exclusive.
    #[schemars(title = "Swipe Threshold (px)", range(min = 10.0, max = 200.0), extend("step" = 5.0))]
    pub swipe_threshold_px: f64,
    /// Viewports at most this wide disable section snapping.
    #[schemars(title = "Narrow Breakpoint (px)", range(min = 320.0, max = 1280.0), extend("step" = 1.0))]
    pub narrow_breakpoint_px: f64,
    /// Easing curve of section transitions.
    pub easing: EasingFunction,
}

impl NavigationOptions {
    /// Transition duration.
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Cooldown duration.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Whether a viewport of `width` disables snapping.
    #[must_use]
    pub fn is_narrow(&self, width: f64) -> bool {
        width <= self.narrow_breakpoint_px
    }
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            section_selector: ".section, .footer".into(),
            transition_ms: 800,
            cooldown_ms: 1000,
            lookahead_px: 100.0,
            swipe_threshold_px: 50.0,
            narrow_breakpoint_px: 768.0,
            easing: EasingFunction::DEFAULT,
        }
    }
}
