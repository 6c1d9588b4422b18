//! Scripted scenario replay.
//!
//! A scenario describes a page (sections and viewport) and a timeline of
//! input. [`run`] plays it through a [`PageController`] at 60 fps against a
//! [`SimulatedViewport`], delivering animation frames, cooldown expiry and
//! scroll events the way a browser would, and reports what the controller
//! decided.
//!
//! ```toml
//! [viewport]
//! width = 1440.0
//! height = 900.0
//!
//! [[sections]]
//! id = "hero"
//! top = 0.0
//! height = 900.0
//!
//! [[events]]
//! at_ms = 0
//! kind = "wheel"
//! delta_y = 120.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use crate::animation::AnimationHandle;
use crate::error::SnapError;
use crate::host::{
    ClassChange, RecordingSink, SectionSpec, SimulatedViewport, StaticSections,
    Viewport,
};
use crate::input::PageEvent;
use crate::options::Options;
use crate::page::{EventResponse, PageController};

/// Length of one simulated frame.
pub const FRAME: Duration = Duration::from_millis(16);

/// Longest timeline a scenario may describe, tail included (ten minutes).
pub const MAX_TIMELINE_MS: u64 = 10 * 60 * 1000;

/// Viewport size and starting offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportSpec {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
    /// Initial scroll offset.
    #[serde(default)]
    pub scroll_y: f64,
}

/// One kind of scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptedInput {
    /// Wheel tick.
    Wheel {
        /// Vertical delta.
        delta_y: f64,
    },
    /// Key press.
    Key {
        /// `KeyboardEvent.key` value.
        key: String,
    },
    /// Finger down.
    TouchStart {
        /// Client y.
        y: f64,
    },
    /// Finger up.
    TouchEnd {
        /// Client y.
        y: f64,
    },
    /// Fragment link click.
    Anchor {
        /// Link `href`.
        href: String,
    },
    /// Indicator entry click.
    Landmark {
        /// Landmark identifier.
        landmark: String,
    },
    /// Back-to-top click.
    BackToTop,
    /// Native scroll the controller does not intercept (momentum,
    /// scrollbar drag).
    Scroll {
        /// New offset.
        y: f64,
    },
    /// Viewport resize.
    Resize {
        /// New width.
        width: f64,
        /// New height.
        height: f64,
    },
}

impl ScriptedInput {
    /// The page event this input dispatches, if it is one.
    #[must_use]
    pub fn page_event(&self) -> Option<PageEvent> {
        Some(match self {
            Self::Wheel { delta_y } => PageEvent::Wheel { delta_y: *delta_y },
            Self::Key { key } => PageEvent::Key { key: key.clone() },
            Self::TouchStart { y } => PageEvent::TouchStart { y: *y },
            Self::TouchEnd { y } => PageEvent::TouchEnd { y: *y },
            Self::Anchor { href } => PageEvent::AnchorClick { href: href.clone() },
            Self::Landmark { landmark } => PageEvent::LandmarkClick {
                landmark: landmark.clone(),
            },
            Self::BackToTop => PageEvent::BackToTop,
            Self::Scroll { .. } | Self::Resize { .. } => return None,
        })
    }
}

/// Input at a point on the scenario timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Milliseconds since the scenario started.
    pub at_ms: u64,
    /// What happens.
    #[serde(flatten)]
    pub input: ScriptedInput,
}

/// A page and a timeline of input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Viewport size and starting offset.
    pub viewport: ViewportSpec,
    /// Sections in document order.
    pub sections: Vec<SectionSpec>,
    /// Input timeline. Replayed in `at_ms` order; ties keep file order.
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
    /// How long to keep running after the last event.
    #[serde(default = "default_tail_ms")]
    pub tail_ms: u64,
}

const fn default_tail_ms() -> u64 {
    1500
}

impl Scenario {
    /// Parse and validate a scenario from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, SnapError> {
        let scenario: Self = toml::from_str(content)
            .map_err(|e| SnapError::Scenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file.
    pub fn load(path: &Path) -> Result<Self, SnapError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), SnapError> {
        let vp = &self.viewport;
        let positive = vp.width > 0.0 && vp.height > 0.0;
        if !positive {
            return Err(SnapError::Scenario(format!(
                "viewport must have a positive size, got {}x{}",
                vp.width, vp.height
            )));
        }
        if let Some(pair) = self
            .sections
            .windows(2)
            .find(|pair| pair[1].top < pair[0].top)
        {
            return Err(SnapError::Scenario(format!(
                "section '{}' starts above '{}'; sections must be in document order",
                pair[1].id, pair[0].id
            )));
        }
        if let Some(bad) = self.sections.iter().find(|s| s.height < 0.0) {
            return Err(SnapError::Scenario(format!(
                "section '{}' has a negative height",
                bad.id
            )));
        }
        if self.timeline_ms() > MAX_TIMELINE_MS {
            return Err(SnapError::Scenario(format!(
                "timeline runs to {}ms, longer than the {MAX_TIMELINE_MS}ms limit",
                self.timeline_ms()
            )));
        }
        Ok(())
    }

    /// Time of the last event plus the tail.
    #[must_use]
    pub fn timeline_ms(&self) -> u64 {
        self.events
            .iter()
            .map(|e| e.at_ms)
            .max()
            .unwrap_or(0)
            .saturating_add(self.tail_ms)
    }
}

/// What one scripted input produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayStep {
    /// When it was delivered.
    pub at_ms: u64,
    /// The input.
    pub input: ScriptedInput,
    /// The controller's response; `None` for native scrolls and resizes.
    pub response: Option<EventResponse>,
    /// Current section right after the input.
    pub index_after: usize,
}

/// Result of a replay.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    /// One entry per scripted input, in delivery order.
    pub steps: Vec<ReplayStep>,
    /// Every class toggle, in order.
    pub class_changes: Vec<ClassChange>,
    /// Section index when the replay ended.
    pub final_index: usize,
    /// Scroll offset when the replay ended.
    pub final_scroll_y: f64,
    /// Simulated frames delivered.
    pub frames: u64,
}

/// Replay `scenario` with `options`.
#[must_use]
pub fn run(scenario: &Scenario, options: Options) -> ReplayReport {
    let sections = StaticSections::new(scenario.sections.clone());
    let mut viewport = SimulatedViewport::new(
        scenario.viewport.width,
        scenario.viewport.height,
        sections.document_height(),
    );
    viewport.scroll_to(scenario.viewport.scroll_y);

    let mut sink = RecordingSink::default();
    let mut page = PageController::new(sections, options);
    page.start(&viewport, &mut sink);

    let mut events = scenario.events.clone();
    events.sort_by_key(|e| e.at_ms);
    let end_ms = scenario.timeline_ms();

    let t0 = Instant::now();
    let mut live: Vec<AnimationHandle> = Vec::new();
    let mut steps = Vec::with_capacity(events.len());
    let mut pending = events.into_iter().peekable();
    let mut elapsed = Duration::ZERO;
    let mut frames = 0;

    loop {
        let now = t0 + elapsed;
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        while let Some(event) = pending.next_if(|e| e.at_ms <= elapsed_ms) {
            let step = deliver(&mut page, &mut viewport, &mut sink, event, now);
            if let Some(handle) = step.response.and_then(|r| r.animation()) {
                live.push(handle);
            }
            steps.push(step);
        }

        let before = viewport.scroll_y();
        live.retain(|&handle| {
            page.on_frame(handle, &mut viewport, now).wants_next_frame()
        });
        let moved = (viewport.scroll_y() - before).abs() > f64::EPSILON;
        if page.settle(now) || moved {
            page.on_scroll(&viewport, &mut sink, now);
        }

        if elapsed_ms >= end_ms && live.is_empty() {
            break;
        }
        elapsed += FRAME;
        frames += 1;
    }

    ReplayReport {
        steps,
        class_changes: sink.changes,
        final_index: page.current_index(),
        final_scroll_y: viewport.scroll_y(),
        frames,
    }
}

fn deliver(
    page: &mut PageController<StaticSections>,
    viewport: &mut SimulatedViewport,
    sink: &mut RecordingSink,
    event: ScriptedEvent,
    now: Instant,
) -> ReplayStep {
    let response = match &event.input {
        ScriptedInput::Scroll { y } => {
            viewport.scroll_to(*y);
            page.on_scroll(viewport, sink, now);
            None
        }
        ScriptedInput::Resize { width, height } => {
            viewport.resize(*width, *height);
            page.on_scroll(viewport, sink, now);
            None
        }
        input => input
            .page_event()
            .map(|page_event| page.handle_event(&page_event, viewport, now)),
    };
    if let Some(r) = &response {
        log::debug!("{}ms {:?} -> {:?}", event.at_ms, event.input, r.outcome);
    }
    ReplayStep {
        at_ms: event.at_ms,
        input: event.input,
        response,
        index_after: page.current_index(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::IgnoreReason;
    use crate::page::EventOutcome;

    const TOWER: &str = r#"
[viewport]
width = 1440.0
height = 900.0

[[sections]]
id = "hero"
top = 0.0
height = 900.0

[[sections]]
id = "observatory"
top = 900.0
height = 900.0

[[sections]]
id = "skylounge"
top = 1800.0
height = 900.0

[[sections]]
id = "lobby"
top = 2700.0
height = 900.0
"#;

    fn scenario(events: &str) -> Scenario {
        Scenario::from_toml_str(&format!("{TOWER}\n{events}")).unwrap()
    }

    #[test]
    fn wheel_burst_advances_one_section() {
        let s = scenario(
            r#"
[[events]]
at_ms = 0
kind = "wheel"
delta_y = 120

[[events]]
at_ms = 100
kind = "wheel"
delta_y = 120

[[events]]
at_ms = 300
kind = "wheel"
delta_y = 120
"#,
        );
        let report = run(&s, Options::default());

        assert_eq!(report.final_index, 1);
        assert_eq!(report.final_scroll_y, 900.0);
        let dropped = report
            .steps
            .iter()
            .filter(|s| {
                s.response.map(|r| r.outcome)
                    == Some(EventOutcome::Ignored(IgnoreReason::Cooldown))
            })
            .count();
        assert_eq!(dropped, 2);
    }

    #[test]
    fn wheel_after_cooldown_advances_again() {
        let s = scenario(
            r#"
[[events]]
at_ms = 0
kind = "wheel"
delta_y = 120

[[events]]
at_ms = 1100
kind = "wheel"
delta_y = 120
"#,
        );
        let report = run(&s, Options::default());
        assert_eq!(report.final_index, 2);
        assert_eq!(report.final_scroll_y, 1800.0);
    }

    #[test]
    fn landmark_click_and_indicator_follow() {
        let s = scenario(
            r#"
[[events]]
at_ms = 0
kind = "landmark"
landmark = "skylounge"
"#,
        );
        let report = run(&s, Options::default());
        assert_eq!(report.final_scroll_y, 1800.0);
        assert_eq!(report.final_index, 2);

        let entry = Options::default().indicator.entry_for("skylounge");
        let last = report
            .class_changes
            .iter()
            .rev()
            .find(|c| c.target == entry);
        assert!(last.is_some_and(|c| c.on));
    }

    #[test]
    fn native_scroll_on_narrow_viewport_tracks_index() {
        let s = scenario(
            r#"
[[events]]
at_ms = 0
kind = "resize"
width = 390.0
height = 900.0

[[events]]
at_ms = 16
kind = "wheel"
delta_y = 120

[[events]]
at_ms = 32
kind = "scroll"
y = 2000.0
"#,
        );
        let report = run(&s, Options::default());
        assert_eq!(
            report.steps[1].response.map(|r| r.outcome),
            Some(EventOutcome::Ignored(IgnoreReason::NarrowViewport))
        );
        assert_eq!(report.final_scroll_y, 2000.0);
        assert_eq!(report.final_index, 2);
    }

    #[test]
    fn events_are_replayed_in_time_order() {
        let s = scenario(
            r#"
[[events]]
at_ms = 50
kind = "touch_end"
y = 100.0

[[events]]
at_ms = 0
kind = "touch_start"
y = 600.0
"#,
        );
        let report = run(&s, Options::default());
        assert_eq!(report.steps[0].at_ms, 0);
        assert_eq!(report.final_index, 1);
    }

    #[test]
    fn sections_out_of_order_are_rejected() {
        let content = r#"
[viewport]
width = 1440.0
height = 900.0

[[sections]]
id = "b"
top = 900.0
height = 900.0

[[sections]]
id = "a"
top = 0.0
height = 900.0
"#;
        let err = Scenario::from_toml_str(content).unwrap_err();
        assert!(matches!(err, SnapError::Scenario(_)));
    }

    #[test]
    fn runaway_timeline_is_rejected() {
        let err = Scenario::from_toml_str(&format!(
            "{TOWER}\n[[events]]\nat_ms = 9999999999\nkind = \"back_to_top\"\n"
        ))
        .unwrap_err();
        assert!(matches!(err, SnapError::Scenario(_)));

        let err = Scenario::from_toml_str(&format!(
            "tail_ms = {}\n{TOWER}",
            u64::try_from(i64::MAX).unwrap()
        ))
        .unwrap_err();
        assert!(matches!(err, SnapError::Scenario(_)));
    }

    #[test]
    fn timeline_at_the_limit_is_accepted() {
        let s = Scenario::from_toml_str(&format!(
            "tail_ms = 0\n{TOWER}\n[[events]]\nat_ms = {MAX_TIMELINE_MS}\nkind = \"back_to_top\"\n"
        ))
        .unwrap();
        assert_eq!(s.timeline_ms(), MAX_TIMELINE_MS);
    }

    #[test]
    fn unknown_event_kind_is_a_scenario_error() {
        let err = Scenario::from_toml_str(&format!(
            "{TOWER}\n[[events]]\nat_ms = 0\nkind = \"pinch\"\n"
        ))
        .unwrap_err();
        assert!(matches!(err, SnapError::Scenario(_)));
    }
}
