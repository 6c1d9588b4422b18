//! Position indicator sync.
//!
//! Shows the indicator once the page has scrolled past a fraction of the
//! viewport height and highlights the landmark whose section contains the
//! viewport's vertical midpoint. Runs on every scroll event regardless of
//! the navigator's phase; it only reads section geometry.

use crate::host::{ClassSink, SectionRegistry};
use crate::options::IndicatorOptions;

/// Class toggled on the indicator element.
pub const VISIBLE_CLASS: &str = "visible";
/// Class toggled on the highlighted landmark entry.
pub const ACTIVE_CLASS: &str = "active";

/// Tracks the indicator's visibility and active landmark, emitting class
/// toggles only when they change.
#[derive(Debug, Clone)]
pub struct PositionIndicator {
    options: IndicatorOptions,
    visible: Option<bool>,
    active: Option<String>,
    synced: bool,
}

impl PositionIndicator {
    /// Indicator configured by `options`.
    #[must_use]
    pub fn new(options: IndicatorOptions) -> Self {
        Self {
            options,
            visible: None,
            active: None,
            synced: false,
        }
    }

    /// Whether an indicator element is configured at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.options.selector.is_empty()
    }

    /// Last computed visibility.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(false)
    }

    /// Last computed active landmark.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Landmark whose section contains `probe_y`, first match in configured
    /// order. Landmarks missing from the registry are skipped.
    #[must_use]
    pub fn landmark_at(
        &self,
        probe_y: f64,
        sections: &dyn SectionRegistry,
    ) -> Option<&str> {
        self.options
            .landmarks
            .iter()
            .find(|id| {
                sections
                    .index_of(id)
                    .and_then(|i| sections.geometry(i))
                    .is_some_and(|g| g.contains(probe_y))
            })
            .map(String::as_str)
    }

    /// Scroll offset of `landmark`'s section, if it is a configured and
    /// registered landmark.
    #[must_use]
    pub fn jump_target(
        &self,
        landmark: &str,
        sections: &dyn SectionRegistry,
    ) -> Option<f64> {
        if !self.options.landmarks.iter().any(|id| id == landmark) {
            return None;
        }
        let index = sections.index_of(landmark)?;
        sections.geometry(index).map(|g| g.top)
    }

    /// Recompute from the current scroll state and push changes to `sink`.
    pub fn update(
        &mut self,
        scroll_y: f64,
        viewport_height: f64,
        sections: &dyn SectionRegistry,
        sink: &mut dyn ClassSink,
    ) {
        if !self.is_enabled() {
            return;
        }

        let visible = scroll_y > viewport_height * self.options.visible_fraction;
        if self.visible != Some(visible) {
            sink.set_class(&self.options.selector, VISIBLE_CLASS, visible);
            self.visible = Some(visible);
        }

        let probe_y = scroll_y + viewport_height / 2.0;
        let active = self.landmark_at(probe_y, sections).map(str::to_owned);

        if !self.synced {
            // Establish a known state for every entry on the first pass.
            for id in &self.options.landmarks {
                let on = active.as_deref() == Some(id.as_str());
                sink.set_class(&self.options.entry_for(id), ACTIVE_CLASS, on);
            }
            self.synced = true;
        } else if active != self.active {
            if let Some(previous) = &self.active {
                sink.set_class(
                    &self.options.entry_for(previous),
                    ACTIVE_CLASS,
                    false,
                );
            }
            if let Some(current) = &active {
                sink.set_class(&self.options.entry_for(current), ACTIVE_CLASS, true);
            }
        }
        self.active = active;
    }
}
