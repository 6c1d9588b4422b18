//! Header and back-to-top reactions to the scroll offset.

use web_time::Duration;

use crate::host::ClassSink;
use crate::options::EffectsOptions;

/// Class toggled on the header once the page has scrolled.
pub const SCROLLED_CLASS: &str = "scrolled";
/// Class toggled on the back-to-top button once it should show.
pub const VISIBLE_CLASS: &str = "visible";

/// Threshold-driven class toggles on page chrome.
#[derive(Debug, Clone)]
pub struct ScrollEffects {
    options: EffectsOptions,
    header_scrolled: Option<bool>,
    back_to_top_visible: Option<bool>,
}

impl ScrollEffects {
    /// Effects configured by `options`.
    #[must_use]
    pub fn new(options: EffectsOptions) -> Self {
        Self {
            options,
            header_scrolled: None,
            back_to_top_visible: None,
        }
    }

    /// Duration of the back-to-top scroll.
    #[must_use]
    pub fn back_to_top_duration(&self) -> Duration {
        Duration::from_millis(self.options.back_to_top_ms)
    }

    /// Whether a back-to-top button is configured.
    #[must_use]
    pub fn has_back_to_top(&self) -> bool {
        !self.options.back_to_top_selector.is_empty()
    }

    /// Recompute both toggles for `scroll_y`, pushing only changes.
    pub fn update(&mut self, scroll_y: f64, sink: &mut dyn ClassSink) {
        let scrolled = scroll_y > self.options.header_scrolled_px;
        if !self.options.header_selector.is_empty()
            && self.header_scrolled != Some(scrolled)
        {
            sink.set_class(&self.options.header_selector, SCROLLED_CLASS, scrolled);
            self.header_scrolled = Some(scrolled);
        }

        let visible = scroll_y > self.options.back_to_top_px;
        if self.has_back_to_top() && self.back_to_top_visible != Some(visible) {
            sink.set_class(
                &self.options.back_to_top_selector,
                VISIBLE_CLASS,
                visible,
            );
            self.back_to_top_visible = Some(visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingSink;

    #[test]
    fn header_flips_past_threshold() {
        let mut effects = ScrollEffects::new(EffectsOptions::default());
        let mut sink = RecordingSink::default();

        effects.update(100.0, &mut sink);
        assert!(!sink.has_class("#header", SCROLLED_CLASS));
        effects.update(101.0, &mut sink);
        assert!(sink.has_class("#header", SCROLLED_CLASS));
        effects.update(0.0, &mut sink);
        assert!(!sink.has_class("#header", SCROLLED_CLASS));
    }

    #[test]
    fn back_to_top_flips_past_threshold() {
        let mut effects = ScrollEffects::new(EffectsOptions::default());
        let mut sink = RecordingSink::default();

        effects.update(500.0, &mut sink);
        assert!(!sink.has_class("#backToTop", VISIBLE_CLASS));
        effects.update(501.0, &mut sink);
        assert!(sink.has_class("#backToTop", VISIBLE_CLASS));
    }

    #[test]
    fn repeated_offsets_emit_once() {
        let mut effects = ScrollEffects::new(EffectsOptions::default());
        let mut sink = RecordingSink::default();

        effects.update(700.0, &mut sink);
        effects.update(720.0, &mut sink);
        effects.update(740.0, &mut sink);
        assert_eq!(sink.changes.len(), 2);
    }

    #[test]
    fn missing_back_to_top_is_skipped() {
        let options = EffectsOptions {
            back_to_top_selector: String::new(),
            ..EffectsOptions::default()
        };
        let mut effects = ScrollEffects::new(options);
        let mut sink = RecordingSink::default();

        effects.update(900.0, &mut sink);
        assert!(!effects.has_back_to_top());
        assert_eq!(sink.changes.len(), 1);
        assert_eq!(sink.changes[0].target, "#header");
    }
}
