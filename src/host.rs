//! Seams to the surrounding page.
//!
//! The controller never touches the document directly. Scroll position,
//! viewport size, section geometry and CSS class toggles all go through the
//! traits in this module, so the same state machine runs against the real
//! DOM (see the `web` feature) or against the in-memory implementations
//! below.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Vertical geometry of one full-viewport section, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Offset of the section's top edge from the document top.
    pub top: f64,
    /// Rendered height.
    pub height: f64,
}

impl SectionGeometry {
    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `y` lies within `[top, bottom)`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Read-only, ordered view of the page's sections.
///
/// Indices are zero-based and stable for the registry's lifetime. Geometry
/// is read on every call so layout changes are picked up without an
/// explicit refresh.
pub trait SectionRegistry {
    /// Number of sections.
    fn len(&self) -> usize;

    /// Current geometry of the section at `index`.
    fn geometry(&self, index: usize) -> Option<SectionGeometry>;

    /// Resolve an element identifier (anchor target) to a section index.
    fn index_of(&self, id: &str) -> Option<usize>;

    /// Whether the registry holds no sections.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The document's scroll surface.
pub trait Viewport {
    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;
    /// Jump the scroll offset to `y`. Out-of-range values are clamped by
    /// the implementation, not by callers.
    fn scroll_to(&mut self, y: f64);
    /// Viewport width in logical pixels.
    fn width(&self) -> f64;
    /// Viewport height in logical pixels.
    fn height(&self) -> f64;
}

/// Visual state setter: adds or removes a CSS class on the elements a
/// selector names.
pub trait ClassSink {
    /// Set (`on == true`) or clear `class` on the element identified by
    /// `target`. Missing elements are ignored.
    fn set_class(&mut self, target: &str, class: &str, on: bool);
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory implementations
// ─────────────────────────────────────────────────────────────────────────────

/// One entry of a [`StaticSections`] registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Element identifier used for anchor resolution.
    pub id: String,
    /// Offset from the document top.
    pub top: f64,
    /// Rendered height.
    pub height: f64,
}

/// Fixed list of sections held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSections {
    sections: Vec<SectionSpec>,
    by_id: FxHashMap<String, usize>,
}

impl StaticSections {
    /// Build a registry from sections in document order.
    ///
    /// When identifiers repeat, anchor lookup resolves to the first one.
    #[must_use]
    pub fn new(sections: Vec<SectionSpec>) -> Self {
        let mut by_id = FxHashMap::default();
        for (index, section) in sections.iter().enumerate() {
            let _ = by_id.entry(section.id.clone()).or_insert(index);
        }
        Self { sections, by_id }
    }

    /// `count` sections of equal `height`, stacked from the top, named
    /// `section-0`, `section-1`, ...
    #[must_use]
    pub fn uniform(count: usize, height: f64) -> Self {
        Self::new(
            (0..count)
                .map(|i| SectionSpec {
                    id: format!("section-{i}"),
                    top: i as f64 * height,
                    height,
                })
                .collect(),
        )
    }

    /// Total document height covered by the sections.
    #[must_use]
    pub fn document_height(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.top + s.height)
            .fold(0.0, f64::max)
    }

    /// Replace one section's geometry (simulates a layout change).
    pub fn set_geometry(&mut self, index: usize, geometry: SectionGeometry) {
        if let Some(section) = self.sections.get_mut(index) {
            section.top = geometry.top;
            section.height = geometry.height;
        }
    }
}

impl SectionRegistry for StaticSections {
    fn len(&self) -> usize {
        self.sections.len()
    }

    fn geometry(&self, index: usize) -> Option<SectionGeometry> {
        self.sections.get(index).map(|s| SectionGeometry {
            top: s.top,
            height: s.height,
        })
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }
}

/// A viewport that clamps scroll offsets the way a browser does.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedViewport {
    scroll_y: f64,
    width: f64,
    height: f64,
    document_height: f64,
}

impl SimulatedViewport {
    /// Viewport of `width` × `height` over a document `document_height`
    /// tall, scrolled to the top.
    #[must_use]
    pub fn new(width: f64, height: f64, document_height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
            document_height,
        }
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }

    /// Change the viewport size (window resize / device rotation).
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }
}

impl Viewport for SimulatedViewport {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

/// A single class toggle, as applied to a [`ClassSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassChange {
    /// Target element selector.
    pub target: String,
    /// CSS class name.
    pub class: String,
    /// Whether the class is now present.
    pub on: bool,
}

/// [`ClassSink`] that records every toggle, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Toggles in the order they were applied.
    pub changes: Vec<ClassChange>,
}

impl RecordingSink {
    /// Whether the latest toggle for `target`/`class` turned it on.
    #[must_use]
    pub fn has_class(&self, target: &str, class: &str) -> bool {
        self.changes
            .iter()
            .rev()
            .find(|c| c.target == target && c.class == class)
            .is_some_and(|c| c.on)
    }
}

impl ClassSink for RecordingSink {
    fn set_class(&mut self, target: &str, class: &str, on: bool) {
        self.changes.push(ClassChange {
            target: target.to_owned(),
            class: class.to_owned(),
            on,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sections_stack_from_top() {
        let sections = StaticSections::uniform(3, 900.0);
        assert_eq!(sections.len(), 3);
        assert_eq!(
            sections.geometry(2),
            Some(SectionGeometry {
                top: 1800.0,
                height: 900.0
            })
        );
        assert_eq!(sections.geometry(3), None);
        assert_eq!(sections.document_height(), 2700.0);
    }

    #[test]
    fn index_of_resolves_first_duplicate() {
        let sections = StaticSections::new(vec![
            SectionSpec {
                id: "a".into(),
                top: 0.0,
                height: 100.0,
            },
            SectionSpec {
                id: "b".into(),
                top: 100.0,
                height: 100.0,
            },
            SectionSpec {
                id: "a".into(),
                top: 200.0,
                height: 100.0,
            },
        ]);
        assert_eq!(sections.index_of("a"), Some(0));
        assert_eq!(sections.index_of("b"), Some(1));
        assert_eq!(sections.index_of("missing"), None);
    }

    #[test]
    fn simulated_viewport_clamps_scroll() {
        let mut viewport = SimulatedViewport::new(1280.0, 800.0, 3200.0);
        viewport.scroll_to(-50.0);
        assert_eq!(viewport.scroll_y(), 0.0);
        viewport.scroll_to(10_000.0);
        assert_eq!(viewport.scroll_y(), 2400.0);

        viewport.resize(1280.0, 3000.0);
        assert_eq!(viewport.scroll_y(), 200.0);
    }

    #[test]
    fn recording_sink_reports_latest_state() {
        let mut sink = RecordingSink::default();
        sink.set_class("header", "scrolled", true);
        sink.set_class("header", "scrolled", false);
        assert!(!sink.has_class("header", "scrolled"));
        sink.set_class("header", "scrolled", true);
        assert!(sink.has_class("header", "scrolled"));
        assert!(!sink.has_class("backToTop", "visible"));
    }
}
