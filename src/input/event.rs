/// Platform-agnostic page events.
///
/// These are fed into a [`GestureProcessor`](super::GestureProcessor),
/// usually through [`PageController::handle_event`](crate::PageController::handle_event).
///
/// # Example
///
/// ```ignore
/// let response = controller.handle_event(
///     &PageEvent::Wheel { delta_y: 120.0 },
///     &viewport,
///     Instant::now(),
/// );
/// if response.prevent_default {
///     dom_event.prevent_default();
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Mouse wheel / trackpad tick.
    Wheel {
        /// Vertical delta (positive = toward the document end).
        delta_y: f64,
    },
    /// Key pressed, identified by its `KeyboardEvent.key` value
    /// (`"ArrowDown"`, `"PageUp"`, ...).
    Key {
        /// Key value.
        key: String,
    },
    /// First finger touched down.
    TouchStart {
        /// Client-space vertical position.
        y: f64,
    },
    /// Finger lifted.
    TouchEnd {
        /// Client-space vertical position.
        y: f64,
    },
    /// In-page link clicked.
    AnchorClick {
        /// Raw `href` attribute (`"#observatory"`).
        href: String,
    },
    /// Position indicator entry clicked.
    LandmarkClick {
        /// Landmark identifier.
        landmark: String,
    },
    /// Back-to-top button clicked.
    BackToTop,
}

/// Abstract navigation intent derived from one page event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Advance one section.
    Next,
    /// Retreat one section.
    Previous,
    /// Jump to the section at this index (a resolved anchor).
    GoTo(usize),
}

/// What the processor decided about one event, before the navigator sees
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Leave the event to the browser (native scroll, native anchor jump,
    /// unbound key, ...).
    Passthrough,
    /// The event was consumed without a navigation intent (touch start).
    Consumed,
    /// The event carries a navigation intent. `prevent_default` says
    /// whether the host must cancel the event's native action.
    Navigate {
        /// Intent.
        gesture: Gesture,
        /// Whether to cancel the native action.
        prevent_default: bool,
    },
    /// A navigation input arrived during a transition. Dropped, and its
    /// native action cancelled.
    Suppressed,
    /// A swipe that did not travel far enough.
    BelowThreshold,
    /// A fragment link whose target is not a registered section. The
    /// browser's own jump is kept.
    UnknownAnchor,
}
