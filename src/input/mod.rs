//! Input handling: page event types, key actions, and the gesture
//! processor that converts raw page events into navigation gestures.

/// Platform-agnostic page events.
pub mod event;
/// Bindable navigation actions.
pub mod keyboard;
/// Converts raw events into gestures.
pub mod processor;

pub use event::{Gesture, Interpretation, PageEvent};
pub use keyboard::NavAction;
pub use processor::{GestureProcessor, InputContext};
