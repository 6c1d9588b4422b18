//! Time-based scroll animation.

pub mod scroll;

pub use scroll::{AnimationHandle, FrameOutcome, ScrollAnimation, ScrollAnimator};
