//! Easing functions for scroll interpolation.
//!
//! Maps linear time progress to motion progress. Every curve fixes the
//! endpoints: `evaluate(0.0) == 0.0` and `evaluate(1.0) == 1.0`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for scroll animation curves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Piecewise cubic: accelerate through the first half, decelerate
    /// through the second.
    ///
    /// Formula: `t < 0.5 ? 4t³ : 1 − (−2t + 2)³ / 2`
    CubicInOut,
}

impl EasingFunction {
    /// Default easing for section transitions.
    pub const DEFAULT: EasingFunction = EasingFunction::CubicInOut;

    /// Evaluate the easing function at progress `t`.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_in_out_fixed_points() {
        let cubic = EasingFunction::CubicInOut;
        assert_eq!(cubic.evaluate(0.0), 0.0);
        assert_eq!(cubic.evaluate(0.5), 0.5);
        assert_eq!(cubic.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_in_out_is_continuous_at_midpoint() {
        let cubic = EasingFunction::CubicInOut;
        let below = cubic.evaluate(0.5 - 1e-9);
        let above = cubic.evaluate(0.5 + 1e-9);
        assert!((below - 0.5).abs() < 1e-6);
        assert!((above - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_in_out_shape() {
        // Slow start, slow finish, symmetric about the midpoint.
        let cubic = EasingFunction::CubicInOut;
        assert!((cubic.evaluate(0.25) - 0.0625).abs() < 1e-12);
        assert!((cubic.evaluate(0.75) - 0.9375).abs() < 1e-12);
        let a = cubic.evaluate(0.1);
        let b = cubic.evaluate(0.9);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cubic_in_out_is_monotonic() {
        let cubic = EasingFunction::CubicInOut;
        let mut prev = cubic.evaluate(0.0);
        for step in 1..=100 {
            let next = cubic.evaluate(f64::from(step) / 100.0);
            assert!(next >= prev, "curve decreased at step {step}");
            prev = next;
        }
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let cubic = EasingFunction::CubicInOut;
        assert_eq!(cubic.evaluate(-0.5), 0.0);
        assert_eq!(cubic.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_quadratic_in() {
        let quad_in = EasingFunction::QuadraticIn;
        assert_eq!(quad_in.evaluate(0.0), 0.0);
        assert_eq!(quad_in.evaluate(0.5), 0.25);
        assert_eq!(quad_in.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.0), 0.0);
        assert_eq!(quad_out.evaluate(0.5), 0.75);
        assert_eq!(quad_out.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_default_is_cubic_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::CubicInOut);
    }
}
