//! Interpolation curves
//!
//! A curve maps the elapsed fraction of one cycle (`0.0..=1.0`) onto eased
//! progress. Built-in curves start at 0 and end at 1; custom curves may
//! overshoot or run backwards.

use std::f32::consts::PI;
use std::fmt;
use std::sync::Arc;

/// User-supplied curve function
pub type CurveFn = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Easing applied to one cycle of an effect
#[derive(Clone, Default)]
pub enum Curve {
    /// Constant rate
    Linear,
    /// Starts slow and speeds up: `t^(2 * factor)`
    Accelerate(f32),
    /// Starts fast and slows down: `1 - (1 - t)^(2 * factor)`
    Decelerate(f32),
    /// Slow at both ends, fastest in the middle
    #[default]
    AccelerateDecelerate,
    Custom(CurveFn),
}

impl Curve {
    /// Accelerate with the default factor (`t^2`)
    pub fn accelerate() -> Self {
        Self::Accelerate(1.0)
    }

    /// Decelerate with the default factor
    pub fn decelerate() -> Self {
        Self::Decelerate(1.0)
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Evaluate the curve at `t`, clamped to `0.0..=1.0`
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Custom(f) => f(t),
            // Pin the endpoints so built-ins land exactly on 0 and 1
            _ if t <= 0.0 => 0.0,
            _ if t >= 1.0 => 1.0,
            Self::Linear => t,
            Self::Accelerate(factor) => {
                if *factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
            Self::Decelerate(factor) => {
                let inv = 1.0 - t;
                if *factor == 1.0 {
                    1.0 - inv * inv
                } else {
                    1.0 - inv.powf(2.0 * factor)
                }
            }
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }

    /// Check curve parameters, returning a description of the problem
    pub(crate) fn check(&self) -> Option<String> {
        match self {
            Self::Accelerate(factor) | Self::Decelerate(factor)
                if !(factor.is_finite() && *factor > 0.0) =>
            {
                Some(format!("curve factor must be finite and positive, got {factor}"))
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("Linear"),
            Self::Accelerate(factor) => f.debug_tuple("Accelerate").field(factor).finish(),
            Self::Decelerate(factor) => f.debug_tuple("Decelerate").field(factor).finish(),
            Self::AccelerateDecelerate => f.write_str("AccelerateDecelerate"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtins() -> Vec<Curve> {
        vec![
            Curve::Linear,
            Curve::accelerate(),
            Curve::Accelerate(2.5),
            Curve::decelerate(),
            Curve::Decelerate(0.5),
            Curve::AccelerateDecelerate,
        ]
    }

    #[test]
    fn test_builtin_endpoints() {
        for curve in builtins() {
            assert_eq!(curve.apply(0.0), 0.0, "{curve:?}");
            assert_eq!(curve.apply(1.0), 1.0, "{curve:?}");
        }
    }

    #[test]
    fn test_accelerate_is_quadratic() {
        let curve = Curve::accelerate();
        assert!((curve.apply(0.5) - 0.25).abs() < 1e-6);
        assert!(curve.apply(0.3) < 0.3);
    }

    #[test]
    fn test_decelerate_leads_linear() {
        let curve = Curve::decelerate();
        assert!((curve.apply(0.5) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_accelerate_decelerate_midpoint() {
        let curve = Curve::AccelerateDecelerate;
        assert!((curve.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(curve.apply(0.1) < 0.1);
        assert!(curve.apply(0.9) > 0.9);
    }

    #[test]
    fn test_input_is_clamped() {
        assert_eq!(Curve::Linear.apply(-1.0), 0.0);
        assert_eq!(Curve::Linear.apply(3.0), 1.0);
    }

    #[test]
    fn test_custom_curve_may_overshoot() {
        let curve = Curve::custom(|t| t * 1.5);
        assert!((curve.apply(1.0) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_bad_factor_rejected() {
        assert!(Curve::Accelerate(0.0).check().is_some());
        assert!(Curve::Decelerate(f32::NAN).check().is_some());
        assert!(Curve::Accelerate(1.0).check().is_none());
        assert!(Curve::Linear.check().is_none());
    }
}
