//! Animatable value types
//!
//! Linear interpolation for the value kinds an effect can drive. Factors
//! outside `0..=1` extrapolate for every kind, so an overshooting custom
//! curve moves colors the same way it moves floats.

use starfall_core::{Color, PropertyValue};

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Color {
    /// Unclamped; channels may leave `0..=1` until packed with `to_argb`
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Color {
            r: self.r.lerp(&other.r, t),
            g: self.g.lerp(&other.g, t),
            b: self.b.lerp(&other.b, t),
            a: self.a.lerp(&other.a, t),
        }
    }
}

impl Interpolate for PropertyValue {
    /// Mixed kinds never interpolate; the value snaps at the halfway point.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Self::Float(a.lerp(b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(Interpolate::lerp(a, b, t)),
            _ if t < 0.5 => *self,
            _ => *other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_interpolation() {
        assert!((0.0_f32.lerp(&1.0, 0.5) - 0.5).abs() < 1e-6);
        assert!((10.0_f32.lerp(&20.0, 0.25) - 12.5).abs() < 1e-6);
    }

    #[test]
    fn test_float_extrapolates() {
        assert!((0.0_f32.lerp(&10.0, 1.2) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_property_value_color() {
        let a = PropertyValue::Color(Color::BLACK);
        let b = PropertyValue::Color(Color::RED);
        let mid = a.lerp(&b, 0.5).as_color().unwrap();
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert_eq!(mid.g, 0.0);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_color_extrapolates_like_float() {
        let over = Interpolate::lerp(&Color::BLACK, &Color::RED, 1.2);
        assert!((over.r - 1.2).abs() < 1e-5);
        assert_eq!(over.to_argb(), Color::RED.to_argb());

        let under = Interpolate::lerp(&Color::BLACK, &Color::RED, -0.25);
        assert!((under.r + 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_mixed_kinds_snap() {
        let a = PropertyValue::Float(1.0);
        let b = PropertyValue::Color(Color::RED);
        assert_eq!(a.lerp(&b, 0.2), a);
        assert_eq!(a.lerp(&b, 0.8), b);
    }
}
