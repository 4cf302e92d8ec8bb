//! Effect descriptors
//!
//! An [`EffectDescriptor`] is the immutable recipe for one property change
//! over time: which property, from where to where, how long, with which
//! curve, and how often to repeat.
//!
//! # Example
//!
//! ```rust
//! use starfall_animation::{Curve, EffectDescriptor, RepeatMode};
//! use starfall_core::PropertyId;
//!
//! // Slide 200px right, then back to wherever the entity started
//! let slide = EffectDescriptor::new(PropertyId::TranslationX, 200.0)
//!     .repeat(1, RepeatMode::Reverse)
//!     .curve(Curve::Linear);
//!
//! assert!(slide.validate().is_ok());
//! assert_eq!(slide.total_duration_ms(), 600);
//! ```

use crate::curve::Curve;
use crate::error::{EffectError, Result};
use crate::values::Interpolate;
use starfall_core::{PropertyId, PropertyValue};

/// Duration used when none is configured
pub const DEFAULT_DURATION_MS: u32 = 300;

/// What happens at the end of a cycle when repeats remain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Jump back to the start value and play forward again
    #[default]
    Restart,
    /// Play the next cycle backwards (ping-pong)
    Reverse,
}

/// Immutable configuration of a single timed property effect
#[derive(Clone, Debug)]
pub struct EffectDescriptor {
    property: PropertyId,
    /// `None` resolves to the property's current value when the effect starts
    start: Option<PropertyValue>,
    end: PropertyValue,
    duration_ms: u32,
    curve: Curve,
    /// Extra cycles after the first (0 plays once)
    repeat_count: i32,
    repeat_mode: RepeatMode,
}

impl EffectDescriptor {
    /// Animate `property` from its current value to `end`
    pub fn new(property: PropertyId, end: impl Into<PropertyValue>) -> Self {
        Self {
            property,
            start: None,
            end: end.into(),
            duration_ms: DEFAULT_DURATION_MS,
            curve: Curve::default(),
            repeat_count: 0,
            repeat_mode: RepeatMode::Restart,
        }
    }

    /// Animate `property` between two explicit values
    pub fn from_to(
        property: PropertyId,
        start: impl Into<PropertyValue>,
        end: impl Into<PropertyValue>,
    ) -> Self {
        Self::new(property, end).start(start)
    }

    pub fn start(mut self, value: impl Into<PropertyValue>) -> Self {
        self.start = Some(value.into());
        self
    }

    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn repeat_count(mut self, count: i32) -> Self {
        self.repeat_count = count;
        self
    }

    pub fn repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.repeat_mode = mode;
        self
    }

    /// Set repeat count and mode together
    pub fn repeat(self, count: i32, mode: RepeatMode) -> Self {
        self.repeat_count(count).repeat_mode(mode)
    }

    pub fn property(&self) -> &PropertyId {
        &self.property
    }

    pub fn start_value(&self) -> Option<PropertyValue> {
        self.start
    }

    pub fn end_value(&self) -> PropertyValue {
        self.end
    }

    pub fn cycle_duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn curve_ref(&self) -> &Curve {
        &self.curve
    }

    pub fn repeats(&self) -> i32 {
        self.repeat_count
    }

    pub fn mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Duration of all cycles: `duration × (repeat_count + 1)`
    pub fn total_duration_ms(&self) -> u64 {
        u64::from(self.duration_ms) * (self.repeat_count.max(0) as u64 + 1)
    }

    /// Whether the last cycle runs backwards and so ends on the start value
    pub fn ends_reversed(&self) -> bool {
        self.repeat_mode == RepeatMode::Reverse && self.repeat_count % 2 == 1
    }

    /// Reject configurations that cannot be played
    pub fn validate(&self) -> Result<()> {
        if self.duration_ms == 0 {
            return Err(EffectError::InvalidConfig(format!(
                "{}: duration must be positive",
                self.property
            )));
        }
        if self.repeat_count < 0 {
            return Err(EffectError::InvalidConfig(format!(
                "{}: repeat count must not be negative, got {}",
                self.property, self.repeat_count
            )));
        }
        if let Some(problem) = self.curve.check() {
            return Err(EffectError::InvalidConfig(format!(
                "{}: {problem}",
                self.property
            )));
        }
        if let Some(start) = &self.start {
            if !start.same_kind(&self.end) {
                return Err(EffectError::InvalidConfig(format!(
                    "{}: cannot animate from a {} to a {}",
                    self.property,
                    start.kind_name(),
                    self.end.kind_name()
                )));
            }
        }
        Ok(())
    }

    /// Evaluate the effect at cycle fraction `t`, starting from `start`
    ///
    /// Eased progress of exactly 0 or 1 returns `start` or the end value
    /// unchanged, so finished cycles land on their endpoints without
    /// rounding drift.
    pub fn value_at(&self, start: &PropertyValue, t: f32) -> PropertyValue {
        let eased = self.curve.apply(t);
        if eased == 0.0 {
            *start
        } else if eased == 1.0 {
            self.end
        } else {
            start.lerp(&self.end, eased)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::Color;

    #[test]
    fn test_defaults() {
        let d = EffectDescriptor::new(PropertyId::Alpha, 0.0);
        assert_eq!(d.cycle_duration_ms(), DEFAULT_DURATION_MS);
        assert_eq!(d.repeats(), 0);
        assert_eq!(d.mode(), RepeatMode::Restart);
        assert_eq!(d.start_value(), None);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let d = EffectDescriptor::new(PropertyId::Alpha, 0.0).duration_ms(0);
        assert!(matches!(d.validate(), Err(EffectError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_repeat_rejected() {
        let d = EffectDescriptor::new(PropertyId::Alpha, 0.0).repeat_count(-1);
        assert!(matches!(d.validate(), Err(EffectError::InvalidConfig(_))));
    }

    #[test]
    fn test_mixed_kinds_rejected() {
        let d = EffectDescriptor::from_to(PropertyId::BackgroundColor, 0.0, Color::RED);
        assert!(matches!(d.validate(), Err(EffectError::InvalidConfig(_))));
    }

    #[test]
    fn test_value_formula() {
        let d = EffectDescriptor::from_to(PropertyId::Rotation, -360.0, 0.0).curve(Curve::Linear);
        let start = PropertyValue::Float(-360.0);
        assert_eq!(d.value_at(&start, 0.0), start);
        assert_eq!(d.value_at(&start, 0.25), PropertyValue::Float(-270.0));
        assert_eq!(d.value_at(&start, 1.0), PropertyValue::Float(0.0));
    }

    #[test]
    fn test_total_duration() {
        let d = EffectDescriptor::new(PropertyId::ScaleX, 4.0)
            .duration_ms(250)
            .repeat(3, RepeatMode::Restart);
        assert_eq!(d.total_duration_ms(), 1000);
    }

    #[test]
    fn test_ends_reversed() {
        let once = EffectDescriptor::new(PropertyId::Alpha, 0.0).repeat(1, RepeatMode::Reverse);
        let twice = EffectDescriptor::new(PropertyId::Alpha, 0.0).repeat(2, RepeatMode::Reverse);
        let restart = EffectDescriptor::new(PropertyId::Alpha, 0.0).repeat(1, RepeatMode::Restart);
        assert!(once.ends_reversed());
        assert!(!twice.ends_reversed());
        assert!(!restart.ends_reversed());
    }
}
