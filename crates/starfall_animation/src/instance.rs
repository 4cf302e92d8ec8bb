//! Effect instances
//!
//! Runtime state of one descriptor bound to one target entity. The instance
//! does not touch the host; it turns elapsed time into values and leaves
//! applying them to the scheduler.

use crate::descriptor::{EffectDescriptor, RepeatMode};
use crate::error::Result;
use starfall_core::{EntityId, PropertyId, PropertyValue};

/// Lifecycle state of an effect
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectState {
    /// Scheduled, waiting for the next tick
    Pending,
    Running,
    /// Played all cycles
    Completed,
    /// Stopped by the caller
    Cancelled,
}

impl EffectState {
    /// Completed and Cancelled never change again
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Result of advancing an instance
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Nothing happened (zero delta, or already terminal)
    Idle,
    /// A new in-flight value
    Progress(PropertyValue),
    /// The final value; the instance is now Completed
    Finished(PropertyValue),
}

impl Step {
    pub fn value(&self) -> Option<PropertyValue> {
        match self {
            Self::Idle => None,
            Self::Progress(v) | Self::Finished(v) => Some(*v),
        }
    }
}

/// One value produced for the host during a tick
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    /// Index of the producing member within its effect (0 for single effects)
    pub member: usize,
    pub target: EntityId,
    pub property: PropertyId,
    pub value: PropertyValue,
}

/// Runtime state for a descriptor playing on a target
#[derive(Clone, Debug)]
pub struct EffectInstance {
    descriptor: EffectDescriptor,
    target: EntityId,
    /// Start value, fixed when the instance begins
    origin: Option<PropertyValue>,
    elapsed_ms: u64,
    cycle: u32,
    reversed: bool,
    state: EffectState,
    last_value: Option<PropertyValue>,
}

impl EffectInstance {
    /// Create a pending instance, validating the descriptor
    pub fn new(descriptor: EffectDescriptor, target: EntityId) -> Result<Self> {
        descriptor.validate()?;
        Ok(Self {
            descriptor,
            target,
            origin: None,
            elapsed_ms: 0,
            cycle: 0,
            reversed: false,
            state: EffectState::Pending,
            last_value: None,
        })
    }

    /// Resolve the start value and move from Pending to Running
    ///
    /// An explicit start value on the descriptor wins. Otherwise `current`
    /// is used when it matches the end value's kind, falling back to the
    /// property's default.
    pub fn begin(&mut self, current: Option<PropertyValue>) {
        if self.state != EffectState::Pending {
            return;
        }

        let end = self.descriptor.end_value();
        let origin = self
            .descriptor
            .start_value()
            .or(current.filter(|v| v.same_kind(&end)))
            .unwrap_or_else(|| {
                let fallback = self.descriptor.property().default_value();
                if fallback.same_kind(&end) {
                    fallback
                } else {
                    end
                }
            });

        self.origin = Some(origin);
        self.state = EffectState::Running;
    }

    /// Advance by `delta_ms` and produce the new value
    pub fn advance(&mut self, delta_ms: u64) -> Step {
        if self.state.is_terminal() || delta_ms == 0 {
            return Step::Idle;
        }
        if self.state == EffectState::Pending {
            self.begin(None);
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        let duration = u64::from(self.descriptor.cycle_duration_ms());
        let repeats = self.descriptor.repeats().max(0) as u64;
        let cycle = self.elapsed_ms / duration;

        if cycle > repeats {
            self.elapsed_ms = self.descriptor.total_duration_ms();
            self.cycle = repeats as u32;
            self.reversed = self.descriptor.ends_reversed();
            let value = self.sample(if self.reversed { 0.0 } else { 1.0 });
            self.state = EffectState::Completed;
            return Step::Finished(value);
        }

        self.cycle = cycle as u32;
        self.reversed = self.descriptor.mode() == RepeatMode::Reverse && cycle % 2 == 1;

        let local_t = (self.elapsed_ms % duration) as f32 / duration as f32;
        let value = self.sample(if self.reversed { 1.0 - local_t } else { local_t });
        Step::Progress(value)
    }

    /// Stop immediately, leaving the last applied value in place
    ///
    /// Returns `false` if the instance had already finished.
    pub fn cancel(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = EffectState::Cancelled;
        true
    }

    fn sample(&mut self, t: f32) -> PropertyValue {
        let origin = self.origin.unwrap_or_else(|| self.descriptor.end_value());
        let value = self.descriptor.value_at(&origin, t);
        self.last_value = Some(value);
        value
    }

    pub fn descriptor(&self) -> &EffectDescriptor {
        &self.descriptor
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn property(&self) -> &PropertyId {
        self.descriptor.property()
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Zero-based index of the current cycle
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Whether the current cycle plays backwards
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Start value resolved by [`begin`](Self::begin)
    pub fn origin(&self) -> Option<PropertyValue> {
        self.origin
    }

    /// Last value produced, if any
    pub fn value(&self) -> Option<PropertyValue> {
        self.last_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::error::EffectError;
    use starfall_core::Color;

    const STAR: EntityId = EntityId::new(1);

    fn float(step: Step) -> f32 {
        step.value().and_then(|v| v.as_float()).unwrap()
    }

    #[test]
    fn test_invalid_descriptor_rejected() {
        let d = EffectDescriptor::new(PropertyId::Alpha, 0.0).duration_ms(0);
        assert!(matches!(
            EffectInstance::new(d, STAR),
            Err(EffectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_play_once_completes_at_duration() {
        let d = EffectDescriptor::from_to(PropertyId::Rotation, -360.0, 0.0).duration_ms(1000);
        let mut inst = EffectInstance::new(d, STAR).unwrap();

        assert!(matches!(inst.advance(999), Step::Progress(_)));
        assert_eq!(inst.state(), EffectState::Running);

        let step = inst.advance(1);
        assert_eq!(step, Step::Finished(PropertyValue::Float(0.0)));
        assert_eq!(inst.state(), EffectState::Completed);
        assert_eq!(inst.elapsed_ms(), 1000);
    }

    #[test]
    fn test_reverse_round_trip_returns_to_start() {
        let d = EffectDescriptor::new(PropertyId::TranslationX, 200.0)
            .curve(Curve::Linear)
            .repeat(1, RepeatMode::Reverse);
        let mut inst = EffectInstance::new(d, STAR).unwrap();
        inst.begin(Some(PropertyValue::Float(0.0)));

        assert!((float(inst.advance(150)) - 100.0).abs() < 1e-4);
        assert!(!inst.is_reversed());

        // Second cycle runs backwards
        assert!((float(inst.advance(225)) - 150.0).abs() < 1e-4);
        assert!(inst.is_reversed());
        assert_eq!(inst.cycle(), 1);

        let last = inst.advance(225);
        assert_eq!(last, Step::Finished(PropertyValue::Float(0.0)));
    }

    #[test]
    fn test_restart_jumps_back_each_cycle() {
        let d = EffectDescriptor::from_to(PropertyId::Alpha, 0.0, 1.0)
            .curve(Curve::Linear)
            .duration_ms(100)
            .repeat(2, RepeatMode::Restart);
        let mut inst = EffectInstance::new(d, STAR).unwrap();

        assert!((float(inst.advance(90)) - 0.9).abs() < 1e-5);
        assert!((float(inst.advance(20)) - 0.1).abs() < 1e-5);
        assert_eq!(inst.cycle(), 1);
        assert!(!inst.is_reversed());

        assert_eq!(inst.advance(500), Step::Finished(PropertyValue::Float(1.0)));
        assert_eq!(inst.elapsed_ms(), 300);
    }

    #[test]
    fn test_overshooting_delta_clamps_to_total() {
        let d = EffectDescriptor::from_to(PropertyId::Alpha, 1.0, 0.0)
            .repeat(2, RepeatMode::Reverse);
        let mut inst = EffectInstance::new(d, STAR).unwrap();

        // Even repeat count with Reverse ends on the end value
        assert_eq!(inst.advance(10_000), Step::Finished(PropertyValue::Float(0.0)));
        assert_eq!(inst.elapsed_ms(), 900);
        assert_eq!(inst.advance(10), Step::Idle);
    }

    #[test]
    fn test_zero_delta_is_idle() {
        let d = EffectDescriptor::new(PropertyId::Alpha, 0.0);
        let mut inst = EffectInstance::new(d, STAR).unwrap();
        assert_eq!(inst.advance(0), Step::Idle);
        assert_eq!(inst.state(), EffectState::Pending);
    }

    #[test]
    fn test_cancel_keeps_last_value() {
        let d = EffectDescriptor::from_to(PropertyId::Alpha, 1.0, 0.0).curve(Curve::Linear);
        let mut inst = EffectInstance::new(d, STAR).unwrap();

        inst.advance(150);
        let before = inst.value();
        assert!(inst.cancel());
        assert!(!inst.cancel());

        assert_eq!(inst.advance(100), Step::Idle);
        assert_eq!(inst.state(), EffectState::Cancelled);
        assert_eq!(inst.value(), before);
    }

    #[test]
    fn test_begin_uses_current_value() {
        let d = EffectDescriptor::new(PropertyId::ScaleX, 4.0).curve(Curve::Linear);
        let mut inst = EffectInstance::new(d, STAR).unwrap();
        inst.begin(Some(PropertyValue::Float(2.0)));

        assert_eq!(inst.origin(), Some(PropertyValue::Float(2.0)));
        assert!((float(inst.advance(150)) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_begin_ignores_mismatched_current_value() {
        let d = EffectDescriptor::new(PropertyId::BackgroundColor, Color::RED);
        let mut inst = EffectInstance::new(d, STAR).unwrap();
        inst.begin(Some(PropertyValue::Float(3.0)));

        assert_eq!(inst.origin(), Some(PropertyValue::Color(Color::BLACK)));
    }

    #[test]
    fn test_explicit_start_wins() {
        let d = EffectDescriptor::from_to(PropertyId::Rotation, -360.0, 0.0);
        let mut inst = EffectInstance::new(d, STAR).unwrap();
        inst.begin(Some(PropertyValue::Float(90.0)));

        assert_eq!(inst.origin(), Some(PropertyValue::Float(-360.0)));
    }

    #[test]
    fn test_linear_is_monotonic() {
        let d = EffectDescriptor::from_to(PropertyId::TranslationY, -10.0, 250.0)
            .curve(Curve::Linear)
            .duration_ms(97);
        let mut inst = EffectInstance::new(d, STAR).unwrap();

        let mut previous = f32::MIN;
        loop {
            let step = inst.advance(3);
            let Some(value) = step.value().and_then(|v| v.as_float()) else {
                break;
            };
            assert!(value >= previous, "{value} < {previous}");
            previous = value;
            if matches!(step, Step::Finished(_)) {
                break;
            }
        }
        assert_eq!(previous, 250.0);
    }
}
