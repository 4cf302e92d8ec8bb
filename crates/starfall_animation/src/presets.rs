//! Effect presets
//!
//! Ready-made effects for the star demo: rotate, translate, scale, fade,
//! colorize, and the falling-star shower.

use crate::curve::Curve;
use crate::descriptor::{EffectDescriptor, RepeatMode};
use crate::group::{Effect, EffectGroup};
use starfall_core::{Color, PropertyId};

/// The five single-trigger effects
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectPreset {
    /// Full turn from -360° to 0° over one second
    Rotate,
    /// Slide 200 units right and back
    Translate,
    /// Grow to 4x and back
    Scale,
    /// Fade out and back in
    Fade,
    /// Container background black to red and back
    Colorize,
}

impl EffectPreset {
    pub const ALL: [EffectPreset; 5] = [
        Self::Rotate,
        Self::Translate,
        Self::Scale,
        Self::Fade,
        Self::Colorize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::Translate => "translate",
            Self::Scale => "scale",
            Self::Fade => "fade",
            Self::Colorize => "colorize",
        }
    }

    /// Colorize animates the star's container rather than the star
    pub fn targets_container(&self) -> bool {
        matches!(self, Self::Colorize)
    }

    pub fn effect(&self) -> Effect {
        match self {
            Self::Rotate => EffectDescriptor::from_to(PropertyId::Rotation, -360.0, 0.0)
                .duration_ms(1000)
                .into(),
            Self::Translate => round_trip(PropertyId::TranslationX, 200.0).into(),
            Self::Scale => EffectGroup::new()
                .with(round_trip(PropertyId::ScaleX, 4.0))
                .with(round_trip(PropertyId::ScaleY, 4.0))
                .into(),
            Self::Fade => round_trip(PropertyId::Alpha, 0.0).into(),
            Self::Colorize => {
                EffectDescriptor::from_to(PropertyId::BackgroundColor, Color::BLACK, Color::RED)
                    .duration_ms(500)
                    .repeat(1, RepeatMode::Reverse)
                    .into()
            }
        }
    }
}

/// Play to `end` and back to wherever the property started
fn round_trip(property: PropertyId, end: f32) -> EffectDescriptor {
    EffectDescriptor::new(property, end).repeat(1, RepeatMode::Reverse)
}

/// Randomized parameters for one falling star
///
/// The engine stays deterministic; callers draw the randomness and pass it in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShowerParams {
    /// Size factor applied to both axes
    pub scale: f32,
    /// Horizontal translation of the star
    pub x: f32,
    pub duration_ms: u32,
    /// Total spin over the fall, in degrees
    pub spin_degrees: f32,
}

impl ShowerParams {
    pub const MIN_SCALE: f32 = 0.1;
    pub const MAX_SCALE: f32 = 1.6;
    pub const MIN_DURATION_MS: u32 = 500;
    pub const MAX_DURATION_MS: u32 = 2000;
    pub const MAX_SPIN_DEGREES: f32 = 1080.0;

    /// Map four uniform samples in `[0, 1)` onto shower ranges
    ///
    /// `samples` are, in order: size, horizontal position, duration, spin.
    /// The star may start up to half its scaled width off either edge.
    pub fn from_unit_samples(samples: [f32; 4], container_width: f32, star_width: f32) -> Self {
        let [size, position, duration, spin] = samples.map(|s| s.clamp(0.0, 1.0));

        let scale = Self::MIN_SCALE + size * (Self::MAX_SCALE - Self::MIN_SCALE);
        let scaled_width = star_width * scale;
        let span_ms = (Self::MAX_DURATION_MS - Self::MIN_DURATION_MS) as f32;

        Self {
            scale,
            x: position * container_width - scaled_width / 2.0,
            duration_ms: Self::MIN_DURATION_MS + (duration * span_ms) as u32,
            spin_degrees: spin * Self::MAX_SPIN_DEGREES,
        }
    }

    /// Star size after scaling
    pub fn scaled_size(&self, star_width: f32, star_height: f32) -> (f32, f32) {
        (star_width * self.scale, star_height * self.scale)
    }
}

/// Fall from just above the container to just below it while spinning
///
/// The fall accelerates like gravity; the spin runs at a constant rate.
/// Both members share the shower's duration.
pub fn shower(params: &ShowerParams, container_height: f32, star_height: f32) -> EffectGroup {
    let star_height = star_height * params.scale;

    EffectGroup::new()
        .with(
            EffectDescriptor::from_to(
                PropertyId::TranslationY,
                -star_height,
                container_height + star_height,
            )
            .curve(Curve::accelerate()),
        )
        .with(
            EffectDescriptor::from_to(PropertyId::Rotation, 0.0, params.spin_degrees)
                .curve(Curve::Linear),
        )
        .with_duration(params.duration_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_validate() {
        for preset in EffectPreset::ALL {
            assert!(preset.effect().validate().is_ok(), "{}", preset.name());
        }
    }

    #[test]
    fn test_round_trips_take_two_cycles() {
        assert_eq!(EffectPreset::Translate.effect().total_duration_ms(), 600);
        assert_eq!(EffectPreset::Colorize.effect().total_duration_ms(), 1000);
        assert_eq!(EffectPreset::Rotate.effect().total_duration_ms(), 1000);
    }

    #[test]
    fn test_only_colorize_targets_container() {
        let container: Vec<_> = EffectPreset::ALL
            .into_iter()
            .filter(EffectPreset::targets_container)
            .collect();
        assert_eq!(container, vec![EffectPreset::Colorize]);
    }

    #[test]
    fn test_shower_param_ranges() {
        let low = ShowerParams::from_unit_samples([0.0; 4], 400.0, 100.0);
        assert!((low.scale - 0.1).abs() < 1e-6);
        assert!((low.x + 5.0).abs() < 1e-4);
        assert_eq!(low.duration_ms, 500);
        assert_eq!(low.spin_degrees, 0.0);

        let high = ShowerParams::from_unit_samples([1.0; 4], 400.0, 100.0);
        assert!((high.scale - 1.6).abs() < 1e-6);
        assert!((high.x - 320.0).abs() < 1e-3);
        assert_eq!(high.duration_ms, 2000);
        assert!((high.spin_degrees - 1080.0).abs() < 1e-3);
    }

    #[test]
    fn test_shower_group_shape() {
        let params = ShowerParams {
            scale: 0.5,
            x: 10.0,
            duration_ms: 1200,
            spin_degrees: 720.0,
        };
        let group = shower(&params, 800.0, 80.0);

        assert_eq!(group.len(), 2);
        assert_eq!(group.total_duration_ms(), 1200);

        let fall = &group.members()[0];
        assert_eq!(fall.property(), &PropertyId::TranslationY);
        assert_eq!(fall.start_value().and_then(|v| v.as_float()), Some(-40.0));
        assert_eq!(fall.end_value().as_float(), Some(840.0));

        let spin = &group.members()[1];
        assert_eq!(spin.property(), &PropertyId::Rotation);
        assert_eq!(spin.end_value().as_float(), Some(720.0));
    }
}
