//! Trigger wiring and the frame loop
//!
//! Each trigger starts one effect. Preset triggers disable themselves from
//! the press until their effect ends; the shower trigger stays enabled and
//! drops a new star on every press, removing it once it has fallen out of
//! the container.

use crate::config::StarfallConfig;
use crate::stage::{Stage, Trigger};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use starfall_animation::{
    shower, EffectHandle, EffectHooks, EffectPreset, EffectScheduler, Result, ShowerParams,
};
use starfall_core::{EntityId, PropertyHost, PropertyId, PropertyValue};

/// The star stage plus the scheduler animating it
pub struct StarfallApp {
    stage: Stage,
    scheduler: EffectScheduler<Stage>,
    rng: StdRng,
    frame_ms: u64,
    frames: u64,
}

impl StarfallApp {
    pub fn new(config: &StarfallConfig) -> Self {
        let rng = match config.playback.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            stage: Stage::new(config.stage.clone()),
            scheduler: EffectScheduler::new(),
            rng,
            frame_ms: config.playback.frame_ms,
            frames: 0,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn scheduler(&self) -> &EffectScheduler<Stage> {
        &self.scheduler
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Press a trigger
    ///
    /// Returns `Ok(None)` when the trigger is disabled and the press is
    /// ignored.
    pub fn press(&mut self, trigger: Trigger) -> Result<Option<EffectHandle>> {
        if !self.stage.is_enabled(trigger) {
            tracing::warn!("{:?} is disabled while its effect plays; ignoring", trigger);
            return Ok(None);
        }

        let handle = match trigger {
            Trigger::Rotate => self.play(EffectPreset::Rotate, trigger)?,
            Trigger::Translate => self.play(EffectPreset::Translate, trigger)?,
            Trigger::Scale => self.play(EffectPreset::Scale, trigger)?,
            Trigger::Fade => self.play(EffectPreset::Fade, trigger)?,
            Trigger::Colorize => self.play(EffectPreset::Colorize, trigger)?,
            Trigger::Shower => self.drop_star()?,
        };
        Ok(Some(handle))
    }

    /// Start a preset, disabling `trigger` for its duration
    fn play(&mut self, preset: EffectPreset, trigger: Trigger) -> Result<EffectHandle> {
        let target = if preset.targets_container() {
            self.stage.container()
        } else {
            self.stage.star()
        };

        let hooks =
            EffectHooks::new().on_end(move |_, stage: &mut Stage| stage.set_enabled(trigger, true));

        let handle = self.scheduler.start(preset.effect(), target, hooks)?;
        // Disabled from the press itself, so a second press before the next
        // frame cannot schedule a duplicate
        self.stage.set_enabled(trigger, false);
        tracing::info!("{} started on {}", preset.name(), target);
        Ok(handle)
    }

    /// Spawn a randomly sized star above the container and let it fall
    fn drop_star(&mut self) -> Result<EffectHandle> {
        let (width, height) = self.stage.size();
        let (star_width, star_height) = self.stage.star_size();

        let samples = [
            self.rng.gen::<f32>(),
            self.rng.gen::<f32>(),
            self.rng.gen::<f32>(),
            self.rng.gen::<f32>(),
        ];
        let params = ShowerParams::from_unit_samples(samples, width, star_width);

        let star = self.stage.spawn_star();
        place_star(&mut self.stage, star, &params);

        let hooks =
            EffectHooks::new().on_end(move |_, stage: &mut Stage| {
                stage.remove(star);
            });

        match self
            .scheduler
            .start(shower(&params, height, star_height), star, hooks)
        {
            Ok(handle) => {
                tracing::info!(
                    "shower: star {} scale {:.2} x {:.0} falling for {}ms",
                    star,
                    params.scale,
                    params.x,
                    params.duration_ms
                );
                Ok(handle)
            }
            Err(err) => {
                self.stage.remove(star);
                Err(err)
            }
        }
    }

    /// Advance one frame; returns true while effects are still playing
    pub fn frame(&mut self) -> bool {
        self.frames += 1;
        self.scheduler.tick(self.frame_ms, &mut self.stage)
    }

    /// Run frames until nothing is playing or `max_frames` is reached
    ///
    /// Returns the number of frames run.
    pub fn run_until_idle(&mut self, max_frames: u32) -> u32 {
        let mut ran = 0;
        while ran < max_frames && self.scheduler.has_active_effects() {
            self.frame();
            ran += 1;
        }
        if self.scheduler.has_active_effects() {
            tracing::warn!(
                "Stopped after {} frames with {} effect(s) still playing",
                ran,
                self.scheduler.active_count()
            );
        }
        ran
    }
}

/// Size and position a freshly spawned star before it starts falling
fn place_star(stage: &mut Stage, star: EntityId, params: &ShowerParams) {
    stage.write(star, &PropertyId::ScaleX, PropertyValue::Float(params.scale));
    stage.write(star, &PropertyId::ScaleY, PropertyValue::Float(params.scale));
    stage.write(star, &PropertyId::TranslationX, PropertyValue::Float(params.x));
}
