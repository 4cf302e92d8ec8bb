//! Starfall configuration file handling
//!
//! `starfall.toml` sizes the stage and controls playback. Every field has a
//! default, so an empty or missing file is valid.
//!
//! ```toml
//! [stage]
//! width = 1080.0
//! height = 1920.0
//!
//! [playback]
//! frame_ms = 16
//! seed = 42
//! showers = 8
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE: &str = "starfall.toml";

/// Top-level configuration stored in starfall.toml
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StarfallConfig {
    #[serde(default)]
    pub stage: StageConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Stage geometry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StageConfig {
    /// Container width
    #[serde(default = "default_width")]
    pub width: f32,
    /// Container height
    #[serde(default = "default_height")]
    pub height: f32,
    /// Unscaled star width
    #[serde(default = "default_star_size")]
    pub star_width: f32,
    /// Unscaled star height
    #[serde(default = "default_star_size")]
    pub star_height: f32,
}

fn default_width() -> f32 {
    1080.0
}

fn default_height() -> f32 {
    1920.0
}

fn default_star_size() -> f32 {
    160.0
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            star_width: default_star_size(),
            star_height: default_star_size(),
        }
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Simulated frame time in milliseconds
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Upper bound on frames before playback stops
    #[serde(default = "default_max_frames")]
    pub max_frames: u32,
    /// Seed for shower randomness; entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
    /// Stars dropped by the shower command
    #[serde(default = "default_showers")]
    pub showers: u32,
}

fn default_frame_ms() -> u64 {
    16
}

fn default_max_frames() -> u32 {
    600
}

fn default_showers() -> u32 {
    5
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frame_ms: default_frame_ms(),
            max_frames: default_max_frames(),
            seed: None,
            showers: default_showers(),
        }
    }
}

impl StarfallConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// Load from `path` if given, else `./starfall.toml` if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let local = Path::new(CONFIG_FILE);
                if local.exists() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: StarfallConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let stage = &self.stage;
        if !(stage.width > 0.0 && stage.height > 0.0) {
            anyhow::bail!(
                "Stage size must be positive, got {}x{}",
                stage.width,
                stage.height
            );
        }
        if !(stage.star_width > 0.0 && stage.star_height > 0.0) {
            anyhow::bail!(
                "Star size must be positive, got {}x{}",
                stage.star_width,
                stage.star_height
            );
        }
        if self.playback.frame_ms == 0 {
            anyhow::bail!("Frame time must be at least 1ms");
        }
        Ok(())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
