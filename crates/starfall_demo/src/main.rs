//! Starfall demo
//!
//! Plays the star effects on a headless stage and reports where everything
//! ended up.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use starfall_core::{PropertyHost, PropertyId};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod config;
mod stage;

use app::StarfallApp;
use config::StarfallConfig;
use stage::Trigger;

#[derive(Parser)]
#[command(name = "starfall")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play property effects on a headless star stage", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./starfall.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin the star a full turn
    Rotate,

    /// Slide the star right and back
    Translate,

    /// Grow the star and shrink it back
    Scale,

    /// Fade the star out and back in
    Fade,

    /// Flash the background red
    Colorize,

    /// Drop falling stars
    Shower {
        /// Number of stars (overrides the config file)
        #[arg(short, long)]
        count: Option<u32>,
    },

    /// Press every trigger at once
    All,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = StarfallConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let triggers: Vec<Trigger> = match cli.command {
        Commands::Rotate => vec![Trigger::Rotate],
        Commands::Translate => vec![Trigger::Translate],
        Commands::Scale => vec![Trigger::Scale],
        Commands::Fade => vec![Trigger::Fade],
        Commands::Colorize => vec![Trigger::Colorize],
        Commands::Shower { count } => {
            let count = count.unwrap_or(config.playback.showers);
            vec![Trigger::Shower; count as usize]
        }
        Commands::All => Trigger::ALL
            .into_iter()
            .chain(std::iter::repeat(Trigger::Shower).take(config.playback.showers as usize))
            .collect(),
        Commands::Config => return cmd_config(&config),
    };

    cmd_play(&config, &triggers)
}

fn cmd_play(config: &StarfallConfig, triggers: &[Trigger]) -> Result<()> {
    let mut app = StarfallApp::new(config);

    for &trigger in triggers {
        app.press(trigger)
            .with_context(|| format!("Failed to start {trigger:?}"))?;
    }

    app.run_until_idle(config.playback.max_frames);
    info!(
        "Played {} frame(s) ({}ms)",
        app.frames(),
        app.frames() * config.playback.frame_ms
    );

    report(&app);
    Ok(())
}

fn cmd_config(config: &StarfallConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

fn report(app: &StarfallApp) {
    let stage = app.stage();
    let star = stage.star();

    for property in [
        PropertyId::Rotation,
        PropertyId::TranslationX,
        PropertyId::ScaleX,
        PropertyId::ScaleY,
        PropertyId::Alpha,
    ] {
        info!("star {}: {:.2}", property, stage.float(star, &property));
    }

    if let Some(background) = stage.read(stage.container(), &PropertyId::BackgroundColor) {
        info!("container backgroundColor: {}", background);
    }

    info!(
        "{} star(s) on stage, {} effect(s) still playing",
        stage.children().len(),
        app.scheduler().active_count()
    );
}
