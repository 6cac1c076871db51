//! Quad Arcade headless runner
//!
//! Plays one of the games with the seeded autopilot against a simulated
//! clock, logging the HUD as it goes. A windowed host would drive `Session`
//! the same way with real events and real time.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;

use quad_arcade::assets::{FsTextureLoader, TextureCatalog};
use quad_arcade::autopilot::Autopilot;
use quad_arcade::{ArcadeConfig, GameKind, Session};

/// Simulated milliseconds between HUD log lines
const HUD_LOG_INTERVAL_MS: u64 = 1000;

#[derive(Parser, Debug)]
#[command(name = "quad-arcade")]
#[command(about = "Play one of the arcade games headless with a seeded autopilot")]
struct Cli {
    /// Game to run: pong, lander, shooter or showcase
    game: GameKind,

    /// Simulated seconds to play before stopping
    #[arg(long, default_value_t = 30.0)]
    seconds: f64,

    /// Autopilot seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// JSON config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the game's textures; every one must load
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Write the final scene as JSON to this file
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ensure!(
        cli.seconds.is_finite() && cli.seconds > 0.0,
        "--seconds must be positive, got {}",
        cli.seconds
    );

    let config = match &cli.config {
        Some(path) => ArcadeConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => {
            log::info!("Using default config");
            ArcadeConfig::default()
        }
    };

    if let Some(dir) = &cli.assets {
        let mut loader = FsTextureLoader::new(dir);
        if let Err(err) = TextureCatalog::load_all(&mut loader, cli.game.textures()) {
            log::error!("Asset loading failed in {}: {err}", dir.display());
            return Err(err).context("loading textures");
        }
    }

    log::info!(
        "{} (seed {}, {} simulated seconds)",
        cli.game.title(),
        cli.seed,
        cli.seconds
    );

    let mut session = Session::new(cli.game, &config);
    let mut pilot = Autopilot::new(cli.game, cli.seed);

    let end_ms = (cli.seconds * 1000.0) as u64;
    let mut now_ms = 0u64;
    let mut next_hud_ms = HUD_LOG_INTERVAL_MS;
    let mut frames = 0u64;
    let mut steps = 0u64;
    session.frame(0.0);

    while session.is_running() && now_ms < end_ms {
        for event in pilot.events() {
            session.handle_event(event);
        }
        now_ms += pilot.frame_time_ms();
        steps += u64::from(session.frame(now_ms as f64 / 1000.0));
        frames += 1;

        let commands = session.draw_list();
        if now_ms >= next_hud_ms {
            next_hud_ms += HUD_LOG_INTERVAL_MS;
            let hud: Vec<String> = session.hud().into_iter().map(|line| line.text).collect();
            log::debug!("t={:.1}s draws={} hud={:?}", now_ms as f64 / 1000.0, commands.len(), hud);
        }

        if let Some(outcome) = session.outcome() {
            log::info!("{} at t={:.2}s", outcome.message(), now_ms as f64 / 1000.0);
            break;
        }
    }

    log::info!("Ran {} frames, {} simulation steps", frames, steps);
    match session.outcome() {
        Some(outcome) => println!("{}: {}", cli.game, outcome.message()),
        None => println!("{}: no result after {:.1}s", cli.game, now_ms as f64 / 1000.0),
    }

    if let Some(path) = &cli.snapshot {
        let json = session.snapshot().context("serializing scene")?;
        std::fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))?;
        log::info!("Scene written to {}", path.display());
    }
    Ok(())
}
