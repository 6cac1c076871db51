//! Game rule sets built on the shared simulation core
//!
//! Each game is a thin configuration: it spawns its entities into a `Scene`,
//! turns `TickInput` into intents and accelerations before every step, and
//! checks its win/lose rules after every step. Movement, collision, steering
//! and animation are all handled by `sim`.

pub mod lander;
pub mod pong;
pub mod shooter;
pub mod showcase;

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::TextureKey;
use crate::input::TickInput;
use crate::settings::ArcadeConfig;
use crate::sim::{Outcome, Scene};

pub use lander::Lander;
pub use pong::Pong;
pub use shooter::Shooter;
pub use showcase::Showcase;

/// Which game a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Pong,
    Lander,
    Shooter,
    Showcase,
}

impl GameKind {
    pub const ALL: [GameKind; 4] = [GameKind::Pong, GameKind::Lander, GameKind::Shooter, GameKind::Showcase];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Pong => "pong",
            GameKind::Lander => "lander",
            GameKind::Shooter => "shooter",
            GameKind::Showcase => "showcase",
        }
    }

    /// Window title
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Pong => "Pong",
            GameKind::Lander => "Lunar Lander",
            GameKind::Shooter => "Butterfly & Skulls",
            GameKind::Showcase => "Rose Garden",
        }
    }

    /// Every texture the game needs, loaded before the first frame
    pub fn textures(&self) -> &'static [TextureKey] {
        match self {
            GameKind::Pong => &[TextureKey::Paddle, TextureKey::Ball, TextureKey::PongFont],
            GameKind::Lander => &[
                TextureKey::Rocket,
                TextureKey::Mountain,
                TextureKey::Platform,
                TextureKey::Fire,
                TextureKey::Explosion,
                TextureKey::PixelFont,
            ],
            GameKind::Shooter => &[
                TextureKey::ButterflySheet,
                TextureKey::Skull,
                TextureKey::Platform,
                TextureKey::PixelFont,
            ],
            GameKind::Showcase => &[TextureKey::Butterfly, TextureKey::Rose],
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown game '{0}' (expected pong, lander, shooter or showcase)")]
pub struct UnknownGame(pub String);

impl FromStr for GameKind {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pong" => Ok(GameKind::Pong),
            "lander" | "lunar" => Ok(GameKind::Lander),
            "shooter" | "skulls" => Ok(GameKind::Shooter),
            "showcase" | "rose" => Ok(GameKind::Showcase),
            _ => Err(UnknownGame(s.to_string())),
        }
    }
}

/// One line of bitmap text to draw this frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub text: String,
    /// Center of the first glyph, world units
    pub origin: Vec2,
    pub size: f32,
    pub spacing: f32,
    pub font: TextureKey,
}

impl HudLine {
    pub fn new(text: impl Into<String>, origin: Vec2, size: f32, spacing: f32, font: TextureKey) -> Self {
        Self {
            text: text.into(),
            origin,
            size,
            spacing,
            font,
        }
    }
}

/// Running game rules
#[derive(Debug, Clone)]
pub enum Game {
    Pong(Pong),
    Lander(Lander),
    Shooter(Shooter),
    Showcase(Showcase),
}

impl Game {
    /// Spawn the game's entities into an empty scene
    pub fn setup(kind: GameKind, scene: &mut Scene, config: &ArcadeConfig) -> Self {
        match kind {
            GameKind::Pong => Game::Pong(Pong::setup(scene, config)),
            GameKind::Lander => Game::Lander(Lander::setup(scene, config)),
            GameKind::Shooter => Game::Shooter(Shooter::setup(scene, config)),
            GameKind::Showcase => Game::Showcase(Showcase::setup(scene, config)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Game::Pong(_) => GameKind::Pong,
            Game::Lander(_) => GameKind::Lander,
            Game::Shooter(_) => GameKind::Shooter,
            Game::Showcase(_) => GameKind::Showcase,
        }
    }

    /// Translate input into intents before the core step
    pub fn apply_input(&mut self, scene: &mut Scene, input: &TickInput, dt: f32) {
        match self {
            Game::Pong(game) => game.apply_input(scene, input),
            Game::Lander(game) => game.apply_input(scene, input, dt),
            Game::Shooter(game) => game.apply_input(scene, input, dt),
            Game::Showcase(_) => {}
        }
    }

    /// Game rules after the core step
    pub fn after_step(&mut self, scene: &mut Scene, dt: f32) {
        match self {
            Game::Pong(game) => game.after_step(scene),
            Game::Lander(game) => game.after_step(scene),
            Game::Shooter(game) => game.after_step(scene),
            Game::Showcase(game) => game.after_step(scene, dt),
        }
    }

    /// Final result, once the game is over
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Game::Pong(game) => game.outcome(),
            Game::Lander(game) => game.outcome(),
            Game::Shooter(game) => game.outcome(),
            Game::Showcase(_) => None,
        }
    }

    /// Text overlays for this frame
    pub fn hud(&self) -> Vec<HudLine> {
        match self {
            Game::Pong(game) => game.hud(),
            Game::Lander(game) => game.hud(),
            Game::Shooter(game) => game.hud(),
            Game::Showcase(_) => Vec::new(),
        }
    }
}
