//! Arcade configuration
//!
//! Every tunable lives here with its default. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Fixed-timestep scheduler tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestepConfig {
    /// Simulation rate in steps per second
    pub hz: f64,
    pub max_substeps: u32,
    /// Longest wall-clock frame that is fed to the accumulator (seconds)
    pub max_frame_time: f64,
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            hz: SIM_HZ,
            max_substeps: MAX_SUBSTEPS,
            max_frame_time: MAX_FRAME_TIME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            half_width: WORLD_HALF_WIDTH,
            half_height: WORLD_HALF_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frames_per_second: f32,
    /// Columns and rows of square sprite sheets
    pub atlas_dim: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames_per_second: ANIMATION_FPS,
            atlas_dim: SPRITE_ATLAS_DIM,
        }
    }
}

/// Bitmap font sheet layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub cols: u32,
    pub rows: u32,
    /// Subtracted from a character code to get its cell in the sheet
    pub ascii_offset: i32,
    pub size: f32,
    pub spacing: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            cols: FONT_ATLAS_COLS,
            rows: FONT_ATLAS_ROWS,
            ascii_offset: FONT_ASCII_OFFSET,
            size: 0.25,
            spacing: 0.005,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    /// Paddles sit at -x and +x
    pub paddle_x: f32,
    pub paddle_size: Vec2,
    pub paddle_speed: f32,
    pub ball_size: f32,
    /// Launch velocity of ball 0; odd balls are mirrored in x
    pub ball_velocity: Vec2,
    /// Pool size, also the largest selectable ball count
    pub max_balls: u8,
    pub initial_balls: u8,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            paddle_x: 4.5,
            paddle_size: Vec2::new(0.5, 1.5),
            paddle_speed: 2.0,
            ball_size: 0.5,
            ball_velocity: Vec2::new(1.0, 0.5),
            max_balls: 3,
            initial_balls: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    pub rocket_start: Vec2,
    pub rocket_size: f32,
    /// Decoration only, the rocket passes in front of it
    pub mountain_pos: Vec2,
    pub mountain_size: Vec2,
    pub platform_pos: Vec2,
    pub platform_size: Vec2,
    pub side_thrust: f32,
    pub up_thrust: f32,
    pub gravity: f32,
    pub initial_fuel: f32,
    /// Fuel per second per firing thruster
    pub burn_rate: f32,
    /// Half-size of the box around the platform center where landing is judged
    pub landing_window: f32,
    /// Touchdown vertical speed above which the rocket is destroyed
    pub crash_speed: f32,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            rocket_start: Vec2::new(0.0, 3.0),
            rocket_size: 0.5,
            mountain_pos: Vec2::new(0.0, -3.0),
            mountain_size: Vec2::new(2.0, 1.5),
            platform_pos: Vec2::new(0.0, -2.5),
            platform_size: Vec2::new(1.0, 0.2),
            side_thrust: 0.1,
            up_thrust: 0.2,
            gravity: 0.001,
            initial_fuel: 1000.0,
            burn_rate: 10.0,
            landing_window: 0.5,
            crash_speed: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShooterConfig {
    pub player_start: Vec2,
    pub player_speed: f32,
    pub sprite_size: f32,
    pub patrol_start: Vec2,
    pub patrol_speed: f32,
    /// Seconds per leg of the square patrol
    pub patrol_interval: f32,
    pub sentry_start: Vec2,
    pub sentry_speed: f32,
    pub sentry_chase_threshold: f32,
    /// Extra distance before a sentry gives up a chase
    pub sentry_release_margin: f32,
    pub hunter_start: Vec2,
    pub hunter_speed: f32,
    pub bullet_size: f32,
    pub bullet_speed: f32,
    /// Spawn point relative to the player
    pub bullet_offset: Vec2,
    pub bullet_direction: Vec2,
    pub bullet_pool: usize,
    /// Minimum seconds between shots
    pub fire_cooldown: f32,
    /// Distance that counts as a hit, for bullets and for catching the player
    pub hit_radius: f32,
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self {
            player_start: Vec2::ZERO,
            player_speed: 1.25,
            sprite_size: 1.0,
            patrol_start: Vec2::new(-4.0, -3.0),
            patrol_speed: 1.0,
            patrol_interval: 1.0,
            sentry_start: Vec2::new(-4.5, 3.0),
            sentry_speed: 1.0,
            sentry_chase_threshold: 1.5,
            sentry_release_margin: 0.0,
            hunter_start: Vec2::new(4.0, 3.0),
            hunter_speed: 1.5,
            bullet_size: 0.2,
            bullet_speed: 2.0,
            bullet_offset: Vec2::new(-1.0, 0.0),
            bullet_direction: Vec2::new(-1.0, 0.0),
            bullet_pool: 16,
            fire_cooldown: 0.25,
            hit_radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub rose_start: Vec2,
    pub rose_speed: f32,
    /// Seconds per leg of the rose's square path
    pub rose_leg_time: f32,
    /// Spin about the vertical axis (radians per second)
    pub spin_rate: f32,
    pub grow_factor: f32,
    pub shrink_factor: f32,
    /// Steps between switching from growing to shrinking
    pub pulse_steps: u32,
    pub butterfly_start: Vec2,
    pub butterfly_speed: f32,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            rose_start: Vec2::new(-2.0, -2.5),
            rose_speed: 1.0,
            rose_leg_time: 5.0,
            spin_rate: 1.0,
            grow_factor: 1.01,
            shrink_factor: 0.99,
            pulse_steps: 40,
            butterfly_start: Vec2::new(3.0, 3.0),
            butterfly_speed: 1.0,
        }
    }
}

/// Complete arcade configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub timestep: TimestepConfig,
    pub world: WorldConfig,
    pub animation: AnimationConfig,
    pub font: FontConfig,
    pub pong: PongConfig,
    pub lander: LanderConfig,
    pub shooter: ShooterConfig,
    pub showcase: ShowcaseConfig,
}

impl ArcadeConfig {
    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ts = &self.timestep;
        if !(ts.hz.is_finite() && ts.hz > 0.0) {
            return Err(ConfigError::invalid("timestep.hz", format!("{} is not a positive rate", ts.hz)));
        }
        if ts.max_substeps == 0 {
            return Err(ConfigError::invalid("timestep.max_substeps", "must be at least 1"));
        }
        if ts.max_frame_time <= 0.0 {
            return Err(ConfigError::invalid("timestep.max_frame_time", "must be positive"));
        }

        positive("world.half_width", self.world.half_width)?;
        positive("world.half_height", self.world.half_height)?;
        if self.animation.frames_per_second < 0.0 {
            return Err(ConfigError::invalid("animation.frames_per_second", "must not be negative"));
        }
        if self.animation.atlas_dim == 0 {
            return Err(ConfigError::invalid("animation.atlas_dim", "must be at least 1"));
        }
        if self.font.cols == 0 || self.font.rows == 0 {
            return Err(ConfigError::invalid("font", "atlas needs at least one row and column"));
        }

        let pong = &self.pong;
        positive("pong.paddle_speed", pong.paddle_speed)?;
        positive("pong.ball_size", pong.ball_size)?;
        positive_extent("pong.paddle_size", pong.paddle_size)?;
        if pong.max_balls == 0 {
            return Err(ConfigError::invalid("pong.max_balls", "must be at least 1"));
        }
        if pong.initial_balls == 0 || pong.initial_balls > pong.max_balls {
            return Err(ConfigError::invalid(
                "pong.initial_balls",
                format!("must be between 1 and {}", pong.max_balls),
            ));
        }

        let lander = &self.lander;
        positive("lander.rocket_size", lander.rocket_size)?;
        positive_extent("lander.platform_size", lander.platform_size)?;
        if lander.initial_fuel < 0.0 || lander.burn_rate < 0.0 {
            return Err(ConfigError::invalid("lander.fuel", "fuel and burn rate must not be negative"));
        }

        let shooter = &self.shooter;
        positive("shooter.player_speed", shooter.player_speed)?;
        positive("shooter.sprite_size", shooter.sprite_size)?;
        positive("shooter.bullet_speed", shooter.bullet_speed)?;
        positive("shooter.bullet_size", shooter.bullet_size)?;
        positive("shooter.patrol_interval", shooter.patrol_interval)?;
        if shooter.bullet_pool == 0 {
            return Err(ConfigError::invalid("shooter.bullet_pool", "must be at least 1"));
        }

        positive("showcase.rose_leg_time", self.showcase.rose_leg_time)?;
        if self.showcase.pulse_steps == 0 {
            return Err(ConfigError::invalid("showcase.pulse_steps", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{} is not positive", value)))
    }
}

fn positive_extent(field: &'static str, value: Vec2) -> Result<(), ConfigError> {
    positive(field, value.x)?;
    positive(field, value.y)
}
