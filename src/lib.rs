//! Quad Arcade - small sprite games over one fixed-timestep core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, steering, animation)
//! - `games`: Pong, Lunar Lander, Butterfly & Skulls and the Showcase scene
//! - `session`: Main-loop context owning the scene, scheduler and input
//! - `input`: Key state and per-tick input commands
//! - `autopilot`: Seeded input and frame-time generator for headless runs
//! - `render`: Quad and atlas vertex data handed to an external backend
//! - `assets`: Texture manifests and the loader seam
//! - `settings`: Data-driven tuning

pub mod assets;
pub mod autopilot;
pub mod games;
pub mod input;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use games::GameKind;
pub use session::Session;
pub use settings::{ArcadeConfig, ConfigError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (steps per second)
    pub const SIM_HZ: f64 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (debugger pauses, window drags)
    pub const MAX_FRAME_TIME: f64 = 0.25;

    /// Visible world, matches the orthographic projection (-5..5, -3.75..3.75)
    pub const WORLD_HALF_WIDTH: f32 = 5.0;
    pub const WORLD_HALF_HEIGHT: f32 = 3.75;

    /// Sprite animation cadence
    pub const ANIMATION_FPS: f32 = 4.0;
    /// Sprite sheets are square grids of this many cells per side
    pub const SPRITE_ATLAS_DIM: u32 = 4;

    /// Font sheet layout (16 x 7 glyph grid)
    pub const FONT_ATLAS_COLS: u32 = 16;
    pub const FONT_ATLAS_ROWS: u32 = 7;
    /// Character code minus this gives the glyph cell in the bundled font sheet
    pub const FONT_ASCII_OFFSET: i32 = 18;
}
