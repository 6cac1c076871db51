//! Lunar Lander
//!
//! Arrow keys fire the rocket's thrusters while fuel lasts. Gravity pulls the
//! rocket down; a gentle touchdown on the platform wins, a fast one (or
//! reaching the ground anywhere else) loses.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::HudLine;
use crate::assets::TextureKey;
use crate::input::TickInput;
use crate::settings::{ArcadeConfig, LanderConfig};
use crate::sim::{BoundPolicy, Entity, EntityId, EntityKind, Outcome, Scene};

/// Readouts shown on the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub altitude: f32,
    pub fuel: f32,
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
}

#[derive(Debug, Clone)]
pub struct Lander {
    rocket: EntityId,
    platform: EntityId,
    mountain: EntityId,
    fuel: f32,
    telemetry: Telemetry,
    /// Vertical speed before the step's collision response, i.e. impact speed
    approach_speed: f32,
    cfg: LanderConfig,
    outcome: Option<Outcome>,
}

impl Lander {
    pub fn setup(scene: &mut Scene, config: &ArcadeConfig) -> Self {
        let cfg = config.lander.clone();

        // Drawn first so it sits behind everything
        let mountain = scene.spawn(
            Entity::new(EntityKind::Static, cfg.mountain_pos, cfg.mountain_size)
                .with_texture(TextureKey::Mountain)
                .passable(),
        );

        let platform = scene.spawn(
            Entity::new(EntityKind::Static, cfg.platform_pos, cfg.platform_size).with_texture(TextureKey::Platform),
        );
        let rocket = scene.spawn(
            Entity::new(EntityKind::Rocket, cfg.rocket_start, Vec2::splat(cfg.rocket_size))
                .with_accel(Vec2::new(0.0, -cfg.gravity))
                .with_bounds(BoundPolicy::Clamp)
                .with_texture(TextureKey::Rocket),
        );

        let fuel = cfg.initial_fuel;
        Self {
            rocket,
            platform,
            mountain,
            fuel,
            telemetry: Telemetry {
                altitude: cfg.rocket_start.y,
                fuel,
                ..Default::default()
            },
            approach_speed: 0.0,
            cfg,
            outcome: None,
        }
    }

    pub fn rocket(&self) -> EntityId {
        self.rocket
    }

    pub fn platform(&self) -> EntityId {
        self.platform
    }

    pub fn mountain(&self) -> EntityId {
        self.mountain
    }

    #[inline]
    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Fire thrusters for held keys. Each firing thruster burns fuel for this
    /// step; a thruster only fires while fuel is left.
    pub fn apply_input(&mut self, scene: &mut Scene, input: &TickInput, dt: f32) {
        if self.outcome.is_some() {
            return;
        }

        let burn = self.cfg.burn_rate * dt;
        let mut thrust = Vec2::ZERO;
        if input.primary.x < 0.0 && self.fuel > 0.0 {
            thrust.x = -self.cfg.side_thrust;
            self.fuel -= burn;
        }
        if input.primary.x > 0.0 && self.fuel > 0.0 {
            thrust.x = self.cfg.side_thrust;
            self.fuel -= burn;
        }
        if input.primary.y > 0.0 && self.fuel > 0.0 {
            thrust.y = self.cfg.up_thrust;
            self.fuel -= burn;
        }
        if self.fuel < 0.0 {
            log::info!("Out of fuel");
            self.fuel = 0.0;
        }

        if let Some(rocket) = scene.get_mut(self.rocket) {
            rocket.accel = thrust + Vec2::new(0.0, -self.cfg.gravity);
            rocket.texture = if thrust == Vec2::ZERO {
                TextureKey::Rocket
            } else {
                TextureKey::Fire
            };
            // Integrated motion: the velocity this step will carry into contact
            self.approach_speed = rocket.vel.y + rocket.accel.y * dt;
        }
    }

    pub fn after_step(&mut self, scene: &mut Scene) {
        if self.outcome.is_some() {
            return;
        }
        let (Some(rocket), Some(platform)) = (scene.get(self.rocket), scene.get(self.platform)) else {
            return;
        };

        self.telemetry = Telemetry {
            altitude: rocket.pos.y,
            fuel: self.fuel,
            horizontal_speed: rocket.vel.x,
            vertical_speed: rocket.vel.y,
        };

        let offset = (rocket.pos - platform.pos).abs();
        let over_platform = offset.x < self.cfg.landing_window && offset.y < self.cfg.landing_window;
        let too_fast = self.approach_speed.abs() > self.cfg.crash_speed;

        let outcome = if over_platform && too_fast {
            Some(Outcome::Crashed)
        } else if rocket.collided.bottom {
            // Touched down: either on the platform or on the ground
            Some(if over_platform { Outcome::Landed } else { Outcome::Crashed })
        } else {
            None
        };

        if let Some(outcome) = outcome {
            log::info!(
                "{} (vertical speed {:.3}, fuel {:.0})",
                outcome.message(),
                self.approach_speed,
                self.fuel
            );
            if outcome == Outcome::Crashed {
                if let Some(rocket) = scene.get_mut(self.rocket) {
                    rocket.texture = TextureKey::Explosion;
                    rocket.vel = Vec2::ZERO;
                    rocket.accel = Vec2::ZERO;
                }
            }
            self.outcome = Some(outcome);
        }
    }

    pub fn hud(&self) -> Vec<HudLine> {
        let t = &self.telemetry;
        let line = |text: String, x: f32, y: f32| HudLine::new(text, Vec2::new(x, y), 0.25, 0.005, TextureKey::PixelFont);

        let mut lines = vec![
            line(format!("ALTITUDE: {}", t.altitude as i32), -4.5, 3.0),
            line(format!("FUEL: {}", t.fuel as i32), -4.5, 2.5),
            line(format!("HORIZONTAL SPEED: {}", t.horizontal_speed as i32), 0.0, 3.0),
            line(format!("VERTICAL SPEED: {}", t.vertical_speed as i32), 0.0, 2.5),
        ];
        if let Some(outcome) = self.outcome {
            lines.push(HudLine::new(
                outcome.message(),
                Vec2::new(-3.0, 0.0),
                0.5,
                0.005,
                TextureKey::PixelFont,
            ));
        }
        lines
    }
}
