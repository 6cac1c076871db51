//! Two-player Pong
//!
//! W/S drive the left paddle, the arrow keys the right one. `T` hands the
//! right paddle to a sweeping AI, `1`/`2`/`3` pick how many balls are in play.
//! A ball whose center leaves the field on one side ends the game in favour of
//! the other side.

use glam::Vec2;

use super::HudLine;
use crate::assets::TextureKey;
use crate::input::TickInput;
use crate::settings::{ArcadeConfig, PongConfig};
use crate::sim::{Axis, BoundedPatrol, Entity, EntityId, EntityKind, Outcome, Scene, Side, Steering};

#[derive(Debug, Clone)]
pub struct Pong {
    left: EntityId,
    right: EntityId,
    /// Ball pool, lowest id first
    balls: Vec<EntityId>,
    desired_balls: u8,
    ai_enabled: bool,
    ball_velocity: Vec2,
    outcome: Option<Outcome>,
}

impl Pong {
    pub fn setup(scene: &mut Scene, config: &ArcadeConfig) -> Self {
        let cfg: &PongConfig = &config.pong;

        let paddle = |x: f32| {
            Entity::new(EntityKind::Paddle, Vec2::new(x, 0.0), cfg.paddle_size)
                .with_speed(cfg.paddle_speed)
                .with_texture(TextureKey::Paddle)
        };
        let left = scene.spawn(paddle(-cfg.paddle_x));
        let right = scene.spawn(paddle(cfg.paddle_x));

        let balls = (0..cfg.max_balls)
            .map(|_| {
                scene.spawn(
                    Entity::new(EntityKind::Ball, Vec2::ZERO, Vec2::splat(cfg.ball_size))
                        .with_texture(TextureKey::Ball)
                        .inactive(),
                )
            })
            .collect();

        let mut pong = Self {
            left,
            right,
            balls,
            desired_balls: cfg.initial_balls.min(cfg.max_balls),
            ai_enabled: false,
            ball_velocity: cfg.ball_velocity,
            outcome: None,
        };
        pong.sync_balls(scene);
        pong
    }

    #[inline]
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    #[inline]
    pub fn desired_balls(&self) -> u8 {
        self.desired_balls
    }

    pub fn balls(&self) -> &[EntityId] {
        &self.balls
    }

    pub fn paddles(&self) -> (EntityId, EntityId) {
        (self.left, self.right)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn apply_input(&mut self, scene: &mut Scene, input: &TickInput) {
        if self.outcome.is_some() {
            return;
        }

        if input.toggle_ai {
            self.set_ai(scene, !self.ai_enabled);
        }
        if let Some(count) = input.ball_count {
            let count = count.clamp(1, (self.balls.len() as u8).max(1));
            if count != self.desired_balls {
                log::info!("Ball count {} -> {}", self.desired_balls, count);
                self.desired_balls = count;
            }
        }
        self.sync_balls(scene);

        if let Some(paddle) = scene.get_mut(self.left) {
            paddle.intent = Vec2::new(0.0, axis_sign(input.secondary.y));
        }
        if !self.ai_enabled {
            if let Some(paddle) = scene.get_mut(self.right) {
                paddle.intent = Vec2::new(0.0, axis_sign(input.primary.y));
            }
        }
    }

    /// Check every active ball against the left and right edges
    pub fn after_step(&mut self, scene: &mut Scene) {
        if self.outcome.is_some() {
            return;
        }

        let bounds = scene.bounds;
        for &id in &self.balls {
            let Some(ball) = scene.get(id).filter(|b| b.active) else {
                continue;
            };
            let winner = if ball.pos.x < bounds.min.x {
                Some(Side::Right)
            } else if ball.pos.x > bounds.max.x {
                Some(Side::Left)
            } else {
                None
            };
            if let Some(side) = winner {
                let outcome = Outcome::Winner(side);
                log::info!("Game over: {}", outcome.message());
                self.outcome = Some(outcome);
                return;
            }
        }
    }

    pub fn hud(&self) -> Vec<HudLine> {
        match self.outcome {
            Some(outcome) => vec![HudLine::new(
                outcome.message(),
                Vec2::new(-2.0, 0.0),
                0.5,
                -0.25,
                TextureKey::PongFont,
            )],
            None => Vec::new(),
        }
    }

    fn set_ai(&mut self, scene: &mut Scene, enabled: bool) {
        self.ai_enabled = enabled;
        if let Some(paddle) = scene.get_mut(self.right) {
            paddle.steering = enabled.then(|| Steering::BoundedPatrol(BoundedPatrol::sweep(Axis::Y, 1.0)));
            paddle.intent = Vec2::ZERO;
        }
        log::info!("Right paddle AI {}", if enabled { "on" } else { "off" });
    }

    /// Activate pooled balls up to the desired count and park the rest.
    /// Ball `i` serves from (0, i - 2), odd balls toward the left.
    fn sync_balls(&mut self, scene: &mut Scene) {
        for (i, &id) in self.balls.iter().enumerate() {
            let Some(ball) = scene.get_mut(id) else {
                continue;
            };
            let wanted = i < self.desired_balls as usize;
            if wanted && !ball.active {
                let dir = if i % 2 == 0 { 1.0 } else { -1.0 };
                let vel = Vec2::new(self.ball_velocity.x * dir, self.ball_velocity.y);
                ball.activate(Vec2::new(0.0, i as f32 - 2.0), vel);
            } else if !wanted && ball.active {
                ball.deactivate();
            }
        }
    }
}

/// Sign of a key axis, with 0.0 kept as 0.0
fn axis_sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
