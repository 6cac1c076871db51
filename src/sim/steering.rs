//! Rule-based AI steering
//!
//! Each policy answers one question per step: which way should I move?
//! The answer is a unit vector (or zero); the entity's speed turns it into a
//! velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Axis;
use super::state::Bounds;

/// Slack for "box edge is at the bound" after clamping
const EDGE_EPSILON: f32 = 1e-4;

/// Everything a policy may look at
#[derive(Debug, Clone, Copy)]
pub struct SteeringContext {
    pub pos: Vec2,
    pub half: Vec2,
    pub target: Option<Vec2>,
    pub bounds: Bounds,
    pub dt: f32,
}

/// Steering policy attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Steering {
    /// Cycle through fixed directions on a timer
    Patrol(Patrol),
    /// Sweep along one axis between the bounds, optionally chasing a nearby target
    BoundedPatrol(BoundedPatrol),
    /// Head straight for the target every step
    DirectChase,
}

impl Steering {
    pub fn choose_direction(&mut self, ctx: &SteeringContext) -> Vec2 {
        match self {
            Steering::Patrol(patrol) => patrol.choose_direction(ctx.dt),
            Steering::BoundedPatrol(patrol) => patrol.choose_direction(ctx),
            Steering::DirectChase => chase_direction(ctx.pos, ctx.target),
        }
    }
}

/// Normalized direction from `pos` to `target`; zero when there is no target or
/// the two coincide.
pub fn chase_direction(pos: Vec2, target: Option<Vec2>) -> Vec2 {
    target.map_or(Vec2::ZERO, |t| (t - pos).normalize_or_zero())
}

/// Timer-driven patrol over an ordered list of directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    directions: Vec<Vec2>,
    /// Seconds spent on each direction
    interval: f32,
    timer: f32,
    cursor: usize,
}

impl Patrol {
    pub fn new(directions: Vec<Vec2>, interval: f32) -> Self {
        Self {
            directions,
            interval,
            timer: 0.0,
            cursor: 0,
        }
    }

    /// Right, up, left, down: traces a square
    pub fn square(interval: f32) -> Self {
        Self::new(vec![Vec2::X, Vec2::Y, Vec2::NEG_X, Vec2::NEG_Y], interval)
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn choose_direction(&mut self, dt: f32) -> Vec2 {
        if self.directions.is_empty() {
            return Vec2::ZERO;
        }

        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            self.cursor = (self.cursor + 1) % self.directions.len();
        }

        self.directions[self.cursor].normalize_or_zero()
    }
}

/// Mode of a bounded patrol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolMode {
    Patrol,
    Chase,
}

/// Sweep along one axis, reversing at the bounds. With a chase threshold the
/// entity breaks off to chase a target that comes close, and resumes the sweep
/// once the target is out of range again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedPatrol {
    axis: Axis,
    /// +1 or -1 along `axis`
    sign: f32,
    threshold: Option<f32>,
    /// Extra distance past `threshold` before a chase is abandoned
    release_margin: f32,
    mode: PatrolMode,
}

impl BoundedPatrol {
    /// Plain sweep with no chase override (the Pong AI paddle)
    pub fn sweep(axis: Axis, sign: f32) -> Self {
        Self {
            axis,
            sign: if sign < 0.0 { -1.0 } else { 1.0 },
            threshold: None,
            release_margin: 0.0,
            mode: PatrolMode::Patrol,
        }
    }

    /// Sweep that switches to chasing when the target is within `threshold`
    pub fn with_chase(mut self, threshold: f32, release_margin: f32) -> Self {
        self.threshold = Some(threshold);
        self.release_margin = release_margin.max(0.0);
        self
    }

    #[inline]
    pub fn mode(&self) -> PatrolMode {
        self.mode
    }

    #[inline]
    pub fn sign(&self) -> f32 {
        self.sign
    }

    pub fn choose_direction(&mut self, ctx: &SteeringContext) -> Vec2 {
        match (self.threshold, ctx.target) {
            (Some(threshold), Some(target)) => {
                let dist = ctx.pos.distance(target);
                self.mode = match self.mode {
                    PatrolMode::Patrol if dist < threshold => PatrolMode::Chase,
                    PatrolMode::Chase if dist >= threshold + self.release_margin => {
                        PatrolMode::Patrol
                    }
                    mode => mode,
                };
            }
            _ => self.mode = PatrolMode::Patrol,
        }

        if self.mode == PatrolMode::Chase {
            return chase_direction(ctx.pos, ctx.target);
        }

        let center = self.axis.of(ctx.pos);
        let half = self.axis.of(ctx.half);
        if center + half >= self.axis.of(ctx.bounds.max) - EDGE_EPSILON {
            self.sign = -1.0;
        } else if center - half <= self.axis.of(ctx.bounds.min) + EDGE_EPSILON {
            self.sign = 1.0;
        }

        match self.axis {
            Axis::X => Vec2::new(self.sign, 0.0),
            Axis::Y => Vec2::new(0.0, self.sign),
        }
    }
}
