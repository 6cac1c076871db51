//! Sprite entities and their per-kind update policies
//!
//! Every game object (paddles, balls, rockets, skulls, bullets, scenery) is an
//! `Entity`. The kind picks the motion, boundary and collision policy once at
//! construction; the tick loop only ever matches on those policies.

use glam::{Mat4, Quat, Vec2};
use serde::{Deserialize, Serialize};

use super::animation::Animator;
use super::collision::Aabb;
use super::steering::Steering;
use crate::assets::TextureKey;

/// Stable handle into the scene arena (index order == iteration order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Entity type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Paddle,
    Ball,
    Rocket,
    Chaser,
    Projectile,
    Player,
    /// Scenery that never moves (platforms, mountains, rose bushes)
    Static,
}

impl EntityKind {
    pub fn default_motion(self) -> Motion {
        match self {
            EntityKind::Paddle | EntityKind::Player => Motion::Direct,
            EntityKind::Ball | EntityKind::Rocket | EntityKind::Projectile => Motion::Integrated,
            EntityKind::Chaser => Motion::Steered,
            EntityKind::Static => Motion::Fixed,
        }
    }

    pub fn default_bounds(self) -> BoundPolicy {
        match self {
            EntityKind::Paddle | EntityKind::Player => BoundPolicy::Clamp,
            EntityKind::Ball => BoundPolicy::BounceVertical,
            EntityKind::Projectile => BoundPolicy::Cull,
            EntityKind::Rocket | EntityKind::Chaser | EntityKind::Static => BoundPolicy::Free,
        }
    }

    pub fn default_response(self) -> CollisionResponse {
        match self {
            EntityKind::Ball => CollisionResponse::Reflect,
            EntityKind::Rocket => CollisionResponse::Block,
            _ => CollisionResponse::None,
        }
    }

    /// Whether moving entities are pushed out of this one
    pub fn is_solid(self) -> bool {
        matches!(self, EntityKind::Paddle | EntityKind::Static)
    }
}

/// How velocity is produced each step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// velocity = intent * speed, intent consumed every step (paddles, player)
    Direct,
    /// Semi-implicit Euler: velocity += accel * dt, then position += velocity * dt
    Integrated,
    /// velocity = steering direction * speed
    Steered,
    /// Never moves
    Fixed,
}

/// What happens when the entity reaches the world bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundPolicy {
    Free,
    /// Keep the whole box inside ("soft wall")
    Clamp,
    /// Keep only the center inside
    ClampCenter,
    /// Clamp to top/bottom and reflect vertical velocity
    BounceVertical,
    /// Deactivate once the center leaves the bounds
    Cull,
}

/// Response of a moving entity when it overlaps a solid one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionResponse {
    None,
    /// Push out and zero the velocity component
    Block,
    /// Push out and negate the velocity component
    Reflect,
}

/// Per-step contact flags, cleared at the start of every step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }
}

/// A sprite entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Requested movement direction (input or AI), consumed by `Motion::Direct`
    pub intent: Vec2,
    pub speed: f32,
    /// Render-only scale applied on top of the extent
    pub scale: Vec2,
    /// Rotation about the sprite's vertical axis (radians)
    pub rotation: f32,
    pub active: bool,
    pub motion: Motion,
    pub bounds: BoundPolicy,
    pub response: CollisionResponse,
    pub solid: bool,
    pub texture: TextureKey,
    pub animation: Option<Animator>,
    pub steering: Option<Steering>,
    /// Entity the steering policy is aimed at
    pub target: Option<EntityId>,
    #[serde(skip)]
    pub collided: CollisionFlags,
    /// Full width/height of the bounding box, never negative
    extent: Vec2,
}

impl Entity {
    /// Create an entity with the default policies for its kind.
    /// The id is assigned by `Scene::spawn`.
    pub fn new(kind: EntityKind, pos: Vec2, extent: Vec2) -> Self {
        Self {
            id: EntityId(0),
            kind,
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            intent: Vec2::ZERO,
            speed: 0.0,
            scale: Vec2::ONE,
            rotation: 0.0,
            active: true,
            motion: kind.default_motion(),
            bounds: kind.default_bounds(),
            response: kind.default_response(),
            solid: kind.is_solid(),
            texture: TextureKey::Blank,
            animation: None,
            steering: None,
            target: None,
            collided: CollisionFlags::default(),
            extent: extent.max(Vec2::ZERO),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_accel(mut self, accel: Vec2) -> Self {
        self.accel = accel;
        self
    }

    pub fn with_texture(mut self, texture: TextureKey) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_animation(mut self, animator: Animator) -> Self {
        self.animation = Some(animator);
        self
    }

    pub fn with_steering(mut self, steering: Steering, target: Option<EntityId>) -> Self {
        self.steering = Some(steering);
        self.target = target;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Never blocks other entities
    pub fn passable(mut self) -> Self {
        self.solid = false;
        self
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        self.extent * 0.5
    }

    pub fn set_extent(&mut self, extent: Vec2) {
        self.extent = extent.max(Vec2::ZERO);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half_extent())
    }

    /// Bring a pooled entity back into play
    pub fn activate(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.intent = Vec2::ZERO;
        self.collided = CollisionFlags::default();
        self.active = true;
    }

    /// Return the entity to its pool; it keeps existing but is skipped by every system
    pub fn deactivate(&mut self) {
        self.active = false;
        self.vel = Vec2::ZERO;
        self.intent = Vec2::ZERO;
    }

    /// Model matrix handed to the render backend (translate * rotate * scale)
    pub fn model_transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.extend(1.0),
            Quat::from_rotation_y(self.rotation),
            self.pos.extend(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_kind_selects_policies() {
        let paddle = Entity::new(EntityKind::Paddle, Vec2::ZERO, Vec2::new(0.5, 1.5));
        assert_eq!(paddle.motion, Motion::Direct);
        assert_eq!(paddle.bounds, BoundPolicy::Clamp);
        assert!(paddle.solid);

        let ball = Entity::new(EntityKind::Ball, Vec2::ZERO, Vec2::splat(0.5));
        assert_eq!(ball.motion, Motion::Integrated);
        assert_eq!(ball.response, CollisionResponse::Reflect);
        assert!(!ball.solid);

        let bullet = Entity::new(EntityKind::Projectile, Vec2::ZERO, Vec2::splat(0.2));
        assert_eq!(bullet.bounds, BoundPolicy::Cull);
    }

    #[test]
    fn test_negative_extent_clamped() {
        let mut e = Entity::new(EntityKind::Static, Vec2::ZERO, Vec2::new(-1.0, 2.0));
        assert_eq!(e.extent(), Vec2::new(0.0, 2.0));
        e.set_extent(Vec2::new(3.0, -0.5));
        assert_eq!(e.extent(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_deactivate_then_activate() {
        let mut e = Entity::new(EntityKind::Ball, Vec2::ZERO, Vec2::splat(0.5))
            .with_velocity(Vec2::new(1.0, 0.5));
        e.deactivate();
        assert!(!e.active);
        assert_eq!(e.vel, Vec2::ZERO);

        e.activate(Vec2::new(0.0, -2.0), Vec2::new(-1.0, 0.5));
        assert!(e.active);
        assert_eq!(e.pos, Vec2::new(0.0, -2.0));
        assert_eq!(e.vel, Vec2::new(-1.0, 0.5));
    }

    #[test]
    fn test_model_transform_translates() {
        let mut e = Entity::new(EntityKind::Static, Vec2::new(1.0, -2.0), Vec2::ONE);
        e.scale = Vec2::splat(2.0);
        let p = e.model_transform().transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!((p.x - 2.0).abs() < 1e-5);
        assert!((p.y - (-1.0)).abs() < 1e-5);
    }
}
