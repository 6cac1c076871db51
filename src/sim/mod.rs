//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod entity;
pub mod state;
pub mod steering;
pub mod tick;
pub mod timestep;

pub use animation::{AnimationSet, Animator, Facing, FrameTable};
pub use collision::{Aabb, Axis, check, is_nearby, penetration, resolve_axis};
pub use entity::{
    BoundPolicy, CollisionFlags, CollisionResponse, Entity, EntityId, EntityKind, Motion,
};
pub use state::{Bounds, Outcome, Scene, Side};
pub use steering::{BoundedPatrol, Patrol, PatrolMode, Steering, SteeringContext};
pub use tick::step_entities;
pub use timestep::FixedTimestep;
