//! Axis-aligned collision detection and response
//!
//! Boxes are center + half-extents. Overlap is strict: boxes that merely touch
//! do not collide. Response is one-sided, only the moving subject is displaced.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{CollisionResponse, Entity};
use super::state::Bounds;

/// Overlap below this on the cross axis counts as resting contact, not a hit
pub const CONTACT_EPSILON: f32 = 1e-4;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        check(self, other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// The perpendicular axis
    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    #[inline]
    fn component_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }
}

/// Signed separation along an axis: `|distance| - (half_a + half_b)`.
/// Negative means the projections overlap by that much.
#[inline]
pub fn penetration(a: &Aabb, b: &Aabb, axis: Axis) -> f32 {
    (axis.of(a.center) - axis.of(b.center)).abs() - (axis.of(a.half) + axis.of(b.half))
}

/// Strict overlap test, symmetric in its arguments
#[inline]
pub fn check(a: &Aabb, b: &Aabb) -> bool {
    penetration(a, b, Axis::X) < 0.0 && penetration(a, b, Axis::Y) < 0.0
}

/// Proximity trigger: center distance strictly below `threshold`
#[inline]
pub fn is_nearby(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Push `subject` out of `other` along one axis.
///
/// The subject is placed flush against `other` on the side it came from, and
/// the velocity component is zeroed (`Block`) or negated (`Reflect`). A subject
/// with no velocity on the axis, one already moving away from `other`, or one
/// that only touches `other` on the cross axis (within `CONTACT_EPSILON`, e.g.
/// sliding along a surface it was just resolved against) is left where it is.
/// Returns true if the subject was displaced.
pub fn resolve_axis(subject: &mut Entity, other: &Aabb, axis: Axis) -> bool {
    if subject.response == CollisionResponse::None {
        return false;
    }

    let aabb = subject.aabb();
    if !check(&aabb, other) {
        return false;
    }

    if penetration(&aabb, other, axis.other()) > -CONTACT_EPSILON {
        return false;
    }

    let v = axis.of(subject.vel);
    let toward = axis.of(other.center) - axis.of(subject.pos);
    if v * toward <= 0.0 {
        return false;
    }

    let positive = v > 0.0;
    let reach = axis.of(aabb.half) + axis.of(other.half);
    let pos = axis.component_mut(&mut subject.pos);
    *pos = if positive {
        axis.of(other.center) - reach
    } else {
        axis.of(other.center) + reach
    };

    let vel = axis.component_mut(&mut subject.vel);
    *vel = match subject.response {
        CollisionResponse::Reflect => -v,
        _ => 0.0,
    };

    match (axis, positive) {
        (Axis::Y, true) => subject.collided.top = true,
        (Axis::Y, false) => subject.collided.bottom = true,
        (Axis::X, true) => subject.collided.right = true,
        (Axis::X, false) => subject.collided.left = true,
    }
    true
}

/// Keep the entity's whole box inside the bounds ("soft wall").
/// Velocity on a clamped axis is zeroed. Returns true if anything was clamped.
pub fn clamp_box(entity: &mut Entity, bounds: &Bounds) -> bool {
    let half = entity.half_extent();
    let mut clamped = false;

    if entity.pos.y + half.y > bounds.max.y {
        entity.pos.y = bounds.max.y - half.y;
        entity.vel.y = 0.0;
        entity.collided.top = true;
        clamped = true;
    } else if entity.pos.y - half.y < bounds.min.y {
        entity.pos.y = bounds.min.y + half.y;
        entity.vel.y = 0.0;
        entity.collided.bottom = true;
        clamped = true;
    }

    if entity.pos.x + half.x > bounds.max.x {
        entity.pos.x = bounds.max.x - half.x;
        entity.vel.x = 0.0;
        entity.collided.right = true;
        clamped = true;
    } else if entity.pos.x - half.x < bounds.min.x {
        entity.pos.x = bounds.min.x + half.x;
        entity.vel.x = 0.0;
        entity.collided.left = true;
        clamped = true;
    }

    clamped
}

/// Keep only the entity's center inside the bounds
pub fn clamp_center(entity: &mut Entity, bounds: &Bounds) {
    entity.pos = entity.pos.clamp(bounds.min, bounds.max);
}

/// Bounce off the top and bottom edges: clamp the box back inside and send the
/// vertical velocity back into the field. Horizontal motion is untouched.
pub fn bounce_vertical(entity: &mut Entity, bounds: &Bounds) -> bool {
    let half_h = entity.half_extent().y;

    if entity.pos.y + half_h > bounds.max.y {
        entity.pos.y = bounds.max.y - half_h;
        entity.vel.y = -entity.vel.y.abs();
        entity.collided.top = true;
        true
    } else if entity.pos.y - half_h < bounds.min.y {
        entity.pos.y = bounds.min.y + half_h;
        entity.vel.y = entity.vel.y.abs();
        entity.collided.bottom = true;
        true
    } else {
        false
    }
}

/// True once the center has left the bounds
#[inline]
pub fn out_of_bounds(pos: Vec2, bounds: &Bounds) -> bool {
    !bounds.contains(pos)
}
