//! Fixed timestep simulation tick
//!
//! Advances every active entity by one step: steering, kinematics, collision
//! resolution, boundary policy, animation. Game rules run afterwards.

use glam::Vec2;

use super::collision::{self, Aabb, Axis, bounce_vertical, clamp_box, clamp_center, resolve_axis};
use super::entity::{BoundPolicy, CollisionFlags, CollisionResponse, Entity, Motion};
use super::state::{Bounds, Scene};
use super::steering::SteeringContext;

/// Advance all active entities by `dt`, in ascending id order.
///
/// Collision response is one-sided: each moving entity is pushed out of the
/// solid entities it overlaps, visiting them in id order. Solids are seen at
/// whatever position they already reached this step, so with three or more
/// overlapping boxes the result depends on that order.
pub fn step_entities(scene: &mut Scene, dt: f32) {
    scene.time_ticks += 1;
    let bounds = scene.bounds;

    for i in 0..scene.entities.len() {
        if !scene.entities[i].active {
            continue;
        }

        let (target, solids) = {
            let entity = &scene.entities[i];
            let target = entity
                .target
                .and_then(|id| scene.get(id))
                .filter(|t| t.active)
                .map(|t| t.pos);
            (target, solid_boxes(scene, entity))
        };

        let entity = &mut scene.entities[i];
        step_entity(entity, target, &solids, &bounds, dt);
    }
}

/// Boxes of every other active solid entity, in id order
fn solid_boxes(scene: &Scene, subject: &Entity) -> Vec<Aabb> {
    if subject.response == CollisionResponse::None || subject.motion == Motion::Fixed {
        return Vec::new();
    }
    scene
        .entities
        .iter()
        .filter(|other| other.active && other.solid && other.id != subject.id)
        .map(Entity::aabb)
        .collect()
}

fn step_entity(entity: &mut Entity, target: Option<Vec2>, solids: &[Aabb], bounds: &Bounds, dt: f32) {
    entity.collided = CollisionFlags::default();

    let ctx = SteeringContext {
        pos: entity.pos,
        half: entity.half_extent(),
        target,
        bounds: *bounds,
        dt,
    };
    if let Some(steering) = entity.steering.as_mut() {
        let dir = steering.choose_direction(&ctx);
        match entity.motion {
            Motion::Direct => entity.intent = dir,
            Motion::Steered => entity.vel = dir * entity.speed,
            Motion::Integrated | Motion::Fixed => {}
        }
    }

    match entity.motion {
        Motion::Direct => entity.vel = entity.intent * entity.speed,
        Motion::Integrated => entity.vel += entity.accel * dt,
        Motion::Steered => {}
        Motion::Fixed => entity.vel = Vec2::ZERO,
    }

    if entity.motion != Motion::Fixed {
        // Move and resolve one axis at a time so a corner hit is not pushed
        // out along the wrong axis
        entity.pos.y += entity.vel.y * dt;
        for other in solids {
            resolve_axis(entity, other, Axis::Y);
        }
        entity.pos.x += entity.vel.x * dt;
        for other in solids {
            resolve_axis(entity, other, Axis::X);
        }

        apply_bounds(entity, bounds);
    }

    if entity.motion == Motion::Direct {
        entity.intent = Vec2::ZERO;
    }

    if entity.active {
        if let Some(animation) = entity.animation.as_mut() {
            animation.advance(dt);
        }
    }
}

fn apply_bounds(entity: &mut Entity, bounds: &Bounds) {
    match entity.bounds {
        BoundPolicy::Free => {}
        BoundPolicy::Clamp => {
            clamp_box(entity, bounds);
        }
        BoundPolicy::ClampCenter => clamp_center(entity, bounds),
        BoundPolicy::BounceVertical => {
            bounce_vertical(entity, bounds);
        }
        BoundPolicy::Cull => {
            if collision::out_of_bounds(entity.pos, bounds) {
                log::debug!("entity {:?} left the field, returning to pool", entity.id);
                entity.deactivate();
            }
        }
    }
}
