//! Scene state: the entity arena plus world bounds
//!
//! Entities are never removed during a session. Pooled objects (extra balls,
//! bullets) are toggled active/inactive so ids stay stable and iteration
//! order stays deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use crate::consts::{WORLD_HALF_HEIGHT, WORLD_HALF_WIDTH};

/// Axis-aligned world rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Rectangle centered on the origin
    pub fn centered(half_width: f32, half_height: f32) -> Self {
        Self {
            min: Vec2::new(-half_width, -half_height),
            max: Vec2::new(half_width, half_height),
        }
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::centered(WORLD_HALF_WIDTH, WORLD_HALF_HEIGHT)
    }
}

/// Which player a Pong result refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Pong: the named side scored
    Winner(Side),
    /// Lander: touched down on the platform gently
    Landed,
    /// Lander: hit the platform too fast or hit the mountain
    Crashed,
    /// Shooter: every enemy destroyed
    Victory,
    /// Shooter: the player was caught
    Defeat,
}

impl Outcome {
    /// Banner text drawn with the font atlas
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Winner(Side::Left) => "Player 1 Wins!",
            Outcome::Winner(Side::Right) => "Player 2 Wins!",
            Outcome::Landed => "Mission Accomplished",
            Outcome::Crashed => "Mission Failed",
            Outcome::Victory => "You Win",
            Outcome::Defeat => "You Lose",
        }
    }
}

/// All simulated entities of one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Entity arena, index == id
    pub entities: Vec<Entity>,
    pub bounds: Bounds,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Scene {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            entities: Vec::new(),
            bounds,
            time_ticks: 0,
        }
    }

    /// Add an entity and return its stable id
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        entity.id = id;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    pub fn is_active(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|e| e.active)
    }

    /// Position of an entity, if it exists
    pub fn position(&self, id: EntityId) -> Option<Vec2> {
        self.get(id).map(|e| e.pos)
    }

    /// Ids of active entities in ascending order
    pub fn active_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().filter(|e| e.active).map(|e| e.id)
    }

    /// First pooled (inactive) entity of a kind, lowest id first
    pub fn first_inactive(&self, kind: EntityKind) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| !e.active && e.kind == kind)
            .map(|e| e.id)
    }

    pub fn count_active(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.active && e.kind == kind)
            .count()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_sequential_ids() {
        let mut scene = Scene::default();
        let a = scene.spawn(Entity::new(EntityKind::Static, Vec2::ZERO, Vec2::ONE));
        let b = scene.spawn(Entity::new(EntityKind::Ball, Vec2::ZERO, Vec2::ONE));
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(scene.get(b).map(|e| e.kind), Some(EntityKind::Ball));
    }

    #[test]
    fn test_pool_lookup() {
        let mut scene = Scene::default();
        scene.spawn(Entity::new(EntityKind::Projectile, Vec2::ZERO, Vec2::splat(0.2)));
        let pooled = scene.spawn(Entity::new(EntityKind::Projectile, Vec2::ZERO, Vec2::splat(0.2)).inactive());
        assert_eq!(scene.first_inactive(EntityKind::Projectile), Some(pooled));
        assert_eq!(scene.count_active(EntityKind::Projectile), 1);
        assert_eq!(scene.active_ids().count(), 1);
    }

    #[test]
    fn test_bounds_contains_edges() {
        let bounds = Bounds::default();
        assert!(bounds.contains(Vec2::new(5.0, 3.75)));
        assert!(!bounds.contains(Vec2::new(5.01, 0.0)));
    }
}
