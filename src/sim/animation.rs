//! Frame-indexed sprite animation
//!
//! An `Animator` walks through a `FrameTable` (atlas cell indices) at a fixed
//! cadence. Directional sprites keep one table per `Facing`; turning swaps the
//! table but keeps the timer running.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ordered atlas cell indices making up one animation cycle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameTable(Vec<u32>);

impl FrameTable {
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self(indices.into())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.0.get(index).copied()
    }
}

/// Movement facing used to pick a frame table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
    Up,
    #[default]
    Down,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Left, Facing::Right, Facing::Up, Facing::Down];

    #[inline]
    fn slot(self) -> usize {
        match self {
            Facing::Left => 0,
            Facing::Right => 1,
            Facing::Up => 2,
            Facing::Down => 3,
        }
    }

    /// Facing for a movement direction; vertical movement wins over horizontal,
    /// and down wins over up. `None` when not moving.
    pub fn from_direction(dir: Vec2) -> Option<Facing> {
        if dir.y < 0.0 {
            Some(Facing::Down)
        } else if dir.y > 0.0 {
            Some(Facing::Up)
        } else if dir.x > 0.0 {
            Some(Facing::Right)
        } else if dir.x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    /// Unit vector pointing this way
    pub fn vector(self) -> Vec2 {
        match self {
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
            Facing::Up => Vec2::Y,
            Facing::Down => Vec2::NEG_Y,
        }
    }
}

/// One frame table per facing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationSet {
    tables: [FrameTable; 4],
}

impl AnimationSet {
    pub fn directional(left: FrameTable, right: FrameTable, up: FrameTable, down: FrameTable) -> Self {
        Self {
            tables: [left, right, up, down],
        }
    }

    /// Same cycle regardless of facing
    pub fn single(table: FrameTable) -> Self {
        Self {
            tables: [table.clone(), table.clone(), table.clone(), table],
        }
    }

    pub fn table(&self, facing: Facing) -> &FrameTable {
        &self.tables[facing.slot()]
    }
}

/// Playback state for an animated sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    set: AnimationSet,
    facing: Facing,
    index: usize,
    /// Time spent on the current frame
    timer: f32,
    frames_per_second: f32,
}

impl Animator {
    pub fn new(set: AnimationSet, facing: Facing, frames_per_second: f32) -> Self {
        Self {
            set,
            facing,
            index: 0,
            timer: 0.0,
            frames_per_second,
        }
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Number of frames in the active table
    pub fn frame_count(&self) -> usize {
        self.set.table(self.facing).len()
    }

    /// Accumulate time and step to the next frame once a frame's duration is
    /// reached. The timer restarts from zero rather than carrying the excess.
    pub fn advance(&mut self, dt: f32) {
        let frames = self.frame_count();
        if frames == 0 || self.frames_per_second <= 0.0 {
            return;
        }

        self.timer += dt;
        if self.timer >= 1.0 / self.frames_per_second {
            self.timer = 0.0;
            self.index = (self.index + 1) % frames;
        }
    }

    /// Switch to another facing's table. The timer keeps running; the frame
    /// index is wrapped into the new table's range.
    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
        let frames = self.frame_count();
        self.index = if frames == 0 { 0 } else { self.index % frames };
    }

    /// Atlas cell to draw this frame, `None` for an empty table
    pub fn atlas_index(&self) -> Option<u32> {
        let table = self.set.table(self.facing);
        let last = table.len().checked_sub(1)?;
        table.get(self.index.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn butterfly() -> Animator {
        let set = AnimationSet::directional(
            FrameTable::new([1, 5, 9, 13]),
            FrameTable::new([3, 7, 11, 15]),
            FrameTable::new([2, 6, 10, 14]),
            FrameTable::new([0, 4, 8, 12]),
        );
        Animator::new(set, Facing::Down, 4.0)
    }

    #[test]
    fn test_advance_on_cadence() {
        let mut anim = butterfly();
        assert_eq!(anim.atlas_index(), Some(0));

        anim.advance(0.2);
        assert_eq!(anim.index(), 0);
        anim.advance(0.1);
        assert_eq!(anim.index(), 1);
        assert_eq!(anim.timer(), 0.0);
        assert_eq!(anim.atlas_index(), Some(4));
    }

    #[test]
    fn test_wraps_to_start() {
        let mut anim = butterfly();
        for _ in 0..4 {
            anim.advance(0.25);
        }
        assert_eq!(anim.index(), 0);
    }

    #[test]
    fn test_facing_swap_keeps_timer_and_index() {
        let mut anim = butterfly();
        anim.advance(0.25);
        anim.advance(0.1);
        anim.set_facing(Facing::Left);
        assert_eq!(anim.index(), 1);
        assert!((anim.timer() - 0.1).abs() < 1e-6);
        assert_eq!(anim.atlas_index(), Some(5));
    }

    #[test]
    fn test_facing_swap_to_shorter_table_wraps_index() {
        let set = AnimationSet::directional(
            FrameTable::new([1, 2]),
            FrameTable::new([3, 4, 5, 6]),
            FrameTable::new([7]),
            FrameTable::new([0, 8, 9, 10]),
        );
        let mut anim = Animator::new(set, Facing::Down, 4.0);
        for _ in 0..3 {
            anim.advance(0.25);
        }
        assert_eq!(anim.index(), 3);

        anim.set_facing(Facing::Left);
        assert_eq!(anim.index(), 1);
        assert_eq!(anim.atlas_index(), Some(2));

        anim.set_facing(Facing::Up);
        assert_eq!(anim.index(), 0);
        assert_eq!(anim.atlas_index(), Some(7));
    }

    #[test]
    fn test_empty_table_is_static() {
        let mut anim = Animator::new(AnimationSet::default(), Facing::Down, 4.0);
        anim.advance(10.0);
        assert_eq!(anim.index(), 0);
        assert_eq!(anim.atlas_index(), None);
    }

    #[test]
    fn test_facing_from_direction_priority() {
        assert_eq!(Facing::from_direction(Vec2::new(1.0, -1.0)), Some(Facing::Down));
        assert_eq!(Facing::from_direction(Vec2::new(-1.0, 1.0)), Some(Facing::Up));
        assert_eq!(Facing::from_direction(Vec2::new(-1.0, 0.0)), Some(Facing::Left));
        assert_eq!(Facing::from_direction(Vec2::ZERO), None);
    }
}
