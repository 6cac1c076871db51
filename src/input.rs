//! Keyboard input mapping
//!
//! Platform events are translated into `InputEvent`s by whatever window layer
//! hosts the session. Held keys are tracked in a `KeyState`; each frame that
//! state plus any one-shot presses becomes a `TickInput` for the simulation.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the arcade reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Space,
    T,
    P,
    Q,
    Escape,
    Num1,
    Num2,
    Num3,
}

impl Key {
    /// Ball count selected by a number key
    pub fn ball_count(self) -> Option<u8> {
        match self {
            Key::Num1 => Some(1),
            Key::Num2 => Some(2),
            Key::Num3 => Some(3),
            _ => None,
        }
    }
}

/// Events delivered by the host window layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window closed or quit requested
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Set of currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Direction from a group of four keys, each component in {-1, 0, 1}.
    /// Opposite keys cancel.
    fn axis(&self, left: Key, right: Key, up: Key, down: Key) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.is_down(left) {
            dir.x -= 1.0;
        }
        if self.is_down(right) {
            dir.x += 1.0;
        }
        if self.is_down(up) {
            dir.y += 1.0;
        }
        if self.is_down(down) {
            dir.y -= 1.0;
        }
        dir
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Arrow keys: right paddle, rocket thrusters, shooter player
    pub primary: Vec2,
    /// W/A/S/D: left paddle
    pub secondary: Vec2,
    /// Fire held (space)
    pub fire: bool,
    /// Toggle right paddle AI (one-shot)
    pub toggle_ai: bool,
    /// Requested number of balls in play (one-shot)
    pub ball_count: Option<u8>,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

impl TickInput {
    /// Continuous part of the input, read from the held keys
    pub fn from_keys(keys: &KeyState) -> Self {
        Self {
            primary: keys.axis(Key::Left, Key::Right, Key::Up, Key::Down),
            secondary: keys.axis(Key::A, Key::D, Key::W, Key::S),
            fire: keys.is_down(Key::Space),
            ..Default::default()
        }
    }

    /// Record a key press that should act once
    pub fn note_press(&mut self, key: Key) {
        match key {
            Key::T => self.toggle_ai = true,
            Key::P => self.pause = true,
            _ => {
                if let Some(count) = key.ball_count() {
                    self.ball_count = Some(count);
                }
            }
        }
    }

    /// Drop one-shot commands once a step has consumed them
    pub fn clear_one_shots(&mut self) {
        self.toggle_ai = false;
        self.ball_count = None;
        self.pause = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_map_to_axes() {
        let mut keys = KeyState::new();
        keys.press(Key::Up);
        keys.press(Key::Left);
        keys.press(Key::S);
        keys.press(Key::Space);

        let input = TickInput::from_keys(&keys);
        assert_eq!(input.primary, Vec2::new(-1.0, 1.0));
        assert_eq!(input.secondary, Vec2::new(0.0, -1.0));
        assert!(input.fire);
        assert!(!input.toggle_ai);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut keys = KeyState::new();
        keys.press(Key::Up);
        keys.press(Key::Down);
        assert_eq!(TickInput::from_keys(&keys).primary, Vec2::ZERO);

        keys.release(Key::Down);
        assert_eq!(TickInput::from_keys(&keys).primary, Vec2::Y);
    }

    #[test]
    fn test_one_shots_cleared() {
        let mut input = TickInput::default();
        input.note_press(Key::T);
        input.note_press(Key::Num2);
        input.note_press(Key::Num3);
        assert!(input.toggle_ai);
        assert_eq!(input.ball_count, Some(3));

        input.clear_one_shots();
        assert_eq!(input, TickInput::default());
    }
}
