//! Seeded input generator for headless runs
//!
//! Plays a game by mashing its keys at random, and produces a jittery frame
//! clock so the fixed-timestep scheduler sees realistic, uneven frame times.
//! The same seed always yields the same run.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::games::GameKind;
use crate::input::{InputEvent, Key};

/// Held-key chance per key when a new hold begins
const HOLD_CHANCE: f64 = 0.35;

pub struct Autopilot {
    rng: Pcg32,
    held_pool: &'static [Key],
    tap_pool: &'static [Key],
    held: Vec<Key>,
    /// Frames left before the held set changes
    hold_frames: u32,
}

impl Autopilot {
    pub fn new(kind: GameKind, seed: u64) -> Self {
        let (held_pool, tap_pool): (&'static [Key], &'static [Key]) = match kind {
            GameKind::Pong => (&[Key::W, Key::S, Key::Up, Key::Down], &[Key::T, Key::Num1, Key::Num2, Key::Num3]),
            GameKind::Lander => (&[Key::Up, Key::Left, Key::Right], &[]),
            GameKind::Shooter => (&[Key::Up, Key::Down, Key::Left, Key::Right, Key::Space], &[]),
            GameKind::Showcase => (&[], &[]),
        };
        Self {
            rng: Pcg32::seed_from_u64(seed),
            held_pool,
            tap_pool,
            held: Vec::new(),
            hold_frames: 0,
        }
    }

    /// Keys currently held down
    pub fn held(&self) -> &[Key] {
        &self.held
    }

    /// Events to deliver before the next frame
    pub fn events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if self.hold_frames == 0 {
            events.extend(self.held.drain(..).map(InputEvent::KeyUp));
            for &key in self.held_pool {
                if self.rng.random_bool(HOLD_CHANCE) {
                    self.held.push(key);
                    events.push(InputEvent::KeyDown(key));
                }
            }
            self.hold_frames = self.rng.random_range(5..40);
        }
        self.hold_frames -= 1;

        if !self.tap_pool.is_empty() && self.rng.random_ratio(1, 240) {
            let key = self.tap_pool[self.rng.random_range(0..self.tap_pool.len())];
            events.push(InputEvent::KeyDown(key));
            events.push(InputEvent::KeyUp(key));
        }
        events
    }

    /// Duration of the next frame in whole milliseconds: mostly around 60 Hz,
    /// sometimes a slow frame, rarely a long hitch.
    pub fn frame_time_ms(&mut self) -> u64 {
        if self.rng.random_ratio(1, 500) {
            self.rng.random_range(200..600)
        } else if self.rng.random_ratio(1, 20) {
            self.rng.random_range(25..50)
        } else {
            self.rng.random_range(14..19)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Autopilot::new(GameKind::Pong, 7);
        let mut b = Autopilot::new(GameKind::Pong, 7);
        for _ in 0..500 {
            assert_eq!(a.events(), b.events());
            assert_eq!(a.frame_time_ms(), b.frame_time_ms());
        }
    }

    #[test]
    fn test_releases_what_it_holds() {
        let mut pilot = Autopilot::new(GameKind::Shooter, 3);
        let mut down = std::collections::HashSet::new();
        for _ in 0..1000 {
            for event in pilot.events() {
                match event {
                    InputEvent::KeyDown(key) => {
                        down.insert(key);
                    }
                    InputEvent::KeyUp(key) => {
                        assert!(down.remove(&key), "released {:?} without pressing it", key);
                    }
                    InputEvent::Quit => unreachable!(),
                }
            }
        }
        assert_eq!(down.len(), pilot.held().len());
    }

    #[test]
    fn test_showcase_sends_nothing() {
        let mut pilot = Autopilot::new(GameKind::Showcase, 1);
        assert!((0..100).all(|_| pilot.events().is_empty()));
    }

    #[test]
    fn test_frame_times_in_range() {
        let mut pilot = Autopilot::new(GameKind::Lander, 11);
        for _ in 0..2000 {
            let ms = pilot.frame_time_ms();
            assert!((14..600).contains(&ms));
        }
    }
}
