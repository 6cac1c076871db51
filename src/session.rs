//! Main-loop context
//!
//! A `Session` owns everything one running game needs: the scene, the game
//! rules, the fixed-timestep clock and the input state. The host calls
//! `handle_event` for every platform event and `frame` once per display frame,
//! then draws `draw_list()`.

use crate::games::{Game, GameKind, HudLine};
use crate::input::{InputEvent, Key, KeyState, TickInput};
use crate::render::{self, DrawCommand, FontAtlas};
use crate::settings::ArcadeConfig;
use crate::sim::{Bounds, FixedTimestep, Outcome, Scene, step_entities};

pub struct Session {
    scene: Scene,
    game: Game,
    clock: FixedTimestep,
    keys: KeyState,
    /// One-shot presses waiting for the next step
    pending: TickInput,
    running: bool,
    paused: bool,
    font: FontAtlas,
    atlas_dim: u32,
}

impl Session {
    pub fn new(kind: GameKind, config: &ArcadeConfig) -> Self {
        let mut scene = Scene::new(Bounds::centered(config.world.half_width, config.world.half_height));
        let game = Game::setup(kind, &mut scene, config);
        let ts = &config.timestep;
        log::info!("Starting {} with {} entities", kind.title(), scene.entities.len());

        Self {
            scene,
            game,
            clock: FixedTimestep::new(ts.hz, ts.max_substeps, ts.max_frame_time),
            keys: KeyState::new(),
            pending: TickInput::default(),
            running: true,
            paused: false,
            font: FontAtlas::from(&config.font),
            atlas_dim: config.animation.atlas_dim,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn clock(&self) -> &FixedTimestep {
        &self.clock
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.game.outcome()
    }

    /// Feed one platform event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Q) | InputEvent::KeyDown(Key::Escape) => {
                if self.running {
                    log::info!("Quit requested");
                }
                self.running = false;
            }
            InputEvent::KeyDown(key) => {
                self.keys.press(key);
                self.pending.note_press(key);
            }
            InputEvent::KeyUp(key) => self.keys.release(key),
        }
    }

    /// Advance to wall-clock time `now` (seconds). Runs as many fixed steps
    /// as the clock hands out and returns how many were simulated.
    pub fn frame(&mut self, now: f64) -> u32 {
        let steps = self.clock.advance(now);
        if !self.running {
            return 0;
        }

        let mut simulated = 0;
        for _ in 0..steps {
            let input = self.next_input();
            // Clear one-shot inputs after processing
            self.pending.clear_one_shots();
            if self.step(&input) {
                simulated += 1;
            }
        }
        simulated
    }

    /// Run one fixed step with the given input. Returns false if the
    /// simulation is paused or the game is already over.
    pub fn step(&mut self, input: &TickInput) -> bool {
        if input.pause {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
        if self.paused || self.game.outcome().is_some() {
            return false;
        }

        let dt = self.clock.dt();
        self.game.apply_input(&mut self.scene, input, dt);
        step_entities(&mut self.scene, dt);
        self.game.after_step(&mut self.scene, dt);
        true
    }

    /// Held keys plus any pending one-shot presses
    fn next_input(&self) -> TickInput {
        TickInput {
            toggle_ai: self.pending.toggle_ai,
            ball_count: self.pending.ball_count,
            pause: self.pending.pause,
            ..TickInput::from_keys(&self.keys)
        }
    }

    pub fn hud(&self) -> Vec<HudLine> {
        self.game.hud()
    }

    /// Sprites in id order, then HUD text on top
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let mut commands = render::draw_list(&self.scene, self.atlas_dim);
        commands.extend(render::hud_commands(&self.hud(), &self.font));
        commands
    }

    /// Scene state as JSON
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pong() -> Session {
        Session::new(GameKind::Pong, &ArcadeConfig::default())
    }

    #[test]
    fn test_first_frame_runs_nothing() {
        let mut session = pong();
        assert_eq!(session.frame(100.0), 0);
        assert_eq!(session.frame(100.0 + 1.0 / 30.0), 2);
        assert_eq!(session.scene().time_ticks, 2);
    }

    #[test]
    fn test_quit_stops_simulation() {
        let mut session = pong();
        session.frame(0.0);
        session.handle_event(InputEvent::Quit);
        assert!(!session.is_running());
        assert_eq!(session.frame(0.1), 0);
        assert_eq!(session.scene().time_ticks, 0);
    }

    #[test]
    fn test_one_shot_applies_once() {
        let mut session = pong();
        session.frame(0.0);
        session.handle_event(InputEvent::KeyDown(Key::T));
        session.handle_event(InputEvent::KeyUp(Key::T));
        session.frame(0.05);
        match session.game() {
            Game::Pong(pong) => assert!(pong.ai_enabled()),
            _ => unreachable!(),
        }
        session.frame(0.1);
        match session.game() {
            Game::Pong(pong) => assert!(pong.ai_enabled()),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_one_shot_waits_for_a_step() {
        let mut session = pong();
        session.frame(0.0);
        session.handle_event(InputEvent::KeyDown(Key::Num3));
        // Too short for a step: the press stays pending
        assert_eq!(session.frame(0.001), 0);
        session.frame(0.02);
        assert_eq!(session.scene().count_active(crate::sim::EntityKind::Ball), 3);
    }

    #[test]
    fn test_pause_freezes_scene() {
        let mut session = pong();
        session.frame(0.0);
        session.handle_event(InputEvent::KeyDown(Key::P));
        assert_eq!(session.frame(0.1), 0);
        assert!(session.is_paused());
        let ticks = session.scene().time_ticks;
        assert_eq!(session.frame(0.2), 0);
        assert_eq!(session.scene().time_ticks, ticks);

        session.handle_event(InputEvent::KeyDown(Key::P));
        assert!(session.frame(0.3) > 0);
        assert!(!session.is_paused());
    }

    #[test]
    fn test_draw_list_and_snapshot() {
        let session = pong();
        // Two paddles and one ball
        assert_eq!(session.draw_list().len(), 3);
        let json = session.snapshot().expect("snapshot");
        let scene: Scene = serde_json::from_str(&json).expect("parse");
        assert_eq!(scene.entities.len(), session.scene().entities.len());
    }
}
