use quad_arcade::autopilot::Autopilot;
use quad_arcade::input::{InputEvent, Key};
use quad_arcade::sim::{EntityKind, Outcome};
use quad_arcade::{ArcadeConfig, GameKind, Session};

/// Play `seconds` of simulated time with the seeded autopilot
fn play(kind: GameKind, seed: u64, seconds: u64) -> Session {
    let mut session = Session::new(kind, &ArcadeConfig::default());
    let mut pilot = Autopilot::new(kind, seed);
    let mut now_ms = 0u64;
    session.frame(0.0);
    while now_ms < seconds * 1000 && session.outcome().is_none() {
        for event in pilot.events() {
            session.handle_event(event);
        }
        now_ms += pilot.frame_time_ms();
        session.frame(now_ms as f64 / 1000.0);
    }
    session
}

/// Feed evenly spaced 60 Hz frames without any input, starting from `now`
fn idle(session: &mut Session, now: &mut f64, frames: u32) {
    for _ in 0..frames {
        *now += 1.0 / 60.0;
        session.frame(*now);
    }
}

#[test]
fn every_game_runs_under_autopilot() {
    for kind in GameKind::ALL {
        let session = play(kind, 42, 20);
        assert!(session.scene().time_ticks > 0, "{kind} never stepped");
        assert!(!session.draw_list().is_empty(), "{kind} drew nothing");
        for entity in &session.scene().entities {
            assert!(entity.pos.is_finite(), "{kind} produced a non-finite position");
        }
    }
}

#[test]
fn same_seed_same_game() {
    for kind in [GameKind::Pong, GameKind::Lander, GameKind::Shooter] {
        let a = play(kind, 9, 15);
        let b = play(kind, 9, 15);
        assert_eq!(a.scene().time_ticks, b.scene().time_ticks);
        assert_eq!(a.outcome(), b.outcome());
        assert_eq!(a.snapshot().expect("snapshot"), b.snapshot().expect("snapshot"));
    }
}

#[test]
fn idle_shooter_gets_caught() {
    let mut session = Session::new(GameKind::Shooter, &ArcadeConfig::default());
    let mut now = 0.0;
    session.frame(now);
    idle(&mut session, &mut now, 600);
    assert_eq!(session.outcome(), Some(Outcome::Defeat));

    // Frozen after the result
    let ticks = session.scene().time_ticks;
    idle(&mut session, &mut now, 60);
    assert_eq!(session.scene().time_ticks, ticks);
    let banner = session.hud().into_iter().map(|line| line.text).collect::<Vec<_>>();
    assert!(banner.iter().any(|text| text == "You Lose"));
}

#[test]
fn showcase_never_ends() {
    let mut session = Session::new(GameKind::Showcase, &ArcadeConfig::default());
    let mut now = 0.0;
    session.frame(now);
    idle(&mut session, &mut now, 1200);
    assert_eq!(session.outcome(), None);
    assert!(session.is_running());
}

#[test]
fn pong_ball_keys_change_the_pool() {
    let mut session = Session::new(GameKind::Pong, &ArcadeConfig::default());
    let mut now = 0.0;
    session.frame(now);
    session.handle_event(InputEvent::KeyDown(Key::Num2));
    session.handle_event(InputEvent::KeyUp(Key::Num2));
    idle(&mut session, &mut now, 2);
    assert_eq!(session.scene().count_active(EntityKind::Ball), 2);

    session.handle_event(InputEvent::KeyDown(Key::Num1));
    session.handle_event(InputEvent::KeyUp(Key::Num1));
    idle(&mut session, &mut now, 2);
    assert_eq!(session.scene().count_active(EntityKind::Ball), 1);
}

#[test]
fn escape_ends_the_session() {
    let mut session = Session::new(GameKind::Lander, &ArcadeConfig::default());
    let mut now = 0.0;
    session.frame(now);
    idle(&mut session, &mut now, 30);
    session.handle_event(InputEvent::KeyDown(Key::Escape));
    assert!(!session.is_running());
    let ticks = session.scene().time_ticks;
    assert!(ticks > 0);
    idle(&mut session, &mut now, 30);
    assert_eq!(session.scene().time_ticks, ticks);
}
