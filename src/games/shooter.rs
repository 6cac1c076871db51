//! Butterfly & Skulls
//!
//! The player steers an animated butterfly with the arrow keys and fires with
//! space. Three skulls hunt it with different steering policies: a timed
//! square patrol, a vertical sweep that breaks off to chase when the player
//! comes close, and a straight chase. Shooting every skull wins; being reached
//! by one loses.

use glam::Vec2;

use super::HudLine;
use crate::assets::TextureKey;
use crate::input::TickInput;
use crate::settings::{ArcadeConfig, ShooterConfig};
use crate::sim::{
    AnimationSet, Animator, Axis, BoundPolicy, BoundedPatrol, Entity, EntityId, EntityKind, Facing, FrameTable,
    Outcome, Patrol, Scene, Steering, is_nearby,
};

/// Butterfly sheet cells per facing
fn butterfly_animation() -> AnimationSet {
    AnimationSet::directional(
        FrameTable::new([1, 5, 9, 13]),
        FrameTable::new([3, 7, 11, 15]),
        FrameTable::new([2, 6, 10, 14]),
        FrameTable::new([0, 4, 8, 12]),
    )
}

#[derive(Debug, Clone)]
pub struct Shooter {
    player: EntityId,
    skulls: Vec<EntityId>,
    /// Bullet pool, lowest id first
    bullets: Vec<EntityId>,
    /// Seconds until the next shot is allowed
    cooldown: f32,
    cfg: ShooterConfig,
    outcome: Option<Outcome>,
}

impl Shooter {
    pub fn setup(scene: &mut Scene, config: &ArcadeConfig) -> Self {
        let cfg = config.shooter.clone();
        let size = Vec2::splat(cfg.sprite_size);

        let player = scene.spawn(
            Entity::new(EntityKind::Player, cfg.player_start, size)
                .with_speed(cfg.player_speed)
                .with_texture(TextureKey::ButterflySheet)
                .with_animation(Animator::new(
                    butterfly_animation(),
                    Facing::Down,
                    config.animation.frames_per_second,
                )),
        );

        let skull = |pos: Vec2, speed: f32, steering: Steering| {
            Entity::new(EntityKind::Chaser, pos, size)
                .with_speed(speed)
                .with_texture(TextureKey::Skull)
                .with_steering(steering, Some(player))
        };
        let patroller = scene.spawn(skull(
            cfg.patrol_start,
            cfg.patrol_speed,
            Steering::Patrol(Patrol::square(cfg.patrol_interval)),
        ));
        let sentry = scene.spawn(
            skull(
                cfg.sentry_start,
                cfg.sentry_speed,
                Steering::BoundedPatrol(
                    BoundedPatrol::sweep(Axis::Y, -1.0)
                        .with_chase(cfg.sentry_chase_threshold, cfg.sentry_release_margin),
                ),
            )
            .with_bounds(BoundPolicy::ClampCenter),
        );
        let hunter = scene.spawn(skull(cfg.hunter_start, cfg.hunter_speed, Steering::DirectChase));

        let bullets = (0..cfg.bullet_pool)
            .map(|_| {
                scene.spawn(
                    Entity::new(EntityKind::Projectile, Vec2::ZERO, Vec2::splat(cfg.bullet_size))
                        .with_texture(TextureKey::Platform)
                        .inactive(),
                )
            })
            .collect();

        Self {
            player,
            skulls: vec![patroller, sentry, hunter],
            bullets,
            cooldown: 0.0,
            cfg,
            outcome: None,
        }
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn skulls(&self) -> &[EntityId] {
        &self.skulls
    }

    pub fn bullets(&self) -> &[EntityId] {
        &self.bullets
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn apply_input(&mut self, scene: &mut Scene, input: &TickInput, dt: f32) {
        if self.outcome.is_some() {
            return;
        }

        let Some(player) = scene.get_mut(self.player) else {
            return;
        };
        player.intent = input.primary.normalize_or_zero();
        // Idle faces down
        let facing = Facing::from_direction(input.primary).unwrap_or(Facing::Down);
        if let Some(animation) = player.animation.as_mut() {
            animation.set_facing(facing);
        }
        let muzzle = player.pos + self.cfg.bullet_offset;

        self.cooldown = (self.cooldown - dt).max(0.0);
        if input.fire && self.cooldown <= 0.0 {
            self.fire(scene, muzzle);
        }
    }

    fn fire(&mut self, scene: &mut Scene, muzzle: Vec2) {
        let vel = self.cfg.bullet_direction.normalize_or_zero() * self.cfg.bullet_speed;
        let free = self.bullets.iter().copied().find(|&id| !scene.is_active(id));
        match free.and_then(|id| scene.get_mut(id)) {
            Some(bullet) => {
                bullet.activate(muzzle, vel);
                self.cooldown = self.cfg.fire_cooldown;
            }
            None => log::debug!("bullet pool exhausted, shot dropped"),
        }
    }

    /// Bullet hits, then the win and lose checks
    pub fn after_step(&mut self, scene: &mut Scene) {
        if self.outcome.is_some() {
            return;
        }
        let radius = self.cfg.hit_radius;

        for &bullet_id in &self.bullets {
            let Some(bullet_pos) = scene.get(bullet_id).filter(|b| b.active).map(|b| b.pos) else {
                continue;
            };
            let hit = self
                .skulls
                .iter()
                .copied()
                .find(|&skull| scene.get(skull).is_some_and(|s| s.active && is_nearby(bullet_pos, s.pos, radius)));
            if let Some(skull) = hit {
                log::info!("Skull {:?} destroyed", skull);
                if let Some(s) = scene.get_mut(skull) {
                    s.deactivate();
                }
                if let Some(b) = scene.get_mut(bullet_id) {
                    b.deactivate();
                }
            }
        }

        if self.skulls.iter().all(|&id| !scene.is_active(id)) {
            self.finish(scene, Outcome::Victory);
            return;
        }

        let Some(player_pos) = scene.get(self.player).filter(|p| p.active).map(|p| p.pos) else {
            return;
        };
        let caught = self
            .skulls
            .iter()
            .any(|&id| scene.get(id).is_some_and(|s| s.active && is_nearby(player_pos, s.pos, radius)));
        if caught {
            if let Some(player) = scene.get_mut(self.player) {
                player.deactivate();
            }
            self.finish(scene, Outcome::Defeat);
        }
    }

    fn finish(&mut self, scene: &Scene, outcome: Outcome) {
        log::info!(
            "{} after {} steps",
            outcome.message(),
            scene.time_ticks
        );
        self.outcome = Some(outcome);
    }

    pub fn hud(&self) -> Vec<HudLine> {
        match self.outcome {
            Some(outcome) => vec![HudLine::new(
                outcome.message(),
                Vec2::new(-4.0, 0.0),
                1.0,
                0.05,
                TextureKey::PixelFont,
            )],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{PatrolMode, step_entities};

    fn new_game() -> (Scene, Shooter) {
        let mut scene = Scene::default();
        let shooter = Shooter::setup(&mut scene, &ArcadeConfig::default());
        (scene, shooter)
    }

    fn step(scene: &mut Scene, shooter: &mut Shooter, input: &TickInput) {
        shooter.apply_input(scene, input, SIM_DT);
        step_entities(scene, SIM_DT);
        shooter.after_step(scene);
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_setup_layout() {
        let (scene, shooter) = new_game();
        assert_eq!(scene.count_active(EntityKind::Chaser), 3);
        assert_eq!(scene.count_active(EntityKind::Projectile), 0);
        assert_eq!(shooter.bullets().len(), 16);
        let player = scene.get(shooter.player()).expect("player");
        assert_eq!(player.animation.as_ref().and_then(|a| a.atlas_index()), Some(0));
    }

    #[test]
    fn test_facing_follows_input() {
        let (mut scene, mut shooter) = new_game();
        let input = TickInput {
            primary: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        step(&mut scene, &mut shooter, &input);
        let player = scene.get(shooter.player()).expect("player");
        assert_eq!(player.animation.as_ref().map(|a| a.facing()), Some(Facing::Left));
        assert!(player.pos.x < 0.0);

        // Down outranks left when both are held
        let input = TickInput {
            primary: Vec2::new(-1.0, -1.0),
            ..Default::default()
        };
        step(&mut scene, &mut shooter, &input);
        let player = scene.get(shooter.player()).expect("player");
        assert_eq!(player.animation.as_ref().map(|a| a.facing()), Some(Facing::Down));
    }

    #[test]
    fn test_idle_player_faces_down() {
        let (mut scene, mut shooter) = new_game();
        let input = TickInput {
            primary: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        step(&mut scene, &mut shooter, &input);
        let player = scene.get(shooter.player()).expect("player");
        assert_eq!(player.animation.as_ref().map(|a| a.facing()), Some(Facing::Right));

        step(&mut scene, &mut shooter, &TickInput::default());
        let player = scene.get(shooter.player()).expect("player");
        assert_eq!(player.animation.as_ref().map(|a| a.facing()), Some(Facing::Down));
        assert!(player.animation.as_ref().and_then(|a| a.atlas_index()).is_some());
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let (mut scene, mut shooter) = new_game();
        step(&mut scene, &mut shooter, &fire());
        assert_eq!(scene.count_active(EntityKind::Projectile), 1);
        let bullet = scene.get(shooter.bullets()[0]).expect("bullet");
        assert!((bullet.pos.x - (-1.0 - 2.0 * SIM_DT)).abs() < 1e-5);
        assert_eq!(bullet.vel, Vec2::new(-2.0, 0.0));

        step(&mut scene, &mut shooter, &fire());
        assert_eq!(scene.count_active(EntityKind::Projectile), 1);

        for _ in 0..20 {
            step(&mut scene, &mut shooter, &fire());
        }
        assert!(scene.count_active(EntityKind::Projectile) >= 2);
    }

    #[test]
    fn test_bullet_destroys_skull_and_is_consumed() {
        let (mut scene, mut shooter) = new_game();
        let hunter = shooter.skulls()[2];
        // Park the hunter right in front of the muzzle
        if let Some(s) = scene.get_mut(hunter) {
            s.pos = Vec2::new(-1.2, 0.0);
            s.steering = None;
        }
        step(&mut scene, &mut shooter, &fire());
        assert!(!scene.is_active(hunter));
        assert_eq!(scene.count_active(EntityKind::Projectile), 0);
        assert!(shooter.outcome().is_none());
    }

    #[test]
    fn test_all_skulls_down_is_victory() {
        let (mut scene, mut shooter) = new_game();
        for &id in &shooter.skulls()[..2] {
            if let Some(s) = scene.get_mut(id) {
                s.deactivate();
            }
        }
        let last = shooter.skulls()[2];
        if let Some(s) = scene.get_mut(last) {
            s.pos = Vec2::new(-1.1, 0.0);
            s.steering = None;
        }
        step(&mut scene, &mut shooter, &fire());
        assert_eq!(shooter.outcome(), Some(Outcome::Victory));
        assert_eq!(shooter.hud()[0].text, "You Win");
    }

    #[test]
    fn test_caught_by_skull_is_defeat() {
        let (mut scene, mut shooter) = new_game();
        let hunter = shooter.skulls()[2];
        if let Some(s) = scene.get_mut(hunter) {
            s.pos = Vec2::new(0.3, 0.0);
        }
        step(&mut scene, &mut shooter, &TickInput::default());
        assert_eq!(shooter.outcome(), Some(Outcome::Defeat));
        assert!(!scene.is_active(shooter.player()));

        // Frozen: no more shots
        step(&mut scene, &mut shooter, &fire());
        assert_eq!(scene.count_active(EntityKind::Projectile), 0);
    }

    #[test]
    fn test_hunter_closes_in() {
        let (mut scene, mut shooter) = new_game();
        let hunter = shooter.skulls()[2];
        let before = scene.position(hunter).expect("hunter").length();
        step(&mut scene, &mut shooter, &TickInput::default());
        let after = scene.position(hunter).expect("hunter").length();
        assert!((before - after - 1.5 * SIM_DT).abs() < 1e-4);
    }

    #[test]
    fn test_sentry_chases_when_close() {
        let (mut scene, mut shooter) = new_game();
        let sentry = shooter.skulls()[1];
        if let Some(player) = scene.get_mut(shooter.player()) {
            player.pos = Vec2::new(-4.5, 2.0);
        }
        step(&mut scene, &mut shooter, &TickInput::default());
        let sentry = scene.get(sentry).expect("sentry");
        match &sentry.steering {
            Some(Steering::BoundedPatrol(patrol)) => assert_eq!(patrol.mode(), PatrolMode::Chase),
            other => panic!("unexpected steering {:?}", other),
        }
    }
}
