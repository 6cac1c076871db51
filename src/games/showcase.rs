//! Rose garden showcase
//!
//! No input and no ending. A rose walks a square while spinning and pulsing
//! in size; a butterfly follows it around.

use glam::Vec2;

use crate::assets::TextureKey;
use crate::settings::{ArcadeConfig, ShowcaseConfig};
use crate::sim::{Entity, EntityId, EntityKind, Motion, Patrol, Scene, Steering};

#[derive(Debug, Clone)]
pub struct Showcase {
    rose: EntityId,
    butterfly: EntityId,
    growing: bool,
    /// Steps since the pulse last changed direction
    pulse_counter: u32,
    cfg: ShowcaseConfig,
}

impl Showcase {
    pub fn setup(scene: &mut Scene, config: &ArcadeConfig) -> Self {
        let cfg = config.showcase.clone();

        // Scenery that walks a fixed route
        let rose = scene.spawn(
            Entity::new(EntityKind::Static, cfg.rose_start, Vec2::ONE)
                .with_motion(Motion::Steered)
                .passable()
                .with_speed(cfg.rose_speed)
                .with_texture(TextureKey::Rose)
                .with_steering(Steering::Patrol(Patrol::square(cfg.rose_leg_time)), None),
        );
        let butterfly = scene.spawn(
            Entity::new(EntityKind::Chaser, cfg.butterfly_start, Vec2::ONE)
                .with_speed(cfg.butterfly_speed)
                .with_texture(TextureKey::Butterfly)
                .with_steering(Steering::DirectChase, Some(rose)),
        );

        Self {
            rose,
            butterfly,
            growing: true,
            pulse_counter: 0,
            cfg,
        }
    }

    pub fn rose(&self) -> EntityId {
        self.rose
    }

    pub fn butterfly(&self) -> EntityId {
        self.butterfly
    }

    #[inline]
    pub fn growing(&self) -> bool {
        self.growing
    }

    /// Spin and pulse the rose
    pub fn after_step(&mut self, scene: &mut Scene, dt: f32) {
        self.pulse_counter += 1;
        if self.pulse_counter >= self.cfg.pulse_steps {
            self.growing = !self.growing;
            self.pulse_counter = 0;
        }

        let factor = if self.growing {
            self.cfg.grow_factor
        } else {
            self.cfg.shrink_factor
        };
        if let Some(rose) = scene.get_mut(self.rose) {
            rose.rotation += self.cfg.spin_rate * dt;
            rose.scale *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::step_entities;

    fn run(steps: usize) -> (Scene, Showcase) {
        let mut scene = Scene::default();
        let mut showcase = Showcase::setup(&mut scene, &ArcadeConfig::default());
        for _ in 0..steps {
            step_entities(&mut scene, SIM_DT);
            showcase.after_step(&mut scene, SIM_DT);
        }
        (scene, showcase)
    }

    #[test]
    fn test_rose_is_walking_scenery() {
        let mut scene = Scene::default();
        let showcase = Showcase::setup(&mut scene, &ArcadeConfig::default());
        assert_eq!(scene.count_active(EntityKind::Chaser), 1);
        let rose = scene.get(showcase.rose()).expect("rose");
        assert_eq!(rose.kind, EntityKind::Static);
        assert_eq!(rose.motion, Motion::Steered);
        assert!(!rose.solid);
        assert!(rose.target.is_none());
    }

    #[test]
    fn test_rose_walks_right_first() {
        let (scene, showcase) = run(60);
        let rose = scene.get(showcase.rose()).expect("rose");
        assert!((rose.pos.x - (-1.0)).abs() < 1e-3);
        assert!((rose.pos.y - (-2.5)).abs() < 1e-5);
        assert!((rose.rotation - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_pulse_flips_every_forty_steps() {
        let (scene, showcase) = run(39);
        assert!(showcase.growing());
        let scale = scene.get(showcase.rose()).expect("rose").scale.x;
        assert!((scale - 1.01f32.powi(39)).abs() < 1e-3);

        let (_, showcase) = run(40);
        assert!(!showcase.growing());
        let (_, showcase) = run(80);
        assert!(showcase.growing());
    }

    #[test]
    fn test_butterfly_follows_rose() {
        let mut scene = Scene::default();
        let mut showcase = Showcase::setup(&mut scene, &ArcadeConfig::default());
        let (rose_id, butterfly_id) = (showcase.rose(), showcase.butterfly());
        let gap = |scene: &Scene| {
            let rose = scene.position(rose_id).expect("rose");
            let butterfly = scene.position(butterfly_id).expect("butterfly");
            rose.distance(butterfly)
        };
        let start = gap(&scene);
        for _ in 0..120 {
            step_entities(&mut scene, SIM_DT);
            showcase.after_step(&mut scene, SIM_DT);
        }
        assert!(gap(&scene) < start);
    }
}
