//! Render data handed to an external backend
//!
//! Nothing here talks to a GPU. Each frame the session produces a list of
//! `DrawCommand`s (texture, model matrix, vertices) that a backend can upload
//! and draw as triangle lists, in order.

pub mod quad;
pub mod text;
pub mod vertex;

use glam::{Mat4, Vec3};

pub use quad::{UvRect, sprite_quad};
pub use text::FontAtlas;
pub use vertex::{QuadVertex, as_bytes};

use crate::assets::TextureKey;
use crate::games::HudLine;
use crate::sim::{Entity, Scene};

/// One textured triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub texture: TextureKey,
    pub transform: Mat4,
    pub vertices: Vec<QuadVertex>,
}

/// Sprite for one entity. Animated entities sample their current atlas cell
/// from a `atlas_dim` x `atlas_dim` sheet.
pub fn entity_command(entity: &Entity, atlas_dim: u32) -> DrawCommand {
    let uv = match entity.animation.as_ref().and_then(|a| a.atlas_index()) {
        Some(index) => UvRect::from_atlas(index, atlas_dim, atlas_dim),
        None => UvRect::FULL,
    };
    let extent = entity.extent();
    DrawCommand {
        texture: entity.texture,
        transform: entity.model_transform(),
        vertices: sprite_quad(extent.x, extent.y, uv).to_vec(),
    }
}

/// Draw commands for every active entity, in id order
pub fn draw_list(scene: &Scene, atlas_dim: u32) -> Vec<DrawCommand> {
    scene
        .entities
        .iter()
        .filter(|e| e.active)
        .map(|e| entity_command(e, atlas_dim))
        .collect()
}

/// Draw commands for HUD text lines
pub fn hud_commands(lines: &[HudLine], font: &FontAtlas) -> Vec<DrawCommand> {
    lines
        .iter()
        .map(|line| DrawCommand {
            texture: line.font,
            transform: Mat4::from_translation(Vec3::new(line.origin.x, line.origin.y, 0.0)),
            vertices: font.layout_text(&line.text, line.size, line.spacing),
        })
        .filter(|cmd| !cmd.vertices.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AnimationSet, Animator, EntityKind, Facing, FrameTable};
    use glam::Vec2;

    #[test]
    fn test_inactive_entities_not_drawn() {
        let mut scene = Scene::default();
        scene.spawn(Entity::new(EntityKind::Paddle, Vec2::ZERO, Vec2::new(0.5, 1.5)).with_texture(TextureKey::Paddle));
        scene.spawn(Entity::new(EntityKind::Ball, Vec2::ZERO, Vec2::splat(0.5)).inactive());

        let list = draw_list(&scene, 4);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].texture, TextureKey::Paddle);
        assert_eq!(list[0].vertices.len(), 6);
    }

    #[test]
    fn test_animated_entity_uses_atlas_cell() {
        let animator = Animator::new(AnimationSet::single(FrameTable::new([5])), Facing::Down, 4.0);
        let entity = Entity::new(EntityKind::Player, Vec2::new(1.0, 2.0), Vec2::ONE).with_animation(animator);
        let cmd = entity_command(&entity, 4);
        // Bottom-left corner samples the bottom-left of cell 5
        assert_eq!(cmd.vertices[0].uv, [0.25, 0.5]);
        assert_eq!(cmd.transform.w_axis.truncate(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_hud_text_translated_to_origin() {
        let lines = [HudLine::new("You Win", Vec2::new(-4.0, 0.0), 1.0, 0.05, TextureKey::PixelFont)];
        let cmds = hud_commands(&lines, &FontAtlas::default());
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].vertices.len(), 7 * 6);
        assert_eq!(cmds[0].transform.w_axis.x, -4.0);
    }
}
