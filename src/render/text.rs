//! Bitmap font text
//!
//! Glyphs come from a grid sheet. A character's cell is its code minus the
//! sheet's `ascii_offset`; characters without a cell leave a gap.

use super::quad::{UvRect, sprite_quad};
use super::vertex::QuadVertex;
use crate::settings::FontConfig;

/// Layout of a font sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontAtlas {
    pub cols: u32,
    pub rows: u32,
    pub ascii_offset: i32,
}

impl FontAtlas {
    pub fn new(cols: u32, rows: u32, ascii_offset: i32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            ascii_offset,
        }
    }

    /// Sheet cell for a character, `None` if the sheet has no such cell
    pub fn glyph_index(&self, ch: char) -> Option<u32> {
        let cell = (ch as i64) - i64::from(self.ascii_offset);
        let cells = i64::from(self.cols) * i64::from(self.rows);
        (0..cells).contains(&cell).then_some(cell as u32)
    }

    /// Vertices for a line of text starting at the origin, six per drawn
    /// glyph. Glyph `i` is centered at x = (size + spacing) * i.
    pub fn layout_text(&self, text: &str, size: f32, spacing: f32) -> Vec<QuadVertex> {
        let mut vertices = Vec::with_capacity(text.len() * 6);
        for (i, ch) in text.chars().enumerate() {
            let Some(index) = self.glyph_index(ch) else {
                continue;
            };
            let offset = (size + spacing) * i as f32;
            let uv = UvRect::from_atlas(index, self.cols, self.rows);
            vertices.extend(sprite_quad(size, size, uv).into_iter().map(|mut v| {
                v.position[0] += offset;
                v
            }));
        }
        vertices
    }
}

impl From<&FontConfig> for FontAtlas {
    fn from(cfg: &FontConfig) -> Self {
        Self::new(cfg.cols, cfg.rows, cfg.ascii_offset)
    }
}

impl Default for FontAtlas {
    fn default() -> Self {
        Self::from(&FontConfig::default())
    }
}
