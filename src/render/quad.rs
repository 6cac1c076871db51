//! Sprite quads and atlas sub-rectangles

use super::vertex::QuadVertex;

/// Texture-space rectangle, v grows downward (row 0 is the top of the image)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    /// Whole texture
    pub const FULL: UvRect = UvRect {
        u0: 0.0,
        v0: 0.0,
        u1: 1.0,
        v1: 1.0,
    };

    /// Cell `index` of a `cols` x `rows` grid, counted row by row from the top
    /// left. Out-of-range indices are clamped to the last cell.
    pub fn from_atlas(index: u32, cols: u32, rows: u32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let index = index.min(cols * rows - 1);

        let w = 1.0 / cols as f32;
        let h = 1.0 / rows as f32;
        let u0 = (index % cols) as f32 * w;
        let v0 = (index / cols) as f32 * h;
        Self {
            u0,
            v0,
            u1: u0 + w,
            v1: v0 + h,
        }
    }
}

/// Two triangles covering a `width` x `height` box centered on the origin
pub fn sprite_quad(width: f32, height: f32, uv: UvRect) -> [QuadVertex; 6] {
    let (hw, hh) = (width * 0.5, height * 0.5);
    [
        QuadVertex::new(-hw, -hh, uv.u0, uv.v1),
        QuadVertex::new(hw, -hh, uv.u1, uv.v1),
        QuadVertex::new(hw, hh, uv.u1, uv.v0),
        QuadVertex::new(-hw, -hh, uv.u0, uv.v1),
        QuadVertex::new(hw, hh, uv.u1, uv.v0),
        QuadVertex::new(-hw, hh, uv.u0, uv.v0),
    ]
}
