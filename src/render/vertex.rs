//! Vertex type for textured quads

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl QuadVertex {
    /// Byte stride of one vertex in a buffer
    pub const STRIDE: usize = std::mem::size_of::<QuadVertex>();
    /// Byte offset of `uv` within a vertex
    pub const UV_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }
}

/// View a vertex slice as raw bytes for upload
pub fn as_bytes(vertices: &[QuadVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
