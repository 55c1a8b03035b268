//! Static quad geometry for both passes.
//!
//! Four vertices in triangle-strip order: bottom-left, bottom-right,
//! top-left, top-right. Each quad is uploaded once at pipeline setup and
//! never mutated.

use glam::Vec2;

use crate::error::RenderError;
use crate::gl::Gl;

/// Clip-space quad covering the full viewport, drawn by the fill pass.
pub const FILL_QUAD: [Vec2; 4] = [
    Vec2::new(-1.0, -1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// Centered half-size quad the composite pass draws onto the canvas.
pub const OVERLAY_QUAD: [Vec2; 4] = [
    Vec2::new(-0.5, -0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(-0.5, 0.5),
    Vec2::new(0.5, 0.5),
];

/// Texture coordinates parallel to the quad vertices, spanning [0, 1]².
pub const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

fn flatten(corners: &[Vec2; 4]) -> [f32; 8] {
    let mut out = [0.0; 8];
    for (index, corner) in corners.iter().enumerate() {
        out[2 * index] = corner.x;
        out[2 * index + 1] = corner.y;
    }
    out
}

/// One static vertex buffer feeding one vec2 attribute.
#[derive(Debug)]
pub struct QuadBuffer<G: Gl> {
    buffer: G::Buffer,
    attrib: u32,
}

impl<G: Gl> QuadBuffer<G> {
    /// Creates the buffer and uploads `corners` with static-draw usage.
    pub fn upload(gl: &G, corners: &[Vec2; 4], attrib: u32) -> Result<Self, RenderError> {
        let buffer = gl.create_buffer().map_err(RenderError::ResourceAlloc)?;
        gl.bind_array_buffer(Some(buffer));
        gl.array_buffer_data(&flatten(corners));
        gl.bind_array_buffer(None);
        Ok(Self { buffer, attrib })
    }

    /// Binds the buffer and points the attribute at it. An attribute
    /// pointer captures whichever buffer is bound when it is specified,
    /// so the pointer is re-specified on every bind.
    pub fn bind(&self, gl: &G) {
        gl.bind_array_buffer(Some(self.buffer));
        gl.vec2_attrib_pointer(self.attrib);
    }

    pub fn destroy(self, gl: &G) {
        gl.delete_buffer(self.buffer);
    }
}
