//! Texture configuration and creation.

use crate::error::RenderError;
use crate::gl::{Gl, TextureFilter};

/// Parameters for creating a GPU texture.
///
/// Storage is always RGBA8 with clamp-to-edge wrapping; the demo
/// composites into an 8-bit canvas and never tiles a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Min and mag filter.
    pub filter: TextureFilter,
}

impl TextureConfig {
    /// RGBA8 texture with LINEAR filtering, the configuration every
    /// render target in this demo uses.
    pub fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            filter: TextureFilter::Linear,
        }
    }
}

/// Creates a texture, configures wrapping and filtering, and allocates
/// its storage. Contents are undefined until the first draw into it.
///
/// # Errors
///
/// Returns [`RenderError::ResourceAlloc`] if the context fails to create
/// the texture object.
pub fn create_texture<G: Gl>(gl: &G, config: &TextureConfig) -> Result<G::Texture, RenderError> {
    let texture = gl.create_texture().map_err(RenderError::ResourceAlloc)?;

    gl.bind_texture(Some(texture));
    gl.texture_clamp_to_edge();
    gl.texture_filter(config.filter);
    gl.texture_storage_rgba8(config.width, config.height);
    gl.bind_texture(None);

    Ok(texture)
}
