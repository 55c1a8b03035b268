//! Offscreen render target: a framebuffer with one color texture.

use crate::error::RenderError;
use crate::gl::Gl;
use crate::texture::{create_texture, TextureConfig};

/// A framebuffer-backed texture the fill pass renders into and the
/// composite pass samples from.
///
/// The target is single-buffered and reused; a draw into it simply
/// overwrites the previous contents. Created once, optionally resized,
/// and released with [`destroy`](Self::destroy) — GL objects cannot be
/// deleted without the context, so `Drop` can only warn about a leak.
#[derive(Debug)]
pub struct OffscreenTarget<G: Gl> {
    framebuffer: G::Framebuffer,
    texture: G::Texture,
    width: u32,
    height: u32,
    released: bool,
}

impl<G: Gl> OffscreenTarget<G> {
    /// Creates the texture, attaches it as the framebuffer's color
    /// attachment, and verifies completeness.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions, failed object creation, or
    /// an incomplete framebuffer. Nothing is left allocated on failure.
    pub fn new(gl: &G, width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions);
        }

        let texture = create_texture(gl, &TextureConfig::rgba8(width, height))?;
        let framebuffer = match gl.create_framebuffer() {
            Ok(framebuffer) => framebuffer,
            Err(err) => {
                gl.delete_texture(texture);
                return Err(RenderError::ResourceAlloc(err));
            }
        };

        gl.bind_framebuffer(Some(framebuffer));
        gl.attach_color_texture(texture);
        let complete = gl.framebuffer_complete();
        gl.bind_framebuffer(None);

        if !complete {
            gl.delete_framebuffer(framebuffer);
            gl.delete_texture(texture);
            return Err(RenderError::FramebufferIncomplete(format!(
                "{width}x{height} color target"
            )));
        }

        Ok(Self {
            framebuffer,
            texture,
            width,
            height,
            released: false,
        })
    }

    /// Binds the framebuffer as the draw target and sets the viewport to
    /// the target's pixel dimensions.
    pub fn bind(&self, gl: &G) {
        gl.bind_framebuffer(Some(self.framebuffer));
        gl.viewport(0, 0, self.width as i32, self.height as i32);
    }

    /// The color texture, for sampling in a later pass.
    pub fn texture(&self) -> G::Texture {
        self.texture
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates the texture storage if the requested dimensions differ
    /// from the current ones. A texture and its framebuffer attachment
    /// are independent objects, so the attachment is re-established after
    /// every reallocation. Old contents are not preserved.
    ///
    /// With matching dimensions this issues no GL calls.
    ///
    /// # Errors
    ///
    /// Returns an error for zero dimensions or an incomplete framebuffer
    /// after re-attachment; the previous texture is restored as the
    /// attachment in the latter case and the target stays usable at its
    /// old size.
    pub fn ensure_size(&mut self, gl: &G, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions);
        }
        if width == self.width && height == self.height {
            return Ok(());
        }

        let new_texture = create_texture(gl, &TextureConfig::rgba8(width, height))?;

        gl.bind_framebuffer(Some(self.framebuffer));
        gl.attach_color_texture(new_texture);
        let complete = gl.framebuffer_complete();

        if !complete {
            gl.attach_color_texture(self.texture);
            gl.bind_framebuffer(None);
            gl.delete_texture(new_texture);
            return Err(RenderError::FramebufferIncomplete(format!(
                "after resize to {width}x{height}"
            )));
        }

        gl.bind_framebuffer(None);
        gl.delete_texture(self.texture);

        log::debug!(
            "offscreen target resized {}x{} -> {width}x{height}",
            self.width,
            self.height
        );

        self.texture = new_texture;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Deletes the framebuffer and texture.
    pub fn destroy(mut self, gl: &G) {
        gl.delete_framebuffer(self.framebuffer);
        gl.delete_texture(self.texture);
        self.released = true;
    }
}

impl<G: Gl> Drop for OffscreenTarget<G> {
    fn drop(&mut self) {
        if !self.released {
            log::warn!(
                "offscreen target ({}x{}) dropped without destroy; GPU objects leak",
                self.width,
                self.height
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingGl};

    #[test]
    fn new_attaches_and_verifies_before_returning() {
        let gl = RecordingGl::new();
        let target = OffscreenTarget::new(&gl, 640, 480).unwrap();
        assert_eq!((target.width(), target.height()), (640, 480));

        let calls = gl.calls();
        let attach = calls
            .iter()
            .position(|c| matches!(c, Call::AttachColorTexture { .. }))
            .expect("texture never attached");
        let check = calls
            .iter()
            .position(|c| *c == Call::CheckFramebufferComplete)
            .expect("completeness never checked");
        assert!(attach < check, "bad order in {calls:?}");

        target.destroy(&gl);
    }

    #[test]
    fn new_rejects_zero_dimensions_without_allocating() {
        let gl = RecordingGl::new();
        let err = OffscreenTarget::new(&gl, 0, 480).unwrap_err();
        assert!(matches!(err, RenderError::InvalidDimensions));
        assert_eq!(gl.created_objects(), 0);
    }

    #[test]
    fn incomplete_framebuffer_releases_everything() {
        let gl = RecordingGl::new();
        gl.set_framebuffer_incomplete(true);
        let err = OffscreenTarget::new(&gl, 64, 64).unwrap_err();
        assert!(matches!(err, RenderError::FramebufferIncomplete(_)));
        assert_eq!(gl.created_objects(), 2);
        assert_eq!(gl.deleted_objects(), 2);
    }

    #[test]
    fn bind_sets_framebuffer_and_viewport() {
        let gl = RecordingGl::new();
        let target = OffscreenTarget::new(&gl, 640, 480).unwrap();
        let framebuffer = gl
            .calls()
            .iter()
            .find_map(|c| match c {
                Call::CreateFramebuffer { framebuffer } => Some(*framebuffer),
                _ => None,
            })
            .expect("framebuffer never created");

        let before = gl.calls().len();
        target.bind(&gl);
        assert_eq!(
            gl.calls()[before..],
            [
                Call::BindFramebuffer {
                    framebuffer: Some(framebuffer),
                },
                Call::Viewport {
                    x: 0,
                    y: 0,
                    width: 640,
                    height: 480,
                },
            ]
        );
        target.destroy(&gl);
    }

    #[test]
    fn ensure_size_with_same_dimensions_is_a_no_op() {
        let gl = RecordingGl::new();
        let mut target = OffscreenTarget::new(&gl, 640, 480).unwrap();
        let before = gl.calls().len();
        target.ensure_size(&gl, 640, 480).unwrap();
        assert_eq!(gl.calls().len(), before);
        target.destroy(&gl);
    }

    #[test]
    fn ensure_size_reallocates_and_reattaches() {
        let gl = RecordingGl::new();
        let mut target = OffscreenTarget::new(&gl, 640, 480).unwrap();
        let old_texture = target.texture();

        target.ensure_size(&gl, 800, 600).unwrap();
        assert_eq!((target.width(), target.height()), (800, 600));
        assert_ne!(target.texture(), old_texture);

        let calls = gl.calls();
        assert!(calls.contains(&Call::TextureStorageRgba8 {
            width: 800,
            height: 600
        }));
        assert!(calls.contains(&Call::AttachColorTexture {
            texture: target.texture()
        }));
        assert!(calls.contains(&Call::DeleteTexture {
            texture: old_texture
        }));
        target.destroy(&gl);
    }

    #[test]
    fn failed_resize_restores_the_old_attachment() {
        let gl = RecordingGl::new();
        let mut target = OffscreenTarget::new(&gl, 640, 480).unwrap();
        let old_texture = target.texture();

        gl.set_framebuffer_incomplete(true);
        let err = target.ensure_size(&gl, 800, 600).unwrap_err();
        assert!(matches!(err, RenderError::FramebufferIncomplete(_)));

        // Old texture re-attached, new one deleted, dimensions unchanged.
        let calls = gl.calls();
        let reattach = calls
            .iter()
            .rposition(|c| {
                *c == Call::AttachColorTexture {
                    texture: old_texture,
                }
            })
            .expect("old texture never re-attached");
        let failed_attach = calls
            .iter()
            .position(|c| {
                matches!(c, Call::AttachColorTexture { texture } if *texture != old_texture)
            })
            .expect("new texture never attached");
        assert!(failed_attach < reattach);
        assert_eq!((target.width(), target.height()), (640, 480));
        assert_eq!(target.texture(), old_texture);

        gl.set_framebuffer_incomplete(false);
        target.destroy(&gl);
    }

    #[test]
    fn destroy_releases_both_objects() {
        let gl = RecordingGl::new();
        let target = OffscreenTarget::new(&gl, 64, 64).unwrap();
        target.destroy(&gl);
        assert_eq!(gl.created_objects(), gl.deleted_objects());
    }

    #[test]
    #[ignore = "requires GL context"]
    fn pixels_read_back_solid_red_after_fill() {
        // Would test: after the fill pass, every pixel of the 640x480
        // target reads (1.0, 0.0, 0.0, 1.0).
    }
}
