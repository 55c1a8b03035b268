//! The two render passes and the pipeline that runs them in order.
//!
//! One frame is: fill pass paints solid red into the offscreen target,
//! composite pass draws that texture onto the default framebuffer. Both
//! passes execute start-to-finish on one context; the composite pass can
//! rely on the fill pass's output purely through call order.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::geometry::{QuadBuffer, FILL_QUAD, OVERLAY_QUAD, QUAD_UVS};
use crate::gl::Gl;
use crate::options::DemoOptions;
use crate::shader::compile_program;
use crate::shaders::{
    COMPOSITE_FRAGMENT_SHADER_FIXED_ALPHA, COMPOSITE_FRAGMENT_SHADER_OPAQUE,
    COMPOSITE_VERTEX_SHADER, FILL_FRAGMENT_SHADER, FILL_VERTEX_SHADER,
};
use crate::target::OffscreenTarget;

/// Alpha the original demo composites with.
pub const DEFAULT_ALPHA: f32 = 0.3;

/// How the composite pass treats alpha.
///
/// The upstream revisions of this demo disagreed (alpha baked into the
/// fragment shader in one, no blending at all in another), so the policy
/// is explicit configuration rather than a shader edit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compositing {
    /// No blending; the sampled texel is written as-is.
    Opaque,
    /// Source-alpha blending with the sampled alpha replaced by this
    /// value.
    FixedAlpha(f32),
}

impl Default for Compositing {
    fn default() -> Self {
        Compositing::FixedAlpha(DEFAULT_ALPHA)
    }
}

/// Draws the fullscreen red quad into an [`OffscreenTarget`].
#[derive(Debug)]
struct FillPass<G: Gl> {
    program: G::Program,
    quad: QuadBuffer<G>,
}

impl<G: Gl> FillPass<G> {
    fn new(gl: &G) -> Result<Self, RenderError> {
        let program = compile_program(gl, FILL_VERTEX_SHADER, FILL_FRAGMENT_SHADER)?;

        let Some(position) = gl.attrib_location(program, "aVertexPosition") else {
            gl.delete_program(program);
            return Err(RenderError::MissingAttribute("aVertexPosition".into()));
        };

        let quad = match QuadBuffer::upload(gl, &FILL_QUAD, position) {
            Ok(quad) => quad,
            Err(err) => {
                gl.delete_program(program);
                return Err(err);
            }
        };

        Ok(Self { program, quad })
    }

    fn render(&self, gl: &G, target: &OffscreenTarget<G>) {
        target.bind(gl);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear_color_buffer();
        gl.use_program(Some(self.program));
        self.quad.bind(gl);
        gl.draw_triangle_strip(4);
    }

    fn destroy(self, gl: &G) {
        self.quad.destroy(gl);
        gl.delete_program(self.program);
    }
}

/// Draws the offscreen texture onto the default framebuffer.
#[derive(Debug)]
struct CompositePass<G: Gl> {
    program: G::Program,
    positions: QuadBuffer<G>,
    texcoords: QuadBuffer<G>,
    sampler: G::UniformLocation,
    alpha: Option<(G::UniformLocation, f32)>,
}

impl<G: Gl> CompositePass<G> {
    fn new(gl: &G, mode: Compositing) -> Result<Self, RenderError> {
        let fragment_src = match mode {
            Compositing::Opaque => COMPOSITE_FRAGMENT_SHADER_OPAQUE,
            Compositing::FixedAlpha(_) => COMPOSITE_FRAGMENT_SHADER_FIXED_ALPHA,
        };
        let program = compile_program(gl, COMPOSITE_VERTEX_SHADER, fragment_src)?;

        // From here on every failure releases what came before it.
        let build = || -> Result<Self, RenderError> {
            let position = gl
                .attrib_location(program, "aVertexPosition")
                .ok_or_else(|| RenderError::MissingAttribute("aVertexPosition".into()))?;
            let texcoord = gl
                .attrib_location(program, "aTextureCoord")
                .ok_or_else(|| RenderError::MissingAttribute("aTextureCoord".into()))?;
            let sampler = gl
                .uniform_location(program, "uSampler")
                .ok_or_else(|| RenderError::MissingUniform("uSampler".into()))?;
            let alpha = match mode {
                Compositing::Opaque => None,
                Compositing::FixedAlpha(value) => {
                    let location = gl
                        .uniform_location(program, "uAlpha")
                        .ok_or_else(|| RenderError::MissingUniform("uAlpha".into()))?;
                    Some((location, value))
                }
            };

            let positions = QuadBuffer::upload(gl, &OVERLAY_QUAD, position)?;
            let texcoords = match QuadBuffer::upload(gl, &QUAD_UVS, texcoord) {
                Ok(texcoords) => texcoords,
                Err(err) => {
                    positions.destroy(gl);
                    return Err(err);
                }
            };

            Ok(Self {
                program,
                positions,
                texcoords,
                sampler,
                alpha,
            })
        };

        build().map_err(|err| {
            gl.delete_program(program);
            err
        })
    }

    fn blending(&self) -> bool {
        self.alpha.is_some()
    }

    fn render(&self, gl: &G, canvas_width: u32, canvas_height: u32, texture: G::Texture) {
        gl.bind_framebuffer(None);
        gl.viewport(0, 0, canvas_width as i32, canvas_height as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear_color_buffer();

        gl.use_program(Some(self.program));
        self.positions.bind(gl);
        self.texcoords.bind(gl);

        gl.active_texture_unit(0);
        gl.bind_texture(Some(texture));
        gl.set_uniform_i32(&self.sampler, 0);
        if let Some((location, value)) = &self.alpha {
            gl.set_uniform_f32(location, *value);
        }

        gl.set_alpha_blend(self.blending());
        gl.draw_triangle_strip(4);
    }

    fn destroy(self, gl: &G) {
        self.texcoords.destroy(gl);
        self.positions.destroy(gl);
        gl.delete_program(self.program);
    }
}

/// Everything needed to produce one frame: both passes plus the
/// offscreen target they share.
#[derive(Debug)]
pub struct Pipeline<G: Gl> {
    fill: FillPass<G>,
    composite: CompositePass<G>,
    target: OffscreenTarget<G>,
}

impl<G: Gl> Pipeline<G> {
    /// Compiles both programs, uploads the static geometry, and creates
    /// the offscreen target at the configured size.
    ///
    /// # Errors
    ///
    /// Any compile, link, or allocation failure is fatal; GPU objects
    /// already created for this pipeline are released before returning.
    pub fn new(gl: &G, options: &DemoOptions) -> Result<Self, RenderError> {
        let fill = FillPass::new(gl)?;
        let composite = match CompositePass::new(gl, options.compositing) {
            Ok(composite) => composite,
            Err(err) => {
                fill.destroy(gl);
                return Err(err);
            }
        };
        let target = match OffscreenTarget::new(gl, options.offscreen_width, options.offscreen_height)
        {
            Ok(target) => target,
            Err(err) => {
                composite.destroy(gl);
                fill.destroy(gl);
                return Err(err);
            }
        };

        log::debug!(
            "pipeline ready: {}x{} offscreen target, {:?} compositing",
            target.width(),
            target.height(),
            options.compositing
        );

        Ok(Self {
            fill,
            composite,
            target,
        })
    }

    /// Renders one frame: fill pass into the offscreen target, then
    /// composite pass onto the default framebuffer at the given canvas
    /// size.
    pub fn render(&self, gl: &G, canvas_width: u32, canvas_height: u32) {
        self.fill.render(gl, &self.target);
        self.composite
            .render(gl, canvas_width, canvas_height, self.target.texture());
    }

    /// Current offscreen target dimensions.
    pub fn offscreen_size(&self) -> (u32, u32) {
        (self.target.width(), self.target.height())
    }

    /// Resizes the offscreen target if the dimensions changed; see
    /// [`OffscreenTarget::ensure_size`].
    pub fn resize_offscreen(&mut self, gl: &G, width: u32, height: u32) -> Result<(), RenderError> {
        self.target.ensure_size(gl, width, height)
    }

    /// Releases every GPU object this pipeline created.
    pub fn destroy(self, gl: &G) {
        self.composite.destroy(gl);
        self.fill.destroy(gl);
        self.target.destroy(gl);
    }
}
