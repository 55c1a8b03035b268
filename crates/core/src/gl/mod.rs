//! The GPU interface the demo renders through.
//!
//! [`Gl`] names only the operations this pipeline actually issues
//! (object creation, binding, shader compile/link, state setup, and the
//! triangle-strip draw), with associated handle types so the same code
//! drives a real `glow::Context` or the call-recording double used in
//! tests.
//!
//! The real backend is implemented on `glow::Context`; [`recording`]
//! provides `RecordingGl`, a test double that records calls.

use std::fmt;

mod glow_backend;
pub mod recording;

/// Pipeline stage a shader is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Stable lowercase name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Min/mag filter applied to a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Linear,
    Nearest,
}

/// The subset of a WebGL2-class context this demo needs.
///
/// Handles are opaque associated types. All operations are issued on one
/// logical context from one thread; ordering between passes is guaranteed
/// by sequential call order alone.
///
/// Fallible operations (object creation) return `Err` with a
/// driver-provided message. Status queries (`shader_compiled`,
/// `program_linked`, `framebuffer_complete`) pair with the corresponding
/// info-log accessors for failure reporting.
pub trait Gl {
    type Shader: Copy + PartialEq + fmt::Debug;
    type Program: Copy + PartialEq + fmt::Debug;
    type Buffer: Copy + PartialEq + fmt::Debug;
    type Texture: Copy + PartialEq + fmt::Debug;
    type Framebuffer: Copy + PartialEq + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    // Shaders.
    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compiled(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    // Programs.
    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_linked(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);
    /// `None` unbinds the current program.
    fn use_program(&self, program: Option<Self::Program>);
    /// Only meaningful after a successful link.
    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    /// Only meaningful after a successful link.
    fn uniform_location(&self, program: Self::Program, name: &str)
        -> Option<Self::UniformLocation>;
    fn set_uniform_i32(&self, location: &Self::UniformLocation, value: i32);
    fn set_uniform_f32(&self, location: &Self::UniformLocation, value: f32);

    // Vertex buffers. The demo only ever uses the array-buffer binding
    // point with tightly packed vec2 float attributes.
    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>);
    /// Uploads `data` to the bound array buffer as static geometry.
    fn array_buffer_data(&self, data: &[f32]);
    /// Enables `location` and points it at the bound array buffer as a
    /// tightly packed float vec2.
    fn vec2_attrib_pointer(&self, location: u32);
    fn delete_buffer(&self, buffer: Self::Buffer);

    // Textures. 2D only, one target.
    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn bind_texture(&self, texture: Option<Self::Texture>);
    fn active_texture_unit(&self, unit: u32);
    /// Allocates level-0 RGBA8 storage for the bound texture, contents
    /// undefined.
    fn texture_storage_rgba8(&self, width: u32, height: u32);
    /// Sets min and mag filter for the bound texture.
    fn texture_filter(&self, filter: TextureFilter);
    /// Sets both wrap axes of the bound texture to clamp-to-edge.
    fn texture_clamp_to_edge(&self);
    fn delete_texture(&self, texture: Self::Texture);

    // Framebuffers. `None` binds the default framebuffer (the canvas).
    fn create_framebuffer(&self) -> Result<Self::Framebuffer, String>;
    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>);
    /// Attaches `texture` as color attachment 0 of the bound framebuffer.
    fn attach_color_texture(&self, texture: Self::Texture);
    fn framebuffer_complete(&self) -> bool;
    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer);

    // Raster state and draws.
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    /// Enables source-alpha / one-minus-source-alpha blending, or
    /// disables blending entirely.
    fn set_alpha_blend(&self, enabled: bool);
    fn draw_triangle_strip(&self, vertex_count: i32);
}
