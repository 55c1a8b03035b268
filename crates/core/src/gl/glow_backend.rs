//! [`Gl`] implementation for a live `glow::Context`.
//!
//! Thin delegation: each method maps to one or two raw GL calls with the
//! constants this demo uses (RGBA8 storage, array-buffer binding point,
//! color attachment 0). glow exposes raw GL as unsafe; this module is
//! the only place in the crate allowed to use it.

use glow::HasContext;

use super::{Gl, ShaderStage, TextureFilter};

fn stage_enum(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn filter_enum(filter: TextureFilter) -> u32 {
    match filter {
        TextureFilter::Linear => glow::LINEAR,
        TextureFilter::Nearest => glow::NEAREST,
    }
}

// SAFETY: glow wraps raw GL calls as unsafe. Every handle passed to these
// methods was obtained from the corresponding create_* call on the same
// context, and all enum arguments are valid GL constants.
#[allow(unsafe_code)]
impl Gl for glow::Context {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type Texture = glow::Texture;
    type Framebuffer = glow::Framebuffer;
    type UniformLocation = glow::UniformLocation;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage_enum(stage)) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compiled(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_linked(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_attrib_location(program, name) }
    }

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn set_uniform_i32(&self, location: &Self::UniformLocation, value: i32) {
        unsafe { self.uniform_1_i32(Some(location), value) }
    }

    fn set_uniform_f32(&self, location: &Self::UniformLocation, value: f32) {
        unsafe { self.uniform_1_f32(Some(location), value) }
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        unsafe { self.bind_buffer(glow::ARRAY_BUFFER, buffer) }
    }

    fn array_buffer_data(&self, data: &[f32]) {
        unsafe {
            self.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            );
        }
    }

    fn vec2_attrib_pointer(&self, location: u32) {
        unsafe {
            self.enable_vertex_attrib_array(location);
            self.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, 0, 0);
        }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { HasContext::create_texture(self) }
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        unsafe { HasContext::bind_texture(self, glow::TEXTURE_2D, texture) }
    }

    fn active_texture_unit(&self, unit: u32) {
        unsafe { self.active_texture(glow::TEXTURE0 + unit) }
    }

    fn texture_storage_rgba8(&self, width: u32, height: u32) {
        unsafe {
            self.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None),
            );
        }
    }

    fn texture_filter(&self, filter: TextureFilter) {
        let value = filter_enum(filter) as i32;
        unsafe {
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, value);
            self.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, value);
        }
    }

    fn texture_clamp_to_edge(&self) {
        unsafe {
            self.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            self.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
        }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { HasContext::delete_texture(self, texture) }
    }

    fn create_framebuffer(&self) -> Result<Self::Framebuffer, String> {
        unsafe { HasContext::create_framebuffer(self) }
    }

    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>) {
        unsafe { HasContext::bind_framebuffer(self, glow::FRAMEBUFFER, framebuffer) }
    }

    fn attach_color_texture(&self, texture: Self::Texture) {
        unsafe {
            self.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );
        }
    }

    fn framebuffer_complete(&self) -> bool {
        unsafe { self.check_framebuffer_status(glow::FRAMEBUFFER) == glow::FRAMEBUFFER_COMPLETE }
    }

    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer) {
        unsafe { HasContext::delete_framebuffer(self, framebuffer) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn clear_color_buffer(&self) {
        unsafe { self.clear(glow::COLOR_BUFFER_BIT) }
    }

    fn set_alpha_blend(&self, enabled: bool) {
        unsafe {
            if enabled {
                self.enable(glow::BLEND);
                self.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            } else {
                self.disable(glow::BLEND);
            }
        }
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        unsafe { self.draw_arrays(glow::TRIANGLE_STRIP, 0, vertex_count) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_enum_maps_to_gl_constants() {
        assert_eq!(stage_enum(ShaderStage::Vertex), glow::VERTEX_SHADER);
        assert_eq!(stage_enum(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    }

    #[test]
    fn filter_enum_maps_to_gl_constants() {
        assert_eq!(filter_enum(TextureFilter::Linear), glow::LINEAR);
        assert_eq!(filter_enum(TextureFilter::Nearest), glow::NEAREST);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn backend_round_trips_against_live_context() {
        // Would test: create/compile/link/draw against a real context
        // (e.g. an EGL/osmesa headless setup).
    }
}
