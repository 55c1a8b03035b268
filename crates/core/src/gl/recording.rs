//! A [`Gl`] double that records every call instead of driving hardware.
//!
//! `RecordingGl` hands out incrementing `u32` handles and appends a
//! [`Call`] for each operation, so tests can assert on exact call
//! sequences. Failures that only a driver can produce (compile errors,
//! link errors, incomplete framebuffers, missing attributes) are
//! injectable, which makes every error path in the pipeline testable
//! without a GPU.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use super::{Gl, ShaderStage, TextureFilter};

/// One recorded GL operation.
///
/// Uniform locations are represented by the uniform's name, so a test can
/// assert `SetUniformI32 { location: "uSampler", value: 0 }` directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader { stage: ShaderStage, shader: u32 },
    ShaderSource { shader: u32, source: String },
    CompileShader { shader: u32 },
    DeleteShader { shader: u32 },
    CreateProgram { program: u32 },
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram { program: u32 },
    DeleteProgram { program: u32 },
    UseProgram { program: Option<u32> },
    SetUniformI32 { location: String, value: i32 },
    SetUniformF32 { location: String, value: f32 },
    CreateBuffer { buffer: u32 },
    BindArrayBuffer { buffer: Option<u32> },
    ArrayBufferData { data: Vec<f32> },
    Vec2AttribPointer { location: u32 },
    DeleteBuffer { buffer: u32 },
    CreateTexture { texture: u32 },
    BindTexture { texture: Option<u32> },
    ActiveTextureUnit { unit: u32 },
    TextureStorageRgba8 { width: u32, height: u32 },
    TextureFilter { filter: TextureFilter },
    TextureClampToEdge,
    DeleteTexture { texture: u32 },
    CreateFramebuffer { framebuffer: u32 },
    BindFramebuffer { framebuffer: Option<u32> },
    AttachColorTexture { texture: u32 },
    CheckFramebufferComplete,
    DeleteFramebuffer { framebuffer: u32 },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    ClearColor { r: f32, g: f32, b: f32, a: f32 },
    ClearColorBuffer,
    SetAlphaBlend { enabled: bool },
    DrawTriangleStrip { vertex_count: i32 },
}

/// Call-recording [`Gl`] implementation for tests.
#[derive(Debug, Default)]
pub struct RecordingGl {
    calls: RefCell<Vec<Call>>,
    next_handle: Cell<u32>,
    shader_stages: RefCell<HashMap<u32, ShaderStage>>,
    compile_failures: RefCell<HashMap<ShaderStage, String>>,
    link_failure: RefCell<Option<String>>,
    framebuffer_incomplete: Cell<bool>,
    hidden_names: RefCell<HashSet<String>>,
    attrib_names: RefCell<Vec<String>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every shader of `stage` report a failed compile with `log`.
    pub fn fail_compile(&self, stage: ShaderStage, log: &str) {
        self.compile_failures
            .borrow_mut()
            .insert(stage, log.to_owned());
    }

    /// Makes every program report a failed link with `log`.
    pub fn fail_link(&self, log: &str) {
        *self.link_failure.borrow_mut() = Some(log.to_owned());
    }

    /// Controls what `framebuffer_complete` reports from now on.
    pub fn set_framebuffer_incomplete(&self, incomplete: bool) {
        self.framebuffer_incomplete.set(incomplete);
    }

    /// Makes the named attribute or uniform resolve to `None`.
    pub fn hide_name(&self, name: &str) {
        self.hidden_names.borrow_mut().insert(name.to_owned());
    }

    /// Snapshot of every call recorded so far, in issue order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of create-object calls recorded so far.
    pub fn created_objects(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::CreateShader { .. }
                        | Call::CreateProgram { .. }
                        | Call::CreateBuffer { .. }
                        | Call::CreateTexture { .. }
                        | Call::CreateFramebuffer { .. }
                )
            })
            .count()
    }

    /// Number of delete-object calls recorded so far.
    pub fn deleted_objects(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::DeleteShader { .. }
                        | Call::DeleteProgram { .. }
                        | Call::DeleteBuffer { .. }
                        | Call::DeleteTexture { .. }
                        | Call::DeleteFramebuffer { .. }
                )
            })
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc_handle(&self) -> u32 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        handle
    }
}

impl Gl for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Texture = u32;
    type Framebuffer = u32;
    type UniformLocation = String;

    fn create_shader(&self, stage: ShaderStage) -> Result<Self::Shader, String> {
        let shader = self.alloc_handle();
        self.shader_stages.borrow_mut().insert(shader, stage);
        self.record(Call::CreateShader { stage, shader });
        Ok(shader)
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        self.record(Call::ShaderSource {
            shader,
            source: source.to_owned(),
        });
    }

    fn compile_shader(&self, shader: Self::Shader) {
        self.record(Call::CompileShader { shader });
    }

    fn shader_compiled(&self, shader: Self::Shader) -> bool {
        let stage = self.shader_stages.borrow().get(&shader).copied();
        match stage {
            Some(stage) => !self.compile_failures.borrow().contains_key(&stage),
            None => false,
        }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        let stage = self.shader_stages.borrow().get(&shader).copied();
        stage
            .and_then(|stage| self.compile_failures.borrow().get(&stage).cloned())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: Self::Shader) {
        self.record(Call::DeleteShader { shader });
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        let program = self.alloc_handle();
        self.record(Call::CreateProgram { program });
        Ok(program)
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        self.record(Call::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        self.record(Call::DetachShader { program, shader });
    }

    fn link_program(&self, program: Self::Program) {
        self.record(Call::LinkProgram { program });
    }

    fn program_linked(&self, _program: Self::Program) -> bool {
        self.link_failure.borrow().is_none()
    }

    fn program_info_log(&self, _program: Self::Program) -> String {
        self.link_failure.borrow().clone().unwrap_or_default()
    }

    fn delete_program(&self, program: Self::Program) {
        self.record(Call::DeleteProgram { program });
    }

    fn use_program(&self, program: Option<Self::Program>) {
        self.record(Call::UseProgram { program });
    }

    fn attrib_location(&self, _program: Self::Program, name: &str) -> Option<u32> {
        if self.hidden_names.borrow().contains(name) {
            return None;
        }
        let mut names = self.attrib_names.borrow_mut();
        let index = match names.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                names.push(name.to_owned());
                names.len() - 1
            }
        };
        Some(index as u32)
    }

    fn uniform_location(
        &self,
        _program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        if self.hidden_names.borrow().contains(name) {
            None
        } else {
            Some(name.to_owned())
        }
    }

    fn set_uniform_i32(&self, location: &Self::UniformLocation, value: i32) {
        self.record(Call::SetUniformI32 {
            location: location.clone(),
            value,
        });
    }

    fn set_uniform_f32(&self, location: &Self::UniformLocation, value: f32) {
        self.record(Call::SetUniformF32 {
            location: location.clone(),
            value,
        });
    }

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        let buffer = self.alloc_handle();
        self.record(Call::CreateBuffer { buffer });
        Ok(buffer)
    }

    fn bind_array_buffer(&self, buffer: Option<Self::Buffer>) {
        self.record(Call::BindArrayBuffer { buffer });
    }

    fn array_buffer_data(&self, data: &[f32]) {
        self.record(Call::ArrayBufferData {
            data: data.to_vec(),
        });
    }

    fn vec2_attrib_pointer(&self, location: u32) {
        self.record(Call::Vec2AttribPointer { location });
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        self.record(Call::DeleteBuffer { buffer });
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        let texture = self.alloc_handle();
        self.record(Call::CreateTexture { texture });
        Ok(texture)
    }

    fn bind_texture(&self, texture: Option<Self::Texture>) {
        self.record(Call::BindTexture { texture });
    }

    fn active_texture_unit(&self, unit: u32) {
        self.record(Call::ActiveTextureUnit { unit });
    }

    fn texture_storage_rgba8(&self, width: u32, height: u32) {
        self.record(Call::TextureStorageRgba8 { width, height });
    }

    fn texture_filter(&self, filter: TextureFilter) {
        self.record(Call::TextureFilter { filter });
    }

    fn texture_clamp_to_edge(&self) {
        self.record(Call::TextureClampToEdge);
    }

    fn delete_texture(&self, texture: Self::Texture) {
        self.record(Call::DeleteTexture { texture });
    }

    fn create_framebuffer(&self) -> Result<Self::Framebuffer, String> {
        let framebuffer = self.alloc_handle();
        self.record(Call::CreateFramebuffer { framebuffer });
        Ok(framebuffer)
    }

    fn bind_framebuffer(&self, framebuffer: Option<Self::Framebuffer>) {
        self.record(Call::BindFramebuffer { framebuffer });
    }

    fn attach_color_texture(&self, texture: Self::Texture) {
        self.record(Call::AttachColorTexture { texture });
    }

    fn framebuffer_complete(&self) -> bool {
        self.record(Call::CheckFramebufferComplete);
        !self.framebuffer_incomplete.get()
    }

    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer) {
        self.record(Call::DeleteFramebuffer { framebuffer });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor { r, g, b, a });
    }

    fn clear_color_buffer(&self) {
        self.record(Call::ClearColorBuffer);
    }

    fn set_alpha_blend(&self, enabled: bool) {
        self.record(Call::SetAlphaBlend { enabled });
    }

    fn draw_triangle_strip(&self, vertex_count: i32) {
        self.record(Call::DrawTriangleStrip { vertex_count });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_increment_across_object_kinds() {
        let gl = RecordingGl::new();
        let shader = gl.create_shader(ShaderStage::Vertex).unwrap();
        let program = gl.create_program().unwrap();
        let buffer = gl.create_buffer().unwrap();
        assert_eq!((shader, program, buffer), (1, 2, 3));
    }

    #[test]
    fn calls_are_recorded_in_issue_order() {
        let gl = RecordingGl::new();
        let texture = gl.create_texture().unwrap();
        gl.bind_texture(Some(texture));
        gl.texture_storage_rgba8(640, 480);
        assert_eq!(
            gl.calls(),
            vec![
                Call::CreateTexture { texture },
                Call::BindTexture {
                    texture: Some(texture)
                },
                Call::TextureStorageRgba8 {
                    width: 640,
                    height: 480
                },
            ]
        );
    }

    #[test]
    fn compile_failure_is_scoped_to_the_stage() {
        let gl = RecordingGl::new();
        gl.fail_compile(ShaderStage::Fragment, "bad fragment");
        let vert = gl.create_shader(ShaderStage::Vertex).unwrap();
        let frag = gl.create_shader(ShaderStage::Fragment).unwrap();
        assert!(gl.shader_compiled(vert));
        assert!(!gl.shader_compiled(frag));
        assert_eq!(gl.shader_info_log(frag), "bad fragment");
    }

    #[test]
    fn link_failure_reports_its_log() {
        let gl = RecordingGl::new();
        gl.fail_link("varying mismatch");
        let program = gl.create_program().unwrap();
        assert!(!gl.program_linked(program));
        assert_eq!(gl.program_info_log(program), "varying mismatch");
    }

    #[test]
    fn attrib_locations_are_stable_per_name() {
        let gl = RecordingGl::new();
        let program = gl.create_program().unwrap();
        let a = gl.attrib_location(program, "aVertexPosition").unwrap();
        let b = gl.attrib_location(program, "aTextureCoord").unwrap();
        assert_ne!(a, b);
        assert_eq!(gl.attrib_location(program, "aVertexPosition"), Some(a));
    }

    #[test]
    fn hidden_names_resolve_to_none() {
        let gl = RecordingGl::new();
        gl.hide_name("aTextureCoord");
        let program = gl.create_program().unwrap();
        assert_eq!(gl.attrib_location(program, "aTextureCoord"), None);
        assert_eq!(gl.uniform_location(program, "aTextureCoord"), None);
        assert!(gl.uniform_location(program, "uSampler").is_some());
    }

    #[test]
    fn framebuffer_completeness_is_switchable() {
        let gl = RecordingGl::new();
        assert!(gl.framebuffer_complete());
        gl.set_framebuffer_incomplete(true);
        assert!(!gl.framebuffer_complete());
    }

    #[test]
    fn object_counters_track_creates_and_deletes() {
        let gl = RecordingGl::new();
        let texture = gl.create_texture().unwrap();
        let buffer = gl.create_buffer().unwrap();
        gl.delete_texture(texture);
        assert_eq!(gl.created_objects(), 2);
        assert_eq!(gl.deleted_objects(), 1);
        gl.delete_buffer(buffer);
        assert_eq!(gl.deleted_objects(), 2);
    }
}
