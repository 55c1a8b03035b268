//! Shader compilation and program linking.
//!
//! Generic over [`Gl`] so the compile/link/cleanup contract is checked in
//! unit tests with the recording double. A rejected shader or program is
//! always deleted before the error is returned; callers never receive a
//! handle they must not use.

use crate::error::RenderError;
use crate::gl::{Gl, ShaderStage};

/// Prepends line numbers to `source` and appends the driver `log`, so a
/// compile error can be read next to the GLSL line it refers to.
///
/// Either argument may be empty.
pub fn annotate_source(source: &str, log: &str) -> String {
    use std::fmt::Write;

    let line_count = source.lines().count();
    let width = line_count.max(1).to_string().len();

    let mut out = String::new();
    for (index, line) in source.lines().enumerate() {
        let _ = writeln!(out, "{:>width$}| {line}", index + 1, width = width);
    }
    if !log.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(log);
    }
    out
}

/// Compiles a single shader stage.
///
/// # Errors
///
/// Returns [`RenderError::Compile`] with the annotated source and driver
/// log if compilation fails; the partially created shader is deleted
/// first.
pub fn compile_shader<G: Gl>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, RenderError> {
    let shader = gl.create_shader(stage).map_err(RenderError::ResourceAlloc)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if gl.shader_compiled(shader) {
        Ok(shader)
    } else {
        let info_log = gl.shader_info_log(shader);
        gl.delete_shader(shader);
        log::error!("{stage} shader failed to compile");
        Err(RenderError::Compile {
            stage,
            log: annotate_source(source, &info_log),
        })
    }
}

/// Links a compiled vertex and fragment shader into a program.
///
/// Both shaders are detached after linking; the program keeps its own
/// copies. Attribute and uniform locations are valid only once this
/// returns `Ok`.
///
/// # Errors
///
/// Returns [`RenderError::Link`] with the driver log if linking fails;
/// the program is deleted first.
pub fn link_program<G: Gl>(
    gl: &G,
    vertex: G::Shader,
    fragment: G::Shader,
) -> Result<G::Program, RenderError> {
    let program = gl.create_program().map_err(RenderError::ResourceAlloc)?;

    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);
    gl.detach_shader(program, vertex);
    gl.detach_shader(program, fragment);

    if gl.program_linked(program) {
        Ok(program)
    } else {
        let info_log = gl.program_info_log(program);
        gl.delete_program(program);
        log::error!("shader program failed to link");
        Err(RenderError::Link(info_log))
    }
}

/// Compiles both stages from source and links them.
///
/// The stage shader handles are deleted once linking has happened,
/// whatever the outcome. If the fragment stage fails to compile, the
/// already-compiled vertex shader is deleted before returning.
pub fn compile_program<G: Gl>(
    gl: &G,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<G::Program, RenderError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_src)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_src) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(vertex);
            return Err(err);
        }
    };

    let result = link_program(gl, vertex, fragment);

    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    result
}
