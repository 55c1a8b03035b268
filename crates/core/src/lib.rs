#![deny(unsafe_code)]
//! Core rendering logic for the quadblend demo.
//!
//! The demo renders a solid red quad into an offscreen framebuffer-backed
//! texture, then composites that texture onto the visible canvas with a
//! configurable alpha policy. Everything is generic over the [`gl::Gl`]
//! trait: the real backend wraps a `glow::Context`, and tests drive the
//! same code through a call-recording double
//! ([`gl::recording::RecordingGl`]).
//!
//! Module overview:
//!
//! - [`gl`] -- the GPU interface trait, glow backend, and test double.
//! - [`shader`] -- shader compilation, program linking, error annotation.
//! - [`texture`] / [`target`] -- texture creation and the offscreen
//!   framebuffer+texture pair.
//! - [`geometry`] / [`shaders`] -- the static quads and GLSL sources.
//! - [`pipeline`] -- the fill and composite passes.
//! - [`options`] / [`error`] -- configuration and the error taxonomy.

pub mod error;
pub mod geometry;
pub mod gl;
pub mod options;
pub mod pipeline;
pub mod shader;
pub mod shaders;
pub mod target;
pub mod texture;

pub use error::RenderError;
pub use gl::{Gl, ShaderStage, TextureFilter};
pub use options::DemoOptions;
pub use pipeline::{Compositing, Pipeline};
pub use shader::{compile_program, compile_shader, link_program};
pub use target::OffscreenTarget;
pub use texture::TextureConfig;
