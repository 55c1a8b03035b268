//! Error types for the rendering pipeline.

use thiserror::Error;

use crate::gl::ShaderStage;

/// Errors produced while setting up or driving the pipeline.
///
/// All of these are fatal for the operation that raised them; there is no
/// retry path. Compile and link variants carry the driver's info log.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    /// No WebGL2-capable context could be obtained from the host.
    #[error("WebGL2 context unavailable: {0}")]
    ContextUnavailable(String),

    /// A shader stage failed to compile. The log embeds the annotated
    /// source followed by the driver's message.
    #[error("shader compile error ({stage}):\n{log}")]
    Compile { stage: ShaderStage, log: String },

    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),

    /// A named attribute was not present in a successfully linked program.
    #[error("attribute not found in linked program: {0}")]
    MissingAttribute(String),

    /// A named uniform was not present in a successfully linked program.
    #[error("uniform not found in linked program: {0}")]
    MissingUniform(String),

    /// The context failed to create a GPU object.
    #[error("GPU resource allocation failed: {0}")]
    ResourceAlloc(String),

    /// A framebuffer failed its completeness check.
    #[error("framebuffer incomplete: {0}")]
    FramebufferIncomplete(String),

    /// Width or height was zero when sizing the offscreen target.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,
}
