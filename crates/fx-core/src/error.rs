use crate::gl::ShaderStage;
use thiserror::Error;

/// Failures of the render engine. None of them is fatal to the host page:
/// callers log and fall back to not rendering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("graphics context unavailable")]
    ContextUnavailable,

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("could not allocate {0}")]
    ResourceAllocation(&'static str),

    #[error("graphics context lost")]
    ContextLost,
}
