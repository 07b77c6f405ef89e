//! Domain-level error taxonomy for ctxprobe.

use std::path::PathBuf;

/// Errors produced while building and running external tool invocations.
#[derive(Debug, thiserror::Error)]
pub enum CtxprobeError {
    /// The prompt was empty after trimming; there is nothing to send.
    #[error("prompt is empty")]
    EmptyPrompt,

    /// The claude binary could not be resolved on the search path.
    #[error("claude binary not found on PATH")]
    BinaryNotFound,

    /// The tool started but the invocation did not succeed.
    #[error("claude invocation failed: {detail}")]
    ProcessFailure { detail: String },

    /// The target document was missing before orchestration began.
    #[error("target document not found: {0}")]
    MissingTarget(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ctxprobe operations.
pub type Result<T> = std::result::Result<T, CtxprobeError>;
