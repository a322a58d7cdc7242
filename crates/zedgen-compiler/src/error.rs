//! Compile error types.

use thiserror::Error;

use crate::codegen::CodegenError;
use crate::model::TransformError;
use crate::syntax::ParseError;

/// Any failure of one compile run.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The schema text is not well formed.
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    /// The definitions parsed but cannot be normalized.
    #[error("schema error: {0}")]
    Transform(#[from] TransformError),

    /// Code emission failed.
    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    /// Line and column of the failure, when it has one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            CompileError::Parse(e) => Some(e.position()),
            CompileError::Transform(TransformError::InvalidName { line, column, .. }) => {
                Some((*line, *column))
            }
            _ => None,
        }
    }
}

/// Result type for compile operations.
pub type CompileResult<T> = Result<T, CompileError>;
