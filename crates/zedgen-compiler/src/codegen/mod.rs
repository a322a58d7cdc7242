//! Code generation: naming rules and the template-driven emitter.

mod emitter;
pub mod naming;

pub use emitter::{CodegenError, CodegenResult, Emitter, EmitterOptions, DEFAULT_TEMPLATE};

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Canonical path of the source definition; empty for the module index.
    pub definition: String,
    /// File name relative to the output directory.
    pub file_name: String,
    pub content: String,
}
