//! zedgen-compiler: authorization schema to Rust source compiler
//!
//! Reads a schema made of `definition` blocks declaring relations and
//! permissions, and renders one Rust module per definition exposing the
//! object type, relation and permission names as typed constants.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               zedgen-compiler               │
//! ├─────────────────────────────────────────────┤
//! │  syntax/   - Scanner, comment filter, AST,  │
//! │              recursive-descent parser       │
//! │  model/    - Normalized definitions         │
//! │  codegen/  - Naming rules, template emitter │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! let units = zedgen_compiler::compile(
//!     "definition platform/user { relation owner: platform/user permission view = owner }",
//! )
//! .unwrap();
//! assert_eq!(units[0].file_name, "user_gen.rs");
//! assert!(units[0].content.contains("pub struct User;"));
//! ```

pub mod codegen;
pub mod error;
pub mod model;
pub mod syntax;

use tracing::{debug, info};

pub use codegen::{CodegenError, Emitter, EmitterOptions, GeneratedUnit};
pub use error::{CompileError, CompileResult};
pub use model::{transform, NormalizedDefinition, NormalizedModel, TransformError};
pub use syntax::{parse_schema, Definition, ParseError};

/// Compiles schema text with the built-in template and default options.
pub fn compile(schema: &str) -> CompileResult<Vec<GeneratedUnit>> {
    Compiler::new(EmitterOptions::default())?.compile(schema)
}

/// Runs the full pipeline with a configured emitter.
pub struct Compiler {
    emitter: Emitter,
    module_index: bool,
}

impl Compiler {
    /// Compiler using the built-in template.
    pub fn new(options: EmitterOptions) -> CompileResult<Self> {
        Ok(Self::from_emitter(Emitter::new(options)?))
    }

    /// Compiler using a custom template.
    pub fn with_template(template: &str, options: EmitterOptions) -> CompileResult<Self> {
        Ok(Self::from_emitter(Emitter::with_template(template, options)?))
    }

    fn from_emitter(emitter: Emitter) -> Self {
        Self {
            emitter,
            module_index: false,
        }
    }

    /// Also emit a `mod.rs` declaring every generated module.
    pub fn module_index(mut self, enabled: bool) -> Self {
        self.module_index = enabled;
        self
    }

    /// Parses and normalizes schema text without rendering it.
    pub fn analyze(&self, schema: &str) -> CompileResult<NormalizedModel> {
        let definitions = parse_schema(schema)?;
        debug!(definitions = definitions.len(), "parsed schema");
        Ok(transform(&definitions)?)
    }

    /// Compiles schema text into generated units, in definition name order.
    ///
    /// Either every unit is returned or none is.
    pub fn compile(&self, schema: &str) -> CompileResult<Vec<GeneratedUnit>> {
        let model = self.analyze(schema)?;
        let mut units = self.emitter.emit_all(&model)?;
        if self.module_index {
            let index = self.emitter.emit_index(&units)?;
            units.push(index);
        }
        info!(
            definitions = model.len(),
            files = units.len(),
            "compiled schema"
        );
        Ok(units)
    }
}
