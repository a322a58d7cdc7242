//! zedgen-cli: command-line front end for zedgen-compiler
//!
//! Loads configuration, reads the schema (and an optional custom template),
//! compiles it and writes the generated files. Nothing is written unless
//! every definition compiled.

pub mod config;
pub mod logging;
pub mod writer;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;
use tracing::info;
use zedgen_compiler::{CompileError, Compiler};

use crate::config::{ConfigLoadError, GeneratorConfig};
use crate::writer::{write_units, WriteError};

/// Generate typed Rust constants from an authorization schema.
#[derive(Debug, Clone, Parser)]
#[command(name = "zedgen", version, about)]
pub struct Args {
    /// Schema file to compile
    pub schema: PathBuf,

    /// Output directory for generated files
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Handlebars template replacing the built-in one
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Also write a mod.rs declaring every generated module
    #[arg(long)]
    pub module_index: bool,
}

impl Args {
    /// Configuration from `--config` (or the environment), with flags applied on top.
    pub fn resolve_config(&self) -> Result<GeneratorConfig, ConfigLoadError> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)?,
            None => GeneratorConfig::from_env()?,
        };
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
        }
        if let Some(template) = &self.template {
            config.codegen.template = Some(template.clone());
        }
        if self.module_index {
            config.output.module_index = true;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Failures of one generator run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to read schema {path}: {source}")]
    ReadSchema {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read template {path}: {source}")]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Compiles `schema_path` and writes the result as `config` directs.
///
/// Returns the paths written.
pub fn generate(
    config: &GeneratorConfig,
    schema_path: &Path,
) -> Result<Vec<PathBuf>, GenerateError> {
    let schema = fs::read_to_string(schema_path).map_err(|source| GenerateError::ReadSchema {
        path: schema_path.to_path_buf(),
        source,
    })?;

    let compiler = match &config.codegen.template {
        Some(path) => {
            let template = fs::read_to_string(path).map_err(|source| GenerateError::ReadTemplate {
                path: path.clone(),
                source,
            })?;
            Compiler::with_template(&template, config.emitter_options())?
        }
        None => Compiler::new(config.emitter_options())?,
    }
    .module_index(config.output.module_index);

    let units = compiler.compile(&schema)?;
    let written = write_units(&config.output.directory, &units)?;
    info!(
        schema = %schema_path.display(),
        output = %config.output.directory.display(),
        files = written.len(),
        "generated sources"
    );
    Ok(written)
}
