//! Configuration management for the zedgen CLI.
//!
//! Sources, later ones winning:
//! 1. Default values
//! 2. Configuration file (YAML), when one is given
//! 3. Environment variables prefixed with `ZEDGEN_`
//!
//! Command-line flags are applied on top by the binary.
//!
//! # Example
//!
//! ```ignore
//! use zedgen_cli::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::load("zedgen.yaml")?;
//! let config = GeneratorConfig::from_env()?;
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use zedgen_compiler::EmitterOptions;

/// Generator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct GeneratorConfig {
    /// Where and how generated files are written
    #[serde(default)]
    pub output: OutputSettings,

    /// Template and generated code settings
    #[serde(default)]
    pub codegen: CodegenSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Output settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OutputSettings {
    /// Directory receiving generated files
    ///
    /// Environment variable: `ZEDGEN_OUTPUT__DIRECTORY`
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Also write a `mod.rs` declaring every generated module
    ///
    /// Environment variable: `ZEDGEN_OUTPUT__MODULE_INDEX`
    #[serde(default)]
    pub module_index: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            module_index: false,
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("zed")
}

/// Code generation settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CodegenSettings {
    /// Handlebars template replacing the built-in one
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Crate path generated code imports runtime types from
    #[serde(default = "default_runtime_crate")]
    pub runtime_crate: String,

    /// Extension of generated files, leading dot included
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

impl Default for CodegenSettings {
    fn default() -> Self {
        Self {
            template: None,
            runtime_crate: default_runtime_crate(),
            file_extension: default_file_extension(),
        }
    }
}

fn default_runtime_crate() -> String {
    EmitterOptions::default().runtime_crate
}

fn default_file_extension() -> String {
    EmitterOptions::default().file_extension
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

fn is_rust_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl GeneratorConfig {
    /// Load configuration from a YAML file with environment variable overrides.
    ///
    /// Environment variables are prefixed with `ZEDGEN_` and use `__` as
    /// separator, e.g. `ZEDGEN_OUTPUT__DIRECTORY=src/authz` overrides
    /// `output.directory`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let config = Config::builder()
            .add_source(Config::try_from(&GeneratorConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml))
            // ZEDGEN_OUTPUT__DIRECTORY -> output.directory
            .add_source(
                Environment::with_prefix("ZEDGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let generator_config: GeneratorConfig = config.try_deserialize()?;
        generator_config.validate()?;

        Ok(generator_config)
    }

    /// Load configuration from defaults and `ZEDGEN_` environment variables.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Config::try_from(&GeneratorConfig::default())?)
            .add_source(
                Environment::with_prefix("ZEDGEN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let generator_config: GeneratorConfig = config.try_deserialize()?;
        generator_config.validate()?;

        Ok(generator_config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.output.directory.as_os_str().is_empty() {
            return Err(ConfigLoadError::Invalid {
                message: "output.directory must not be empty".to_string(),
            });
        }

        // `crate::authz` and `zedgen_authz` are both fine.
        let runtime_crate = self.codegen.runtime_crate.trim();
        if runtime_crate.is_empty() || !runtime_crate.split("::").all(is_rust_identifier) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "codegen.runtime_crate must be a Rust path, got: '{}'",
                    self.codegen.runtime_crate
                ),
            });
        }

        let extension = &self.codegen.file_extension;
        if !extension.starts_with('.') || extension.len() < 2 || extension.contains('/') {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "codegen.file_extension must start with '.', got: '{extension}'"
                ),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "logging.level must be one of: {:?}, got: {}",
                    valid_levels, self.logging.level
                ),
            });
        }

        Ok(())
    }

    /// Emitter options derived from the codegen settings.
    pub fn emitter_options(&self) -> EmitterOptions {
        EmitterOptions {
            runtime_crate: self.codegen.runtime_crate.trim().to_string(),
            file_extension: self.codegen.file_extension.clone(),
        }
    }
}
