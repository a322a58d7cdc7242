//! Logging setup for the CLI.
//!
//! Logs go to stderr so generated output and shell pipelines stay clean.
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingSettings;

/// Configuration for structured logging.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Whether to use JSON format (true) or text format (false)
    pub json_format: bool,
    /// The default log level if RUST_LOG is not set
    pub default_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json_format: false,
            default_level: Level::INFO,
        }
    }
}

impl LoggingConfig {
    pub fn json() -> Self {
        Self {
            json_format: true,
            ..Default::default()
        }
    }

    pub fn text() -> Self {
        Self {
            json_format: false,
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }
}

impl From<&LoggingSettings> for LoggingConfig {
    /// Unknown levels fall back to INFO; `GeneratorConfig::validate` rejects them earlier.
    fn from(settings: &LoggingSettings) -> Self {
        let level = settings.level.parse().unwrap_or(Level::INFO);
        let config = if settings.json {
            LoggingConfig::json()
        } else {
            LoggingConfig::text()
        };
        config.with_level(level)
    }
}

/// Installs the global subscriber. Later calls have no effect.
pub fn init_logging(config: LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level.to_string()));

    if config.json_format {
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        );
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(false),
        );
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
