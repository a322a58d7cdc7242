//! zedgen: compile an authorization schema into Rust modules.

use anyhow::{Context, Result};
use clap::Parser;

use zedgen_cli::logging::{init_logging, LoggingConfig};
use zedgen_cli::{generate, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args
        .resolve_config()
        .context("failed to load configuration")?;

    init_logging(LoggingConfig::from(&config.logging));

    generate(&config, &args.schema)
        .with_context(|| format!("failed to generate code from {}", args.schema.display()))?;

    Ok(())
}
