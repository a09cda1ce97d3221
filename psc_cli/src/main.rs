use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use psc_core::{pipeline, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

static DEFAULT_LOG_FILTER: &str = "info";

/// Build the Paris school and public holiday calendar.
#[derive(Debug, Parser)]
pub struct Arguments {
    /// a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// the school calendar extract, overrides the configuration
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// the cleaned dataset, overrides the configuration
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Arguments {
    fn config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("cannot load configuration {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
    let args = Arguments::parse();
    let config = args.config()?;
    let dataset = pipeline::run(&config).with_context(|| {
        format!(
            "cannot build {} from {}",
            config.output.display(),
            config.input.display()
        )
    })?;
    info!(rows = dataset.len(), "done");
    Ok(())
}
