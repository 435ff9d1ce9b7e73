//! Shared CLI plumbing for commands that load a merged view.

use crate::config::LayeredConfig;
use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;

/// Options shared by `get` and `show`.
#[derive(Args)]
pub struct LoadArgs {
    /// Path to the YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Active profile (overrides the LAYERCONF_PROFILE environment variable)
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Load this dotenv file instead of discovering `.env` in the working directory
    #[arg(long, value_name = "FILE")]
    pub dotenv: Option<PathBuf>,

    /// Override flags applied last, e.g. `-- --server.port=9090 --dry-run`
    #[arg(last = true, value_name = "OVERRIDES")]
    pub overrides: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

/// Build and load a [`LayeredConfig`] from shared options. Override
/// tokens are handed over verbatim; the rest of our own argv was already
/// consumed by clap and must not be re-parsed as overrides.
pub fn load_merged(args: &LoadArgs) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::new(&args.config).args(args.overrides.clone());
    if let Some(name) = &args.profile {
        config = config.profile(name.clone());
    }
    if let Some(path) = &args.dotenv {
        config = config.dotenv_path(path);
    }
    config.load()?;
    Ok(config)
}

pub fn render(value: &Value, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string_pretty(value)?,
        Format::Yaml => serde_yaml::to_string(value)?,
    })
}
