//! Show command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::utils::{load_merged, render, Format, LoadArgs};

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: Format,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let config = load_merged(&args.load)?;
    let tree = config.tree().context("configuration not loaded")?;
    println!("{}", render(tree, args.format)?);
    Ok(())
}
