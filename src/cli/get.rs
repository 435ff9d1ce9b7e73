//! Get command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{load_merged, render, Format, LoadArgs};

#[derive(Args)]
pub struct GetArgs {
    /// Dotted path to look up (empty for the whole tree)
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    #[command(flatten)]
    pub load: LoadArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: Format,
}

pub fn run(args: GetArgs) -> Result<()> {
    let config = load_merged(&args.load)?;
    let Some(value) = config.get(&args.path) else {
        anyhow::bail!("no value at path '{}'", args.path);
    };
    println!("{}", render(value, args.format)?);
    Ok(())
}
