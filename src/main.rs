//! layerconf: inspect layered YAML configuration
//!
//! Command-line front end over the layerconf library: load a profile
//! document, merge environment variables and override flags over it, and
//! print values by dotted path.

use anyhow::Result;

fn main() -> Result<()> {
    layerconf::cli::run()
}
