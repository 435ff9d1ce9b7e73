//! layerconf: layered YAML configuration with dotted-path lookup
//!
//! Merges a `default` profile, an active named profile, environment
//! variables, and `--key=value` argument tokens into one nested tree, in
//! that order of increasing precedence. String leaves are reparsed as
//! JSON so `"8080"` becomes a number and `"true"` a boolean, falling
//! back to the raw string.
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use layerconf::LayeredConfig;
//!
//! let mut config = LayeredConfig::new("app.yaml");
//! config.load()?;
//! let port = config.get("server.port").and_then(|value| value.as_i64());
//! # let _ = port;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;

pub use config::{ConfigError, LayeredConfig, DEFAULT_PROFILE, PROFILE_VAR};
pub use serde_json::Value;
