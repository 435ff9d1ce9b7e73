//! Configuration loading and merging
//!
//! Handles loading from the profile document, environment variables, and
//! override flags with proper precedence (Flags > Env > Profile > Default).

pub mod error;
pub mod loader;
pub mod merge;

pub use error::{ConfigError, Result};
pub use loader::{LayeredConfig, DEFAULT_PROFILE, PROFILE_VAR};
pub use merge::{lookup, merge_layers};
