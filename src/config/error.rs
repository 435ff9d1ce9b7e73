//! Error taxonomy for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fatal loading failures. Leaf-coercion misses and absent paths are
/// not errors; they recover to the raw string and `None` respectively.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed reading config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config file {} must contain a mapping of profile names", path.display())]
    InvalidDocument { path: PathBuf },
}
