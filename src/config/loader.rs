//! Profile document loading and the layered configuration store.

use crate::config::error::{ConfigError, Result};
use crate::config::merge;
use serde::Deserialize;
use serde_json::Value;
use serde_yaml::Value as YamlValue;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the active profile.
pub const PROFILE_VAR: &str = "LAYERCONF_PROFILE";

/// Profile assumed when none is selected.
pub const DEFAULT_PROFILE: &str = "dev";

/// Top-level shape of the configuration document: the `default` body
/// plus one body per named profile.
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    #[serde(default)]
    default: Option<YamlValue>,

    #[serde(flatten)]
    profiles: BTreeMap<String, YamlValue>,
}

/// Layered configuration store.
///
/// Merges, in increasing precedence: the `default` profile, the active
/// profile, environment variables, and `--key=value` argument tokens.
/// After [`load`](Self::load), values are addressed by dotted path.
///
/// By default the active profile comes from [`PROFILE_VAR`], the
/// environment is the process environment (with an optional dotenv file
/// applied first), and the tokens are the process arguments. Each of
/// those ambient inputs can be replaced through the builder methods,
/// which makes loads fully deterministic.
#[derive(Debug)]
pub struct LayeredConfig {
    file: PathBuf,
    profile: Option<String>,
    env_snapshot: Option<Vec<(String, String)>>,
    args: Option<Vec<String>>,
    dotenv_path: Option<PathBuf>,
    tree: Option<Value>,
}

impl LayeredConfig {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            profile: None,
            env_snapshot: None,
            args: None,
            dotenv_path: None,
            tree: None,
        }
    }

    /// Fix the active profile instead of consulting [`PROFILE_VAR`].
    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profile = Some(name.into());
        self
    }

    /// Use an explicit environment snapshot. The process environment is
    /// never read and the dotenv step is skipped.
    pub fn env_snapshot(mut self, vars: Vec<(String, String)>) -> Self {
        self.env_snapshot = Some(vars);
        self
    }

    /// Use an explicit token list instead of the process arguments.
    pub fn args(mut self, args: Vec<String>) -> Self {
        self.args = Some(args);
        self
    }

    /// Load this dotenv file instead of discovering `.env` in the
    /// working directory.
    pub fn dotenv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dotenv_path = Some(path.into());
        self
    }

    /// Read, parse, and merge all layers. Idempotent: once loaded,
    /// further calls return immediately without touching the
    /// filesystem, environment, or arguments.
    pub fn load(&mut self) -> Result<&mut Self> {
        if self.tree.is_some() {
            return Ok(self);
        }

        let env_vars = match &self.env_snapshot {
            Some(vars) => vars.clone(),
            None => {
                self.apply_dotenv();
                env::vars().collect()
            }
        };

        let content = fs::read_to_string(&self.file).map_err(|source| ConfigError::Io {
            path: self.file.clone(),
            source,
        })?;
        let document = parse_document(&content, &self.file)?;

        let profile = self.profile.clone().unwrap_or_else(|| {
            env_vars
                .iter()
                .find(|(name, _)| name == PROFILE_VAR)
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
        });

        let active = document.profiles.get(&profile);
        if active.is_none() {
            tracing::debug!(
                "profile '{}' not present in {}, merging default only",
                profile,
                self.file.display()
            );
        }

        let args = match &self.args {
            Some(args) => args.clone(),
            None => env::args().skip(1).collect(),
        };

        self.tree = Some(merge::merge_layers(
            document.default.as_ref(),
            active,
            &env_vars,
            &args,
        ));
        Ok(self)
    }

    /// Value or sub-tree at `path`; the whole tree for an empty path.
    /// `None` for absent paths and before [`load`](Self::load) has run.
    pub fn get(&self, path: &str) -> Option<&Value> {
        merge::lookup(self.tree.as_ref()?, path)
    }

    /// The full merged tree, if loaded.
    pub fn tree(&self) -> Option<&Value> {
        self.tree.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    fn apply_dotenv(&self) {
        let result = match &self.dotenv_path {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        if let Err(error) = result {
            if !error.not_found() {
                tracing::warn!("skipping unreadable dotenv file: {error}");
            }
        }
    }
}

fn parse_document(content: &str, path: &Path) -> Result<ProfileDocument> {
    // Parse to a generic value first so a non-mapping document is
    // reported as a shape problem rather than a deserialization one.
    let raw: YamlValue = serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if !raw.is_mapping() {
        return Err(ConfigError::InvalidDocument { path: path.to_path_buf() });
    }
    serde_yaml::from_value(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
