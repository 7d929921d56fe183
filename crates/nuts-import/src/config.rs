//! Importer configuration: an optional TOML file overlaid with `NUTS_*`
//! environment variables.
//!
//! ```toml
//! store_path = "~/.local/share/nuts/nuts.db"
//!
//! [ramon]
//! timeout_secs = 120
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `NUTS_RAMON__TIMEOUT_SECS=0`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use nuts_ramon::RamonConfig;
use serde::Deserialize;

const ENV_PREFIX: &str = "NUTS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
  pub store_path: PathBuf,
  pub ramon:      RamonConfig,
}

impl Default for ImportConfig {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("nuts.db"),
      ramon:      RamonConfig::default(),
    }
  }
}

impl ImportConfig {
  /// Read `path` (missing is fine) and the process environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::build(File::from(path).required(false), environment())
  }

  /// Parse TOML text, still honouring the environment.
  pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
    Self::build(File::from_str(text, FileFormat::Toml), environment())
  }

  fn build<F>(file: F, env: Environment) -> Result<Self, ConfigError>
  where
    F: config::Source + Send + Sync + 'static,
  {
    Config::builder()
      .add_source(file)
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  /// `store_path` with a leading `~/` expanded.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

fn environment() -> Environment {
  Environment::with_prefix(ENV_PREFIX)
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
