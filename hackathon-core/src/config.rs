//! Optional YAML configuration at `<home>/.hackathon/config.yaml`.
//!
//! ```yaml
//! data_dir: /srv/hackathon   # where snapshot slots are written
//! key_prefix: spring24       # slot files become spring24_<slot>.json
//! ```
//!
//! Both keys are optional; a missing file means all defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, RegistryError};
use crate::store::{data_dir_at, FileStore, DEFAULT_KEY_PREFIX};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Config {
    /// Directory the snapshot slots live in, falling back to
    /// `<home>/.hackathon/`.
    pub fn data_dir_or_default(&self, home: &Path) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| data_dir_at(home))
    }

    /// Build the file store this config describes.
    pub fn file_store(&self, home: &Path) -> FileStore {
        FileStore::with_prefix(self.data_dir_or_default(home), self.key_prefix.clone())
    }
}

/// `<home>/.hackathon/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    data_dir_at(home).join("config.yaml")
}

/// Load the config under `home`.
///
/// Returns defaults if the file is absent, `RegistryError::Parse` (with path)
/// if it is malformed.
pub fn load_at(home: &Path) -> Result<Config, RegistryError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| RegistryError::Parse { path, source: e })
}
