//! Local mirror storage configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const fn default_mirror() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Mirror directory. Empty means `~/.sst/cache`. A leading `~/` is
    /// expanded to the home directory.
    #[serde(default)]
    pub dir: String,

    /// Write fetched lists to the mirror.
    #[serde(default = "default_mirror")]
    pub mirror: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::new(),
            mirror: default_mirror(),
        }
    }
}

impl StorageConfig {
    /// Resolved mirror directory, `None` when no home directory is known and
    /// no explicit directory is configured.
    #[must_use]
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        let dir = self.dir.trim();
        if dir.is_empty() {
            return dirs::home_dir().map(|home| home.join(".sst").join("cache"));
        }
        match dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
            None => Some(PathBuf::from(dir)),
        }
    }
}
