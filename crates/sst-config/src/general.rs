//! `[general]`: presentation defaults shared by every command.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_limit() -> u32 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows printed by list commands when neither `--limit` flag is given.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `default_limit` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::invalid(
                "general.default_limit",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
