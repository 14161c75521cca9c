//! # sst-config
//!
//! Layered configuration loading for the `sst` client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SST_*` prefix, `__` as separator)
//! 2. Project-level `.sst/config.toml`
//! 3. User-level `~/.config/sst/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SST_API__BASE_URL` -> `api.base_url`,
//! `SST_RISK__PGR_SCALE` -> `risk.pgr_scale`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sst_config::SstConfig;
//!
//! let config = SstConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.base_url());
//! ```

mod api;
mod error;
mod general;
mod risk;
mod storage;

pub use api::{ApiConfig, DEFAULT_BASE_URL, LoginMode};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use risk::RiskConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SstConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl SstConfig {
    /// Load and validate configuration from TOML files and environment
    /// variables.
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env`
    /// support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".sst/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SST_").split("__"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-http base URL or
    /// NR-17 thresholds that do not increase.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.risk.nr17_thresholds()?;
        self.general.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sst").join("config.toml"))
    }
}
