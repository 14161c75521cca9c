//! Backend API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Hosted backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://datainsight-sst-suite.onrender.com";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_require_token() -> bool {
    true
}

/// Shape of the login request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMode {
    /// JSON body `{"email", "username", "password"}`.
    #[default]
    Json,
    /// `application/x-www-form-urlencoded` password grant.
    Form,
}

impl LoginMode {
    #[must_use]
    pub const fn default_path(self) -> &'static str {
        match self {
            Self::Json => "/auth/login",
            Self::Form => "/api/login",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub login_mode: LoginMode,

    /// Overrides the login route. Empty means the mode's default.
    #[serde(default)]
    pub login_path: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Refuse protected requests when no token is stored.
    #[serde(default = "default_require_token")]
    pub require_token: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_mode: LoginMode::default(),
            login_path: String::new(),
            connect_timeout_secs: default_connect_timeout_secs(),
            require_token: default_require_token(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub fn login_path(&self) -> &str {
        if self.login_path.is_empty() {
            self.login_mode.default_path()
        } else {
            &self.login_path
        }
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::invalid("api.base_url", "must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("expected an http(s) URL, got '{url}'"),
            ));
        }
        Ok(())
    }
}
