use std::sync::Arc;

use anyhow::Context;
use sst_auth::KeyringTokenStore;
use sst_client::ApiClient;
use sst_client::mirror::LocalMirror;
use sst_config::SstConfig;
use sst_core::enums::PgrScale;
use sst_core::risk::Nr17Thresholds;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: SstConfig,
    pub client: ApiClient,
    pub mirror: LocalMirror,
    pub thresholds: Nr17Thresholds,
    pub pgr_scale: PgrScale,
}

impl AppContext {
    /// Build the client over the persistent token store and open the mirror.
    /// Sends no request.
    pub fn init(config: SstConfig) -> anyhow::Result<Self> {
        let thresholds = config.risk.nr17_thresholds()?;
        let client = ApiClient::new(&config.api, Arc::new(KeyringTokenStore::new()))
            .context("failed to build HTTP client")?;
        let mirror = LocalMirror::from_config(&config.storage);

        tracing::debug!(
            base_url = client.base_url(),
            mirror = ?mirror.dir(),
            "application context ready"
        );

        Ok(Self {
            pgr_scale: config.risk.pgr_scale,
            thresholds,
            client,
            mirror,
            config,
        })
    }
}
