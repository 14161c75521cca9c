use figment::Jail;
use sst_config::{LoginMode, SstConfig};
use sst_core::enums::PgrScale;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("SST_API__BASE_URL", "http://localhost:8000");
        jail.set_env("SST_API__LOGIN_MODE", "form");
        jail.set_env("SST_RISK__PGR_SCALE", "three_band");
        jail.set_env("SST_STORAGE__MIRROR", "false");

        let config = SstConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.api.base_url(), "http://localhost:8000");
        assert_eq!(config.api.login_mode, LoginMode::Form);
        assert_eq!(config.risk.pgr_scale, PgrScale::ThreeBand);
        assert!(!config.storage.mirror);
        Ok(())
    });
}

#[test]
fn unrelated_sst_vars_are_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("SST_LOG", "debug");
        jail.set_env("SST_AUTH__TOKEN", "abc");

        let config = SstConfig::load().map_err(|e| e.to_string())?;
        assert!(config.api.require_token);
        Ok(())
    });
}

#[test]
fn non_http_base_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("SST_API__BASE_URL", "datainsight.local");

        let err = SstConfig::load().unwrap_err();
        assert!(err.to_string().contains("api.base_url"), "{err}");
        Ok(())
    });
}
