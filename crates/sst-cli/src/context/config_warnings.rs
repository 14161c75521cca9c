use sst_config::{DEFAULT_BASE_URL, SstConfig};

/// Sections that figment reads from `SST_<SECTION>__<KEY>`.
const SECTIONS: [&str; 4] = ["API", "RISK", "STORAGE", "GENERAL"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &SstConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SstConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for section in SECTIONS {
        let single = format!("SST_{section}_");
        let double = format!("SST_{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&single) && !key.starts_with(&double))
        {
            warnings.push(format!(
                "{key} is ignored. Use double underscores between section and key (example: {double}{}).",
                &key[single.len()..]
            ));
        }
    }

    if config.api.base_url == DEFAULT_BASE_URL && env_keys.iter().any(|k| k == "SST_BASE_URL") {
        warnings.push(
            "SST_BASE_URL is ignored while api.base_url is the default. Use SST_API__BASE_URL."
                .to_string(),
        );
    }

    warnings
}
