//! Risk classification thresholds.

use serde::{Deserialize, Serialize};
use sst_core::enums::PgrScale;
use sst_core::risk::Nr17Thresholds;

use crate::ConfigError;

const fn default_nr17_low_max() -> u32 {
    6
}

const fn default_nr17_medium_max() -> u32 {
    12
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RiskConfig {
    /// Highest NR-17 score still classified "Baixo".
    #[serde(default = "default_nr17_low_max")]
    pub nr17_low_max: u32,

    /// Highest NR-17 score still classified "Médio".
    #[serde(default = "default_nr17_medium_max")]
    pub nr17_medium_max: u32,

    #[serde(default)]
    pub pgr_scale: PgrScale,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            nr17_low_max: default_nr17_low_max(),
            nr17_medium_max: default_nr17_medium_max(),
            pgr_scale: PgrScale::default(),
        }
    }
}

impl RiskConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] unless the medium bound is above
    /// the low bound.
    pub fn nr17_thresholds(&self) -> Result<Nr17Thresholds, ConfigError> {
        Nr17Thresholds::new(self.nr17_low_max, self.nr17_medium_max)
            .map_err(|e| ConfigError::invalid("risk.nr17_medium_max", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_thresholds() {
        let config = RiskConfig::default();
        assert_eq!(config.nr17_thresholds().unwrap(), Nr17Thresholds::default());
        assert_eq!(config.pgr_scale, PgrScale::FourBand);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let config = RiskConfig {
            nr17_low_max: 12,
            nr17_medium_max: 8,
            ..Default::default()
        };
        let err = config.nr17_thresholds().unwrap_err();
        assert!(err.to_string().contains("risk.nr17_medium_max"));
    }
}
