//! Risk-band classifiers.
//!
//! NR-17 assessments sum six 1–5 ratings and bucket the sum into three
//! bands. PGR risks multiply probability by severity and bucket the product
//! with one of two threshold tables (see [`PgrScale`]).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{PgrRiskLevel, PgrScale, RiskBand};
use crate::errors::CoreError;

/// Lowest accepted rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating.
pub const RATING_MAX: u8 = 5;

fn check_rating(field: &str, value: u8) -> Result<u8, CoreError> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between {RATING_MIN} and {RATING_MAX}, got {value}"
        )))
    }
}

// ---------------------------------------------------------------------------
// NR-17
// ---------------------------------------------------------------------------

/// The six ergonomic factors rated on an NR-17 assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Nr17Ratings {
    pub furniture: u8,
    pub posture: u8,
    pub effort: u8,
    pub breaks: u8,
    pub environment: u8,
    pub organization: u8,
}

impl Default for Nr17Ratings {
    fn default() -> Self {
        Self::uniform(RATING_MIN)
    }
}

impl Nr17Ratings {
    /// Field names in input order.
    pub const FIELDS: [&'static str; 6] = [
        "furniture",
        "posture",
        "effort",
        "breaks",
        "environment",
        "organization",
    ];

    #[must_use]
    pub const fn uniform(value: u8) -> Self {
        Self {
            furniture: value,
            posture: value,
            effort: value,
            breaks: value,
            environment: value,
            organization: value,
        }
    }

    /// Build ratings from six values in [`Self::FIELDS`] order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if there are not exactly six values
    /// or any value is outside 1–5.
    pub fn from_slice(values: &[u8]) -> Result<Self, CoreError> {
        let [furniture, posture, effort, breaks, environment, organization] = values else {
            return Err(CoreError::Validation(format!(
                "expected 6 ratings, got {}",
                values.len()
            )));
        };
        let ratings = Self {
            furniture: *furniture,
            posture: *posture,
            effort: *effort,
            breaks: *breaks,
            environment: *environment,
            organization: *organization,
        };
        ratings.validate()?;
        Ok(ratings)
    }

    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first out-of-range factor.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in Self::FIELDS.iter().zip(self.values()) {
            check_rating(field, value)?;
        }
        Ok(())
    }

    #[must_use]
    pub const fn values(&self) -> [u8; 6] {
        [
            self.furniture,
            self.posture,
            self.effort,
            self.breaks,
            self.environment,
            self.organization,
        ]
    }

    /// Sum of the six ratings.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.values().iter().map(|v| u32::from(*v)).sum()
    }
}

/// Upper bounds (inclusive) of the low and medium NR-17 bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Nr17Thresholds {
    pub low_max: u32,
    pub medium_max: u32,
}

impl Default for Nr17Thresholds {
    fn default() -> Self {
        Self {
            low_max: 6,
            medium_max: 12,
        }
    }
}

impl Nr17Thresholds {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] unless `low_max < medium_max`.
    pub fn new(low_max: u32, medium_max: u32) -> Result<Self, CoreError> {
        if low_max >= medium_max {
            return Err(CoreError::Validation(format!(
                "nr17 thresholds must increase: low_max={low_max}, medium_max={medium_max}"
            )));
        }
        Ok(Self {
            low_max,
            medium_max,
        })
    }

    #[must_use]
    pub const fn classify(self, score: u32) -> RiskBand {
        if score <= self.low_max {
            RiskBand::Low
        } else if score <= self.medium_max {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }
}

/// Classify an NR-17 score with the given thresholds.
#[must_use]
pub const fn classify_nr17(score: u32, thresholds: Nr17Thresholds) -> RiskBand {
    thresholds.classify(score)
}

// ---------------------------------------------------------------------------
// PGR
// ---------------------------------------------------------------------------

/// Risk level as probability × severity.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if either factor is outside 1–5.
pub fn pgr_level(probability: u8, severity: u8) -> Result<u8, CoreError> {
    let p = check_rating("probability", probability)?;
    let s = check_rating("severity", severity)?;
    Ok(p * s)
}

/// Classify a PGR level (1..=25) on the given scale.
#[must_use]
pub const fn classify_pgr(level: u8, scale: PgrScale) -> PgrRiskLevel {
    match scale {
        PgrScale::FourBand => match level {
            0..=4 => PgrRiskLevel::Low,
            5..=9 => PgrRiskLevel::Medium,
            10..=16 => PgrRiskLevel::High,
            _ => PgrRiskLevel::Critical,
        },
        PgrScale::ThreeBand => {
            if level >= 12 {
                PgrRiskLevel::High
            } else if level >= 6 {
                PgrRiskLevel::Medium
            } else {
                PgrRiskLevel::Low
            }
        }
    }
}
