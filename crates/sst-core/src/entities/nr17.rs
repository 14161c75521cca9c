use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::RiskBand;
use crate::errors::CoreError;
use crate::risk::{Nr17Ratings, Nr17Thresholds};

/// Workstation types offered on the NR-17 form. The first is the form default.
pub const WORKSTATION_TYPES: [&str; 4] = ["Administrativo", "Operacional", "Industrial", "Outro"];

/// An NR-17 ergonomic assessment as stored by the backend.
///
/// The individual ratings are not persisted, only their sum (`score`). The
/// band is always derived from the score under the active thresholds, never
/// taken from the label stored with the row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErgonomicAssessment {
    pub id: i64,
    pub company: Option<String>,
    pub sector: String,
    pub function: String,
    pub worker: Option<String>,
    pub workstation_type: String,
    pub assessed_on: NaiveDate,
    pub score: u32,
    pub band: RiskBand,
    pub notes: Option<String>,
}

impl ErgonomicAssessment {
    /// Re-derive `band` from `score`.
    #[must_use]
    pub fn classified(mut self, thresholds: Nr17Thresholds) -> Self {
        self.band = thresholds.classify(self.score);
        self
    }
}

/// Form input for an NR-17 assessment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AssessmentDraft {
    pub company: Option<String>,
    pub sector: String,
    pub function: String,
    pub worker: Option<String>,
    pub workstation_type: String,
    pub assessed_on: NaiveDate,
    pub ratings: Nr17Ratings,
    pub notes: Option<String>,
}

impl AssessmentDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when sector or function is blank or
    /// a rating is out of range.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("sector", &self.sector)?;
        require("function", &self.function)?;
        self.ratings.validate()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.ratings.score()
    }

    #[must_use]
    pub fn band(&self, thresholds: Nr17Thresholds) -> RiskBand {
        thresholds.classify(self.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welder_assessment_scores_high() {
        let draft = AssessmentDraft {
            company: None,
            sector: "Solda".into(),
            function: "Welder".into(),
            worker: None,
            workstation_type: WORKSTATION_TYPES[2].into(),
            assessed_on: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            ratings: Nr17Ratings::uniform(3),
            notes: None,
        };
        assert!(draft.validate().is_ok());
        assert_eq!(draft.score(), 18);
        assert_eq!(draft.band(Nr17Thresholds::default()), RiskBand::High);
    }

    #[test]
    fn stored_band_yields_to_the_score() {
        let stored = ErgonomicAssessment {
            id: 4,
            company: None,
            sector: "Expedição".into(),
            function: "Conferente".into(),
            worker: None,
            workstation_type: WORKSTATION_TYPES[1].into(),
            assessed_on: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            score: 8,
            band: RiskBand::Low,
            notes: None,
        };
        let strict = Nr17Thresholds::new(9, 12).unwrap();

        assert_eq!(stored.clone().classified(Nr17Thresholds::default()).band, RiskBand::Medium);
        assert_eq!(stored.classified(strict).band, RiskBand::Low);
    }

    #[test]
    fn missing_function_is_rejected() {
        let draft = AssessmentDraft {
            company: None,
            sector: "Solda".into(),
            function: String::new(),
            worker: None,
            workstation_type: WORKSTATION_TYPES[0].into(),
            assessed_on: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            ratings: Nr17Ratings::default(),
            notes: None,
        };
        assert!(draft.validate().is_err());
    }
}
