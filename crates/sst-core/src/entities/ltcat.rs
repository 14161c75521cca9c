use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::PpeEffectiveness;
use crate::errors::CoreError;

/// Hazard agent classifications offered on the LTCAT form.
pub const CLASSIFICATIONS: [&str; 5] = ["Físico", "Químico", "Biológico", "Ergonômico", "Acidente"];

/// Legal framing used when the exposure gives no special retirement right.
pub const LEGAL_FRAMING_NONE: &str = "Sem enquadramento";

/// An LTCAT environmental-hazard exposure record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EnvironmentalHazardRecord {
    pub id: i64,
    pub company: String,
    pub tax_id: Option<String>,
    pub sector: String,
    pub function: String,
    /// Homogeneous exposure group (GHE).
    pub exposure_group: Option<String>,
    pub agent: String,
    pub classification: String,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub intensity: Option<String>,
    pub unit: Option<String>,
    pub daily_hours: Option<f64>,
    pub days_per_week: Option<u8>,
    pub exposure_years: Option<f64>,
    pub ppe_effective: PpeEffectiveness,
    pub legal_framing: String,
    pub assessed_on: Option<NaiveDate>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
}

/// Payload for creating or updating an [`EnvironmentalHazardRecord`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HazardRecordDraft {
    pub company: String,
    pub tax_id: Option<String>,
    pub sector: String,
    pub function: String,
    pub exposure_group: Option<String>,
    pub agent: String,
    pub classification: String,
    pub source: Option<String>,
    pub medium: Option<String>,
    pub intensity: Option<String>,
    pub unit: Option<String>,
    pub daily_hours: Option<f64>,
    pub days_per_week: Option<u8>,
    pub exposure_years: Option<f64>,
    pub ppe_effective: PpeEffectiveness,
    pub legal_framing: String,
    pub assessed_on: Option<NaiveDate>,
    pub responsible: Option<String>,
    pub notes: Option<String>,
}

impl HazardRecordDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when company, sector, function or
    /// agent is blank, or the exposure schedule is out of range.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("company", &self.company)?;
        require("sector", &self.sector)?;
        require("function", &self.function)?;
        require("agent", &self.agent)?;
        if let Some(days) = self.days_per_week
            && !(1..=7).contains(&days)
        {
            return Err(CoreError::Validation(format!(
                "days_per_week must be between 1 and 7, got {days}"
            )));
        }
        if let Some(hours) = self.daily_hours
            && !(0.0..=24.0).contains(&hours)
        {
            return Err(CoreError::Validation(format!(
                "daily_hours must be between 0 and 24, got {hours}"
            )));
        }
        Ok(())
    }
}

impl From<&EnvironmentalHazardRecord> for HazardRecordDraft {
    fn from(r: &EnvironmentalHazardRecord) -> Self {
        Self {
            company: r.company.clone(),
            tax_id: r.tax_id.clone(),
            sector: r.sector.clone(),
            function: r.function.clone(),
            exposure_group: r.exposure_group.clone(),
            agent: r.agent.clone(),
            classification: r.classification.clone(),
            source: r.source.clone(),
            medium: r.medium.clone(),
            intensity: r.intensity.clone(),
            unit: r.unit.clone(),
            daily_hours: r.daily_hours,
            days_per_week: r.days_per_week,
            exposure_years: r.exposure_years,
            ppe_effective: r.ppe_effective,
            legal_framing: r.legal_framing.clone(),
            assessed_on: r.assessed_on,
            responsible: r.responsible.clone(),
            notes: r.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> HazardRecordDraft {
        HazardRecordDraft {
            company: "Metalúrgica Alfa".into(),
            tax_id: None,
            sector: "Caldeiraria".into(),
            function: "Caldeireiro".into(),
            exposure_group: Some("GHE 01".into()),
            agent: "Ruído".into(),
            classification: CLASSIFICATIONS[0].into(),
            source: Some("Esmerilhadeira".into()),
            medium: None,
            intensity: Some("92".into()),
            unit: Some("dB(A)".into()),
            daily_hours: Some(8.0),
            days_per_week: Some(5),
            exposure_years: None,
            ppe_effective: PpeEffectiveness::Effective,
            legal_framing: LEGAL_FRAMING_NONE.into(),
            assessed_on: None,
            responsible: None,
            notes: None,
        }
    }

    #[test]
    fn complete_draft_validates() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn agent_is_required() {
        let mut d = draft();
        d.agent.clear();
        assert!(d.validate().unwrap_err().to_string().contains("agent"));
    }

    #[test]
    fn days_per_week_is_bounded() {
        let mut d = draft();
        d.days_per_week = Some(8);
        assert!(d.validate().is_err());
    }
}
