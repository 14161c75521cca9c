//! PGR risk-management hierarchy: Company → Sector → Hazard → Risk → Action.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::enums::{ActionStatus, PgrRiskLevel, PgrScale};
use crate::errors::CoreError;
use crate::risk::{RATING_MAX, RATING_MIN, classify_pgr, pgr_level};

/// A company under a risk-management program.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Company {
    pub id: i64,
    pub name: String,
    /// CNPJ.
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub activity: Option<String>,
    /// NR-04 risk grade (1–4).
    pub risk_grade: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CompanyDraft {
    pub name: String,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub activity: Option<String>,
    pub risk_grade: Option<u8>,
}

impl CompanyDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is blank or the risk
    /// grade is outside 1–4.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        if let Some(grade) = self.risk_grade
            && !(1..=4).contains(&grade)
        {
            return Err(CoreError::Validation(format!(
                "risk_grade must be between 1 and 4, got {grade}"
            )));
        }
        Ok(())
    }
}

impl From<&Company> for CompanyDraft {
    fn from(company: &Company) -> Self {
        Self {
            name: company.name.clone(),
            tax_id: company.tax_id.clone(),
            address: company.address.clone(),
            activity: company.activity.clone(),
            risk_grade: company.risk_grade,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Sector {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SectorDraft {
    pub company_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl SectorDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)
    }
}

impl From<&Sector> for SectorDraft {
    fn from(sector: &Sector) -> Self {
        Self {
            company_id: sector.company_id,
            name: sector.name.clone(),
            description: sector.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Hazard {
    pub id: i64,
    pub sector_id: i64,
    pub name: String,
    pub agent: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HazardDraft {
    pub sector_id: i64,
    pub name: String,
    pub agent: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
}

impl HazardDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the name is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)
    }
}

impl From<&Hazard> for HazardDraft {
    fn from(hazard: &Hazard) -> Self {
        Self {
            sector_id: hazard.sector_id,
            name: hazard.name.clone(),
            agent: hazard.agent.clone(),
            source: hazard.source.clone(),
            description: hazard.description.clone(),
        }
    }
}

/// A risk rated by probability and severity (each 1–5).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Risk {
    pub id: i64,
    pub hazard_id: i64,
    pub probability: u8,
    pub severity: u8,
    pub existing_measures: Option<String>,
}

impl Risk {
    /// Probability × severity. Ratings are range-checked when the record
    /// is parsed, so the product always fits.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.probability.saturating_mul(self.severity)
    }

    #[must_use]
    pub const fn classify(&self, scale: PgrScale) -> PgrRiskLevel {
        classify_pgr(self.level(), scale)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskDraft {
    pub hazard_id: i64,
    pub probability: u8,
    pub severity: u8,
    pub existing_measures: Option<String>,
}

impl RiskDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when probability or severity is
    /// outside 1–5.
    pub fn validate(&self) -> Result<(), CoreError> {
        pgr_level(self.probability, self.severity).map(|_| ())
    }

    /// # Errors
    ///
    /// Same as [`Self::validate`].
    pub fn level(&self) -> Result<u8, CoreError> {
        pgr_level(self.probability, self.severity)
    }
}

impl From<&Risk> for RiskDraft {
    fn from(risk: &Risk) -> Self {
        Self {
            hazard_id: risk.hazard_id,
            probability: risk.probability,
            severity: risk.severity,
            existing_measures: risk.existing_measures.clone(),
        }
    }
}

/// A control action recommended for a risk.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Action {
    pub id: i64,
    pub risk_id: i64,
    pub recommendation: String,
    pub kind: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub responsible: Option<String>,
    pub status: ActionStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ActionDraft {
    pub risk_id: i64,
    pub recommendation: String,
    pub kind: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub responsible: Option<String>,
    pub status: ActionStatus,
}

impl ActionDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when the recommendation is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("recommendation", &self.recommendation)
    }
}

impl From<&Action> for ActionDraft {
    fn from(action: &Action) -> Self {
        Self {
            risk_id: action.risk_id,
            recommendation: action.recommendation.clone(),
            kind: action.kind.clone(),
            deadline: action.deadline,
            responsible: action.responsible.clone(),
            status: action.status,
        }
    }
}

/// Check a rating read from the backend. Used by the wire parsers.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when the value is outside 1–5.
pub fn check_factor(field: &str, value: i64) -> Result<u8, CoreError> {
    u8::try_from(value)
        .ok()
        .filter(|v| (RATING_MIN..=RATING_MAX).contains(v))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "{field} must be between {RATING_MIN} and {RATING_MAX}, got {value}"
            ))
        })
}
