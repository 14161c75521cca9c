//! Table projections of the entity types.
//!
//! JSON output carries every field; tables show the columns an operator
//! scans, with domain (Portuguese) headers.

use serde::Serialize;
use sst_core::entities::{
    Action, Company, EnvironmentalHazardRecord, ErgonomicAssessment, ExamRecord, Hazard, Risk,
    Sector,
};
use sst_core::enums::{PgrRiskLevel, PgrScale};

pub trait TableView {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn opt(value: Option<&String>) -> String {
    value.map_or_else(|| "-".to_string(), Clone::clone)
}

fn opt_display<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl TableView for ExamRecord {
    const HEADERS: &'static [&'static str] =
        &["id", "nome", "funcao", "setor", "tipo", "data", "resultado"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.function.clone(),
            self.sector.clone(),
            self.exam_type.clone(),
            self.exam_date.to_string(),
            self.outcome.clone(),
        ]
    }
}

impl TableView for ErgonomicAssessment {
    const HEADERS: &'static [&'static str] =
        &["id", "setor", "funcao", "posto", "data", "score", "risco"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.sector.clone(),
            self.function.clone(),
            self.workstation_type.clone(),
            self.assessed_on.to_string(),
            self.score.to_string(),
            self.band.label().to_string(),
        ]
    }
}

impl TableView for EnvironmentalHazardRecord {
    const HEADERS: &'static [&'static str] = &[
        "id",
        "empresa",
        "setor",
        "funcao",
        "agente",
        "intensidade",
        "epi_eficaz",
        "enquadramento",
    ];

    fn cells(&self) -> Vec<String> {
        let intensity = match (&self.intensity, &self.unit) {
            (Some(value), Some(unit)) => format!("{value} {unit}"),
            (Some(value), None) => value.clone(),
            (None, _) => "-".to_string(),
        };
        vec![
            self.id.to_string(),
            self.company.clone(),
            self.sector.clone(),
            self.function.clone(),
            self.agent.clone(),
            intensity,
            self.ppe_effective.label().to_string(),
            self.legal_framing.clone(),
        ]
    }
}

impl TableView for Company {
    const HEADERS: &'static [&'static str] = &["id", "nome", "cnpj", "atividade", "grau_risco"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            opt(self.tax_id.as_ref()),
            opt(self.activity.as_ref()),
            opt_display(self.risk_grade),
        ]
    }
}

impl TableView for Sector {
    const HEADERS: &'static [&'static str] = &["id", "empresa", "nome", "descricao"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.company_id.to_string(),
            self.name.clone(),
            opt(self.description.as_ref()),
        ]
    }
}

impl TableView for Hazard {
    const HEADERS: &'static [&'static str] = &["id", "setor", "nome", "agente", "fonte"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.sector_id.to_string(),
            self.name.clone(),
            opt(self.agent.as_ref()),
            opt(self.source.as_ref()),
        ]
    }
}

/// A risk with its derived level and band under the configured scale.
#[derive(Debug, Clone, Serialize)]
pub struct RiskRow {
    #[serde(flatten)]
    pub risk: Risk,
    pub level: u8,
    pub band: PgrRiskLevel,
}

impl RiskRow {
    #[must_use]
    pub fn new(risk: Risk, scale: PgrScale) -> Self {
        Self {
            level: risk.level(),
            band: risk.classify(scale),
            risk,
        }
    }

    #[must_use]
    pub fn rows(risks: &[Risk], scale: PgrScale) -> Vec<Self> {
        risks.iter().cloned().map(|r| Self::new(r, scale)).collect()
    }
}

impl TableView for RiskRow {
    const HEADERS: &'static [&'static str] =
        &["id", "perigo", "P", "S", "nivel", "risco", "medidas"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.risk.id.to_string(),
            self.risk.hazard_id.to_string(),
            self.risk.probability.to_string(),
            self.risk.severity.to_string(),
            self.level.to_string(),
            self.band.label().to_string(),
            opt(self.risk.existing_measures.as_ref()),
        ]
    }
}

impl TableView for Action {
    const HEADERS: &'static [&'static str] =
        &["id", "risco", "recomendacao", "prazo", "responsavel", "status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.risk_id.to_string(),
            self.recommendation.clone(),
            opt_display(self.deadline),
            opt(self.responsible.as_ref()),
            self.status.as_str().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn risk_row_derives_level_and_band() {
        let risk = Risk {
            id: 13,
            hazard_id: 8,
            probability: 4,
            severity: 4,
            existing_measures: None,
        };
        let four = RiskRow::new(risk.clone(), PgrScale::FourBand);
        let three = RiskRow::new(risk, PgrScale::ThreeBand);
        assert_eq!(four.level, 16);
        assert_eq!(four.band, PgrRiskLevel::High);
        assert_eq!(three.band, PgrRiskLevel::High);
        assert_eq!(four.cells()[5], "Alto");
        assert_eq!(four.cells()[6], "-");

        let json = serde_json::to_value(&four).unwrap();
        assert_eq!(json["probability"], 4);
        assert_eq!(json["band"], "Alto");
    }

    #[test]
    fn every_view_fills_its_headers() {
        let action = Action {
            id: 1,
            risk_id: 13,
            recommendation: "Enclausurar prensa".into(),
            kind: None,
            deadline: None,
            responsible: None,
            status: sst_core::enums::ActionStatus::InProgress,
        };
        assert_eq!(action.cells().len(), Action::HEADERS.len());
        assert_eq!(action.cells()[5], "em_andamento");

        let company = Company {
            id: 1,
            name: "Alfa".into(),
            tax_id: None,
            address: None,
            activity: None,
            risk_grade: Some(3),
        };
        assert_eq!(company.cells().len(), Company::HEADERS.len());
        assert_eq!(company.cells()[4], "3");
    }
}
