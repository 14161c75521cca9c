//! Dashboard aggregation over the locally mirrored lists.
//!
//! The remote dashboard endpoints return pre-aggregated summaries; this is
//! the offline counterpart computed from whatever the mirror holds.

use chrono::Datelike;
use serde::Serialize;

use crate::chart::ChartSeries;
use crate::entities::{EnvironmentalHazardRecord, ErgonomicAssessment, ExamRecord};

/// Number of agents kept in the "top agents" series.
pub const TOP_AGENTS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModuleTotals {
    pub aso: usize,
    pub nr17: usize,
    pub ltcat: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalDashboard {
    pub totals: ModuleTotals,
    /// Mean NR-17 score, `None` when there are no assessments.
    pub nr17_mean_score: Option<f64>,
    pub module_distribution: ChartSeries,
    pub nr17_band_profile: ChartSeries,
    pub top_agents: ChartSeries,
    pub nr17_score_by_sector: ChartSeries,
    pub exams_per_month: ChartSeries,
    pub ltcat_by_sector: ChartSeries,
    pub ltcat_by_framing: ChartSeries,
}

impl LocalDashboard {
    #[must_use]
    pub fn summarize(
        exams: &[ExamRecord],
        assessments: &[ErgonomicAssessment],
        hazards: &[EnvironmentalHazardRecord],
    ) -> Self {
        let totals = ModuleTotals {
            aso: exams.len(),
            nr17: assessments.len(),
            ltcat: hazards.len(),
        };

        #[allow(clippy::cast_precision_loss)]
        let nr17_mean_score = (!assessments.is_empty()).then(|| {
            let sum: u32 = assessments.iter().map(|a| a.score).sum();
            f64::from(sum) / assessments.len() as f64
        });

        #[allow(clippy::cast_precision_loss)]
        let module_distribution = ChartSeries::from_pairs(
            "Registros por módulo",
            [
                ("ASO", totals.aso as f64),
                ("NR-17", totals.nr17 as f64),
                ("LTCAT", totals.ltcat as f64),
            ],
        );

        Self {
            totals,
            nr17_mean_score,
            module_distribution,
            nr17_band_profile: ChartSeries::band_profile(
                "Perfil de risco NR-17",
                assessments.iter().map(|a| a.band),
            ),
            top_agents: ChartSeries::count_by("Agentes mais frequentes", hazards, |h| {
                h.agent.clone()
            })
            .top(TOP_AGENTS),
            nr17_score_by_sector: ChartSeries::mean_by(
                "Score médio NR-17 por setor",
                assessments,
                |a| a.sector.clone(),
                |a| f64::from(a.score),
            ),
            exams_per_month: ChartSeries::count_by("Exames por mês", exams, |e| {
                format!("{:04}-{:02}", e.exam_date.year(), e.exam_date.month())
            })
            .sorted_by_label(),
            ltcat_by_sector: ChartSeries::count_by("Agentes por setor", hazards, |h| {
                h.sector.clone()
            }),
            ltcat_by_framing: ChartSeries::count_by("Enquadramento", hazards, |h| {
                h.legal_framing.clone()
            }),
        }
    }

    /// Every series in display order.
    #[must_use]
    pub fn charts(&self) -> Vec<&ChartSeries> {
        vec![
            &self.module_distribution,
            &self.nr17_band_profile,
            &self.top_agents,
            &self.nr17_score_by_sector,
            &self.exams_per_month,
            &self.ltcat_by_sector,
            &self.ltcat_by_framing,
        ]
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::entities::LEGAL_FRAMING_NONE;
    use crate::enums::{PpeEffectiveness, RiskBand};

    fn exam(id: i64, date: (i32, u32, u32)) -> ExamRecord {
        ExamRecord {
            id,
            name: format!("worker {id}"),
            document_id: "000".into(),
            function: "Operador".into(),
            sector: "Produção".into(),
            exam_type: "Periódico".into(),
            exam_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            examiner: None,
            outcome: "Apto".into(),
            created_at: None,
        }
    }

    fn assessment(id: i64, sector: &str, score: u32, band: RiskBand) -> ErgonomicAssessment {
        ErgonomicAssessment {
            id,
            company: None,
            sector: sector.into(),
            function: "Operador".into(),
            worker: None,
            workstation_type: "Industrial".into(),
            assessed_on: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            score,
            band,
            notes: None,
        }
    }

    fn hazard(id: i64, sector: &str, agent: &str, framing: &str) -> EnvironmentalHazardRecord {
        EnvironmentalHazardRecord {
            id,
            company: "Alfa".into(),
            tax_id: None,
            sector: sector.into(),
            function: "Operador".into(),
            exposure_group: None,
            agent: agent.into(),
            classification: "Físico".into(),
            source: None,
            medium: None,
            intensity: None,
            unit: None,
            daily_hours: None,
            days_per_week: None,
            exposure_years: None,
            ppe_effective: PpeEffectiveness::Effective,
            legal_framing: framing.into(),
            assessed_on: None,
            responsible: None,
            notes: None,
        }
    }

    #[test]
    fn empty_mirror_yields_zeroes() {
        let dash = LocalDashboard::summarize(&[], &[], &[]);
        assert_eq!(dash.totals, ModuleTotals::default());
        assert_eq!(dash.nr17_mean_score, None);
        assert_eq!(dash.nr17_band_profile.data, vec![0.0, 0.0, 0.0]);
        assert!(dash.top_agents.is_empty());
    }

    #[test]
    fn aggregates_every_module() {
        let exams = vec![exam(1, (2025, 2, 3)), exam(2, (2025, 1, 9)), exam(3, (2025, 2, 20))];
        let assessments = vec![
            assessment(1, "Solda", 18, RiskBand::High),
            assessment(2, "Pintura", 8, RiskBand::Medium),
            assessment(3, "Solda", 12, RiskBand::Medium),
        ];
        let hazards = vec![
            hazard(1, "Caldeiraria", "Ruído", "25 anos"),
            hazard(2, "Caldeiraria", "Calor", LEGAL_FRAMING_NONE),
            hazard(3, "Pintura", "Ruído", "25 anos"),
        ];

        let dash = LocalDashboard::summarize(&exams, &assessments, &hazards);

        assert_eq!(
            dash.totals,
            ModuleTotals {
                aso: 3,
                nr17: 3,
                ltcat: 3
            }
        );
        assert_eq!(dash.nr17_mean_score, Some(38.0 / 3.0));
        assert_eq!(dash.module_distribution.data, vec![3.0, 3.0, 3.0]);
        assert_eq!(dash.nr17_band_profile.data, vec![0.0, 2.0, 1.0]);
        assert_eq!(dash.top_agents.labels, vec!["Ruído", "Calor"]);
        assert_eq!(dash.nr17_score_by_sector.data, vec![15.0, 8.0]);
        assert_eq!(dash.exams_per_month.labels, vec!["2025-01", "2025-02"]);
        assert_eq!(dash.exams_per_month.data, vec![1.0, 2.0]);
        assert_eq!(dash.ltcat_by_sector.labels, vec!["Caldeiraria", "Pintura"]);
        assert_eq!(dash.ltcat_by_framing.data, vec![2.0, 1.0]);
        assert_eq!(dash.charts().len(), 7);
    }
}
