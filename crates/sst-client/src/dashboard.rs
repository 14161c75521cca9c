//! Pre-aggregated dashboard summaries: `/api/dashboard/*`.
//!
//! Every field is optional on the wire; missing counters read as zero and
//! missing lists as empty. Each summary turns itself into the chart series
//! the dashboard shows.

use serde::{Deserialize, Serialize};
use sst_core::chart::ChartSeries;
use sst_core::enums::RiskBand;

use crate::{ApiClient, ClientError};

const GENERAL: &str = "/api/dashboard/geral";
const NR17: &str = "/api/dashboard/nr17";
const PCMSO: &str = "/api/dashboard/pcmsos";
const PGR: &str = "/api/dashboard/pgr";
const LTCAT: &str = "/api/dashboard/ltcat";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleCounts {
    pub aso: f64,
    pub nr17: f64,
    pub ltcat: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandCounts {
    #[serde(alias = "baixo")]
    pub low: f64,
    #[serde(alias = "medio")]
    pub medium: f64,
    #[serde(alias = "alto")]
    pub high: f64,
}

impl BandCounts {
    fn series(self, title: &str) -> ChartSeries {
        ChartSeries::from_pairs(
            title,
            RiskBand::ALL
                .into_iter()
                .zip([self.low, self.medium, self.high])
                .map(|(band, n)| (band.label(), n)),
        )
    }
}

/// A `{label, value}` pair as the backend names it per list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bucket {
    #[serde(
        alias = "nome",
        alias = "mes",
        alias = "categoria",
        alias = "setor",
        alias = "codigo"
    )]
    pub label: String,
    #[serde(alias = "ocorrencias", alias = "total", alias = "score_medio")]
    pub value: f64,
}

fn buckets(title: &str, items: &[Bucket]) -> ChartSeries {
    ChartSeries::from_pairs(title, items.iter().map(|b| (b.label.clone(), b.value)))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    #[serde(alias = "modulo")]
    pub module: String,
    #[serde(alias = "data")]
    pub date: String,
    #[serde(alias = "descricao")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSummary {
    #[serde(alias = "total_asos")]
    pub total_exams: f64,
    #[serde(alias = "total_nr17")]
    pub total_assessments: f64,
    #[serde(alias = "total_ltcat")]
    pub total_hazard_records: f64,
    #[serde(alias = "risco_medio_nr17")]
    pub nr17_mean_score: Option<f64>,
    #[serde(alias = "distribuicao_modulos")]
    pub module_distribution: ModuleCounts,
    #[serde(alias = "perfil_risco_nr17")]
    pub nr17_band_profile: BandCounts,
    #[serde(alias = "agentes_top5")]
    pub top_agents: Vec<Bucket>,
    #[serde(alias = "ultimas_atividades")]
    pub recent_activity: Vec<Activity>,
}

impl GeneralSummary {
    #[must_use]
    pub fn charts(&self) -> Vec<ChartSeries> {
        let m = self.module_distribution;
        vec![
            ChartSeries::from_pairs(
                "Registros por módulo",
                [("ASO", m.aso), ("NR-17", m.nr17), ("LTCAT", m.ltcat)],
            ),
            self.nr17_band_profile.series("Perfil de risco NR-17"),
            buckets("Agentes mais frequentes", &self.top_agents),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nr17Summary {
    #[serde(alias = "perfil_risco_nr17")]
    pub band_profile: BandCounts,
    #[serde(alias = "scores_por_setor")]
    pub score_by_sector: Vec<Bucket>,
}

impl Nr17Summary {
    #[must_use]
    pub fn charts(&self) -> Vec<ChartSeries> {
        vec![
            self.band_profile.series("Perfil de risco NR-17"),
            buckets("Score médio por setor", &self.score_by_sector),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamStatus {
    #[serde(alias = "validos")]
    pub valid: f64,
    #[serde(alias = "vencidos")]
    pub expired: f64,
    #[serde(alias = "a_vencer")]
    pub expiring: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcmsoSummary {
    #[serde(alias = "exames_por_mes")]
    pub exams_per_month: Vec<Bucket>,
    #[serde(alias = "status_asos")]
    pub exam_status: ExamStatus,
}

impl PcmsoSummary {
    #[must_use]
    pub fn charts(&self) -> Vec<ChartSeries> {
        let s = self.exam_status;
        vec![
            buckets("ASOs por mês", &self.exams_per_month),
            ChartSeries::from_pairs(
                "Situação dos ASOs",
                [
                    ("Válidos", s.valid),
                    ("Vencidos", s.expired),
                    ("A vencer (30d)", s.expiring),
                ],
            ),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionProgress {
    #[serde(alias = "planejadas")]
    pub planned: f64,
    #[serde(alias = "em_andamento")]
    pub in_progress: f64,
    #[serde(alias = "concluidas")]
    pub done: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PgrSummary {
    #[serde(alias = "perigos_por_categoria")]
    pub hazards_by_category: Vec<Bucket>,
    #[serde(alias = "status_acoes")]
    pub action_progress: ActionProgress,
}

impl PgrSummary {
    #[must_use]
    pub fn charts(&self) -> Vec<ChartSeries> {
        let a = self.action_progress;
        vec![
            buckets("Perigos por categoria", &self.hazards_by_category),
            ChartSeries::from_pairs(
                "Status das ações",
                [
                    ("Planejadas", a.planned),
                    ("Em andamento", a.in_progress),
                    ("Concluídas", a.done),
                ],
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LtcatSummary {
    #[serde(alias = "agentes_por_setor")]
    pub agents_by_sector: Vec<Bucket>,
    #[serde(alias = "enquadramento_por_codigo")]
    pub framing_by_code: Vec<Bucket>,
}

impl LtcatSummary {
    #[must_use]
    pub fn charts(&self) -> Vec<ChartSeries> {
        vec![
            buckets("Agentes por setor", &self.agents_by_sector),
            buckets("Enquadramento", &self.framing_by_code),
        ]
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure; an empty body is
    /// [`ClientError::Malformed`].
    pub async fn dashboard_general(&self) -> Result<GeneralSummary, ClientError> {
        self.get_json(GENERAL).await
    }

    /// # Errors
    ///
    /// As [`Self::dashboard_general`].
    pub async fn dashboard_nr17(&self) -> Result<Nr17Summary, ClientError> {
        self.get_json(NR17).await
    }

    /// # Errors
    ///
    /// As [`Self::dashboard_general`].
    pub async fn dashboard_pcmso(&self) -> Result<PcmsoSummary, ClientError> {
        self.get_json(PCMSO).await
    }

    /// # Errors
    ///
    /// As [`Self::dashboard_general`].
    pub async fn dashboard_pgr(&self) -> Result<PgrSummary, ClientError> {
        self.get_json(PGR).await
    }

    /// # Errors
    ///
    /// As [`Self::dashboard_general`].
    pub async fn dashboard_ltcat(&self) -> Result<LtcatSummary, ClientError> {
        self.get_json(LTCAT).await
    }
}
