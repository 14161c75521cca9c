//! NR-17 ergonomic assessments: `/nr17/records`.
//!
//! The backend stores only the summed score and its band. Both are computed
//! here from the draft's ratings before the POST. Rows read back get their
//! band re-derived from the score, since the stored `risco` may have been
//! written under different thresholds.

use serde::{Deserialize, Serialize};
use sst_core::entities::{AssessmentDraft, ErgonomicAssessment};
use sst_core::risk::Nr17Thresholds;

use crate::wire::{self, parse_list, parse_one};
use crate::{ApiClient, ClientError};

const PATH: &str = "/nr17/records";
const ENTITY: &str = "nr17 assessment";

#[derive(Deserialize)]
struct AssessmentWire {
    id: i64,
    empresa: Option<String>,
    setor: Option<String>,
    funcao: Option<String>,
    trabalhador: Option<String>,
    #[serde(alias = "tipoPosto")]
    tipo_posto: Option<String>,
    #[serde(alias = "dataAvaliacao", alias = "data")]
    data_avaliacao: Option<String>,
    score: Option<i64>,
    observacoes: Option<String>,
}

impl TryFrom<AssessmentWire> for ErgonomicAssessment {
    type Error = String;

    fn try_from(w: AssessmentWire) -> Result<Self, Self::Error> {
        let id = w.id;
        let assessed_on = wire::required(id, "data_avaliacao", w.data_avaliacao)?;
        let score = w
            .score
            .ok_or_else(|| format!("#{id} is missing `score`"))
            .and_then(|s| u32::try_from(s).map_err(|_| format!("#{id} has a negative `score`")))?;

        Ok(Self {
            id,
            company: wire::optional(w.empresa),
            sector: wire::required(id, "setor", w.setor)?,
            function: wire::required(id, "funcao", w.funcao)?,
            worker: wire::optional(w.trabalhador),
            workstation_type: w.tipo_posto.unwrap_or_default(),
            assessed_on: wire::date(id, "data_avaliacao", &assessed_on)?,
            score,
            band: Nr17Thresholds::default().classify(score),
            notes: wire::optional(w.observacoes),
        })
    }
}

#[derive(Serialize)]
struct AssessmentPayload<'a> {
    empresa: Option<&'a str>,
    setor: &'a str,
    funcao: &'a str,
    trabalhador: Option<&'a str>,
    tipo_posto: &'a str,
    data_avaliacao: chrono::NaiveDate,
    score: u32,
    risco: &'static str,
    observacoes: Option<&'a str>,
}

impl<'a> AssessmentPayload<'a> {
    fn new(d: &'a AssessmentDraft, thresholds: Nr17Thresholds) -> Self {
        Self {
            empresa: d.company.as_deref(),
            setor: &d.sector,
            funcao: &d.function,
            trabalhador: d.worker.as_deref(),
            tipo_posto: &d.workstation_type,
            data_avaliacao: d.assessed_on,
            score: d.score(),
            risco: d.band(thresholds).label(),
            observacoes: d.notes.as_deref(),
        }
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure or a malformed row.
    pub async fn list_assessments(
        &self,
        thresholds: Nr17Thresholds,
    ) -> Result<Vec<ErgonomicAssessment>, ClientError> {
        let rows: Vec<ErgonomicAssessment> =
            parse_list::<AssessmentWire, _>(ENTITY, self.get(PATH).await?)?;
        Ok(rows.into_iter().map(|row| row.classified(thresholds)).collect())
    }

    /// Score, classify and save an assessment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] without a request when the draft is
    /// incomplete or a rating is out of range.
    pub async fn create_assessment(
        &self,
        draft: &AssessmentDraft,
        thresholds: Nr17Thresholds,
    ) -> Result<ErgonomicAssessment, ClientError> {
        draft.validate()?;
        let payload = AssessmentPayload::new(draft, thresholds);
        parse_one::<AssessmentWire, ErgonomicAssessment>(ENTITY, self.post(PATH, &payload).await?)
            .map(|saved| saved.classified(thresholds))
    }

    /// # Errors
    ///
    /// As [`Self::create_assessment`].
    pub async fn update_assessment(
        &self,
        id: i64,
        draft: &AssessmentDraft,
        thresholds: Nr17Thresholds,
    ) -> Result<ErgonomicAssessment, ClientError> {
        draft.validate()?;
        let payload = AssessmentPayload::new(draft, thresholds);
        let body = self.put(&format!("{PATH}/{id}"), &payload).await?;
        parse_one::<AssessmentWire, ErgonomicAssessment>(ENTITY, body)
            .map(|saved| saved.classified(thresholds))
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure.
    pub async fn delete_assessment(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{PATH}/{id}")).await.map(|_| ())
    }
}
