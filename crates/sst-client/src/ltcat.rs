//! LTCAT environmental-hazard records: `/ltcat/records`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sst_core::entities::{EnvironmentalHazardRecord, HazardRecordDraft, LEGAL_FRAMING_NONE};
use sst_core::enums::PpeEffectiveness;

use crate::wire::{self, parse_list, parse_one};
use crate::{ApiClient, ClientError};

const PATH: &str = "/ltcat/records";
const ENTITY: &str = "ltcat record";

#[derive(Deserialize)]
struct HazardRecordWire {
    id: i64,
    empresa: Option<String>,
    cnpj: Option<String>,
    setor: Option<String>,
    funcao: Option<String>,
    ghe: Option<String>,
    agente: Option<String>,
    classificacao: Option<String>,
    fonte: Option<String>,
    meio: Option<String>,
    intensidade: Option<Value>,
    unidade: Option<String>,
    jornada: Option<Value>,
    #[serde(alias = "diasSemana")]
    dias_semana: Option<Value>,
    #[serde(alias = "tempoAnos")]
    tempo_anos: Option<Value>,
    #[serde(alias = "epiEficaz")]
    epi_eficaz: Option<String>,
    enquadramento: Option<String>,
    #[serde(alias = "data")]
    data_avaliacao: Option<String>,
    responsavel: Option<String>,
    observacoes: Option<String>,
}

impl TryFrom<HazardRecordWire> for EnvironmentalHazardRecord {
    type Error = String;

    fn try_from(w: HazardRecordWire) -> Result<Self, Self::Error> {
        let id = w.id;
        let ppe_effective = match wire::optional(w.epi_eficaz) {
            None => PpeEffectiveness::default(),
            Some(raw) => PpeEffectiveness::from_label(&raw)
                .ok_or_else(|| format!("#{id} has an unknown `epi_eficaz`: {raw:?}"))?,
        };
        // Intensity is free text ("85 dB(A)"), but older rows stored a number.
        let intensity = match w.intensidade {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => wire::optional(Some(s)),
            Some(other) => Some(other.to_string()),
        };

        Ok(Self {
            id,
            company: wire::required(id, "empresa", w.empresa)?,
            tax_id: wire::optional(w.cnpj),
            sector: wire::required(id, "setor", w.setor)?,
            function: wire::required(id, "funcao", w.funcao)?,
            exposure_group: wire::optional(w.ghe),
            agent: wire::required(id, "agente", w.agente)?,
            classification: w.classificacao.unwrap_or_default(),
            source: wire::optional(w.fonte),
            medium: wire::optional(w.meio),
            intensity,
            unit: wire::optional(w.unidade),
            daily_hours: wire::flex_f64(id, "jornada", w.jornada.as_ref())?,
            days_per_week: wire::flex_u8(id, "dias_semana", w.dias_semana.as_ref())?,
            exposure_years: wire::flex_f64(id, "tempo_anos", w.tempo_anos.as_ref())?,
            ppe_effective,
            legal_framing: wire::optional(w.enquadramento)
                .unwrap_or_else(|| LEGAL_FRAMING_NONE.to_string()),
            assessed_on: wire::optional_date(id, "data_avaliacao", w.data_avaliacao)?,
            responsible: wire::optional(w.responsavel),
            notes: wire::optional(w.observacoes),
        })
    }
}

#[derive(Serialize)]
struct HazardRecordPayload<'a> {
    empresa: &'a str,
    cnpj: Option<&'a str>,
    setor: &'a str,
    funcao: &'a str,
    ghe: Option<&'a str>,
    agente: &'a str,
    classificacao: &'a str,
    fonte: Option<&'a str>,
    meio: Option<&'a str>,
    intensidade: Option<&'a str>,
    unidade: Option<&'a str>,
    jornada: Option<f64>,
    dias_semana: Option<u8>,
    tempo_anos: Option<f64>,
    epi_eficaz: &'static str,
    enquadramento: &'a str,
    data_avaliacao: Option<chrono::NaiveDate>,
    responsavel: Option<&'a str>,
    observacoes: Option<&'a str>,
}

impl<'a> From<&'a HazardRecordDraft> for HazardRecordPayload<'a> {
    fn from(d: &'a HazardRecordDraft) -> Self {
        let framing = d.legal_framing.trim();
        Self {
            empresa: &d.company,
            cnpj: d.tax_id.as_deref(),
            setor: &d.sector,
            funcao: &d.function,
            ghe: d.exposure_group.as_deref(),
            agente: &d.agent,
            classificacao: &d.classification,
            fonte: d.source.as_deref(),
            meio: d.medium.as_deref(),
            intensidade: d.intensity.as_deref(),
            unidade: d.unit.as_deref(),
            jornada: d.daily_hours,
            dias_semana: d.days_per_week,
            tempo_anos: d.exposure_years,
            epi_eficaz: d.ppe_effective.label(),
            enquadramento: if framing.is_empty() { LEGAL_FRAMING_NONE } else { framing },
            data_avaliacao: d.assessed_on,
            responsavel: d.responsible.as_deref(),
            observacoes: d.notes.as_deref(),
        }
    }
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure or a malformed row.
    pub async fn list_hazard_records(&self) -> Result<Vec<EnvironmentalHazardRecord>, ClientError> {
        parse_list::<HazardRecordWire, _>(ENTITY, self.get(PATH).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] without a request when the draft is
    /// incomplete or its exposure figures are out of range.
    pub async fn create_hazard_record(
        &self,
        draft: &HazardRecordDraft,
    ) -> Result<EnvironmentalHazardRecord, ClientError> {
        draft.validate()?;
        let payload = HazardRecordPayload::from(draft);
        parse_one::<HazardRecordWire, _>(ENTITY, self.post(PATH, &payload).await?)
    }

    /// # Errors
    ///
    /// As [`Self::create_hazard_record`]; a missing id comes back as
    /// [`ClientError::Api`] with status 404.
    pub async fn update_hazard_record(
        &self,
        id: i64,
        draft: &HazardRecordDraft,
    ) -> Result<EnvironmentalHazardRecord, ClientError> {
        draft.validate()?;
        let payload = HazardRecordPayload::from(draft);
        parse_one::<HazardRecordWire, _>(ENTITY, self.put(&format!("{PATH}/{id}"), &payload).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure.
    pub async fn delete_hazard_record(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{PATH}/{id}")).await.map(|_| ())
    }
}
