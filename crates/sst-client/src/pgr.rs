//! PGR hierarchy: `/pgr/{companies,sectors,hazards,risks,actions}`.
//!
//! Children are listed through `by-<parent>/{id}` routes. Every level is
//! created with a POST on its collection and updated or deleted at
//! `/{collection}/{id}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sst_core::entities::{
    Action, ActionDraft, Company, CompanyDraft, Hazard, HazardDraft, Risk, RiskDraft, Sector,
    SectorDraft, check_factor,
};
use sst_core::enums::ActionStatus;
use sst_core::selection::PgrLevel;

use crate::wire::{self, parse_list, parse_one};
use crate::{ApiClient, ClientError};

/// Collection path for a level.
#[must_use]
pub const fn collection(level: PgrLevel) -> &'static str {
    match level {
        PgrLevel::Company => "/pgr/companies",
        PgrLevel::Sector => "/pgr/sectors",
        PgrLevel::Hazard => "/pgr/hazards",
        PgrLevel::Risk => "/pgr/risks",
        PgrLevel::Action => "/pgr/actions",
    }
}

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct CompanyWire {
    id: i64,
    #[serde(alias = "nome")]
    name: Option<String>,
    cnpj: Option<String>,
    endereco: Option<String>,
    atividade: Option<String>,
    grau_risco: Option<Value>,
}

impl TryFrom<CompanyWire> for Company {
    type Error = String;

    fn try_from(w: CompanyWire) -> Result<Self, Self::Error> {
        let id = w.id;
        let risk_grade = wire::flex_u8(id, "grau_risco", w.grau_risco.as_ref())?;
        if let Some(grade) = risk_grade
            && !(1..=4).contains(&grade)
        {
            return Err(format!("#{id} has an out-of-range `grau_risco`: {grade}"));
        }
        Ok(Self {
            id,
            name: wire::required(id, "name", w.name)?,
            tax_id: wire::optional(w.cnpj),
            address: wire::optional(w.endereco),
            activity: wire::optional(w.atividade),
            risk_grade,
        })
    }
}

#[derive(Deserialize)]
struct SectorWire {
    id: i64,
    company_id: i64,
    nome: Option<String>,
    descricao: Option<String>,
}

impl TryFrom<SectorWire> for Sector {
    type Error = String;

    fn try_from(w: SectorWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: w.id,
            company_id: w.company_id,
            name: wire::required(w.id, "nome", w.nome)?,
            description: wire::optional(w.descricao),
        })
    }
}

#[derive(Deserialize)]
struct HazardWire {
    id: i64,
    sector_id: i64,
    nome: Option<String>,
    agente: Option<String>,
    fonte: Option<String>,
    descricao: Option<String>,
}

impl TryFrom<HazardWire> for Hazard {
    type Error = String;

    fn try_from(w: HazardWire) -> Result<Self, Self::Error> {
        Ok(Self {
            id: w.id,
            sector_id: w.sector_id,
            name: wire::required(w.id, "nome", w.nome)?,
            agent: wire::optional(w.agente),
            source: wire::optional(w.fonte),
            description: wire::optional(w.descricao),
        })
    }
}

#[derive(Deserialize)]
struct RiskWire {
    id: i64,
    hazard_id: i64,
    probabilidade: Option<i64>,
    severidade: Option<i64>,
    medidas_existentes: Option<String>,
}

impl TryFrom<RiskWire> for Risk {
    type Error = String;

    fn try_from(w: RiskWire) -> Result<Self, Self::Error> {
        let id = w.id;
        let factor = |field: &str, raw: Option<i64>| {
            let value = raw.ok_or_else(|| format!("#{id} is missing `{field}`"))?;
            check_factor(field, value).map_err(|e| format!("#{id}: {e}"))
        };
        Ok(Self {
            id,
            hazard_id: w.hazard_id,
            probability: factor("probabilidade", w.probabilidade)?,
            severity: factor("severidade", w.severidade)?,
            existing_measures: wire::optional(w.medidas_existentes),
        })
    }
}

#[derive(Deserialize)]
struct ActionWire {
    id: i64,
    risk_id: i64,
    recomendacao: Option<String>,
    tipo: Option<String>,
    prazo: Option<String>,
    responsavel: Option<String>,
    status: Option<String>,
}

impl TryFrom<ActionWire> for Action {
    type Error = String;

    fn try_from(w: ActionWire) -> Result<Self, Self::Error> {
        let id = w.id;
        let status = match wire::optional(w.status) {
            None => ActionStatus::default(),
            Some(raw) => serde_json::from_value(Value::String(raw.clone()))
                .map_err(|_| format!("#{id} has an unknown `status`: {raw:?}"))?,
        };
        Ok(Self {
            id,
            risk_id: w.risk_id,
            recommendation: wire::required(id, "recomendacao", w.recomendacao)?,
            kind: wire::optional(w.tipo),
            deadline: wire::optional_date(id, "prazo", w.prazo)?,
            responsible: wire::optional(w.responsavel),
            status,
        })
    }
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CompanyPayload<'a> {
    name: &'a str,
    cnpj: Option<&'a str>,
    endereco: Option<&'a str>,
    atividade: Option<&'a str>,
    grau_risco: Option<u8>,
}

impl<'a> From<&'a CompanyDraft> for CompanyPayload<'a> {
    fn from(d: &'a CompanyDraft) -> Self {
        Self {
            name: &d.name,
            cnpj: d.tax_id.as_deref(),
            endereco: d.address.as_deref(),
            atividade: d.activity.as_deref(),
            grau_risco: d.risk_grade,
        }
    }
}

#[derive(Serialize)]
struct SectorPayload<'a> {
    company_id: i64,
    nome: &'a str,
    descricao: Option<&'a str>,
}

impl<'a> From<&'a SectorDraft> for SectorPayload<'a> {
    fn from(d: &'a SectorDraft) -> Self {
        Self {
            company_id: d.company_id,
            nome: &d.name,
            descricao: d.description.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct HazardPayload<'a> {
    sector_id: i64,
    nome: &'a str,
    agente: Option<&'a str>,
    fonte: Option<&'a str>,
    descricao: Option<&'a str>,
}

impl<'a> From<&'a HazardDraft> for HazardPayload<'a> {
    fn from(d: &'a HazardDraft) -> Self {
        Self {
            sector_id: d.sector_id,
            nome: &d.name,
            agente: d.agent.as_deref(),
            fonte: d.source.as_deref(),
            descricao: d.description.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct RiskPayload<'a> {
    hazard_id: i64,
    probabilidade: u8,
    severidade: u8,
    medidas_existentes: Option<&'a str>,
}

impl<'a> From<&'a RiskDraft> for RiskPayload<'a> {
    fn from(d: &'a RiskDraft) -> Self {
        Self {
            hazard_id: d.hazard_id,
            probabilidade: d.probability,
            severidade: d.severity,
            medidas_existentes: d.existing_measures.as_deref(),
        }
    }
}

#[derive(Serialize)]
struct ActionPayload<'a> {
    risk_id: i64,
    recomendacao: &'a str,
    tipo: Option<&'a str>,
    prazo: Option<chrono::NaiveDate>,
    responsavel: Option<&'a str>,
    status: &'static str,
}

impl<'a> From<&'a ActionDraft> for ActionPayload<'a> {
    fn from(d: &'a ActionDraft) -> Self {
        Self {
            risk_id: d.risk_id,
            recomendacao: &d.recommendation,
            tipo: d.kind.as_deref(),
            prazo: d.deadline,
            responsavel: d.responsible.as_deref(),
            status: d.status.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resource methods
// ---------------------------------------------------------------------------

impl ApiClient {
    async fn pgr_list<W, T>(&self, level: PgrLevel, parent: Option<i64>) -> Result<Vec<T>, ClientError>
    where
        W: DeserializeOwned,
        T: TryFrom<W, Error = String>,
    {
        let path = match (level.parent(), parent) {
            (Some(parent_level), Some(parent_id)) => {
                format!("{}/by-{parent_level}/{parent_id}", collection(level))
            }
            _ => collection(level).to_string(),
        };
        parse_list::<W, T>(level.as_str(), self.get(&path).await?)
    }

    async fn pgr_create<W, T, P>(&self, level: PgrLevel, payload: &P) -> Result<T, ClientError>
    where
        W: DeserializeOwned,
        T: TryFrom<W, Error = String>,
        P: Serialize,
    {
        parse_one::<W, T>(level.as_str(), self.post(collection(level), payload).await?)
    }

    async fn pgr_update<W, T, P>(&self, level: PgrLevel, id: i64, payload: &P) -> Result<T, ClientError>
    where
        W: DeserializeOwned,
        T: TryFrom<W, Error = String>,
        P: Serialize,
    {
        let path = format!("{}/{id}", collection(level));
        parse_one::<W, T>(level.as_str(), self.put(&path, payload).await?)
    }

    /// Delete the entry `id` at `level`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure.
    pub async fn pgr_delete(&self, level: PgrLevel, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{}/{id}", collection(level)))
            .await
            .map(|_| ())
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure or a malformed row.
    pub async fn list_companies(&self) -> Result<Vec<Company>, ClientError> {
        self.pgr_list::<CompanyWire, _>(PgrLevel::Company, None).await
    }

    /// # Errors
    ///
    /// As [`Self::list_companies`].
    pub async fn list_sectors(&self, company_id: i64) -> Result<Vec<Sector>, ClientError> {
        self.pgr_list::<SectorWire, _>(PgrLevel::Sector, Some(company_id))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::list_companies`].
    pub async fn list_hazards(&self, sector_id: i64) -> Result<Vec<Hazard>, ClientError> {
        self.pgr_list::<HazardWire, _>(PgrLevel::Hazard, Some(sector_id))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::list_companies`].
    pub async fn list_risks(&self, hazard_id: i64) -> Result<Vec<Risk>, ClientError> {
        self.pgr_list::<RiskWire, _>(PgrLevel::Risk, Some(hazard_id))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::list_companies`].
    pub async fn list_actions(&self, risk_id: i64) -> Result<Vec<Action>, ClientError> {
        self.pgr_list::<ActionWire, _>(PgrLevel::Action, Some(risk_id))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] without a request when the draft
    /// fails validation.
    pub async fn create_company(&self, draft: &CompanyDraft) -> Result<Company, ClientError> {
        draft.validate()?;
        self.pgr_create::<CompanyWire, _, _>(PgrLevel::Company, &CompanyPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`].
    pub async fn update_company(&self, id: i64, draft: &CompanyDraft) -> Result<Company, ClientError> {
        draft.validate()?;
        self.pgr_update::<CompanyWire, _, _>(PgrLevel::Company, id, &CompanyPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`].
    pub async fn create_sector(&self, draft: &SectorDraft) -> Result<Sector, ClientError> {
        draft.validate()?;
        self.pgr_create::<SectorWire, _, _>(PgrLevel::Sector, &SectorPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`].
    pub async fn update_sector(&self, id: i64, draft: &SectorDraft) -> Result<Sector, ClientError> {
        draft.validate()?;
        self.pgr_update::<SectorWire, _, _>(PgrLevel::Sector, id, &SectorPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`].
    pub async fn create_hazard(&self, draft: &HazardDraft) -> Result<Hazard, ClientError> {
        draft.validate()?;
        self.pgr_create::<HazardWire, _, _>(PgrLevel::Hazard, &HazardPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`].
    pub async fn update_hazard(&self, id: i64, draft: &HazardDraft) -> Result<Hazard, ClientError> {
        draft.validate()?;
        self.pgr_update::<HazardWire, _, _>(PgrLevel::Hazard, id, &HazardPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`]; probability and severity must be 1–5.
    pub async fn create_risk(&self, draft: &RiskDraft) -> Result<Risk, ClientError> {
        draft.validate()?;
        self.pgr_create::<RiskWire, _, _>(PgrLevel::Risk, &RiskPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_risk`].
    pub async fn update_risk(&self, id: i64, draft: &RiskDraft) -> Result<Risk, ClientError> {
        draft.validate()?;
        self.pgr_update::<RiskWire, _, _>(PgrLevel::Risk, id, &RiskPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`].
    pub async fn create_action(&self, draft: &ActionDraft) -> Result<Action, ClientError> {
        draft.validate()?;
        self.pgr_create::<ActionWire, _, _>(PgrLevel::Action, &ActionPayload::from(draft))
            .await
    }

    /// # Errors
    ///
    /// As [`Self::create_company`].
    pub async fn update_action(&self, id: i64, draft: &ActionDraft) -> Result<Action, ClientError> {
        draft.validate()?;
        self.pgr_update::<ActionWire, _, _>(PgrLevel::Action, id, &ActionPayload::from(draft))
            .await
    }
}
