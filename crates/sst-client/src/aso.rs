//! ASO exam records: `/aso/records`.

use serde::{Deserialize, Serialize};
use sst_core::entities::{ExamDraft, ExamRecord};

use crate::wire::{self, parse_list, parse_one};
use crate::{ApiClient, ClientError};

const PATH: &str = "/aso/records";
const ENTITY: &str = "aso record";

#[derive(Deserialize)]
struct ExamWire {
    id: i64,
    nome: Option<String>,
    cpf: Option<String>,
    funcao: Option<String>,
    setor: Option<String>,
    #[serde(alias = "tipoExame")]
    tipo_exame: Option<String>,
    #[serde(alias = "dataExame")]
    data_exame: Option<String>,
    medico: Option<String>,
    resultado: Option<String>,
    created_at: Option<String>,
}

impl TryFrom<ExamWire> for ExamRecord {
    type Error = String;

    fn try_from(w: ExamWire) -> Result<Self, Self::Error> {
        let id = w.id;
        let exam_date = wire::required(id, "data_exame", w.data_exame)?;
        Ok(Self {
            id,
            name: wire::required(id, "nome", w.nome)?,
            document_id: wire::required(id, "cpf", w.cpf)?,
            function: wire::required(id, "funcao", w.funcao)?,
            sector: w.setor.unwrap_or_default(),
            exam_type: wire::required(id, "tipo_exame", w.tipo_exame)?,
            exam_date: wire::date(id, "data_exame", &exam_date)?,
            examiner: wire::optional(w.medico),
            outcome: wire::required(id, "resultado", w.resultado)?,
            created_at: wire::optional(w.created_at)
                .map(|raw| wire::timestamp(id, "created_at", &raw))
                .transpose()?,
        })
    }
}

#[derive(Serialize)]
struct ExamPayload<'a> {
    nome: &'a str,
    cpf: &'a str,
    funcao: &'a str,
    setor: &'a str,
    tipo_exame: &'a str,
    data_exame: chrono::NaiveDate,
    medico: Option<&'a str>,
    resultado: &'a str,
}

impl<'a> From<&'a ExamDraft> for ExamPayload<'a> {
    fn from(d: &'a ExamDraft) -> Self {
        Self {
            nome: &d.name,
            cpf: &d.document_id,
            funcao: &d.function,
            setor: &d.sector,
            tipo_exame: &d.exam_type,
            data_exame: d.exam_date,
            medico: d.examiner.as_deref(),
            resultado: &d.outcome,
        }
    }
}

impl ApiClient {
    /// List exam records, newest first as the backend orders them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure or a malformed row.
    pub async fn list_exams(&self) -> Result<Vec<ExamRecord>, ClientError> {
        parse_list::<ExamWire, _>(ENTITY, self.get(PATH).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Invalid`] without a request when the draft is
    /// incomplete, otherwise as [`Self::list_exams`].
    pub async fn create_exam(&self, draft: &ExamDraft) -> Result<ExamRecord, ClientError> {
        draft.validate()?;
        parse_one::<ExamWire, _>(ENTITY, self.post(PATH, &ExamPayload::from(draft)).await?)
    }

    /// # Errors
    ///
    /// As [`Self::create_exam`].
    pub async fn update_exam(&self, id: i64, draft: &ExamDraft) -> Result<ExamRecord, ClientError> {
        draft.validate()?;
        let path = format!("{PATH}/{id}");
        parse_one::<ExamWire, _>(ENTITY, self.put(&path, &ExamPayload::from(draft)).await?)
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on request failure.
    pub async fn delete_exam(&self, id: i64) -> Result<(), ClientError> {
        self.delete(&format!("{PATH}/{id}")).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_backend_and_camel_case_rows() {
        let body = serde_json::json!([
            {
                "id": 2,
                "nome": "Maria Souza",
                "cpf": "123.456.789-00",
                "funcao": "Soldadora",
                "setor": "Solda",
                "tipo_exame": "Periódico",
                "data_exame": "2025-03-14",
                "medico": null,
                "resultado": "Apto",
                "created_at": "2025-03-14T10:00:00.123456"
            },
            {
                "id": 1,
                "nome": "João",
                "cpf": "987",
                "funcao": "Pintor",
                "tipoExame": "Admissional",
                "dataExame": "2025-01-02",
                "resultado": "Inapto"
            }
        ]);

        let rows: Vec<ExamRecord> = parse_list::<ExamWire, _>(ENTITY, Some(body)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].document_id, "123.456.789-00");
        assert!(rows[0].created_at.is_some());
        assert_eq!(rows[1].exam_type, "Admissional");
        assert_eq!(rows[1].sector, "");
        assert!(rows[1].examiner.is_none());
    }

    #[test]
    fn missing_cpf_is_malformed() {
        let body = serde_json::json!([{
            "id": 5, "nome": "Ana", "funcao": "x", "tipo_exame": "y",
            "data_exame": "2025-01-01", "resultado": "Apto"
        }]);
        let err = parse_list::<ExamWire, ExamRecord>(ENTITY, Some(body)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected response from server: aso record: #5 is missing `cpf`"
        );
    }

    #[test]
    fn payload_uses_backend_names() {
        let draft = ExamDraft {
            name: "Ana".into(),
            document_id: "1".into(),
            function: "Op".into(),
            sector: "Prod".into(),
            exam_type: "Admissional".into(),
            exam_date: chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            examiner: None,
            outcome: "Apto".into(),
        };
        let json = serde_json::to_value(ExamPayload::from(&draft)).unwrap();
        assert_eq!(json["tipo_exame"], "Admissional");
        assert_eq!(json["data_exame"], "2025-02-01");
        assert_eq!(json["medico"], serde_json::Value::Null);
    }
}
