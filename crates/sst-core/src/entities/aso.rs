use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::require;
use crate::errors::CoreError;

/// Exam types offered on the ASO form. The first is the form default.
pub const EXAM_TYPES: [&str; 5] = [
    "Admissional",
    "Periódico",
    "Retorno ao trabalho",
    "Mudança de função",
    "Demissional",
];

/// Exam outcomes offered on the ASO form. The first is the form default.
pub const EXAM_OUTCOMES: [&str; 3] = ["Apto", "Inapto", "Apto com restrições"];

/// An occupational health certificate (ASO) exam record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExamRecord {
    pub id: i64,
    pub name: String,
    /// Worker document number (CPF).
    pub document_id: String,
    pub function: String,
    pub sector: String,
    pub exam_type: String,
    pub exam_date: NaiveDate,
    pub examiner: Option<String>,
    pub outcome: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating or updating an [`ExamRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExamDraft {
    pub name: String,
    pub document_id: String,
    pub function: String,
    pub sector: String,
    pub exam_type: String,
    pub exam_date: NaiveDate,
    pub examiner: Option<String>,
    pub outcome: String,
}

impl ExamDraft {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when name, document, function,
    /// exam type or outcome is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require("name", &self.name)?;
        require("document_id", &self.document_id)?;
        require("function", &self.function)?;
        require("exam_type", &self.exam_type)?;
        require("outcome", &self.outcome)
    }
}

impl From<&ExamRecord> for ExamDraft {
    fn from(record: &ExamRecord) -> Self {
        Self {
            name: record.name.clone(),
            document_id: record.document_id.clone(),
            function: record.function.clone(),
            sector: record.sector.clone(),
            exam_type: record.exam_type.clone(),
            exam_date: record.exam_date,
            examiner: record.examiner.clone(),
            outcome: record.outcome.clone(),
        }
    }
}
