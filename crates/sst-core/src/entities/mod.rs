//! Canonical record structs for every module.
//!
//! Each record mirrors one backend table. Field names here are the
//! canonical English names; the Portuguese wire names are mapped in
//! `sst-client` in a single parsing step. Every record carries an integer
//! `id` used as the table row key. Each module also has a `*Draft` type:
//! the payload of a create or update request, validated before it is sent.

mod aso;
mod ltcat;
mod nr17;
mod pgr;

pub use aso::{EXAM_OUTCOMES, EXAM_TYPES, ExamDraft, ExamRecord};
pub use ltcat::{
    CLASSIFICATIONS, EnvironmentalHazardRecord, HazardRecordDraft, LEGAL_FRAMING_NONE,
};
pub use nr17::{AssessmentDraft, ErgonomicAssessment, WORKSTATION_TYPES};
pub use pgr::{
    Action, ActionDraft, Company, CompanyDraft, Hazard, HazardDraft, Risk, RiskDraft, Sector,
    SectorDraft, check_factor,
};

use crate::errors::CoreError;

/// A record with a row key.
pub trait Keyed {
    fn id(&self) -> i64;
}

/// Find the record saved last: the one matching `last_id` when it is still
/// present, otherwise the final element of the list.
#[must_use]
pub fn pick_last<T: Keyed>(items: &[T], last_id: Option<i64>) -> Option<&T> {
    last_id
        .and_then(|id| items.iter().find(|item| item.id() == id))
        .or_else(|| items.last())
}

/// Find a record by id.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] when no record has that id.
pub fn find_by_id<'a, T: Keyed>(items: &'a [T], entity: &str, id: i64) -> Result<&'a T, CoreError> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| CoreError::NotFound {
            entity: entity.to_string(),
            id,
        })
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

macro_rules! impl_keyed {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_keyed!(
    ExamRecord,
    ErgonomicAssessment,
    EnvironmentalHazardRecord,
    Company,
    Sector,
    Hazard,
    Risk,
    Action,
);
