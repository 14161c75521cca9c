//! Cross-cutting error types.
//!
//! Transport and storage errors are defined in their respective crates
//! (`ClientError`, `AuthError`, `MirrorError`). They converge into
//! `anyhow::Error` in the `sst` binary.

use thiserror::Error;

/// Errors that can be raised by the pure domain layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A record referenced by id is not present in the current list.
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: i64 },

    /// An operation needs a parent selection that is not there yet.
    #[error("select a {parent} first")]
    MissingSelection { parent: String },

    /// A selection was attempted at a level that cannot be selected.
    #[error("{level} entries cannot be selected")]
    NotSelectable { level: String },

    /// Input failed validation (required field, rating range, thresholds).
    #[error("validation error: {0}")]
    Validation(String),
}
