//! # sst-core
//!
//! Core types for the occupational health and safety records client.
//!
//! This crate provides the foundational types shared across all `sst` crates:
//! - Canonical record structs for every module (ASO, NR-17, LTCAT, PGR)
//! - Risk-band enums and the threshold classifiers that produce them
//! - The pure PGR cascading selection state machine
//! - Chart series and local dashboard aggregation over mirrored lists
//! - Cross-cutting error types
//!
//! Nothing in here performs I/O. The HTTP client, the token store and the
//! local mirror live in `sst-client` and `sst-auth`.

pub mod chart;
pub mod dashboard;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod risk;
pub mod search;
pub mod selection;

pub use errors::CoreError;
