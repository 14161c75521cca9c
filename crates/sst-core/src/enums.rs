//! Risk bands, scales and status enums.
//!
//! Band enums serialize with the Portuguese labels the backend stores in its
//! `risco` column ("Baixo", "Médio", "Alto", "Crítico"). Accent-free and
//! lower-case spellings are accepted on input.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Colour class used when a band is shown in a table cell or chart bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Green,
    Yellow,
    Red,
}

// ---------------------------------------------------------------------------
// RiskBand
// ---------------------------------------------------------------------------

/// Three-band ergonomic risk classification (NR-17).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum RiskBand {
    #[serde(rename = "Baixo", alias = "baixo")]
    Low,
    #[serde(rename = "Médio", alias = "Medio", alias = "médio", alias = "medio")]
    Medium,
    #[serde(rename = "Alto", alias = "alto")]
    High,
}

impl RiskBand {
    /// All bands in ascending order. Chart buckets follow this order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Medium => "Médio",
            Self::High => "Alto",
        }
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Low => Tone::Green,
            Self::Medium => Tone::Yellow,
            Self::High => Tone::Red,
        }
    }

    /// Parse a stored label, tolerating case and a missing accent.
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "baixo" => Some(Self::Low),
            "médio" | "medio" => Some(Self::Medium),
            "alto" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PgrRiskLevel
// ---------------------------------------------------------------------------

/// Classification of a PGR risk level (probability × severity).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum PgrRiskLevel {
    #[serde(rename = "Baixo")]
    Low,
    #[serde(rename = "Médio")]
    Medium,
    #[serde(rename = "Alto")]
    High,
    #[serde(rename = "Crítico")]
    Critical,
}

impl PgrRiskLevel {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixo",
            Self::Medium => "Médio",
            Self::High => "Alto",
            Self::Critical => "Crítico",
        }
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Low => Tone::Green,
            Self::Medium => Tone::Yellow,
            Self::High | Self::Critical => Tone::Red,
        }
    }
}

impl fmt::Display for PgrRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// PgrScale
// ---------------------------------------------------------------------------

/// Threshold table used to classify PGR risk levels.
///
/// Two tables are in use and neither is authoritative:
///
/// ```text
/// four_band:  1..=4 Baixo | 5..=9 Médio | 10..=16 Alto | 17..=25 Crítico
/// three_band: 1..=5 Baixo | 6..=11 Médio | 12..=25 Alto
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PgrScale {
    #[default]
    FourBand,
    ThreeBand,
}

impl PgrScale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FourBand => "four_band",
            Self::ThreeBand => "three_band",
        }
    }
}

impl fmt::Display for PgrScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionStatus
// ---------------------------------------------------------------------------

/// Progress of a PGR control action.
///
/// ```text
/// pendente → em_andamento → concluida
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ActionStatus {
    #[default]
    #[serde(
        rename = "pendente",
        alias = "Pendente",
        alias = "planejada",
        alias = "Planejada"
    )]
    Pending,
    #[serde(
        rename = "em_andamento",
        alias = "Em andamento",
        alias = "em andamento"
    )]
    InProgress,
    #[serde(
        rename = "concluida",
        alias = "concluída",
        alias = "Concluída",
        alias = "Concluído",
        alias = "concluido"
    )]
    Done,
}

impl ActionStatus {
    /// Wire value sent to the backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::InProgress => "em_andamento",
            Self::Done => "concluida",
        }
    }

    /// Human label used in tables and chart buckets.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::InProgress => "Em andamento",
            Self::Done => "Concluída",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PpeEffectiveness
// ---------------------------------------------------------------------------

/// Whether the personal protective equipment neutralizes the exposure.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum PpeEffectiveness {
    #[default]
    #[serde(rename = "Sim", alias = "sim")]
    Effective,
    #[serde(rename = "Não", alias = "Nao", alias = "não", alias = "nao")]
    Ineffective,
}

impl PpeEffectiveness {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Effective => "Sim",
            Self::Ineffective => "Não",
        }
    }

    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "sim" => Some(Self::Effective),
            "não" | "nao" => Some(Self::Ineffective),
            _ => None,
        }
    }
}

impl fmt::Display for PpeEffectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
