use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::{Args, Subcommand};
use sst_core::entities::{CLASSIFICATIONS, LEGAL_FRAMING_NONE};
use sst_core::enums::PpeEffectiveness;

use super::ListArgs;

/// LTCAT hazard record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LtcatCommands {
    /// List hazard records.
    List(ListArgs),
    /// Record an exposure.
    Create(HazardRecordArgs),
    /// Replace a hazard record.
    Update {
        id: i64,
        #[command(flatten)]
        record: HazardRecordArgs,
    },
    /// Delete a hazard record.
    Delete { id: i64 },
    /// Show the last saved hazard record.
    Last,
}

#[derive(Clone, Debug, Args)]
pub struct HazardRecordArgs {
    #[arg(long)]
    pub company: String,
    #[arg(long = "tax-id", visible_alias = "cnpj")]
    pub tax_id: Option<String>,
    #[arg(long)]
    pub sector: String,
    #[arg(long)]
    pub function: String,
    /// Homogeneous exposure group (GHE).
    #[arg(long = "exposure-group", visible_alias = "ghe")]
    pub exposure_group: Option<String>,
    #[arg(long)]
    pub agent: String,
    #[arg(
        long,
        default_value = "Físico",
        value_parser = PossibleValuesParser::new(CLASSIFICATIONS)
    )]
    pub classification: String,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub medium: Option<String>,
    #[arg(long)]
    pub intensity: Option<String>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long)]
    pub daily_hours: Option<f64>,
    #[arg(long)]
    pub days_per_week: Option<u8>,
    #[arg(long)]
    pub exposure_years: Option<f64>,
    /// Whether PPE neutralizes the exposure: Sim or Não.
    #[arg(long = "ppe-effective", default_value = "Sim", value_parser = parse_ppe)]
    pub ppe_effective: PpeEffectiveness,
    #[arg(long, default_value = LEGAL_FRAMING_NONE)]
    pub legal_framing: String,
    /// Assessment date, YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub responsible: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

fn parse_ppe(raw: &str) -> Result<PpeEffectiveness, String> {
    PpeEffectiveness::from_label(raw).ok_or_else(|| format!("expected Sim or Não, got '{raw}'"))
}
