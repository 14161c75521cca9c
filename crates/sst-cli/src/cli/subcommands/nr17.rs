use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::{Args, Subcommand};
use sst_core::entities::WORKSTATION_TYPES;

use super::ListArgs;

/// NR-17 ergonomic assessment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum Nr17Commands {
    /// List assessments.
    List(ListArgs),
    /// Record an assessment. Score and band are computed locally.
    Create(AssessmentArgs),
    /// Replace an assessment.
    Update {
        id: i64,
        #[command(flatten)]
        assessment: AssessmentArgs,
    },
    /// Delete an assessment.
    Delete { id: i64 },
    /// Show the last saved assessment.
    Last,
    /// Compute score and band without sending anything.
    Score(ScoreArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AssessmentArgs {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub sector: String,
    #[arg(long)]
    pub function: String,
    #[arg(long)]
    pub worker: Option<String>,
    #[arg(
        long,
        default_value = "Administrativo",
        value_parser = PossibleValuesParser::new(WORKSTATION_TYPES)
    )]
    pub workstation_type: String,
    /// Assessment date, YYYY-MM-DD.
    #[arg(long)]
    pub date: NaiveDate,
    /// Six 1-5 ratings: furniture,posture,effort,breaks,environment,organization.
    #[arg(long)]
    pub ratings: String,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    /// Six 1-5 ratings, comma separated.
    #[arg(long)]
    pub ratings: String,
}
