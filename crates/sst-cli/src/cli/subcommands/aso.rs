use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::{Args, Subcommand};
use sst_core::entities::{EXAM_OUTCOMES, EXAM_TYPES};

use super::ListArgs;

/// ASO exam record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AsoCommands {
    /// List exam records.
    List(ListArgs),
    /// Record an exam.
    Create(ExamArgs),
    /// Replace an exam record.
    Update {
        id: i64,
        #[command(flatten)]
        exam: ExamArgs,
    },
    /// Delete an exam record.
    Delete { id: i64 },
    /// Show the last saved exam.
    Last,
}

#[derive(Clone, Debug, Args)]
pub struct ExamArgs {
    /// Worker name.
    #[arg(long)]
    pub name: String,
    #[arg(long = "document-id", visible_alias = "cpf")]
    pub document_id: String,
    #[arg(long)]
    pub function: String,
    #[arg(long)]
    pub sector: String,
    #[arg(
        long,
        default_value = "Admissional",
        value_parser = PossibleValuesParser::new(EXAM_TYPES)
    )]
    pub exam_type: String,
    /// Exam date, YYYY-MM-DD.
    #[arg(long)]
    pub date: NaiveDate,
    /// Examining physician.
    #[arg(long)]
    pub examiner: Option<String>,
    #[arg(
        long,
        default_value = "Apto",
        value_parser = PossibleValuesParser::new(EXAM_OUTCOMES)
    )]
    pub outcome: String,
}
