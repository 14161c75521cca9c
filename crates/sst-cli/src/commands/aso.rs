//! `sst aso`: occupational health exam records.

use anyhow::Context;
use chrono::Datelike;
use sst_client::mirror::RecordModule;
use sst_core::chart::ChartSeries;
use sst_core::entities::{ExamDraft, ExamRecord};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListArgs;
use crate::cli::subcommands::aso::{AsoCommands, ExamArgs};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::records;
use crate::context::AppContext;
use crate::output::{output_list, output_one};
use crate::progress::track;

const MODULE: RecordModule = RecordModule::Aso;

/// Handle `sst aso`.
pub async fn handle(
    action: &AsoCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AsoCommands::List(args) => list(args, ctx, flags).await,
        AsoCommands::Create(exam) => save(None, exam, ctx, flags).await,
        AsoCommands::Update { id, exam } => save(Some(*id), exam, ctx, flags).await,
        AsoCommands::Delete { id } => {
            records::delete(
                ctx,
                flags,
                MODULE,
                *id,
                ctx.client.delete_exam(*id),
                ctx.client.list_exams(),
            )
            .await
        }
        AsoCommands::Last => {
            let exam: ExamRecord = records::last(ctx, MODULE)?;
            output_one(&exam, flags.format)
        }
    }
}

async fn list(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = records::load(ctx, MODULE, args.offline, ctx.client.list_exams()).await?;
    let limit = effective_limit(args.limit, flags.limit, ctx.config.general.default_limit);
    let (shown, charts) = records::narrow(&rows, args.search.as_deref(), limit, charts);
    output_list(&shown, &charts, flags.format)
}

async fn save(
    id: Option<i64>,
    args: &ExamArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft = draft(args);
    let saved = match id {
        Some(id) => track("updating ASO record", ctx.client.update_exam(id, &draft))
            .await
            .with_context(|| format!("failed to update ASO record {id}"))?,
        None => track("saving ASO record", ctx.client.create_exam(&draft))
            .await
            .context("failed to save ASO record")?,
    };
    records::after_save(ctx, MODULE, saved.id, ctx.client.list_exams()).await;
    output_one(&saved, flags.format)
}

fn draft(args: &ExamArgs) -> ExamDraft {
    ExamDraft {
        name: args.name.clone(),
        document_id: args.document_id.clone(),
        function: args.function.clone(),
        sector: args.sector.clone(),
        exam_type: args.exam_type.clone(),
        exam_date: args.date,
        examiner: args.examiner.clone(),
        outcome: args.outcome.clone(),
    }
}

/// Exams per month and the outcome split.
fn charts(rows: &[ExamRecord]) -> Vec<ChartSeries> {
    vec![
        ChartSeries::count_by("Exames por mês", rows, |exam| {
            format!("{:04}-{:02}", exam.exam_date.year(), exam.exam_date.month())
        })
        .sorted_by_label(),
        ChartSeries::count_by("Resultado", rows, |exam| exam.outcome.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn exam(id: i64, date: (i32, u32, u32), outcome: &str) -> ExamRecord {
        ExamRecord {
            id,
            name: format!("worker {id}"),
            document_id: "123.456.789-00".into(),
            function: "Soldador".into(),
            sector: "Caldeiraria".into(),
            exam_type: "Periódico".into(),
            exam_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            examiner: None,
            outcome: outcome.into(),
            created_at: None,
        }
    }

    #[test]
    fn charts_group_by_month_and_outcome() {
        let rows = vec![
            exam(1, (2025, 3, 4), "Apto"),
            exam(2, (2025, 1, 20), "Inapto"),
            exam(3, (2025, 3, 28), "Apto"),
        ];
        let charts = charts(&rows);

        assert_eq!(charts[0].labels, ["2025-01", "2025-03"]);
        assert_eq!(charts[0].data, [1.0, 2.0]);
        assert_eq!(charts[1].labels, ["Apto", "Inapto"]);
        assert_eq!(charts[1].data, [2.0, 1.0]);
    }

    #[test]
    fn draft_copies_every_field() {
        let args = ExamArgs {
            name: "Ana".into(),
            document_id: "111".into(),
            function: "Operadora".into(),
            sector: "Montagem".into(),
            exam_type: "Demissional".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            examiner: Some("Dr. Lima".into()),
            outcome: "Apto com restrições".into(),
        };
        let draft = draft(&args);
        assert_eq!(draft.exam_type, "Demissional");
        assert_eq!(draft.examiner.as_deref(), Some("Dr. Lima"));
        assert!(draft.validate().is_ok());
    }
}
