//! `sst ltcat`: environmental hazard records.

use anyhow::Context;
use sst_client::mirror::RecordModule;
use sst_core::chart::ChartSeries;
use sst_core::entities::{EnvironmentalHazardRecord, HazardRecordDraft};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListArgs;
use crate::cli::subcommands::ltcat::{HazardRecordArgs, LtcatCommands};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::records;
use crate::context::AppContext;
use crate::output::{output_list, output_one};
use crate::progress::track;

const MODULE: RecordModule = RecordModule::Ltcat;

/// Handle `sst ltcat`.
pub async fn handle(
    action: &LtcatCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        LtcatCommands::List(args) => list(args, ctx, flags).await,
        LtcatCommands::Create(record) => save(None, record, ctx, flags).await,
        LtcatCommands::Update { id, record } => save(Some(*id), record, ctx, flags).await,
        LtcatCommands::Delete { id } => {
            records::delete(
                ctx,
                flags,
                MODULE,
                *id,
                ctx.client.delete_hazard_record(*id),
                ctx.client.list_hazard_records(),
            )
            .await
        }
        LtcatCommands::Last => {
            let record: EnvironmentalHazardRecord = records::last(ctx, MODULE)?;
            output_one(&record, flags.format)
        }
    }
}

async fn list(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = records::load(ctx, MODULE, args.offline, ctx.client.list_hazard_records()).await?;
    let limit = effective_limit(args.limit, flags.limit, ctx.config.general.default_limit);
    let (shown, charts) = records::narrow(&rows, args.search.as_deref(), limit, charts);
    output_list(&shown, &charts, flags.format)
}

async fn save(
    id: Option<i64>,
    args: &HazardRecordArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft = draft(args);
    let saved = match id {
        Some(id) => track("updating LTCAT record", ctx.client.update_hazard_record(id, &draft))
            .await
            .with_context(|| format!("failed to update LTCAT record {id}"))?,
        None => track("saving LTCAT record", ctx.client.create_hazard_record(&draft))
            .await
            .context("failed to save LTCAT record")?,
    };
    records::after_save(ctx, MODULE, saved.id, ctx.client.list_hazard_records()).await;
    output_one(&saved, flags.format)
}

fn draft(args: &HazardRecordArgs) -> HazardRecordDraft {
    HazardRecordDraft {
        company: args.company.clone(),
        tax_id: args.tax_id.clone(),
        sector: args.sector.clone(),
        function: args.function.clone(),
        exposure_group: args.exposure_group.clone(),
        agent: args.agent.clone(),
        classification: args.classification.clone(),
        source: args.source.clone(),
        medium: args.medium.clone(),
        intensity: args.intensity.clone(),
        unit: args.unit.clone(),
        daily_hours: args.daily_hours,
        days_per_week: args.days_per_week,
        exposure_years: args.exposure_years,
        ppe_effective: args.ppe_effective,
        legal_framing: args.legal_framing.clone(),
        assessed_on: args.date,
        responsible: args.responsible.clone(),
        notes: args.notes.clone(),
    }
}

/// Agents per sector and the legal framing split.
fn charts(rows: &[EnvironmentalHazardRecord]) -> Vec<ChartSeries> {
    vec![
        ChartSeries::count_by("Agentes por setor", rows, |r| r.sector.clone()),
        ChartSeries::count_by("Enquadramento", rows, |r| r.legal_framing.clone()),
    ]
}
