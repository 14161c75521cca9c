//! Risks are shown with their level (probability × severity) and the band
//! it falls in under the configured scale.

use anyhow::Context;
use sst_core::entities::{Risk, RiskDraft, find_by_id};
use sst_core::selection::PgrLevel;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RiskCommands;
use crate::cli::subcommands::pgr::RiskArgs;
use crate::context::AppContext;
use crate::output::output_one;
use crate::output::rows::RiskRow;
use crate::progress::track;

use super::Expect;

pub async fn handle(
    action: &RiskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        RiskCommands::List { hazard } => {
            let risks = load(ctx, *hazard).await?;
            super::show_list(RiskRow::rows(&risks, ctx.pgr_scale), ctx, flags)
        }
        RiskCommands::Show { id, hazard } => {
            let risks = load(ctx, *hazard).await?;
            let risk = find_by_id(&risks, "risk", *id)?;
            output_one(&RiskRow::new(risk.clone(), ctx.pgr_scale), flags.format)
        }
        RiskCommands::Create { hazard, risk } => {
            let draft = draft(*hazard, risk);
            let saved = track("saving risk", ctx.client.create_risk(&draft))
                .await
                .context("failed to save risk")?;
            super::reload(PgrLevel::Risk, saved.id, Expect::Listed, ctx.client.list_risks(*hazard))
                .await;
            output_one(&RiskRow::new(saved, ctx.pgr_scale), flags.format)
        }
        RiskCommands::Update { id, hazard, risk } => {
            let draft = draft(*hazard, risk);
            let saved = track("updating risk", ctx.client.update_risk(*id, &draft))
                .await
                .with_context(|| format!("failed to update risk {id}"))?;
            super::reload(PgrLevel::Risk, saved.id, Expect::Listed, ctx.client.list_risks(*hazard))
                .await;
            output_one(&RiskRow::new(saved, ctx.pgr_scale), flags.format)
        }
        RiskCommands::Delete { id } => super::delete(ctx, flags, PgrLevel::Risk, *id).await,
    }
}

async fn load(ctx: &AppContext, hazard: i64) -> anyhow::Result<Vec<Risk>> {
    track("loading risks", ctx.client.list_risks(hazard))
        .await
        .with_context(|| format!("failed to load risks of hazard {hazard}"))
}

fn draft(hazard_id: i64, args: &RiskArgs) -> RiskDraft {
    RiskDraft {
        hazard_id,
        probability: args.probability,
        severity: args.severity,
        existing_measures: args.measures.clone(),
    }
}
