use anyhow::Context;
use sst_core::entities::HazardDraft;
use sst_core::selection::PgrLevel;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::HazardCommands;
use crate::cli::subcommands::pgr::HazardArgs;
use crate::context::AppContext;
use crate::output::output_one;
use crate::progress::track;

use super::Expect;

pub async fn handle(
    action: &HazardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        HazardCommands::List { sector } => {
            let rows = track("loading hazards", ctx.client.list_hazards(*sector))
                .await
                .with_context(|| format!("failed to load hazards of sector {sector}"))?;
            super::show_list(rows, ctx, flags)
        }
        HazardCommands::Create { sector, hazard } => {
            let draft = draft(*sector, hazard);
            let saved = track("saving hazard", ctx.client.create_hazard(&draft))
                .await
                .context("failed to save hazard")?;
            super::reload(PgrLevel::Hazard, saved.id, Expect::Listed, ctx.client.list_hazards(*sector))
                .await;
            output_one(&saved, flags.format)
        }
        HazardCommands::Update { id, sector, hazard } => {
            let draft = draft(*sector, hazard);
            let saved = track("updating hazard", ctx.client.update_hazard(*id, &draft))
                .await
                .with_context(|| format!("failed to update hazard {id}"))?;
            super::reload(PgrLevel::Hazard, saved.id, Expect::Listed, ctx.client.list_hazards(*sector))
                .await;
            output_one(&saved, flags.format)
        }
        HazardCommands::Delete { id } => super::delete(ctx, flags, PgrLevel::Hazard, *id).await,
    }
}

fn draft(sector_id: i64, args: &HazardArgs) -> HazardDraft {
    HazardDraft {
        sector_id,
        name: args.name.clone(),
        agent: args.agent.clone(),
        source: args.source.clone(),
        description: args.description.clone(),
    }
}
