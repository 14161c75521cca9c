use anyhow::Context;
use sst_core::entities::SectorDraft;
use sst_core::selection::PgrLevel;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SectorCommands;
use crate::cli::subcommands::pgr::SectorArgs;
use crate::context::AppContext;
use crate::output::output_one;
use crate::progress::track;

use super::Expect;

pub async fn handle(
    action: &SectorCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SectorCommands::List { company } => {
            let rows = track("loading sectors", ctx.client.list_sectors(*company))
                .await
                .with_context(|| format!("failed to load sectors of company {company}"))?;
            super::show_list(rows, ctx, flags)
        }
        SectorCommands::Create { company, sector } => {
            let draft = draft(*company, sector);
            let saved = track("saving sector", ctx.client.create_sector(&draft))
                .await
                .context("failed to save sector")?;
            super::reload(PgrLevel::Sector, saved.id, Expect::Listed, ctx.client.list_sectors(*company))
                .await;
            output_one(&saved, flags.format)
        }
        SectorCommands::Update {
            id,
            company,
            sector,
        } => {
            let draft = draft(*company, sector);
            let saved = track("updating sector", ctx.client.update_sector(*id, &draft))
                .await
                .with_context(|| format!("failed to update sector {id}"))?;
            super::reload(PgrLevel::Sector, saved.id, Expect::Listed, ctx.client.list_sectors(*company))
                .await;
            output_one(&saved, flags.format)
        }
        SectorCommands::Delete { id } => super::delete(ctx, flags, PgrLevel::Sector, *id).await,
    }
}

fn draft(company_id: i64, args: &SectorArgs) -> SectorDraft {
    SectorDraft {
        company_id,
        name: args.name.clone(),
        description: args.description.clone(),
    }
}
