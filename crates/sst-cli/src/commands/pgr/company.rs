use anyhow::Context;
use sst_core::entities::CompanyDraft;
use sst_core::selection::PgrLevel;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CompanyCommands;
use crate::cli::subcommands::pgr::CompanyArgs;
use crate::context::AppContext;
use crate::output::output_one;
use crate::progress::track;

use super::Expect;

pub async fn handle(
    action: &CompanyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CompanyCommands::List => {
            let rows = track("loading companies", ctx.client.list_companies())
                .await
                .context("failed to load companies")?;
            super::show_list(rows, ctx, flags)
        }
        CompanyCommands::Create(args) => {
            let saved = track("saving company", ctx.client.create_company(&draft(args)))
                .await
                .context("failed to save company")?;
            super::reload(PgrLevel::Company, saved.id, Expect::Listed, ctx.client.list_companies())
                .await;
            output_one(&saved, flags.format)
        }
        CompanyCommands::Update { id, company } => {
            let saved = track("updating company", ctx.client.update_company(*id, &draft(company)))
                .await
                .with_context(|| format!("failed to update company {id}"))?;
            super::reload(PgrLevel::Company, saved.id, Expect::Listed, ctx.client.list_companies())
                .await;
            output_one(&saved, flags.format)
        }
        CompanyCommands::Delete { id } => super::delete(ctx, flags, PgrLevel::Company, *id).await,
    }
}

fn draft(args: &CompanyArgs) -> CompanyDraft {
    CompanyDraft {
        name: args.name.clone(),
        tax_id: args.tax_id.clone(),
        address: args.address.clone(),
        activity: args.activity.clone(),
        risk_grade: args.risk_grade,
    }
}
