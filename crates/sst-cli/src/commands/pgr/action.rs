use anyhow::Context;
use sst_core::entities::ActionDraft;
use sst_core::enums::ActionStatus;
use sst_core::selection::PgrLevel;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ActionCommands;
use crate::cli::subcommands::pgr::ActionArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output_one;
use crate::progress::track;

use super::Expect;

pub async fn handle(
    action: &ActionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ActionCommands::List { risk } => {
            let rows = track("loading actions", ctx.client.list_actions(*risk))
                .await
                .with_context(|| format!("failed to load actions of risk {risk}"))?;
            super::show_list(rows, ctx, flags)
        }
        ActionCommands::Create { risk, action } => {
            let draft = draft(*risk, action)?;
            let saved = track("saving action", ctx.client.create_action(&draft))
                .await
                .context("failed to save action")?;
            super::reload(PgrLevel::Action, saved.id, Expect::Listed, ctx.client.list_actions(*risk))
                .await;
            output_one(&saved, flags.format)
        }
        ActionCommands::Update { id, risk, action } => {
            let draft = draft(*risk, action)?;
            let saved = track("updating action", ctx.client.update_action(*id, &draft))
                .await
                .with_context(|| format!("failed to update action {id}"))?;
            super::reload(PgrLevel::Action, saved.id, Expect::Listed, ctx.client.list_actions(*risk))
                .await;
            output_one(&saved, flags.format)
        }
        ActionCommands::Delete { id } => super::delete(ctx, flags, PgrLevel::Action, *id).await,
    }
}

fn draft(risk_id: i64, args: &ActionArgs) -> anyhow::Result<ActionDraft> {
    Ok(ActionDraft {
        risk_id,
        recommendation: args.recommendation.clone(),
        kind: args.kind.clone(),
        deadline: args.deadline,
        responsible: args.responsible.clone(),
        status: parse_enum::<ActionStatus>(&args.status, "status")?,
    })
}
