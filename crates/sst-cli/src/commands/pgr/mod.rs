//! `sst pgr`: the Company → Sector → Hazard → Risk → Action hierarchy.
//!
//! The per-level subcommands take the parent id as a flag and talk to the
//! backend directly. Saves re-fetch the parent's list to check the row is
//! there; deleting a company re-fetches the company list. Lower-level deletes
//! carry no parent id, so they skip the reload. `sst pgr shell` keeps a
//! cascading selection instead.

mod action;
mod company;
mod hazard;
mod risk;
mod sector;
mod shell;

use std::future::Future;

use anyhow::Context;
use serde::Serialize;
use sst_client::ClientError;
use sst_core::entities::Keyed;
use sst_core::selection::PgrLevel;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PgrCommands;
use crate::commands::shared::confirm::confirm;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::{TableView, output, output_rows};
use crate::progress::track;

/// Handle `sst pgr`.
pub async fn handle(
    action: &PgrCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PgrCommands::Company { action } => company::handle(action, ctx, flags).await,
        PgrCommands::Sector { action } => sector::handle(action, ctx, flags).await,
        PgrCommands::Hazard { action } => hazard::handle(action, ctx, flags).await,
        PgrCommands::Risk { action } => risk::handle(action, ctx, flags).await,
        PgrCommands::Action { action } => action::handle(action, ctx, flags).await,
        PgrCommands::Shell => shell::run(ctx, flags).await,
    }
}

/// Print a level's list, cut to the global limit.
fn show_list<T>(mut rows: Vec<T>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()>
where
    T: Serialize + TableView,
{
    let limit = effective_limit(None, flags.limit, ctx.config.general.default_limit);
    rows.truncate(limit);
    output_rows(&rows, flags.format)
}

#[derive(Debug, Serialize)]
struct PgrDeleteResponse {
    level: PgrLevel,
    id: i64,
    deleted: bool,
}

async fn delete(
    ctx: &AppContext,
    flags: &GlobalFlags,
    level: PgrLevel,
    id: i64,
) -> anyhow::Result<()> {
    if !confirm(&format!("Delete {level} {id}?"), flags)? {
        return output(&PgrDeleteResponse { level, id, deleted: false }, flags.format);
    }
    track(&format!("deleting {level} {id}"), ctx.client.pgr_delete(level, id))
        .await
        .with_context(|| format!("failed to delete {level} {id}"))?;
    if level == PgrLevel::Company {
        reload(level, id, Expect::Gone, ctx.client.list_companies()).await;
    }
    output(&PgrDeleteResponse { level, id, deleted: true }, flags.format)
}

/// What a reload after a mutation should show for the touched id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Listed,
    Gone,
}

impl Expect {
    fn holds<T: Keyed>(self, rows: &[T], id: i64) -> bool {
        let listed = rows.iter().any(|row| row.id() == id);
        listed == (self == Self::Listed)
    }
}

/// Re-fetch the list a mutation touched. The mutation already succeeded, so
/// a failed reload or an unexpected row is only logged.
async fn reload<T, F>(level: PgrLevel, id: i64, expect: Expect, refetch: F)
where
    T: Keyed,
    F: Future<Output = Result<Vec<T>, ClientError>>,
{
    match track(&format!("reloading {level} list"), refetch).await {
        Ok(rows) if expect.holds(&rows, id) => {
            tracing::debug!(%level, id, rows = rows.len(), "pgr list reloaded");
        }
        Ok(_) => {
            tracing::warn!(%level, id, ?expect, "reloaded {level} list disagrees with the change");
        }
        Err(error) => {
            tracing::warn!("{level} {id} changed, but the list could not be reloaded: {error}");
        }
    }
}
