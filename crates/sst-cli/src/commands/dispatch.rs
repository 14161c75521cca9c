use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Aso { action } => commands::aso::handle(&action, ctx, flags).await,
        Commands::Nr17 { action } => commands::nr17::handle(&action, ctx, flags).await,
        Commands::Ltcat { action } => commands::ltcat::handle(&action, ctx, flags).await,
        Commands::Pgr { action } => commands::pgr::handle(&action, ctx, flags).await,
        Commands::Dashboard { action } => commands::dashboard::handle(&action, ctx, flags).await,
        Commands::Auth { .. } => unreachable!("auth is pre-dispatched in main"),
    }
}
