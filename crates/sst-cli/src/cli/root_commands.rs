use clap::Subcommand;

use crate::cli::subcommands::{
    AsoCommands, AuthCommands, DashboardCommands, LtcatCommands, Nr17Commands, PgrCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Log in, log out, inspect the stored session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// ASO/PCMSO occupational exam records.
    Aso {
        #[command(subcommand)]
        action: AsoCommands,
    },
    /// NR-17 ergonomic assessments.
    Nr17 {
        #[command(subcommand)]
        action: Nr17Commands,
    },
    /// LTCAT environmental hazard records.
    Ltcat {
        #[command(subcommand)]
        action: LtcatCommands,
    },
    /// PGR hierarchy: company, sector, hazard, risk, action.
    Pgr {
        #[command(subcommand)]
        action: PgrCommands,
    },
    /// Dashboard summaries, remote or from the local mirror.
    Dashboard {
        #[command(subcommand)]
        action: DashboardCommands,
    },
}
