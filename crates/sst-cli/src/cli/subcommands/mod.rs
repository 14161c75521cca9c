pub mod aso;
pub mod auth;
pub mod dashboard;
pub mod ltcat;
pub mod nr17;
pub mod pgr;

pub use aso::AsoCommands;
pub use auth::AuthCommands;
pub use dashboard::DashboardCommands;
pub use ltcat::LtcatCommands;
pub use nr17::Nr17Commands;
pub use pgr::{
    ActionCommands, CompanyCommands, HazardCommands, PgrCommands, RiskCommands, SectorCommands,
};

use clap::Args;

/// Listing options shared by the record modules.
#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive filter over the module's text columns.
    #[arg(long)]
    pub search: Option<String>,
    /// Read the local mirror instead of the server.
    #[arg(long)]
    pub offline: bool,
    #[arg(long)]
    pub limit: Option<u32>,
}
