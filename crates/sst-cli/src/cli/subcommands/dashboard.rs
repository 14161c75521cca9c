use clap::Subcommand;

/// Dashboard summaries.
#[derive(Clone, Debug, Subcommand)]
pub enum DashboardCommands {
    /// Aggregate the locally mirrored lists. No request is sent.
    Local,
    /// Totals, band profile, top agents, recent activity.
    General,
    /// NR-17 band profile and mean score per sector.
    Nr17,
    /// Exams per month and exam validity.
    Pcmso,
    /// Hazards per category and action progress.
    Pgr,
    /// Agents per sector and legal framing.
    Ltcat,
}
