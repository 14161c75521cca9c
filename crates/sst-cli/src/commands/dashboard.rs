//! `sst dashboard`: remote summaries, or `local` aggregation over the mirror.

use anyhow::Context;
use serde::Serialize;
use sst_client::mirror::RecordModule;
use sst_core::chart::ChartSeries;
use sst_core::dashboard::{LocalDashboard, ModuleTotals};
use sst_core::entities::{EnvironmentalHazardRecord, ErgonomicAssessment, ExamRecord};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DashboardCommands;
use crate::context::AppContext;
use crate::output::output_charts;
use crate::progress::track;

/// Handle `sst dashboard`.
pub async fn handle(
    action: &DashboardCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let format = flags.format;
    match action {
        DashboardCommands::Local => {
            let exams: Vec<ExamRecord> = ctx.mirror.recall_list(RecordModule::Aso);
            let assessments: Vec<ErgonomicAssessment> = ctx
                .mirror
                .recall_list::<ErgonomicAssessment>(RecordModule::Nr17)
                .into_iter()
                .map(|row| row.classified(ctx.thresholds))
                .collect();
            let hazards: Vec<EnvironmentalHazardRecord> =
                ctx.mirror.recall_list(RecordModule::Ltcat);
            let dashboard = LocalDashboard::summarize(&exams, &assessments, &hazards);
            let charts: Vec<ChartSeries> = dashboard.charts().into_iter().cloned().collect();
            output_charts(&LocalSummary::from(&dashboard), &charts, format)
        }
        DashboardCommands::General => {
            let summary = track("loading dashboard", ctx.client.dashboard_general())
                .await
                .context("failed to load the general dashboard")?;
            output_charts(&summary, &summary.charts(), format)
        }
        DashboardCommands::Nr17 => {
            let summary = track("loading NR-17 dashboard", ctx.client.dashboard_nr17())
                .await
                .context("failed to load the NR-17 dashboard")?;
            output_charts(&summary, &summary.charts(), format)
        }
        DashboardCommands::Pcmso => {
            let summary = track("loading PCMSO dashboard", ctx.client.dashboard_pcmso())
                .await
                .context("failed to load the PCMSO dashboard")?;
            output_charts(&summary, &summary.charts(), format)
        }
        DashboardCommands::Pgr => {
            let summary = track("loading PGR dashboard", ctx.client.dashboard_pgr())
                .await
                .context("failed to load the PGR dashboard")?;
            output_charts(&summary, &summary.charts(), format)
        }
        DashboardCommands::Ltcat => {
            let summary = track("loading LTCAT dashboard", ctx.client.dashboard_ltcat())
                .await
                .context("failed to load the LTCAT dashboard")?;
            output_charts(&summary, &summary.charts(), format)
        }
    }
}

/// Scalar part of the local dashboard; the series travel as `charts`.
#[derive(Debug, Serialize)]
struct LocalSummary {
    totals: ModuleTotals,
    nr17_mean_score: Option<f64>,
}

impl From<&LocalDashboard> for LocalSummary {
    fn from(dashboard: &LocalDashboard) -> Self {
        Self {
            totals: dashboard.totals,
            nr17_mean_score: dashboard.nr17_mean_score,
        }
    }
}
