//! `sst nr17`: ergonomic assessments.
//!
//! Scores and bands are computed locally from the six ratings with the
//! configured thresholds before anything is sent.

use anyhow::Context;
use serde::Serialize;
use sst_client::mirror::RecordModule;
use sst_core::chart::ChartSeries;
use sst_core::entities::{AssessmentDraft, ErgonomicAssessment};
use sst_core::enums::RiskBand;
use sst_core::risk::{Nr17Ratings, Nr17Thresholds};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListArgs;
use crate::cli::subcommands::nr17::{AssessmentArgs, Nr17Commands};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_ratings;
use crate::commands::shared::records;
use crate::context::AppContext;
use crate::output::{output, output_list, output_one};
use crate::progress::track;

const MODULE: RecordModule = RecordModule::Nr17;

/// Handle `sst nr17`.
pub async fn handle(
    action: &Nr17Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        Nr17Commands::List(args) => list(args, ctx, flags).await,
        Nr17Commands::Create(assessment) => save(None, assessment, ctx, flags).await,
        Nr17Commands::Update { id, assessment } => save(Some(*id), assessment, ctx, flags).await,
        Nr17Commands::Delete { id } => {
            records::delete(
                ctx,
                flags,
                MODULE,
                *id,
                ctx.client.delete_assessment(*id),
                ctx.client.list_assessments(ctx.thresholds),
            )
            .await
        }
        Nr17Commands::Last => {
            let assessment: ErgonomicAssessment = records::last(ctx, MODULE)?;
            output_one(&assessment.classified(ctx.thresholds), flags.format)
        }
        Nr17Commands::Score(args) => {
            let ratings = parse_ratings(&args.ratings)?;
            output(&ScoreResponse::new(ratings, ctx.thresholds), flags.format)
        }
    }
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    ratings: Nr17Ratings,
    score: u32,
    band: RiskBand,
    thresholds: Nr17Thresholds,
}

impl ScoreResponse {
    fn new(ratings: Nr17Ratings, thresholds: Nr17Thresholds) -> Self {
        let score = ratings.score();
        Self {
            ratings,
            score,
            band: thresholds.classify(score),
            thresholds,
        }
    }
}

async fn list(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let fetch = ctx.client.list_assessments(ctx.thresholds);
    let rows: Vec<ErgonomicAssessment> = records::load(ctx, MODULE, args.offline, fetch)
        .await?
        .into_iter()
        .map(|row| row.classified(ctx.thresholds))
        .collect();
    let limit = effective_limit(args.limit, flags.limit, ctx.config.general.default_limit);
    let (shown, charts) = records::narrow(&rows, args.search.as_deref(), limit, charts);
    output_list(&shown, &charts, flags.format)
}

async fn save(
    id: Option<i64>,
    args: &AssessmentArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let draft = draft(args)?;
    tracing::debug!(score = draft.score(), band = ?draft.band(ctx.thresholds), "nr17 draft scored");

    let saved = match id {
        Some(id) => track(
            "updating NR-17 assessment",
            ctx.client.update_assessment(id, &draft, ctx.thresholds),
        )
        .await
        .with_context(|| format!("failed to update NR-17 assessment {id}"))?,
        None => track(
            "saving NR-17 assessment",
            ctx.client.create_assessment(&draft, ctx.thresholds),
        )
        .await
        .context("failed to save NR-17 assessment")?,
    };
    records::after_save(ctx, MODULE, saved.id, ctx.client.list_assessments(ctx.thresholds)).await;
    output_one(&saved, flags.format)
}

fn draft(args: &AssessmentArgs) -> anyhow::Result<AssessmentDraft> {
    Ok(AssessmentDraft {
        company: args.company.clone(),
        sector: args.sector.clone(),
        function: args.function.clone(),
        worker: args.worker.clone(),
        workstation_type: args.workstation_type.clone(),
        assessed_on: args.date,
        ratings: parse_ratings(&args.ratings)?,
        notes: args.notes.clone(),
    })
}

/// Band profile and mean score per sector.
fn charts(rows: &[ErgonomicAssessment]) -> Vec<ChartSeries> {
    vec![
        ChartSeries::band_profile("Perfil de risco", rows.iter().map(|a| a.band)),
        ChartSeries::mean_by(
            "Score médio por setor",
            rows,
            |a| a.sector.clone(),
            |a| f64::from(a.score),
        ),
    ]
}
