//! The list / save / delete / last flow shared by ASO, NR-17 and LTCAT.
//!
//! Every mutation is followed by a re-fetch of the module's list, which is
//! then mirrored. Saves also record the last-saved id.

use std::future::Future;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use sst_client::ClientError;
use sst_client::mirror::RecordModule;
use sst_core::chart::ChartSeries;
use sst_core::entities::{Keyed, pick_last};
use sst_core::search::{Searchable, filter};

use crate::cli::GlobalFlags;
use crate::commands::shared::confirm::confirm;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::track;

/// Display name of a record module.
pub const fn module_label(module: RecordModule) -> &'static str {
    match module {
        RecordModule::Aso => "ASO",
        RecordModule::Nr17 => "NR-17",
        RecordModule::Ltcat => "LTCAT",
    }
}

const fn command_name(module: RecordModule) -> &'static str {
    match module {
        RecordModule::Aso => "aso",
        RecordModule::Nr17 => "nr17",
        RecordModule::Ltcat => "ltcat",
    }
}

/// Fetch a module's list from the server and mirror it.
pub async fn fetch_and_mirror<T, F>(
    ctx: &AppContext,
    module: RecordModule,
    fetch: F,
) -> anyhow::Result<Vec<T>>
where
    T: Serialize,
    F: Future<Output = Result<Vec<T>, ClientError>>,
{
    let label = module_label(module);
    let rows = track(&format!("loading {label} records"), fetch)
        .await
        .with_context(|| format!("failed to load {label} records"))?;
    ctx.mirror.remember_list(module, &rows);
    Ok(rows)
}

/// The module's list, from the mirror when `offline`, else from the server.
pub async fn load<T, F>(
    ctx: &AppContext,
    module: RecordModule,
    offline: bool,
    fetch: F,
) -> anyhow::Result<Vec<T>>
where
    T: Serialize + DeserializeOwned,
    F: Future<Output = Result<Vec<T>, ClientError>>,
{
    if offline {
        let rows = ctx.mirror.recall_list(module);
        tracing::debug!(module = module_label(module), rows = rows.len(), "read mirror");
        return Ok(rows);
    }
    fetch_and_mirror(ctx, module, fetch).await
}

/// Apply the search term, chart every match, then cut the rows to `limit`.
/// The limit bounds the table only.
pub fn narrow<T, C>(
    rows: &[T],
    search: Option<&str>,
    limit: usize,
    charts: C,
) -> (Vec<T>, Vec<ChartSeries>)
where
    T: Searchable + Clone,
    C: FnOnce(&[T]) -> Vec<ChartSeries>,
{
    let mut matched: Vec<T> = match search {
        Some(term) => filter(rows, term).into_iter().cloned().collect(),
        None => rows.to_vec(),
    };
    let charts = charts(&matched);
    matched.truncate(limit);
    (matched, charts)
}

/// Remember the saved id and re-fetch the list. A failed re-fetch is logged;
/// the save itself already succeeded.
pub async fn after_save<T, F>(ctx: &AppContext, module: RecordModule, id: i64, refetch: F)
where
    T: Serialize,
    F: Future<Output = Result<Vec<T>, ClientError>>,
{
    ctx.mirror.remember_last_id(module, id);
    if let Err(error) = fetch_and_mirror(ctx, module, refetch).await {
        tracing::warn!("saved, but the list could not be reloaded: {error:#}");
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: i64,
    pub deleted: bool,
}

/// Confirm, delete, re-fetch.
pub async fn delete<T, D, F>(
    ctx: &AppContext,
    flags: &GlobalFlags,
    module: RecordModule,
    id: i64,
    delete: D,
    refetch: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    D: Future<Output = Result<(), ClientError>>,
    F: Future<Output = Result<Vec<T>, ClientError>>,
{
    let label = module_label(module);
    if !confirm(&format!("Delete {label} record {id}?"), flags)? {
        return output(&DeleteResponse { id, deleted: false }, flags.format);
    }

    track(&format!("deleting {label} record {id}"), delete)
        .await
        .with_context(|| format!("failed to delete {label} record {id}"))?;
    fetch_and_mirror(ctx, module, refetch).await?;

    output(&DeleteResponse { id, deleted: true }, flags.format)
}

/// The last saved record from the mirror, else the last mirrored row.
pub fn last<T>(ctx: &AppContext, module: RecordModule) -> anyhow::Result<T>
where
    T: Keyed + Clone + DeserializeOwned,
{
    let rows: Vec<T> = ctx.mirror.recall_list(module);
    pick_last(&rows, ctx.mirror.recall_last_id(module))
        .cloned()
        .with_context(|| {
            format!(
                "no {} records in the local mirror; run `sst {} list` first",
                module_label(module),
                command_name(module)
            )
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use sst_core::entities::ExamRecord;

    use super::*;

    fn exam(id: i64, name: &str) -> ExamRecord {
        ExamRecord {
            id,
            name: name.into(),
            document_id: "000".into(),
            function: "Operador".into(),
            sector: "Produção".into(),
            exam_type: "Periódico".into(),
            exam_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            examiner: None,
            outcome: "Apto".into(),
            created_at: None,
        }
    }

    #[test]
    fn narrow_filters_then_limits() {
        let rows = vec![exam(1, "Ana"), exam(2, "Bruno"), exam(3, "Mariana")];
        let no_charts = |_: &[ExamRecord]| Vec::new();

        let names = |(rows, _): (Vec<ExamRecord>, Vec<ChartSeries>)| {
            rows.into_iter().map(|r| r.name).collect::<Vec<_>>()
        };
        assert_eq!(names(narrow(&rows, Some("ana"), 50, no_charts)), ["Ana", "Mariana"]);
        assert_eq!(names(narrow(&rows, Some("ana"), 1, no_charts)), ["Ana"]);
        assert_eq!(names(narrow(&rows, None, 2, no_charts)), ["Ana", "Bruno"]);
        assert!(narrow(&rows, Some("caldeiraria"), 50, no_charts).0.is_empty());
    }

    #[test]
    fn charts_cover_rows_past_the_limit() {
        let rows = vec![exam(1, "Ana"), exam(2, "Bruno"), exam(3, "Mariana")];
        let per_name = |rows: &[ExamRecord]| {
            vec![ChartSeries::count_by("Exames", rows, |r| r.name.clone())]
        };

        let (shown, charts) = narrow(&rows, None, 1, per_name);
        assert_eq!(shown.len(), 1);
        assert_eq!(charts[0].total(), 3.0);

        let (shown, charts) = narrow(&rows, Some("ana"), 1, per_name);
        assert_eq!(shown.len(), 1);
        assert_eq!(charts[0].labels, ["Ana", "Mariana"]);
    }
}
