use serde::Serialize;
use serde_json::Value;
use sst_core::chart::ChartSeries;

use crate::cli::OutputFormat;
use crate::ui;

pub mod chart;
pub mod rows;
pub mod table;

pub use rows::TableView;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[derive(Serialize)]
struct ListResponse<'a, T> {
    records: &'a [T],
    charts: &'a [ChartSeries],
}

/// Render a list and the charts rebuilt from it.
///
/// JSON carries `{records, charts}`; a table shows the view columns
/// followed by one bar block per chart.
pub fn render_list<T>(
    records: &[T],
    charts: &[ChartSeries],
    format: OutputFormat,
) -> anyhow::Result<String>
where
    T: Serialize + TableView,
{
    match format {
        OutputFormat::Json | OutputFormat::Raw => render(&ListResponse { records, charts }, format),
        OutputFormat::Table => {
            let mut blocks = vec![view_table(records)];
            blocks.extend(charts.iter().map(bars));
            Ok(blocks.join("\n\n"))
        }
    }
}

pub fn output_list<T>(
    records: &[T],
    charts: &[ChartSeries],
    format: OutputFormat,
) -> anyhow::Result<()>
where
    T: Serialize + TableView,
{
    println!("{}", render_list(records, charts, format)?);
    Ok(())
}

/// Print a summary: the value itself as JSON, or its charts as bars.
pub fn output_charts<T: Serialize>(
    summary: &T,
    charts: &[ChartSeries],
    format: OutputFormat,
) -> anyhow::Result<()> {
    #[derive(Serialize)]
    struct ChartsResponse<'a, T> {
        summary: &'a T,
        charts: &'a [ChartSeries],
    }

    let rendered = match format {
        OutputFormat::Json | OutputFormat::Raw => {
            render(&ChartsResponse { summary, charts }, format)?
        }
        OutputFormat::Table => charts.iter().map(bars).collect::<Vec<_>>().join("\n\n"),
    };
    println!("{rendered}");
    Ok(())
}

/// A bare list as a view table, or a JSON array.
pub fn output_rows<T>(records: &[T], format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + TableView,
{
    let rendered = match format {
        OutputFormat::Table => view_table(records),
        _ => render(&records, format)?,
    };
    println!("{rendered}");
    Ok(())
}

/// A single entity as a one-row view table, or JSON.
pub fn output_one<T>(record: &T, format: OutputFormat) -> anyhow::Result<()>
where
    T: Serialize + TableView,
{
    let rendered = match format {
        OutputFormat::Table => view_table(std::slice::from_ref(record)),
        _ => render(record, format)?,
    };
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

pub fn view_table<T: TableView>(records: &[T]) -> String {
    if records.is_empty() {
        return String::from("(no rows)");
    }
    let rows = records.iter().map(TableView::cells).collect::<Vec<_>>();
    table::render_entity_table(T::HEADERS, &rows, table_options())
}

fn bars(series: &ChartSeries) -> String {
    chart::render_bars(series, ui::prefs().term_width)
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();

    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&["value"], &rows, options))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    let options = table_options();

    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
