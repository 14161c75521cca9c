use sst_core::enums::{ActionStatus, PpeEffectiveness, RiskBand, Tone};

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_len(cell))
                .max()
                .unwrap_or(0)
                .max(display_len(header))
                .max(4)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(display_len(&header_line));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                let padded = format_cell(&truncated, *width, numeric);
                if options.color {
                    colorize_tone(&truncated, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

/// Character count; accented labels are multi-byte.
fn display_len(value: &str) -> usize {
    value.chars().count()
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_len(headers[*idx]).max(4))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_len(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
}

fn format_cell(value: &str, width: usize, numeric: bool) -> String {
    let pad = " ".repeat(width.saturating_sub(display_len(value)));
    if numeric {
        format!("{pad}{value}")
    } else {
        format!("{value}{pad}")
    }
}

/// Tone of a band, status or PPE label, if the cell holds one.
#[must_use]
pub fn tone_of(value: &str) -> Option<Tone> {
    let trimmed = value.trim();
    if let Some(band) = RiskBand::from_label(trimmed) {
        return Some(band.tone());
    }
    if trimmed.eq_ignore_ascii_case("crítico") || trimmed.eq_ignore_ascii_case("critico") {
        return Some(Tone::Red);
    }
    if let Some(ppe) = PpeEffectiveness::from_label(trimmed) {
        return Some(match ppe {
            PpeEffectiveness::Effective => Tone::Green,
            PpeEffectiveness::Ineffective => Tone::Red,
        });
    }
    let status = serde_json::from_value::<ActionStatus>(serde_json::Value::String(
        trimmed.to_string(),
    ))
    .ok()?;
    Some(match status {
        ActionStatus::Done => Tone::Green,
        ActionStatus::InProgress => Tone::Yellow,
        ActionStatus::Pending => Tone::Red,
    })
}

fn colorize_tone(plain: &str, padded: String) -> String {
    let code = match tone_of(plain) {
        Some(Tone::Green) => "32",
        Some(Tone::Yellow) => "33",
        Some(Tone::Red) => "31",
        None => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}
