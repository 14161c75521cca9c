//! Horizontal text bars for [`ChartSeries`].

use sst_core::chart::ChartSeries;

const BAR: char = '█';
const DEFAULT_BAR_WIDTH: usize = 30;

/// Render `series` as a titled block of bars scaled to the largest value.
#[must_use]
pub fn render_bars(series: &ChartSeries, term_width: Option<usize>) -> String {
    let mut out = series.title.clone();
    if series.is_empty() {
        out.push_str("\n  (no data)");
        return out;
    }

    let label_width = series
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let values: Vec<String> = series.data.iter().map(|v| format_value(*v)).collect();
    let value_width = values.iter().map(String::len).max().unwrap_or(0);

    // 2 indent + label + 2 + bar + 1 + value
    let bar_width = term_width
        .map(|w| w.saturating_sub(label_width + value_width + 5))
        .unwrap_or(DEFAULT_BAR_WIDTH)
        .clamp(1, DEFAULT_BAR_WIDTH * 2);

    let max = series.data.iter().copied().fold(0.0_f64, f64::max);

    for ((label, value), shown) in series.labels.iter().zip(&series.data).zip(&values) {
        let cells = bar_cells(*value, max, bar_width);
        let pad = " ".repeat(label_width - label.chars().count());
        out.push_str(&format!(
            "\n  {label}{pad}  {bar:<bar_width$} {shown:>value_width$}",
            bar = BAR.to_string().repeat(cells),
        ));
    }
    out
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_cells(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round().max(1.0) as usize
}

/// Integers without a fraction, everything else with one decimal.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bars_scale_to_the_largest_value() {
        let series =
            ChartSeries::from_pairs("Perfil", [("Baixo", 4.0), ("Médio", 2.0), ("Alto", 0.0)]);
        let out = render_bars(&series, None);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Perfil");
        assert_eq!(lines[1].matches(BAR).count(), DEFAULT_BAR_WIDTH);
        assert_eq!(lines[2].matches(BAR).count(), DEFAULT_BAR_WIDTH / 2);
        assert_eq!(lines[3].matches(BAR).count(), 0);
        assert!(lines[1].ends_with(" 4"));
        // Labels are padded to the same width.
        assert!(lines[2].starts_with("  Médio  "));
    }

    #[test]
    fn fractional_values_keep_one_decimal() {
        let series = ChartSeries::from_pairs("Score", [("Solda", 7.8)]);
        assert!(render_bars(&series, Some(80)).ends_with("7.8"));
    }

    #[test]
    fn empty_series_says_so() {
        assert_eq!(
            render_bars(&ChartSeries::new("Agentes"), None),
            "Agentes\n  (no data)"
        );
    }
}
