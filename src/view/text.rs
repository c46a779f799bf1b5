//! Terminal rendering
//!
//! Draws a `Screen` as plain text. The trend chart is plotted on a character
//! grid: one column group per entry, `●` at each weight and `·` joining
//! neighbouring points. The plot never grows past `max_plot_width`; longer
//! histories get narrower columns and are then sampled evenly, always keeping
//! the first and latest entries.

use crate::view::model::{ChartModel, HistoryRegion, InputRegion, Screen, TrendRegion};
use std::fmt::Write;

const POINT: char = '●';
const LINK: char = '·';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    /// Rows in the chart plot area
    pub chart_height: usize,
    /// Characters per entry along the X axis
    pub column_width: usize,
    /// Upper bound on the plot area's width in characters
    pub max_plot_width: usize,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            chart_height: 8,
            column_width: 7,
            max_plot_width: 70,
        }
    }
}

/// Weight in its shortest form: `70`, `71.2`
pub fn format_weight(weight: f64) -> String {
    format!("{}", weight)
}

pub fn render_text(screen: &Screen, style: &TextStyle) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", screen.title);
    let _ = writeln!(out, "{}", "=".repeat(screen.title.chars().count()));
    out.push('\n');

    out.push_str(&render_input(&screen.input));
    out.push('\n');

    out.push_str(&render_trend(&screen.trend, style));
    out.push('\n');

    out.push_str(&render_history(&screen.history));
    out
}

pub fn render_input(input: &InputRegion) -> String {
    let shown = if input.value.is_empty() {
        input.placeholder
    } else {
        input.value.as_str()
    };
    format!("{}\n> {} {}\n", input.prompt, shown, input.unit)
}

pub fn render_trend(trend: &TrendRegion, style: &TextStyle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", crate::view::model::TREND_TITLE);

    match trend {
        TrendRegion::Placeholder { message } => {
            let _ = writeln!(out, "  {}", message);
        }
        TrendRegion::Chart(chart) => {
            for line in render_chart(chart, style) {
                let _ = writeln!(out, "{}", line);
            }
        }
    }
    out
}

pub fn render_history(history: &HistoryRegion) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", crate::view::model::HISTORY_TITLE);

    for row in &history.rows {
        let _ = writeln!(
            out,
            "  {:<8}{:>8} {}",
            row.date,
            format_weight(row.weight),
            row.unit
        );
    }
    out
}

/// Plot the chart and its axes, one string per terminal line
pub fn render_chart(chart: &ChartModel, style: &TextStyle) -> Vec<String> {
    let height = style.chart_height.max(2);
    let max_plot_width = style.max_plot_width.max(1);

    let shown = sample_indices(chart.len(), max_plot_width);
    let width = style
        .column_width
        .max(1)
        .min((max_plot_width / shown.len().max(1)).max(1));
    let plot_width = shown.len() * width;

    let span = chart.y_max - chart.y_min;
    let row_of = |value: f64| -> usize {
        let frac = if span > 0.0 {
            (chart.y_max - value) / span
        } else {
            0.5
        };
        let row = (frac * (height - 1) as f64).round();
        row.clamp(0.0, (height - 1) as f64) as usize
    };

    let points: Vec<(usize, usize)> = shown
        .iter()
        .enumerate()
        .map(|(col, &i)| (col * width + width / 2, row_of(chart.values[i])))
        .collect();

    let mut grid = vec![vec![' '; plot_width]; height];

    for pair in points.windows(2) {
        let (x0, r0) = pair[0];
        let (x1, r1) = pair[1];
        for x in (x0 + 1)..x1 {
            let t = (x - x0) as f64 / (x1 - x0) as f64;
            let row = (r0 as f64 + t * (r1 as f64 - r0 as f64)).round() as usize;
            grid[row][x] = LINK;
        }
    }
    for &(x, row) in &points {
        grid[row][x] = POINT;
    }

    let top = format!("{:.1}", chart.y_max);
    let bottom = format!("{:.1}", chart.y_min);
    let gutter = top.chars().count().max(bottom.chars().count());

    let mut lines = Vec::with_capacity(height + 2);
    for (i, row) in grid.iter().enumerate() {
        let (label, tick) = if i == 0 {
            (top.as_str(), '┤')
        } else if i == height - 1 {
            (bottom.as_str(), '┤')
        } else {
            ("", '│')
        };
        let plotted: String = row.iter().collect();
        lines.push(format!("{:>gutter$} {}{}", label, tick, plotted.trim_end()));
    }

    lines.push(format!("{:>gutter$} └{}", "", "─".repeat(plot_width)));

    // Labels centred under their points; one that would touch its left
    // neighbour is skipped
    let mut axis = vec![' '; plot_width];
    let mut next_free = 0;
    for (&i, &(x, _)) in shown.iter().zip(&points) {
        let label: Vec<char> = chart.labels[i].chars().take(plot_width).collect();
        let start = x
            .saturating_sub(label.len() / 2)
            .min(plot_width - label.len());
        if start < next_free {
            continue;
        }
        axis[start..start + label.len()].copy_from_slice(&label);
        next_free = start + label.len() + 1;
    }
    let labels: String = axis.into_iter().collect();
    lines.push(format!("{:>gutter$}  {}", "", labels.trim_end()));

    lines
}

/// Indices of at most `max` entries out of `len`, evenly spread, first and last included
fn sample_indices(len: usize, max: usize) -> Vec<usize> {
    if len <= max {
        return (0..len).collect();
    }
    if max <= 1 {
        return vec![len - 1];
    }
    (0..max).map(|k| k * (len - 1) / (max - 1)).collect()
}
