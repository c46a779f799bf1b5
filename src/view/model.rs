//! Screen model
//!
//! `render` is a pure function from the tracker state to the three regions
//! of the page. Nothing here knows how the regions are drawn.

use crate::storage::Entry;

pub const TITLE: &str = "Light Log";
pub const INPUT_PROMPT: &str = "Weighed in today?";
pub const INPUT_PLACEHOLDER: &str = "00.0";
pub const INPUT_STEP: f64 = 0.1;
pub const TREND_TITLE: &str = "Weight trend";
pub const HISTORY_TITLE: &str = "Recent records";
pub const EMPTY_TREND_MESSAGE: &str = "No data yet, start recording";

/// Padding added above the heaviest and below the lightest weight
pub const Y_PADDING: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Unit label shown after weights
    pub unit: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            unit: "kg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub title: &'static str,
    pub input: InputRegion,
    pub trend: TrendRegion,
    pub history: HistoryRegion,
}

/// The weight field and its submit control
#[derive(Debug, Clone, PartialEq)]
pub struct InputRegion {
    pub prompt: &'static str,
    pub value: String,
    pub placeholder: &'static str,
    pub step: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrendRegion {
    Placeholder { message: &'static str },
    Chart(ChartModel),
}

/// Line chart over entry order
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    /// X axis labels, one per entry, oldest first
    pub labels: Vec<String>,
    /// Y values, one per entry, oldest first
    pub values: Vec<f64>,
    pub y_min: f64,
    pub y_max: f64,
}

impl ChartModel {
    /// Build the chart for a non-empty list; `None` when there is nothing to plot
    pub fn from_entries(entries: &[Entry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let values: Vec<f64> = entries.iter().map(|e| e.weight).collect();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            labels: entries.iter().map(|e| e.date.clone()).collect(),
            values,
            y_min: min - Y_PADDING,
            y_max: max + Y_PADDING,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// History rows, most recent first
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRegion {
    pub rows: Vec<HistoryRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub date: String,
    pub weight: f64,
    pub unit: String,
}

pub fn render(entries: &[Entry], input: &str, options: &ViewOptions) -> Screen {
    let trend = match ChartModel::from_entries(entries) {
        Some(chart) => TrendRegion::Chart(chart),
        None => TrendRegion::Placeholder {
            message: EMPTY_TREND_MESSAGE,
        },
    };

    let rows = entries
        .iter()
        .rev()
        .map(|e| HistoryRow {
            date: e.date.clone(),
            weight: e.weight,
            unit: options.unit.clone(),
        })
        .collect();

    Screen {
        title: TITLE,
        input: InputRegion {
            prompt: INPUT_PROMPT,
            value: input.to_string(),
            placeholder: INPUT_PLACEHOLDER,
            step: INPUT_STEP,
            unit: options.unit.clone(),
        },
        trend,
        history: HistoryRegion { rows },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_placeholder() {
        let screen = render(&[], "", &ViewOptions::default());

        assert_eq!(
            screen.trend,
            TrendRegion::Placeholder {
                message: EMPTY_TREND_MESSAGE
            }
        );
        assert!(screen.history.rows.is_empty());
        assert_eq!(screen.input.placeholder, "00.0");
        assert_eq!(screen.input.step, 0.1);
        assert_eq!(screen.input.unit, "kg");
    }

    #[test]
    fn test_chart_bounds_are_padded() {
        let entries = vec![
            Entry::new("01/01", 70.0),
            Entry::new("01/02", 72.5),
            Entry::new("01/03", 69.5),
        ];
        let screen = render(&entries, "", &ViewOptions::default());

        let TrendRegion::Chart(chart) = screen.trend else {
            panic!("expected a chart");
        };
        assert_eq!(chart.labels, vec!["01/01", "01/02", "01/03"]);
        assert_eq!(chart.values, vec![70.0, 72.5, 69.5]);
        assert_eq!(chart.y_min, 68.5);
        assert_eq!(chart.y_max, 73.5);
    }

    #[test]
    fn test_single_entry_chart() {
        let chart = ChartModel::from_entries(&[Entry::new("01/01", 70.5)]).unwrap();
        assert_eq!(chart.len(), 1);
        assert_eq!((chart.y_min, chart.y_max), (69.5, 71.5));
    }

    #[test]
    fn test_history_is_reversed() {
        let entries = vec![Entry::new("01/01", 70.0), Entry::new("01/02", 71.2)];
        let options = ViewOptions {
            unit: "lb".to_string(),
        };
        let screen = render(&entries, "7", &options);

        let weights: Vec<f64> = screen.history.rows.iter().map(|r| r.weight).collect();
        assert_eq!(weights, vec![71.2, 70.0]);
        assert!(screen.history.rows.iter().all(|r| r.unit == "lb"));
        assert_eq!(screen.input.value, "7");
    }
}
