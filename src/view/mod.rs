//! Lightlog View
//!
//! - **model**: pure `render` from entries + input to a `Screen` (input, trend, history)
//! - **text**: draws a `Screen` for the terminal

pub mod model;
pub mod text;

pub use model::{
    render, ChartModel, HistoryRegion, HistoryRow, InputRegion, Screen, TrendRegion, ViewOptions,
};
pub use text::{format_weight, render_history, render_text, TextStyle};
