//! Static SVG chart generation.
//!
//! Every chart is a plain string builder over a fixed layout; the wide
//! charts share [`crate::STANDARD_CHART_WIDTH`] so they align in the
//! rendered README. Empty datasets render a "No data" placeholder rather
//! than erroring.

mod bars;
mod card;
mod format;
mod heatmap;
mod progress;
mod theme;

use std::fmt::Write;

pub use bars::{
    BarChart, BarDatum, BarSizing, deck_ranking_chart, monthly_deck_chart,
    weekly_reviews_chart, weekly_time_chart,
};
pub use card::stats_card_svg;
pub use format::{format_thousands, html_escape, truncate_label};
pub use heatmap::HeatmapChart;
pub use progress::{deck_progress_svg, progress_bar_svg, progress_ring_svg};
pub use theme::{Accent, FONT_STACK, Theme};

/// Placeholder rendered in place of any chart with an empty dataset.
#[must_use]
pub fn no_data_svg(theme: &Theme, width: u32) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="40">"#
    );
    let _ = writeln!(svg, r#"<rect width="{width}" height="40" fill="{}"/>"#, theme.bg);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="24" text-anchor="middle" font-family="system-ui, -apple-system, sans-serif" font-size="13" fill="{}">No data</text>"#,
        width / 2,
        theme.muted
    );
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
