//! Parameterized daily/ranking bar chart.
//!
//! One renderer covers the rolling 7-day review bars, the Monday-anchored
//! weekly time bars, and both deck ranking charts; the variants differ
//! only in sizing, accent color, value suffix and label treatment.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::{Datelike, Days, NaiveDate};

use crate::STANDARD_CHART_WIDTH;
use crate::stats::DeckReviewCount;

use super::format::{html_escape, truncate_label};
use super::no_data_svg;
use super::theme::{Accent, FONT_STACK, Theme};

const MAX_BAR_HEIGHT: f64 = 80.0;

/// Floor height so zero and near-zero bars stay visible.
const MIN_BAR_HEIGHT: f64 = 3.0;

/// Deck labels longer than this are shortened to fit under a bar.
const DECK_LABEL_MAX: usize = 10;

/// One bar: axis label, value and hover tooltip.
#[derive(Debug, Clone)]
pub struct BarDatum {
    pub label: String,
    pub value: u64,
    pub tooltip: String,
}

/// Bar width strategy.
#[derive(Debug, Clone, Copy)]
pub enum BarSizing {
    /// Every bar is this many pixels wide.
    Fixed(f64),
    /// Bars stretch to fill the fixed chart width.
    Adaptive,
}

#[derive(Debug, Clone)]
pub struct BarChart {
    data: Vec<BarDatum>,
    sizing: BarSizing,
    bar_gap: f64,
    /// Total SVG width override; `None` computes from content.
    fixed_width: Option<f64>,
    left_margin: f64,
    top_margin: f64,
    bottom_margin: f64,
    right_margin: f64,
    accent: Accent,
    value_suffix: &'static str,
    rotate_labels: bool,
}

impl BarChart {
    #[must_use]
    pub const fn new(data: Vec<BarDatum>) -> Self {
        Self {
            data,
            sizing: BarSizing::Fixed(36.0),
            bar_gap: 8.0,
            fixed_width: None,
            left_margin: 25.0,
            top_margin: 20.0,
            bottom_margin: 60.0,
            right_margin: 25.0,
            accent: Accent::Reviews,
            value_suffix: "",
            rotate_labels: false,
        }
    }

    #[must_use]
    pub const fn with_sizing(mut self, sizing: BarSizing) -> Self {
        self.sizing = sizing;
        self
    }

    #[must_use]
    pub const fn with_gap(mut self, gap: f64) -> Self {
        self.bar_gap = gap;
        self
    }

    #[must_use]
    pub const fn with_fixed_width(mut self, width: f64) -> Self {
        self.fixed_width = Some(width);
        self
    }

    #[must_use]
    pub const fn with_margins(mut self, left: f64, top: f64, bottom: f64, right: f64) -> Self {
        self.left_margin = left;
        self.top_margin = top;
        self.bottom_margin = bottom;
        self.right_margin = right;
        self
    }

    #[must_use]
    pub const fn with_accent(mut self, accent: Accent) -> Self {
        self.accent = accent;
        self
    }

    #[must_use]
    pub const fn with_value_suffix(mut self, suffix: &'static str) -> Self {
        self.value_suffix = suffix;
        self
    }

    #[must_use]
    pub const fn with_rotated_labels(mut self, rotate: bool) -> Self {
        self.rotate_labels = rotate;
        self
    }

    #[allow(clippy::cast_precision_loss)] // chart geometry
    fn bar_width(&self) -> f64 {
        match self.sizing {
            BarSizing::Fixed(width) => width,
            BarSizing::Adaptive => {
                let total = self
                    .fixed_width
                    .unwrap_or(f64::from(STANDARD_CHART_WIDTH));
                let inner = total - self.left_margin - self.right_margin;
                let count = self.data.len().max(1) as f64;
                ((inner - self.bar_gap * (count - 1.0)) / count).max(1.0)
            }
        }
    }

    /// Render the chart for one theme.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn render(&self, theme: &Theme) -> String {
        if self.data.is_empty() {
            let width = self.fixed_width.unwrap_or(300.0) as u32;
            return no_data_svg(theme, width);
        }

        let bar_width = self.bar_width();
        let count = self.data.len() as f64;
        let chart_width = (bar_width + self.bar_gap).mul_add(count, -self.bar_gap);
        let width = self
            .fixed_width
            .unwrap_or(self.left_margin + chart_width + self.right_margin);
        let height = self.top_margin + MAX_BAR_HEIGHT + self.bottom_margin;

        let max_value = self
            .data
            .iter()
            .map(|d| d.value)
            .max()
            .filter(|&m| m > 0)
            .unwrap_or(1) as f64;

        let accent = theme.accent(self.accent);

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">"#
        );
        let _ = writeln!(
            svg,
            r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
            theme.bg
        );
        let _ = writeln!(
            svg,
            r#"<g transform="translate({}, {})">"#,
            self.left_margin, self.top_margin
        );

        for (i, datum) in self.data.iter().enumerate() {
            let x = (bar_width + self.bar_gap) * i as f64;
            self.render_bar(&mut svg, theme, accent, datum, x, bar_width, max_value);
        }

        svg.push_str("</g>\n</svg>");
        svg
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn render_bar(
        &self,
        svg: &mut String,
        theme: &Theme,
        accent: &str,
        datum: &BarDatum,
        x: f64,
        bar_width: f64,
        max_value: f64,
    ) {
        let (bar_height, color) = if datum.value == 0 {
            (MIN_BAR_HEIGHT, theme.bar_empty)
        } else {
            let scaled = ((datum.value as f64 / max_value) * MAX_BAR_HEIGHT).floor();
            (scaled.max(MIN_BAR_HEIGHT), accent)
        };
        let bar_y = MAX_BAR_HEIGHT - bar_height;
        let center_x = bar_width.mul_add(0.5, x);

        // Value label above the bar; zeros sit inside the empty track.
        if datum.value > 0 {
            let _ = writeln!(
                svg,
                r#"<text x="{center_x}" y="{}" fill="{}" font-size="10" text-anchor="middle" font-family="{FONT_STACK}" font-weight="600">{}{}</text>"#,
                bar_y - 8.0,
                theme.text,
                datum.value,
                self.value_suffix
            );
        } else {
            let _ = writeln!(
                svg,
                r#"<text x="{center_x}" y="{}" fill="{}" font-size="10" text-anchor="middle" font-family="{FONT_STACK}">0</text>"#,
                MAX_BAR_HEIGHT - 10.0,
                theme.muted
            );
        }

        let rx = if bar_height > 4.0 { 2 } else { 1 };
        let tooltip = html_escape(&datum.tooltip);
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{bar_y}" width="{bar_width}" height="{bar_height}" fill="{color}" rx="{rx}" ry="{rx}"><title>{tooltip}</title></rect>"#
        );

        let label = html_escape(&datum.label);
        if self.rotate_labels {
            let label_y = MAX_BAR_HEIGHT + 12.0;
            let _ = writeln!(
                svg,
                r#"<text x="{center_x}" y="{label_y}" fill="{}" font-size="10" font-family="{FONT_STACK}" transform="rotate(45, {center_x}, {label_y})">{label}</text>"#,
                theme.muted
            );
        } else {
            let _ = writeln!(
                svg,
                r#"<text x="{center_x}" y="{}" fill="{}" font-size="11" text-anchor="middle" font-family="{FONT_STACK}">{label}</text>"#,
                MAX_BAR_HEIGHT + 18.0,
                theme.muted
            );
        }
    }
}

/// Rolling 7-day review bars (6 days ago through today), `MM/DD` labels.
#[must_use]
pub fn weekly_reviews_chart(
    daily_reviews: &BTreeMap<NaiveDate, u32>,
    today: NaiveDate,
) -> BarChart {
    let data = (0..7u64)
        .rev()
        .map(|i| {
            let day = today - Days::new(i);
            let count = u64::from(daily_reviews.get(&day).copied().unwrap_or(0));
            BarDatum {
                label: day.format("%m/%d").to_string(),
                value: count,
                tooltip: format!("{count} reviews on {}", day.format("%Y-%m-%d")),
            }
        })
        .collect();

    BarChart::new(data)
        .with_sizing(BarSizing::Fixed(42.0))
        .with_fixed_width(390.0)
        .with_margins(25.0, 20.0, 35.0, 25.0)
        .with_accent(Accent::Reviews)
}

/// Study minutes for the current Monday-anchored week.
#[must_use]
pub fn weekly_time_chart(
    daily_time_minutes: &BTreeMap<NaiveDate, u64>,
    today: NaiveDate,
) -> BarChart {
    const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    let data = (0..7u64)
        .map(|i| {
            let day = monday + Days::new(i);
            let minutes = daily_time_minutes.get(&day).copied().unwrap_or(0);
            BarDatum {
                label: DAY_LABELS[usize::try_from(i).unwrap_or(0)].to_string(),
                value: minutes,
                tooltip: format!("{minutes} min on {}", day.format("%Y-%m-%d")),
            }
        })
        .collect();

    BarChart::new(data).with_accent(Accent::Time).with_value_suffix("m")
}

/// Weekly deck review ranking, busiest deck first.
#[must_use]
pub fn deck_ranking_chart(ranked: &[DeckReviewCount], max_decks: usize) -> BarChart {
    let data = ranked.iter().take(max_decks).map(deck_datum).collect();

    BarChart::new(data)
        .with_margins(25.0, 20.0, 60.0, 50.0)
        .with_accent(Accent::Reviews)
        .with_rotated_labels(true)
}

/// Monthly deck review ranking at the standard width, bars stretched to
/// fill the row.
#[must_use]
pub fn monthly_deck_chart(ranked: &[DeckReviewCount], max_decks: usize) -> BarChart {
    let data = ranked.iter().take(max_decks).map(deck_datum).collect();

    BarChart::new(data)
        .with_sizing(BarSizing::Adaptive)
        .with_gap(12.0)
        .with_fixed_width(f64::from(STANDARD_CHART_WIDTH))
        .with_margins(40.0, 20.0, 60.0, 40.0)
        .with_accent(Accent::Cards)
        .with_rotated_labels(true)
}

fn deck_datum(deck: &DeckReviewCount) -> BarDatum {
    BarDatum {
        label: truncate_label(deck.leaf_name(), DECK_LABEL_MAX),
        value: deck.reviews,
        tooltip: format!("{} reviews - {}", deck.reviews, deck.name),
    }
}

#[cfg(test)]
#[path = "bars_tests.rs"]
mod tests;
