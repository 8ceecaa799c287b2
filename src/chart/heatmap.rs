//! GitHub-style calendar heatmap.
//!
//! The bucket list is Monday-aligned; rendering re-walks the calendar on
//! a Sunday-first grid (row 0 = Sunday) so the layout matches the
//! contribution graph people already know how to read.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::{Datelike, Days, NaiveDate};

use crate::STANDARD_CHART_WIDTH;
use crate::stats::HeatmapCell;

use super::no_data_svg;
use super::theme::{FONT_STACK, Theme};

const CELL_SIZE: u32 = 11;
const CELL_MARGIN: u32 = 3;
const WEEKS: u32 = 53;
const DAYS: u32 = 7;
const LEFT_MARGIN: u32 = 40;
const TOP_MARGIN: u32 = 20;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Only Mon/Wed/Fri rows get a day label.
const DAY_LABELS: [&str; 7] = ["", "Mon", "", "Wed", "", "Fri", ""];

/// Minimum week columns between month labels.
const MONTH_LABEL_SPACING: u32 = 4;

pub struct HeatmapChart {
    cells: Vec<HeatmapCell>,
}

impl HeatmapChart {
    #[must_use]
    pub const fn new(cells: Vec<HeatmapCell>) -> Self {
        Self { cells }
    }

    /// Map a count onto one of the five color levels, scaled against the
    /// busiest day in the window.
    #[must_use]
    pub fn color_level(count: u32, max_count: u32) -> usize {
        if count == 0 {
            return 0;
        }
        if max_count == 0 {
            return 1;
        }

        let ratio = f64::from(count) / f64::from(max_count);
        if ratio < 0.25 {
            1
        } else if ratio < 0.5 {
            2
        } else if ratio < 0.75 {
            3
        } else {
            4
        }
    }

    /// Render the grid for one theme.
    #[must_use]
    pub fn render(&self, theme: &Theme) -> String {
        let Some(today) = self.cells.last().map(|c| c.date) else {
            return no_data_svg(theme, STANDARD_CHART_WIDTH);
        };

        let step = CELL_SIZE + CELL_MARGIN;
        let width = LEFT_MARGIN + WEEKS * step + 10;
        let height = TOP_MARGIN + DAYS * step + 30;

        let max_count = self.cells.iter().map(|c| c.count).max().unwrap_or(1);
        let counts: HashMap<NaiveDate, u32> =
            self.cells.iter().map(|c| (c.date, c.count)).collect();

        // Sunday-first grid: the last column is the week containing today.
        let days_since_sunday = u64::from(today.weekday().num_days_from_sunday());
        let end_of_week = today + Days::new(6 - days_since_sunday);
        let start_date = end_of_week - Days::new(u64::from(WEEKS - 1) * 7 + 6);

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
        let _ = writeln!(svg, r#"<g transform="translate({LEFT_MARGIN}, {TOP_MARGIN})">"#);

        for (i, label) in DAY_LABELS.iter().enumerate() {
            if label.is_empty() {
                continue;
            }
            let y = u32::try_from(i).unwrap_or(0) * step + CELL_SIZE - 2;
            let _ = writeln!(
                svg,
                r#"<text x="-38" y="{y}" fill="{}" font-size="11" font-family="{FONT_STACK}">{label}</text>"#,
                theme.text
            );
        }

        let month_positions =
            render_cells(&mut svg, theme, &counts, start_date, today, max_count);
        render_month_labels(&mut svg, theme, &month_positions);

        svg.push_str("</g>\n");
        render_legend(&mut svg, theme, width, height);
        svg.push_str("</svg>");
        svg
    }

}

fn render_cells(
    svg: &mut String,
    theme: &Theme,
    counts: &HashMap<NaiveDate, u32>,
    start_date: NaiveDate,
    today: NaiveDate,
    max_count: u32,
) -> Vec<(u32, &'static str)> {
    let step = CELL_SIZE + CELL_MARGIN;
    let mut month_positions = Vec::new();
    let mut current_month = 0;
    let mut current = start_date;
    let mut week = 0u32;

    while current <= today && week < WEEKS {
        let sunday_weekday = current.weekday().num_days_from_sunday();

        // Month labels anchor to the first column starting in a new month.
        if sunday_weekday == 0 && current.month() != current_month {
            current_month = current.month();
            let label = MONTH_LABELS[usize::try_from(current_month - 1).unwrap_or(0)];
            month_positions.push((week, label));
        }

        let count = counts.get(&current).copied().unwrap_or(0);
        let level = HeatmapChart::color_level(count, max_count);
        let color = theme.heatmap_levels[level];

        let x = week * step;
        let y = sunday_weekday * step;
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="{color}" rx="2" ry="2"><title>{count} reviews on {}</title></rect>"#,
            current.format("%Y-%m-%d")
        );

        current = current + Days::new(1);
        if sunday_weekday == 6 {
            week += 1;
        }
    }

    month_positions
}

fn render_month_labels(svg: &mut String, theme: &Theme, positions: &[(u32, &'static str)]) {
    let step = CELL_SIZE + CELL_MARGIN;
    let mut last_label_week: i64 = -i64::from(MONTH_LABEL_SPACING);

    for &(week, label) in positions {
        if i64::from(week) - last_label_week < i64::from(MONTH_LABEL_SPACING) {
            continue;
        }
        let x = week * step;
        let _ = writeln!(
            svg,
            r#"<text x="{x}" y="-5" fill="{}" font-size="13" font-family="{FONT_STACK}">{label}</text>"#,
            theme.text
        );
        last_label_week = i64::from(week);
    }
}

fn render_legend(svg: &mut String, theme: &Theme, width: u32, height: u32) {
    let legend_y = height - 15;
    let legend_x = width - 120;

    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" fill="{}" font-size="11" font-family="{FONT_STACK}">Less</text>"#,
        legend_x - 30,
        legend_y + 8,
        theme.text
    );
    for (i, color) in theme.heatmap_levels.iter().enumerate() {
        let x = legend_x + u32::try_from(i).unwrap_or(0) * 14;
        let _ = writeln!(
            svg,
            r#"<rect x="{x}" y="{legend_y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="{color}" rx="2" ry="2"/>"#
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" fill="{}" font-size="11" font-family="{FONT_STACK}">More</text>"#,
        legend_x + 75,
        legend_y + 8,
        theme.text
    );
}

#[cfg(test)]
#[path = "heatmap_tests.rs"]
mod tests;
