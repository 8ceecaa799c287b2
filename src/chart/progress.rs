//! Progress visualizations: per-deck mastery rows, the mastery ring and
//! the mastery bar.

use std::f64::consts::PI;
use std::fmt::Write;

use crate::STANDARD_CHART_WIDTH;
use crate::stats::DeckStats;

use super::format::{format_thousands, html_escape, truncate_label};
use super::no_data_svg;
use super::theme::Theme;

const ROW_HEIGHT: u32 = 38;
const ROW_BAR_HEIGHT: u32 = 6;

/// Deck names longer than this are shortened in the rows chart.
const DECK_NAME_MAX: usize = 36;

/// Per-deck mastery rows: name, mature/total and a gradient progress bar,
/// largest decks first.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
#[must_use]
pub fn deck_progress_svg(decks: &[&DeckStats], max_decks: usize, theme: &Theme) -> String {
    let shown: Vec<&&DeckStats> = decks.iter().take(max_decks).collect();
    if shown.is_empty() {
        return no_data_svg(theme, STANDARD_CHART_WIDTH);
    }

    let width = STANDARD_CHART_WIDTH;
    let height = u32::try_from(shown.len()).unwrap_or(0) * ROW_HEIGHT;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#
    );
    let _ = writeln!(svg, "<defs>");
    let _ = writeln!(
        svg,
        r#"  <linearGradient id="barGrad" x1="0%" y1="0%" x2="100%" y2="0%">"#
    );
    let _ = writeln!(
        svg,
        r#"    <stop offset="0%" style="stop-color:{}"/>"#,
        theme.gradient_start
    );
    let _ = writeln!(
        svg,
        r#"    <stop offset="100%" style="stop-color:{}"/>"#,
        theme.gradient_end
    );
    let _ = writeln!(svg, "  </linearGradient>");
    let _ = writeln!(svg, "</defs>");
    let _ = writeln!(
        svg,
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        theme.bg
    );

    for (i, deck) in shown.iter().enumerate() {
        let y = u32::try_from(i).unwrap_or(0) * ROW_HEIGHT + 14;
        let name = html_escape(&truncate_label(&deck.name, DECK_NAME_MAX));

        let _ = writeln!(
            svg,
            r#"<text x="0" y="{y}" font-family="system-ui, -apple-system, sans-serif" font-size="13" fill="{}">{name}</text>"#,
            theme.text
        );
        let _ = writeln!(
            svg,
            r#"<text x="{width}" y="{y}" text-anchor="end" font-family="system-ui, -apple-system, sans-serif" font-size="12" fill="{}">{}/{}</text>"#,
            theme.muted,
            format_thousands(deck.mature),
            format_thousands(deck.total)
        );

        let bar_y = y + 10;
        let _ = writeln!(
            svg,
            r#"<rect x="0" y="{bar_y}" width="{width}" height="{ROW_BAR_HEIGHT}" fill="{}" rx="3"/>"#,
            theme.bar_empty
        );

        if deck.total > 0 && deck.mature > 0 {
            let bar_w = (deck.mature as f64 / deck.total as f64) * f64::from(width);
            let _ = writeln!(
                svg,
                r#"<rect x="0" y="{bar_y}" width="{bar_w}" height="{ROW_BAR_HEIGHT}" fill="url(#barGrad)" rx="3"/>"#
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

/// Circular mastery ring; the arc length comes from the dash offset on a
/// full circle rotated to start at twelve o'clock.
#[must_use]
pub fn progress_ring_svg(percentage: u64, label: &str) -> String {
    const SIZE: f64 = 120.0;
    const STROKE_WIDTH: f64 = 12.0;

    let center = SIZE / 2.0;
    let radius = (SIZE - STROKE_WIDTH) / 2.0;
    let circumference = 2.0 * PI * radius;
    #[allow(clippy::cast_precision_loss)]
    let dash_offset = circumference * (1.0 - percentage.min(100) as f64 / 100.0);
    let escaped_label = html_escape(label);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{SIZE}" height="{SIZE}" viewBox="0 0 {SIZE} {SIZE}">
  <circle cx="{center}" cy="{center}" r="{radius}" fill="none" stroke="#e0e0e0" stroke-width="{STROKE_WIDTH}"/>
  <circle cx="{center}" cy="{center}" r="{radius}" fill="none" stroke="#40c463" stroke-width="{STROKE_WIDTH}"
    stroke-linecap="round" stroke-dasharray="{circumference}" stroke-dashoffset="{dash_offset}"
    transform="rotate(-90 {center} {center})"/>
  <text x="{center}" y="{center}" text-anchor="middle" dominant-baseline="middle"
    font-family="system-ui, -apple-system, sans-serif" font-size="24" font-weight="bold" fill="#333">{percentage}%</text>
  <text x="{center}" y="{label_y}" text-anchor="middle" dominant-baseline="middle"
    font-family="system-ui, -apple-system, sans-serif" font-size="10" fill="#666">{escaped_label}</text>
</svg>"##,
        label_y = center + 18.0
    )
}

/// Horizontal mastery bar with a `current / total (pct%)` caption.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn progress_bar_svg(current: u64, total: u64, label: &str) -> String {
    const WIDTH: f64 = 300.0;
    const HEIGHT: f64 = 30.0;

    let percentage = if total > 0 {
        current as f64 / total as f64 * 100.0
    } else {
        0.0
    };
    let fill_width = (WIDTH - 4.0) * (percentage / 100.0);
    let escaped_label = html_escape(label);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{svg_height}" viewBox="0 0 {WIDTH} {svg_height}">
  <text x="0" y="12" font-family="system-ui, -apple-system, sans-serif" font-size="12" fill="#57606a">{escaped_label}</text>
  <rect x="0" y="18" width="{WIDTH}" height="{HEIGHT}" fill="#e0e0e0" rx="4"/>
  <rect x="2" y="20" width="{fill_width}" height="{bar_height}" fill="#40c463" rx="3"/>
  <text x="{text_x}" y="{text_y}" text-anchor="middle" font-family="system-ui, -apple-system, sans-serif" font-size="12" font-weight="500" fill="#fff">{current_fmt} / {total_fmt} ({percentage:.1}%)</text>
</svg>"##,
        svg_height = HEIGHT + 20.0,
        bar_height = HEIGHT - 4.0,
        text_x = WIDTH / 2.0,
        text_y = 18.0 + HEIGHT / 2.0 + 5.0,
        current_fmt = format_thousands(current),
        total_fmt = format_thousands(total),
    )
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
