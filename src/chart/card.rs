//! Card-state overview: pie chart, legend and a totals row.

use std::fmt::Write;

use crate::stats::CardCounts;

use super::format::format_thousands;
use super::theme::Theme;

const WIDTH: u32 = 400;
const HEIGHT: u32 = 200;

// Card-state colors are shared by both themes.
const MATURE_COLOR: &str = "#40c463";
const LEARNING_COLOR: &str = "#ffc107";
const NEW_COLOR: &str = "#58a6ff";
const SUSPENDED_COLOR: &str = "#6e7681";

/// Render the stats overview card for one theme.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn stats_card_svg(
    cards: &CardCounts,
    streak: u32,
    weekly_reviews: u64,
    theme: &Theme,
) -> String {
    let active = cards.active();
    let pct = |count: u64| {
        if active > 0 {
            count as f64 / active as f64 * 100.0
        } else {
            0.0
        }
    };

    let pie = pie_paths(
        150.0,
        110.0,
        50.0,
        &[
            (pct(cards.mature), MATURE_COLOR),
            (pct(cards.learning), LEARNING_COLOR),
            (pct(cards.new), NEW_COLOR),
        ],
    );

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
  <rect width="{WIDTH}" height="{HEIGHT}" fill="{bg}" rx="6"/>
  <rect x="0.5" y="0.5" width="{border_w}" height="{border_h}" fill="none" stroke="{border}" rx="6"/>

  <text x="20" y="30" font-family="system-ui, -apple-system, sans-serif" font-size="16" font-weight="600" fill="{text}">Card Statistics</text>

  {pie}

  <g transform="translate(220, 55)">
    <rect width="12" height="12" fill="{MATURE_COLOR}" rx="2"/>
    <text x="18" y="10" font-family="system-ui, -apple-system, sans-serif" font-size="12" fill="{text}">Mature: {mature}</text>

    <rect y="20" width="12" height="12" fill="{LEARNING_COLOR}" rx="2"/>
    <text x="18" y="30" font-family="system-ui, -apple-system, sans-serif" font-size="12" fill="{text}">Learning: {learning}</text>

    <rect y="40" width="12" height="12" fill="{NEW_COLOR}" rx="2"/>
    <text x="18" y="50" font-family="system-ui, -apple-system, sans-serif" font-size="12" fill="{text}">New: {new}</text>

    <rect y="60" width="12" height="12" fill="{SUSPENDED_COLOR}" rx="2"/>
    <text x="18" y="70" font-family="system-ui, -apple-system, sans-serif" font-size="12" fill="{muted}">Suspended: {suspended}</text>
  </g>

  <g transform="translate(20, 175)">
    <text font-family="system-ui, -apple-system, sans-serif" font-size="11" fill="{muted}">
      Total: {total} | Streak: {streak} days | Weekly: {weekly} reviews
    </text>
  </g>
</svg>"#,
        bg = theme.bg,
        border = theme.border,
        border_w = WIDTH - 1,
        border_h = HEIGHT - 1,
        text = theme.text,
        muted = theme.muted,
        mature = format_thousands(cards.mature),
        learning = format_thousands(cards.learning),
        new = format_thousands(cards.new),
        suspended = format_thousands(cards.suspended),
        total = format_thousands(cards.total),
        weekly = format_thousands(weekly_reviews),
    )
}

/// Pie segments as filled arc paths, starting at twelve o'clock and
/// sweeping clockwise. Zero-percent segments are skipped.
fn pie_paths(cx: f64, cy: f64, r: f64, segments: &[(f64, &str)]) -> String {
    let mut parts = Vec::new();
    let mut start_angle = -90.0_f64;

    for &(pct, color) in segments {
        if pct <= 0.0 {
            continue;
        }

        let angle = pct * 3.6;
        let end_angle = start_angle + angle;

        let start_rad = start_angle.to_radians();
        let end_rad = end_angle.to_radians();

        let x1 = r.mul_add(start_rad.cos(), cx);
        let y1 = r.mul_add(start_rad.sin(), cy);
        let x2 = r.mul_add(end_rad.cos(), cx);
        let y2 = r.mul_add(end_rad.sin(), cy);

        let large_arc = i32::from(angle > 180.0);

        let mut path = String::new();
        let _ = write!(
            path,
            r#"<path d="M {cx} {cy} L {x1} {y1} A {r} {r} 0 {large_arc} 1 {x2} {y2} Z" fill="{color}"/>"#
        );
        parts.push(path);

        start_angle = end_angle;
    }

    parts.join("\n  ")
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
