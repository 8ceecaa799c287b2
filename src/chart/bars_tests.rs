use std::collections::BTreeMap;

use chrono::{Datelike, Days};

use crate::stats::DeckReviewCount;
use crate::stats::test_fixtures::{consecutive_days, empty_ranking, fixed_date};

use super::*;

fn datum(label: &str, value: u64) -> BarDatum {
    BarDatum {
        label: label.to_string(),
        value,
        tooltip: format!("{value} reviews"),
    }
}

fn ranked(name: &str, reviews: u64) -> DeckReviewCount {
    DeckReviewCount {
        id: "1".to_string(),
        name: name.to_string(),
        reviews,
    }
}

#[test]
fn empty_dataset_renders_placeholder() {
    let svg = BarChart::new(Vec::new()).render(&Theme::light());
    assert!(svg.contains("No data"));
    assert!(svg.contains(r#"width="300""#));
}

#[test]
fn empty_dataset_placeholder_uses_fixed_width() {
    let svg = BarChart::new(Vec::new())
        .with_fixed_width(792.0)
        .render(&Theme::light());
    assert!(svg.contains("No data"));
    assert!(svg.contains(r#"width="792""#));
}

#[test]
fn bars_scale_against_the_maximum() {
    let svg = BarChart::new(vec![datum("a", 100), datum("b", 50)]).render(&Theme::light());

    // Tallest bar hits the full height, half the value gets half the bar.
    assert!(svg.contains(r#"height="80""#));
    assert!(svg.contains(r#"height="40""#));
}

#[test]
fn zero_values_keep_floor_height_and_muted_fill() {
    let theme = Theme::light();
    let svg = BarChart::new(vec![datum("a", 0), datum("b", 9)]).render(&theme);

    assert!(svg.contains(r#"height="3""#));
    assert!(svg.contains(theme.bar_empty));
    // Zero label sits inside the track in the muted color.
    assert!(svg.contains(r#">0</text>"#));
}

#[test]
fn weekly_reviews_chart_draws_seven_bars() {
    let today = fixed_date();
    let daily = consecutive_days(today, 3, 12);
    let svg = weekly_reviews_chart(&daily, today).render(&Theme::light());

    let bar_count = svg.matches("<rect x=").count();
    assert_eq!(bar_count, 7);
    assert!(svg.contains(r#"width="390""#));
    assert!(svg.contains(&today.format("%m/%d").to_string()));
}

#[test]
fn weekly_time_chart_uses_minute_suffix_and_day_labels() {
    let today = fixed_date();
    let mut minutes = BTreeMap::new();
    minutes.insert(today, 42_u64);
    let svg = weekly_time_chart(&minutes, today).render(&Theme::light());

    assert!(svg.contains("42m</text>"));
    assert!(svg.contains(">Mon</text>"));
    assert!(svg.contains(">Sun</text>"));
    assert!(svg.contains(Theme::light().accent_time));
}

#[test]
fn weekly_time_chart_is_monday_anchored() {
    let today = fixed_date();
    let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    let mut minutes = BTreeMap::new();
    minutes.insert(monday, 10_u64);
    let svg = weekly_time_chart(&minutes, today).render(&Theme::light());

    assert!(svg.contains(&format!("10 min on {}", monday.format("%Y-%m-%d"))));
}

#[test]
fn deck_ranking_rotates_and_truncates_labels() {
    let decks = vec![
        ranked("Languages::Japanese Vocabulary", 120),
        ranked("Short", 30),
    ];
    let svg = deck_ranking_chart(&decks, 7).render(&Theme::light());

    assert!(svg.contains("rotate(45"));
    // Leaf segment only, shortened to fit under the bar.
    assert!(svg.contains("Japanese .."));
    assert!(!svg.contains("Languages::Japanese Vocabulary</text>"));
}

#[test]
fn deck_ranking_respects_max_decks() {
    let decks: Vec<DeckReviewCount> =
        (0..10).map(|i| ranked(&format!("Deck{i}"), 10 + i)).collect();
    let svg = deck_ranking_chart(&decks, 3).render(&Theme::light());

    assert_eq!(svg.matches("<rect x=").count(), 3);
}

#[test]
fn empty_ranking_renders_placeholder() {
    let svg = deck_ranking_chart(&empty_ranking(), 7).render(&Theme::dark());
    assert!(svg.contains("No data"));
}

#[test]
fn monthly_chart_fills_standard_width() {
    let decks = vec![ranked("A", 5), ranked("B", 3)];
    let svg = monthly_deck_chart(&decks, 10).render(&Theme::light());

    assert!(svg.contains(r#"width="792""#));
    assert!(svg.contains(Theme::light().accent_cards));
}

#[test]
fn tooltips_escape_markup() {
    let decks = vec![ranked("Q&A", 4)];
    let svg = deck_ranking_chart(&decks, 7).render(&Theme::light());
    assert!(svg.contains("Q&amp;A"));
}
