//! README.md assembly: badges, light/dark chart embeds and the top-decks
//! table.

use std::fmt::Write;

use crate::stats::StatsSnapshot;

/// Decks listed in the collapsible table.
const TABLE_MAX_DECKS: usize = 10;

/// Deck names longer than this are shortened in the table.
const TABLE_NAME_MAX: usize = 40;

/// Generate the full README.md content.
#[must_use]
pub fn generate_readme(snapshot: &StatsSnapshot) -> String {
    format!(
        "# Anki Statistics\n\n\
         {badges}\n\n\
         ## Review Activity\n\n\
         {heatmap}\n\n\
         ## Statistics\n\n\
         {stats_card}\n\n\
         ## This Week\n\n\
         {weekly}\n\n\
         {time}\n\n\
         ## Deck Activity\n\n\
         {reviews}\n\n\
         {cards}\n\n\
         ## Deck Progress\n\n\
         {decks}\n\n\
         ## Progress\n\n\
         <img src=\"output/progress-bar.svg\" alt=\"Progress\" width=\"300\">\n\
         {table}",
        badges = badges(snapshot),
        heatmap = picture_embed("Review Heatmap", "output/heatmap.svg", "output/heatmap-dark.svg"),
        stats_card = picture_embed("Statistics", "output/stats-card.svg", "output/stats-card-dark.svg"),
        weekly = picture_embed("Weekly Reviews", "output/weekly.svg", "output/weekly-dark.svg"),
        time = picture_embed("Weekly Study Time", "output/time.svg", "output/time-dark.svg"),
        reviews = picture_embed("Deck Review Ranking", "output/reviews.svg", "output/reviews-dark.svg"),
        cards = picture_embed("Monthly Deck Ranking", "output/cards.svg", "output/cards-dark.svg"),
        decks = picture_embed("Deck Progress", "output/decks.svg", "output/decks-dark.svg"),
        table = decks_table(snapshot),
    )
}

/// Conditional light/dark embed markup understood by GitHub.
fn picture_embed(alt: &str, light: &str, dark: &str) -> String {
    format!(
        "<picture>\n  \
         <source media=\"(prefers-color-scheme: dark)\" srcset=\"{dark}\">\n  \
         <source media=\"(prefers-color-scheme: light)\" srcset=\"{light}\">\n  \
         <img alt=\"{alt}\" src=\"{light}\">\n\
         </picture>"
    )
}

/// shields.io badge row: last sync, totals, streak and mastery.
fn badges(snapshot: &StatsSnapshot) -> String {
    let cards = &snapshot.cards;
    let date = snapshot.generated_date().format("%Y-%m-%d").to_string();

    // shields.io treats "--" as a literal hyphen and "_" as a space.
    let date_encoded = date.replace('-', "--");
    let total_encoded = underscore_thousands(cards.total);

    let streak = snapshot.streak;
    let streak_color = if streak >= 7 {
        "brightgreen"
    } else if streak >= 3 {
        "green"
    } else {
        "yellow"
    };

    let mastery_pct = cards.mastery_percent();
    let mastery_color = if mastery_pct >= 80 {
        "brightgreen"
    } else if mastery_pct >= 50 {
        "green"
    } else {
        "yellow"
    };

    format!(
        "![Last Sync](https://img.shields.io/badge/Last_Sync-{date_encoded}-blue) \
         ![Total Cards](https://img.shields.io/badge/Total_Cards-{total_encoded}-informational) \
         ![Streak](https://img.shields.io/badge/Streak-{streak}_days-{streak_color}) \
         ![Mastery](https://img.shields.io/badge/Mastery-{mastery_pct}%25-{mastery_color})"
    )
}

/// Collapsible table of the largest decks.
fn decks_table(snapshot: &StatsSnapshot) -> String {
    let decks = snapshot.decks_by_size();
    if decks.is_empty() {
        return String::new();
    }

    let mut table = String::new();
    table.push_str("\n\n<details>\n<summary><strong>Top Decks</strong></summary>\n\n");
    table.push_str("| Deck | Total | Mature | New |\n");
    table.push_str("|------|-------|--------|-----|\n");

    for deck in decks.iter().take(TABLE_MAX_DECKS) {
        let name = crate::chart::truncate_label(&deck.name, TABLE_NAME_MAX);
        let _ = writeln!(
            table,
            "| {name} | {} | {} | {} |",
            crate::chart::format_thousands(deck.total),
            crate::chart::format_thousands(deck.mature),
            crate::chart::format_thousands(deck.new),
        );
    }

    table.push_str("\n</details>\n");
    table
}

/// Thousands separated by underscores, the shields.io-safe variant.
fn underscore_thousands(value: u64) -> String {
    crate::chart::format_thousands(value).replace(',', "_")
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
