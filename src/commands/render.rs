use std::path::{Path, PathBuf};

use crate::chart::{
    HeatmapChart, Theme, deck_progress_svg, deck_ranking_chart, monthly_deck_chart,
    progress_bar_svg, progress_ring_svg, stats_card_svg, weekly_reviews_chart,
    weekly_time_chart,
};
use crate::cli::{Cli, RenderArgs};
use crate::config::{ChartsConfig, Config};
use crate::export::{DataExporter, write_atomic};
use crate::stats::StatsSnapshot;
use crate::{EXIT_SUCCESS, Result};

use super::{exit_code_for, repo_root};

pub const OUTPUT_DIR: &str = "output";

#[must_use]
pub fn run_render(args: &RenderArgs, cli: &Cli) -> i32 {
    match run_render_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code_for(&e)
        }
    }
}

fn run_render_impl(args: &RenderArgs, cli: &Cli) -> Result<i32> {
    let root = repo_root(args.repo.as_deref());
    let config = Config::load(&root, cli.no_config)?;

    let snapshot = DataExporter::new(&root).load_snapshot()?;
    let written = render_all_charts(&snapshot, &root.join(OUTPUT_DIR), &config.charts)?;

    if !cli.quiet {
        println!("Rendered {} chart files", written.len());
    }

    Ok(EXIT_SUCCESS)
}

/// Render every chart into `output_dir`, light and dark variants side by
/// side. Returns the paths written.
///
/// All date-dependent charts key off the snapshot's generation date, so
/// re-rendering exported data reproduces the same images.
pub(crate) fn render_all_charts(
    snapshot: &StatsSnapshot,
    output_dir: &Path,
    charts: &ChartsConfig,
) -> Result<Vec<PathBuf>> {
    let light = Theme::light();
    let dark = Theme::dark();
    let today = snapshot.generated_date();
    let mut written = Vec::new();

    let heatmap = HeatmapChart::new(snapshot.heatmap.clone());
    write_pair(
        output_dir,
        "heatmap",
        &heatmap.render(&light),
        &heatmap.render(&dark),
        &mut written,
    )?;

    let decks = snapshot.decks_by_size();
    write_pair(
        output_dir,
        "decks",
        &deck_progress_svg(&decks, charts.max_progress_decks, &light),
        &deck_progress_svg(&decks, charts.max_progress_decks, &dark),
        &mut written,
    )?;

    let weekly = weekly_reviews_chart(&snapshot.daily_reviews, today);
    write_pair(
        output_dir,
        "weekly",
        &weekly.render(&light),
        &weekly.render(&dark),
        &mut written,
    )?;

    let time = weekly_time_chart(&snapshot.daily_time_minutes, today);
    write_pair(
        output_dir,
        "time",
        &time.render(&light),
        &time.render(&dark),
        &mut written,
    )?;

    let reviews = deck_ranking_chart(&snapshot.deck_reviews_week, charts.max_ranked_decks);
    write_pair(
        output_dir,
        "reviews",
        &reviews.render(&light),
        &reviews.render(&dark),
        &mut written,
    )?;

    let cards = monthly_deck_chart(&snapshot.deck_reviews_month, charts.max_progress_decks);
    write_pair(
        output_dir,
        "cards",
        &cards.render(&light),
        &cards.render(&dark),
        &mut written,
    )?;

    write_pair(
        output_dir,
        "stats-card",
        &stats_card_svg(&snapshot.cards, snapshot.streak, snapshot.weekly_reviews, &light),
        &stats_card_svg(&snapshot.cards, snapshot.streak, snapshot.weekly_reviews, &dark),
        &mut written,
    )?;

    let mastery = snapshot.cards.mastery_percent();
    let ring_path = output_dir.join("progress-ring.svg");
    write_atomic(&ring_path, progress_ring_svg(mastery, "Mastery").as_bytes())?;
    written.push(ring_path);

    let bar_path = output_dir.join("progress-bar.svg");
    write_atomic(
        &bar_path,
        progress_bar_svg(
            snapshot.cards.mature,
            snapshot.cards.active(),
            "Mastery Progress",
        )
        .as_bytes(),
    )?;
    written.push(bar_path);

    Ok(written)
}

fn write_pair(
    output_dir: &Path,
    name: &str,
    light_svg: &str,
    dark_svg: &str,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let light_path = output_dir.join(format!("{name}.svg"));
    write_atomic(&light_path, light_svg.as_bytes())?;
    written.push(light_path);

    let dark_path = output_dir.join(format!("{name}-dark.svg"));
    write_atomic(&dark_path, dark_svg.as_bytes())?;
    written.push(dark_path);

    Ok(())
}
