//! Chart color themes. Every chart renders twice, once per theme, and the
//! README picks the right file via `prefers-color-scheme`.

/// Font stack shared by all rendered text.
pub const FONT_STACK: &str =
    "-apple-system, BlinkMacSystemFont, Segoe UI, Helvetica, Arial, sans-serif";

/// Accent color role for bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    /// Review counts (green).
    Reviews,
    /// Study time (purple).
    Time,
    /// Card ranking (orange).
    Cards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub bar_empty: &'static str,
    pub border: &'static str,
    pub accent_reviews: &'static str,
    pub accent_time: &'static str,
    pub accent_cards: &'static str,
    pub gradient_start: &'static str,
    pub gradient_end: &'static str,
    /// Heatmap cell colors, inactivity first.
    pub heatmap_levels: [&'static str; 5],
}

impl Theme {
    #[must_use]
    pub const fn light() -> Self {
        Self {
            bg: "#ffffff",
            text: "#1f2328",
            muted: "#656d76",
            bar_empty: "#ebedf0",
            border: "#e1e4e8",
            accent_reviews: "#40c463",
            accent_time: "#8250df",
            accent_cards: "#fb8f44",
            gradient_start: "#2da44e",
            gradient_end: "#3fb950",
            heatmap_levels: ["#ebedf0", "#9be9a8", "#40c463", "#30a14e", "#216e39"],
        }
    }

    #[must_use]
    pub const fn dark() -> Self {
        Self {
            bg: "#0d1117",
            text: "#e6edf3",
            muted: "#8b949e",
            bar_empty: "#161b22",
            border: "#30363d",
            accent_reviews: "#26a641",
            accent_time: "#8957e5",
            accent_cards: "#f78166",
            gradient_start: "#238636",
            gradient_end: "#2ea043",
            heatmap_levels: ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"],
        }
    }

    #[must_use]
    pub const fn accent(&self, accent: Accent) -> &'static str {
        match accent {
            Accent::Reviews => self.accent_reviews,
            Accent::Time => self.accent_time,
            Accent::Cards => self.accent_cards,
        }
    }
}

#[cfg(test)]
#[path = "theme_tests.rs"]
mod tests;
