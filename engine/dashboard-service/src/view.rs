//! # Dashboard View
//!
//! The full render model for one league and its plain-text rendering.

use crate::assets::LogoResolver;
use crate::chart::DivergenceChart;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::report::{HeadlineCards, ProjectionTable};
use projection_feed::RankedProjection;
use serde::Serialize;
use standings_engine::{Classification, PortfolioSummarizer, RankDivergenceLayout, Summary};
use std::fmt::Write as _;
use tracing::info;

/// Everything the dashboard shows for one league
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub league: String,
    pub summary: Summary,
    pub cards: HeadlineCards,
    pub chart: DivergenceChart,
    pub table: ProjectionTable,
}

impl DashboardView {
    /// Build the view for one league's ranked teams
    pub fn build(
        league: &str,
        teams: &[RankedProjection],
        config: &DashboardConfig,
        logos: Option<&LogoResolver>,
    ) -> Result<Self> {
        let summary = PortfolioSummarizer::new(&config.leagues).summarize(teams)?;
        let rows = RankDivergenceLayout::layout(teams)?;

        let view = Self {
            title: format!("{league} Projections"),
            league: league.to_string(),
            cards: HeadlineCards::from_summary(&summary),
            chart: DivergenceChart::build(&rows, &config.chart, logos),
            table: ProjectionTable::build(teams, config.chart.diff_shade_limit),
            summary,
        };

        info!("Built dashboard view for {} ({} teams)", league, teams.len());
        Ok(view)
    }

    /// Pretty JSON of the whole view, for an external renderer
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text rendering for the terminal
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(72);

        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out, "{rule}");

        for card in self.cards.iter() {
            match &card.detail {
                Some(detail) => {
                    let _ = writeln!(out, "{:<12} {} ({})", card.label, card.value, detail);
                }
                None => {
                    let _ = writeln!(out, "{:<12} {}", card.label, card.value);
                }
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Trajectory Divergence");
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(
            out,
            "{:>28}        {}",
            self.chart.baseline_header, self.chart.projection_header
        );

        let label_width =
            self.chart.lines.iter().map(|line| line.left_label.len()).max().unwrap_or(0).max(28);

        for line in &self.chart.lines {
            let marker = match line.classification {
                Classification::Favored => "▲",
                Classification::Disfavored => "▼",
                Classification::Neutral => "·",
            };
            let _ = writeln!(
                out,
                "{:>width$}  ──{}──>  {:>2}. {}",
                line.left_label,
                marker,
                line.right.y,
                line.right_label,
                width = label_width
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Detailed Projections");
        let _ = writeln!(out, "{rule}");
        let [team, model, elo, diff] = ProjectionTable::HEADERS;
        let _ = writeln!(out, "{:>3}  {:<24} {:>9} {:>9} {:>7}", "#", team, model, elo, diff);
        for row in &self.table.rows {
            let [team, model, elo, diff] = row.cells();
            let _ = writeln!(out, "{:>3}  {:<24} {:>9} {:>9} {:>7}", row.index, team, model, elo, diff);
        }

        out
    }
}
