//! # Headline Cards and Projection Table

use projection_feed::RankedProjection;
use serde::Serialize;
use standings_engine::Summary;

/// Visual tone of a headline card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTone {
    Positive,
    Negative,
}

/// One headline metric box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub label: &'static str,
    pub value: String,
    pub detail: Option<String>,
    pub tone: CardTone,
}

/// The four headline cards above the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineCards {
    pub champion: Card,
    pub value_pick: Card,
    pub fade: Card,
    pub relegation: Card,
}

impl HeadlineCards {
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            champion: Card {
                label: "Champion",
                value: summary.champion.team.clone(),
                detail: Some(format!("{:.1} Pts", summary.champion.projected_points_ensemble)),
                tone: CardTone::Positive,
            },
            value_pick: Card {
                label: "Value Pick",
                value: summary.value_pick.team.clone(),
                detail: Some(format!("{:+.1} vs Elo", summary.value_pick.divergence)),
                tone: CardTone::Positive,
            },
            fade: Card {
                label: "Fade",
                value: summary.fade_pick.team.clone(),
                detail: Some(format!("{:+.1} vs Elo", summary.fade_pick.divergence)),
                tone: CardTone::Negative,
            },
            relegation: Card {
                label: "Relegation",
                value: summary.relegation.to_string(),
                detail: None,
                tone: CardTone::Negative,
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        [&self.champion, &self.value_pick, &self.fade, &self.relegation].into_iter()
    }
}

/// Direction of the diff cell shading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadeDirection {
    Negative,
    Flat,
    Positive,
}

/// Diff cell shading on a red-to-green scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiffShade {
    pub direction: ShadeDirection,
    /// 0.0 (neutral) to 1.0 (saturated at the configured limit)
    pub intensity: f64,
}

impl DiffShade {
    /// Shade a points difference, saturating at `±limit`
    pub fn for_diff(diff: f64, limit: f64) -> Self {
        let direction = if diff > 0.0 {
            ShadeDirection::Positive
        } else if diff < 0.0 {
            ShadeDirection::Negative
        } else {
            ShadeDirection::Flat
        };

        let intensity = if limit > 0.0 { (diff.abs() / limit).min(1.0) } else { 1.0 };
        let intensity = if direction == ShadeDirection::Flat { 0.0 } else { intensity };

        Self { direction, intensity }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// 1-based position by ensemble points
    pub index: usize,
    pub team: String,
    pub model_pts: f64,
    pub elo_pts: f64,
    pub diff: f64,
    pub shade: DiffShade,
}

impl TableRow {
    /// Formatted cells: Team, Model Pts, Elo Pts, Diff
    pub fn cells(&self) -> [String; 4] {
        [
            self.team.clone(),
            format!("{:.1}", self.model_pts),
            format!("{:.1}", self.elo_pts),
            format!("{:+.1}", self.diff),
        ]
    }
}

/// Detailed projections sorted by ensemble points, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionTable {
    pub rows: Vec<TableRow>,
}

impl ProjectionTable {
    pub const HEADERS: [&'static str; 4] = ["Team", "Model Pts", "Elo Pts", "Diff"];

    pub fn build(teams: &[RankedProjection], shade_limit: f64) -> Self {
        let mut sorted: Vec<&RankedProjection> = teams.iter().collect();
        sorted.sort_by(|a, b| {
            b.projection.projected_points_ensemble.total_cmp(&a.projection.projected_points_ensemble)
        });

        let rows = sorted
            .into_iter()
            .enumerate()
            .map(|(i, team)| TableRow {
                index: i + 1,
                team: team.team().to_string(),
                model_pts: team.projection.projected_points_ensemble,
                elo_pts: team.projection.projected_points_baseline,
                diff: team.projection.divergence,
                shade: DiffShade::for_diff(team.projection.divergence, shade_limit),
            })
            .collect();

        Self { rows }
    }
}
