//! # Divergence Chart
//!
//! Turns layout rows into a drawable two-column slope chart model. The
//! baseline rank anchors each line on the left; the contiguous visual
//! position anchors it on the right.

use crate::assets::LogoResolver;
use crate::config::ChartConfig;
use serde::Serialize;
use standings_engine::{Classification, LayoutRow};

/// Left column x coordinate
pub const BASELINE_X: f64 = 0.0;

/// Right column x coordinate
pub const PROJECTION_X: f64 = 1.0;

/// Horizontal extent that leaves room for labels and logos
pub const X_LIMITS: (f64, f64) = (-0.5, 2.2);

/// Line and label styling for one classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emphasis {
    pub color: &'static str,
    pub alpha: f64,
    pub line_width: f64,
    pub bold_label: bool,
}

impl Emphasis {
    pub fn for_classification(classification: Classification) -> Self {
        match classification {
            Classification::Favored => {
                Self { color: "#4bbf73", alpha: 0.9, line_width: 2.5, bold_label: true }
            }
            Classification::Disfavored => {
                Self { color: "#ff4b4b", alpha: 0.9, line_width: 2.5, bold_label: false }
            }
            Classification::Neutral => {
                Self { color: "#e0e0e0", alpha: 0.3, line_width: 1.0, bold_label: false }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// One team's line in the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLine {
    pub team: String,
    pub classification: Classification,
    pub left: Anchor,
    pub right: Anchor,
    pub left_label: String,
    pub right_label: String,
    pub emphasis: Emphasis,
    /// Zoom for the team logo next to the right label, if a logo exists
    pub logo_zoom: Option<f64>,
}

/// Drawable model of the divergence chart for one league
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergenceChart {
    pub baseline_header: String,
    pub projection_header: String,
    /// Inverted so rank 1 sits at the top; sized by team count, not max rank
    pub y_limits: (f64, f64),
    pub x_limits: (f64, f64),
    pub lines: Vec<ChartLine>,
}

impl DivergenceChart {
    /// Build the chart model; pass `None` to skip logo lookup entirely
    pub fn build(rows: &[LayoutRow], config: &ChartConfig, logos: Option<&LogoResolver>) -> Self {
        let lines = rows
            .iter()
            .map(|row| ChartLine {
                team: row.team.clone(),
                classification: row.classification,
                left: Anchor { x: BASELINE_X, y: f64::from(row.rank_baseline) },
                right: Anchor { x: PROJECTION_X, y: f64::from(row.visual_position) },
                left_label: row.baseline_label(),
                right_label: row.label(),
                emphasis: Emphasis::for_classification(row.classification),
                logo_zoom: logos.and_then(|resolver| {
                    resolver.resolve(&row.team).map(|asset| resolver.zoom_for(&asset))
                }),
            })
            .collect();

        Self {
            baseline_header: config.baseline_header_text(),
            projection_header: config.projection_header.clone(),
            y_limits: (rows.len() as f64 + 1.0, 0.0),
            x_limits: X_LIMITS,
            lines,
        }
    }
}
