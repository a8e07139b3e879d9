//! # Configuration Management
//!
//! Configuration structures for the dashboard shell.

use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use projection_feed::{FeedOptions, RankMethod, DEFAULT_FEED_PATH};
use serde::{Deserialize, Serialize};
use standings_engine::LeagueConfig;
use std::path::{Path, PathBuf};

/// Main configuration for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Projection feed configuration
    pub feed: FeedConfig,
    /// Team logo configuration
    pub assets: AssetConfig,
    /// Divergence chart configuration
    pub chart: ChartConfig,
    /// League names, order and relegation rules
    pub leagues: LeagueConfig,
}

/// Projection feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Path to the CSV feed
    pub path: PathBuf,
    /// Tie handling when ranking both orderings
    pub rank_method: RankMethod,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_FEED_PATH), rank_method: RankMethod::Dense }
    }
}

/// Team logo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding `<team>.png` files
    pub logo_dir: PathBuf,
    /// Desired on-chart logo size in pixels
    pub target_size_px: f64,
    /// Smallest zoom factor ever applied
    pub min_zoom: f64,
    /// Largest zoom factor ever applied
    pub max_zoom: f64,
    /// Zoom used when a logo has no measurable content
    pub fallback_zoom: f64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            logo_dir: PathBuf::from("logos"),
            target_size_px: 22.0,
            min_zoom: 0.02,
            max_zoom: 0.15,
            fallback_zoom: 0.05,
        }
    }
}

/// Divergence chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Date the current standings were taken; shown in the left header when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standings_date: Option<NaiveDate>,
    /// Left column header when no date is configured
    pub baseline_header: String,
    /// Right column header
    pub projection_header: String,
    /// Point difference at which table shading saturates
    pub diff_shade_limit: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            standings_date: None,
            baseline_header: "Current Standings".to_string(),
            projection_header: "Final Projected Standings".to_string(),
            diff_shade_limit: 5.0,
        }
    }
}

impl ChartConfig {
    /// Left column header, e.g. "Feb 12, 2026 Standings"
    pub fn baseline_header_text(&self) -> String {
        match self.standings_date {
            Some(date) => format!("{} Standings", date.format("%b %d, %Y")),
            None => self.baseline_header.clone(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("{}: {e}", path.display())))?;
        let config: DashboardConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from `DASHBOARD_CONFIG` (if set), then apply
    /// `DASHBOARD_FEED` and `DASHBOARD_LOGOS` overrides
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var("DASHBOARD_CONFIG") {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(feed) = std::env::var("DASHBOARD_FEED") {
            config.feed.path = PathBuf::from(feed);
        }

        if let Ok(logos) = std::env::var("DASHBOARD_LOGOS") {
            config.assets.logo_dir = PathBuf::from(logos);
        }

        Ok(config)
    }

    /// Feed loading options derived from the league and feed settings
    pub fn feed_options(&self) -> FeedOptions {
        self.leagues.feed_options(self.feed.rank_method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.feed.path, PathBuf::from("Final_App_Data.csv"));
        assert_eq!(config.feed.rank_method, RankMethod::Dense);
        assert_eq!(config.assets.target_size_px, 22.0);
        assert_eq!(config.chart.baseline_header_text(), "Current Standings");
        assert_eq!(config.leagues.display_order.len(), 5);
    }

    #[test]
    fn test_dated_header() {
        let chart = ChartConfig {
            standings_date: NaiveDate::from_ymd_opt(2026, 2, 12),
            ..Default::default()
        };
        assert_eq!(chart.baseline_header_text(), "Feb 12, 2026 Standings");
    }

    #[test]
    fn test_partial_toml() {
        let config: DashboardConfig = toml::from_str(
            r#"
            [feed]
            path = "data/projections.csv"
            rank_method = "min"

            [chart]
            standings_date = "2026-02-12"
            "#,
        )
        .unwrap();

        assert_eq!(config.feed.path, PathBuf::from("data/projections.csv"));
        assert_eq!(config.feed.rank_method, RankMethod::Min);
        assert_eq!(config.chart.projection_header, "Final Projected Standings");
        assert_eq!(config.assets.max_zoom, 0.15);
        assert_eq!(config.feed_options().rank_method, RankMethod::Min);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");

        let mut config = DashboardConfig::default();
        config.assets.logo_dir = PathBuf::from("assets/logos");
        config.save_to_file(&path).unwrap();

        let loaded = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.assets.logo_dir, PathBuf::from("assets/logos"));
        assert_eq!(loaded.leagues, config.leagues);
    }

    #[test]
    fn test_missing_config_file() {
        let err = DashboardConfig::load_from_file("/nonexistent/dashboard.toml").unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
