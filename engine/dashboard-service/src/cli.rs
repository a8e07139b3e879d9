//! # Command Line Interface
//!
//! CLI for browsing league projections and exporting the render model.

use crate::assets::LogoResolver;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::view::DashboardView;
use clap::{Parser, Subcommand};
use projection_feed::{FeedCache, FeedError, ProjectionFeed};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// League projection dashboard
#[derive(Parser)]
#[command(name = "league-dashboard")]
#[command(about = "Compare ensemble and Elo projected standings per league")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the projection feed (overrides configuration)
    #[arg(short, long)]
    pub feed: Option<PathBuf>,

    /// Directory containing team logos (overrides configuration)
    #[arg(long)]
    pub logos: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available leagues in display order
    Leagues,
    /// Show cards, divergence chart and projection table for a league
    Show {
        /// League display name (defaults to the first available league)
        #[arg(long)]
        league: Option<String>,
    },
    /// Export the render model as JSON
    Export {
        /// League display name (defaults to the first available league)
        #[arg(long)]
        league: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

impl Cli {
    /// Resolve configuration: file (flag or environment), then CLI overrides
    pub fn resolve_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::load_from_file(path)?,
            None => DashboardConfig::from_env()?,
        };

        if let Some(feed) = &self.feed {
            config.feed.path = feed.clone();
        }
        if let Some(logos) = &self.logos {
            config.assets.logo_dir = logos.clone();
        }

        Ok(config)
    }
}

/// CLI handler
pub struct CliHandler {
    config: DashboardConfig,
    cache: FeedCache,
    logos: LogoResolver,
}

impl CliHandler {
    /// Create new CLI handler
    pub fn new(config: DashboardConfig) -> Self {
        let cache = FeedCache::new(config.feed_options());
        let logos = LogoResolver::new(config.assets.clone());
        Self { config, cache, logos }
    }

    /// Handle CLI commands
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Leagues => {
                self.list_leagues().await?;
            }
            Commands::Show { league } => {
                let view = self.view(league.as_deref()).await?;
                print!("{}", view.render_text());
            }
            Commands::Export { league, out } => {
                let view = self.view(league.as_deref()).await?;
                let json = view.to_json()?;
                match out {
                    Some(path) => {
                        tokio::fs::write(&path, json).await?;
                        info!("Wrote {} render model to {:?}", view.league, path);
                    }
                    None => println!("{json}"),
                }
            }
        }
        Ok(())
    }

    /// Load (or reuse) the feed
    pub async fn feed(&self) -> Result<Arc<ProjectionFeed>> {
        Ok(self.cache.get_or_load(&self.config.feed.path).await?)
    }

    /// Leagues in the feed, in display order
    pub async fn available_leagues(&self) -> Result<Vec<String>> {
        let feed = self.feed().await?;
        Ok(self.config.leagues.available(feed.leagues()))
    }

    /// Build the view for `league`, or the first available league
    pub async fn view(&self, league: Option<&str>) -> Result<DashboardView> {
        let feed = self.feed().await?;

        let league = match league {
            Some(league) => league.to_string(),
            None => self
                .config
                .leagues
                .available(feed.leagues())
                .into_iter()
                .next()
                .ok_or(FeedError::Empty)?,
        };

        let teams = feed.league(&league)?;
        DashboardView::build(&league, teams, &self.config, Some(&self.logos))
    }

    async fn list_leagues(&self) -> Result<()> {
        let feed = self.feed().await?;
        for league in self.config.leagues.available(feed.leagues()) {
            let count = feed.league(&league).map(|teams| teams.len()).unwrap_or(0);
            println!("{league} ({count} teams)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
league,team,ensemble_projected,projected_pts,p5,p95,diff_vs_elo
ITA-Serie A,Inter,84.0,80.0,76,92,4.0
ITA-Serie A,Napoli,78.0,79.0,70,86,-1.0
ITA-Serie A,Monza,22.0,25.0,16,29,-3.0
ITA-Serie A,Empoli,28.0,27.0,21,35,1.0
ENG-Premier League,Arsenal,81.4,76.9,72,90,4.5
ENG-Premier League,Liverpool,79.0,82.1,70,88,-3.1
ENG-Premier League,Ipswich,25.0,27.0,19,31,-2.0
";

    fn handler(dir: &std::path::Path) -> CliHandler {
        let path = dir.join("feed.csv");
        std::fs::write(&path, FEED).unwrap();

        let mut config = DashboardConfig::default();
        config.feed.path = path;
        config.assets.logo_dir = dir.join("logos");
        CliHandler::new(config)
    }

    #[tokio::test]
    async fn test_leagues_in_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let leagues = handler(dir.path()).available_leagues().await.unwrap();
        assert_eq!(leagues, vec!["(ENG) Premier League", "(ITA) Serie A"]);
    }

    #[tokio::test]
    async fn test_default_view_is_first_league() {
        let dir = tempfile::tempdir().unwrap();
        let view = handler(dir.path()).view(None).await.unwrap();
        assert_eq!(view.league, "(ENG) Premier League");
        assert_eq!(view.summary.champion.team, "Arsenal");
        assert_eq!(view.cards.relegation.value, "Ipswich, Liverpool, Arsenal");
    }

    #[tokio::test]
    async fn test_named_view() {
        let dir = tempfile::tempdir().unwrap();
        let view = handler(dir.path()).view(Some("(ITA) Serie A")).await.unwrap();
        assert_eq!(view.summary.value_pick.team, "Inter");
        assert_eq!(view.summary.fade_pick.team, "Monza");
    }

    #[tokio::test]
    async fn test_unknown_league() {
        let dir = tempfile::tempdir().unwrap();
        let err = handler(dir.path()).view(Some("(ESP) La Liga")).await.unwrap_err();
        assert!(err.to_string().contains("(ESP) La Liga"));
    }

    #[tokio::test]
    async fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("view.json");
        handler(dir.path())
            .handle_command(Commands::Export {
                league: Some("(ITA) Serie A".to_string()),
                out: Some(out.clone()),
            })
            .await
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["league"], "(ITA) Serie A");
        assert_eq!(json["table"]["rows"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_shipped_config_and_sample_feed() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let mut config = DashboardConfig::load_from_file(root.join("config/dashboard.toml")).unwrap();
        config.feed.path = root.join("data/sample_feed.csv");

        let handler = CliHandler::new(config);
        let leagues = handler.available_leagues().await.unwrap();
        assert_eq!(leagues, vec!["(ENG) Premier League", "(GER) Bundesliga", "(FRA) Ligue 1"]);

        let view = handler.view(Some("(FRA) Ligue 1")).await.unwrap();
        assert_eq!(view.chart.baseline_header, "Feb 12, 2026 Standings");
        assert_eq!(view.summary.relegation.auto, vec!["Montpellier", "Saint-Etienne"]);
        assert_eq!(view.summary.relegation.playoff.as_deref(), Some("Le Havre"));

        // Marseille and Monaco tie on ensemble points
        let tied: Vec<_> = view
            .chart
            .lines
            .iter()
            .filter(|l| l.team == "Marseille" || l.team == "Monaco")
            .map(|l| l.right.y)
            .collect();
        assert_eq!(tied, vec![2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_missing_feed_is_user_facing() {
        let mut config = DashboardConfig::default();
        config.feed.path = PathBuf::from("/nonexistent/Final_App_Data.csv");
        let err = CliHandler::new(config).view(None).await.unwrap_err();
        assert!(err.user_message().unwrap().contains("Please run the deployment script"));
    }
}
