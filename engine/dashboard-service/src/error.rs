//! Error types for the dashboard

use projection_feed::FeedError;
use standings_engine::StandingsError;
use thiserror::Error;

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors that can occur while building or exporting the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Standings error: {0}")]
    Standings(#[from] StandingsError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration write error: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Message for the user when the dashboard has nothing to render
    ///
    /// Returns `None` for errors that are not about the feed being unusable.
    pub fn user_message(&self) -> Option<String> {
        match self {
            DashboardError::Feed(e) if e.is_fatal_for_dashboard() => {
                Some(format!("⚠️ {e}. Please run the deployment script."))
            }
            _ => None,
        }
    }
}
