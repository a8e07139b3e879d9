//! Error types for the projection feed

use std::path::PathBuf;
use thiserror::Error;

/// Result type for projection feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

/// Errors that can occur while loading or querying the projection feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Data file '{}' not found", .path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Feed is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Feed contains no valid projection rows")]
    Empty,

    #[error("League '{0}' is not present in the feed")]
    UnknownLeague(String),
}

impl FeedError {
    /// Whether the whole dashboard has nothing to show
    pub fn is_fatal_for_dashboard(&self) -> bool {
        matches!(self, FeedError::Missing { .. } | FeedError::Empty | FeedError::MissingColumn(_))
    }
}
