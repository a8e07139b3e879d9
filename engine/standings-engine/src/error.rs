//! Error types for the standings engine

use projection_feed::RankOrdering;
use thiserror::Error;

/// Result type for standings engine operations
pub type Result<T> = std::result::Result<T, StandingsError>;

/// Caller contract violations; none of these are transient
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StandingsError {
    #[error("Team '{team}' has no {ordering} rank")]
    MissingRank { team: String, ordering: RankOrdering },

    #[error("No teams to evaluate")]
    EmptyGroup,

    #[error("{group}: relegation policy needs {required} teams, only {available} available")]
    InsufficientTeams { group: String, required: usize, available: usize },

    #[error("Teams from '{found}' mixed into '{expected}'")]
    MixedGroups { expected: String, found: String },
}
