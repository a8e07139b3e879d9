//! # StandingsEngine
//!
//! Compares two projected final standings for a league (the ensemble model
//! against the baseline rating system).
//!
//! [`RankDivergenceLayout`] places every team on a two-column chart without
//! overlapping labels and classifies how the orderings disagree.
//! [`PortfolioSummarizer`] picks out the champion, the value and fade picks
//! and the relegation places. Both are pure functions of one league's
//! ranked teams.

pub mod config;
pub mod error;
pub mod layout;
pub mod summary;

#[cfg(test)]
mod tests;

pub use config::{LeagueConfig, RelegationPolicy};
pub use error::{Result, StandingsError};
pub use layout::{Classification, LayoutRow, RankDivergenceLayout};
pub use summary::{summarize_with_policy, Pick, PortfolioSummarizer, RelegationSet, Summary};

/// Re-export the feed types the engine operates on
pub use projection_feed::{RankOrdering, RankedProjection, TeamProjection};
