//! Projection Feed - Per-team league projections for the dashboard
//!
//! This crate loads the finalized projection table produced by the upstream
//! model pipeline, validates each row, groups teams by league and assigns the
//! two competing rank orderings (ensemble and baseline).

pub mod cache;
pub mod error;
pub mod loader;
pub mod ranking;
pub mod types;

pub use cache::FeedCache;
pub use error::{FeedError, Result};
pub use loader::{load_feed, parse_feed, FeedOptions, ProjectionFeed};
pub use ranking::{rank_descending, rank_group, RankMethod};
pub use types::{RankOrdering, RankedProjection, TeamProjection};

/// Default file name of the projection feed
pub const DEFAULT_FEED_PATH: &str = "Final_App_Data.csv";
