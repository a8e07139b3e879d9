use serde::{Deserialize, Serialize};
use std::fmt;

/// A single team's end-of-season projection within one league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProjection {
    /// Team name, unique within its league (e.g., "Arsenal")
    pub team: String,

    /// League display name (e.g., "(ENG) Premier League")
    pub group: String,

    /// Projected final points from the ensemble model
    pub projected_points_ensemble: f64,

    /// Projected final points from the baseline rating system
    pub projected_points_baseline: f64,

    /// 5th percentile of simulated final points
    pub lower_bound: i32,

    /// 95th percentile of simulated final points
    pub upper_bound: i32,

    /// Ensemble minus baseline points
    pub divergence: f64,
}

impl TeamProjection {
    /// Create a new projection, deriving the divergence from the two point totals
    pub fn new(
        team: impl Into<String>,
        group: impl Into<String>,
        projected_points_ensemble: f64,
        projected_points_baseline: f64,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Self {
        Self {
            team: team.into(),
            group: group.into(),
            projected_points_ensemble,
            projected_points_baseline,
            lower_bound,
            upper_bound,
            divergence: projected_points_ensemble - projected_points_baseline,
        }
    }

    /// Projected points under the given ordering
    pub fn points(&self, ordering: RankOrdering) -> f64 {
        match ordering {
            RankOrdering::Ensemble => self.projected_points_ensemble,
            RankOrdering::Baseline => self.projected_points_baseline,
        }
    }
}

/// The two competing rank orderings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankOrdering {
    /// Ordering by ensemble projected points
    Ensemble,
    /// Ordering by baseline projected points
    Baseline,
}

impl fmt::Display for RankOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankOrdering::Ensemble => write!(f, "ensemble"),
            RankOrdering::Baseline => write!(f, "baseline"),
        }
    }
}

/// A projection together with its rank under each ordering
///
/// Ranks are `None` until [`crate::ranking::rank_group`] has run over the
/// team's league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProjection {
    pub projection: TeamProjection,

    /// Rank by ensemble points (1 = best)
    pub rank_ensemble: Option<u32>,

    /// Rank by baseline points (1 = best)
    pub rank_baseline: Option<u32>,
}

impl RankedProjection {
    /// Wrap a projection with no ranks assigned
    pub fn unranked(projection: TeamProjection) -> Self {
        Self { projection, rank_ensemble: None, rank_baseline: None }
    }

    /// Wrap a projection with explicit ranks
    pub fn with_ranks(projection: TeamProjection, rank_ensemble: u32, rank_baseline: u32) -> Self {
        Self { projection, rank_ensemble: Some(rank_ensemble), rank_baseline: Some(rank_baseline) }
    }

    pub fn team(&self) -> &str {
        &self.projection.team
    }

    pub fn group(&self) -> &str {
        &self.projection.group
    }

    /// Rank under the given ordering, if computed
    pub fn rank(&self, ordering: RankOrdering) -> Option<u32> {
        match ordering {
            RankOrdering::Ensemble => self.rank_ensemble,
            RankOrdering::Baseline => self.rank_baseline,
        }
    }
}
