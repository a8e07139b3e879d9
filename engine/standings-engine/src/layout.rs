use crate::error::{Result, StandingsError};
use projection_feed::{RankOrdering, RankedProjection};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// How the ensemble ranking disagrees with the baseline for one team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Ensemble ranks the team better than the baseline does
    Favored,
    /// Ensemble ranks the team worse than the baseline does
    Disfavored,
    /// Both orderings agree
    Neutral,
}

impl Classification {
    /// Classify a pair of ranks (lower is better)
    pub fn from_ranks(rank_ensemble: u32, rank_baseline: u32) -> Self {
        match rank_ensemble.cmp(&rank_baseline) {
            Ordering::Less => Classification::Favored,
            Ordering::Greater => Classification::Disfavored,
            Ordering::Equal => Classification::Neutral,
        }
    }
}

/// One team's placement in the two-column divergence chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRow {
    pub team: String,

    /// Left anchor: the team's baseline rank
    pub rank_baseline: u32,

    /// Right anchor: contiguous 1..N slot, never shared with another team
    pub visual_position: u32,

    /// Ensemble rank shown in the label; may repeat or skip on ties
    pub rank_ensemble: u32,

    pub projected_points_ensemble: f64,
    pub lower_bound: i32,
    pub upper_bound: i32,
    pub classification: Classification,
}

impl LayoutRow {
    /// Right-hand label, e.g. "Arsenal 1 | 81.4 pts [72-90]"
    pub fn label(&self) -> String {
        format!(
            "{} {} | {:.1} pts [{}-{}]",
            self.team,
            self.rank_ensemble,
            self.projected_points_ensemble,
            self.lower_bound,
            self.upper_bound
        )
    }

    /// Left-hand label, e.g. "2 Arsenal"
    pub fn baseline_label(&self) -> String {
        format!("{} {}", self.rank_baseline, self.team)
    }
}

/// Computes the non-overlapping chart layout for one league
///
/// Teams are placed on the right-hand column by their position in ensemble
/// rank order rather than by the rank itself, so tied ranks never collide.
pub struct RankDivergenceLayout;

impl RankDivergenceLayout {
    /// Lay out the teams of a single league
    ///
    /// Ties on ensemble rank keep their input order.
    pub fn layout(teams: &[RankedProjection]) -> Result<Vec<LayoutRow>> {
        let group = ensure_single_group(teams)?;

        let mut ranked = Vec::with_capacity(teams.len());
        for team in teams {
            let rank_ensemble = require_rank(team, RankOrdering::Ensemble)?;
            let rank_baseline = require_rank(team, RankOrdering::Baseline)?;
            ranked.push((team, rank_ensemble, rank_baseline));
        }

        ranked.sort_by_key(|(_, rank_ensemble, _)| *rank_ensemble);

        let rows: Vec<LayoutRow> = ranked
            .into_iter()
            .enumerate()
            .map(|(index, (team, rank_ensemble, rank_baseline))| LayoutRow {
                team: team.team().to_string(),
                rank_baseline,
                visual_position: index as u32 + 1,
                rank_ensemble,
                projected_points_ensemble: team.projection.projected_points_ensemble,
                lower_bound: team.projection.lower_bound,
                upper_bound: team.projection.upper_bound,
                classification: Classification::from_ranks(rank_ensemble, rank_baseline),
            })
            .collect();

        debug!("Laid out {} teams for {}", rows.len(), group);
        Ok(rows)
    }
}

/// Check that `teams` is non-empty and from one league, returning that league
pub(crate) fn ensure_single_group(teams: &[RankedProjection]) -> Result<&str> {
    let first = teams.first().ok_or(StandingsError::EmptyGroup)?;
    let group = first.group();

    if let Some(stray) = teams.iter().find(|t| t.group() != group) {
        return Err(StandingsError::MixedGroups {
            expected: group.to_string(),
            found: stray.group().to_string(),
        });
    }

    Ok(group)
}

pub(crate) fn require_rank(team: &RankedProjection, ordering: RankOrdering) -> Result<u32> {
    team.rank(ordering)
        .ok_or_else(|| StandingsError::MissingRank { team: team.team().to_string(), ordering })
}
