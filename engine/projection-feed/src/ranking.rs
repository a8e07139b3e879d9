use crate::types::{RankOrdering, RankedProjection, TeamProjection};
use serde::{Deserialize, Serialize};

/// How tied values consume rank numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMethod {
    /// Ties share the lowest rank and the next value follows on (1, 2, 2, 3)
    #[default]
    Dense,
    /// Ties share the lowest rank and the next value skips ahead (1, 2, 2, 4)
    Min,
}

/// Rank values in descending order (highest value gets rank 1)
///
/// The returned vector is parallel to `values`. Values must be finite; the
/// feed loader drops rows that are not.
pub fn rank_descending(values: &[f64], method: RankMethod) -> Vec<u32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0u32; values.len()];
    let mut previous: Option<f64> = None;
    let mut distinct = 0u32;
    let mut current = 0u32;

    for (position, &index) in order.iter().enumerate() {
        let value = values[index];
        if previous != Some(value) {
            distinct += 1;
            current = match method {
                RankMethod::Min => position as u32 + 1,
                RankMethod::Dense => distinct,
            };
            previous = Some(value);
        }
        ranks[index] = current;
    }

    ranks
}

/// Assign both rank orderings to the teams of a single league
///
/// Output order matches input order.
pub fn rank_group(teams: Vec<TeamProjection>, method: RankMethod) -> Vec<RankedProjection> {
    let ensemble = ranks_for(&teams, RankOrdering::Ensemble, method);
    let baseline = ranks_for(&teams, RankOrdering::Baseline, method);

    teams
        .into_iter()
        .zip(ensemble.into_iter().zip(baseline))
        .map(|(projection, (rank_ensemble, rank_baseline))| {
            RankedProjection::with_ranks(projection, rank_ensemble, rank_baseline)
        })
        .collect()
}

fn ranks_for(teams: &[TeamProjection], ordering: RankOrdering, method: RankMethod) -> Vec<u32> {
    let points: Vec<f64> = teams.iter().map(|t| t.points(ordering)).collect();
    rank_descending(&points, method)
}
