use crate::config::{LeagueConfig, RelegationPolicy};
use crate::error::{Result, StandingsError};
use crate::layout::{ensure_single_group, require_rank};
use projection_feed::{RankOrdering, RankedProjection};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A team singled out by the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pick {
    pub team: String,
    pub projected_points_ensemble: f64,
    pub divergence: f64,
}

impl From<&RankedProjection> for Pick {
    fn from(team: &RankedProjection) -> Self {
        Self {
            team: team.team().to_string(),
            projected_points_ensemble: team.projection.projected_points_ensemble,
            divergence: team.projection.divergence,
        }
    }
}

/// Teams projected to go down, worst first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelegationSet {
    pub policy: RelegationPolicy,
    pub auto: Vec<String>,
    pub playoff: Option<String>,
}

impl fmt::Display for RelegationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auto = self.auto.join(", ");
        match &self.playoff {
            Some(playoff) => write!(f, "{auto} (Auto) / {playoff} (Playoff)"),
            None => write!(f, "{auto}"),
        }
    }
}

/// Headline facts for one league
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub group: String,

    /// Best ensemble rank
    pub champion: Pick,

    /// Largest positive divergence (most underrated by the baseline)
    pub value_pick: Pick,

    /// Largest negative divergence (most overrated by the baseline)
    pub fade_pick: Pick,

    pub relegation: RelegationSet,
}

/// Derives the headline facts for a league using the configured relegation rules
pub struct PortfolioSummarizer<'a> {
    config: &'a LeagueConfig,
}

impl<'a> PortfolioSummarizer<'a> {
    pub fn new(config: &'a LeagueConfig) -> Self {
        Self { config }
    }

    /// Summarize the teams of a single league
    pub fn summarize(&self, teams: &[RankedProjection]) -> Result<Summary> {
        let group = ensure_single_group(teams)?;
        summarize_with_policy(teams, self.config.policy_for(group))
    }
}

/// Summarize a league with an explicit relegation policy
///
/// Tie-breaks: the champion is the best ensemble rank, then the most ensemble
/// points, then the alphabetically first team. Value and fade ties go to the
/// alphabetically first team.
pub fn summarize_with_policy(
    teams: &[RankedProjection],
    policy: RelegationPolicy,
) -> Result<Summary> {
    let group = ensure_single_group(teams)?;

    let mut contenders = Vec::with_capacity(teams.len());
    for team in teams {
        contenders.push((team, require_rank(team, RankOrdering::Ensemble)?));
    }

    let (champion, _) = contenders
        .iter()
        .min_by(|(a, rank_a), (b, rank_b)| {
            rank_a
                .cmp(rank_b)
                .then_with(|| {
                    b.projection
                        .projected_points_ensemble
                        .total_cmp(&a.projection.projected_points_ensemble)
                })
                .then_with(|| a.team().cmp(b.team()))
        })
        .copied()
        .ok_or(StandingsError::EmptyGroup)?;

    let value_pick = teams
        .iter()
        .min_by(|a, b| {
            b.projection
                .divergence
                .total_cmp(&a.projection.divergence)
                .then_with(|| a.team().cmp(b.team()))
        })
        .ok_or(StandingsError::EmptyGroup)?;

    let fade_pick = teams
        .iter()
        .min_by(|a, b| {
            a.projection
                .divergence
                .total_cmp(&b.projection.divergence)
                .then_with(|| a.team().cmp(b.team()))
        })
        .ok_or(StandingsError::EmptyGroup)?;

    let relegation = relegation(group, teams, policy)?;

    debug!(
        "{}: champion {}, value {}, fade {}, relegation {}",
        group,
        champion.team(),
        value_pick.team(),
        fade_pick.team(),
        relegation
    );

    Ok(Summary {
        group: group.to_string(),
        champion: champion.into(),
        value_pick: value_pick.into(),
        fade_pick: fade_pick.into(),
        relegation,
    })
}

/// Bottom of the table by ensemble points; equal points keep input order
fn relegation(
    group: &str,
    teams: &[RankedProjection],
    policy: RelegationPolicy,
) -> Result<RelegationSet> {
    let required = policy.required_teams();
    if teams.len() < required {
        return Err(StandingsError::InsufficientTeams {
            group: group.to_string(),
            required,
            available: teams.len(),
        });
    }

    let mut bottom: Vec<&RankedProjection> = teams.iter().collect();
    bottom.sort_by(|a, b| {
        a.projection.projected_points_ensemble.total_cmp(&b.projection.projected_points_ensemble)
    });

    let names = |slice: &[&RankedProjection]| -> Vec<String> {
        slice.iter().map(|t| t.team().to_string()).collect()
    };

    let set = match policy {
        RelegationPolicy::Auto { auto } => {
            RelegationSet { policy, auto: names(&bottom[..auto]), playoff: None }
        }
        RelegationPolicy::AutoWithPlayoff { auto } => RelegationSet {
            policy,
            auto: names(&bottom[..auto]),
            playoff: Some(bottom[auto].team().to_string()),
        },
    };

    Ok(set)
}
