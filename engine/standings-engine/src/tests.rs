//! Property tests for the layout and summary

use crate::{
    summarize_with_policy, Classification, LeagueConfig, PortfolioSummarizer,
    RankDivergenceLayout, RankedProjection, RelegationPolicy, TeamProjection,
};
use projection_feed::{rank_group, RankMethod};
use proptest::prelude::*;

/// Points drawn from a small range so ties are common
fn league_strategy() -> impl Strategy<Value = Vec<RankedProjection>> {
    (prop::collection::vec((0u8..12, 0u8..12), 1..30), prop::bool::ANY).prop_map(
        |(points, dense)| {
            let teams = points
                .into_iter()
                .enumerate()
                .map(|(i, (ensemble, baseline))| {
                    TeamProjection::new(
                        format!("Team{i:02}"),
                        "(ESP) La Liga",
                        f64::from(ensemble) * 5.0,
                        f64::from(baseline) * 5.0,
                        0,
                        100,
                    )
                })
                .collect();
            let method = if dense { RankMethod::Dense } else { RankMethod::Min };
            rank_group(teams, method)
        },
    )
}

proptest! {
    #[test]
    fn prop_visual_positions_are_contiguous(teams in league_strategy()) {
        let rows = RankDivergenceLayout::layout(&teams).unwrap();
        let positions: Vec<u32> = rows.iter().map(|r| r.visual_position).collect();
        let expected: Vec<u32> = (1..=teams.len() as u32).collect();
        prop_assert_eq!(positions, expected);
    }

    #[test]
    fn prop_rows_follow_ensemble_rank(teams in league_strategy()) {
        let rows = RankDivergenceLayout::layout(&teams).unwrap();
        for pair in rows.windows(2) {
            prop_assert!(pair[0].rank_ensemble <= pair[1].rank_ensemble);
        }
        for row in &rows {
            prop_assert!(row.rank_ensemble >= 1);
            prop_assert!(row.rank_baseline >= 1);
        }
    }

    #[test]
    fn prop_classification_matches_ranks(teams in league_strategy()) {
        for row in RankDivergenceLayout::layout(&teams).unwrap() {
            let expected = if row.rank_ensemble < row.rank_baseline {
                Classification::Favored
            } else if row.rank_ensemble > row.rank_baseline {
                Classification::Disfavored
            } else {
                Classification::Neutral
            };
            prop_assert_eq!(row.classification, expected);
        }
    }

    #[test]
    fn prop_layout_is_idempotent(teams in league_strategy()) {
        let first = RankDivergenceLayout::layout(&teams).unwrap();
        let second = RankDivergenceLayout::layout(&teams).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_every_team_laid_out_once(teams in league_strategy()) {
        let rows = RankDivergenceLayout::layout(&teams).unwrap();
        let mut laid_out: Vec<&str> = rows.iter().map(|r| r.team.as_str()).collect();
        let mut input: Vec<&str> = teams.iter().map(|t| t.team()).collect();
        laid_out.sort_unstable();
        input.sort_unstable();
        prop_assert_eq!(laid_out, input);
    }

    #[test]
    fn prop_summary_extremes(teams in league_strategy()) {
        prop_assume!(teams.len() >= 3);
        let summary = summarize_with_policy(&teams, RelegationPolicy::THREE_AUTO).unwrap();

        let best_rank = teams.iter().filter_map(|t| t.rank_ensemble).min().unwrap();
        let champion = teams.iter().find(|t| t.team() == summary.champion.team).unwrap();
        prop_assert_eq!(champion.rank_ensemble, Some(best_rank));

        for team in &teams {
            prop_assert!(team.projection.divergence <= summary.value_pick.divergence);
            prop_assert!(team.projection.divergence >= summary.fade_pick.divergence);
        }

        let worst = teams
            .iter()
            .map(|t| t.projection.projected_points_ensemble)
            .fold(f64::INFINITY, f64::min);
        let relegated = teams.iter().find(|t| t.team() == summary.relegation.auto[0]).unwrap();
        prop_assert_eq!(relegated.projection.projected_points_ensemble, worst);
    }
}

#[test]
fn test_layout_and_summary_agree_on_league() {
    let teams = rank_group(
        vec![
            TeamProjection::new("Bayern", "(GER) Bundesliga", 78.0, 77.0, 70, 86),
            TeamProjection::new("Leverkusen", "(GER) Bundesliga", 70.5, 71.5, 61, 79),
            TeamProjection::new("Bochum", "(GER) Bundesliga", 24.0, 29.0, 18, 31),
            TeamProjection::new("Kiel", "(GER) Bundesliga", 26.5, 24.0, 20, 33),
            TeamProjection::new("Heidenheim", "(GER) Bundesliga", 30.0, 31.0, 24, 37),
        ],
        RankMethod::Min,
    );

    let config = LeagueConfig::default();
    let summary = PortfolioSummarizer::new(&config).summarize(&teams).unwrap();
    let rows = RankDivergenceLayout::layout(&teams).unwrap();

    assert_eq!(summary.champion.team, rows[0].team);
    assert_eq!(summary.relegation.auto, vec!["Bochum", "Kiel"]);
    assert_eq!(summary.relegation.playoff.as_deref(), Some("Heidenheim"));
    assert_eq!(rows.last().map(|r| r.team.as_str()), Some("Bochum"));
}
