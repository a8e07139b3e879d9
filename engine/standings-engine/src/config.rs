//! League configuration: display names, ordering and relegation policies

use projection_feed::{FeedOptions, RankMethod};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How many teams go down at the bottom of a league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelegationPolicy {
    /// Bottom `auto` teams go down directly
    Auto { auto: usize },
    /// Bottom `auto` teams go down directly, the next one enters a playoff
    AutoWithPlayoff { auto: usize },
}

impl RelegationPolicy {
    /// Three direct relegation places
    pub const THREE_AUTO: Self = RelegationPolicy::Auto { auto: 3 };

    /// Two direct places and one relegation playoff
    pub const TWO_AUTO_ONE_PLAYOFF: Self = RelegationPolicy::AutoWithPlayoff { auto: 2 };

    /// Number of teams this policy names
    pub fn required_teams(&self) -> usize {
        match self {
            RelegationPolicy::Auto { auto } => *auto,
            RelegationPolicy::AutoWithPlayoff { auto } => auto + 1,
        }
    }
}

/// League-level configuration supplied alongside the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    /// Raw feed identifier to display name
    pub aliases: BTreeMap<String, String>,

    /// Canonical order of leagues in the selector (display names)
    pub display_order: Vec<String>,

    /// Leagues (display names) that relegate two teams and send one to a playoff
    pub playoff_relegation: BTreeSet<String>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        let aliases = [
            ("ENG-Premier League", "(ENG) Premier League"),
            ("ESP-La Liga", "(ESP) La Liga"),
            ("GER-Bundesliga", "(GER) Bundesliga"),
            ("FRA-Ligue 1", "(FRA) Ligue 1"),
            ("ITA-Serie A", "(ITA) Serie A"),
        ]
        .into_iter()
        .map(|(raw, display)| (raw.to_string(), display.to_string()))
        .collect::<BTreeMap<_, _>>();

        let display_order = [
            "(ENG) Premier League",
            "(ESP) La Liga",
            "(GER) Bundesliga",
            "(FRA) Ligue 1",
            "(ITA) Serie A",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        let playoff_relegation =
            ["(GER) Bundesliga", "(FRA) Ligue 1"].into_iter().map(str::to_string).collect();

        Self { aliases, display_order, playoff_relegation }
    }
}

impl LeagueConfig {
    /// Feed loading options carrying this config's league aliases
    pub fn feed_options(&self, rank_method: RankMethod) -> FeedOptions {
        FeedOptions { aliases: self.aliases.clone(), rank_method }
    }

    /// Relegation policy for a league display name
    pub fn policy_for(&self, group: &str) -> RelegationPolicy {
        if self.playoff_relegation.contains(group) {
            RelegationPolicy::TWO_AUTO_ONE_PLAYOFF
        } else {
            RelegationPolicy::THREE_AUTO
        }
    }

    /// Leagues to offer, in display order
    ///
    /// Configured leagues come first in their configured order, limited to
    /// those present; anything else in the feed follows alphabetically.
    pub fn available<'a, I>(&self, present: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: BTreeSet<&str> = present.into_iter().collect();

        let mut ordered: Vec<String> = self
            .display_order
            .iter()
            .filter(|name| present.contains(name.as_str()))
            .cloned()
            .collect();

        ordered.extend(
            present
                .into_iter()
                .filter(|name| !self.display_order.iter().any(|known| known.as_str() == *name))
                .map(str::to_string),
        );

        ordered
    }
}
