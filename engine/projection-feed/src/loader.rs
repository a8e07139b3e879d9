use crate::cache::fingerprint;
use crate::error::{FeedError, Result};
use crate::ranking::{rank_group, RankMethod};
use crate::types::{RankedProjection, TeamProjection};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Columns the upstream pipeline must provide
const REQUIRED_COLUMNS: &[&str] =
    &["league", "team", "ensemble_projected", "projected_pts", "p5", "p95"];

/// The feed stores divergence rounded to one decimal
const DIVERGENCE_ROUNDING_SLACK: f64 = 0.05;

/// Options applied while turning raw feed rows into ranked projections
#[derive(Debug, Clone, Default)]
pub struct FeedOptions {
    /// Raw league identifier to display name (e.g., "GER-Bundesliga" -> "(GER) Bundesliga")
    pub aliases: BTreeMap<String, String>,

    /// Tie handling for both rank orderings
    pub rank_method: RankMethod,
}

impl FeedOptions {
    /// Display name for a raw league identifier; unknown identifiers pass through
    pub fn normalize_league(&self, raw: &str) -> String {
        self.aliases.get(raw).cloned().unwrap_or_else(|| raw.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    league: String,
    team: String,
    ensemble_projected: f64,
    projected_pts: f64,
    p5: f64,
    p95: f64,
    #[serde(default)]
    diff_vs_elo: Option<f64>,
}

/// The loaded feed, grouped by league with both orderings ranked
#[derive(Debug, Clone)]
pub struct ProjectionFeed {
    fingerprint: String,
    leagues: BTreeMap<String, Vec<RankedProjection>>,
}

impl ProjectionFeed {
    /// Content fingerprint of the bytes this feed was parsed from
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// League display names present in the feed
    pub fn leagues(&self) -> impl Iterator<Item = &str> {
        self.leagues.keys().map(String::as_str)
    }

    /// Ranked teams of one league, in feed order
    pub fn league(&self, name: &str) -> Result<&[RankedProjection]> {
        self.leagues
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| FeedError::UnknownLeague(name.to_string()))
    }

    /// Total number of team records across all leagues
    pub fn record_count(&self) -> usize {
        self.leagues.values().map(Vec::len).sum()
    }
}

/// Read the feed from disk and parse it
pub async fn load_feed<P: AsRef<Path>>(path: P, options: &FeedOptions) -> Result<ProjectionFeed> {
    let path = path.as_ref();
    info!("Loading projection feed from: {:?}", path);

    let bytes = read_feed_bytes(path).await?;
    let feed = parse_feed(&bytes, options)?;

    info!(
        "Loaded {} team projections across {} leagues (fingerprint {})",
        feed.record_count(),
        feed.leagues.len(),
        &feed.fingerprint[..12]
    );
    Ok(feed)
}

pub(crate) async fn read_feed_bytes(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(FeedError::Missing { path: path.to_path_buf() })
        }
        Err(source) => Err(FeedError::Io { path: path.to_path_buf(), source }),
    }
}

/// Parse feed bytes into a ranked, league-grouped feed
///
/// Malformed or inconsistent rows are skipped with a warning. The call fails
/// only when a required column is absent or no valid row remains.
pub fn parse_feed(bytes: &[u8], options: &FeedOptions) -> Result<ProjectionFeed> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(FeedError::MissingColumn(column.to_string()));
        }
    }

    let mut grouped: BTreeMap<String, Vec<TeamProjection>> = BTreeMap::new();
    let mut skipped = 0usize;

    for result in reader.deserialize::<RawRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed feed row: {}", e);
                skipped += 1;
                continue;
            }
        };

        let Some(projection) = validate_row(raw, options) else {
            skipped += 1;
            continue;
        };

        let teams = grouped.entry(projection.group.clone()).or_default();
        if let Some(existing) = teams.iter_mut().find(|t| t.team == projection.team) {
            warn!(
                "duplicate entry for '{}' in {}, using latest row",
                projection.team, projection.group
            );
            *existing = projection;
        } else {
            teams.push(projection);
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid feed rows", skipped);
    }

    if grouped.is_empty() {
        return Err(FeedError::Empty);
    }

    let leagues = grouped
        .into_iter()
        .map(|(league, teams)| (league, rank_group(teams, options.rank_method)))
        .collect();

    Ok(ProjectionFeed { fingerprint: fingerprint(bytes), leagues })
}

fn validate_row(raw: RawRow, options: &FeedOptions) -> Option<TeamProjection> {
    let team = raw.team.trim();
    let league = raw.league.trim();
    if team.is_empty() || league.is_empty() {
        warn!("skipping row with empty team or league");
        return None;
    }

    let numbers = [raw.ensemble_projected, raw.projected_pts, raw.p5, raw.p95];
    if !numbers.iter().all(|v| v.is_finite()) {
        warn!("skipping '{}': non-finite projection value", team);
        return None;
    }

    let lower_bound = raw.p5.trunc() as i32;
    let upper_bound = raw.p95.trunc() as i32;
    if lower_bound > upper_bound {
        warn!("skipping '{}': interval [{}-{}] is inverted", team, lower_bound, upper_bound);
        return None;
    }

    let projection = TeamProjection::new(
        team,
        options.normalize_league(league),
        raw.ensemble_projected,
        raw.projected_pts,
        lower_bound,
        upper_bound,
    );

    if let Some(stored) = raw.diff_vs_elo {
        if !divergence_matches(stored, projection.divergence) {
            warn!(
                "'{}': stored divergence {:.2} disagrees with computed {:.2}, using computed",
                team, stored, projection.divergence
            );
        }
    }

    Some(projection)
}

fn divergence_matches(stored: f64, computed: f64) -> bool {
    let tolerance = DIVERGENCE_ROUNDING_SLACK + 1e-6 * computed.abs().max(1.0);
    stored.is_finite() && (stored - computed).abs() <= tolerance
}
