//! Sources of team statistics and match history.
//!
//! The engine only ever reads through [StatisticsProvider] and [MatchHistory]; [Archive] is an
//! in-memory implementation of both, suitable for fixtures, tests and offline analysis.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::domain::{MatchResult, TeamStatistics};

pub trait StatisticsProvider {
    fn lookup(&self, team: &str) -> Option<TeamStatistics>;
}

pub trait MatchHistory {
    /// Up to `n` finished matches involving `team`, most recent first.
    fn recent(&self, team: &str, n: usize) -> Vec<MatchResult>;

    /// Up to `n` finished matches between `team_a` and `team_b` in either venue assignment, most
    /// recent first.
    fn head_to_head(&self, team_a: &str, team_b: &str, n: usize) -> Vec<MatchResult>;
}

#[derive(Debug, Default)]
pub struct Archive {
    stats: FxHashMap<String, TeamStatistics>,
    results: Vec<MatchResult>,
}
impl Archive {
    /// Creates an archive over the given `results` and explicitly supplied `stats`. Teams that
    /// appear in the results but lack explicit statistics have them aggregated from the results.
    pub fn new(stats: Vec<TeamStatistics>, mut results: Vec<MatchResult>) -> Self {
        results.sort_by_key(|result| Reverse(result.date));
        let mut stats: FxHashMap<_, _> = stats.into_iter().map(|stats| (stats.team.clone(), stats)).collect();
        let refreshed = Utc::now();
        let mut aggregated = 0;
        for result in &results {
            for team in [&result.home, &result.away] {
                if !stats.contains_key(team) {
                    stats.insert(team.clone(), aggregate(team, &results, refreshed));
                    aggregated += 1;
                }
            }
        }
        debug!(
            "archive of {} results, {} teams ({aggregated} aggregated)",
            results.len(),
            stats.len()
        );
        Self { stats, results }
    }

    pub fn from_results(results: Vec<MatchResult>) -> Self {
        Self::new(vec![], results)
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.stats.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl StatisticsProvider for Archive {
    fn lookup(&self, team: &str) -> Option<TeamStatistics> {
        self.stats.get(team).cloned()
    }
}

impl MatchHistory for Archive {
    fn recent(&self, team: &str, n: usize) -> Vec<MatchResult> {
        self.results
            .iter()
            .filter(|result| result.involves(team))
            .take(n)
            .cloned()
            .collect()
    }

    fn head_to_head(&self, team_a: &str, team_b: &str, n: usize) -> Vec<MatchResult> {
        self.results
            .iter()
            .filter(|result| result.is_between(team_a, team_b))
            .take(n)
            .cloned()
            .collect()
    }
}

/// Derives season aggregates for `team` from all of its `results`: per-match averages of goals
/// scored and conceded, alongside the win/draw/loss counts.
pub fn aggregate(team: &str, results: &[MatchResult], refreshed: DateTime<Utc>) -> TeamStatistics {
    let mut stats = TeamStatistics {
        team: team.into(),
        goals_scored: 0.0,
        goals_conceded: 0.0,
        wins: 0,
        draws: 0,
        losses: 0,
        last_refresh: refreshed,
    };
    let (mut scored, mut conceded) = (0u32, 0u32);
    for result in results {
        let Some(side) = result.side_of(team) else {
            continue;
        };
        let (goals_for, goals_against) = result.goals_for_side(side);
        scored += goals_for as u32;
        conceded += goals_against as u32;
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => stats.wins += 1,
            std::cmp::Ordering::Equal => stats.draws += 1,
            std::cmp::Ordering::Less => stats.losses += 1,
        }
    }
    let played = stats.played();
    if played > 0 {
        stats.goals_scored = scored as f64 / played as f64;
        stats.goals_conceded = conceded as f64 / played as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;

    use super::*;
    use crate::testing::{result, stats};

    #[test]
    fn recent_is_most_recent_first_and_limited() {
        let archive = Archive::from_results(vec![
            result("A", "C", 2, 2, 9),
            result("A", "B", 1, 2, 1),
            result("B", "C", 5, 0, 0),
            result("C", "A", 3, 1, 4),
        ]);
        let recent = archive.recent("A", 2);
        assert_eq!(2, recent.len());
        assert_eq!(("A", "B"), (recent[0].home.as_str(), recent[0].away.as_str()));
        assert_eq!(("C", "A"), (recent[1].home.as_str(), recent[1].away.as_str()));
        assert_eq!(3, archive.recent("A", 10).len());
        assert!(archive.recent("Z", 5).is_empty());
    }

    #[test]
    fn head_to_head_ignores_venue() {
        let archive = Archive::from_results(vec![
            result("A", "B", 1, 2, 5),
            result("B", "A", 2, 1, 2),
            result("A", "C", 3, 0, 1),
        ]);
        let h2h = archive.head_to_head("A", "B", 5);
        assert_eq!(2, h2h.len());
        assert_eq!("B", h2h[0].home);
        assert_eq!(archive.head_to_head("B", "A", 5), h2h);
        assert_eq!(1, archive.head_to_head("A", "B", 1).len());
        assert!(archive.head_to_head("B", "C", 5).is_empty());
    }

    #[test]
    fn explicit_stats_take_precedence() {
        let archive = Archive::new(vec![stats("A", 2.0, 1.0, 10, 2, 3)], vec![result("A", "B", 1, 0, 3)]);
        assert_eq!(10, archive.lookup("A").unwrap().wins);
        let b = archive.lookup("B").unwrap();
        assert_eq!((0, 0, 1), (b.wins, b.draws, b.losses));
        assert_float_absolute_eq!(1.0, b.goals_conceded);
        assert_float_absolute_eq!(0.0, b.goals_scored);
        assert!(archive.lookup("C").is_none());
        assert_eq!(2, archive.teams().count());
        assert_eq!(1, archive.len());
    }

    #[test]
    fn aggregate_averages_per_match() {
        let results = vec![
            result("A", "B", 2, 0, 4),
            result("C", "A", 1, 1, 3),
            result("A", "C", 3, 1, 2),
            result("B", "C", 4, 1, 1),
        ];
        let stats = aggregate("A", &results, Utc::now());
        assert_eq!((2, 1, 0), (stats.wins, stats.draws, stats.losses));
        assert_float_absolute_eq!(6.0 / 3.0, stats.goals_scored);
        assert_float_absolute_eq!(2.0 / 3.0, stats.goals_conceded);

        let none = aggregate("Z", &results, Utc::now());
        assert_eq!(0, none.played());
        assert_eq!(0.0, none.goals_scored);
    }
}
