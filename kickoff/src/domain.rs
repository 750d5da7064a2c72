//! Core domain types: teams, finished matches, fixtures, probability estimates and confidence tiers.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

/// Season aggregates for a single team. Maintained by an external aggregation job; read-only here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team: String,
    pub goals_scored: f64,
    pub goals_conceded: f64,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub last_refresh: DateTime<Utc>,
}
impl TeamStatistics {
    pub fn played(&self) -> u32 {
        self.wins + self.draws + self.losses
    }
}

/// A finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub home: String,
    pub away: String,
    pub date: DateTime<Utc>,
    pub home_goals: u8,
    pub away_goals: u8,
}
impl MatchResult {
    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    pub fn is_between(&self, team_a: &str, team_b: &str) -> bool {
        self.home == team_a && self.away == team_b || self.home == team_b && self.away == team_a
    }

    /// The side `team` played on, if it played at all.
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home == team {
            Some(Side::Home)
        } else if self.away == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Goals (for, against) from the perspective of the given side.
    pub fn goals_for_side(&self, side: Side) -> (u8, u8) {
        match side {
            Side::Home => (self.home_goals, self.away_goals),
            Side::Away => (self.away_goals, self.home_goals),
        }
    }

    pub fn total_goals(&self) -> u16 {
        self.home_goals as u16 + self.away_goals as u16
    }
}

/// A scheduled pairing of two teams.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Fixture {
    pub home: String,
    pub away: String,
}
impl Fixture {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }
}

impl Display for Fixture {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v {}", self.home, self.away)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid fixture '{0}', expected 'Home v Away'")]
pub struct FixtureParseError(String);

impl FromStr for Fixture {
    type Err = FixtureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (home, away) = s
            .split_once(" v ")
            .or_else(|| s.split_once(" vs "))
            .ok_or_else(|| FixtureParseError(s.into()))?;
        let (home, away) = (home.trim(), away.trim());
        if home.is_empty() || away.is_empty() || home == away {
            return Err(FixtureParseError(s.into()));
        }
        Ok(Self::new(home, away))
    }
}

/// Reliability tiers, ordered from least to most reliable.
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize,
)]
pub enum Confidence {
    Low,
    Medium,
    High,
    #[strum(serialize = "Very High")]
    VeryHigh,
}

/// Probabilities over the result space (home win, draw, away win), alongside the independent
/// probability of more than 2.5 total goals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    pub over_2_5: f64,
}
impl MatchProbabilities {
    pub const DEFAULT: MatchProbabilities = MatchProbabilities {
        home_win: 0.40,
        draw: 0.30,
        away_win: 0.30,
        over_2_5: 0.50,
    };

    pub fn result_space(&self) -> [f64; 3] {
        [self.home_win, self.draw, self.away_win]
    }

    pub fn with_result_space(self, [home_win, draw, away_win]: [f64; 3]) -> Self {
        Self {
            home_win,
            draw,
            away_win,
            ..self
        }
    }

    pub fn under_2_5(&self) -> f64 {
        1.0 - self.over_2_5
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Strengths {
    pub home: f64,
    pub away: f64,
}

/// The output of a single predictor for a single fixture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchProbabilityEstimate {
    pub probs: MatchProbabilities,
    pub expected_goals: Option<f64>,
    pub strengths: Option<Strengths>,
    pub confidence: Confidence,
}
impl MatchProbabilityEstimate {
    pub const DEFAULT_EXPECTED_GOALS: f64 = 2.5;

    /// The estimate used when there is insufficient data to say anything better.
    pub fn fallback() -> Self {
        Self {
            probs: MatchProbabilities::DEFAULT,
            expected_goals: Some(Self::DEFAULT_EXPECTED_GOALS),
            strengths: None,
            confidence: Confidence::Low,
        }
    }
}
