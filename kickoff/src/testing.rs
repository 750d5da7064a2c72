//! Fixtures shared by the unit tests.

use anyhow::anyhow;
use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{
    Confidence, Fixture, MatchProbabilities, MatchProbabilityEstimate, MatchResult, TeamStatistics,
};
use crate::predictor::Predictor;

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 15, 0, 0).unwrap()
}

/// A finished match played `days_ago` days before [epoch].
pub fn result(home: &str, away: &str, home_goals: u8, away_goals: u8, days_ago: i64) -> MatchResult {
    MatchResult {
        home: home.into(),
        away: away.into(),
        date: epoch() - Duration::days(days_ago),
        home_goals,
        away_goals,
    }
}

pub fn stats(
    team: &str,
    goals_scored: f64,
    goals_conceded: f64,
    wins: u32,
    draws: u32,
    losses: u32,
) -> TeamStatistics {
    TeamStatistics {
        team: team.into(),
        goals_scored,
        goals_conceded,
        wins,
        draws,
        losses,
        last_refresh: epoch(),
    }
}

pub fn probs(home_win: f64, draw: f64, away_win: f64, over_2_5: f64) -> MatchProbabilities {
    MatchProbabilities {
        home_win,
        draw,
        away_win,
        over_2_5,
    }
}

pub fn estimate(probs: MatchProbabilities, confidence: Confidence) -> MatchProbabilityEstimate {
    MatchProbabilityEstimate {
        probs,
        expected_goals: None,
        strengths: None,
        confidence,
    }
}

/// Always returns the same estimate.
pub struct FixedPredictor(pub MatchProbabilityEstimate);

impl Predictor for FixedPredictor {
    fn predict(&self, _fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>> {
        Ok(Some(self.0.clone()))
    }
}

/// Always declines to predict.
pub struct SilentPredictor;

impl Predictor for SilentPredictor {
    fn predict(&self, _fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>> {
        Ok(None)
    }
}

/// Always fails with the given message.
pub struct FailingPredictor(pub &'static str);

impl Predictor for FailingPredictor {
    fn predict(&self, _fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>> {
        Err(anyhow!(self.0))
    }
}
