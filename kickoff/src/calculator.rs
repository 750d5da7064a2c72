//! The statistical predictor: maps team strengths, form and head-to-head history to outcome
//! probabilities, expected goals and an over/under 2.5 probability.

use tracing::debug;

use crate::config::{EngineConfig, GoalsConfig, OutcomeTable};
use crate::confidence;
use crate::domain::{Fixture, MatchProbabilities, MatchProbabilityEstimate, Strengths, TeamStatistics};
use crate::form::{Analyzer, HeadToHead, TeamForm};
use crate::predictor::Predictor;
use crate::probs::{clamp, round_to};
use crate::provider::{MatchHistory, StatisticsProvider};
use crate::strength::strength;

const PROB_DECIMALS: u32 = 3;
const GOALS_DECIMALS: u32 = 2;
const STRENGTH_DECIMALS: u32 = 1;

/// Everything the calculator reads for a fixture.
#[derive(Clone, Debug)]
pub struct Inputs {
    pub home_stats: Option<TeamStatistics>,
    pub away_stats: Option<TeamStatistics>,
    pub home_form: TeamForm,
    pub away_form: TeamForm,
    pub head_to_head: HeadToHead,
}

pub struct ProbabilityCalculator<'a, P: StatisticsProvider + MatchHistory + ?Sized> {
    provider: &'a P,
    config: &'a EngineConfig,
}
impl<'a, P: StatisticsProvider + MatchHistory + ?Sized> ProbabilityCalculator<'a, P> {
    pub fn new(provider: &'a P, config: &'a EngineConfig) -> Self {
        Self { provider, config }
    }

    pub fn gather(&self, fixture: &Fixture) -> Inputs {
        let analyzer = Analyzer::new(self.provider, self.config.goals.default_head_to_head_goals);
        Inputs {
            home_stats: self.provider.lookup(&fixture.home),
            away_stats: self.provider.lookup(&fixture.away),
            home_form: analyzer.form(&fixture.home, self.config.form_window),
            away_form: analyzer.form(&fixture.away, self.config.form_window),
            head_to_head: analyzer.head_to_head(&fixture.home, &fixture.away, self.config.head_to_head_window),
        }
    }

    pub fn calculate(&self, fixture: &Fixture) -> MatchProbabilityEstimate {
        let inputs = self.gather(fixture);
        self.calculate_from(fixture, &inputs)
    }

    pub fn calculate_from(&self, fixture: &Fixture, inputs: &Inputs) -> MatchProbabilityEstimate {
        let (Some(home_stats), Some(away_stats)) = (&inputs.home_stats, &inputs.away_stats) else {
            debug!("missing statistics for {fixture}, using fallback estimate");
            return MatchProbabilityEstimate::fallback();
        };

        let config = self.config;
        let home_strength = strength(&config.strength, home_stats, &inputs.home_form, true);
        let away_strength = strength(&config.strength, away_stats, &inputs.away_form, false);
        let [home_win, draw, away_win] = outcome_probs(&config.outcomes, home_strength, away_strength);

        let expected_goals = expected_goals(&inputs.home_form, &inputs.away_form, &inputs.head_to_head);
        let over_2_5 = over_prob(&config.goals, expected_goals);
        let confidence = confidence::estimate(
            &config.confidence,
            inputs.head_to_head.games,
            inputs.home_form.points,
            inputs.away_form.points,
        );
        debug!(
            "{fixture}: strengths {home_strength:.1}/{away_strength:.1}, expected goals {expected_goals:.2}, \
            confidence {confidence}"
        );

        MatchProbabilityEstimate {
            probs: MatchProbabilities {
                home_win: round_to(home_win, PROB_DECIMALS),
                draw: round_to(draw, PROB_DECIMALS),
                away_win: round_to(away_win, PROB_DECIMALS),
                over_2_5: round_to(over_2_5, PROB_DECIMALS),
            },
            expected_goals: Some(round_to(expected_goals, GOALS_DECIMALS)),
            strengths: Some(Strengths {
                home: round_to(home_strength, STRENGTH_DECIMALS),
                away: round_to(away_strength, STRENGTH_DECIMALS),
            }),
            confidence,
        }
    }
}

impl<'a, P: StatisticsProvider + MatchHistory + ?Sized> Predictor for ProbabilityCalculator<'a, P> {
    fn predict(&self, fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>> {
        Ok(Some(self.calculate(fixture)))
    }
}

/// Looks up the (home, draw, away) triple for the home-advantaged strength differential.
pub fn outcome_probs(table: &OutcomeTable, home_strength: f64, away_strength: f64) -> [f64; 3] {
    let diff = home_strength - away_strength + table.home_advantage;
    let probs = table.lookup(diff);
    debug!("strength diff {diff:.2} → {probs:?}");
    probs
}

/// Expected total goals from both teams' scoring and conceding rates, averaged with the
/// head-to-head goal rate when the teams have met before.
pub fn expected_goals(home_form: &TeamForm, away_form: &TeamForm, h2h: &HeadToHead) -> f64 {
    let from_form = (home_form.avg_goals_for
        + away_form.avg_goals_against
        + away_form.avg_goals_for
        + home_form.avg_goals_against)
        / 2.0;
    if h2h.games > 0 {
        (from_form + h2h.avg_goals) / 2.0
    } else {
        from_form
    }
}

pub fn over_prob(config: &GoalsConfig, expected_goals: f64) -> f64 {
    clamp(
        (expected_goals - config.line) / 2.0 + 0.5,
        config.min_over_prob,
        config.max_over_prob,
    )
}

#[cfg(test)]
mod tests;
