//! The entry point for callers: owns the data provider, the validated configuration and the
//! optional model-backed predictors, and exposes the prediction operations over them.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bet::{self, BetRecommendation, BetType};
use crate::calculator::ProbabilityCalculator;
use crate::combo::{self, ComboSlip, RiskTier};
use crate::config::EngineConfig;
use crate::domain::{Confidence, Fixture, MatchProbabilities, MatchProbabilityEstimate};
use crate::ensemble::{EnsembleCombiner, EnsembleEstimate};
use crate::form::{HeadToHead, TeamForm};
use crate::predictor::{Predictor, Source};
use crate::provider::{MatchHistory, StatisticsProvider};

const PRIMARY_OVER_ABOVE: f64 = 0.6;
const PRIMARY_HOME_WIN_ABOVE: f64 = 0.5;

/// The headline pick of a [MatchAnalysis].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub primary: BetType,
    pub confidence: Confidence,
    pub risk: RiskTier,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub fixture: Fixture,
    pub estimate: MatchProbabilityEstimate,
    pub home_form: TeamForm,
    pub away_form: TeamForm,
    pub head_to_head: HeadToHead,
    pub recommendation: Recommendation,
}

/// An ensemble estimate paired with the best single bet it supports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub fixture: Fixture,
    pub ensemble: EnsembleEstimate,
    pub best_bet: BetRecommendation,
}

pub struct Engine<P> {
    provider: P,
    config: EngineConfig,
    neural: Option<Box<dyn Predictor>>,
    classifier: Option<Box<dyn Predictor>>,
}
impl<P: StatisticsProvider + MatchHistory> Engine<P> {
    pub fn new(provider: P, config: EngineConfig) -> Result<Self, anyhow::Error> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            neural: None,
            classifier: None,
        })
    }

    pub fn with_neural(mut self, predictor: impl Predictor + 'static) -> Self {
        self.neural = Some(Box::new(predictor));
        self
    }

    pub fn with_classifier(mut self, predictor: impl Predictor + 'static) -> Self {
        self.classifier = Some(Box::new(predictor));
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn calculator(&self) -> ProbabilityCalculator<'_, P> {
        ProbabilityCalculator::new(&self.provider, &self.config)
    }

    pub fn calculate_match_probabilities(&self, fixture: &Fixture) -> MatchProbabilityEstimate {
        self.calculator().calculate(fixture)
    }

    /// Combines the statistical estimate with whichever model predictors are configured and able
    /// to predict the fixture.
    pub fn predict_ensemble(&self, fixture: &Fixture) -> EnsembleEstimate {
        let statistical = self.calculator();
        let predictors = [
            (Source::Statistical, Some(&statistical as &dyn Predictor)),
            (Source::Neural, self.neural.as_deref().map(|p| p as &dyn Predictor)),
            (Source::Classifier, self.classifier.as_deref().map(|p| p as &dyn Predictor)),
        ];
        EnsembleCombiner::new(&self.config.ensemble).predict(fixture, &predictors)
    }

    pub fn determine_best_bet(&self, probs: &MatchProbabilities) -> BetRecommendation {
        bet::determine_best_bet(&self.config.selection, probs)
    }

    pub fn build_best_combo(&self, fixtures: &[Fixture]) -> ComboSlip {
        let calculator = self.calculator();
        combo::build_combo(&self.config.combo, fixtures, |fixture| calculator.calculate(fixture))
    }

    /// The statistical estimate together with the form and head-to-head figures behind it.
    pub fn analyze_match(&self, fixture: &Fixture) -> MatchAnalysis {
        let calculator = self.calculator();
        let inputs = calculator.gather(fixture);
        let estimate = calculator.calculate_from(fixture, &inputs);
        let primary = if estimate.probs.over_2_5 > PRIMARY_OVER_ABOVE {
            BetType::OverTwoPointFive
        } else if estimate.probs.home_win > PRIMARY_HOME_WIN_ABOVE {
            BetType::HomeWin
        } else {
            BetType::Draw
        };
        let risk = if estimate.confidence == Confidence::High {
            RiskTier::Low
        } else {
            RiskTier::Medium
        };
        debug!("{fixture}: primary {primary}, {risk} risk");

        MatchAnalysis {
            fixture: fixture.clone(),
            recommendation: Recommendation {
                primary,
                confidence: estimate.confidence,
                risk,
            },
            estimate,
            home_form: inputs.home_form,
            away_form: inputs.away_form,
            head_to_head: inputs.head_to_head,
        }
    }

    /// An ensemble estimate and best bet for each of the `fixtures`, in the given order.
    pub fn best_predictions(&self, fixtures: &[Fixture]) -> Vec<Tip> {
        fixtures
            .iter()
            .map(|fixture| {
                let ensemble = self.predict_ensemble(fixture);
                let best_bet = self.determine_best_bet(&ensemble.probs);
                Tip {
                    fixture: fixture.clone(),
                    ensemble,
                    best_bet,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use kickoff_testing::{assert_sums_to, PROB_TOLERANCE};

    use super::*;
    use crate::model::{ClassProbabilities, PrecomputedModel};
    use crate::provider::Archive;
    use crate::testing::{estimate, probs, result, stats, FailingPredictor, FixedPredictor};

    fn archive() -> Archive {
        Archive::new(
            vec![
                stats("Strong", 2.5, 0.5, 15, 3, 2),
                stats("Weak", 0.8, 2.0, 3, 5, 12),
            ],
            vec![
                result("Strong", "X1", 3, 0, 1),
                result("X2", "Strong", 0, 2, 8),
                result("Strong", "X3", 2, 1, 15),
                result("Strong", "Weak", 3, 1, 22),
                result("X4", "Strong", 1, 1, 29),
                result("Weak", "X1", 0, 2, 2),
                result("X2", "Weak", 1, 0, 9),
                result("Weak", "X3", 1, 1, 16),
                result("X4", "Weak", 2, 0, 23),
            ],
        )
    }

    fn strong_v_weak() -> Fixture {
        Fixture::new("Strong", "Weak")
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.goals.min_over_prob = 0.95;
        assert!(Engine::new(archive(), config).is_err());
    }

    #[test]
    fn statistical_only_ensemble_matches_calculator() {
        let engine = Engine::new(archive(), EngineConfig::default()).unwrap();
        let single = engine.calculate_match_probabilities(&strong_v_weak());
        let ensemble = engine.predict_ensemble(&strong_v_weak());
        assert_eq!(vec![Source::Statistical], ensemble.sources);
        assert_eq!(single.probs, ensemble.probs);
        assert_eq!(Confidence::Low, ensemble.confidence);
    }

    #[test]
    fn ensemble_with_models() {
        let mut neural = PrecomputedModel::new("neural");
        neural.insert(
            strong_v_weak(),
            ClassProbabilities::new(vec![0.1, 0.2, 0.7], vec![0.2, 0.8]),
        );
        let engine = Engine::new(archive(), EngineConfig::default())
            .unwrap()
            .with_neural(neural)
            .with_classifier(FailingPredictor("classifier not trained"));
        let ensemble = engine.predict_ensemble(&strong_v_weak());
        assert_eq!(vec![Source::Statistical, Source::Neural], ensemble.sources);
        assert_sums_to(1.0, &ensemble.probs.result_space(), PROB_TOLERANCE);
        // statistical 0.65/0.2/0.15, over 0.875 at 3/7; neural 0.7/0.2/0.1, over 0.8 at 4/7
        assert_float_absolute_eq!(0.679, ensemble.probs.home_win, 1e-9);
        assert_float_absolute_eq!(0.2, ensemble.probs.draw, 1e-9);
        assert_float_absolute_eq!(0.121, ensemble.probs.away_win, 1e-9);
        assert_float_absolute_eq!(0.832, ensemble.probs.over_2_5, 1e-9);
        assert_eq!(Confidence::VeryHigh, ensemble.confidence);

        // the neural model has nothing for the reverse fixture
        let ensemble = engine.predict_ensemble(&Fixture::new("Weak", "Strong"));
        assert_eq!(vec![Source::Statistical], ensemble.sources);
    }

    #[test]
    fn best_bet_delegates_to_selector() {
        let engine = Engine::new(archive(), EngineConfig::default()).unwrap();
        let best = engine.determine_best_bet(&probs(0.6, 0.25, 0.15, 0.7));
        assert_eq!(BetType::OverTwoPointFive, best.bet);
    }

    #[test]
    fn combo_over_archive() {
        let engine = Engine::new(archive(), EngineConfig::default()).unwrap();
        let slip = engine.build_best_combo(&[
            strong_v_weak(),
            Fixture::new("Strong", "Nobody"),
            Fixture::new("Weak", "Strong"),
        ]);
        // the unknown fixture falls back to a Low-confidence estimate and is skipped
        assert_eq!(2, slip.legs.len());
        assert_eq!(BetType::OverTwoPointFive, slip.legs[0].recommendation.bet);
        assert_eq!(Some(1.75), slip.legs[0].recommendation.odds);
        assert_eq!(BetType::OverTwoPointFive, slip.legs[1].recommendation.bet);
        assert_eq!(RiskTier::Low, slip.risk);
    }

    #[test]
    fn analysis_of_strong_home_side() {
        let engine = Engine::new(archive(), EngineConfig::default()).unwrap();
        let analysis = engine.analyze_match(&strong_v_weak());
        assert_eq!(engine.calculate_match_probabilities(&strong_v_weak()), analysis.estimate);
        assert_eq!(13, analysis.home_form.points);
        assert_eq!(1, analysis.away_form.points);
        assert_eq!(1, analysis.head_to_head.wins_a);
        assert_eq!(
            Recommendation {
                primary: BetType::OverTwoPointFive,
                confidence: Confidence::High,
                risk: RiskTier::Low,
            },
            analysis.recommendation
        );
    }

    #[test]
    fn analysis_of_unknown_fixture() {
        let engine = Engine::new(archive(), EngineConfig::default()).unwrap();
        let analysis = engine.analyze_match(&Fixture::new("Nobody", "Nobody Else"));
        assert_eq!(MatchProbabilityEstimate::fallback(), analysis.estimate);
        assert_eq!(0, analysis.home_form.matches);
        assert_eq!(0, analysis.head_to_head.games);
        // over 0.5 and home 0.4 fall through to a draw
        assert_eq!(BetType::Draw, analysis.recommendation.primary);
        assert_eq!(RiskTier::Medium, analysis.recommendation.risk);
    }

    #[test]
    fn best_predictions_in_fixture_order() {
        let engine = Engine::new(archive(), EngineConfig::default())
            .unwrap()
            .with_classifier(FixedPredictor(estimate(probs(0.3, 0.3, 0.4, 0.2), Confidence::Medium)));
        let fixtures = [strong_v_weak(), Fixture::new("Weak", "Strong")];
        let tips = engine.best_predictions(&fixtures);
        assert_eq!(2, tips.len());
        for (tip, fixture) in tips.iter().zip(&fixtures) {
            assert_eq!(fixture, &tip.fixture);
            assert_eq!(vec![Source::Statistical, Source::Classifier], tip.ensemble.sources);
            assert_eq!(engine.determine_best_bet(&tip.ensemble.probs), tip.best_bet);
        }
    }
}
