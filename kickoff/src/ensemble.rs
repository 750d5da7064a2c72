//! Combines the estimates of independent predictors into a single weighted estimate, scoring its
//! confidence by how closely the predictors agree.
//!
//! A predictor that fails or declines to predict is excluded and the weights of the remaining
//! sources are renormalised. With no successful predictor, the fallback distribution is returned.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EnsembleConfig;
use crate::domain::{Confidence, Fixture, MatchProbabilities, MatchProbabilityEstimate};
use crate::predictor::{Prediction, Predictor, Source};
use crate::probs::{round_to, SliceExt};

const PROB_DECIMALS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnsembleEstimate {
    pub probs: MatchProbabilities,
    pub sources: Vec<Source>,
    pub confidence: Confidence,
}
impl EnsembleEstimate {
    pub fn fallback() -> Self {
        Self {
            probs: MatchProbabilities::DEFAULT,
            sources: vec![],
            confidence: Confidence::Low,
        }
    }
}

pub struct EnsembleCombiner<'a> {
    config: &'a EnsembleConfig,
}
impl<'a> EnsembleCombiner<'a> {
    pub fn new(config: &'a EnsembleConfig) -> Self {
        Self { config }
    }

    /// Invokes each of the `predictors` in turn and combines whatever they produce.
    pub fn predict(
        &self,
        fixture: &Fixture,
        predictors: &[(Source, Option<&dyn Predictor>)],
    ) -> EnsembleEstimate {
        let predictions: Vec<_> = predictors
            .iter()
            .map(|&(source, predictor)| (source, Prediction::invoke(predictor, fixture)))
            .collect();
        self.combine(fixture, &predictions)
    }

    /// Blends the successful `predictions` by their configured weights, renormalised over the
    /// sources that predicted. A source with no weight is left out entirely: it contributes neither
    /// to the blend, the reported sources nor the agreement.
    ///
    /// The home/draw/away triple is normalised and then rounded jointly to 3 dp by largest
    /// remainder, not value by value, so it always sums to exactly 1. An even three-way split thus
    /// comes out as `[0.334, 0.333, 0.333]`. Over 2.5 is rounded on its own.
    pub fn combine(&self, fixture: &Fixture, predictions: &[(Source, Prediction)]) -> EnsembleEstimate {
        let mut present = Vec::with_capacity(predictions.len());
        for (source, prediction) in predictions {
            match prediction {
                Prediction::Success(estimate) if self.config.weight_of(*source) <= 0.0 => {
                    debug!("{fixture}: {source} carries no weight, ignoring {:?}", estimate.probs);
                }
                Prediction::Success(estimate) => {
                    debug!("{fixture}: {source} predicted {:?}", estimate.probs);
                    present.push((*source, estimate));
                }
                Prediction::Unavailable(reason) => {
                    warn!("{fixture}: {source} unavailable: {reason}");
                }
            }
        }
        if present.is_empty() {
            warn!("{fixture}: no weighted predictor available, using fallback estimate");
            return EnsembleEstimate::fallback();
        }

        let raw_weights: Vec<_> = present
            .iter()
            .map(|(source, _)| self.config.weight_of(*source))
            .collect();
        let mut weights = raw_weights.clone();
        weights.normalise(1.0);
        debug!("{fixture}: weights {raw_weights:?} renormalised to {weights:?}");

        let mut combined = [0.0; 4];
        for ((_, estimate), weight) in present.iter().zip(&weights) {
            combined[0] += estimate.probs.home_win * weight;
            combined[1] += estimate.probs.draw * weight;
            combined[2] += estimate.probs.away_win * weight;
            combined[3] += estimate.probs.over_2_5 * weight;
        }
        let mut result_space = [combined[0], combined[1], combined[2]];
        result_space.normalise(1.0);
        result_space.round_preserving_sum(PROB_DECIMALS);

        let estimates: Vec<_> = present.iter().map(|(_, estimate)| *estimate).collect();
        let confidence = self.agreement(&estimates);
        let mut sources: Vec<_> = present.iter().map(|(source, _)| *source).collect();
        sources.sort();

        let probs = MatchProbabilities {
            over_2_5: round_to(combined[3], PROB_DECIMALS),
            ..MatchProbabilities::DEFAULT
        };
        EnsembleEstimate {
            probs: probs.with_result_space(result_space),
            sources,
            confidence,
        }
    }

    /// Confidence from cross-source dispersion: the mean of the standard deviations of the home-win
    /// and over-2.5 probabilities. The lower the dispersion, the higher the confidence.
    pub fn agreement(&self, estimates: &[&MatchProbabilityEstimate]) -> Confidence {
        if estimates.len() < self.config.min_sources_for_agreement || estimates.len() < 2 {
            return Confidence::Low;
        }
        let home_wins: Vec<_> = estimates.iter().map(|estimate| estimate.probs.home_win).collect();
        let overs: Vec<_> = estimates.iter().map(|estimate| estimate.probs.over_2_5).collect();
        let dispersion = (home_wins.std_dev() + overs.std_dev()) / 2.0;
        let confidence = self
            .config
            .agreement
            .iter()
            .find(|tier| dispersion < tier.below)
            .map_or(Confidence::Low, |tier| tier.confidence);
        debug!("dispersion {dispersion:.4} across {} sources → {confidence}", estimates.len());
        confidence
    }
}
