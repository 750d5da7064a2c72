//! Multi-leg (combo) slips: one leg per fixture, chosen from the catalog-priced markets, with the
//! combined probability and odds taken as products over the legs.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::{debug, trace};

use crate::bet::{first_max, BetRecommendation, BetType};
use crate::config::ComboConfig;
use crate::domain::{Confidence, Fixture, MatchProbabilityEstimate};
use crate::probs::round_to;

const PROB_DECIMALS: u32 = 3;
const ODDS_DECIMALS: u32 = 2;

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize,
)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComboLeg {
    pub fixture: Fixture,
    pub recommendation: BetRecommendation,
    pub confidence: Confidence,
}
impl ComboLeg {
    pub fn probability(&self) -> f64 {
        self.recommendation.probability
    }

    pub fn odds(&self) -> f64 {
        self.recommendation.odds.unwrap_or(1.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComboSlip {
    pub legs: Vec<ComboLeg>,
    pub combined_probability: f64,
    pub total_odds: f64,
    /// Percentage return on the stake should every leg win.
    pub expected_return: f64,
    pub confidence: Confidence,
    pub risk: RiskTier,
}
impl ComboSlip {
    pub fn empty() -> Self {
        Self {
            legs: vec![],
            combined_probability: 0.0,
            total_odds: 0.0,
            expected_return: 0.0,
            confidence: Confidence::Low,
            risk: RiskTier::Low,
        }
    }

    pub fn from_legs(config: &ComboConfig, legs: Vec<ComboLeg>) -> Self {
        if legs.is_empty() {
            return Self::empty();
        }
        let combined_probability: f64 = legs.iter().map(ComboLeg::probability).product();
        let total_odds: f64 = legs.iter().map(ComboLeg::odds).product();
        let confidence = if combined_probability > config.high_confidence_above {
            Confidence::High
        } else if combined_probability > config.medium_confidence_above {
            Confidence::Medium
        } else {
            Confidence::Low
        };
        let risk = risk_tier(config, legs.len());
        debug!(
            "{} legs: combined probability {combined_probability:.4}, odds {total_odds:.3}, {confidence} confidence, {risk} risk",
            legs.len()
        );

        Self {
            legs,
            combined_probability: round_to(combined_probability, PROB_DECIMALS),
            total_odds: round_to(total_odds, ODDS_DECIMALS),
            expected_return: ((total_odds - 1.0) * 100.0).round(),
            confidence,
            risk,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

pub fn risk_tier(config: &ComboConfig, legs: usize) -> RiskTier {
    if legs <= config.low_risk_max_legs {
        RiskTier::Low
    } else if legs <= config.medium_risk_max_legs {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

const LEG_CANDIDATES: [BetType; 4] = [
    BetType::OverTwoPointFive,
    BetType::HomeWin,
    BetType::Draw,
    BetType::AwayWin,
];

/// The most likely priced market for the fixture, provided the estimate is confident enough and
/// the market clears the leg threshold.
pub fn select_leg(
    config: &ComboConfig,
    fixture: &Fixture,
    estimate: &MatchProbabilityEstimate,
) -> Option<ComboLeg> {
    if !config.eligible.contains(&estimate.confidence) {
        debug!("{fixture}: {} confidence is not eligible for a combo", estimate.confidence);
        return None;
    }
    let candidates = LEG_CANDIDATES.iter().filter_map(|&bet| {
        let prob = bet.probability(&estimate.probs);
        let odds = bet.odds(&config.odds)?;
        trace!("{fixture}: leg candidate {bet} at {prob:.3} @ {odds:.2}");
        (prob > config.min_leg_prob).then_some(((bet, odds), prob))
    });
    let ((bet, odds), probability) = first_max(candidates)?;
    Some(ComboLeg {
        fixture: fixture.clone(),
        recommendation: BetRecommendation {
            bet,
            probability,
            odds: Some(odds),
        },
        confidence: estimate.confidence,
    })
}

/// Builds a slip over the `fixtures`, estimating each with `estimator`. Fixtures without a
/// qualifying leg are skipped.
pub fn build_combo(
    config: &ComboConfig,
    fixtures: &[Fixture],
    mut estimator: impl FnMut(&Fixture) -> MatchProbabilityEstimate,
) -> ComboSlip {
    let legs: Vec<_> = fixtures
        .iter()
        .filter_map(|fixture| {
            let leg = select_leg(config, fixture, &estimator(fixture));
            if leg.is_none() {
                debug!("{fixture}: no qualifying leg, skipped");
            }
            leg
        })
        .collect();
    ComboSlip::from_legs(config, legs)
}
