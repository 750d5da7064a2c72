//! Single-bet selection over the five markets derived from a [MatchProbabilities].

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use tracing::trace;

use crate::config::{OddsCatalog, SelectionConfig};
use crate::domain::MatchProbabilities;

#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter, Serialize, Deserialize,
)]
pub enum BetType {
    #[strum(serialize = "over 2.5")]
    OverTwoPointFive,
    #[strum(serialize = "under 2.5")]
    UnderTwoPointFive,
    #[strum(serialize = "home win")]
    HomeWin,
    #[strum(serialize = "draw")]
    Draw,
    #[strum(serialize = "away win")]
    AwayWin,
}
impl BetType {
    pub fn probability(&self, probs: &MatchProbabilities) -> f64 {
        match self {
            BetType::OverTwoPointFive => probs.over_2_5,
            BetType::UnderTwoPointFive => probs.under_2_5(),
            BetType::HomeWin => probs.home_win,
            BetType::Draw => probs.draw,
            BetType::AwayWin => probs.away_win,
        }
    }

    /// The catalog price of this bet, if one is quoted.
    pub fn odds(&self, catalog: &OddsCatalog) -> Option<f64> {
        match self {
            BetType::OverTwoPointFive => Some(catalog.over_2_5),
            BetType::UnderTwoPointFive => None,
            BetType::HomeWin => Some(catalog.home_win),
            BetType::Draw => Some(catalog.draw),
            BetType::AwayWin => Some(catalog.away_win),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetRecommendation {
    pub bet: BetType,
    pub probability: f64,
    pub odds: Option<f64>,
}

const SINGLE_CANDIDATES: [BetType; 5] = [
    BetType::OverTwoPointFive,
    BetType::UnderTwoPointFive,
    BetType::HomeWin,
    BetType::Draw,
    BetType::AwayWin,
];

/// Picks the most likely bet among those clearing the selection threshold, or the most likely bet
/// overall if none do. Ties go to the candidate listed first.
pub fn determine_best_bet(config: &SelectionConfig, probs: &MatchProbabilities) -> BetRecommendation {
    let candidates: Vec<_> = SINGLE_CANDIDATES
        .iter()
        .map(|&bet| (bet, bet.probability(probs)))
        .collect();
    let (bet, probability) = first_max(candidates.iter().copied().filter(|&(bet, prob)| {
        let qualifies = prob > config.min_prob;
        trace!("candidate {bet} at {prob:.3}, qualifies: {qualifies}");
        qualifies
    }))
    .or_else(|| first_max(candidates.iter().copied()))
    .unwrap_or((BetType::OverTwoPointFive, probs.over_2_5));

    BetRecommendation {
        bet,
        probability,
        odds: None,
    }
}

/// The highest-probability candidate; of several equal ones, the earliest.
pub(crate) fn first_max<T>(candidates: impl IntoIterator<Item = (T, f64)>) -> Option<(T, f64)> {
    candidates.into_iter().fold(None, |best, candidate| match best {
        Some((_, best_prob)) if candidate.1 <= best_prob => best,
        _ => Some(candidate),
    })
}
