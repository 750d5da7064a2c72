//! Tunable constants of the engine, grouped by the component that consumes them.
//!
//! Every table has a [Default] matching the stock behaviour and a `validate()` that rejects
//! configurations which would break the engine's invariants (e.g., a tier whose probabilities do not
//! add up to 1).

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::domain::Confidence;
use crate::predictor::Source;
use crate::probs::SliceExt;

const SUM_TOLERANCE: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub form_window: usize,
    pub head_to_head_window: usize,
    pub strength: StrengthConfig,
    pub outcomes: OutcomeTable,
    pub goals: GoalsConfig,
    pub confidence: ConfidenceConfig,
    pub ensemble: EnsembleConfig,
    pub selection: SelectionConfig,
    pub combo: ComboConfig,
}
impl EngineConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.form_window == 0 {
            bail!("form window must be positive");
        }
        if self.head_to_head_window == 0 {
            bail!("head-to-head window must be positive");
        }
        self.strength.validate().context("invalid strength config")?;
        self.outcomes.validate().context("invalid outcome table")?;
        self.goals.validate().context("invalid goals config")?;
        self.confidence.validate().context("invalid confidence config")?;
        self.ensemble.validate().context("invalid ensemble config")?;
        self.selection.validate().context("invalid selection config")?;
        self.combo.validate().context("invalid combo config")?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            form_window: 5,
            head_to_head_window: 5,
            strength: Default::default(),
            outcomes: Default::default(),
            goals: Default::default(),
            confidence: Default::default(),
            ensemble: Default::default(),
            selection: Default::default(),
            combo: Default::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthConfig {
    pub win_rate_scale: f64,
    pub goal_diff_cap: f64,
    pub max_form_points: f64,
    pub form_scale: f64,
    pub home_venue_bonus: f64,
    pub away_venue_bonus: f64,
    pub general_weight: f64,
    pub form_weight: f64,
    pub venue_weight: f64,
    pub max_strength: f64,
}
impl StrengthConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.goal_diff_cap < 0.0 {
            bail!("goal difference cap must be non-negative");
        }
        if self.max_form_points <= 0.0 {
            bail!("max form points must be positive");
        }
        let weights = [self.general_weight, self.form_weight, self.venue_weight];
        if weights.iter().any(|&weight| weight < 0.0) {
            bail!("component weights must be non-negative");
        }
        if (weights.sum() - 1.0).abs() > SUM_TOLERANCE {
            bail!("component weights must sum to 1, got {}", weights.sum());
        }
        Ok(())
    }
}

impl Default for StrengthConfig {
    fn default() -> Self {
        Self {
            win_rate_scale: 50.0,
            goal_diff_cap: 20.0,
            max_form_points: 15.0,
            form_scale: 40.0,
            home_venue_bonus: 20.0,
            away_venue_bonus: 10.0,
            general_weight: 0.4,
            form_weight: 0.4,
            venue_weight: 0.2,
            max_strength: 100.0,
        }
    }
}

/// A row of the strength-differential table: applies when the differential is strictly greater than
/// `above`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeTier {
    pub above: f64,
    pub probs: [f64; 3],
}

/// Maps a home-advantaged strength differential to a (home, draw, away) triple. Tiers are scanned
/// from the widest margin down; the first match wins and `otherwise` applies when none match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutcomeTable {
    pub home_advantage: f64,
    pub tiers: Vec<OutcomeTier>,
    pub otherwise: [f64; 3],
}
impl OutcomeTable {
    pub fn lookup(&self, diff: f64) -> [f64; 3] {
        self.tiers
            .iter()
            .find(|tier| diff > tier.above)
            .map(|tier| tier.probs)
            .unwrap_or(self.otherwise)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for tier in &self.tiers {
            validate_triple(&tier.probs).with_context(|| format!("tier above {}", tier.above))?;
        }
        validate_triple(&self.otherwise).context("fallback tier")?;
        if self.tiers.windows(2).any(|pair| pair[0].above <= pair[1].above) {
            bail!("tier thresholds must be strictly descending");
        }
        Ok(())
    }
}

fn validate_triple(probs: &[f64; 3]) -> Result<(), anyhow::Error> {
    if probs.iter().any(|prob| !(0.0..=1.0).contains(prob)) {
        bail!("probabilities must lie in [0, 1], got {probs:?}");
    }
    if (probs.sum() - 1.0).abs() > SUM_TOLERANCE {
        bail!("probabilities must sum to 1, got {}", probs.sum());
    }
    Ok(())
}

impl Default for OutcomeTable {
    fn default() -> Self {
        Self {
            home_advantage: 10.0,
            tiers: vec![
                OutcomeTier {
                    above: 20.0,
                    probs: [0.65, 0.20, 0.15],
                },
                OutcomeTier {
                    above: 10.0,
                    probs: [0.50, 0.30, 0.20],
                },
                OutcomeTier {
                    above: -10.0,
                    probs: [0.35, 0.30, 0.35],
                },
                OutcomeTier {
                    above: -20.0,
                    probs: [0.20, 0.30, 0.50],
                },
            ],
            otherwise: [0.15, 0.20, 0.65],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    pub line: f64,
    pub min_over_prob: f64,
    pub max_over_prob: f64,
    pub default_head_to_head_goals: f64,
}
impl GoalsConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(0.0..=1.0).contains(&self.min_over_prob) || !(0.0..=1.0).contains(&self.max_over_prob) {
            bail!("over probability bounds must lie in [0, 1]");
        }
        if self.min_over_prob > self.max_over_prob {
            bail!("min over probability cannot exceed the max");
        }
        if self.default_head_to_head_goals < 0.0 {
            bail!("default head-to-head goals must be non-negative");
        }
        Ok(())
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            line: 2.5,
            min_over_prob: 0.1,
            max_over_prob: 0.9,
            default_head_to_head_goals: 2.5,
        }
    }
}

/// A bonus awarded when the measured quantity meets `at_least`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountBonus {
    pub at_least: usize,
    pub bonus: u32,
}

/// A bonus awarded when the measured quantity strictly exceeds `above`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GapBonus {
    pub above: u32,
    pub bonus: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub base: u32,
    pub head_to_head: Vec<CountBonus>,
    pub form_gap: Vec<GapBonus>,
    pub high_score: u32,
    pub medium_score: u32,
}
impl ConfidenceConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.head_to_head.windows(2).any(|pair| pair[0].at_least <= pair[1].at_least) {
            bail!("head-to-head bonuses must be ordered by descending game count");
        }
        if self.form_gap.windows(2).any(|pair| pair[0].above <= pair[1].above) {
            bail!("form gap bonuses must be ordered by descending gap");
        }
        if self.medium_score > self.high_score {
            bail!("medium score threshold cannot exceed the high threshold");
        }
        Ok(())
    }
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 30,
            head_to_head: vec![
                CountBonus { at_least: 3, bonus: 30 },
                CountBonus { at_least: 1, bonus: 15 },
            ],
            form_gap: vec![
                GapBonus { above: 6, bonus: 40 },
                GapBonus { above: 3, bonus: 20 },
            ],
            high_score: 80,
            medium_score: 60,
        }
    }
}

/// Maps cross-source disagreement to a confidence tier: applies when the disagreement is strictly
/// below `below`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgreementTier {
    pub below: f64,
    pub confidence: Confidence,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceWeight {
    pub source: Source,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    pub weights: Vec<SourceWeight>,
    pub min_sources_for_agreement: usize,
    pub agreement: Vec<AgreementTier>,
}
impl EnsembleConfig {
    pub fn weight_of(&self, source: Source) -> f64 {
        self.weights
            .iter()
            .find(|entry| entry.source == source)
            .map(|entry| entry.weight)
            .unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.weights.iter().any(|entry| entry.weight < 0.0) {
            bail!("source weights must be non-negative");
        }
        if self.weights.iter().map(|entry| entry.weight).sum::<f64>() <= 0.0 {
            bail!("source weights must have a positive sum");
        }
        for (index, entry) in self.weights.iter().enumerate() {
            if self.weights[..index].iter().any(|earlier| earlier.source == entry.source) {
                bail!("duplicate weight for {}", entry.source);
            }
        }
        if self.agreement.windows(2).any(|pair| pair[0].below >= pair[1].below) {
            bail!("agreement thresholds must be strictly ascending");
        }
        Ok(())
    }
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            weights: vec![
                SourceWeight {
                    source: Source::Statistical,
                    weight: 0.3,
                },
                SourceWeight {
                    source: Source::Neural,
                    weight: 0.4,
                },
                SourceWeight {
                    source: Source::Classifier,
                    weight: 0.3,
                },
            ],
            min_sources_for_agreement: 2,
            agreement: vec![
                AgreementTier {
                    below: 0.10,
                    confidence: Confidence::VeryHigh,
                },
                AgreementTier {
                    below: 0.15,
                    confidence: Confidence::High,
                },
                AgreementTier {
                    below: 0.25,
                    confidence: Confidence::Medium,
                },
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub min_prob: f64,
}
impl SelectionConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(0.0..=1.0).contains(&self.min_prob) {
            bail!("min probability must lie in [0, 1]");
        }
        Ok(())
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { min_prob: 0.5 }
    }
}

/// Fixed decimal odds offered for each combo candidate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsCatalog {
    pub over_2_5: f64,
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}
impl OddsCatalog {
    fn validate(&self) -> Result<(), anyhow::Error> {
        let odds = [self.over_2_5, self.home_win, self.draw, self.away_win];
        if odds.iter().any(|&price| !(price >= 1.0)) {
            bail!("odds must be at least 1.0, got {odds:?}");
        }
        Ok(())
    }
}

impl Default for OddsCatalog {
    fn default() -> Self {
        Self {
            over_2_5: 1.75,
            home_win: 2.10,
            draw: 3.20,
            away_win: 2.80,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboConfig {
    pub min_leg_prob: f64,
    pub eligible: Vec<Confidence>,
    pub odds: OddsCatalog,
    pub low_risk_max_legs: usize,
    pub medium_risk_max_legs: usize,
    pub high_confidence_above: f64,
    pub medium_confidence_above: f64,
}
impl ComboConfig {
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(0.0..=1.0).contains(&self.min_leg_prob) {
            bail!("min leg probability must lie in [0, 1]");
        }
        self.odds.validate()?;
        if self.low_risk_max_legs > self.medium_risk_max_legs {
            bail!("low-risk leg limit cannot exceed the medium-risk limit");
        }
        if self.medium_confidence_above > self.high_confidence_above {
            bail!("medium confidence threshold cannot exceed the high threshold");
        }
        Ok(())
    }
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            min_leg_prob: 0.45,
            eligible: vec![Confidence::High, Confidence::Medium],
            odds: Default::default(),
            low_risk_max_legs: 2,
            medium_risk_max_legs: 3,
            high_confidence_above: 0.3,
            medium_confidence_above: 0.15,
        }
    }
}
