//! Adapts the raw class-probability outputs of trained models into estimates.
//!
//! Result classes are ordered `[away, draw, home]` and goal classes `[under, over]`. A model may
//! emit fewer classes than expected (e.g., when a class never occurred in its training set); the
//! missing ones take a neutral placeholder.

use anyhow::{bail, Context};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Confidence, Fixture, MatchProbabilities, MatchProbabilityEstimate};
use crate::predictor::Predictor;
use crate::probs::SliceExt;

const MISSING_RESULT_PROB: f64 = 0.33;
const MISSING_OVER_PROB: f64 = 0.5;
const HIGH_CONFIDENCE_ABOVE: f64 = 0.6;
const MEDIUM_CONFIDENCE_ABOVE: f64 = 0.4;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub result: Vec<f64>,
    pub over: Vec<f64>,
}
impl ClassProbabilities {
    pub fn new(result: Vec<f64>, over: Vec<f64>) -> Self {
        Self { result, over }
    }

    /// Every class probability must be finite and within [0, 1], and the result classes must carry
    /// some mass.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for &prob in self.result.iter().chain(&self.over) {
            if !prob.is_finite() || !(0.0..=1.0).contains(&prob) {
                bail!("class probability {prob} outside [0, 1]");
            }
        }
        if !self.result.is_empty() && self.result.sum() <= 0.0 {
            bail!("result classes {:?} carry no probability", self.result);
        }
        Ok(())
    }

    pub fn to_estimate(&self) -> MatchProbabilityEstimate {
        let class = |index: usize| self.result.get(index).copied().unwrap_or(MISSING_RESULT_PROB);
        let probs = MatchProbabilities {
            home_win: class(2),
            draw: class(1),
            away_win: class(0),
            over_2_5: self.over.get(1).copied().unwrap_or(MISSING_OVER_PROB),
        };
        let most_likely = probs.home_win.max(probs.draw).max(probs.away_win);
        let confidence = if most_likely > HIGH_CONFIDENCE_ABOVE {
            Confidence::High
        } else if most_likely > MEDIUM_CONFIDENCE_ABOVE {
            Confidence::Medium
        } else {
            Confidence::Low
        };
        MatchProbabilityEstimate {
            probs,
            expected_goals: None,
            strengths: None,
            confidence,
        }
    }
}

/// Serves model outputs computed ahead of time, keyed by fixture.
#[derive(Clone, Debug, Default)]
pub struct PrecomputedModel {
    name: String,
    outputs: FxHashMap<Fixture, ClassProbabilities>,
}
impl PrecomputedModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outputs: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, fixture: Fixture, output: ClassProbabilities) {
        self.outputs.insert(fixture, output);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl FromIterator<(Fixture, ClassProbabilities)> for PrecomputedModel {
    fn from_iter<T: IntoIterator<Item = (Fixture, ClassProbabilities)>>(iter: T) -> Self {
        Self {
            name: String::new(),
            outputs: iter.into_iter().collect(),
        }
    }
}

impl Predictor for PrecomputedModel {
    fn predict(&self, fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>> {
        match self.outputs.get(fixture) {
            None => {
                debug!("model '{}' has no output for {fixture}", self.name);
                Ok(None)
            }
            Some(output) => {
                output
                    .validate()
                    .with_context(|| format!("model '{}' output for {fixture}", self.name))?;
                Ok(Some(output.to_estimate()))
            }
        }
    }
}
