//! The contract between the ensemble and the independent probability sources feeding it.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::domain::{Fixture, MatchProbabilityEstimate};

/// Identifies a probability source contributing to an ensemble.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Statistical,
    Neural,
    Classifier,
}

/// Produces an estimate for a fixture. A predictor may fail outright (`Err`) or decline to predict
/// (`Ok(None)`), e.g., when its model has not been trained or the teams are unknown to it.
pub trait Predictor {
    fn predict(&self, fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>> {
        (**self).predict(fixture)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, fixture: &Fixture) -> anyhow::Result<Option<MatchProbabilityEstimate>> {
        (**self).predict(fixture)
    }
}

#[derive(Debug, Error)]
pub enum Unavailable {
    #[error("predictor not configured")]
    NotConfigured,

    #[error("no prediction returned")]
    NoPrediction,

    #[error("predictor failed: {0}")]
    Failed(#[source] anyhow::Error),
}

/// The outcome of invoking a single predictor.
#[derive(Debug)]
pub enum Prediction {
    Success(MatchProbabilityEstimate),
    Unavailable(Unavailable),
}
impl Prediction {
    /// Invokes `predictor`, capturing both failure modes as [Prediction::Unavailable].
    pub fn invoke(predictor: Option<&dyn Predictor>, fixture: &Fixture) -> Self {
        match predictor {
            None => Prediction::Unavailable(Unavailable::NotConfigured),
            Some(predictor) => predictor.predict(fixture).into(),
        }
    }

    pub fn estimate(&self) -> Option<&MatchProbabilityEstimate> {
        match self {
            Prediction::Success(estimate) => Some(estimate),
            Prediction::Unavailable(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Prediction::Success(_))
    }
}

impl From<anyhow::Result<Option<MatchProbabilityEstimate>>> for Prediction {
    fn from(result: anyhow::Result<Option<MatchProbabilityEstimate>>) -> Self {
        match result {
            Ok(Some(estimate)) => Prediction::Success(estimate),
            Ok(None) => Prediction::Unavailable(Unavailable::NoPrediction),
            Err(err) => Prediction::Unavailable(Unavailable::Failed(err)),
        }
    }
}
