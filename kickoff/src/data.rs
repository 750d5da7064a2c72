//! The on-disk dataset: team statistics, finished results and precomputed model outputs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::domain::{Fixture, MatchResult, TeamStatistics};
use crate::engine::Engine;
use crate::file::read_json;
use crate::model::{ClassProbabilities, PrecomputedModel};
use crate::provider::Archive;

/// One fixture's raw model output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelOutput {
    pub home: String,
    pub away: String,
    #[serde(flatten)]
    pub classes: ClassProbabilities,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Models {
    pub neural: Option<Vec<ModelOutput>>,
    pub classifier: Option<Vec<ModelOutput>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub teams: Vec<TeamStatistics>,
    pub results: Vec<MatchResult>,
    pub models: Models,
}
impl Dataset {
    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let dataset: Self = read_json(path)?;
        info!(
            "loaded {} team statistics and {} results",
            dataset.teams.len(),
            dataset.results.len()
        );
        Ok(dataset)
    }

    /// Splits the dataset into a provider and whichever models it carries outputs for.
    pub fn into_parts(self) -> (Archive, Option<PrecomputedModel>, Option<PrecomputedModel>) {
        let archive = Archive::new(self.teams, self.results);
        let neural = self.models.neural.map(|outputs| to_model("neural", outputs));
        let classifier = self.models.classifier.map(|outputs| to_model("classifier", outputs));
        (archive, neural, classifier)
    }

    pub fn into_engine(self, config: EngineConfig) -> Result<Engine<Archive>, anyhow::Error> {
        let (archive, neural, classifier) = self.into_parts();
        let mut engine = Engine::new(archive, config)?;
        if let Some(neural) = neural {
            engine = engine.with_neural(neural);
        }
        if let Some(classifier) = classifier {
            engine = engine.with_classifier(classifier);
        }
        Ok(engine)
    }
}

fn to_model(name: &str, outputs: Vec<ModelOutput>) -> PrecomputedModel {
    let mut model = PrecomputedModel::new(name);
    for output in outputs {
        model.insert(Fixture::new(output.home, output.away), output.classes);
    }
    info!("model '{name}' carries {} outputs", model.len());
    model
}
