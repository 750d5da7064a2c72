//! Outcome probabilities and betting recommendations for soccer matches, derived from team
//! statistics and recent results, optionally combined with the outputs of trained models.

pub mod bet;
pub mod calculator;
pub mod combo;
pub mod confidence;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ensemble;
pub mod file;
pub mod form;
pub mod model;
pub mod predictor;
pub mod print;
pub mod probs;
pub mod provider;
pub mod strength;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
