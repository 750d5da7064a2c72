//! Reliability of a single statistical estimate, scored from the data that backs it.

use crate::config::ConfidenceConfig;
use crate::domain::Confidence;

/// Scores the data availability behind an estimate: a base score, plus bonuses for head-to-head
/// sample size and for the separation between the two teams' form points.
pub fn score(config: &ConfidenceConfig, h2h_games: usize, home_points: u32, away_points: u32) -> u32 {
    let h2h_bonus = config
        .head_to_head
        .iter()
        .find(|tier| h2h_games >= tier.at_least)
        .map_or(0, |tier| tier.bonus);
    let gap = home_points.abs_diff(away_points);
    let gap_bonus = config
        .form_gap
        .iter()
        .find(|tier| gap > tier.above)
        .map_or(0, |tier| tier.bonus);
    config.base + h2h_bonus + gap_bonus
}

pub fn tier(config: &ConfidenceConfig, score: u32) -> Confidence {
    if score >= config.high_score {
        Confidence::High
    } else if score >= config.medium_score {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

pub fn estimate(config: &ConfidenceConfig, h2h_games: usize, home_points: u32, away_points: u32) -> Confidence {
    tier(config, score(config, h2h_games, home_points, away_points))
}
