use assert_float_eq::*;
use kickoff_testing::{assert_sums_to, PROB_TOLERANCE};

use super::*;
use crate::domain::Confidence;
use crate::provider::Archive;
use crate::testing::{result, stats};

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

#[test]
fn every_tier_sums_to_one() {
    let table = OutcomeTable::default();
    let cases = [
        ((50.0, 15.0), [0.65, 0.20, 0.15]),
        ((50.0, 42.0), [0.50, 0.30, 0.20]),
        ((50.0, 50.0), [0.35, 0.30, 0.35]),
        ((30.0, 55.0), [0.20, 0.30, 0.50]),
        ((10.0, 50.0), [0.15, 0.20, 0.65]),
    ];
    for ((home, away), expected) in cases {
        let probs = outcome_probs(&table, home, away);
        assert_eq!(expected, probs, "strengths {home}/{away}");
        assert_sums_to(1.0, &probs, PROB_TOLERANCE);
    }
}

#[test]
fn home_advantage_shifts_the_differential() {
    let table = OutcomeTable::default();
    // an even contest on paper is shifted by +10, which is not strictly above the 10 threshold
    assert_eq!([0.35, 0.30, 0.35], outcome_probs(&table, 40.0, 40.0));
    assert_eq!([0.50, 0.30, 0.20], outcome_probs(&table, 40.1, 40.0));
}

#[test]
fn over_prob_is_clamped() {
    let config = GoalsConfig::default();
    assert_float_absolute_eq!(0.9, over_prob(&config, 10.0), 1e-9);
    assert_float_absolute_eq!(0.1, over_prob(&config, 0.0), 1e-9);
    assert_float_absolute_eq!(0.5, over_prob(&config, 2.5), 1e-9);
    assert_float_absolute_eq!(0.75, over_prob(&config, 3.0), 1e-9);
    assert_float_absolute_eq!(0.9, over_prob(&config, 3.3), 1e-9);
    assert_float_absolute_eq!(0.1, over_prob(&config, 1.7), 1e-9);
    for tenths in 0..=200 {
        let prob = over_prob(&config, tenths as f64 / 10.0);
        assert!((0.1..=0.9).contains(&prob), "{prob}");
    }
}

#[test]
fn expected_goals_blends_head_to_head() {
    let home = TeamForm {
        avg_goals_for: 2.0,
        avg_goals_against: 1.0,
        ..Default::default()
    };
    let away = TeamForm {
        avg_goals_for: 1.5,
        avg_goals_against: 0.5,
        ..Default::default()
    };
    assert_float_absolute_eq!(2.5, expected_goals(&home, &away, &HeadToHead::empty(2.5)), 1e-9);

    let h2h = HeadToHead {
        wins_a: 1,
        draws: 0,
        wins_b: 1,
        avg_goals: 4.5,
        games: 2,
    };
    assert_float_absolute_eq!(3.5, expected_goals(&home, &away, &h2h), 1e-9);
}

#[test]
fn unknown_team_returns_fallback() {
    let archive = archive();
    let config = EngineConfig::default();
    let calculator = ProbabilityCalculator::new(&archive, &config);

    let estimate = calculator.calculate(&Fixture::new("Strong", "Nobody"));
    assert_eq!(MatchProbabilityEstimate::fallback(), estimate);
    assert_eq!(
        MatchProbabilities {
            home_win: 0.40,
            draw: 0.30,
            away_win: 0.30,
            over_2_5: 0.50
        },
        estimate.probs
    );
    assert_eq!(Some(2.5), estimate.expected_goals);
    assert_eq!(Confidence::Low, estimate.confidence);

    assert_eq!(
        MatchProbabilityEstimate::fallback(),
        calculator.calculate(&Fixture::new("Nobody", "Nobody Else"))
    );
}

#[test]
fn strong_home_side() {
    let archive = archive();
    let config = EngineConfig::default();
    let calculator = ProbabilityCalculator::new(&archive, &config);

    let inputs = calculator.gather(&Fixture::new("Strong", "Weak"));
    assert_eq!(13, inputs.home_form.points);
    assert_eq!(1, inputs.away_form.points);
    assert_eq!(1, inputs.head_to_head.games);

    let estimate = calculator.calculate(&Fixture::new("Strong", "Weak"));
    assert_eq!([0.65, 0.20, 0.15], estimate.probs.result_space());
    assert_sums_to(1.0, &estimate.probs.result_space(), PROB_TOLERANCE);
    // form-based 2.5 goals averaged with a single 4-goal meeting
    assert_eq!(Some(3.25), estimate.expected_goals);
    assert_float_absolute_eq!(0.875, estimate.probs.over_2_5, 1e-9);
    let strengths = estimate.strengths.unwrap();
    assert_float_absolute_eq!(41.7, strengths.home, 1e-9);
    assert_float_absolute_eq!(13.6, strengths.away, 1e-9);
    // 30 base + 15 for one meeting + 40 for a 12-point form gap
    assert_eq!(Confidence::High, estimate.confidence);
}

#[test]
fn weak_home_side() {
    let archive = archive();
    let config = EngineConfig::default();
    let calculator = ProbabilityCalculator::new(&archive, &config);

    let estimate = calculator.calculate(&Fixture::new("Weak", "Strong"));
    // 15.59 at home against 39.67 away, shifted by 10 → -14.08
    assert_eq!([0.20, 0.30, 0.50], estimate.probs.result_space());
    assert_eq!(Confidence::High, estimate.confidence);
}

#[test]
fn acts_as_predictor() {
    let archive = archive();
    let config = EngineConfig::default();
    let calculator = ProbabilityCalculator::new(&archive, &config);
    let fixture = Fixture::new("Strong", "Weak");
    assert_eq!(Some(calculator.calculate(&fixture)), calculator.predict(&fixture).unwrap());
}
