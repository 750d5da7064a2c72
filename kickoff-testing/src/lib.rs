//! Testing helpers.

use assert_float_eq::*;

/// Default absolute tolerance for probability comparisons.
pub const PROB_TOLERANCE: f64 = 1e-9;

pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_absolute_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that the elements of `probs` add up to `expected`, within the given `epsilon`.
pub fn assert_sums_to(expected: f64, probs: &[f64], epsilon: f64) {
    let sum: f64 = probs.iter().sum();
    assert!(
        (sum - expected).abs() <= epsilon,
        "expected {probs:?} to sum to {expected} ± {epsilon}, got {sum}"
    );
}
