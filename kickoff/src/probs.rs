//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn normalise(&mut self, target: f64) -> f64;
    fn scale(&mut self, factor: f64);
    fn mean(&self) -> f64;
    fn std_dev(&self) -> f64;
    fn round_preserving_sum(&mut self, decimals: u32);
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    /// Scales the elements so that they add up to `target`, returning the sum prior to scaling.
    /// A slice summing to zero is left untouched.
    fn normalise(&mut self, target: f64) -> f64 {
        let sum = self.sum();
        if sum > 0.0 {
            self.scale(target / sum);
        }
        sum
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }

    fn mean(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.sum() / self.len() as f64
        }
    }

    /// Population standard deviation.
    fn std_dev(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .iter()
            .map(|element| (element - mean).powi(2))
            .sum::<f64>()
            / self.len() as f64;
        variance.sqrt()
    }

    /// Rounds each element to `decimals` places using the largest-remainder method, so that the
    /// rounded elements add up to the rounded sum of the originals.
    fn round_preserving_sum(&mut self, decimals: u32) {
        if self.is_empty() {
            return;
        }
        let factor = 10f64.powi(decimals as i32);
        let target_units = (self.sum() * factor).round() as i64;
        let mut units: Vec<i64> = self.iter().map(|element| (element * factor).floor() as i64).collect();
        let mut shortfall = target_units - units.iter().sum::<i64>();

        let mut by_remainder: Vec<usize> = (0..self.len()).collect();
        by_remainder.sort_by(|&a, &b| {
            let rem_a = self[a] * factor - units[a] as f64;
            let rem_b = self[b] * factor - units[b] as f64;
            rem_b.total_cmp(&rem_a)
        });
        for &index in by_remainder.iter().cycle() {
            if shortfall <= 0 {
                break;
            }
            units[index] += 1;
            shortfall -= 1;
        }
        for (element, units) in self.iter_mut().zip(units) {
            *element = units as f64 / factor;
        }
    }
}

/// Rounds `value` to the given number of decimal places, rounding half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Clamps `value` to the inclusive range `[min, max]`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    f64::min(max, f64::max(min, value))
}
