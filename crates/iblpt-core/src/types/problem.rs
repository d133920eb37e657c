//! Gamble problems: one row of a choice dataset.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Choice;

/// A repeated binary choice between a two-outcome gamble and a sure payoff.
///
/// The risky option pays `val_high` with probability `p_high`, else `val_low`.
/// The safe option always pays `val_safe`. `sure`, `d1` and `mode` are dataset
/// columns carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GambleProblem {
    pub id: i64,
    pub val_high: f64,
    pub p_high: f64,
    pub val_low: f64,
    pub val_safe: f64,
    #[serde(default)]
    pub sure: f64,
    #[serde(default)]
    pub d1: f64,
    #[serde(default)]
    pub mode: f64,
}

impl GambleProblem {
    /// Create a problem from its payoff structure.
    pub fn new(val_high: f64, p_high: f64, val_low: f64, val_safe: f64) -> Self {
        Self {
            id: 0,
            val_high,
            p_high,
            val_low,
            val_safe,
            sure: 0.0,
            d1: 0.0,
            mode: 0.0,
        }
    }

    /// Set the dataset id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Draw the payoff for `choice`.
    ///
    /// Only the risky option consumes a random draw.
    pub fn sample_outcome<R: Rng>(&self, choice: Choice, rng: &mut R) -> f64 {
        match choice {
            Choice::Risky => {
                if rng.gen::<f64>() < self.p_high {
                    self.val_high
                } else {
                    self.val_low
                }
            }
            Choice::Safe => self.val_safe,
        }
    }

    /// Expected payoff of the risky option.
    pub fn risky_expected_value(&self) -> f64 {
        self.p_high * self.val_high + (1.0 - self.p_high) * self.val_low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_safe_is_deterministic() {
        let problem = GambleProblem::new(40.0, 0.5, 20.0, 30.0);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(problem.sample_outcome(Choice::Safe, &mut rng), 30.0);
        }
    }

    #[test]
    fn test_risky_frequency() {
        let problem = GambleProblem::new(40.0, 0.25, 20.0, 30.0);
        let mut rng = StdRng::seed_from_u64(7);
        let highs = (0..10_000)
            .filter(|_| problem.sample_outcome(Choice::Risky, &mut rng) == 40.0)
            .count();
        let freq = highs as f64 / 10_000.0;
        assert!((freq - 0.25).abs() < 0.02, "high frequency {}", freq);
    }

    #[test]
    fn test_degenerate_probabilities() {
        let mut rng = StdRng::seed_from_u64(3);
        let always = GambleProblem::new(10.0, 1.0, -5.0, 0.0);
        let never = GambleProblem::new(10.0, 0.0, -5.0, 0.0);
        for _ in 0..100 {
            assert_eq!(always.sample_outcome(Choice::Risky, &mut rng), 10.0);
            assert_eq!(never.sample_outcome(Choice::Risky, &mut rng), -5.0);
        }
    }

    #[test]
    fn test_expected_value() {
        let problem = GambleProblem::new(40.0, 0.5, 20.0, 30.0);
        assert_eq!(problem.risky_expected_value(), 30.0);
    }
}
