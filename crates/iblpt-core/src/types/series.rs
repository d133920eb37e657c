//! Per-trial rate series.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, IblError, IblResult};

/// Risky-choice rate and alternation rate, one value per trial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    pub r_rate: Vec<f64>,
    pub a_rate: Vec<f64>,
}

impl RateSeries {
    pub fn new(r_rate: Vec<f64>, a_rate: Vec<f64>) -> Self {
        Self { r_rate, a_rate }
    }

    /// Number of trials.
    pub fn len(&self) -> usize {
        self.r_rate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r_rate.is_empty()
    }

    /// Check both series have the same, non-zero length and values in [0, 1].
    pub fn validate(&self) -> IblResult<()> {
        if self.r_rate.is_empty() {
            return Err(IblError::validation("rate series is empty"));
        }
        if self.r_rate.len() != self.a_rate.len() {
            return Err(IblError::validation_code(
                ErrorCode::ValLengthMismatch,
                format!(
                    "R-rate has {} trials but A-rate has {}",
                    self.r_rate.len(),
                    self.a_rate.len()
                ),
            ));
        }
        let out_of_range = self
            .r_rate
            .iter()
            .chain(&self.a_rate)
            .any(|v| !(0.0..=1.0).contains(v));
        if out_of_range {
            return Err(IblError::validation("rate values must lie in [0, 1]"));
        }
        Ok(())
    }

    /// Keep only the first `n` trials.
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            r_rate: self.r_rate.iter().copied().take(n).collect(),
            a_rate: self.a_rate.iter().copied().take(n).collect(),
        }
    }
}

/// Human reference series for the estimation and competition problem sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanReference {
    pub estimation: RateSeries,
    pub competition: RateSeries,
}

impl HumanReference {
    pub fn new(estimation: RateSeries, competition: RateSeries) -> Self {
        Self {
            estimation,
            competition,
        }
    }

    /// Validate both series.
    pub fn validate(&self) -> IblResult<()> {
        self.estimation.validate()?;
        self.competition.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(RateSeries::new(vec![0.5, 0.4], vec![0.0, 0.3]).validate().is_ok());
        assert!(RateSeries::new(vec![0.5], vec![0.0, 0.3]).validate().is_err());
        assert!(RateSeries::new(vec![1.5], vec![0.0]).validate().is_err());
        assert!(RateSeries::default().validate().is_err());
    }

    #[test]
    fn test_truncated() {
        let series = RateSeries::new(vec![0.1, 0.2, 0.3], vec![0.0, 0.5, 0.5]);
        let short = series.truncated(2);
        assert_eq!(short.r_rate, vec![0.1, 0.2]);
        assert_eq!(short.a_rate, vec![0.0, 0.5]);
    }

    #[test]
    fn test_human_reference_validate() {
        let good = RateSeries::new(vec![0.4, 0.5], vec![0.0, 0.2]);
        let bad = RateSeries::new(vec![0.4], vec![0.0, 0.2]);
        assert!(HumanReference::new(good.clone(), good.clone()).validate().is_ok());
        assert!(HumanReference::new(good, bad).validate().is_err());
    }
}
