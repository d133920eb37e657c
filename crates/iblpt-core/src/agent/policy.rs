//! Choice policy.
//!
//! Two stages:
//! - first trial: a fair coin between Risky and Safe;
//! - later trials: with probability `p` repeat the previous choice, otherwise take
//!   the option with the larger blended value. Ties go to Safe.

use rand::Rng;

use crate::error::IblResult;
use crate::types::Choice;

/// Decides the option for the current trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoicePolicy {
    inertia: f64,
}

impl ChoicePolicy {
    pub fn new(inertia: f64) -> Self {
        Self { inertia }
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Pick an option.
    ///
    /// `blended` is only called when the choice is value-driven, Risky first,
    /// so random draws happen in a fixed order: coin, or inertia draw followed by
    /// the blending draws.
    pub fn choose<R, F>(&self, last_choice: Option<Choice>, rng: &mut R, mut blended: F) -> IblResult<Choice>
    where
        R: Rng,
        F: FnMut(Choice, &mut R) -> IblResult<f64>,
    {
        let Some(last) = last_choice else {
            return Ok(if rng.gen::<bool>() {
                Choice::Risky
            } else {
                Choice::Safe
            });
        };

        if rng.gen::<f64>() < self.inertia {
            return Ok(last);
        }

        let risky = blended(Choice::Risky, rng)?;
        let safe = blended(Choice::Safe, rng)?;
        Ok(prefer(risky, safe))
    }
}

/// Risky only when its value is strictly larger; ties and NaN go to Safe.
pub fn prefer(risky: f64, safe: f64) -> Choice {
    if risky > safe {
        Choice::Risky
    } else {
        Choice::Safe
    }
}
