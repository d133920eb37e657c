//! Base-level activation.
//!
//! Implements the base-level learning equation over trial indices:
//!
//! ```text
//! B = ln(sum_j (t - t_j)^(-d) + epsilon)
//! ```
//!
//! Where:
//! - `t` is the current trial index
//! - `t_j` is the trial at which the j-th matching instance was recorded
//! - `d` is the decay parameter
//!
//! Every `t_j` must be strictly earlier than `t`. A zero lag has no defined
//! contribution for `d > 0`, so it is reported as an error rather than clamped.

use super::config::ActivationConfig;
use crate::error::{ErrorCode, IblError, IblResult};

/// Sum of `(now - t_j)^(-decay)` over the given presentation times.
pub fn base_level_sum<I>(times: I, now: u32, decay: f64) -> IblResult<f64>
where
    I: IntoIterator<Item = u32>,
{
    let mut sum = 0.0;
    for t_j in times {
        if t_j >= now {
            return Err(IblError::numerical(
                ErrorCode::NumTemporalOrder,
                format!(
                    "instance recorded at trial {} is not earlier than current trial {}",
                    t_j, now
                ),
            ));
        }
        sum += f64::from(now - t_j).powf(-decay);
    }
    Ok(sum)
}

/// Base-level activation `ln(B + epsilon)`.
///
/// An empty set of presentation times yields `ln(epsilon)`.
pub fn base_level_activation<I>(times: I, now: u32, config: &ActivationConfig) -> IblResult<f64>
where
    I: IntoIterator<Item = u32>,
{
    let sum = base_level_sum(times, now, config.decay)?;
    Ok((sum + config.epsilon).ln())
}
