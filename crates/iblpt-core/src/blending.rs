//! Blended value of an option.
//!
//! Every remembered instance of the option is weighted by a softmax over its
//! activation, with temperature `tau = s * sqrt(2)`:
//!
//! ```text
//! w_i = exp(A_i / tau) / sum_j exp(A_j / tau)
//! V   = sum_i w_i * v(x_i)
//! ```
//!
//! Fallbacks:
//! - all weights underflow to zero: uniform weights over the instances;
//! - the weight sum overflows: weights are recomputed relative to the largest activation;
//! - no instances at all: the blended value is `0.0`.

use rand::Rng;

use crate::activation::{activation, ActivationConfig};
use crate::error::IblResult;
use crate::memory::Memory;
use crate::types::Choice;
use crate::valuation::Valuation;

/// Normalized blending weights for a set of activations.
///
/// The result is empty for empty input; otherwise its entries are non-negative
/// and sum to one.
pub fn blend_weights(activations: &[f64], temperature: f64) -> Vec<f64> {
    if activations.is_empty() {
        return Vec::new();
    }

    let mut weights: Vec<f64> = activations.iter().map(|a| (a / temperature).exp()).collect();
    let sum: f64 = weights.iter().sum();

    if sum > 0.0 && sum.is_finite() {
        weights.iter_mut().for_each(|w| *w /= sum);
    } else if sum.is_infinite() {
        let max = activations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        tracing::debug!(max_activation = max, "blend weight sum overflowed; shifting by max");
        weights = activations
            .iter()
            .map(|a| ((a - max) / temperature).exp())
            .collect();
        let shifted: f64 = weights.iter().sum();
        weights.iter_mut().for_each(|w| *w /= shifted);
    } else {
        tracing::debug!(
            instances = activations.len(),
            "blend weights underflowed; using uniform weights"
        );
        let uniform = 1.0 / activations.len() as f64;
        weights.iter_mut().for_each(|w| *w = uniform);
    }

    weights
}

/// Weighted average of `values` under `weights`.
pub fn weighted_sum(weights: &[f64], values: &[f64]) -> f64 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

/// Blended value of `option` at trial `now`.
///
/// Draws one activation-noise sample per instance of `option`, in memory order.
pub fn blended_value<R: Rng>(
    option: Choice,
    memory: &Memory,
    now: u32,
    config: &ActivationConfig,
    valuation: &Valuation,
    rng: &mut R,
) -> IblResult<f64> {
    let mut activations = Vec::new();
    let mut values = Vec::new();
    for instance in memory.of_option(option) {
        activations.push(activation(instance, memory, now, config, rng)?);
        values.push(valuation.value(instance.outcome));
    }

    if activations.is_empty() {
        return Ok(0.0);
    }

    let weights = blend_weights(&activations, config.temperature());
    Ok(weighted_sum(&weights, &values))
}
