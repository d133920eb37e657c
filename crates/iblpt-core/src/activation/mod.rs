//! Activation model for remembered instances.
//!
//! Each remembered instance is scored by how retrievable it is at the current
//! trial. The score has two parts:
//!
//! 1. **Base level**: recency and frequency of instances with the same option
//!    and the same outcome, `ln(sum (t - t_j)^(-d) + epsilon)`.
//! 2. **Noise**: a logistic perturbation `s * ln((1 - u) / u)`.
//!
//! # Example
//!
//! ```
//! use iblpt_core::activation::{activation, ActivationConfig};
//! use iblpt_core::memory::Memory;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let memory = Memory::seeded();
//! let config = ActivationConfig::new().with_decay(0.5).with_noise_scale(0.25);
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let seed_instance = memory.instances()[0];
//! let a = activation(&seed_instance, &memory, 1, &config, &mut rng).unwrap();
//! assert!(a.is_finite());
//! ```

pub mod base_level;
pub mod config;
pub mod noise;

pub use base_level::{base_level_activation, base_level_sum};
pub use config::{ActivationConfig, ACTIVATION_EPSILON};
pub use noise::{activation_noise, logistic_std_dev, logistic_variance};

use rand::Rng;

use crate::error::IblResult;
use crate::memory::Memory;
use crate::types::Instance;

/// Activation of `instance` at trial `now`.
///
/// The base level sums over every instance in `memory` with the same option and
/// outcome as `instance`; the noise consumes exactly one uniform draw.
pub fn activation<R: Rng>(
    instance: &Instance,
    memory: &Memory,
    now: u32,
    config: &ActivationConfig,
    rng: &mut R,
) -> IblResult<f64> {
    let times = memory
        .matching(instance.option, instance.outcome)
        .map(|m| m.time);
    let base = base_level_activation(times, now, config)?;
    Ok(base + activation_noise(rng, config.noise_scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Choice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_activation_matches_components() {
        let mut memory = Memory::seeded();
        memory.record(Instance::new(Choice::Risky, 40.0, 1));
        memory.record(Instance::new(Choice::Risky, 40.0, 2));
        let config = ActivationConfig::new().with_decay(1.0).with_noise_scale(0.5);

        let mut rng = StdRng::seed_from_u64(11);
        let got = activation(&memory.instances()[2], &memory, 3, &config, &mut rng).unwrap();

        let mut replay = StdRng::seed_from_u64(11);
        let expected = (1.0 / 2.0 + 1.0 + config.epsilon).ln()
            + activation_noise(&mut replay, config.noise_scale);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_other_outcomes_do_not_count() {
        let mut memory = Memory::seeded();
        memory.record(Instance::new(Choice::Risky, 20.0, 1));
        let config = ActivationConfig::new().with_decay(1.0);

        // Only the seed (30.0 at t=0) matches: ln(1/2 + eps).
        let times: Vec<u32> = memory.matching(Choice::Risky, 30.0).map(|m| m.time).collect();
        let base = base_level_activation(times, 2, &config).unwrap();
        assert!((base - (0.5 + config.epsilon).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_temporal_order_violation_propagates() {
        let mut memory = Memory::seeded();
        memory.record(Instance::new(Choice::Safe, 30.0, 4));
        let config = ActivationConfig::default();
        let mut rng = StdRng::seed_from_u64(0);
        let inst = memory.instances()[2];
        assert!(activation(&inst, &memory, 4, &config, &mut rng).is_err());
    }
}
