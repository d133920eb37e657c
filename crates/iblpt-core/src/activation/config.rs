//! Configuration for the activation model.

use serde::{Deserialize, Serialize};

use crate::types::ModelParameters;

/// Guard added inside the logarithm so an empty match set gives a finite activation.
pub const ACTIVATION_EPSILON: f64 = 1e-8;

/// Parameters of the base-level + noise activation equation.
///
/// ```text
/// A_i = ln(sum_j (t - t_j)^(-d) + epsilon) + s * ln((1 - u) / u)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Decay parameter (d). Higher values forget faster.
    pub decay: f64,

    /// Noise scale (s) of the logistic perturbation.
    pub noise_scale: f64,

    /// Added to the base-level sum before taking the logarithm.
    pub epsilon: f64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            decay: 0.5,
            noise_scale: 0.25,
            epsilon: ACTIVATION_EPSILON,
        }
    }
}

impl ActivationConfig {
    /// Create a new ActivationConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with custom decay parameter.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Create a config with custom noise scale.
    pub fn with_noise_scale(mut self, scale: f64) -> Self {
        self.noise_scale = scale;
        self
    }

    /// Blending temperature `s * sqrt(2)`.
    pub fn temperature(&self) -> f64 {
        self.noise_scale * std::f64::consts::SQRT_2
    }
}

impl From<&ModelParameters> for ActivationConfig {
    fn from(params: &ModelParameters) -> Self {
        Self {
            decay: params.decay,
            noise_scale: params.noise,
            epsilon: ACTIVATION_EPSILON,
        }
    }
}
