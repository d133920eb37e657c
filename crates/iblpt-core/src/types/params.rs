//! Model variants, agent parameters, and search bounds.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{IblError, IblResult};
use crate::valuation::Valuation;

/// Default IBL parameters `(d, s, p)`.
pub const DEFAULT_IBL_PARAMS: [f64; 3] = [5.27, 1.46, 0.09];

/// IBL parameters found by an earlier fit on the estimation set.
pub const FITTED_IBL_PARAMS: [f64; 3] = [4.59856917, 0.04554824, 0.01635943];

/// Which cognitive model to simulate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelVariant {
    /// Instance-based learning with raw outcomes.
    #[default]
    Ibl,
    /// Instance-based learning over prospect-theory utilities.
    Pt,
}

impl ModelVariant {
    /// Number of free parameters (the `k` of the AIC score).
    pub fn param_count(self) -> usize {
        match self {
            ModelVariant::Ibl => 3,
            ModelVariant::Pt => 6,
        }
    }

    /// Default search bounds for this variant.
    pub fn default_bounds(self) -> Vec<ParameterBounds> {
        let mut bounds = ParameterBounds::ibl_defaults();
        if self == ModelVariant::Pt {
            bounds.extend(ParameterBounds::pt_extra_defaults());
        }
        bounds
    }

    /// Human-readable label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            ModelVariant::Ibl => "IBL",
            ModelVariant::Pt => "PT-IBL",
        }
    }
}

/// Inclusive lower/upper bound for one search dimension.
///
/// Serialized as a `[lower, upper]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ParameterBounds {
    pub lower: f64,
    pub upper: f64,
}

impl From<(f64, f64)> for ParameterBounds {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self { lower, upper }
    }
}

impl From<ParameterBounds> for (f64, f64) {
    fn from(bounds: ParameterBounds) -> Self {
        (bounds.lower, bounds.upper)
    }
}

impl ParameterBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Width of the interval.
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies inside the bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Bounds for `(d, s, p)`.
    pub fn ibl_defaults() -> Vec<ParameterBounds> {
        vec![
            ParameterBounds::new(0.01, 10.0),
            ParameterBounds::new(0.01, 10.0),
            ParameterBounds::new(0.0, 1.0),
        ]
    }

    /// Bounds for `(alpha, beta, lambda)`.
    pub fn pt_extra_defaults() -> Vec<ParameterBounds> {
        vec![
            ParameterBounds::new(0.2, 1.0),
            ParameterBounds::new(0.2, 1.0),
            ParameterBounds::new(0.1, 5.0),
        ]
    }

    /// Check that every interval is finite and non-inverted.
    pub fn validate_all(bounds: &[ParameterBounds]) -> IblResult<()> {
        if bounds.is_empty() {
            return Err(IblError::validation("search bounds are empty"));
        }
        for (i, b) in bounds.iter().enumerate() {
            if !b.lower.is_finite() || !b.upper.is_finite() || b.lower > b.upper {
                return Err(IblError::validation(format!(
                    "bounds for dimension {} are invalid: ({}, {})",
                    i, b.lower, b.upper
                )));
            }
        }
        Ok(())
    }
}

/// Validated parameters for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Decay exponent `d`.
    pub decay: f64,
    /// Noise scale `s`.
    pub noise: f64,
    /// Inertia probability `p`.
    pub inertia: f64,
    /// How outcomes are valued before blending.
    pub valuation: Valuation,
}

impl ModelParameters {
    /// IBL parameters.
    pub fn ibl(decay: f64, noise: f64, inertia: f64) -> IblResult<Self> {
        Self::from_vector(&[decay, noise, inertia], ModelVariant::Ibl)
    }

    /// PT-IBL parameters.
    pub fn pt(
        decay: f64,
        noise: f64,
        inertia: f64,
        alpha: f64,
        beta: f64,
        lambda: f64,
    ) -> IblResult<Self> {
        Self::from_vector(&[decay, noise, inertia, alpha, beta, lambda], ModelVariant::Pt)
    }

    /// Build parameters from an ordered vector, checking arity and ranges.
    ///
    /// IBL takes exactly `(d, s, p)`. PT-IBL takes `(d, s, p, alpha, beta, lambda)`;
    /// values after the sixth are ignored.
    pub fn from_vector(values: &[f64], variant: ModelVariant) -> IblResult<Self> {
        match variant {
            ModelVariant::Ibl if values.len() != 3 => {
                return Err(IblError::parameter_arity("ibl", "exactly 3", values.len()));
            }
            ModelVariant::Pt if values.len() < 6 => {
                return Err(IblError::parameter_arity("pt", "at least 6", values.len()));
            }
            ModelVariant::Pt if values.len() > 6 => {
                tracing::warn!(
                    received = values.len(),
                    "ignoring parameters after the sixth for the pt model"
                );
            }
            _ => {}
        }

        const NAMES: [&str; 6] = ["d", "s", "p", "alpha", "beta", "lambda"];
        for (name, value) in NAMES.iter().zip(values) {
            if !value.is_finite() {
                return Err(IblError::parameter_range(name, *value, "finite"));
            }
        }

        let (decay, noise, inertia) = (values[0], values[1], values[2]);
        if decay <= 0.0 {
            return Err(IblError::parameter_range("d", decay, "d > 0"));
        }
        if noise <= 0.0 {
            return Err(IblError::parameter_range("s", noise, "s > 0"));
        }
        if !(0.0..=1.0).contains(&inertia) {
            return Err(IblError::parameter_range("p", inertia, "0 <= p <= 1"));
        }

        let valuation = match variant {
            ModelVariant::Ibl => Valuation::Identity,
            ModelVariant::Pt => {
                let (alpha, beta, lambda) = (values[3], values[4], values[5]);
                if alpha <= 0.0 {
                    return Err(IblError::parameter_range("alpha", alpha, "alpha > 0"));
                }
                if beta <= 0.0 {
                    return Err(IblError::parameter_range("beta", beta, "beta > 0"));
                }
                if lambda < 0.0 {
                    return Err(IblError::parameter_range("lambda", lambda, "lambda >= 0"));
                }
                Valuation::ProspectTheory {
                    alpha,
                    beta,
                    lambda,
                }
            }
        };

        Ok(Self {
            decay,
            noise,
            inertia,
            valuation,
        })
    }

    /// Blending temperature `tau = s * sqrt(2)`.
    pub fn temperature(&self) -> f64 {
        self.noise * std::f64::consts::SQRT_2
    }

    /// The variant these parameters belong to.
    pub fn variant(&self) -> ModelVariant {
        match self.valuation {
            Valuation::Identity => ModelVariant::Ibl,
            Valuation::ProspectTheory { .. } => ModelVariant::Pt,
        }
    }

    /// Flatten back to the ordered vector form.
    pub fn to_vector(&self) -> Vec<f64> {
        let mut values = vec![self.decay, self.noise, self.inertia];
        if let Valuation::ProspectTheory {
            alpha,
            beta,
            lambda,
        } = self.valuation
        {
            values.extend([alpha, beta, lambda]);
        }
        values
    }
}
