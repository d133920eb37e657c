//! Optimizer trait and related types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::IblResult;
use crate::types::ParameterBounds;

/// A scalar objective over a parameter vector.
///
/// Implementations must be pure functions of `params` so optimizers can
/// evaluate candidates concurrently.
pub trait ObjectiveFn: Sync {
    /// Objective value for `params`; lower is better.
    fn evaluate(&self, params: &[f64]) -> IblResult<f64>;
}

impl<F> ObjectiveFn for F
where
    F: Fn(&[f64]) -> IblResult<f64> + Sync,
{
    fn evaluate(&self, params: &[f64]) -> IblResult<f64> {
        self(params)
    }
}

/// Progress handed to the per-generation callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// 1-based generation index.
    pub generation: usize,
    pub best_params: Vec<f64>,
    pub best_value: f64,
    /// Ratio of the convergence threshold to the population spread; reaching
    /// 1.0 means the search has converged.
    pub convergence: f64,
}

/// Per-generation callback. Returning `true` stops the search.
pub type GenerationCallback<'a> = dyn FnMut(&GenerationReport) -> bool + 'a;

/// Outcome of a bounded minimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub best_params: Vec<f64>,
    pub best_value: f64,
    pub generations: usize,
    pub evaluations: usize,
    pub converged: bool,
}

/// Core Optimizer trait - all search providers implement this.
pub trait Optimizer: Send + Sync {
    /// Minimize `objective` inside `bounds`.
    ///
    /// An objective error aborts the search and is returned unchanged.
    fn minimize(
        &self,
        objective: &dyn ObjectiveFn,
        bounds: &[ParameterBounds],
        callback: Option<&mut GenerationCallback<'_>>,
    ) -> IblResult<OptimizationResult>;

    /// Get the optimizer name.
    fn name(&self) -> &str;
}

/// Optimizer provider type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OptimizerProvider {
    #[default]
    DifferentialEvolution,
    RandomSearch,
}

/// Optimizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Provider type.
    pub provider: OptimizerProvider,
    /// Maximum number of generations.
    pub max_iter: usize,
    /// Population size multiplier; the population holds `pop_size * dim` members.
    pub pop_size: usize,
    /// Relative convergence tolerance.
    pub tol: f64,
    /// Absolute convergence tolerance.
    pub atol: f64,
    /// Dithering range for the mutation constant.
    pub mutation: (f64, f64),
    /// Crossover probability.
    pub recombination: f64,
    /// Parallel candidate evaluations: `-1` uses every core, `1` is sequential.
    pub workers: i32,
    /// Seed for the optimizer's own generator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            provider: OptimizerProvider::DifferentialEvolution,
            max_iter: 15,
            pop_size: 8,
            tol: 0.01,
            atol: 0.0,
            mutation: (0.5, 1.0),
            recombination: 0.7,
            workers: -1,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Whether candidates may be evaluated on the rayon pool.
    pub fn parallel(&self) -> bool {
        self.workers != 1
    }
}
