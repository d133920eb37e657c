//! Uniform random search inside the bounds.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use iblpt_core::error::{ErrorCode, IblError, IblResult};
use iblpt_core::simulation::resolve_seed;
use iblpt_core::traits::{
    GenerationCallback, GenerationReport, ObjectiveFn, OptimizationResult, Optimizer,
    OptimizerConfig,
};
use iblpt_core::types::ParameterBounds;

use crate::batch::{argmin, check_bounds, scale, Evaluator};

/// Samples `max_iter` batches of `pop_size * dim` points and keeps the best.
#[derive(Debug, Clone)]
pub struct RandomSearch {
    config: OptimizerConfig,
}

impl RandomSearch {
    pub fn new(config: OptimizerConfig) -> IblResult<Self> {
        if config.max_iter == 0 || config.pop_size == 0 {
            return Err(IblError::validation(
                "max_iter and pop_size must be positive",
            ));
        }
        Ok(Self { config })
    }
}

impl Optimizer for RandomSearch {
    fn minimize(
        &self,
        objective: &dyn ObjectiveFn,
        bounds: &[ParameterBounds],
        mut callback: Option<&mut GenerationCallback<'_>>,
    ) -> IblResult<OptimizationResult> {
        check_bounds(bounds)?;
        let dim = bounds.len();
        let batch = self.config.pop_size * dim;
        let evaluator = Evaluator::new(self.config.workers)?;
        let mut rng = StdRng::seed_from_u64(resolve_seed(self.config.seed));

        let mut best_params = Vec::new();
        let mut best_value = f64::INFINITY;
        let mut evaluations = 0;
        let mut generations = 0;

        for generation in 1..=self.config.max_iter {
            let candidates: Vec<Vec<f64>> = (0..batch)
                .map(|_| {
                    let unit: Vec<f64> = (0..dim).map(|_| rng.gen()).collect();
                    scale(&unit, bounds)
                })
                .collect();
            let values = evaluator.evaluate(objective, &candidates)?;
            evaluations += batch;
            generations = generation;

            let i = argmin(&values);
            if values[i] < best_value || best_params.is_empty() {
                best_value = values[i];
                best_params = candidates[i].clone();
            }

            tracing::info!(generation, best_value, "random search batch");

            if let Some(cb) = callback.as_deref_mut() {
                let report = GenerationReport {
                    generation,
                    best_params: best_params.clone(),
                    best_value,
                    convergence: 0.0,
                };
                if cb(&report) {
                    break;
                }
            }
        }

        if !best_value.is_finite() {
            return Err(IblError::optimization(
                ErrorCode::OptObjectiveFailed,
                "objective produced no finite value",
            ));
        }

        Ok(OptimizationResult {
            best_params,
            best_value,
            generations,
            evaluations,
            converged: false,
        })
    }

    fn name(&self) -> &str {
        "random_search"
    }
}
