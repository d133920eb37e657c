//! Helpers shared by the optimizers: unit-cube scaling and batch evaluation.

use rayon::prelude::*;

use iblpt_core::error::{ErrorCode, IblError, IblResult};
use iblpt_core::traits::ObjectiveFn;
use iblpt_core::types::ParameterBounds;

/// Map a point of the unit cube onto `bounds`.
pub(crate) fn scale(unit: &[f64], bounds: &[ParameterBounds]) -> Vec<f64> {
    unit.iter()
        .zip(bounds)
        .map(|(u, b)| b.lower + u * b.span())
        .collect()
}

/// Validate bounds, reporting failures as optimizer errors.
pub(crate) fn check_bounds(bounds: &[ParameterBounds]) -> IblResult<()> {
    ParameterBounds::validate_all(bounds)
        .map_err(|e| IblError::optimization(ErrorCode::OptInvalidBounds, e.to_string()))
}

/// Runs candidate batches either inline, on the global rayon pool, or on a
/// dedicated pool with a fixed number of threads.
pub(crate) struct Evaluator {
    pool: Option<rayon::ThreadPool>,
    parallel: bool,
}

impl Evaluator {
    /// `workers`: `1` sequential, `-1` global pool, `n > 1` a pool of `n` threads.
    pub(crate) fn new(workers: i32) -> IblResult<Self> {
        let pool = if workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers as usize)
                .build()
                .map_err(|e| IblError::Internal(format!("failed to build worker pool: {}", e)))?;
            Some(pool)
        } else {
            None
        };
        Ok(Self {
            pool,
            parallel: workers != 1,
        })
    }

    /// Objective values for every candidate (already in parameter space), in order.
    ///
    /// Non-finite values count as `+inf`. The first objective error aborts the batch.
    pub(crate) fn evaluate(
        &self,
        objective: &dyn ObjectiveFn,
        candidates: &[Vec<f64>],
    ) -> IblResult<Vec<f64>> {
        let eval = |x: &Vec<f64>| -> IblResult<f64> {
            let value = objective.evaluate(x)?;
            Ok(if value.is_finite() { value } else { f64::INFINITY })
        };

        if !self.parallel {
            return candidates.iter().map(eval).collect();
        }
        match &self.pool {
            Some(pool) => pool.install(|| candidates.par_iter().map(eval).collect()),
            None => candidates.par_iter().map(eval).collect(),
        }
    }
}

/// Index of the smallest value; the first one wins ties.
pub(crate) fn argmin(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v < values[best] {
            best = i;
        }
    }
    best
}
