//! Differential evolution (`best1bin`) over a box-bounded domain.
//!
//! The population lives in the unit cube and is scaled onto the bounds only
//! for evaluation. Each generation:
//!
//! 1. draws one mutation factor `F` uniformly from the dither range;
//! 2. builds a trial per member: `best + F * (x_r0 - x_r1)`, binomial crossover
//!    with the member, at least one coordinate taken from the mutant;
//! 3. resamples any trial coordinate that left the cube;
//! 4. evaluates every trial (in parallel when allowed), then replaces members
//!    whose trial scored strictly lower.
//!
//! The search stops after `max_iter` generations, when
//! `std(energies) <= atol + tol * |mean(energies)|`, or when the callback asks.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use iblpt_core::error::{ErrorCode, IblError, IblResult};
use iblpt_core::simulation::resolve_seed;
use iblpt_core::traits::{
    GenerationCallback, GenerationReport, ObjectiveFn, OptimizationResult, Optimizer,
    OptimizerConfig,
};
use iblpt_core::types::ParameterBounds;

use crate::batch::{argmin, check_bounds, scale, Evaluator};

/// Smallest population `best1bin` can work with.
const MIN_POPULATION: usize = 5;

/// Differential evolution optimizer.
#[derive(Debug, Clone)]
pub struct DifferentialEvolution {
    config: OptimizerConfig,
}

impl DifferentialEvolution {
    /// Create an optimizer, checking the strategy settings.
    pub fn new(config: OptimizerConfig) -> IblResult<Self> {
        if config.max_iter == 0 || config.pop_size == 0 {
            return Err(IblError::validation(
                "max_iter and pop_size must be positive",
            ));
        }
        let (lo, hi) = config.mutation;
        if !(0.0..=2.0).contains(&lo) || !(0.0..=2.0).contains(&hi) || lo > hi {
            return Err(IblError::validation(format!(
                "mutation must be an ordered pair in [0, 2], got ({}, {})",
                lo, hi
            )));
        }
        if !(0.0..=1.0).contains(&config.recombination) {
            return Err(IblError::validation(format!(
                "recombination must lie in [0, 1], got {}",
                config.recombination
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn population_size(&self, dim: usize) -> usize {
        (self.config.pop_size * dim).max(MIN_POPULATION)
    }

    fn mutation_factor<R: Rng>(&self, rng: &mut R) -> f64 {
        let (lo, hi) = self.config.mutation;
        if hi > lo {
            rng.gen_range(lo..hi)
        } else {
            lo
        }
    }

    fn converged(&self, energies: &[f64]) -> (bool, f64) {
        let n = energies.len() as f64;
        let mean = energies.iter().sum::<f64>() / n;
        let std = (energies.iter().map(|e| (e - mean).powi(2)).sum::<f64>() / n).sqrt();
        let threshold = self.config.atol + self.config.tol * mean.abs();
        if !std.is_finite() {
            return (false, 0.0);
        }
        (std <= threshold, threshold / (std + f64::EPSILON))
    }

    fn trial<R: Rng>(
        &self,
        population: &[Vec<f64>],
        best: usize,
        member: usize,
        factor: f64,
        rng: &mut R,
    ) -> Vec<f64> {
        let dim = population[member].len();
        let (r0, r1) = pick_two(population.len(), member, rng);
        let fill_point = rng.gen_range(0..dim);

        let mut trial = population[member].clone();
        for j in 0..dim {
            if j == fill_point || rng.gen::<f64>() < self.config.recombination {
                trial[j] = population[best][j] + factor * (population[r0][j] - population[r1][j]);
            }
        }
        for x in trial.iter_mut() {
            if !(0.0..=1.0).contains(x) {
                *x = rng.gen();
            }
        }
        trial
    }
}

/// Two distinct member indices, both different from `exclude`.
fn pick_two<R: Rng>(n: usize, exclude: usize, rng: &mut R) -> (usize, usize) {
    let picks = rand::seq::index::sample(rng, n - 1, 2);
    let shift = |k: usize| if k >= exclude { k + 1 } else { k };
    (shift(picks.index(0)), shift(picks.index(1)))
}

/// Latin hypercube sample of `n` points in the `dim`-dimensional unit cube.
pub(crate) fn latin_hypercube<R: Rng>(n: usize, dim: usize, rng: &mut R) -> Vec<Vec<f64>> {
    let segment = 1.0 / n as f64;
    let mut points = vec![vec![0.0; dim]; n];
    for j in 0..dim {
        let mut column: Vec<f64> = (0..n)
            .map(|i| (i as f64 + rng.gen::<f64>()) * segment)
            .collect();
        column.shuffle(rng);
        for (point, value) in points.iter_mut().zip(column) {
            point[j] = value;
        }
    }
    points
}

impl Optimizer for DifferentialEvolution {
    fn minimize(
        &self,
        objective: &dyn ObjectiveFn,
        bounds: &[ParameterBounds],
        mut callback: Option<&mut GenerationCallback<'_>>,
    ) -> IblResult<OptimizationResult> {
        check_bounds(bounds)?;
        let dim = bounds.len();
        let size = self.population_size(dim);
        let evaluator = Evaluator::new(self.config.workers)?;
        let seed = resolve_seed(self.config.seed);
        let mut rng = StdRng::seed_from_u64(seed);

        tracing::debug!(dim, population = size, seed, "starting differential evolution");

        let mut population = latin_hypercube(size, dim, &mut rng);
        let scaled: Vec<Vec<f64>> = population.iter().map(|p| scale(p, bounds)).collect();
        let mut energies = evaluator.evaluate(objective, &scaled)?;
        let mut evaluations = size;

        let mut best = argmin(&energies);
        population.swap(0, best);
        energies.swap(0, best);
        best = 0;

        let mut generations = 0;
        let mut converged = false;

        for generation in 1..=self.config.max_iter {
            let factor = self.mutation_factor(&mut rng);
            let trials: Vec<Vec<f64>> = (0..size)
                .map(|i| self.trial(&population, best, i, factor, &mut rng))
                .collect();
            let scaled: Vec<Vec<f64>> = trials.iter().map(|t| scale(t, bounds)).collect();
            let trial_energies = evaluator.evaluate(objective, &scaled)?;
            evaluations += size;

            for (i, (trial, energy)) in trials.into_iter().zip(trial_energies).enumerate() {
                if energy < energies[i] {
                    population[i] = trial;
                    energies[i] = energy;
                }
            }

            best = argmin(&energies);
            population.swap(0, best);
            energies.swap(0, best);
            best = 0;
            generations = generation;

            let (done, convergence) = self.converged(&energies);
            converged = done;
            let best_params = scale(&population[best], bounds);

            tracing::info!(
                generation,
                best_value = energies[best],
                convergence,
                params = ?best_params,
                "differential evolution generation"
            );

            if let Some(cb) = callback.as_deref_mut() {
                let report = GenerationReport {
                    generation,
                    best_params,
                    best_value: energies[best],
                    convergence,
                };
                if cb(&report) {
                    tracing::info!(generation, "search stopped by callback");
                    break;
                }
            }
            if converged {
                break;
            }
        }

        if !energies[best].is_finite() {
            return Err(IblError::optimization(
                ErrorCode::OptObjectiveFailed,
                "objective produced no finite value",
            ));
        }

        Ok(OptimizationResult {
            best_params: scale(&population[best], bounds),
            best_value: energies[best],
            generations,
            evaluations,
            converged,
        })
    }

    fn name(&self) -> &str {
        "differential_evolution"
    }
}
