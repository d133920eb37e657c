//! Trial simulator: Monte Carlo replicates of agents over a problem set,
//! aggregated into per-trial R-rate and A-rate series.
//!
//! Each replicate owns a `StdRng` seeded from `(base_seed, problem, replicate)`.
//! Replicates may run on rayon; aggregation always walks them in
//! (problem, replicate) order, so parallel and sequential runs agree bit for bit.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::seed::{replicate_seed, resolve_seed};
use crate::agent::Agent;
use crate::error::{ErrorCode, IblError, IblResult};
use crate::types::{Choice, GambleProblem, ModelParameters, ModelVariant, RateSeries};

/// Settings for one `eval_ts` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Trials per replicate (`N`).
    pub trials: usize,
    /// Replicates per problem.
    pub agents: usize,
    /// Base seed; drawn from OS entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Run replicates on the rayon pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            agents: 5,
            seed: None,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    pub fn new(trials: usize, agents: usize) -> Self {
        Self {
            trials,
            agents,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Reject zero trial or replicate counts.
    ///
    /// The trial index runs to `trials + 1`, so `trials` must stay below `u32::MAX`.
    pub fn validate(&self) -> IblResult<()> {
        if self.trials == 0 {
            return Err(IblError::validation("trial count N must be positive"));
        }
        if self.trials >= u32::MAX as usize {
            return Err(IblError::validation(format!(
                "trial count N must be below {}",
                u32::MAX
            )));
        }
        if self.agents == 0 {
            return Err(IblError::validation("agent count must be positive"));
        }
        Ok(())
    }
}

/// Simulate `dataset` under a raw parameter vector.
///
/// Validates everything up front (non-empty dataset, parameter arity and ranges
/// for `variant`, positive `trials` and `agents`); nothing is simulated when a
/// check fails.
pub fn eval_ts(
    dataset: &[GambleProblem],
    params: &[f64],
    variant: ModelVariant,
    config: &SimulationConfig,
) -> IblResult<RateSeries> {
    let params = ModelParameters::from_vector(params, variant)?;
    simulate(dataset, &params, config)
}

/// Simulate `dataset` under already-validated parameters.
pub fn simulate(
    dataset: &[GambleProblem],
    params: &ModelParameters,
    config: &SimulationConfig,
) -> IblResult<RateSeries> {
    if dataset.is_empty() {
        return Err(IblError::validation_code(
            ErrorCode::ValEmptyDataset,
            "dataset contains no problems",
        ));
    }
    config.validate()?;

    let base_seed = resolve_seed(config.seed);
    tracing::debug!(
        problems = dataset.len(),
        trials = config.trials,
        agents = config.agents,
        seed = base_seed,
        parallel = config.parallel,
        "evaluating trial series"
    );

    let agents = config.agents;
    let run = |k: usize| {
        let (problem_index, replicate) = (k / agents, k % agents);
        let seed = replicate_seed(base_seed, problem_index, replicate);
        run_replicate(&dataset[problem_index], params, config.trials, seed)
    };

    let units = dataset.len() * agents;
    let runs: Vec<IblResult<Vec<Choice>>> = if config.parallel {
        (0..units).into_par_iter().map(run).collect()
    } else {
        (0..units).map(run).collect()
    };

    aggregate(dataset, runs, config.trials, agents)
}

/// Play one replicate of `problem` with a fresh agent and its own generator.
pub fn run_replicate(
    problem: &GambleProblem,
    params: &ModelParameters,
    trials: usize,
    seed: u64,
) -> IblResult<Vec<Choice>> {
    let mut rng = StdRng::seed_from_u64(seed);
    Agent::new(*params).run_n(problem, trials, &mut rng)
}

/// Risky indicator per trial: 1 when the choice was Risky.
pub fn risky_indicators(choices: &[Choice]) -> impl Iterator<Item = f64> + '_ {
    choices
        .iter()
        .map(|c| if c.is_risky() { 1.0 } else { 0.0 })
}

/// Alternation indicator per trial: 0 on the first trial, then 1 whenever the
/// choice differs from the previous one.
pub fn alternation_indicators(choices: &[Choice]) -> impl Iterator<Item = f64> + '_ {
    let first = choices.first().map(|_| 0.0);
    first.into_iter().chain(
        choices
            .windows(2)
            .map(|pair| if pair[0] != pair[1] { 1.0 } else { 0.0 }),
    )
}

fn aggregate(
    dataset: &[GambleProblem],
    runs: Vec<IblResult<Vec<Choice>>>,
    trials: usize,
    agents: usize,
) -> IblResult<RateSeries> {
    let mut r_total = vec![0.0; trials];
    let mut a_total = vec![0.0; trials];
    let mut r_problem = vec![0.0; trials];
    let mut a_problem = vec![0.0; trials];

    let mut runs = runs.into_iter();
    for (problem_index, problem) in dataset.iter().enumerate() {
        r_problem.iter_mut().for_each(|v| *v = 0.0);
        a_problem.iter_mut().for_each(|v| *v = 0.0);

        for replicate in 0..agents {
            let choices = runs
                .next()
                .ok_or_else(|| IblError::Internal("missing replicate result".to_string()))?
                .map_err(|e| IblError::simulation(problem_index, problem.id, replicate, e))?;

            for (acc, r) in r_problem.iter_mut().zip(risky_indicators(&choices)) {
                *acc += r;
            }
            for (acc, a) in a_problem.iter_mut().zip(alternation_indicators(&choices)) {
                *acc += a;
            }
        }

        for t in 0..trials {
            r_total[t] += r_problem[t] / agents as f64;
            a_total[t] += a_problem[t] / agents as f64;
        }
    }

    let problems = dataset.len() as f64;
    r_total.iter_mut().for_each(|v| *v /= problems);
    a_total.iter_mut().for_each(|v| *v /= problems);

    Ok(RateSeries::new(r_total, a_total))
}
