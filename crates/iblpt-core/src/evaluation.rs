//! Model fitting and evaluation summaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::IblptConfig;
use crate::error::IblResult;
use crate::metrics::{score_series, SeriesScore};
use crate::objective::Objective;
use crate::simulation::{eval_ts, SimulationConfig};
use crate::traits::{GenerationCallback, OptimizationResult, Optimizer};
use crate::types::{GambleProblem, HumanReference, ModelVariant, ParameterBounds, RateSeries};

/// Scores of both series of one problem set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetScores {
    pub r_rate: SeriesScore,
    pub a_rate: SeriesScore,
}

impl SetScores {
    /// Score `series` against `human` for a model with `k` parameters.
    pub fn score(series: &RateSeries, human: &RateSeries, k: usize) -> IblResult<Self> {
        Ok(Self {
            r_rate: score_series(&series.r_rate, &human.r_rate, k)?,
            a_rate: score_series(&series.a_rate, &human.a_rate, k)?,
        })
    }
}

/// Fit quality of one parameter vector on the estimation and competition sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub label: String,
    pub variant: ModelVariant,
    pub params: Vec<f64>,
    pub estimation: SetScores,
    pub competition: SetScores,
}

/// Simulate both problem sets under `params` and score them against the human
/// reference.
pub fn summarize(
    label: impl Into<String>,
    variant: ModelVariant,
    params: &[f64],
    estimation: &[GambleProblem],
    competition: &[GambleProblem],
    human: &HumanReference,
    simulation: &SimulationConfig,
) -> IblResult<ModelSummary> {
    let label = label.into();
    let k = variant.param_count();

    let est = eval_ts(estimation, params, variant, simulation)?;
    let cmp = eval_ts(competition, params, variant, simulation)?;

    let summary = ModelSummary {
        estimation: SetScores::score(&est, &human.estimation, k)?,
        competition: SetScores::score(&cmp, &human.competition, k)?,
        label,
        variant,
        params: params.to_vec(),
    };
    tracing::debug!(
        label = %summary.label,
        est_r_msd = summary.estimation.r_rate.msd,
        cmp_r_msd = summary.competition.r_rate.msd,
        "model summarized"
    );
    Ok(summary)
}

fn write_score(f: &mut fmt::Formatter<'_>, name: &str, score: &SeriesScore) -> fmt::Result {
    write!(f, "{} → MSD={:.4}, Corr=", name, score.msd)?;
    match score.corr {
        Some(c) => write!(f, "{:.3}", c)?,
        None => write!(f, "n/a")?,
    }
    writeln!(f, ", AIC={:.1}", score.aic)
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|p| format!("{:.6}", p)).collect();
        writeln!(f, "{} [{}]", self.label, params.join(", "))?;
        write_score(f, "Est R", &self.estimation.r_rate)?;
        write_score(f, "Est A", &self.estimation.a_rate)?;
        write_score(f, "Cmp R", &self.competition.r_rate)?;
        write_score(f, "Cmp A", &self.competition.a_rate)
    }
}

/// Result of [`fit_model`]: the optimizer's answer and the simulation seed
/// every objective evaluation used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    pub result: OptimizationResult,
    /// Base seed of the fitted objective. Drawn from OS entropy when the
    /// config has none; pass it back in to replay the fit.
    pub simulation_seed: u64,
}

impl FitOutcome {
    /// `simulation` with its seed pinned to the one the fit used.
    pub fn replay_config(&self, simulation: &SimulationConfig) -> SimulationConfig {
        simulation.clone().with_seed(self.simulation_seed)
    }
}

/// Fit `variant` to `human` on `dataset` with `optimizer`.
///
/// Bounds, objective weight and simulation settings come from `config`.
pub fn fit_model(
    variant: ModelVariant,
    dataset: &[GambleProblem],
    human: &RateSeries,
    config: &IblptConfig,
    optimizer: &dyn Optimizer,
    callback: Option<&mut GenerationCallback<'_>>,
) -> IblResult<FitOutcome> {
    let bounds = config.bounds.for_variant(variant);
    ParameterBounds::validate_all(&bounds)?;

    let objective = Objective::new(
        dataset,
        human,
        variant,
        &config.simulation.simulation_config(),
        config.metrics.r_weight(variant),
    )?;
    let simulation_seed = objective.simulation().seed.unwrap_or_default();

    tracing::info!(
        model = variant.label(),
        optimizer = optimizer.name(),
        problems = dataset.len(),
        dimensions = bounds.len(),
        r_weight = objective.r_weight(),
        simulation_seed,
        "fitting model"
    );

    let result = optimizer.minimize(&objective, &bounds, callback)?;

    tracing::info!(
        best_value = result.best_value,
        generations = result.generations,
        evaluations = result.evaluations,
        converged = result.converged,
        "fit finished"
    );
    Ok(FitOutcome {
        result,
        simulation_seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{GenerationReport, ObjectiveFn};

    /// Evaluates the centre of the box and reports one generation.
    struct CentreOptimizer;

    impl Optimizer for CentreOptimizer {
        fn minimize(
            &self,
            objective: &dyn ObjectiveFn,
            bounds: &[ParameterBounds],
            callback: Option<&mut GenerationCallback<'_>>,
        ) -> IblResult<OptimizationResult> {
            let centre: Vec<f64> = bounds.iter().map(|b| b.lower + b.span() / 2.0).collect();
            let value = objective.evaluate(&centre)?;
            if let Some(cb) = callback {
                cb(&GenerationReport {
                    generation: 1,
                    best_params: centre.clone(),
                    best_value: value,
                    convergence: 1.0,
                });
            }
            Ok(OptimizationResult {
                best_params: centre,
                best_value: value,
                generations: 1,
                evaluations: 1,
                converged: true,
            })
        }

        fn name(&self) -> &str {
            "centre"
        }
    }

    fn dataset() -> Vec<GambleProblem> {
        vec![
            GambleProblem::new(40.0, 0.5, 20.0, 30.0).with_id(1),
            GambleProblem::new(-5.0, 0.9, -20.0, -6.0).with_id(2),
        ]
    }

    fn small_config() -> IblptConfig {
        IblptConfig::builder().trials(12).agents(3).seed(5).build()
    }

    #[test]
    fn test_fit_model_uses_variant_bounds() {
        let dataset = dataset();
        let human = RateSeries::new(vec![0.5; 12], vec![0.3; 12]);
        let mut reports = Vec::new();
        let mut callback = |r: &GenerationReport| {
            reports.push(r.generation);
            false
        };

        let outcome = fit_model(
            ModelVariant::Pt,
            &dataset,
            &human,
            &small_config(),
            &CentreOptimizer,
            Some(&mut callback),
        )
        .unwrap();
        let result = &outcome.result;

        assert_eq!(outcome.simulation_seed, 5);
        assert_eq!(result.best_params.len(), 6);
        assert!((result.best_params[0] - 5.005).abs() < 1e-12);
        assert!(result.best_value >= 0.0);
        assert_eq!(reports, vec![1]);
    }

    #[test]
    fn test_fit_model_rejects_mismatched_human() {
        let dataset = dataset();
        let human = RateSeries::new(vec![0.5; 5], vec![0.3; 5]);
        let result = fit_model(
            ModelVariant::Ibl,
            &dataset,
            &human,
            &small_config(),
            &CentreOptimizer,
            None,
        );
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_unseeded_fit_reports_a_replayable_seed() {
        let dataset = dataset();
        let human = RateSeries::new(vec![0.5; 12], vec![0.3; 12]);
        let config = IblptConfig::builder().trials(12).agents(3).build();
        assert!(config.simulation.seed.is_none());

        let outcome =
            fit_model(ModelVariant::Ibl, &dataset, &human, &config, &CentreOptimizer, None)
                .unwrap();

        let replay = outcome.replay_config(&config.simulation.simulation_config());
        assert_eq!(replay.seed, Some(outcome.simulation_seed));
        let r_weight = config.metrics.r_weight(ModelVariant::Ibl);
        let objective =
            Objective::new(&dataset, &human, ModelVariant::Ibl, &replay, r_weight).unwrap();
        let value = objective.value(&outcome.result.best_params).unwrap();
        assert_eq!(value, outcome.result.best_value);
    }

    #[test]
    fn test_summary_display() {
        let dataset = dataset();
        let series = RateSeries::new(vec![0.5; 12], vec![0.3; 12]);
        let human = HumanReference::new(series.clone(), series);
        let sim = SimulationConfig::new(12, 3).with_seed(9);

        let summary = summarize(
            "IBL (test)",
            ModelVariant::Ibl,
            &[1.0, 0.5, 0.1],
            &dataset,
            &dataset,
            &human,
            &sim,
        )
        .unwrap();

        let text = summary.to_string();
        for line in ["Est R →", "Est A →", "Cmp R →", "Cmp A →"] {
            assert!(text.contains(line), "{}", text);
        }
        // Constant human series: correlation is undefined.
        assert!(text.contains("Corr=n/a"));
        assert_eq!(summary.estimation, summary.competition);
    }
}
