//! Integration tests for the optimizers.
//!
//! Uses a mocked objective to check evaluation budgets and error handling,
//! then fits a small IBL problem end to end.

use iblpt_core::error::{ErrorCode, IblError, IblResult};
use iblpt_core::{
    eval_ts, fit_model, GambleProblem, IblptConfig, ModelVariant, ObjectiveFn, OptimizerConfig,
    OptimizerProvider, ParameterBounds, SimulationConfig,
};
use iblpt_optimize::{DifferentialEvolution, GenerationReport, Optimizer, OptimizerFactory};
use mockall::mock;

mock! {
    pub Objective {}
    impl ObjectiveFn for Objective {
        fn evaluate(&self, params: &[f64]) -> IblResult<f64>;
    }
}

fn bounds() -> Vec<ParameterBounds> {
    vec![ParameterBounds::new(0.0, 1.0), ParameterBounds::new(-2.0, 2.0)]
}

fn sequential(provider: OptimizerProvider) -> OptimizerConfig {
    OptimizerConfig {
        provider,
        max_iter: 3,
        pop_size: 3,
        tol: 0.0,
        atol: 0.0,
        workers: 1,
        seed: Some(21),
        ..Default::default()
    }
}

#[test]
fn test_de_evaluation_budget() {
    let mut objective = MockObjective::new();
    // Population 6: one initial batch plus three generations.
    objective
        .expect_evaluate()
        .withf(|p| {
            p.len() == 2 && (0.0..=1.0).contains(&p[0]) && (-2.0..=2.0).contains(&p[1])
        })
        .times(24)
        .returning(|p| Ok(p[0] + p[1] * p[1]));

    let optimizer =
        OptimizerFactory::create(&sequential(OptimizerProvider::DifferentialEvolution)).unwrap();
    let result = optimizer.minimize(&objective, &bounds(), None).unwrap();
    assert_eq!(result.evaluations, 24);
    assert_eq!(result.generations, 3);
    assert!(!result.converged);
}

#[test]
fn test_random_search_evaluation_budget() {
    let mut objective = MockObjective::new();
    objective
        .expect_evaluate()
        .times(18)
        .returning(|p| Ok(p.iter().sum()));

    let optimizer =
        OptimizerFactory::create(&sequential(OptimizerProvider::RandomSearch)).unwrap();
    let result = optimizer.minimize(&objective, &bounds(), None).unwrap();
    assert_eq!(result.evaluations, 18);
}

#[test]
fn test_objective_error_aborts_search() {
    let mut objective = MockObjective::new();
    objective
        .expect_evaluate()
        .times(1)
        .returning(|_| Err(IblError::validation("bad candidate")));

    let optimizer =
        DifferentialEvolution::new(sequential(OptimizerProvider::DifferentialEvolution)).unwrap();
    let err = optimizer.minimize(&objective, &bounds(), None).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_invalid_bounds_never_evaluate() {
    let mut objective = MockObjective::new();
    objective.expect_evaluate().never();

    let optimizer = OptimizerFactory::differential_evolution().unwrap();
    let err = optimizer
        .minimize(&objective, &[ParameterBounds::new(1.0, -1.0)], None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OptInvalidBounds);
}

/// Fit IBL to series simulated from known parameters.
#[test]
fn test_fit_recovers_a_good_objective() {
    let dataset = vec![
        GambleProblem::new(40.0, 0.5, 20.0, 30.0).with_id(1),
        GambleProblem::new(10.0, 0.1, 0.0, 1.5).with_id(2),
        GambleProblem::new(-1.0, 0.9, -20.0, -2.5).with_id(3),
    ];
    let target = SimulationConfig::new(20, 20).with_seed(99);
    let human = eval_ts(&dataset, &[0.5, 0.3, 0.2], ModelVariant::Ibl, &target).unwrap();

    let config = IblptConfig::builder()
        .trials(20)
        .agents(4)
        .seed(1)
        .optimizer(OptimizerConfig {
            max_iter: 4,
            pop_size: 4,
            seed: Some(2),
            ..Default::default()
        })
        .build();
    let optimizer = OptimizerFactory::create(&config.optimizer).unwrap();

    let mut generations = Vec::new();
    let mut callback = |report: &GenerationReport| {
        generations.push(report.best_value);
        false
    };
    let outcome = fit_model(
        ModelVariant::Ibl,
        &dataset,
        &human,
        &config,
        optimizer.as_ref(),
        Some(&mut callback),
    )
    .unwrap();
    let result = outcome.result;

    assert_eq!(outcome.simulation_seed, 1);
    assert!(result.best_value.is_finite());
    assert!(result.generations <= 4);
    assert_eq!(generations.len(), result.generations);
    assert!(generations.windows(2).all(|w| w[1] <= w[0]));
    for (x, b) in result.best_params.iter().zip(&config.bounds.ibl) {
        assert!(b.contains(*x), "{} outside {:?}", x, b);
    }
}
