//! Integration tests: load files from disk and feed them to the simulator.

use iblpt_core::traits::{GenerationCallback, OptimizationResult, Optimizer};
use iblpt_core::{
    fit_model, summarize, IblResult, IblptConfig, ModelVariant, Objective, ObjectiveFn,
    ParameterBounds, SimulationConfig, DEFAULT_IBL_PARAMS,
};
use iblpt_data::{load_dataset, load_human_reference, load_params, save_params, FitRecord};
use std::io::Write;

const DATASET: &str = "\
1 2.0 0.1 -0.3 -0.1 0 1 0
2 -8.7 0.06 -22.8 -21.4 0 1 1
3 18.8 0.97 6.9 18.1 0 1 1
";

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn human_toml(trials: usize) -> String {
    let r: Vec<String> = (0..trials).map(|t| format!("{:.3}", 0.4 + 0.002 * t as f64)).collect();
    let a: Vec<String> = (0..trials)
        .map(|t| if t == 0 { "0.0".to_string() } else { "0.25".to_string() })
        .collect();
    let block = format!("r_rate = [{}]\na_rate = [{}]\n", r.join(", "), a.join(", "));
    format!("[estimation]\n{block}\n[competition]\n{block}")
}

#[test]
fn test_loaded_files_drive_a_summary() {
    let dir = tempfile::tempdir().unwrap();
    let dataset_path = write_file(&dir, "est.dat", DATASET);
    let human_path = write_file(&dir, "human.toml", &human_toml(30));

    let dataset = load_dataset(&dataset_path).unwrap();
    let human = load_human_reference(&human_path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset[2].id, 3);
    assert_eq!(human.estimation.len(), 30);

    let summary = summarize(
        "IBL (default)",
        ModelVariant::Ibl,
        &DEFAULT_IBL_PARAMS,
        &dataset,
        &dataset,
        &human,
        &SimulationConfig::new(30, 4).with_seed(10),
    )
    .unwrap();
    assert!(summary.estimation.r_rate.msd >= 0.0);
    assert!(summary.estimation.r_rate.corr.is_some());
    // The human A-rate is constant after the first trial, but not overall.
    assert!(summary.estimation.a_rate.corr.is_some());
}

#[test]
fn test_saved_params_round_trip_through_cli_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fit_ibl.txt");
    save_params(&path, &DEFAULT_IBL_PARAMS).unwrap();
    let loaded = load_params(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, DEFAULT_IBL_PARAMS.to_vec());
}

#[test]
fn test_missing_dataset_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dataset(dir.path().join("missing.dat")).unwrap_err();
    assert!(matches!(err, iblpt_core::IblError::Io(_)));
}

/// Scores the lower corner of the box once.
struct CornerOptimizer;

impl Optimizer for CornerOptimizer {
    fn minimize(
        &self,
        objective: &dyn ObjectiveFn,
        bounds: &[ParameterBounds],
        _callback: Option<&mut GenerationCallback<'_>>,
    ) -> IblResult<OptimizationResult> {
        let corner: Vec<f64> = bounds.iter().map(|b| b.lower + 0.1 * b.span()).collect();
        let value = objective.evaluate(&corner)?;
        Ok(OptimizationResult {
            best_params: corner,
            best_value: value,
            generations: 1,
            evaluations: 1,
            converged: true,
        })
    }

    fn name(&self) -> &str {
        "corner"
    }
}

#[test]
fn test_unseeded_fit_record_keeps_the_simulation_seed() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = load_dataset(write_file(&dir, "est.dat", DATASET)).unwrap();
    let human = load_human_reference(write_file(&dir, "human.toml", &human_toml(15))).unwrap();
    let config = IblptConfig::builder().trials(15).agents(3).build();
    assert_eq!(config.simulation.seed, None);

    let outcome = fit_model(
        ModelVariant::Ibl,
        &dataset,
        &human.estimation,
        &config,
        &CornerOptimizer,
        None,
    )
    .unwrap();

    let path = dir.path().join("fit_ibl.json");
    FitRecord::from_outcome(ModelVariant::Ibl, "corner", &outcome)
        .save(&path)
        .unwrap();
    let record = FitRecord::load(&path).unwrap();
    let seed = record.simulation_seed.expect("seed recorded");
    assert_eq!(seed, outcome.simulation_seed);

    // The recorded seed reproduces the fitted objective value.
    let replay = config.simulation.simulation_config().with_seed(seed);
    let objective = Objective::new(
        &dataset,
        &human.estimation,
        ModelVariant::Ibl,
        &replay,
        config.metrics.r_weight(ModelVariant::Ibl),
    )
    .unwrap();
    assert_eq!(objective.value(&record.params).unwrap(), record.objective);
}
