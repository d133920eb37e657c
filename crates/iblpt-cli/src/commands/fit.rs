//! Fit a model on the estimation set.

use std::path::PathBuf;

use anyhow::{Context, Result};
use iblpt_core::{
    fit_model, summarize, GenerationReport, IblptConfig, ModelVariant, DEFAULT_IBL_PARAMS,
};
use iblpt_data::{save_params, FitRecord, SeriesReport};
use iblpt_optimize::OptimizerFactory;
use tracing::info;

use crate::context;

pub struct FitArgs {
    pub model: ModelVariant,
    pub dataset: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub workers: Option<i32>,
    pub seed: Option<u64>,
    pub optimizer: Option<String>,
    pub compare: bool,
}

fn fitted_label(model: ModelVariant) -> &'static str {
    match model {
        ModelVariant::Ibl => "Optimized IBL",
        ModelVariant::Pt => "PT-Optimized IBL",
    }
}

pub fn run(mut config: IblptConfig, args: FitArgs) -> Result<()> {
    if let Some(dataset) = args.dataset {
        config.data.estimation = dataset;
    }
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }
    if let Some(workers) = args.workers {
        config.optimizer.workers = workers;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
        if config.optimizer.seed.is_none() {
            config.optimizer.seed = Some(seed);
        }
    }
    config.validate()?;

    let estimation = context::dataset(&config.data.estimation)?;
    let competition = context::dataset(&config.data.competition)?;
    let human = context::human(&config)?;

    let optimizer = match &args.optimizer {
        Some(name) => OptimizerFactory::from_name(name, &config.optimizer)?,
        None => OptimizerFactory::create(&config.optimizer)?,
    };

    info!(
        model = args.model.label(),
        workers = config.optimizer.workers,
        problems = estimation.len(),
        "running optimization"
    );

    let label = args.model.label();
    let mut callback = |report: &GenerationReport| {
        info!(
            model = label,
            generation = report.generation,
            best = report.best_value,
            params = ?report.best_params,
            "generation complete"
        );
        false
    };
    let outcome = fit_model(
        args.model,
        &estimation,
        &human.estimation,
        &config,
        optimizer.as_ref(),
        Some(&mut callback),
    )?;
    let result = &outcome.result;
    // Later runs reuse the fitted objective's seed.
    config.simulation.seed = Some(outcome.simulation_seed);
    info!(
        simulation_seed = outcome.simulation_seed,
        best = result.best_value,
        "fit complete"
    );

    let out_dir = &config.output.dir;
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let params_path = out_dir.join(format!("fit_{}.txt", args.model));
    save_params(&params_path, &result.best_params)?;
    FitRecord::from_outcome(args.model, optimizer.name(), &outcome)
        .save(out_dir.join(format!("fit_{}.json", args.model)))?;
    println!("Saved params to {}", params_path.display());

    let simulation = config.simulation.simulation_config();
    let summary = summarize(
        fitted_label(args.model),
        args.model,
        &result.best_params,
        &estimation,
        &competition,
        &human,
        &simulation,
    )?;
    println!("\n{}", summary);

    if args.compare && args.model == ModelVariant::Ibl {
        let baseline = summarize(
            "Default IBL",
            ModelVariant::Ibl,
            &DEFAULT_IBL_PARAMS,
            &estimation,
            &competition,
            &human,
            &simulation,
        )?;
        println!("{}", baseline);
    }

    let curve = iblpt_core::eval_ts(
        &estimation,
        &result.best_params,
        args.model,
        &config.simulation.plot_config(),
    )?;
    let mut report = SeriesReport::new("R-rate over trials", human.estimation.r_rate.clone());
    report.add_model(fitted_label(args.model), curve.r_rate)?;
    report.save(out_dir.join("IBLPT_vs_human.json"))?;

    Ok(())
}
