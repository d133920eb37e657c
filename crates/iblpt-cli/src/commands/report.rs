//! Write a plot-ready series report.

use std::path::PathBuf;

use anyhow::Result;
use iblpt_core::{eval_ts, IblptConfig, ModelVariant};
use iblpt_data::SeriesReport;

use crate::context;

pub fn run(
    config: &IblptConfig,
    model: ModelVariant,
    params: &str,
    label: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let params = context::params(params)?;
    let estimation = context::dataset(&config.data.estimation)?;
    let human = context::human(config)?;

    let series = eval_ts(
        &estimation,
        &params,
        model,
        &config.simulation.plot_config(),
    )?;

    let label = label.unwrap_or_else(|| super::model_label(model));
    let mut report = SeriesReport::new("R-rate over trials", human.estimation.r_rate.clone());
    report.add_model(label, series.r_rate)?;

    let path = out.unwrap_or_else(|| config.output.dir.join("IBLPT_vs_human.json"));
    report.save(&path)?;
    println!("Saved report to {}", path.display());
    Ok(())
}
