//! Score a parameter vector.

use anyhow::Result;
use iblpt_core::{summarize, IblptConfig, ModelVariant};

use crate::context;

pub fn run(config: &IblptConfig, model: ModelVariant, params: &str) -> Result<()> {
    let params = context::params(params)?;
    let estimation = context::dataset(&config.data.estimation)?;
    let competition = context::dataset(&config.data.competition)?;
    let human = context::human(config)?;

    let summary = summarize(
        super::model_label(model),
        model,
        &params,
        &estimation,
        &competition,
        &human,
        &config.simulation.simulation_config(),
    )?;
    println!("{}", summary);
    Ok(())
}
