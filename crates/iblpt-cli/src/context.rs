//! Config and data loading shared by the commands.

use std::path::Path;

use anyhow::{Context, Result};
use iblpt_core::{GambleProblem, HumanReference, IblptConfig};

/// Load the config file (explicit path, or discovered), overlay `IBLPT_*`
/// variables and validate.
pub fn load_config(path: Option<&Path>) -> Result<IblptConfig> {
    let config = match path {
        Some(path) => IblptConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => IblptConfig::discover()?,
    };
    let config = config.with_env_overrides();
    config.validate()?;
    Ok(config)
}

pub fn dataset(path: &Path) -> Result<Vec<GambleProblem>> {
    iblpt_data::load_dataset(path)
        .with_context(|| format!("failed to load dataset {}", path.display()))
}

pub fn human(config: &IblptConfig) -> Result<HumanReference> {
    let path = &config.data.human;
    iblpt_data::load_human_reference(path)
        .with_context(|| format!("failed to load human reference {}", path.display()))
}

pub fn params(arg: &str) -> Result<Vec<f64>> {
    iblpt_data::load_params(arg).with_context(|| format!("invalid parameters {:?}", arg))
}
