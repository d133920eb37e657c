//! Factory for creating optimizer providers.

use std::str::FromStr;

use iblpt_core::error::{IblError, IblResult};
use iblpt_core::traits::{Optimizer, OptimizerConfig, OptimizerProvider};

use crate::{DifferentialEvolution, RandomSearch};

/// Factory for creating optimizer providers.
pub struct OptimizerFactory;

impl OptimizerFactory {
    /// Create an optimizer from the given configuration.
    pub fn create(config: &OptimizerConfig) -> IblResult<Box<dyn Optimizer>> {
        match config.provider {
            OptimizerProvider::DifferentialEvolution => {
                let optimizer = DifferentialEvolution::new(config.clone())?;
                Ok(Box::new(optimizer))
            }
            OptimizerProvider::RandomSearch => {
                let optimizer = RandomSearch::new(config.clone())?;
                Ok(Box::new(optimizer))
            }
        }
    }

    /// Create an optimizer by provider name, e.g. `"random_search"`.
    pub fn from_name(name: &str, config: &OptimizerConfig) -> IblResult<Box<dyn Optimizer>> {
        let provider =
            OptimizerProvider::from_str(name).map_err(|_| IblError::UnsupportedProvider {
                provider: name.to_string(),
            })?;
        Self::create(&OptimizerConfig {
            provider,
            ..config.clone()
        })
    }

    /// Create a differential evolution optimizer with default settings.
    pub fn differential_evolution() -> IblResult<Box<dyn Optimizer>> {
        Self::create(&OptimizerConfig::default())
    }
}
