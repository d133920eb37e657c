//! Human reference series.
//!
//! Stored as TOML, JSON or YAML with the layout
//!
//! ```toml
//! [estimation]
//! r_rate = [0.41, 0.43]
//! a_rate = [0.0, 0.29]
//!
//! [competition]
//! r_rate = [0.40, 0.44]
//! a_rate = [0.0, 0.31]
//! ```

use std::path::Path;

use iblpt_core::error::{IblError, IblResult};
use iblpt_core::types::HumanReference;

/// Load and validate a human reference file; the format follows the extension.
pub fn load_human_reference(path: impl AsRef<Path>) -> IblResult<HumanReference> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str());

    let human: HumanReference = match ext {
        Some("toml") => {
            toml::from_str(&content).map_err(|e| IblError::Configuration(e.to_string()))?
        }
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(|e| IblError::Configuration(e.to_string()))?
        }
        _ => {
            return Err(IblError::Configuration(format!(
                "unsupported human reference format: {}",
                path.display()
            )))
        }
    };

    human.validate()?;
    tracing::debug!(
        path = %path.display(),
        estimation_trials = human.estimation.len(),
        competition_trials = human.competition.len(),
        "human reference loaded"
    );
    Ok(human)
}
