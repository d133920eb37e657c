//! Saved parameter vectors and fit records.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use iblpt_core::error::{ErrorCode, IblError, IblResult};
use iblpt_core::evaluation::FitOutcome;
use iblpt_core::traits::OptimizationResult;
use iblpt_core::types::ModelVariant;

/// Format a vector as `[v1, v2, ...]`.
pub fn format_params(params: &[f64]) -> String {
    let values: Vec<String> = params.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(", "))
}

/// Write `params` to `path` as a single bracketed line.
pub fn save_params(path: impl AsRef<Path>, params: &[f64]) -> IblResult<()> {
    std::fs::write(path, format_params(params) + "\n")?;
    Ok(())
}

/// Parse a parameter list: brackets optional, values separated by commas
/// and/or whitespace.
pub fn parse_params(text: &str) -> IblResult<Vec<f64>> {
    let inner = text
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']');

    let values = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>().map_err(|_| {
                IblError::parse(
                    ErrorCode::ParseInvalidNumber,
                    format!("invalid parameter value: {:?}", s),
                )
            })
        })
        .collect::<IblResult<Vec<f64>>>()?;

    if values.is_empty() {
        return Err(IblError::parse(
            ErrorCode::ParseInvalidRow,
            "parameter list is empty",
        ));
    }
    Ok(values)
}

/// Read parameters from `arg` when it names an existing file, otherwise parse
/// `arg` itself.
pub fn load_params(arg: &str) -> IblResult<Vec<f64>> {
    let path = Path::new(arg);
    if path.is_file() {
        parse_params(&std::fs::read_to_string(path)?)
    } else {
        parse_params(arg)
    }
}

/// Metadata of one completed fit, stored next to the parameter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRecord {
    pub run_id: Uuid,
    pub model: ModelVariant,
    pub optimizer: String,
    pub params: Vec<f64>,
    pub objective: f64,
    pub generations: usize,
    pub evaluations: usize,
    pub converged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation_seed: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl FitRecord {
    pub fn new(
        model: ModelVariant,
        optimizer: impl Into<String>,
        result: &OptimizationResult,
        simulation_seed: Option<u64>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            model,
            optimizer: optimizer.into(),
            params: result.best_params.clone(),
            objective: result.best_value,
            generations: result.generations,
            evaluations: result.evaluations,
            converged: result.converged,
            simulation_seed,
            created_at: Utc::now(),
        }
    }

    /// Record of a [`fit_model`](iblpt_core::fit_model) run, with the seed its
    /// objective used.
    pub fn from_outcome(
        model: ModelVariant,
        optimizer: impl Into<String>,
        outcome: &FitOutcome,
    ) -> Self {
        Self::new(model, optimizer, &outcome.result, Some(outcome.simulation_seed))
    }

    /// Write as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> IblResult<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> IblResult<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}
