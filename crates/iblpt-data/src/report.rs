//! Plot-ready series reports.
//!
//! A report pairs the human R-rate curve with one or more simulated curves.
//! Rendering is left to an external plotting tool that reads the JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use iblpt_core::error::{ErrorCode, IblError, IblResult};

/// One simulated curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSeries {
    pub label: String,
    pub r_rate: Vec<f64>,
}

/// Human R-rate curve plus simulated curves of the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub label: String,
    pub trials: usize,
    pub human_r_rate: Vec<f64>,
    pub models: Vec<ModelSeries>,
}

impl SeriesReport {
    pub fn new(label: impl Into<String>, human_r_rate: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            trials: human_r_rate.len(),
            human_r_rate,
            models: Vec::new(),
        }
    }

    /// Add a simulated curve; it must cover the same trials as the human one.
    pub fn add_model(&mut self, label: impl Into<String>, r_rate: Vec<f64>) -> IblResult<()> {
        let label = label.into();
        if r_rate.len() != self.trials {
            return Err(IblError::validation_code(
                ErrorCode::ValLengthMismatch,
                format!(
                    "series {:?} has {} trials, report has {}",
                    label,
                    r_rate.len(),
                    self.trials
                ),
            ));
        }
        self.models.push(ModelSeries { label, r_rate });
        Ok(())
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> IblResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), models = self.models.len(), "series report written");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> IblResult<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_model_checks_length() {
        let mut report = SeriesReport::new("R-rate over trials", vec![0.4, 0.5, 0.45]);
        assert!(report.add_model("IBL", vec![0.3, 0.4, 0.5]).is_ok());
        let err = report.add_model("PT-IBL", vec![0.3]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValLengthMismatch);
        assert_eq!(report.models.len(), 1);
    }

    #[test]
    fn test_json_layout() {
        let mut report = SeriesReport::new("curves", vec![0.5, 0.6]);
        report.add_model("IBL", vec![0.4, 0.7]).unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["trials"], 2);
        assert_eq!(value["models"][0]["label"], "IBL");
        assert_eq!(value["human_r_rate"][1], 0.6);
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        let report = SeriesReport::new("curves", vec![0.5]);
        report.save(&path).unwrap();
        assert_eq!(SeriesReport::load(&path).unwrap(), report);
    }
}
