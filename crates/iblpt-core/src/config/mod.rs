//! Configuration system for iblpt.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{IblError, IblResult};
use crate::simulation::SimulationConfig;
use crate::traits::{OptimizerConfig, OptimizerProvider};
use crate::types::{ModelVariant, ParameterBounds};

/// Config file names looked up by [`IblptConfig::discover`].
const CONFIG_FILE_NAMES: [&str; 4] = ["iblpt.toml", "iblpt.yaml", "iblpt.yml", "iblpt.json"];

/// Input data locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Estimation problem set.
    pub estimation: PathBuf,
    /// Held-out competition problem set.
    pub competition: PathBuf,
    /// Human reference series.
    pub human: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            estimation: PathBuf::from("data/60estimationset.dat"),
            competition: PathBuf::from("data/60competitionset.dat"),
            human: PathBuf::from("data/human_reference.toml"),
        }
    }
}

/// Trial simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub trials: usize,
    /// Replicates per problem while fitting and evaluating.
    pub agents: usize,
    /// Replicates per problem for plot reports.
    pub plot_agents: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            trials: 100,
            agents: 5,
            plot_agents: 20,
            seed: None,
            parallel: true,
        }
    }
}

impl SimulationSettings {
    /// Settings for fitting and evaluation runs.
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            trials: self.trials,
            agents: self.agents,
            seed: self.seed,
            parallel: self.parallel,
        }
    }

    /// Settings for report runs.
    pub fn plot_config(&self) -> SimulationConfig {
        SimulationConfig {
            agents: self.plot_agents,
            ..self.simulation_config()
        }
    }
}

/// Search bounds per variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Bounds for `(d, s, p)`.
    pub ibl: Vec<ParameterBounds>,
    /// Bounds for `(alpha, beta, lambda)`, appended for PT-IBL.
    pub pt_extra: Vec<ParameterBounds>,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            ibl: ParameterBounds::ibl_defaults(),
            pt_extra: ParameterBounds::pt_extra_defaults(),
        }
    }
}

impl BoundsConfig {
    /// Full bounds vector for `variant`.
    pub fn for_variant(&self, variant: ModelVariant) -> Vec<ParameterBounds> {
        let mut bounds = self.ibl.clone();
        if variant == ModelVariant::Pt {
            bounds.extend(self.pt_extra.iter().copied());
        }
        bounds
    }
}

/// Objective weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub r_weight_ibl: f64,
    pub r_weight_pt: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            r_weight_ibl: 0.9,
            r_weight_pt: 0.5,
        }
    }
}

impl MetricsConfig {
    /// Weight of the R-rate term for `variant`.
    pub fn r_weight(&self, variant: ModelVariant) -> f64 {
        match variant {
            ModelVariant::Ibl => self.r_weight_ibl,
            ModelVariant::Pt => self.r_weight_pt,
        }
    }
}

/// Where results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

/// Main iblpt configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IblptConfig {
    pub data: DataConfig,
    pub simulation: SimulationSettings,
    pub optimizer: OptimizerConfig,
    pub bounds: BoundsConfig,
    pub metrics: MetricsConfig,
    pub output: OutputConfig,
}

impl IblptConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> IblResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| IblError::Configuration(e.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| IblError::Configuration(e.to_string()))
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| IblError::Configuration(e.to_string()))
            }
            _ => Err(IblError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Find a config file in the working directory, then in the user config
    /// directory (`<config_dir>/iblpt/`). Falls back to defaults.
    pub fn discover() -> IblResult<Self> {
        let mut dirs_to_search = vec![PathBuf::from(".")];
        if let Some(dir) = dirs::config_dir() {
            dirs_to_search.push(dir.join("iblpt"));
        }

        for dir in dirs_to_search {
            for name in CONFIG_FILE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    tracing::debug!(path = %candidate.display(), "loading config");
                    return Self::from_file(candidate);
                }
            }
        }
        Ok(Self::default())
    }

    /// Overlay `IBLPT_*` environment variables. Unparsable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
            std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
        }

        // Data paths
        if let Ok(path) = std::env::var("IBLPT_ESTIMATION_SET") {
            self.data.estimation = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("IBLPT_COMPETITION_SET") {
            self.data.competition = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("IBLPT_HUMAN_REFERENCE") {
            self.data.human = PathBuf::from(path);
        }

        // Simulation
        if let Some(trials) = parsed("IBLPT_TRIALS") {
            self.simulation.trials = trials;
        }
        if let Some(agents) = parsed("IBLPT_AGENTS") {
            self.simulation.agents = agents;
        }
        if let Some(seed) = parsed("IBLPT_SEED") {
            self.simulation.seed = Some(seed);
        }

        // Optimizer
        if let Some(provider) = parsed::<OptimizerProvider>("IBLPT_OPTIMIZER") {
            self.optimizer.provider = provider;
        }
        if let Some(max_iter) = parsed("IBLPT_MAX_ITER") {
            self.optimizer.max_iter = max_iter;
        }
        if let Some(pop_size) = parsed("IBLPT_POP_SIZE") {
            self.optimizer.pop_size = pop_size;
        }
        if let Some(workers) = parsed("IBLPT_WORKERS") {
            self.optimizer.workers = workers;
        }

        if let Ok(dir) = std::env::var("IBLPT_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        self
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> IblptConfigBuilder {
        IblptConfigBuilder::default()
    }

    /// Check counts, bounds and weights.
    pub fn validate(&self) -> IblResult<()> {
        self.simulation.simulation_config().validate()?;
        if self.simulation.plot_agents == 0 {
            return Err(IblError::Configuration(
                "simulation.plot_agents must be positive".to_string(),
            ));
        }
        if self.bounds.ibl.len() != ModelVariant::Ibl.param_count() {
            return Err(IblError::Configuration(format!(
                "bounds.ibl needs {} entries, got {}",
                ModelVariant::Ibl.param_count(),
                self.bounds.ibl.len()
            )));
        }
        if self.bounds.pt_extra.len() != 3 {
            return Err(IblError::Configuration(format!(
                "bounds.pt_extra needs 3 entries, got {}",
                self.bounds.pt_extra.len()
            )));
        }
        ParameterBounds::validate_all(&self.bounds.for_variant(ModelVariant::Pt))?;

        for (name, weight) in [
            ("r_weight_ibl", self.metrics.r_weight_ibl),
            ("r_weight_pt", self.metrics.r_weight_pt),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(IblError::Configuration(format!(
                    "metrics.{} must lie in [0, 1], got {}",
                    name, weight
                )));
            }
        }

        let opt = &self.optimizer;
        if opt.max_iter == 0 || opt.pop_size == 0 {
            return Err(IblError::Configuration(
                "optimizer.max_iter and optimizer.pop_size must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&opt.recombination) {
            return Err(IblError::Configuration(format!(
                "optimizer.recombination must lie in [0, 1], got {}",
                opt.recombination
            )));
        }
        let (m_lo, m_hi) = opt.mutation;
        if !(0.0..=2.0).contains(&m_lo) || !(0.0..=2.0).contains(&m_hi) || m_lo > m_hi {
            return Err(IblError::Configuration(format!(
                "optimizer.mutation must be an ordered pair in [0, 2], got ({}, {})",
                m_lo, m_hi
            )));
        }
        if opt.workers == 0 || opt.workers < -1 {
            return Err(IblError::Configuration(format!(
                "optimizer.workers must be -1 or a positive count, got {}",
                opt.workers
            )));
        }
        Ok(())
    }
}

/// Builder for IblptConfig.
#[derive(Default)]
pub struct IblptConfigBuilder {
    config: IblptConfig,
}

impl IblptConfigBuilder {
    /// Set data locations.
    pub fn data(mut self, data: DataConfig) -> Self {
        self.config.data = data;
        self
    }

    /// Set trial count.
    pub fn trials(mut self, trials: usize) -> Self {
        self.config.simulation.trials = trials;
        self
    }

    /// Set replicates per problem.
    pub fn agents(mut self, agents: usize) -> Self {
        self.config.simulation.agents = agents;
        self
    }

    /// Set the simulation seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.simulation.seed = Some(seed);
        self
    }

    /// Set optimizer configuration.
    pub fn optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.config.optimizer = optimizer;
        self
    }

    /// Set search bounds.
    pub fn bounds(mut self, bounds: BoundsConfig) -> Self {
        self.config.bounds = bounds;
        self
    }

    /// Set objective weights.
    pub fn metrics(mut self, metrics: MetricsConfig) -> Self {
        self.config.metrics = metrics;
        self
    }

    /// Set output directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output.dir = dir.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> IblptConfig {
        self.config
    }
}
