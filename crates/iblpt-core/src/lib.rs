//! iblpt-core - Core library for iblpt.
//!
//! Instance-based learning (IBL) and prospect-theory IBL (PT-IBL) models of
//! repeated risky choice: agents that remember experienced outcomes, retrieve
//! them through noisy recency-based activation, and choose between a gamble and
//! a sure payoff by blending what they remember.
//!
//! # Example
//!
//! ```
//! use iblpt_core::{eval_ts, GambleProblem, ModelVariant, SimulationConfig};
//!
//! let problems = vec![GambleProblem::new(40.0, 0.5, 20.0, 30.0)];
//! let config = SimulationConfig::new(50, 10).with_seed(42);
//! let series = eval_ts(&problems, &[1.0, 1.0, 0.0], ModelVariant::Ibl, &config)?;
//!
//! assert_eq!(series.len(), 50);
//! assert_eq!(series.a_rate[0], 0.0);
//! # Ok::<(), iblpt_core::IblError>(())
//! ```

pub mod activation;
pub mod agent;
pub mod blending;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod memory;
pub mod metrics;
pub mod objective;
pub mod simulation;
pub mod traits;
pub mod types;
pub mod valuation;

// Re-export commonly used types
pub use agent::{Agent, AgentState};
pub use config::IblptConfig;
pub use error::{ErrorCode, IblError, IblResult};
pub use evaluation::{fit_model, summarize, FitOutcome, ModelSummary, SetScores};
pub use memory::Memory;
pub use metrics::{aic, corr, msd, score_series, SeriesScore};
pub use objective::Objective;
pub use simulation::{eval_ts, SimulationConfig};
pub use traits::{
    GenerationCallback, GenerationReport, ObjectiveFn, OptimizationResult, Optimizer,
    OptimizerConfig, OptimizerProvider,
};
pub use types::{
    Choice, GambleProblem, HumanReference, Instance, ModelParameters, ModelVariant,
    ParameterBounds, RateSeries, DEFAULT_IBL_PARAMS, FITTED_IBL_PARAMS,
};
pub use valuation::Valuation;
