//! iblpt-optimize - Optimizer implementations for iblpt.
//!
//! This crate provides bounded black-box minimizers for fitting model
//! parameters against human reference series.
//!
//! # Supported Providers
//!
//! - **Differential evolution** - `best1bin` with dithered mutation and
//!   deferred updating
//! - **Random search** - uniform sampling inside the bounds

mod batch;
mod differential_evolution;
mod factory;
mod random_search;

pub use differential_evolution::DifferentialEvolution;
pub use factory::OptimizerFactory;
pub use random_search::RandomSearch;

// Re-export core types
pub use iblpt_core::traits::{
    GenerationCallback, GenerationReport, ObjectiveFn, OptimizationResult, Optimizer,
    OptimizerConfig, OptimizerProvider,
};
