//! Monte Carlo trial simulation.

mod engine;
mod seed;

pub use engine::{
    alternation_indicators, eval_ts, risky_indicators, run_replicate, simulate, SimulationConfig,
};
pub use seed::{replicate_seed, resolve_seed, splitmix64};
