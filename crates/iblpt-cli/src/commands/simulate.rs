//! Print simulated series.

use std::path::PathBuf;

use anyhow::Result;
use iblpt_core::{eval_ts, IblptConfig, ModelVariant};

use crate::context;

pub struct SimulateArgs {
    pub model: ModelVariant,
    pub params: String,
    pub trials: Option<usize>,
    pub agents: Option<usize>,
    pub seed: Option<u64>,
    pub dataset: Option<PathBuf>,
}

pub fn run(config: IblptConfig, args: SimulateArgs) -> Result<()> {
    let params = context::params(&args.params)?;
    let path = args
        .dataset
        .unwrap_or_else(|| config.data.estimation.clone());
    let dataset = context::dataset(&path)?;

    let mut simulation = config.simulation.simulation_config();
    if let Some(trials) = args.trials {
        simulation.trials = trials;
    }
    if let Some(agents) = args.agents {
        simulation.agents = agents;
    }
    if args.seed.is_some() {
        simulation.seed = args.seed;
    }

    let series = eval_ts(&dataset, &params, args.model, &simulation)?;

    println!("trial\tr_rate\ta_rate");
    for (t, (r, a)) in series.r_rate.iter().zip(&series.a_rate).enumerate() {
        println!("{}\t{:.4}\t{:.4}", t + 1, r, a);
    }
    Ok(())
}
