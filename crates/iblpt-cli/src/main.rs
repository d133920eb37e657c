//! iblpt - fit and evaluate IBL / PT-IBL models of repeated risky choice.

mod commands;
mod context;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use iblpt_core::ModelVariant;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "iblpt")]
#[command(author, version, about = "IBL and PT-IBL models of repeated risky choice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (.toml, .json or .yaml); otherwise iblpt.toml is looked up
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit a model to the human estimation-set series
    Fit {
        /// Model to fit
        model: ModelVariant,

        /// Estimation dataset (overrides the config)
        #[arg(short, long)]
        dataset: Option<PathBuf>,

        /// Output directory (overrides the config)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Parallel candidate evaluations (-1 = all cores, 1 = sequential)
        #[arg(short, long, allow_negative_numbers = true)]
        workers: Option<i32>,

        /// Seed for the simulator and the optimizer
        #[arg(short, long)]
        seed: Option<u64>,

        /// Optimizer provider (differential_evolution, random_search)
        #[arg(long)]
        optimizer: Option<String>,

        /// Also summarize the default IBL parameters
        #[arg(long)]
        compare: bool,
    },

    /// Score a parameter vector on the estimation and competition sets
    Evaluate {
        /// Model the parameters belong to
        #[arg(short, long, default_value = "pt")]
        model: ModelVariant,

        /// Parameter file or comma-separated list
        #[arg(short, long)]
        params: String,
    },

    /// Print the simulated R-rate and A-rate series
    Simulate {
        #[arg(short, long, default_value = "pt")]
        model: ModelVariant,

        /// Parameter file or comma-separated list
        #[arg(short, long)]
        params: String,

        /// Trials per agent (overrides the config)
        #[arg(short = 'n', long)]
        trials: Option<usize>,

        /// Replicates per problem (overrides the config)
        #[arg(short, long)]
        agents: Option<usize>,

        #[arg(short, long)]
        seed: Option<u64>,

        /// Dataset to simulate (defaults to the estimation set)
        #[arg(short, long)]
        dataset: Option<PathBuf>,
    },

    /// Write a plot-ready JSON report of model and human R-rate curves
    Report {
        #[arg(short, long, default_value = "pt")]
        model: ModelVariant,

        /// Parameter file or comma-separated list
        #[arg(short, long)]
        params: String,

        /// Curve label (defaults to "IBL model" or "PT-IBL model")
        #[arg(short, long)]
        label: Option<String>,

        /// Output file (defaults to <output dir>/IBLPT_vs_human.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let config = context::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Fit {
            model,
            dataset,
            output_dir,
            workers,
            seed,
            optimizer,
            compare,
        } => commands::fit::run(
            config,
            commands::fit::FitArgs {
                model,
                dataset,
                output_dir,
                workers,
                seed,
                optimizer,
                compare,
            },
        ),
        Commands::Evaluate { model, params } => commands::evaluate::run(&config, model, &params),
        Commands::Simulate {
            model,
            params,
            trials,
            agents,
            seed,
            dataset,
        } => commands::simulate::run(
            config,
            commands::simulate::SimulateArgs {
                model,
                params,
                trials,
                agents,
                seed,
                dataset,
            },
        ),
        Commands::Report {
            model,
            params,
            label,
            out,
        } => commands::report::run(&config, model, &params, label, out),
    }
}
