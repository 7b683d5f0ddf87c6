//! Percolation threshold estimator.
//!
//! Runs `trials` independent experiments on an `n`×`n` grid and prints the
//! sample mean and standard deviation of the threshold, plus the 95%
//! confidence interval when more than 30 trials were run.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use percolation::{ExperimentConfig, PercolationExperiment};

/// Trials needed before the normal-approximation interval is reported.
const MIN_TRIALS_FOR_INTERVAL: usize = 30;

#[derive(Parser)]
#[command(name = "percolation-stats")]
#[command(version)]
#[command(about = "Estimate the site percolation threshold by Monte Carlo simulation")]
struct Cli {
    /// Grid side length
    n: usize,

    /// Number of independent trials
    trials: usize,

    /// Random seed for a reproducible run
    #[arg(long, env = "PERCOLATION_SEED")]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = ExperimentConfig::new(cli.n, cli.trials);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    info!(n = cli.n, trials = cli.trials, seed = ?cli.seed, "starting experiment");

    let experiment = PercolationExperiment::with_config(&config)
        .with_context(|| {
            format!(
                "cannot run {} trials on a {}x{} grid",
                cli.trials, cli.n, cli.n
            )
        })?;

    println!("mean                    = {}", experiment.mean());
    println!("stddev                  = {}", experiment.stddev());
    if cli.trials > MIN_TRIALS_FOR_INTERVAL {
        println!(
            "95% confidence interval = [{}, {}]",
            experiment.confidence_lo(),
            experiment.confidence_hi()
        );
    }

    Ok(())
}
