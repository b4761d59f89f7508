//! Command-line front end for the allocation simulator.
//!
//! Loads the bid table and arrival list, runs the chosen policy through the
//! competitive-ratio estimator, and prints the baseline revenue and the
//! competitive ratio (both rounded to 2 decimal places), or the full
//! estimate as JSON with `--json`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use adwords_simulator_core_rs::{
    load_arrivals, load_bid_table, Estimator, EstimatorConfig, PolicyKind, DEFAULT_TRIALS,
};

/// CLI-facing policy selector
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyCli {
    Greedy,
    Balance,
    Msvv,
}

/// Convert CLI policy selection → engine PolicyKind
impl From<PolicyCli> for PolicyKind {
    fn from(policy: PolicyCli) -> Self {
        match policy {
            PolicyCli::Greedy => PolicyKind::Greedy,
            PolicyCli::Balance => PolicyKind::Balance,
            PolicyCli::Msvv => PolicyKind::Msvv,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "adwords-simulator", version)]
struct Cli {
    /// Allocation policy to evaluate
    #[clap(value_enum)]
    policy: PolicyCli,

    /// Bid table: rows of (bidder, keyword, bid value, optional budget)
    #[clap(long, default_value = "bidder_dataset.csv")]
    bids: PathBuf,

    /// Arrival list: one query keyword per line
    #[clap(long, default_value = "queries.txt")]
    queries: PathBuf,

    /// Number of randomized-order trials
    #[clap(long, default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Seed for the trial shuffles
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Emit the full estimate as JSON instead of the two-line summary
    #[clap(long)]
    json: bool,
}

fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    let (graph, book) = load_bid_table(&cli.bids)
        .with_context(|| format!("loading bid table from {}", cli.bids.display()))?;
    let arrivals = load_arrivals(&cli.queries)
        .with_context(|| format!("loading arrival list from {}", cli.queries.display()))?;

    tracing::info!(
        policy = ?cli.policy,
        arrivals = arrivals.len(),
        trials = cli.trials,
        seed = cli.seed,
        "starting estimation"
    );

    let config = EstimatorConfig {
        policy: cli.policy.into(),
        trials: cli.trials,
        rng_seed: cli.seed,
    };
    let mut estimator = Estimator::new(graph, book, arrivals, config)?;
    let estimate = estimator.run()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        println!("{:.2}", estimate.baseline_revenue);
        println!("{:.2}", estimate.competitive_ratio);
    }

    Ok(())
}
