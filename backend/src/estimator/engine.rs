//! Estimation engine
//!
//! The estimator is the simulation's main loop. For one chosen policy it
//! runs:
//!
//! ```text
//! 1. optimal  = sum of original budgets (offline-optimal revenue bound)
//! 2. baseline = policy over the arrival ordering exactly as given
//! 3. trials × { shuffle the ordering in place, run policy, accumulate }
//! 4. avg      = trial revenue / trial count
//! 5. ratio    = avg / optimal   (0 when optimal is 0)
//! ```
//!
//! Every policy invocation — baseline and each trial — starts from a fresh
//! ledger derived from the original budgets; no spend leaks between runs.
//!
//! # Reproducibility contract
//!
//! The ordering is ONE mutable sequence permuted in place, cumulatively:
//! trial N shuffles the result of trial N−1's shuffle, never a pristine
//! copy. Together with the seeded generator this makes the whole trial
//! sequence a single deterministic walk — same inputs and seed, same
//! numbers, bit for bit. Re-copying the original ordering before each
//! shuffle would change the reported values and is a behavioral
//! incompatibility, not a cleanup.
//!
//! # Example
//!
//! ```
//! use adwords_simulator_core_rs::{
//!     BidGraph, BudgetBook, Estimator, EstimatorConfig, PolicyKind,
//! };
//!
//! let mut graph = BidGraph::new();
//! graph.insert_bid("shoes".to_string(), "A".to_string(), 5.0);
//!
//! let mut book = BudgetBook::new();
//! book.insert("A".to_string(), 10.0);
//!
//! let arrivals = vec!["shoes".to_string(), "shoes".to_string()];
//! let config = EstimatorConfig::new(PolicyKind::Greedy);
//!
//! let mut estimator = Estimator::new(graph, book, arrivals, config).unwrap();
//! let estimate = estimator.run().unwrap();
//!
//! // One bidder absorbs both queries in any order: revenue is exact.
//! assert_eq!(estimate.baseline_revenue, 10.0);
//! assert_eq!(estimate.avg_shuffled_revenue, 10.0);
//! assert_eq!(estimate.competitive_ratio, 1.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{BidGraph, BudgetBook, BudgetLedger, BidderId, LedgerError, QueryId};
use crate::policy::PolicyKind;
use crate::rng::RngManager;

/// Number of randomized-order trials an estimate averages over
pub const DEFAULT_TRIALS: usize = 100;

/// Estimator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Allocation policy under evaluation
    pub policy: PolicyKind,

    /// Number of randomized-order trials (must be at least 1)
    pub trials: usize,

    /// Seed for the trial shuffles
    pub rng_seed: u64,
}

impl EstimatorConfig {
    /// Config with the standard trial count and seed 0
    pub fn new(policy: PolicyKind) -> Self {
        Self {
            policy,
            trials: DEFAULT_TRIALS,
            rng_seed: 0,
        }
    }
}

/// Result of one estimation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEstimate {
    /// Revenue over the arrival ordering exactly as given
    pub baseline_revenue: f64,

    /// Mean revenue across the randomized-order trials
    pub avg_shuffled_revenue: f64,

    /// `avg_shuffled_revenue / optimal_revenue`; 0 when the optimal is 0
    pub competitive_ratio: f64,

    /// Sum of original budgets (the offline-optimal bound)
    pub optimal_revenue: f64,

    /// Number of randomized-order trials averaged over
    pub trials: usize,
}

/// Errors that can abort an estimation run
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("bidder {bidder} bids on query {query} but has no budget entry")]
    UnknownBidder { query: QueryId, bidder: BidderId },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Competitive-ratio estimator for one policy over one dataset
///
/// Owns the bid graph, the original budgets, the mutable arrival ordering,
/// and the seeded generator driving the trial shuffles.
#[derive(Debug)]
pub struct Estimator {
    graph: BidGraph,
    book: BudgetBook,
    arrivals: Vec<QueryId>,
    config: EstimatorConfig,
    rng: RngManager,
}

impl Estimator {
    /// Create an estimator, validating the configuration and dataset
    ///
    /// # Errors
    ///
    /// - [`SimulationError::InvalidConfig`] when `trials` is 0
    /// - [`SimulationError::UnknownBidder`] when the graph references a
    ///   bidder the budget book has no entry for (a malformed dataset must
    ///   be rejected before any simulation runs)
    pub fn new(
        graph: BidGraph,
        book: BudgetBook,
        arrivals: Vec<QueryId>,
        config: EstimatorConfig,
    ) -> Result<Self, SimulationError> {
        Self::validate(&graph, &book, &config)?;
        let rng = RngManager::new(config.rng_seed);
        Ok(Self {
            graph,
            book,
            arrivals,
            config,
            rng,
        })
    }

    fn validate(
        graph: &BidGraph,
        book: &BudgetBook,
        config: &EstimatorConfig,
    ) -> Result<(), SimulationError> {
        if config.trials == 0 {
            return Err(SimulationError::InvalidConfig(
                "trials must be at least 1".to_string(),
            ));
        }
        for (query, bids) in graph.iter() {
            for bidder in bids.keys() {
                if !book.contains(bidder) {
                    return Err(SimulationError::UnknownBidder {
                        query: query.clone(),
                        bidder: bidder.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The configuration this estimator was built with
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Current arrival ordering (permuted in place by `run`)
    pub fn arrivals(&self) -> &[QueryId] {
        &self.arrivals
    }

    /// Run the baseline pass plus all randomized trials
    ///
    /// Each call continues the shuffle walk where the previous call left
    /// off; calling `run` twice is the same walk as one run with double the
    /// trials (apart from the second baseline pass).
    pub fn run(&mut self) -> Result<RevenueEstimate, SimulationError> {
        let policy = self.config.policy.policy();
        let optimal = self.book.total();

        let mut ledger = BudgetLedger::fresh(&self.book);
        let baseline_revenue = policy.allocate(&self.graph, &mut ledger, &self.arrivals)?;

        let mut shuffled_total = 0.0;
        for trial in 0..self.config.trials {
            self.rng.shuffle(&mut self.arrivals);
            let mut ledger = BudgetLedger::fresh(&self.book);
            let revenue = policy.allocate(&self.graph, &mut ledger, &self.arrivals)?;
            debug!(trial, revenue, "randomized trial complete");
            shuffled_total += revenue;
        }

        let avg_shuffled_revenue = shuffled_total / self.config.trials as f64;
        let competitive_ratio = if optimal > 0.0 {
            avg_shuffled_revenue / optimal
        } else {
            0.0
        };

        info!(
            policy = %self.config.policy,
            baseline_revenue,
            avg_shuffled_revenue,
            competitive_ratio,
            "estimation complete"
        );

        Ok(RevenueEstimate {
            baseline_revenue,
            avg_shuffled_revenue,
            competitive_ratio,
            optimal_revenue: optimal,
            trials: self.config.trials,
        })
    }
}
