//! AdWords Simulator Core - Rust Engine
//!
//! Online bipartite allocation of ad impressions to budget-constrained
//! bidders, with Monte-Carlo competitive-ratio estimation.
//!
//! # Architecture
//!
//! - **models**: domain types (BidGraph, BidderAccount, BudgetBook/Ledger)
//! - **dataset**: folds the bid table and arrival list into model types
//! - **policy**: allocation policies (Greedy, Balance, MSVV) and ψ scaling
//! - **estimator**: baseline run + randomized-order trials + ratio
//! - **rng**: deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. A bidder's remaining budget never leaves `[0, original_budget]`
//! 2. All randomness is deterministic (seeded RNG, one generator per run)
//! 3. Every policy invocation starts from a fresh ledger; the arrival
//!    ordering is the ONE piece of state that carries across trials,
//!    permuted cumulatively in place

// Module declarations
pub mod dataset;
pub mod estimator;
pub mod models;
pub mod policy;
pub mod rng;

// Re-exports for convenience
pub use dataset::{load_arrivals, load_bid_table, BidRow, DatasetError};
pub use estimator::{
    Estimator, EstimatorConfig, RevenueEstimate, SimulationError, DEFAULT_TRIALS,
};
pub use models::{
    account::{BidderAccount, LedgerError},
    bid_graph::BidGraph,
    ledger::{BudgetBook, BudgetLedger},
    BidderId, QueryId,
};
pub use policy::{AllocationPolicy, PolicyKind, UnknownPolicyError};
pub use rng::RngManager;
