//! Competitive-ratio estimation
//!
//! Runs an allocation policy over one baseline ordering plus a batch of
//! randomized orderings and reports realized revenue against the
//! offline-optimal bound.

mod engine;

pub use engine::{
    Estimator, EstimatorConfig, RevenueEstimate, SimulationError, DEFAULT_TRIALS,
};
