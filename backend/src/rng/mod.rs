//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm for fast, deterministic random number
//! generation. CRITICAL: all randomness in the simulator MUST go through this
//! module — the competitive-ratio estimate is only reproducible if every
//! shuffle is driven by one seeded generator.

mod xorshift;

pub use xorshift::RngManager;
