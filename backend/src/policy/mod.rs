//! Allocation policies
//!
//! Each policy processes the arrival ordering sequentially and irrevocably:
//! one winner (or none) per query, budgets debited as queries are won, no
//! query revisited. All policies share the same eligibility filter — a bidder
//! must have a bid for the query and enough remaining budget to cover it —
//! and differ only in how they score the affordable bidders:
//!
//! 1. **Greedy**: highest bid value
//! 2. **Balance**: largest remaining budget
//! 3. **MSVV**: bid value scaled by the ψ budget-fraction discount
//!
//! Ties always resolve to the smallest bidder identity, because bidders are
//! scanned in ascending order and an incumbent is only replaced on a strict
//! improvement.
//!
//! # Adding a policy
//!
//! Implement [`AllocationPolicy`] for a new unit struct and add a
//! [`PolicyKind`] variant; the compiler's exhaustiveness checks point at
//! every match that needs the new arm.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BidGraph, BudgetLedger, LedgerError, QueryId};

mod balance;
mod greedy;
mod msvv;
pub mod scaling;

pub use balance::BalancePolicy;
pub use greedy::GreedyPolicy;
pub use msvv::MsvvPolicy;

/// One online allocation algorithm
///
/// `allocate` is a pure function of (bid graph, ledger, arrival ordering):
/// it walks the ordering once, mutates only the ledger, and returns the
/// accumulated revenue. Queries absent from the graph, and queries whose
/// bidders are all unaffordable, contribute zero revenue and no mutation.
pub trait AllocationPolicy {
    /// Short human-readable policy name
    fn name(&self) -> &'static str;

    /// Process every query in `arrivals` in order, returning total revenue
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownBidder`] if the graph references a
    /// bidder the ledger has no account for — a violated precondition, not
    /// a steady-state condition.
    fn allocate(
        &self,
        graph: &BidGraph,
        ledger: &mut BudgetLedger,
        arrivals: &[QueryId],
    ) -> Result<f64, LedgerError>;
}

/// Closed enumeration of the available policies
///
/// The serde / `FromStr` names are the wire contract: `"greedy"`,
/// `"balance"`, `"msvv"`.
///
/// # Example
/// ```
/// use adwords_simulator_core_rs::PolicyKind;
///
/// assert_eq!("msvv".parse::<PolicyKind>().unwrap(), PolicyKind::Msvv);
/// assert!("optimal".parse::<PolicyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Highest affordable bid wins
    Greedy,

    /// Largest remaining budget wins
    Balance,

    /// Largest ψ-scaled bid wins (Mehta-Saberi-Vazirani-Vazirani)
    Msvv,
}

impl PolicyKind {
    /// Every selectable policy, in wire-name order
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Greedy, PolicyKind::Balance, PolicyKind::Msvv];

    /// Canonical lowercase selector name
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Greedy => "greedy",
            PolicyKind::Balance => "balance",
            PolicyKind::Msvv => "msvv",
        }
    }

    /// The policy implementation behind this selector
    pub fn policy(self) -> &'static dyn AllocationPolicy {
        match self {
            PolicyKind::Greedy => &GreedyPolicy,
            PolicyKind::Balance => &BalancePolicy,
            PolicyKind::Msvv => &MsvvPolicy,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised for a policy selector outside the closed enumeration
///
/// A configuration error: fatal before any simulation runs.
#[derive(Debug, Error, PartialEq)]
#[error("unknown policy {input:?} (expected one of: greedy, balance, msvv)")]
pub struct UnknownPolicyError {
    input: String,
}

impl UnknownPolicyError {
    /// The selector that failed to parse
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for PolicyKind {
    type Err = UnknownPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(PolicyKind::Greedy),
            "balance" => Ok(PolicyKind::Balance),
            "msvv" => Ok(PolicyKind::Msvv),
            other => Err(UnknownPolicyError {
                input: other.to_string(),
            }),
        }
    }
}
