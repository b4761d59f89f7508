//! Budget book and budget ledger
//!
//! Two views of advertiser budgets with very different lifetimes:
//!
//! - [`BudgetBook`]: the original per-bidder budgets, built once at ingestion
//!   and read-only afterwards. Its `total()` is the offline-optimal revenue
//!   bound used by the competitive-ratio estimator.
//! - [`BudgetLedger`]: the mutable remaining-budget state for ONE allocation
//!   run. A fresh ledger is derived from the book before every policy
//!   invocation; runs never observe another run's mutations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::account::{BidderAccount, LedgerError};
use crate::models::BidderId;

/// Immutable original budgets, keyed by bidder identity
///
/// Inserting a budget for an existing bidder overwrites the previous entry
/// (last budget row wins, matching the ingestion contract).
///
/// # Example
/// ```
/// use adwords_simulator_core_rs::BudgetBook;
///
/// let mut book = BudgetBook::new();
/// book.insert("A".to_string(), 100.0);
/// book.insert("B".to_string(), 50.0);
/// assert_eq!(book.total(), 150.0);
/// assert_eq!(book.original_budget("A"), Some(100.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBook {
    budgets: BTreeMap<BidderId, f64>,
}

impl BudgetBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bidder's original budget, overwriting any previous value
    ///
    /// # Panics
    /// Panics if `budget` is negative or not finite.
    pub fn insert(&mut self, bidder: BidderId, budget: f64) {
        assert!(
            budget.is_finite() && budget >= 0.0,
            "budget must be a non-negative finite number"
        );
        self.budgets.insert(bidder, budget);
    }

    /// Original budget for a bidder, if one was recorded
    pub fn original_budget(&self, bidder: &str) -> Option<f64> {
        self.budgets.get(bidder).copied()
    }

    /// Whether the bidder has a budget entry
    pub fn contains(&self, bidder: &str) -> bool {
        self.budgets.contains_key(bidder)
    }

    /// Sum of all original budgets — the offline-optimal revenue bound
    pub fn total(&self) -> f64 {
        self.budgets.values().sum()
    }

    /// Number of bidders with a budget entry
    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    /// Whether the book holds no bidders
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }

    /// Iterate bidders and budgets in ascending bidder order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.budgets.iter().map(|(id, budget)| (id.as_str(), *budget))
    }
}

/// Mutable per-run budget state
///
/// Exactly one ledger exists per allocation run; it is discarded between
/// runs and re-derived from the book, so no residual spend leaks across
/// runs.
///
/// # Example
/// ```
/// use adwords_simulator_core_rs::{BudgetBook, BudgetLedger};
///
/// let mut book = BudgetBook::new();
/// book.insert("A".to_string(), 10.0);
///
/// let mut ledger = BudgetLedger::fresh(&book);
/// ledger.spend("A", 2.5).unwrap();
/// assert_eq!(ledger.remaining_budget("A"), Some(7.5));
/// assert_eq!(ledger.total_spent(), 2.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLedger {
    accounts: BTreeMap<BidderId, BidderAccount>,
}

impl BudgetLedger {
    /// Derive a fresh ledger from original budgets
    ///
    /// Every account starts with its full original budget, regardless of
    /// what any previous run spent.
    pub fn fresh(book: &BudgetBook) -> Self {
        let accounts = book
            .iter()
            .map(|(id, budget)| (id.to_string(), BidderAccount::new(id.to_string(), budget)))
            .collect();
        Self { accounts }
    }

    /// Get a bidder's account, if the ledger knows the bidder
    pub fn account(&self, bidder: &str) -> Option<&BidderAccount> {
        self.accounts.get(bidder)
    }

    /// Remaining budget for a bidder, if the ledger knows the bidder
    pub fn remaining_budget(&self, bidder: &str) -> Option<f64> {
        self.accounts.get(bidder).map(BidderAccount::remaining_budget)
    }

    /// Whether `bidder` can cover a bid of `amount`
    ///
    /// Unknown bidders can afford nothing.
    pub fn can_afford(&self, bidder: &str, amount: f64) -> bool {
        self.accounts
            .get(bidder)
            .map(|account| account.can_afford(amount))
            .unwrap_or(false)
    }

    /// Deduct a won bid from a bidder's remaining budget
    pub fn spend(&mut self, bidder: &str, amount: f64) -> Result<(), LedgerError> {
        match self.accounts.get_mut(bidder) {
            Some(account) => account.spend(amount),
            None => Err(LedgerError::UnknownBidder(bidder.to_string())),
        }
    }

    /// Total spent across all accounts this run
    ///
    /// Equals the revenue an allocation policy returned for the run
    /// (revenue conservation).
    pub fn total_spent(&self) -> f64 {
        self.accounts.values().map(BidderAccount::spent).sum()
    }

    /// Iterate accounts in ascending bidder order
    pub fn accounts(&self) -> impl Iterator<Item = &BidderAccount> {
        self.accounts.values()
    }

    /// Number of accounts in the ledger
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the ledger holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
