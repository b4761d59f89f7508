//! Bidder account model
//!
//! Represents one advertiser's spendable budget for a single allocation run.
//! Each account has:
//! - `original_budget`: fixed for the simulation's duration
//! - `remaining_budget`: decremented as the account wins queries
//!
//! # Critical Invariant
//!
//! `0 ≤ remaining_budget ≤ original_budget` at all times. The only mutation
//! path is `spend`, which refuses overdrafts, so the invariant holds by
//! construction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::BidderId;

/// Errors raised by budget mutations
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("insufficient budget for bidder {bidder}: requested {requested}, remaining {remaining}")]
    InsufficientBudget {
        bidder: BidderId,
        requested: f64,
        remaining: f64,
    },

    #[error("unknown bidder: {0}")]
    UnknownBidder(BidderId),
}

/// One advertiser's budget state during an allocation run
///
/// # Example
/// ```
/// use adwords_simulator_core_rs::BidderAccount;
///
/// let mut account = BidderAccount::new("A".to_string(), 10.0);
/// account.spend(4.0).unwrap();
/// assert_eq!(account.remaining_budget(), 6.0);
/// assert_eq!(account.spent(), 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidderAccount {
    /// Unique bidder identifier (e.g., "17")
    id: BidderId,

    /// Budget the bidder started the run with; never changes during a run
    original_budget: f64,

    /// Budget still spendable; starts equal to `original_budget`
    remaining_budget: f64,
}

impl BidderAccount {
    /// Create a new account with its full budget available
    ///
    /// # Panics
    /// Panics if `original_budget` is negative or not finite.
    pub fn new(id: BidderId, original_budget: f64) -> Self {
        assert!(
            original_budget.is_finite() && original_budget >= 0.0,
            "original_budget must be a non-negative finite number"
        );
        Self {
            id,
            original_budget,
            remaining_budget: original_budget,
        }
    }

    /// Get bidder ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Budget the account started with
    pub fn original_budget(&self) -> f64 {
        self.original_budget
    }

    /// Budget still spendable
    pub fn remaining_budget(&self) -> f64 {
        self.remaining_budget
    }

    /// Amount spent so far this run
    pub fn spent(&self) -> f64 {
        self.original_budget - self.remaining_budget
    }

    /// Check whether the account can cover a bid of `amount`
    ///
    /// # Example
    /// ```
    /// use adwords_simulator_core_rs::BidderAccount;
    ///
    /// let account = BidderAccount::new("A".to_string(), 3.0);
    /// assert!(account.can_afford(3.0));
    /// assert!(!account.can_afford(5.0));
    /// ```
    pub fn can_afford(&self, amount: f64) -> bool {
        self.remaining_budget >= amount
    }

    /// Deduct a won bid from the remaining budget
    ///
    /// # Returns
    /// - Ok(()) if the account covered the amount
    /// - Err if the deduction would overdraw the budget
    pub fn spend(&mut self, amount: f64) -> Result<(), LedgerError> {
        assert!(
            amount.is_finite() && amount >= 0.0,
            "amount must be a non-negative finite number"
        );

        if !self.can_afford(amount) {
            return Err(LedgerError::InsufficientBudget {
                bidder: self.id.clone(),
                requested: amount,
                remaining: self.remaining_budget,
            });
        }

        self.remaining_budget -= amount;
        Ok(())
    }

    /// Fraction of the original budget spent so far, in [0, 1]
    ///
    /// Returns `None` when `original_budget` is zero: the fraction is
    /// undefined and such bidders must never win a query, so callers treat
    /// `None` as "permanently ineligible".
    ///
    /// # Example
    /// ```
    /// use adwords_simulator_core_rs::BidderAccount;
    ///
    /// let mut account = BidderAccount::new("A".to_string(), 10.0);
    /// account.spend(2.5).unwrap();
    /// assert_eq!(account.fraction_spent(), Some(0.25));
    ///
    /// let broke = BidderAccount::new("B".to_string(), 0.0);
    /// assert_eq!(broke.fraction_spent(), None);
    /// ```
    pub fn fraction_spent(&self) -> Option<f64> {
        if self.original_budget > 0.0 {
            Some(self.spent() / self.original_budget)
        } else {
            None
        }
    }
}
