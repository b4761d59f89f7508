//! Greedy policy
//!
//! Baseline policy: every query goes to the affordable bidder offering the
//! highest bid value, ignoring how much budget anyone has left. Fast to
//! exhaust the big spenders, which is exactly why its competitive ratio
//! suffers on adversarial orderings.

use super::AllocationPolicy;
use crate::models::{BidGraph, BudgetLedger, LedgerError, QueryId};

/// Greedy policy: highest affordable bid wins, ties to the smallest bidder
///
/// # Example
///
/// ```
/// use adwords_simulator_core_rs::policy::{AllocationPolicy, GreedyPolicy};
/// use adwords_simulator_core_rs::{BidGraph, BudgetBook, BudgetLedger};
///
/// let mut graph = BidGraph::new();
/// graph.insert_bid("shoes".to_string(), "A".to_string(), 3.0);
/// graph.insert_bid("shoes".to_string(), "B".to_string(), 7.0);
///
/// let mut book = BudgetBook::new();
/// book.insert("A".to_string(), 10.0);
/// book.insert("B".to_string(), 10.0);
///
/// let mut ledger = BudgetLedger::fresh(&book);
/// let revenue = GreedyPolicy
///     .allocate(&graph, &mut ledger, &["shoes".to_string()])
///     .unwrap();
/// assert_eq!(revenue, 7.0);
/// assert_eq!(ledger.remaining_budget("B"), Some(3.0));
/// ```
pub struct GreedyPolicy;

impl AllocationPolicy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn allocate(
        &self,
        graph: &BidGraph,
        ledger: &mut BudgetLedger,
        arrivals: &[QueryId],
    ) -> Result<f64, LedgerError> {
        let mut revenue = 0.0;

        for query in arrivals {
            let bids = match graph.bids_for(query) {
                Some(bids) => bids,
                None => continue, // unknown keyword: allocates nothing
            };

            // Ascending bidder scan; replace only on a strictly higher bid,
            // so the smallest identity keeps ties.
            let mut winner: Option<(&str, f64)> = None;
            for (bidder, &bid) in bids {
                let account = match ledger.account(bidder) {
                    Some(account) => account,
                    None => return Err(LedgerError::UnknownBidder(bidder.clone())),
                };
                if !account.can_afford(bid) {
                    continue;
                }
                match winner {
                    Some((_, best)) if bid <= best => {}
                    _ => winner = Some((bidder.as_str(), bid)),
                }
            }

            if let Some((bidder, bid)) = winner {
                ledger.spend(bidder, bid)?;
                revenue += bid;
            }
        }

        Ok(revenue)
    }
}
