//! Balance policy
//!
//! Awards each query to the affordable bidder with the most budget left,
//! ignoring bid values when choosing. Spend therefore stays level across
//! bidders, which protects budgets against unlucky orderings.

use super::AllocationPolicy;
use crate::models::{BidGraph, BudgetLedger, LedgerError, QueryId};

/// Balance policy: largest remaining budget wins
///
/// Bidders are scanned in ascending identity order and the incumbent is
/// replaced only on a strictly larger remaining budget, so ties resolve to
/// the smallest identity.
pub struct BalancePolicy;

impl AllocationPolicy for BalancePolicy {
    fn name(&self) -> &'static str {
        "balance"
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
                None => continue,
            };

            let mut winner: Option<(&str, f64)> = None;
            let mut winner_remaining = 0.0;
            for (bidder, &bid) in bids {
                let account = match ledger.account(bidder) {
                    Some(account) => account,
                    None => return Err(LedgerError::UnknownBidder(bidder.clone())),
                };
                if !account.can_afford(bid) {
                    continue;
                }
                if account.remaining_budget() > winner_remaining {
                    winner_remaining = account.remaining_budget();
                    winner = Some((bidder.as_str(), bid));
                }
            }

            if let Some((bidder, bid)) = winner {
                // A zero-value winning bid moves no money and earns nothing.
                if bid > 0.0 {
                    ledger.spend(bidder, bid)?;
                    revenue += bid;
                }
            }
        }

        Ok(revenue)
    }
}
