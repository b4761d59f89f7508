//! MSVV policy (scaled balance)
//!
//! The Mehta-Saberi-Vazirani-Vazirani rule: score every affordable bidder by
//! `bid × ψ(fraction_spent)` and take the highest score. The ψ discount
//! (see [`scaling`]) shrinks as a bidder's budget drains, trading raw bid
//! value against budget headroom — the hedge that gives MSVV its 1 − 1/e
//! worst-case guarantee.
//!
//! Bidders whose original budget is zero have no defined spend fraction and
//! are permanently ineligible.
//!
//! [`scaling`]: super::scaling

use super::scaling::psi;
use super::AllocationPolicy;
use crate::models::{BidGraph, BudgetLedger, LedgerError, QueryId};

/// MSVV policy: largest ψ-scaled bid wins
///
/// Same ascending-identity scan and strict-improvement rule as
/// [`BalancePolicy`](super::BalancePolicy), so score ties resolve to the
/// smallest bidder identity. The winner is charged its raw bid value, not
/// the scaled score.
pub struct MsvvPolicy;

impl AllocationPolicy for MsvvPolicy {
    fn name(&self) -> &'static str {
        "msvv"
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
            let mut winner_score = 0.0;
            for (bidder, &bid) in bids {
                let account = match ledger.account(bidder) {
                    Some(account) => account,
                    None => return Err(LedgerError::UnknownBidder(bidder.clone())),
                };
                if !account.can_afford(bid) {
                    continue;
                }
                // Zero-budget bidders have no spend fraction: ineligible.
                let fraction = match account.fraction_spent() {
                    Some(fraction) => fraction,
                    None => continue,
                };
                let score = bid * psi(fraction);
                if score > winner_score {
                    winner_score = score;
                    winner = Some((bidder.as_str(), bid));
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
