//! Property tests for the allocation invariants
//!
//! Generates arbitrary bid graphs, budgets, and arrival orderings and checks
//! the properties every policy must uphold on all of them: budgets never go
//! negative, revenue equals total spend, and re-running from a fresh ledger
//! reproduces the result exactly.

use proptest::prelude::*;

use adwords_simulator_core_rs::{BidGraph, BudgetBook, BudgetLedger, PolicyKind};

const BIDDERS: [&str; 4] = ["a", "b", "c", "d"];
const QUERIES: [&str; 5] = ["q0", "q1", "q2", "q3", "q4"];

#[derive(Debug, Clone)]
struct Instance {
    graph: BidGraph,
    book: BudgetBook,
    arrivals: Vec<String>,
}

fn arb_instance() -> impl Strategy<Value = Instance> {
    let budgets = proptest::collection::vec(0.0f64..50.0, BIDDERS.len());
    let edges = proptest::collection::vec(
        (0..BIDDERS.len(), 0..QUERIES.len(), 0.0f64..10.0),
        1..20,
    );
    let arrivals = proptest::collection::vec(0..QUERIES.len(), 0..30);

    (budgets, edges, arrivals).prop_map(|(budgets, edges, arrival_indices)| {
        let mut book = BudgetBook::new();
        for (bidder, budget) in BIDDERS.iter().zip(&budgets) {
            book.insert(bidder.to_string(), *budget);
        }

        let mut graph = BidGraph::new();
        for (bidder_idx, query_idx, bid) in edges {
            graph.insert_bid(
                QUERIES[query_idx].to_string(),
                BIDDERS[bidder_idx].to_string(),
                bid,
            );
        }

        let arrivals = arrival_indices
            .into_iter()
            .map(|idx| QUERIES[idx].to_string())
            .collect();

        Instance {
            graph,
            book,
            arrivals,
        }
    })
}

proptest! {
    #[test]
    fn prop_budgets_never_go_negative(instance in arb_instance()) {
        for kind in PolicyKind::ALL {
            let mut ledger = BudgetLedger::fresh(&instance.book);
            kind.policy()
                .allocate(&instance.graph, &mut ledger, &instance.arrivals)
                .unwrap();

            for account in ledger.accounts() {
                prop_assert!(
                    account.remaining_budget() >= 0.0,
                    "{}: {} went negative: {}",
                    kind,
                    account.id(),
                    account.remaining_budget()
                );
                prop_assert!(
                    account.remaining_budget() <= account.original_budget(),
                    "{}: {} above original budget",
                    kind,
                    account.id()
                );
            }
        }
    }

    #[test]
    fn prop_revenue_equals_total_spend(instance in arb_instance()) {
        for kind in PolicyKind::ALL {
            let mut ledger = BudgetLedger::fresh(&instance.book);
            let revenue = kind.policy()
                .allocate(&instance.graph, &mut ledger, &instance.arrivals)
                .unwrap();

            prop_assert!(revenue >= 0.0);
            prop_assert!(
                (revenue - ledger.total_spent()).abs() < 1e-6,
                "{}: revenue {} vs spent {}",
                kind,
                revenue,
                ledger.total_spent()
            );
            prop_assert!(
                revenue <= instance.book.total() + 1e-6,
                "{}: revenue {} above optimal {}",
                kind,
                revenue,
                instance.book.total()
            );
        }
    }

    #[test]
    fn prop_fresh_ledger_reruns_are_identical(instance in arb_instance()) {
        for kind in PolicyKind::ALL {
            let mut first_ledger = BudgetLedger::fresh(&instance.book);
            let first = kind.policy()
                .allocate(&instance.graph, &mut first_ledger, &instance.arrivals)
                .unwrap();

            let mut second_ledger = BudgetLedger::fresh(&instance.book);
            let second = kind.policy()
                .allocate(&instance.graph, &mut second_ledger, &instance.arrivals)
                .unwrap();

            prop_assert_eq!(first, second, "{} not deterministic", kind);
            prop_assert_eq!(&first_ledger, &second_ledger, "{} ledgers diverged", kind);
        }
    }
}
