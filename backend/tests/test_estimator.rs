//! Tests for the competitive-ratio estimator
//!
//! CRITICAL: estimates must be bit-reproducible. Same dataset, same policy,
//! same seed → the same three numbers, every time.

use adwords_simulator_core_rs::{
    BidGraph, BudgetBook, Estimator, EstimatorConfig, PolicyKind, SimulationError,
};

fn sample_graph() -> BidGraph {
    let mut graph = BidGraph::new();
    graph.insert_bid("shoes".to_string(), "A".to_string(), 2.0);
    graph.insert_bid("shoes".to_string(), "B".to_string(), 1.0);
    graph.insert_bid("boots".to_string(), "B".to_string(), 3.0);
    graph.insert_bid("socks".to_string(), "A".to_string(), 0.5);
    graph.insert_bid("socks".to_string(), "C".to_string(), 0.75);
    graph
}

fn sample_book() -> BudgetBook {
    let mut book = BudgetBook::new();
    book.insert("A".to_string(), 6.0);
    book.insert("B".to_string(), 9.0);
    book.insert("C".to_string(), 1.5);
    book
}

fn sample_arrivals() -> Vec<String> {
    ["shoes", "boots", "socks", "shoes", "boots", "socks", "shoes", "boots"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}

#[test]
fn test_estimates_are_bit_reproducible() {
    for kind in PolicyKind::ALL {
        let mut config = EstimatorConfig::new(kind);
        config.rng_seed = 42;

        let mut first =
            Estimator::new(sample_graph(), sample_book(), sample_arrivals(), config.clone())
                .unwrap();
        let mut second =
            Estimator::new(sample_graph(), sample_book(), sample_arrivals(), config).unwrap();

        let estimate1 = first.run().unwrap();
        let estimate2 = second.run().unwrap();

        assert_eq!(estimate1, estimate2, "{} estimate not reproducible", kind);
        // The cumulative shuffle walk must land both estimators on the very
        // same final ordering, not just the same revenue numbers.
        assert_eq!(first.arrivals(), second.arrivals(), "{} walk diverged", kind);
    }
}

#[test]
fn test_final_ordering_is_a_permutation_of_the_input() {
    let mut estimator = Estimator::new(
        sample_graph(),
        sample_book(),
        sample_arrivals(),
        EstimatorConfig::new(PolicyKind::Greedy),
    )
    .unwrap();
    estimator.run().unwrap();

    let mut final_order: Vec<String> = estimator.arrivals().to_vec();
    final_order.sort();
    let mut original = sample_arrivals();
    original.sort();
    assert_eq!(final_order, original);
}

#[test]
fn test_ratio_stays_within_unit_interval() {
    for kind in PolicyKind::ALL {
        let mut estimator = Estimator::new(
            sample_graph(),
            sample_book(),
            sample_arrivals(),
            EstimatorConfig::new(kind),
        )
        .unwrap();
        let estimate = estimator.run().unwrap();

        assert!(estimate.competitive_ratio >= 0.0, "{}", kind);
        assert!(
            estimate.competitive_ratio <= 1.0 + 1e-9,
            "{}: ratio {} above optimal",
            kind,
            estimate.competitive_ratio
        );
        assert!(estimate.avg_shuffled_revenue <= estimate.optimal_revenue + 1e-9);
    }
}

#[test]
fn test_saturated_instance_reaches_ratio_one() {
    // One bidder, budget 10, bid 5, two arrivals: every ordering yields
    // exactly the optimal revenue.
    let mut graph = BidGraph::new();
    graph.insert_bid("q".to_string(), "A".to_string(), 5.0);
    let mut book = BudgetBook::new();
    book.insert("A".to_string(), 10.0);
    let arrivals = vec!["q".to_string(), "q".to_string()];

    for kind in PolicyKind::ALL {
        let mut estimator =
            Estimator::new(graph.clone(), book.clone(), arrivals.clone(), EstimatorConfig::new(kind))
                .unwrap();
        let estimate = estimator.run().unwrap();

        assert_eq!(estimate.baseline_revenue, 10.0, "{}", kind);
        assert_eq!(estimate.avg_shuffled_revenue, 10.0, "{}", kind);
        assert_eq!(estimate.competitive_ratio, 1.0, "{}", kind);
        assert_eq!(estimate.optimal_revenue, 10.0, "{}", kind);
        assert_eq!(estimate.trials, 100, "{}", kind);
    }
}

#[test]
fn test_baseline_uses_ordering_as_given() {
    // Order-sensitive instance: whichever query arrives first takes enough
    // of A's budget to lock the other out, so the baseline number reveals
    // whether the as-given ordering was honored.
    let mut graph = BidGraph::new();
    graph.insert_bid("q1".to_string(), "A".to_string(), 3.0);
    graph.insert_bid("q2".to_string(), "A".to_string(), 2.0);

    let mut book = BudgetBook::new();
    book.insert("A".to_string(), 3.0);

    let forward = vec!["q1".to_string(), "q2".to_string()];
    let reverse = vec!["q2".to_string(), "q1".to_string()];

    let mut est_forward = Estimator::new(
        graph.clone(),
        book.clone(),
        forward,
        EstimatorConfig::new(PolicyKind::Greedy),
    )
    .unwrap();
    let mut est_reverse = Estimator::new(
        graph,
        book,
        reverse,
        EstimatorConfig::new(PolicyKind::Greedy),
    )
    .unwrap();

    // Forward: q1 takes the whole budget (3.0); q2 is unaffordable.
    assert_eq!(est_forward.run().unwrap().baseline_revenue, 3.0);
    // Reverse: q2 spends 2.0 first; q1 can no longer afford 3.0.
    assert_eq!(est_reverse.run().unwrap().baseline_revenue, 2.0);
}

#[test]
fn test_zero_trials_is_a_config_error() {
    let config = EstimatorConfig {
        policy: PolicyKind::Balance,
        trials: 0,
        rng_seed: 0,
    };
    let err = Estimator::new(sample_graph(), sample_book(), sample_arrivals(), config)
        .unwrap_err();
    assert!(matches!(err, SimulationError::InvalidConfig(_)));
}

#[test]
fn test_malformed_graph_rejected_before_running() {
    let mut graph = sample_graph();
    graph.insert_bid("hats".to_string(), "nobody".to_string(), 1.0);

    let err = Estimator::new(
        graph,
        sample_book(),
        sample_arrivals(),
        EstimatorConfig::new(PolicyKind::Msvv),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        SimulationError::UnknownBidder { ref query, ref bidder }
            if query == "hats" && bidder == "nobody"
    ));
}

#[test]
fn test_zero_optimal_reports_zero_ratio() {
    // All budgets zero: no policy can realize revenue and the ratio
    // denominator degenerates; the estimator must report 0, not NaN.
    let mut graph = BidGraph::new();
    graph.insert_bid("q".to_string(), "A".to_string(), 1.0);
    let mut book = BudgetBook::new();
    book.insert("A".to_string(), 0.0);

    for kind in PolicyKind::ALL {
        let mut estimator = Estimator::new(
            graph.clone(),
            book.clone(),
            vec!["q".to_string()],
            EstimatorConfig::new(kind),
        )
        .unwrap();
        let estimate = estimator.run().unwrap();

        assert_eq!(estimate.baseline_revenue, 0.0, "{}", kind);
        assert_eq!(estimate.competitive_ratio, 0.0, "{}", kind);
        assert!(estimate.competitive_ratio.is_finite(), "{}", kind);
    }
}

#[test]
fn test_estimate_serializes_to_json() {
    let mut estimator = Estimator::new(
        sample_graph(),
        sample_book(),
        sample_arrivals(),
        EstimatorConfig::new(PolicyKind::Greedy),
    )
    .unwrap();
    let estimate = estimator.run().unwrap();

    let json = serde_json::to_value(&estimate).unwrap();
    for field in [
        "baseline_revenue",
        "avg_shuffled_revenue",
        "competitive_ratio",
        "optimal_revenue",
        "trials",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
}
