//! Bid graph
//!
//! The static eligibility/value relation between queries and bidders:
//! `query → (bidder → bid value)`. Built once from the bid table, never
//! mutated during simulation.
//!
//! The inner map is a `BTreeMap` so that policies scanning a query's bidders
//! always see them in ascending bidder-identity order — the tie-break order
//! every allocation rule depends on.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{BidderId, QueryId};

/// Static mapping from query to the bidders competing for it
///
/// # Example
/// ```
/// use adwords_simulator_core_rs::BidGraph;
///
/// let mut graph = BidGraph::new();
/// graph.insert_bid("shoes".to_string(), "A".to_string(), 0.5);
/// graph.insert_bid("shoes".to_string(), "B".to_string(), 0.75);
/// assert!(graph.contains_query("shoes"));
/// assert_eq!(graph.num_queries(), 1);
/// assert_eq!(graph.num_edges(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidGraph {
    bids: HashMap<QueryId, BTreeMap<BidderId, f64>>,
}

impl BidGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bidder's bid for a query
    ///
    /// A repeated (query, bidder) pair overwrites the earlier bid (last row
    /// wins, matching the ingestion contract).
    ///
    /// # Panics
    /// Panics if `bid` is negative or not finite.
    pub fn insert_bid(&mut self, query: QueryId, bidder: BidderId, bid: f64) {
        assert!(
            bid.is_finite() && bid >= 0.0,
            "bid must be a non-negative finite number"
        );
        self.bids.entry(query).or_default().insert(bidder, bid);
    }

    /// Bidders competing for a query, in ascending bidder order
    ///
    /// Returns `None` for queries the graph has never seen; such queries
    /// allocate nothing.
    pub fn bids_for(
        &self,
        query: &str,
    ) -> Option<&BTreeMap<BidderId, f64>> {
        self.bids.get(query)
    }

    /// Whether any bidder competes for the query
    pub fn contains_query(&self, query: &str) -> bool {
        self.bids.contains_key(query)
    }

    /// Number of distinct queries in the graph
    pub fn num_queries(&self) -> usize {
        self.bids.len()
    }

    /// Total number of (query, bidder) edges
    pub fn num_edges(&self) -> usize {
        self.bids.values().map(|bidders| bidders.len()).sum()
    }

    /// Distinct bidders appearing anywhere in the graph, ascending
    pub fn bidders(&self) -> BTreeSet<&str> {
        self.bids
            .values()
            .flat_map(|bidders| bidders.keys().map(String::as_str))
            .collect()
    }

    /// Iterate queries and their bidder maps (arbitrary query order)
    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&QueryId, &BTreeMap<BidderId, f64>)> {
        self.bids.iter()
    }

    /// Whether the graph holds no queries
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }
}
