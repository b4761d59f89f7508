//! Dataset ingestion
//!
//! Folds the two input files into the structures the engine consumes:
//!
//! - the **bid table**: comma-separated rows of
//!   `(bidder, keyword, bid value, optional budget)` with a header line. A
//!   bidder's budget appears on only some of its rows (the rest leave the
//!   field empty or NaN); folding collects the budgets into a [`BudgetBook`]
//!   and the bids into a [`BidGraph`].
//! - the **arrival list**: one query keyword per line, defining the online
//!   arrival ordering. Duplicates are allowed; keywords the graph has never
//!   seen stay in the ordering and simply allocate nothing.
//!
//! A bidder with bid rows but no budget row is a fatal inconsistency — the
//! fold rejects the whole dataset rather than let a budget-less bidder reach
//! a policy loop.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::{BidGraph, BidderId, BudgetBook, QueryId};

/// One parsed bid-table row
#[derive(Debug, Clone, PartialEq)]
pub struct BidRow {
    /// Bidder placing the bid
    pub bidder: BidderId,

    /// Query keyword the bid targets
    pub keyword: QueryId,

    /// Offered bid value (non-negative)
    pub bid: f64,

    /// Bidder's total budget, on the rows that carry it
    pub budget: Option<f64>,
}

/// Errors raised while reading or folding the input files
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 4 comma-separated fields, found {found}")]
    MalformedRow { line: usize, found: usize },

    #[error("line {line}: invalid number in {field} field: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: negative value in {field} field: {value}")]
    NegativeValue {
        line: usize,
        field: &'static str,
        value: f64,
    },

    #[error("bidder {0} has bid rows but no budget entry")]
    MissingBudget(BidderId),
}

/// Parse the bid table from any buffered reader
///
/// The first line is a header and is skipped; blank lines are ignored. An
/// empty or NaN budget field means "no budget on this row". Malformed rows,
/// unparseable numbers, and negative values are fatal.
///
/// # Example
/// ```
/// use adwords_simulator_core_rs::dataset;
///
/// let table = "Advertiser,Keyword,Bid Value,Budget\n\
///              1,shoes,0.50,100\n\
///              1,boots,0.75,\n";
/// let rows = dataset::read_bid_table(table.as_bytes()).unwrap();
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].budget, Some(100.0));
/// assert_eq!(rows[1].budget, None);
/// ```
pub fn read_bid_table<R: BufRead>(reader: R) -> Result<Vec<BidRow>, DatasetError> {
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        if number == 1 || line.trim().is_empty() {
            continue; // header or blank
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(DatasetError::MalformedRow {
                line: number,
                found: fields.len(),
            });
        }

        let bidder = fields[0].trim().to_string();
        let keyword = fields[1].trim().to_string();
        let bid = parse_field(fields[2], number, "bid value")?;
        let budget = parse_budget(fields[3], number)?;

        rows.push(BidRow {
            bidder,
            keyword,
            bid,
            budget,
        });
    }

    Ok(rows)
}

/// Parse a required non-negative numeric field
fn parse_field(raw: &str, line: usize, field: &'static str) -> Result<f64, DatasetError> {
    let trimmed = raw.trim();
    let value: f64 = trimmed.parse().map_err(|_| DatasetError::InvalidNumber {
        line,
        field,
        value: trimmed.to_string(),
    })?;
    if !value.is_finite() {
        return Err(DatasetError::InvalidNumber {
            line,
            field,
            value: trimmed.to_string(),
        });
    }
    if value < 0.0 {
        return Err(DatasetError::NegativeValue { line, field, value });
    }
    Ok(value)
}

/// Parse the optional budget field: empty and NaN both mean "not on this row"
fn parse_budget(raw: &str, line: usize) -> Result<Option<f64>, DatasetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let value: f64 = trimmed.parse().map_err(|_| DatasetError::InvalidNumber {
        line,
        field: "budget",
        value: trimmed.to_string(),
    })?;
    if value.is_nan() {
        return Ok(None);
    }
    if !value.is_finite() {
        return Err(DatasetError::InvalidNumber {
            line,
            field: "budget",
            value: trimmed.to_string(),
        });
    }
    if value < 0.0 {
        return Err(DatasetError::NegativeValue {
            line,
            field: "budget",
            value,
        });
    }
    Ok(Some(value))
}

/// Fold parsed rows into the bid graph and budget book
///
/// Later budget rows for the same bidder overwrite earlier ones, as do
/// repeated (keyword, bidder) bids. Every bidder appearing in a bid row
/// must have a budget somewhere in the table.
///
/// # Example
/// ```
/// use adwords_simulator_core_rs::dataset;
///
/// let table = "Advertiser,Keyword,Bid Value,Budget\n\
///              1,shoes,0.50,100\n\
///              1,boots,0.75,\n";
/// let rows = dataset::read_bid_table(table.as_bytes()).unwrap();
/// let (graph, book) = dataset::fold_rows(rows).unwrap();
/// assert_eq!(graph.num_queries(), 2);
/// assert_eq!(book.total(), 100.0);
/// ```
pub fn fold_rows(rows: Vec<BidRow>) -> Result<(BidGraph, BudgetBook), DatasetError> {
    let mut graph = BidGraph::new();
    let mut book = BudgetBook::new();

    for row in rows {
        if let Some(budget) = row.budget {
            book.insert(row.bidder.clone(), budget);
        }
        graph.insert_bid(row.keyword, row.bidder, row.bid);
    }

    for bidder in graph.bidders() {
        if !book.contains(bidder) {
            return Err(DatasetError::MissingBudget(bidder.to_string()));
        }
    }

    Ok((graph, book))
}

/// Read the arrival list: one keyword per line, duplicates allowed
///
/// Surrounding whitespace is trimmed and blank lines are skipped. Keywords
/// are NOT checked against any graph here — unknown keywords are legal and
/// allocate nothing.
pub fn read_arrivals<R: BufRead>(reader: R) -> Result<Vec<QueryId>, DatasetError> {
    let mut arrivals = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let keyword = line.trim();
        if !keyword.is_empty() {
            arrivals.push(keyword.to_string());
        }
    }
    Ok(arrivals)
}

/// Load and fold the bid table from a file path
pub fn load_bid_table<P: AsRef<Path>>(path: P) -> Result<(BidGraph, BudgetBook), DatasetError> {
    let file = File::open(path)?;
    let rows = read_bid_table(BufReader::new(file))?;
    let folded = fold_rows(rows)?;
    info!(
        queries = folded.0.num_queries(),
        edges = folded.0.num_edges(),
        bidders = folded.1.len(),
        "bid table folded"
    );
    Ok(folded)
}

/// Load the arrival list from a file path
pub fn load_arrivals<P: AsRef<Path>>(path: P) -> Result<Vec<QueryId>, DatasetError> {
    let file = File::open(path)?;
    let arrivals = read_arrivals(BufReader::new(file))?;
    debug!(count = arrivals.len(), "arrival list loaded");
    Ok(arrivals)
}
