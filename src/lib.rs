//! # Portfolio Sheet Parser
//!
//! A library for turning a hand-edited personal-finance spreadsheet export
//! into a clean, strongly-typed time series for a presentation layer.
//!
//! The source is a tab-delimited text blob maintained by hand over years:
//! columns get added and reordered, monetary values arrive pre-multiplied by
//! 1000, percentages are sometimes stored 100x too large, cells hold `#N/A`
//! or currency symbols. This crate absorbs that mess deterministically.
//!
//! ## Core Concepts
//!
//! - **Lexical coercion**: every cell reads as a definite number under one
//!   fail-to-zero rule ([`coerce::coerce`])
//! - **Period keys**: heterogeneous date tokens normalize to canonical
//!   `YYYY-MM` strings ([`period::normalize_period`])
//! - **Schema-drift tolerance**: variable-position columns resolve by header
//!   text with a fixed-index fallback ([`monthly::resolve_column`])
//! - **Carry-forward**: sparsely-populated cumulative columns become step
//!   functions, never interpolations
//!
//! ## Example
//!
//! ```rust,ignore
//! use portfolio_sheet_parser::*;
//!
//! let monthly_text = fetch_monthly_document()?;   // external collaborator
//! let holdings_text = fetch_holdings_document()?; // external collaborator
//!
//! let data = TrackerParser::default().parse(&monthly_text, &holdings_text)?;
//! println!("{} months, {} holdings", data.monthly.len(), data.holdings.len());
//! ```

pub mod coerce;
pub mod error;
pub mod grid;
pub mod holdings;
pub mod layout;
pub mod model;
pub mod monthly;
pub mod period;
pub mod yearly;

pub use coerce::coerce;
pub use error::{Result, SheetParseError};
pub use grid::RawGrid;
pub use holdings::build_holdings;
pub use layout::{AnomalyPolicy, CategoryColumns, CellRef, SheetLayout, SummaryCells};
pub use model::{HoldingRecord, MonthlyRecord, Summary, TrackerData, YearlyRecord};
pub use monthly::MonthlySeriesBuilder;
pub use period::normalize_period;
pub use yearly::derive_yearly;

use log::{debug, info};

/// Top-level entry point: both documents in, the full [`TrackerData`] out.
///
/// Pure with respect to its inputs; all intermediate state is local to one
/// invocation, so separate calls may run concurrently on different inputs.
#[derive(Debug, Clone, Default)]
pub struct TrackerParser {
    pub layout: SheetLayout,
    pub policy: AnomalyPolicy,
}

impl TrackerParser {
    pub fn new(layout: SheetLayout, policy: AnomalyPolicy) -> Self {
        Self { layout, policy }
    }

    /// Parses the monthly tracker document into a summary and sorted series.
    pub fn parse_monthly(&self, text: &str) -> Result<(Summary, Vec<MonthlyRecord>)> {
        let grid = RawGrid::from_text(text);
        debug!("Monthly document tokenized into {} rows", grid.len());
        MonthlySeriesBuilder::new(&self.layout, &self.policy).build(&grid)
    }

    /// Parses the holdings document into a weight-sorted position list.
    pub fn parse_holdings(&self, text: &str) -> Result<Vec<HoldingRecord>> {
        let grid = RawGrid::from_text(text);
        debug!("Holdings document tokenized into {} rows", grid.len());
        build_holdings(&grid, &self.layout)
    }

    /// Runs the whole pipeline: monthly series, holdings table, and the
    /// yearly rollup derived from the monthly series.
    pub fn parse(&self, monthly_text: &str, holdings_text: &str) -> Result<TrackerData> {
        let (summary, monthly) = self.parse_monthly(monthly_text)?;
        let holdings = self.parse_holdings(holdings_text)?;
        let yearly = derive_yearly(&monthly);

        info!(
            "Parsed tracker: {} monthly records, {} holdings, {} years",
            monthly.len(),
            holdings.len(),
            yearly.len()
        );

        Ok(TrackerData {
            summary,
            monthly,
            holdings,
            yearly,
        })
    }
}

/// Convenience wrapper over [`TrackerParser::parse_monthly`] with the
/// authoritative sheet layout and default anomaly policy.
pub fn parse_monthly_document(text: &str) -> Result<(Summary, Vec<MonthlyRecord>)> {
    TrackerParser::default().parse_monthly(text)
}

/// Convenience wrapper over [`TrackerParser::parse_holdings`].
pub fn parse_holdings_document(text: &str) -> Result<Vec<HoldingRecord>> {
    TrackerParser::default().parse_holdings(text)
}
