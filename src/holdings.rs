//! Holdings Table Builder: one row per security position.
//!
//! Structurally the simple sibling of the monthly builder: no dates, no
//! carry-forward, no anomaly correction. Malformed rows are skipped, and the
//! percent columns arrive already percent-scaled.

use crate::coerce::coerce;
use crate::error::{Result, SheetParseError};
use crate::grid::{cell_at, RawGrid};
use crate::layout::SheetLayout;
use crate::model::HoldingRecord;
use log::debug;
use std::cmp::Ordering;

const COUNTRY_COL: usize = 0;
const CODE_COL: usize = 1;
const NAME_COL: usize = 2;
const TYPE_COL: usize = 3;
const QTY_COL: usize = 4;
const BUY_AMOUNT_COL: usize = 5;
const EVAL_AMOUNT_COL: usize = 6;
const PROFIT_COL: usize = 7;
const RETURN_PCT_COL: usize = 8;
const WEIGHT_COL: usize = 9;

/// Parses the holdings document, skipping the header row, then every row with
/// a blank name or non-positive market value. Output is sorted descending by
/// portfolio weight.
pub fn build_holdings(grid: &RawGrid, layout: &SheetLayout) -> Result<Vec<HoldingRecord>> {
    let mut holdings = Vec::new();

    for index in 1..grid.len() {
        let cells = match grid.row(index) {
            Some(cells) => cells,
            None => break,
        };
        if cells.len() < layout.min_holdings_row_width {
            continue;
        }

        let name = cell_at(cells, NAME_COL).trim();
        if name.is_empty() {
            continue;
        }

        let eval_amount = coerce(cell_at(cells, EVAL_AMOUNT_COL));
        if eval_amount <= 0.0 {
            debug!("Skipping holding {:?}: non-positive market value", name);
            continue;
        }

        holdings.push(HoldingRecord {
            country: cell_at(cells, COUNTRY_COL).trim().to_string(),
            code: cell_at(cells, CODE_COL).trim().to_string(),
            name: name.to_string(),
            asset_type: cell_at(cells, TYPE_COL).trim().to_string(),
            qty: coerce(cell_at(cells, QTY_COL)),
            buy_amount: coerce(cell_at(cells, BUY_AMOUNT_COL)),
            eval_amount,
            profit: coerce(cell_at(cells, PROFIT_COL)),
            return_pct: coerce(cell_at(cells, RETURN_PCT_COL)),
            weight: coerce(cell_at(cells, WEIGHT_COL)),
        });
    }

    if holdings.is_empty() {
        return Err(SheetParseError::EmptyHoldings(grid.len()));
    }

    holdings.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
    });

    debug!("Holdings scan produced {} positions", holdings.len());
    Ok(holdings)
}
