//! Monthly Series Builder: turns the raw tracker grid into a
//! `(Summary, Vec<MonthlyRecord>)` pair.
//!
//! This is where all the sheet's mess is absorbed: the fixed-position summary
//! block, header-based resolution of drifted columns, date-column discovery
//! per row, scale-defect corrections, the cumulative-dividend carry-forward,
//! and duplicate-period merging.

use crate::coerce::coerce;
use crate::error::{Result, SheetParseError};
use crate::grid::{cell_at, RawGrid};
use crate::layout::{AnomalyPolicy, CellRef, SheetLayout};
use crate::model::{MonthlyRecord, Summary};
use crate::period::normalize_period;
use log::debug;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Core-column offsets relative to the resolved date column. Structural to
/// the sheet's data block, unlike the drifting absolute columns in
/// [`SheetLayout`].
const PRINCIPAL_OFFSET: usize = 1;
const EVAL_OFFSET: usize = 2;
const PROFIT_OFFSET: usize = 3;
const PRINCIPAL_CHG_OFFSET: usize = 4;
const RETURN_PCT_OFFSET: usize = 6;

/// Resolves a drifting column: substring match on the header row first, then
/// the known historical index for sheet layouts predating the header text.
pub fn resolve_column(header: &[String], needle: &str, fallback: usize) -> usize {
    match header.iter().position(|h| h.contains(needle)) {
        Some(idx) => idx,
        None => {
            debug!(
                "Header lookup for {:?} failed, using fallback column {}",
                needle, fallback
            );
            fallback
        }
    }
}

/// Scan-order accumulator for the sparsely-populated cumulative-dividend
/// column. Produces a step function: zero until the first positive source
/// value, then the latest positive value until superseded.
#[derive(Debug, Default)]
struct DividendCarry {
    current: f64,
    seen: bool,
}

impl DividendCarry {
    fn observe(&mut self, raw: f64) -> f64 {
        if raw > 0.0 {
            self.seen = true;
            self.current = raw;
        }
        if self.seen {
            self.current
        } else {
            0.0
        }
    }
}

pub struct MonthlySeriesBuilder<'a> {
    layout: &'a SheetLayout,
    policy: &'a AnomalyPolicy,
}

impl<'a> MonthlySeriesBuilder<'a> {
    pub fn new(layout: &'a SheetLayout, policy: &'a AnomalyPolicy) -> Self {
        Self { layout, policy }
    }

    /// Runs the full scan. Fails only when no usable monthly row was found,
    /// which signals a document that is not in the expected shape at all.
    pub fn build(&self, grid: &RawGrid) -> Result<(Summary, Vec<MonthlyRecord>)> {
        let mut summary = self.read_summary(grid);

        let empty_header: &[String] = &[];
        let header = grid.row(self.layout.header_row).unwrap_or(empty_header);
        let cum_div_col = resolve_column(
            header,
            &self.layout.cum_dividend_header,
            self.layout.cum_dividend_fallback_col,
        );
        let asset_total_col = resolve_column(
            header,
            &self.layout.asset_total_header,
            self.layout.asset_total_fallback_col,
        );

        let mut carry = DividendCarry::default();
        let mut by_period: BTreeMap<String, MonthlyRecord> = BTreeMap::new();

        for index in self.layout.first_data_row..grid.len() {
            let cells = match grid.row(index) {
                Some(cells) => cells,
                None => break,
            };
            let record = match self.parse_row(cells, cum_div_col, asset_total_col, &mut carry) {
                Some(record) => record,
                None => continue,
            };

            match by_period.entry(record.period.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
                Entry::Occupied(mut slot) => {
                    debug!("Duplicate rows for period {}, merging", record.period);
                    merge_preferring_nonzero(slot.get_mut(), &record);
                }
            }
        }

        if by_period.is_empty() {
            return Err(SheetParseError::EmptyMonthlySeries(grid.len()));
        }

        // BTreeMap iteration gives the ascending-by-period order the
        // consumers rely on.
        let monthly: Vec<MonthlyRecord> = by_period.into_values().collect();

        // The summary block's own cumulative figures lag behind hand edits;
        // the reconstructed series is authoritative for them.
        if let Some(last) = monthly.last() {
            summary.cum_dividend = last.cum_dividend;
            summary.cum_cap_gain = last.cap_gain;
        }

        debug!("Monthly scan produced {} records", monthly.len());
        Ok((summary, monthly))
    }

    /// Reads the fixed-position headline block. Monetary cells are stored in
    /// units of 1000; percentage cells pass the scale-defect guard.
    fn read_summary(&self, grid: &RawGrid) -> Summary {
        let cells = &self.layout.summary;
        let raw = |cell: CellRef| coerce(grid.cell(cell.row, cell.col));
        let money = |cell: CellRef| raw(cell) * self.layout.unit_multiplier;

        let profit = money(cells.profit);
        let cum_dividend = money(cells.cum_dividend);
        let mut cum_cap_gain = money(cells.cum_cap_gain);
        if cum_cap_gain == 0.0 {
            cum_cap_gain = profit - cum_dividend;
        }

        Summary {
            principal: money(cells.principal),
            profit,
            eval_total: money(cells.eval_total),
            return_pct: self.policy.correct_summary_pct(raw(cells.return_pct)),
            months: raw(cells.months),
            high_return_pct: self.policy.correct_summary_pct(raw(cells.high_return_pct)),
            from_high_pct: raw(cells.from_high_pct),
            cum_dividend,
            avg_monthly_profit: money(cells.avg_monthly_profit),
            cum_cap_gain,
        }
    }

    /// Parses one data row, or `None` for placeholder/incomplete rows (too
    /// narrow, no resolvable date, non-positive principal).
    fn parse_row(
        &self,
        cells: &[String],
        cum_div_col: usize,
        asset_total_col: usize,
        carry: &mut DividendCarry,
    ) -> Option<MonthlyRecord> {
        if cells.len() < self.layout.min_monthly_row_width {
            return None;
        }

        let (date_col, period) = (0..self.layout.date_scan_width)
            .find_map(|col| normalize_period(cell_at(cells, col)).map(|p| (col, p)))?;

        let money = |col: usize| coerce(cell_at(cells, col)) * self.layout.unit_multiplier;

        let principal = money(date_col + PRINCIPAL_OFFSET);
        if principal <= 0.0 {
            debug!("Skipping row for {}: non-positive principal", period);
            return None;
        }

        let cum_dividend = carry.observe(money(cum_div_col));

        let mut eval_total = money(date_col + EVAL_OFFSET);
        if eval_total == 0.0 {
            eval_total = principal;
        }

        let profit = money(date_col + PROFIT_OFFSET);
        let raw_return = coerce(cell_at(cells, date_col + RETURN_PCT_OFFSET));
        let categories = &self.layout.categories;

        Some(MonthlyRecord {
            period,
            principal,
            eval_total,
            profit,
            principal_chg: money(date_col + PRINCIPAL_CHG_OFFSET),
            return_pct: self.policy.correct_row_pct(raw_return, principal),
            cum_dividend,
            cap_gain: profit - cum_dividend,
            dividend: money(categories.dividend),
            asset_total: money(asset_total_col),
            invest: money(categories.invest),
            real_estate: money(categories.real_estate),
            t_bond: money(categories.t_bond),
            deposit: money(categories.deposit),
            pension: money(categories.pension),
            car: money(categories.car),
            jeonse: money(categories.jeonse),
            acc_card: money(categories.acc_card),
        })
    }
}

/// Field-wise merge for duplicate period keys: the later-scanned row wins
/// wherever it carries a non-zero value, the earlier value survives where it
/// does not.
fn merge_preferring_nonzero(into: &mut MonthlyRecord, newer: &MonthlyRecord) {
    fn pick(dst: &mut f64, src: f64) {
        if src != 0.0 {
            *dst = src;
        }
    }

    pick(&mut into.principal, newer.principal);
    pick(&mut into.eval_total, newer.eval_total);
    pick(&mut into.profit, newer.profit);
    pick(&mut into.principal_chg, newer.principal_chg);
    pick(&mut into.return_pct, newer.return_pct);
    pick(&mut into.cum_dividend, newer.cum_dividend);
    pick(&mut into.cap_gain, newer.cap_gain);
    pick(&mut into.dividend, newer.dividend);
    pick(&mut into.asset_total, newer.asset_total);
    pick(&mut into.invest, newer.invest);
    pick(&mut into.real_estate, newer.real_estate);
    pick(&mut into.t_bond, newer.t_bond);
    pick(&mut into.deposit, newer.deposit);
    pick(&mut into.pension, newer.pension);
    pick(&mut into.car, newer.car);
    pick(&mut into.jeonse, newer.jeonse);
    pick(&mut into.acc_card, newer.acc_card);
}
