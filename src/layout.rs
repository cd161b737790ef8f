//! Sheet geometry and anomaly thresholds.
//!
//! The tracker sheet's summary block sits at fixed coordinates by design,
//! while a handful of columns have drifted across revisions and need
//! name-based resolution. Both kinds of knowledge live here, as data rather
//! than as scattered magic numbers, so they can be re-validated against the
//! authoritative sheet without touching the builders.

/// A fixed cell coordinate, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Coordinates of the pre-computed headline figures near the top of the
/// monthly tracker.
#[derive(Debug, Clone)]
pub struct SummaryCells {
    pub principal: CellRef,
    pub profit: CellRef,
    pub eval_total: CellRef,
    pub return_pct: CellRef,
    pub months: CellRef,
    pub high_return_pct: CellRef,
    pub from_high_pct: CellRef,
    pub cum_dividend: CellRef,
    pub avg_monthly_profit: CellRef,
    pub cum_cap_gain: CellRef,
}

/// Absolute column indices of the net-worth category balances co-located in
/// the monthly tracker. These have been stable across sheet revisions.
#[derive(Debug, Clone)]
pub struct CategoryColumns {
    pub deposit: usize,
    pub invest: usize,
    pub pension: usize,
    pub car: usize,
    pub jeonse: usize,
    pub t_bond: usize,
    pub acc_card: usize,
    pub real_estate: usize,
    pub dividend: usize,
}

/// Geometry of the two tracker documents.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub summary: SummaryCells,
    /// Row holding the column header texts used for drift-tolerant lookup.
    pub header_row: usize,
    /// First row of monthly data, after the fixed header block.
    pub first_data_row: usize,
    /// How many leading cells of a data row may hold the period date.
    pub date_scan_width: usize,
    /// Monthly rows narrower than this are placeholders, not data.
    pub min_monthly_row_width: usize,
    /// Holdings rows narrower than this are placeholders, not data.
    pub min_holdings_row_width: usize,
    /// Monetary cells are stored in units of this many won.
    pub unit_multiplier: f64,
    /// Header substring identifying the running cumulative-dividend column.
    pub cum_dividend_header: String,
    /// Historical index of that column, for sheets predating the header text.
    pub cum_dividend_fallback_col: usize,
    /// Header substring identifying the net-worth total column.
    pub asset_total_header: String,
    /// Historical index of that column.
    pub asset_total_fallback_col: usize,
    pub categories: CategoryColumns,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            summary: SummaryCells {
                principal: CellRef::new(2, 10),
                profit: CellRef::new(2, 11),
                eval_total: CellRef::new(2, 12),
                return_pct: CellRef::new(2, 13),
                months: CellRef::new(3, 2),
                high_return_pct: CellRef::new(3, 4),
                from_high_pct: CellRef::new(3, 6),
                cum_dividend: CellRef::new(3, 11),
                avg_monthly_profit: CellRef::new(4, 2),
                cum_cap_gain: CellRef::new(4, 11),
            },
            header_row: 7,
            first_data_row: 14,
            date_scan_width: 4,
            min_monthly_row_width: 10,
            min_holdings_row_width: 8,
            unit_multiplier: 1000.0,
            cum_dividend_header: "누적 배당 수익".to_string(),
            cum_dividend_fallback_col: 58,
            asset_total_header: "TOTAL".to_string(),
            asset_total_fallback_col: 53,
            categories: CategoryColumns {
                deposit: 45,
                invest: 46,
                pension: 49,
                car: 51,
                jeonse: 52,
                t_bond: 54,
                acc_card: 55,
                real_estate: 56,
                dividend: 57,
            },
        }
    }
}

/// Corrections for known recurring data-entry defects in the source sheet.
///
/// These thresholds encode tolerance of one specific spreadsheet's history,
/// not financial truths; they are configuration so they can be re-validated
/// against the authoritative source.
#[derive(Debug, Clone)]
pub struct AnomalyPolicy {
    /// Return percentages with a magnitude above this are assumed to be
    /// stored 100x too large (a recurring upstream entry defect) and are
    /// divided by 100 before use.
    pub pct_scale_guard: f64,
    /// Rows with principal below this are early bootstrapping periods whose
    /// extreme percentage swings are statistically meaningless; their
    /// out-of-range returns are clamped to zero instead of rescaled.
    pub min_meaningful_principal: f64,
}

impl Default for AnomalyPolicy {
    fn default() -> Self {
        Self {
            pct_scale_guard: 500.0,
            min_meaningful_principal: 10_000_000.0,
        }
    }
}

impl AnomalyPolicy {
    /// Applies the scale-defect guard to a summary-block percentage cell:
    /// implausibly large magnitudes are assumed mis-scaled by 100x.
    pub fn correct_summary_pct(&self, raw: f64) -> f64 {
        if raw.abs() > self.pct_scale_guard {
            raw / 100.0
        } else {
            raw
        }
    }

    /// Applies both row-level corrections to a monthly return percentage, in
    /// order: clamp-to-zero for bootstrapping periods, then the scale guard.
    pub fn correct_row_pct(&self, raw: f64, principal: f64) -> f64 {
        if principal < self.min_meaningful_principal && raw.abs() > self.pct_scale_guard {
            0.0
        } else if raw.abs() > self.pct_scale_guard {
            raw / 100.0
        } else {
            raw
        }
    }
}
