//! Output data model consumed by presentation collaborators.
//!
//! All structures are plain immutable value objects rebuilt from scratch on
//! every parse; there is no persistent store behind them. Amounts are in won,
//! already rescaled from the sheet's units-of-1000 encoding.

use serde::{Deserialize, Serialize};

/// All-time account state as of the most recent processed period.
///
/// Seeded from the sheet's fixed summary cells, then reconciled against the
/// reconstructed monthly series: once that series is non-empty,
/// `cum_dividend` and `cum_cap_gain` always equal the corresponding fields of
/// the chronologically last [`MonthlyRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Cumulative contributed capital.
    pub principal: f64,
    /// Open profit.
    pub profit: f64,
    /// Current market value.
    pub eval_total: f64,
    /// Overall return percentage.
    pub return_pct: f64,
    /// Elapsed months invested.
    pub months: f64,
    /// Historical peak return percentage.
    pub high_return_pct: f64,
    /// Drawdown from the peak, in percentage points.
    pub from_high_pct: f64,
    /// Cumulative dividend income.
    pub cum_dividend: f64,
    /// Average monthly profit.
    pub avg_monthly_profit: f64,
    /// Cumulative capital-gain (non-dividend) profit.
    pub cum_cap_gain: f64,
}

/// One month of the tracker, uniquely keyed by its `YYYY-MM` period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Canonical `YYYY-MM` period key.
    pub period: String,
    /// Cumulative contributed capital.
    pub principal: f64,
    /// Market value at period end.
    pub eval_total: f64,
    /// Open profit as recorded in the sheet (not recomputed; the sheet may
    /// encode adjustments that `eval_total - principal` would miss).
    pub profit: f64,
    /// Period-over-period change in principal.
    pub principal_chg: f64,
    /// Period return percentage, after anomaly correction.
    pub return_pct: f64,
    /// Running cumulative dividend income (carry-forward field).
    pub cum_dividend: f64,
    /// Profit minus cumulative dividend.
    pub cap_gain: f64,
    /// Dividend income recorded for this month alone.
    pub dividend: f64,
    /// Net-worth total across all asset categories.
    pub asset_total: f64,
    /// Investment account balance.
    pub invest: f64,
    /// Real estate equity.
    pub real_estate: f64,
    /// Treasury bond holding.
    pub t_bond: f64,
    /// Cash deposits.
    pub deposit: f64,
    /// Pension balance.
    pub pension: f64,
    /// Vehicle value.
    pub car: f64,
    /// Lease (jeonse) deposit.
    pub jeonse: f64,
    /// Account/card balance.
    pub acc_card: f64,
}

/// One security position with a non-zero market value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub country: String,
    pub code: String,
    pub name: String,
    /// Asset-class tag as written in the sheet.
    pub asset_type: String,
    pub qty: f64,
    pub buy_amount: f64,
    pub eval_amount: f64,
    pub profit: f64,
    /// Already percent-scaled in the source; no rescaling applied.
    pub return_pct: f64,
    /// Portfolio weight, already percent-scaled.
    pub weight: f64,
}

/// One calendar year of the monthly series, with income decomposed into
/// dividend and capital-gain components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyRecord {
    pub year: i32,
    /// Dividend income earned during the year, never negative.
    pub div_income: f64,
    /// Capital-gain component: `total_return - div_income`.
    pub cap_gain: f64,
    /// Change in cumulative profit over the year.
    pub total_return: f64,
    /// Cumulative dividend income as of year end.
    pub cum_div: f64,
    /// Cumulative profit as of year end.
    pub cum_total: f64,
    pub year_end_principal: f64,
    pub year_end_eval: f64,
    /// Dividend growth versus the prior year, percent, two decimals.
    pub div_growth: f64,
}

/// Everything the presentation layer needs, rebuilt on each fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerData {
    pub summary: Summary,
    pub monthly: Vec<MonthlyRecord>,
    pub holdings: Vec<HoldingRecord>,
    pub yearly: Vec<YearlyRecord>,
}

impl MonthlyRecord {
    /// An all-zero record for a period key. Builder scaffolding for the
    /// duplicate-row merge.
    pub fn empty(period: String) -> Self {
        Self {
            period,
            principal: 0.0,
            eval_total: 0.0,
            profit: 0.0,
            principal_chg: 0.0,
            return_pct: 0.0,
            cum_dividend: 0.0,
            cap_gain: 0.0,
            dividend: 0.0,
            asset_total: 0.0,
            invest: 0.0,
            real_estate: 0.0,
            t_bond: 0.0,
            deposit: 0.0,
            pension: 0.0,
            car: 0.0,
            jeonse: 0.0,
            acc_card: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_round_trip() {
        let record = MonthlyRecord {
            principal: 3_000_000.0,
            eval_total: 3_250_000.0,
            profit: 250_000.0,
            return_pct: 8.33,
            ..MonthlyRecord::empty("2019-07".to_string())
        };

        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("2019-07"));

        let back: MonthlyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_empty_record_is_all_zero() {
        let record = MonthlyRecord::empty("2020-01".to_string());
        assert_eq!(record.principal, 0.0);
        assert_eq!(record.cum_dividend, 0.0);
        assert_eq!(record.period, "2020-01");
    }
}
