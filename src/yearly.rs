//! Yearly Rollup Deriver: collapses the sorted monthly series into one
//! record per calendar year, decomposing the year's income into dividend and
//! capital-gain components.

use crate::model::{MonthlyRecord, YearlyRecord};
use crate::period::year_of;
use std::collections::BTreeMap;

/// Per-year aggregation collected during the grouping pass.
#[derive(Debug, Default)]
struct YearBucket {
    dividend_sum: f64,
    year_end_cum_div: f64,
    last_profit: f64,
    last_principal: f64,
    last_eval: f64,
}

/// Derives the yearly rollup from an ascending-sorted monthly series.
///
/// The per-month dividend column is unreliable in some periods, so a year
/// whose summed monthly dividends come out non-positive infers its dividend
/// income from the year-over-year delta of the cumulative-dividend
/// carry-forward instead. Cumulative state threads through the years as an
/// explicit fold accumulator. An empty series derives an empty rollup; the
/// whole-document check belongs to the monthly builder.
pub fn derive_yearly(monthly: &[MonthlyRecord]) -> Vec<YearlyRecord> {
    let mut by_year: BTreeMap<i32, YearBucket> = BTreeMap::new();

    for record in monthly {
        let year = year_of(&record.period).parse::<i32>().unwrap_or(0);
        let bucket = by_year.entry(year).or_default();
        bucket.dividend_sum += record.dividend;
        // Carry-forward is non-decreasing, so the max is the year-end value
        // even if a stray out-of-order record slipped through.
        bucket.year_end_cum_div = bucket.year_end_cum_div.max(record.cum_dividend);
        bucket.last_profit = record.profit;
        bucket.last_principal = record.principal;
        bucket.last_eval = record.eval_total;
    }

    let mut prev_cum_div = 0.0;
    let mut prev_profit = 0.0;
    let mut years = Vec::with_capacity(by_year.len());

    for (year, bucket) in by_year {
        let mut div_income = bucket.dividend_sum;
        if div_income <= 0.0 && bucket.year_end_cum_div > prev_cum_div {
            div_income = bucket.year_end_cum_div - prev_cum_div;
        }
        // Clamp before computing cap_gain so the decomposition identity
        // div_income + cap_gain == total_return holds unconditionally.
        div_income = div_income.max(0.0);

        let total_return = bucket.last_profit - prev_profit;
        let cap_gain = total_return - div_income;

        years.push(YearlyRecord {
            year,
            div_income,
            cap_gain,
            total_return,
            cum_div: bucket.year_end_cum_div,
            cum_total: bucket.last_profit,
            year_end_principal: bucket.last_principal,
            year_end_eval: bucket.last_eval,
            div_growth: 0.0,
        });

        prev_cum_div = bucket.year_end_cum_div;
        prev_profit = bucket.last_profit;
    }

    // Growth rates need the full ordered sequence, so they get a second pass.
    for i in 1..years.len() {
        let prev_income = years[i - 1].div_income;
        if prev_income != 0.0 {
            years[i].div_growth = round2((years[i].div_income / prev_income - 1.0) * 100.0);
        }
    }

    years
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
