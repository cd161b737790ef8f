use portfolio_sheet_parser::*;

/// Builds a tab-joined line with values at the given column indices.
fn sparse_row(cells: &[(usize, &str)], min_width: usize) -> String {
    let width = cells
        .iter()
        .map(|(idx, _)| idx + 1)
        .max()
        .unwrap_or(0)
        .max(min_width);
    let mut row = vec![""; width];
    for (idx, value) in cells {
        row[*idx] = value;
    }
    row.join("\t")
}

/// A monthly data row shaped like the real sheet: date in the first column,
/// core figures at the relative offsets, category balances and the
/// cumulative-dividend column at their historical absolute indices.
fn tracker_row(date: &str, principal: &str, eval: &str, profit: &str, ret: &str, cum_div: &str) -> String {
    sparse_row(
        &[
            (0, date),
            (1, principal),
            (2, eval),
            (3, profit),
            (6, ret),
            (45, "500"),
            (46, principal),
            (53, "4000"),
            (58, cum_div),
        ],
        10,
    )
}

/// A full monthly tracker document with the summary block, the header row,
/// and the given data rows starting at row 14.
fn tracker_doc(data_rows: &[String]) -> String {
    let mut lines = vec![
        "포트폴리오 월간 기록".to_string(),
        String::new(),
        sparse_row(&[(10, "46500"), (11, "12700"), (12, "59200"), (13, "27.3")], 0),
        sparse_row(&[(2, "54"), (4, "3120"), (6, "-4.2"), (11, "1500")], 0),
        sparse_row(&[(2, "235"), (11, "11200")], 0),
        String::new(),
        String::new(),
        sparse_row(
            &[(0, "날짜"), (1, "원금"), (2, "평가금"), (53, "TOTAL"), (58, "누적 배당 수익")],
            0,
        ),
    ];
    lines.extend(std::iter::repeat_with(String::new).take(6));
    lines.extend(data_rows.iter().cloned());
    lines.join("\n")
}

fn holdings_doc(rows: &[&str]) -> String {
    let mut lines =
        vec!["국가\t코드\t종목명\t구분\t수량\t매수금액\t평가금액\t손익\t수익률\t비중"];
    lines.extend_from_slice(rows);
    lines.join("\n")
}

#[test]
fn test_bootstrapping_clamp_scenario() {
    // A row with principal 3,000 (units-of-1000) and the messy date token
    // "19/ 07", then a later row whose raw return exceeds 500% while its
    // principal sits below the bootstrapping threshold.
    let doc = tracker_doc(&[
        tracker_row("19/ 07", "3000", "3250", "250", "8.3", ""),
        tracker_row("20/01", "3100", "2900", "-200", "712", ""),
    ]);

    let (_, monthly) = parse_monthly_document(&doc).unwrap();
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].period, "2019-07");
    assert_eq!(monthly[1].period, "2020-01");

    assert_eq!(monthly[0].principal, 3_000_000.0);
    assert_eq!(monthly[0].return_pct, 8.3);
    // 3,100,000 < 10,000,000 and |712| > 500: clamped, not rescaled.
    assert_eq!(monthly[1].return_pct, 0.0);
}

#[test]
fn test_cumulative_dividend_step_scenario() {
    // Blank for three rows, then 22569 (units-of-1000) on the fourth.
    let doc = tracker_doc(&[
        tracker_row("21/01", "20000", "21000", "1000", "5.0", ""),
        tracker_row("21/02", "20000", "21200", "1200", "6.0", ""),
        tracker_row("21/03", "20000", "21500", "1500", "7.5", ""),
        tracker_row("21/04", "20000", "22000", "2000", "10.0", "22569"),
        tracker_row("21/05", "20000", "22500", "2500", "12.5", ""),
        tracker_row("21/06", "20000", "23000", "3000", "15.0", "23100"),
    ]);

    let (summary, monthly) = parse_monthly_document(&doc).unwrap();
    let cum: Vec<f64> = monthly.iter().map(|m| m.cum_dividend).collect();
    assert_eq!(
        cum,
        [0.0, 0.0, 0.0, 22_569_000.0, 22_569_000.0, 23_100_000.0]
    );

    // The summary block is reconciled against the reconstructed series.
    assert_eq!(summary.cum_dividend, 23_100_000.0);
    assert_eq!(summary.cum_cap_gain, 3_000_000.0 - 23_100_000.0);
}

#[test]
fn test_summary_block_scaling_and_guards() {
    let doc = tracker_doc(&[tracker_row("19/07", "3000", "3250", "250", "8.3", "")]);
    let (summary, _) = parse_monthly_document(&doc).unwrap();

    assert_eq!(summary.principal, 46_500_000.0);
    assert_eq!(summary.profit, 12_700_000.0);
    assert_eq!(summary.eval_total, 59_200_000.0);
    assert_eq!(summary.return_pct, 27.3);
    assert_eq!(summary.months, 54.0);
    // 3120 trips the scale-defect guard.
    assert_eq!(summary.high_return_pct, 31.2);
    assert_eq!(summary.from_high_pct, -4.2);
    assert_eq!(summary.avg_monthly_profit, 235_000.0);
}

#[test]
fn test_full_pipeline_produces_consistent_tracker_data() {
    let monthly_doc = tracker_doc(&[
        tracker_row("19/07", "15000", "15300", "300", "2.0", ""),
        tracker_row("19/12", "16000", "16900", "900", "5.6", "400"),
        tracker_row("20/06", "18000", "19500", "1500", "8.3", "900"),
        tracker_row("20/12", "18000", "20400", "2400", "13.3", "1300"),
    ]);
    let holdings = holdings_doc(&[
        "미국\tVOO\tVanguard S&P 500\tETF\t12\t5,000,000\t6,200,000\t1,200,000\t24%\t35.2",
        "한국\t005930\t삼성전자\t주식\t50\t3,000,000\t3,600,000\t600,000\t20%\t20.4",
        "미국\tGONE\tSold Position\t주식\t0\t1,000,000\t0\t0\t0\t0",
    ]);

    let data = TrackerParser::default().parse(&monthly_doc, &holdings).unwrap();

    // Monthly: sorted, unique, carry-forward intact.
    let periods: Vec<&str> = data.monthly.iter().map(|m| m.period.as_str()).collect();
    assert_eq!(periods, ["2019-07", "2019-12", "2020-06", "2020-12"]);
    for pair in data.monthly.windows(2) {
        assert!(pair[1].period > pair[0].period);
        assert!(pair[1].cum_dividend >= pair[0].cum_dividend);
    }

    // Summary reconciled from the last record.
    assert_eq!(data.summary.cum_dividend, 1_300_000.0);
    assert_eq!(data.summary.cum_cap_gain, 2_400_000.0 - 1_300_000.0);

    // Holdings: zero-value position dropped, rest weight-sorted.
    assert_eq!(data.holdings.len(), 2);
    assert_eq!(data.holdings[0].code, "VOO");
    assert_eq!(data.holdings[1].code, "005930");

    // Yearly: two years, decomposition identity, dividend income inferred
    // from the cumulative deltas (the per-month column is blank).
    assert_eq!(data.yearly.len(), 2);
    let y2019 = &data.yearly[0];
    let y2020 = &data.yearly[1];
    assert_eq!(y2019.div_income, 400_000.0);
    assert_eq!(y2019.total_return, 900_000.0);
    assert_eq!(y2020.div_income, 900_000.0);
    assert_eq!(y2020.total_return, 1_500_000.0);
    for year in &data.yearly {
        assert!((year.div_income + year.cap_gain - year.total_return).abs() < 1e-6);
    }
    // (900,000 / 400,000 - 1) * 100 = 125.00.
    assert_eq!(y2020.div_growth, 125.0);
}

#[test]
fn test_duplicate_month_rows_merge_most_recent_nonzero() {
    let doc = tracker_doc(&[
        tracker_row("20/06", "15000", "15500", "500", "3.3", ""),
        // Corrected row entered later for the same month, return left blank.
        tracker_row("20/06", "15000", "15800", "800", "", ""),
    ]);
    let (_, monthly) = parse_monthly_document(&doc).unwrap();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].eval_total, 15_800_000.0);
    assert_eq!(monthly[0].profit, 800_000.0);
    assert_eq!(monthly[0].return_pct, 3.3);
}

#[test]
fn test_messy_cells_never_break_a_valid_document() {
    let doc = tracker_doc(&[
        tracker_row("19/07", "₩3,000", "#N/A", "250원", "8.3%", "#REF!"),
        tracker_row("19/08", "3,100", "3,400", "300", "9.7", ""),
    ]);
    let (_, monthly) = parse_monthly_document(&doc).unwrap();
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0].principal, 3_000_000.0);
    // #N/A evaluation falls back to principal.
    assert_eq!(monthly[0].eval_total, 3_000_000.0);
    assert_eq!(monthly[0].profit, 250_000.0);
    assert_eq!(monthly[0].return_pct, 8.3);
    assert_eq!(monthly[0].cum_dividend, 0.0);
}

#[test]
fn test_empty_documents_fail_loudly() {
    assert!(matches!(
        parse_monthly_document(""),
        Err(SheetParseError::EmptyMonthlySeries(_))
    ));
    assert!(matches!(
        parse_holdings_document(holdings_doc(&[]).as_str()),
        Err(SheetParseError::EmptyHoldings(_))
    ));
}

#[test]
fn test_category_balances_read_from_absolute_columns() {
    let doc = tracker_doc(&[tracker_row("19/07", "3000", "3250", "250", "8.3", "")]);
    let (_, monthly) = parse_monthly_document(&doc).unwrap();
    assert_eq!(monthly[0].deposit, 500_000.0);
    assert_eq!(monthly[0].invest, 3_000_000.0);
    assert_eq!(monthly[0].asset_total, 4_000_000.0);
}
