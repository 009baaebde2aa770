//! Smoke test: one brokerage's full 2024 book run through every report
//! surface, with the clock pinned to September 10, 2024.

use std::collections::HashMap;

use chrono::NaiveDate;
use commission_engine::{
    FixedClock, MonthFilter, Participant, StatusFilter, UserRole, YearFilter, filter_operations,
    operations_from_json,
};
use commission_engine::operation::{Operation, OperationStatus, OperationType};

use brokerage_reports::agents;
use brokerage_reports::{
    ReportConfig, annual_report, cumulative_closed_fees, dashboard_totals, global_summary,
    monthly_gross_fee_totals, open_fee_total, shared_operation_counts,
};

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2024, 9, 10).unwrap())
}

fn book() -> Vec<Operation> {
    operations_from_json(
        r#"[
            {
                "id": "jan-sale", "status": "closed", "kind": "sale", "team_id": "t1",
                "capture_date": "2023-12-01", "reservation_date": "2024-01-05",
                "operation_date": "2024-01-15",
                "reservation_value": 120000, "gross_fee_percent": 3, "gross_fee": 3600,
                "primary_advisor_id": "a1", "primary_advisor_percent": 50,
                "buyer_side": true, "seller_side": true, "exclusive": true
            },
            {
                "id": "mar-shared-sale", "status": "closed", "kind": "sale", "team_id": "t1",
                "capture_date": "2024-01-10", "reservation_date": "2024-02-20",
                "operation_date": "2024-03-05",
                "reservation_value": 90000, "gross_fee_percent": 3, "shared_percent": 0.5,
                "gross_fee": 2250,
                "buyer_side": true, "non_exclusive": true
            },
            {
                "id": "may-rental", "status": "closed", "kind": "traditional_rental",
                "team_id": "t2", "operation_date": "2024-05-10",
                "reservation_value": 30000, "gross_fee_percent": 5, "gross_fee": 1500,
                "primary_advisor_id": "a2", "primary_advisor_percent": 40,
                "seller_side": true
            },
            {
                "id": "jul-purchase", "status": "closed", "kind": "purchase",
                "capture_date": "2024-06-01", "reservation_date": "2024-07-01",
                "operation_date": "2024-07-20",
                "reservation_value": 200000, "gross_fee_percent": 2, "gross_fee": 4000,
                "primary_advisor_id": "a1", "additional_advisor_id": "a2",
                "primary_advisor_percent": 50, "additional_advisor_percent": 50,
                "buyer_side": true, "seller_side": true, "exclusive": true
            },
            {
                "id": "open-deal", "status": "in_progress", "kind": "sale",
                "reservation_value": 150000, "gross_fee_percent": 3, "gross_fee": 4500
            },
            {
                "id": "spring-fallen", "status": "fallen", "kind": "sale",
                "operation_date": "2024-04-01"
            },
            {
                "id": "last-year", "status": "closed", "kind": "sale",
                "operation_date": "2023-06-15",
                "reservation_value": 100000, "gross_fee_percent": 3, "gross_fee": 3000
            }
        ]"#,
    )
    .unwrap()
}

fn leader() -> Participant {
    Participant::new("tl", UserRole::TeamLeader)
}

#[test]
fn annual_report_covers_the_whole_year() {
    let ops = book();
    let config: ReportConfig = toml::from_str(
        r#"
        annual_objective = 20000.0

        [objectives]
        2024 = 25000.0
        "#,
    )
    .unwrap();
    let expenses: Vec<brokerage_reports::Expense> = vec![
        brokerage_reports::Expense { date: Some("2024-02-10".to_string()), amount: 500.0 },
        brokerage_reports::Expense { date: Some("2024-08-01".to_string()), amount: 250.0 },
        brokerage_reports::Expense { date: Some("2023-12-31".to_string()), amount: 999.0 },
    ];

    let report =
        annual_report(&ops, &expenses, Some(&leader()), &config, 2024, None, &clock());

    assert_eq!(report.closed_count, 4);
    assert_eq!(report.open_count, 1);
    assert_eq!(report.fallen_count, 1);

    // Pipeline fees: 3600 + 2250 + 1500 + 4000.
    assert_eq!(report.gross_fees, 11_350.0);
    assert_eq!(report.gross_fees_open, 4500.0);
    // Leader bases: 1800 + 2250 + 900 + 2000.
    assert_eq!(report.net_fees, 6950.0);
    assert_eq!(report.net_fees_open, 4500.0);

    assert_eq!(report.total_reservation_value, 440_000.0);
    assert_eq!(report.largest_sale, 200_000.0);
    assert_eq!(report.total_sides, 6);
    assert!((report.average_sale_value - 410_000.0 / 3.0).abs() < 1e-9);
    // Sale spans of 35, 41, and 30 days; the rental does not count.
    assert!((report.average_days_to_sell - 106.0 / 3.0).abs() < 1e-9);

    // Monthly rows hold the stored ledger figures.
    assert_eq!(report.monthly.len(), 12);
    assert_eq!(report.monthly[0].gross_fees, 3600.0);
    assert_eq!(report.monthly[2].net_fees, 2250.0);
    assert_eq!(report.monthly[6].operation_count, 1);
    assert_eq!(report.monthly[10].operation_count, 0, "November is past the clock");
    assert_eq!(report.average_monthly_net_fees, 6950.0 / 4.0);

    assert_eq!(report.exclusivity.exclusive, 2);
    assert_eq!(report.exclusivity.non_exclusive, 1);
    assert_eq!(report.exclusivity.unspecified, 1);

    // Sales lead the by-type table; the tied kinds order alphabetically.
    assert_eq!(report.by_type.len(), 3);
    assert_eq!(report.by_type[0].kind, OperationType::Sale);
    assert_eq!(report.by_type[0].count, 2);
    assert_eq!(report.by_type[0].gross_fees, 5850.0);
    assert_eq!(report.by_type[0].percentage, 50.0);
    assert_eq!(report.by_type[1].kind, OperationType::Purchase);
    assert_eq!(report.by_type[2].kind, OperationType::TraditionalRental);

    assert_eq!(report.expenses_total, 750.0);
    assert!((report.own_profitability - 6200.0 / 6950.0 * 100.0).abs() < 1e-9);
    assert!((report.total_profitability - 10_600.0 / 11_350.0 * 100.0).abs() < 1e-9);

    assert_eq!(report.objective, 25_000.0);
    assert!((report.objective_percent - 11_350.0 / 25_000.0 * 100.0).abs() < 1e-9);
}

#[test]
fn dashboard_and_series_agree_with_the_ledger() {
    let ops = book();

    // The dashboard view drops fallen operations up front.
    let live: Vec<Operation> = filter_operations(
        &ops,
        StatusFilter::All,
        YearFilter::All,
        MonthFilter::All,
        &clock(),
        None,
    )
    .into_iter()
    .cloned()
    .collect();
    assert_eq!(live.len(), 6);

    let totals = dashboard_totals(&live);
    assert_eq!(totals.closed_count, 5, "four 2024 closings plus the 2023 one");
    assert_eq!(totals.gross_fees, 18_850.0, "stored fees over the live book");
    assert_eq!(totals.gross_fees_open, 4500.0);
    assert_eq!(totals.total_sides, 6);

    let closed_series =
        monthly_gross_fee_totals(&ops, 2024, OperationStatus::Closed, &clock(), None);
    assert_eq!(closed_series[0], 3600.0);
    assert_eq!(closed_series[2], 2250.0);
    assert_eq!(closed_series[4], 1500.0);
    assert_eq!(closed_series[6], 4000.0);

    let cumulative = cumulative_closed_fees(&ops, 2024, &clock(), None);
    assert_eq!(cumulative[1], 3600.0);
    assert_eq!(cumulative[11], 11_350.0);

    assert_eq!(open_fee_total(&ops, 2024, &clock(), None), 4500.0);
}

#[test]
fn agent_views_credit_shared_operations_by_half() {
    let ops = book();

    // The July purchase is shared between a1 and a2, so its stored 4000
    // counts 2000 toward the period total.
    let gross = agents::adjusted_gross_fees(&ops, YearFilter::In(2024), MonthFilter::All, &clock());
    assert_eq!(gross, 9350.0);

    let a1_sides =
        agents::credited_sides(&ops, YearFilter::In(2024), MonthFilter::All, "a1", &clock());
    assert_eq!(a1_sides, 3, "both January sides plus one July side");
    let a2_sides =
        agents::credited_sides(&ops, YearFilter::In(2024), MonthFilter::All, "a2", &clock());
    assert_eq!(a2_sides, 2, "the rental side plus one July side");
}

#[test]
fn office_rollup_resolves_leaders_per_team() {
    let ops = book();
    let closed_2024: Vec<Operation> = ops
        .iter()
        .filter(|op| {
            op.status == OperationStatus::Closed
                && op.operation_date.as_deref().is_some_and(|d| d.starts_with("2024"))
        })
        .cloned()
        .collect();

    let mut leaders = HashMap::new();
    leaders.insert("t1".to_string(), Participant::new("tl", UserRole::TeamLeader));
    leaders.insert("t2".to_string(), Participant::new("tl2", UserRole::TeamLeader));

    let summary = global_summary(&closed_2024, &leaders);
    assert_eq!(summary.operation_count, 4);
    assert_eq!(summary.office_count, 3, "two teams plus the unassigned July deal");
    assert_eq!(summary.gross_fees, 11_350.0);
    // 1800 + 2250 under t1, 900 under t2, nothing for the leaderless deal.
    assert_eq!(summary.net_fees, 4950.0);
}

#[test]
fn shared_widget_counts_this_years_closings() {
    let ops = book();
    let counts = shared_operation_counts(&ops, &clock());
    assert_eq!(counts.fully_credited, 2, "January and July held both sides");
    assert_eq!(counts.shared, 2);
    assert_eq!(counts.total, 4);
}
