//! Annual report assembly.
//!
//! Key design decisions:
//! - Headline fees are recomputed through the discount pipeline; the
//!   by-type breakdown and the monthly table read the stored ledger
//!   figures, matching what each report page always showed.
//! - Quarter filtering places operations by the raw month of their
//!   recorded date. Dateless records drop out of a quarter view.
//! - The by-type breakdown covers the whole year even when a quarter is
//!   selected; its share percentages still use the quarter-filtered closed
//!   count, so a narrowed view can legitimately show shares above 100%.

use std::collections::HashMap;

use chrono::Datelike;
use serde::Deserialize;

use commission_engine::calendar::{Clock, operation_year, parse_date, recorded_date};
use commission_engine::discounts::operation_gross;
use commission_engine::filters::operations_in_year;
use commission_engine::net_fee::net_fee;
use commission_engine::operation::{Operation, OperationStatus, OperationType};
use commission_engine::participant::Participant;

use crate::config::ReportConfig;
use crate::totals::{ExclusivityCount, average_days_to_sell, average_sale_value, exclusivity_count};

// ── Report types ────────────────────────────────────────────────────────

/// One operation kind's slice of the year.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeBreakdown {
    pub kind: OperationType,
    pub count: usize,
    /// Stored gross fees for the kind.
    pub gross_fees: f64,
    pub reservation_value: f64,
    /// Share of the (possibly quarter-filtered) closed count.
    pub percentage: f64,
    /// Share of the year's stored gross fees.
    pub percentage_gains: f64,
}

/// One calendar month's row of the report table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRow {
    /// Calendar month, 1-12.
    pub month: u32,
    pub operation_count: usize,
    /// Stored gross fees closed in the month.
    pub gross_fees: f64,
    pub net_fees: f64,
}

/// A standalone expense record, dated in local currency.
#[derive(Debug, Clone, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: f64,
}

/// The assembled annual (or quarterly) report.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualReport {
    pub year: i32,
    pub quarter: Option<u8>,

    pub closed_count: usize,
    pub open_count: usize,
    pub fallen_count: usize,

    /// Pipeline-recomputed fees over closed operations.
    pub gross_fees: f64,
    pub gross_fees_open: f64,
    /// Requesting participant's net fees over closed operations.
    pub net_fees: f64,
    pub net_fees_open: f64,

    pub total_reservation_value: f64,
    pub largest_sale: f64,
    pub total_sides: usize,
    pub average_sale_value: f64,
    pub average_days_to_sell: f64,
    pub average_monthly_net_fees: f64,

    pub exclusivity: ExclusivityCount,
    pub by_type: Vec<TypeBreakdown>,
    /// Always 12 rows, January through December.
    pub monthly: Vec<MonthlyRow>,

    pub expenses_total: f64,
    /// Net fees vs expenses, percent.
    pub own_profitability: f64,
    /// Gross fees vs expenses, percent.
    pub total_profitability: f64,

    pub objective: f64,
    pub objective_percent: f64,
}

// ── Assembly ────────────────────────────────────────────────────────────

/// Kinds grouped in the by-type breakdown. Anything else is left out of
/// the table (but still counts toward fee totals).
const GROUPED_KINDS: [OperationType; 7] = [
    OperationType::Sale,
    OperationType::Purchase,
    OperationType::GoingConcern,
    OperationType::TraditionalRental,
    OperationType::PropertyDevelopment,
    OperationType::TemporaryRental,
    OperationType::CommercialRental,
];

fn quarter_months(quarter: u8) -> std::ops::RangeInclusive<u32> {
    let start = (quarter as u32 - 1) * 3 + 1;
    start..=start + 2
}

/// Raw calendar month of the recorded date, no in-progress override.
fn raw_month(op: &Operation) -> Option<u32> {
    recorded_date(op).map(|d| d.month())
}

fn fee_profitability(fees: f64, expenses: f64) -> f64 {
    if fees > 0.0 { (fees - expenses) / fees * 100.0 } else { 0.0 }
}

/// Assemble the report for one year, optionally narrowed to a quarter.
pub fn annual_report(
    ops: &[Operation],
    expenses: &[Expense],
    participant: Option<&Participant>,
    config: &ReportConfig,
    year: i32,
    quarter: Option<u8>,
    clock: &impl Clock,
) -> AnnualReport {
    let quarter = quarter.filter(|q| (1..=4).contains(q));
    let today = clock.today();

    let year_ops = operations_in_year(ops, year, clock, config.effective_year);

    let in_quarter: Vec<&Operation> = match quarter {
        Some(q) => {
            let months = quarter_months(q);
            year_ops
                .iter()
                .filter(|op| raw_month(op).is_some_and(|m| months.contains(&m)))
                .copied()
                .collect()
        }
        None => year_ops.clone(),
    };

    let closed: Vec<&Operation> =
        in_quarter.iter().filter(|op| op.status == OperationStatus::Closed).copied().collect();
    let open: Vec<&Operation> =
        in_quarter.iter().filter(|op| op.status == OperationStatus::InProgress).copied().collect();
    let fallen_count =
        in_quarter.iter().filter(|op| op.status == OperationStatus::Fallen).count();

    let gross_fees: f64 = closed.iter().map(|op| operation_gross(op)).sum();
    let gross_fees_open: f64 = open.iter().map(|op| operation_gross(op)).sum();
    let net_fees: f64 = closed.iter().map(|op| net_fee(op, participant)).sum();
    let net_fees_open: f64 = open.iter().map(|op| net_fee(op, participant)).sum();

    let total_reservation_value: f64 = closed.iter().map(|op| op.reservation_value).sum();
    let largest_sale = closed
        .iter()
        .filter(|op| op.kind.is_sale_like())
        .map(|op| op.reservation_value)
        .fold(0.0, f64::max);
    let total_sides = closed
        .iter()
        .map(|op| usize::from(op.buyer_side) + usize::from(op.seller_side))
        .sum();

    let by_type = type_breakdown(ops, year, closed.len(), clock);
    let (monthly, average_monthly_net_fees) =
        monthly_table(&closed, participant, year, today);

    let expenses_total = expense_total(expenses, year, quarter);
    let objective = config.objective_for(year);
    let objective_percent =
        if objective > 0.0 { gross_fees / objective * 100.0 } else { 0.0 };

    AnnualReport {
        year,
        quarter,
        closed_count: closed.len(),
        open_count: open.len(),
        fallen_count,
        gross_fees,
        gross_fees_open,
        net_fees,
        net_fees_open,
        total_reservation_value,
        largest_sale,
        total_sides,
        average_sale_value: average_sale_value(closed.iter().copied()),
        average_days_to_sell: average_days_to_sell(closed.iter().copied()),
        average_monthly_net_fees,
        exclusivity: exclusivity_count(closed.iter().copied()),
        by_type,
        monthly,
        expenses_total,
        own_profitability: fee_profitability(net_fees, expenses_total),
        total_profitability: fee_profitability(gross_fees, expenses_total),
        objective,
        objective_percent,
    }
}

/// The by-type table covers the full year's closed operations regardless
/// of quarter; `share_base` carries the quarter-filtered closed count.
fn type_breakdown(
    ops: &[Operation],
    year: i32,
    share_base: usize,
    clock: &impl Clock,
) -> Vec<TypeBreakdown> {
    #[derive(Default)]
    struct KindTotals {
        count: usize,
        gross_fees: f64,
        reservation_value: f64,
    }

    let year_closed: Vec<&Operation> = ops
        .iter()
        .filter(|op| {
            op.status == OperationStatus::Closed
                && operation_year(op, clock, None) == Some(year)
        })
        .collect();

    let total_stored_gross: f64 = year_closed.iter().map(|op| op.gross_fee).sum();

    let mut groups: HashMap<OperationType, KindTotals> = HashMap::new();
    for op in &year_closed {
        if !GROUPED_KINDS.contains(&op.kind) {
            continue;
        }
        let totals = groups.entry(op.kind).or_default();
        totals.count += 1;
        totals.gross_fees += op.gross_fee;
        totals.reservation_value += op.reservation_value;
    }

    let mut breakdown: Vec<TypeBreakdown> = groups
        .into_iter()
        .map(|(kind, totals)| TypeBreakdown {
            kind,
            count: totals.count,
            gross_fees: totals.gross_fees,
            reservation_value: totals.reservation_value,
            percentage: if share_base > 0 {
                totals.count as f64 / share_base as f64 * 100.0
            } else {
                0.0
            },
            percentage_gains: if total_stored_gross > 0.0 {
                totals.gross_fees / total_stored_gross * 100.0
            } else {
                0.0
            },
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| a.kind.to_string().cmp(&b.kind.to_string()))
    });
    breakdown
}

/// Twelve monthly rows plus the mean of net fees over months with data.
/// When reporting the clock's own year, months past the current one are
/// zeroed and excluded from the mean.
fn monthly_table(
    closed: &[&Operation],
    participant: Option<&Participant>,
    year: i32,
    today: chrono::NaiveDate,
) -> (Vec<MonthlyRow>, f64) {
    let is_current_year = year == today.year();
    let current_month = today.month();

    let mut rows: Vec<MonthlyRow> = (1..=12)
        .map(|month| MonthlyRow { month, operation_count: 0, gross_fees: 0.0, net_fees: 0.0 })
        .collect();

    for op in closed {
        let Some(month) = raw_month(op) else {
            continue;
        };
        let row = &mut rows[month as usize - 1];
        row.operation_count += 1;
        row.gross_fees += op.gross_fee;
        row.net_fees += net_fee(op, participant);
    }

    if is_current_year {
        for row in rows.iter_mut().filter(|r| r.month > current_month) {
            *row = MonthlyRow {
                month: row.month,
                operation_count: 0,
                gross_fees: 0.0,
                net_fees: 0.0,
            };
        }
    }

    let with_data: Vec<&MonthlyRow> = rows
        .iter()
        .filter(|r| r.operation_count > 0 && (!is_current_year || r.month <= current_month))
        .collect();
    let average = if with_data.is_empty() {
        0.0
    } else {
        with_data.iter().map(|r| r.net_fees).sum::<f64>() / with_data.len() as f64
    };

    (rows, average)
}

fn expense_total(expenses: &[Expense], year: i32, quarter: Option<u8>) -> f64 {
    let months = quarter.map(quarter_months);
    expenses
        .iter()
        .filter_map(|exp| {
            let date = parse_date(exp.date.as_deref()?)?;
            if date.year() != year {
                return None;
            }
            if let Some(months) = &months {
                if !months.contains(&date.month()) {
                    return None;
                }
            }
            Some(exp.amount)
        })
        .sum()
}

/// Operation counts per kind for one status and year, for the dashboard
/// pie breakdowns (including the fallen view).
pub fn type_counts(
    ops: &[Operation],
    status: OperationStatus,
    year: i32,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> HashMap<OperationType, usize> {
    let mut counts: HashMap<OperationType, usize> = HashMap::new();
    for op in ops {
        if op.status != status {
            continue;
        }
        if operation_year(op, clock, effective_year) != Some(year) {
            continue;
        }
        *counts.entry(op.kind).or_default() += 1;
    }
    counts
}
