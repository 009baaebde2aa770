//! Month-by-month fee series for the dashboard chart.
//!
//! Buckets use resolved months, so open deals ride in the current month
//! and move with the clock until they close.

use commission_engine::calendar::{Clock, operation_year_month};
use commission_engine::operation::{Operation, OperationStatus};

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Stored gross fees summed per month (index 0 = January) for operations
/// of one status resolving to the given year.
pub fn monthly_gross_fee_totals(
    ops: &[Operation],
    year: i32,
    status: OperationStatus,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> [f64; 12] {
    let mut months = [0.0; 12];

    for op in ops {
        if op.status != status {
            continue;
        }
        let Some((resolved_year, resolved_month)) =
            operation_year_month(op, clock, effective_year)
        else {
            continue;
        };
        if resolved_year != year {
            continue;
        }
        months[resolved_month as usize - 1] += op.gross_fee;
    }

    months
}

/// Running total of the closed series, each entry rounded to cents.
pub fn cumulative_closed_fees(
    ops: &[Operation],
    year: i32,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> [f64; 12] {
    let series =
        monthly_gross_fee_totals(ops, year, OperationStatus::Closed, clock, effective_year);
    let mut running = 0.0;
    series.map(|month| {
        running += month;
        round2(running)
    })
}

/// Total stored fees across the year's in-progress pipeline.
pub fn open_fee_total(
    ops: &[Operation],
    year: i32,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> f64 {
    let series =
        monthly_gross_fee_totals(ops, year, OperationStatus::InProgress, clock, effective_year);
    round2(series.iter().sum())
}
