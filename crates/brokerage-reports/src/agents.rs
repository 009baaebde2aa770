//! Per-agent production aggregates.
//!
//! Everything here runs over closed operations in a selected period. An
//! operation carrying two distinct advisors counts half toward each
//! advisor's fee figures; side credits have their own slot rules.

use commission_engine::calendar::{Clock, operation_year_month, parse_date};
use commission_engine::filters::{MonthFilter, YearFilter};
use commission_engine::net_fee::net_fee;
use commission_engine::operation::{Operation, OperationStatus, OperationType};
use commission_engine::participant::Participant;

/// Closed operations matching the period. Unlike the dashboard filter this
/// keeps dateless records under an all-years view; agent career totals
/// include deals that predate date capture.
fn closed_in_period<'a>(
    ops: &'a [Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> Vec<&'a Operation> {
    ops.iter()
        .filter(|op| {
            if op.status != OperationStatus::Closed {
                return false;
            }
            let resolved = operation_year_month(op, clock, None);
            let year_ok = match year {
                YearFilter::All => true,
                YearFilter::In(y) => resolved.map(|(ry, _)| ry) == Some(y),
            };
            let month_ok = match month {
                MonthFilter::All => true,
                MonthFilter::In(m) => resolved.map(|(_, rm)| rm) == Some(m),
            };
            year_ok && month_ok
        })
        .collect()
}

/// 0.5 when two distinct advisors share the operation, 1.0 otherwise.
fn credit_factor(op: &Operation) -> f64 {
    if op.has_distinct_advisors() { 0.5 } else { 1.0 }
}

/// Stored gross fees, half-credited on shared operations.
pub fn adjusted_gross_fees(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> f64 {
    closed_in_period(ops, year, month, clock)
        .iter()
        .map(|op| op.gross_fee * credit_factor(op))
        .sum()
}

/// Net fees for the participant, half-credited on shared operations.
pub fn adjusted_net_fees(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    participant: Option<&Participant>,
    clock: &impl Clock,
) -> f64 {
    closed_in_period(ops, year, month, clock)
        .iter()
        .map(|op| net_fee(op, participant) * credit_factor(op))
        .sum()
}

pub fn operation_count(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> usize {
    closed_in_period(ops, year, month, clock).len()
}

pub fn buyer_side_count(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> usize {
    closed_in_period(ops, year, month, clock).iter().filter(|op| op.buyer_side).count()
}

pub fn seller_side_count(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> usize {
    closed_in_period(ops, year, month, clock).iter().filter(|op| op.seller_side).count()
}

/// Sides credited to one advisor across the period.
///
/// An advisor holding both slots, or the only filled slot with no second
/// advisor anywhere, earns every flagged side. On an operation with a
/// second advisor each participant earns exactly one side.
pub fn credited_sides(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    advisor_id: &str,
    clock: &impl Clock,
) -> usize {
    closed_in_period(ops, year, month, clock)
        .iter()
        .map(|op| {
            let flagged = usize::from(op.buyer_side) + usize::from(op.seller_side);
            let primary = op.primary_advisor() == Some(advisor_id);
            let additional = op.additional_advisor() == Some(advisor_id);

            if primary && additional {
                flagged
            } else if primary || additional {
                if op.additional_advisor().is_some() { 1 } else { flagged }
            } else {
                0
            }
        })
        .sum()
}

pub fn total_reservation_value(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> f64 {
    closed_in_period(ops, year, month, clock).iter().map(|op| op.reservation_value).sum()
}

/// Mean reservation value over sale-like operations in the period.
pub fn average_operation_value(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> f64 {
    let values: Vec<f64> = closed_in_period(ops, year, month, clock)
        .iter()
        .filter(|op| op.kind.is_sale_like())
        .map(|op| op.reservation_value)
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean capture-to-reservation span in days. Rentals and developments are
/// excluded; both dates must parse.
pub fn average_days_to_sell(
    ops: &[Operation],
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
) -> f64 {
    let spans: Vec<f64> = closed_in_period(ops, year, month, clock)
        .iter()
        .filter(|op| !op.kind.is_rental() && op.kind != OperationType::PropertyDevelopment)
        .filter_map(|op| {
            let capture = parse_date(op.capture_date.as_deref()?)?;
            let reservation = parse_date(op.reservation_date.as_deref()?)?;
            Some((reservation - capture).num_days() as f64)
        })
        .collect();
    if spans.is_empty() {
        return 0.0;
    }
    spans.iter().sum::<f64>() / spans.len() as f64
}
