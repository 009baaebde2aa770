//! Portfolio-wide dashboard totals.
//!
//! Sums run over the stored record figures, not the recomputed pipeline;
//! the dashboard reflects what the ledger says was earned. Callers are
//! expected to have dropped fallen operations upstream.

use commission_engine::operation::{Operation, OperationStatus};

// ── Dashboard totals ────────────────────────────────────────────────────

/// Headline numbers for the operations dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardTotals {
    /// Reservation value over every given operation.
    pub reservation_value: f64,
    pub reservation_value_closed: f64,
    /// Stored gross fees over every given operation.
    pub gross_fees: f64,
    pub gross_fees_closed: f64,
    pub gross_fees_open: f64,
    /// Stored advisor fees over every given operation.
    pub advisor_fees: f64,
    pub advisor_fees_closed: f64,
    pub advisor_fees_open: f64,
    /// Closed operations only.
    pub closed_count: usize,
    pub buyer_side_count: usize,
    pub seller_side_count: usize,
    pub total_sides: usize,
    pub average_reservation_value: f64,
    pub average_advisor_percent: f64,
    pub average_gross_fee_percent: f64,
    /// Mean reservation value over closed sale-like operations.
    pub average_sale_value: f64,
    /// Mean capture-to-reservation span in days over closed operations.
    pub average_days_to_sell: f64,
}

/// Fold a slice of operations into dashboard totals.
pub fn dashboard_totals(ops: &[Operation]) -> DashboardTotals {
    let mut totals = DashboardTotals::default();
    if ops.is_empty() {
        return totals;
    }

    for op in ops {
        totals.reservation_value += op.reservation_value;
        totals.gross_fees += op.gross_fee;
        totals.advisor_fees += op.advisor_fee;

        match op.status {
            OperationStatus::Closed => {
                totals.reservation_value_closed += op.reservation_value;
                totals.gross_fees_closed += op.gross_fee;
                totals.advisor_fees_closed += op.advisor_fee;
                totals.closed_count += 1;
                if op.buyer_side {
                    totals.buyer_side_count += 1;
                }
                if op.seller_side {
                    totals.seller_side_count += 1;
                }
            }
            OperationStatus::InProgress => {
                totals.gross_fees_open += op.gross_fee;
                totals.advisor_fees_open += op.advisor_fee;
            }
            OperationStatus::Fallen => {}
        }
    }

    totals.total_sides = totals.buyer_side_count + totals.seller_side_count;

    let count = ops.len() as f64;
    totals.average_reservation_value = totals.reservation_value / count;
    totals.average_advisor_percent =
        ops.iter().map(|op| op.primary_advisor_percent).sum::<f64>() / count;
    totals.average_gross_fee_percent =
        ops.iter().map(|op| op.gross_fee_percent).sum::<f64>() / count;

    totals.average_sale_value = average_sale_value(ops);
    totals.average_days_to_sell = average_days_to_sell(ops);

    totals
}

/// Mean reservation value over closed sale-like operations, 0 when none.
pub(crate) fn average_sale_value<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> f64 {
    let values: Vec<f64> = ops
        .into_iter()
        .filter(|op| op.status == OperationStatus::Closed && op.kind.is_sale_like())
        .map(|op| op.reservation_value)
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean days between capture and reservation over closed operations that
/// carry both dates. Rentals and developments sell on other timescales and
/// are excluded.
pub(crate) fn average_days_to_sell<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> f64 {
    use commission_engine::calendar::parse_date;
    use commission_engine::operation::OperationType;

    let spans: Vec<f64> = ops
        .into_iter()
        .filter(|op| {
            op.status == OperationStatus::Closed
                && !op.kind.is_rental()
                && op.kind != OperationType::PropertyDevelopment
        })
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

// ── Exclusivity ─────────────────────────────────────────────────────────

/// Exclusivity classification over a set of operations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExclusivityCount {
    pub exclusive: usize,
    pub non_exclusive: usize,
    /// Operations carrying either flag; the percentage base.
    pub classified: usize,
    pub unspecified: usize,
    pub exclusive_percent: f64,
    pub non_exclusive_percent: f64,
}

/// Count exclusive vs non-exclusive operations.
///
/// The exclusive flag wins when a record carries both; records with neither
/// stay out of the percentage base.
pub fn exclusivity_count<'a>(ops: impl IntoIterator<Item = &'a Operation>) -> ExclusivityCount {
    let mut count = ExclusivityCount::default();

    for op in ops {
        if op.exclusive == Some(true) {
            count.exclusive += 1;
        } else if op.non_exclusive == Some(true) {
            count.non_exclusive += 1;
        } else {
            count.unspecified += 1;
        }
    }

    count.classified = count.exclusive + count.non_exclusive;
    if count.classified > 0 {
        let base = count.classified as f64;
        count.exclusive_percent = count.exclusive as f64 / base * 100.0;
        count.non_exclusive_percent = count.non_exclusive as f64 / base * 100.0;
    }

    count
}
