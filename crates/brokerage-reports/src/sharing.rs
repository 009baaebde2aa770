//! Shared vs fully-credited operation counts for the dashboard widget.
//!
//! An operation where the brokerage held both sides was handled entirely
//! in-house; holding one side (or none recorded) means the deal was shared
//! with another brokerage.

use chrono::Datelike;

use commission_engine::calendar::{Clock, recorded_date};
use commission_engine::operation::{Operation, OperationStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SharedOperationCounts {
    pub shared: usize,
    pub fully_credited: usize,
    pub total: usize,
}

/// Classify this year's closed operations by side ownership.
pub fn shared_operation_counts(ops: &[Operation], clock: &impl Clock) -> SharedOperationCounts {
    let year = clock.today().year();
    let mut counts = SharedOperationCounts::default();

    for op in ops {
        if op.status != OperationStatus::Closed {
            continue;
        }
        if recorded_date(op).map(|d| d.year()) != Some(year) {
            continue;
        }
        if op.buyer_side && op.seller_side {
            counts.fully_credited += 1;
        } else {
            counts.shared += 1;
        }
    }

    counts.total = counts.shared + counts.fully_credited;
    counts
}
