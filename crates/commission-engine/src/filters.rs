//! Status and period filtering used by every report surface.

use crate::calendar::{Clock, operation_year, operation_year_month};
use crate::operation::{Operation, OperationStatus};

/// Status selection. `All` means every live status, so fallen operations
/// only show up when asked for by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(OperationStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OperationStatus) -> bool {
        match self {
            StatusFilter::All => status != OperationStatus::Fallen,
            StatusFilter::Only(s) => status == *s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    All,
    In(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    /// Calendar month, 1-12.
    In(u32),
}

/// Whether the record carries any period information at all. In-progress
/// operations always do; settled ones need at least one non-empty date
/// field, parseable or not.
fn has_period(op: &Operation) -> bool {
    if op.status == OperationStatus::InProgress {
        return true;
    }
    [op.operation_date.as_deref(), op.reservation_date.as_deref(), op.capture_date.as_deref()]
        .into_iter()
        .flatten()
        .any(|s| !s.is_empty())
}

/// Filter operations by status and period.
///
/// Settled operations with no date field at all are dropped even when both
/// period filters are `All`; they can never be placed in time.
pub fn filter_operations<'a>(
    ops: &'a [Operation],
    status: StatusFilter,
    year: YearFilter,
    month: MonthFilter,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> Vec<&'a Operation> {
    ops.iter()
        .filter(|op| {
            if !status.matches(op.status) || !has_period(op) {
                return false;
            }
            match (year, month) {
                (YearFilter::All, MonthFilter::All) => true,
                (YearFilter::In(y), MonthFilter::All) => {
                    operation_year(op, clock, effective_year) == Some(y)
                }
                (YearFilter::All, MonthFilter::In(m)) => {
                    operation_year_month(op, clock, effective_year)
                        .is_some_and(|(_, month)| month == m)
                }
                (YearFilter::In(y), MonthFilter::In(m)) => {
                    operation_year_month(op, clock, effective_year) == Some((y, m))
                }
            }
        })
        .collect()
}

/// Every operation that resolves to the given year, regardless of status.
pub fn operations_in_year<'a>(
    ops: &'a [Operation],
    year: i32,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> Vec<&'a Operation> {
    ops.iter()
        .filter(|op| operation_year(op, clock, effective_year) == Some(year))
        .collect()
}
